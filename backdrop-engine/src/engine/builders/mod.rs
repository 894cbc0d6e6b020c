//! Procedural background builders, one per [`BackgroundKind`].
//!
//! Each builder fills an empty [`SceneObjectPool`] from the theme palette and
//! a caller-supplied RNG. Geometry errors propagate; nothing is rendered here.

/// Random gears, hubs, pulsing nodes and the packet-carrying graph.
pub mod circuit;

/// Falling glyph columns and drifting code symbols.
pub mod code_rain;

/// Bouncing polyhedra field.
pub mod shapes;

/// Twisted strip surface and its particle halo.
pub mod strip;

use bevy::log::info;
use constants::theme::{BackgroundKind, ThemeInfo};
use rand::Rng;

use crate::engine::glyph::GlyphRasterizer;
use crate::engine::scene::SceneObjectPool;
use crate::error::BackdropResult;

/// Populate `pool` with the theme's background. Returns the number of objects
/// added.
pub fn build_background<R: Rng + ?Sized>(
    theme: &ThemeInfo,
    pool: &mut SceneObjectPool,
    rng: &mut R,
    glyphs: &mut dyn GlyphRasterizer,
) -> BackdropResult<usize> {
    let before = pool.len();
    match theme.background {
        BackgroundKind::Strip => strip::build(theme, pool, rng)?,
        BackgroundKind::Shapes => shapes::build(theme, pool, rng),
        BackgroundKind::Circuit => circuit::build(theme, pool, rng)?,
        BackgroundKind::CodeRain => code_rain::build(theme, pool, rng, glyphs),
    }
    let added = pool.len() - before;
    info!(
        "Built {} background for theme '{}': {} objects",
        theme.background.as_str(),
        theme.id,
        added
    );
    Ok(added)
}

/// Uniform sample in `[min, max)`.
pub(crate) fn between<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + rng.r#gen::<f32>() * (max - min)
}

/// Uniform sample in `[-half, half)`.
pub(crate) fn spread<R: Rng + ?Sized>(rng: &mut R, half: f32) -> f32 {
    (rng.r#gen::<f32>() - 0.5) * 2.0 * half
}

pub(crate) fn phase<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.r#gen::<f32>() * std::f32::consts::TAU
}
