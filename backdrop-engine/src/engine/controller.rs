use bevy::log::{error, info};
use bevy::prelude::Resource;
use constants::theme::{THEMES, ThemeInfo, find_theme};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::engine::animation::{self, SceneClock};
use crate::engine::builders::build_background;
use crate::engine::camera::{PointerState, ViewCamera};
use crate::engine::glyph::GlyphRasterizer;
use crate::engine::hover::{self, HoverReport};
use crate::engine::scene::SceneObjectPool;
use crate::error::{BackdropError, BackdropResult};

/// Owns the active theme and every object of the current background.
///
/// A theme change clears the pool and runs the matching builder; `tick`
/// drives one frame of animation and hover response.
#[derive(Resource)]
pub struct BackgroundController {
    theme: usize,
    pool: SceneObjectPool,
    clock: SceneClock,
    camera: ViewCamera,
    rng: StdRng,
    glyphs: Box<dyn GlyphRasterizer>,
    last_hover: HoverReport,
    /// Bumped on every rebuild, including ones that produce an empty scene.
    revision: u64,
}

impl BackgroundController {
    /// Build the background for `theme`. A `seed` makes every rebuild
    /// reproducible; without one the RNG is seeded from entropy.
    pub fn new(
        theme: usize,
        seed: Option<u64>,
        glyphs: Box<dyn GlyphRasterizer>,
    ) -> BackdropResult<Self> {
        if theme >= THEMES.len() {
            return Err(BackdropError::ThemeIndexOutOfRange(theme));
        }
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut controller = Self {
            theme,
            pool: SceneObjectPool::new(),
            clock: SceneClock::default(),
            camera: ViewCamera::default(),
            rng,
            glyphs,
            last_hover: HoverReport::default(),
            revision: 0,
        };
        controller.rebuild();
        Ok(controller)
    }

    pub fn theme_index(&self) -> usize {
        self.theme
    }

    pub fn theme(&self) -> &'static ThemeInfo {
        &THEMES[self.theme]
    }

    pub fn set_theme(&mut self, index: usize) -> BackdropResult<()> {
        if index >= THEMES.len() {
            return Err(BackdropError::ThemeIndexOutOfRange(index));
        }
        self.theme = index;
        self.rebuild();
        Ok(())
    }

    pub fn set_theme_by_id(&mut self, id: &str) -> BackdropResult<usize> {
        let index = find_theme(id).ok_or_else(|| BackdropError::UnknownTheme(id.to_string()))?;
        self.set_theme(index)?;
        Ok(index)
    }

    /// Drop the current generation and build the active theme's background.
    /// A failed build is logged and leaves the scene empty.
    pub fn rebuild(&mut self) {
        let released = self.pool.clear();
        self.last_hover = HoverReport::default();
        self.revision += 1;
        let theme = &THEMES[self.theme];
        info!(
            "Switching background to '{}' ({} objects released)",
            theme.id, released
        );

        let built = build_background(theme, &mut self.pool, &mut self.rng, self.glyphs.as_mut());
        if let Err(err) = built {
            error!("Failed to build '{}' background: {}", theme.id, err);
            self.pool.clear();
        }
    }

    /// Advance one frame: clock, motion, picking, hover. Decays the pointer
    /// tilt afterwards.
    pub fn tick(&mut self, pointer: &mut PointerState) -> HoverReport {
        let t = self.clock.advance();
        animation::step(
            &mut self.pool,
            t,
            pointer.tilt,
            &mut self.rng,
            self.glyphs.as_mut(),
        );

        let hit = self
            .camera
            .ray_from_ndc(pointer.ndc)
            .and_then(|ray| hover::pick(&self.pool, &ray))
            .map(|(id, _)| id);
        self.last_hover = hover::resolve(&mut self.pool, hit, &mut self.rng);

        pointer.decay();
        self.last_hover
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.camera.resize(width, height);
    }

    pub fn pool(&self) -> &SceneObjectPool {
        &self.pool
    }

    pub fn camera(&self) -> &ViewCamera {
        &self.camera
    }

    pub fn clock(&self) -> SceneClock {
        self.clock
    }

    pub fn last_hover(&self) -> HoverReport {
        self.last_hover
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::glyph::StampRasterizer;
    use crate::engine::scene::BehaviorTag;
    use bevy::math::Vec2;
    use std::collections::HashSet;

    fn controller(theme: usize) -> BackgroundController {
        BackgroundController::new(theme, Some(42), Box::new(StampRasterizer)).unwrap()
    }

    fn tags(controller: &BackgroundController) -> HashSet<BehaviorTag> {
        controller.pool().all().map(|(_, o)| o.tag()).collect()
    }

    #[test]
    fn theme_switch_leaves_nothing_from_the_previous_theme() {
        let mut controller = controller(0);
        assert!(tags(&controller).contains(&BehaviorTag::StripSurface));
        let generation = controller.pool().generation();

        controller.set_theme_by_id("automation").unwrap();
        let after = tags(&controller);
        assert!(!after.contains(&BehaviorTag::StripSurface));
        assert!(!after.contains(&BehaviorTag::ParticleCloud));
        assert!(after.contains(&BehaviorTag::CircuitNode));
        assert_eq!(controller.pool().generation(), generation + 1);
        assert_eq!(controller.revision(), 2);

        controller.set_theme(3).unwrap();
        let rain = tags(&controller);
        for tag in [
            BehaviorTag::CircuitNode,
            BehaviorTag::CircuitRing,
            BehaviorTag::CircuitConnection,
            BehaviorTag::DataPacket,
            BehaviorTag::HubNode,
            BehaviorTag::Gear,
        ] {
            assert!(!rain.contains(&tag), "{tag:?} survived the switch");
        }
        assert!(rain.contains(&BehaviorTag::FallingChar));
    }

    #[test]
    fn every_theme_builds_a_non_empty_scene() {
        for index in 0..THEMES.len() {
            let controller = controller(index);
            assert!(!controller.pool().is_empty(), "theme {index} is empty");
        }
    }

    #[test]
    fn invalid_theme_requests_are_rejected() {
        assert!(matches!(
            BackgroundController::new(9, None, Box::new(StampRasterizer)),
            Err(BackdropError::ThemeIndexOutOfRange(9))
        ));

        let mut controller = controller(1);
        assert_eq!(
            controller.set_theme_by_id("nope"),
            Err(BackdropError::UnknownTheme("nope".into()))
        );
        assert_eq!(controller.theme_index(), 1);
    }

    #[test]
    fn tick_advances_clock_and_decays_tilt() {
        let mut controller = controller(1);
        let mut pointer = PointerState {
            ndc: Vec2::new(0.9, 0.9),
            tilt: Vec2::new(0.1, 0.0),
        };
        controller.tick(&mut pointer);
        controller.tick(&mut pointer);

        assert_eq!(controller.clock().frame, 2);
        assert!((pointer.tilt.x - 0.1 * 0.95 * 0.95).abs() < 1e-6);
        // Every pooled object has had its resting scale captured.
        assert!(controller.pool().pooled().iter().all(|o| o.original_scale.is_some()));
    }
}
