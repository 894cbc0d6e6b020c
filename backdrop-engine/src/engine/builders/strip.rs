use bevy::color::Color;
use bevy::math::Vec3;
use constants::hex_color;
use constants::scene::{
    PARTICLE_COLOR_WEIGHTS, PARTICLE_COUNT, PARTICLE_OPACITY, PARTICLE_RADIUS_MAX,
    PARTICLE_RADIUS_MIN, STRIP_GLOW_COLOR, STRIP_GLOW_OPACITY, STRIP_GLOW_SCALE, STRIP_HALF_WIDTH,
    STRIP_OPACITY, STRIP_RADIUS, STRIP_U_SEGMENTS, STRIP_V_SEGMENTS, STRIP_WIREFRAME_COLOR,
    STRIP_WIREFRAME_OPACITY,
};
use constants::theme::ThemeInfo;
use rand::Rng;

use super::{between, phase};
use crate::engine::geometry::build_strip_surface;
use crate::engine::scene::object::{Decoration, FaceSide, GeometryDesc, MaterialDesc};
use crate::engine::scene::{Behavior, SceneObject, SceneObjectPool};
use crate::error::BackdropResult;

pub fn build<R: Rng + ?Sized>(
    theme: &ThemeInfo,
    pool: &mut SceneObjectPool,
    rng: &mut R,
) -> BackdropResult<()> {
    let mesh = build_strip_surface(
        STRIP_RADIUS,
        STRIP_HALF_WIDTH,
        STRIP_U_SEGMENTS,
        STRIP_V_SEGMENTS,
    )?;
    let normals = mesh.normals();

    let surface = SceneObject::new(
        GeometryDesc::Strip { mesh, normals },
        MaterialDesc::basic(hex_color(theme.primary), STRIP_OPACITY).side(FaceSide::Double),
        Behavior::StripSurface,
    )
    .with_decoration(Decoration {
        material: MaterialDesc::basic(hex_color(STRIP_WIREFRAME_COLOR), STRIP_WIREFRAME_OPACITY)
            .wireframe(true),
        scale: 1.0,
    })
    .with_decoration(Decoration {
        material: MaterialDesc::basic(hex_color(STRIP_GLOW_COLOR), STRIP_GLOW_OPACITY)
            .side(FaceSide::Back),
        scale: STRIP_GLOW_SCALE,
    });
    pool.add(surface);

    let palette = [
        hex_color(theme.primary),
        hex_color(STRIP_WIREFRAME_COLOR),
        hex_color(STRIP_GLOW_COLOR),
    ];
    let mut positions = Vec::with_capacity(PARTICLE_COUNT);
    let mut colors = Vec::with_capacity(PARTICLE_COUNT);
    for _ in 0..PARTICLE_COUNT {
        let radius = between(rng, PARTICLE_RADIUS_MIN, PARTICLE_RADIUS_MAX);
        let theta = phase(rng);
        // Cosine-distributed polar angle gives a uniform spread over the sphere.
        let phi = (rng.r#gen::<f32>() * 2.0 - 1.0).acos();
        positions.push(Vec3::new(
            radius * phi.sin() * theta.cos(),
            radius * phi.sin() * theta.sin(),
            radius * phi.cos(),
        ));

        let pick = rng.r#gen::<f32>();
        let color = if pick < PARTICLE_COLOR_WEIGHTS[0] {
            palette[0]
        } else if pick < PARTICLE_COLOR_WEIGHTS[1] {
            palette[1]
        } else {
            palette[2]
        };
        colors.push(color);
    }

    pool.add(SceneObject::new(
        GeometryDesc::PointCloud { positions, colors },
        MaterialDesc::basic(Color::WHITE, PARTICLE_OPACITY).additive(),
        Behavior::ParticleCloud,
    ));
    Ok(())
}
