use bevy::math::{Vec2, Vec3};
use constants::hex_color;
use constants::scene::{
    SHAPE_COUNT, SHAPE_EXTRA_COLORS, SHAPE_MAX_DIST_MAX, SHAPE_MAX_DIST_MIN, SHAPE_OPACITY,
    SHAPE_SPAWN_HALF_EXTENTS,
};
use constants::theme::ThemeInfo;
use rand::Rng;

use super::{between, phase, spread};
use crate::engine::scene::object::{
    FloatMotion, FloatingShape, GeometryDesc, MaterialDesc, SolidKind,
};
use crate::engine::scene::{Behavior, SceneObject, SceneObjectPool};

const SHAPE_KINDS: [SolidKind; 5] = [
    SolidKind::Icosahedron {
        radius: 3.0,
        subdivisions: 0,
    },
    SolidKind::Octahedron { radius: 3.0 },
    SolidKind::Tetrahedron { radius: 3.0 },
    SolidKind::Cube { size: 3.0 },
    SolidKind::Sphere {
        radius: 2.0,
        segments: 8,
    },
];

/// Unit direction away from the origin along one axis; random when the
/// coordinate sits exactly on it.
fn outward<R: Rng + ?Sized>(rng: &mut R, coordinate: f32) -> f32 {
    if coordinate != 0.0 {
        coordinate.signum()
    } else {
        spread(rng, 1.0)
    }
}

pub fn build<R: Rng + ?Sized>(theme: &ThemeInfo, pool: &mut SceneObjectPool, rng: &mut R) {
    let [primary, secondary, accent] = theme.accents();
    let palette = [
        primary,
        secondary,
        accent,
        SHAPE_EXTRA_COLORS[0],
        SHAPE_EXTRA_COLORS[1],
    ];
    let [hx, hy, hz] = SHAPE_SPAWN_HALF_EXTENTS;

    for _ in 0..SHAPE_COUNT {
        let kind = SHAPE_KINDS[rng.gen_range(0..SHAPE_KINDS.len())];
        let color = hex_color(palette[rng.gen_range(0..palette.len())]);
        let wireframe = rng.gen_bool(0.5);

        let position = Vec3::new(spread(rng, hx), spread(rng, hy), spread(rng, hz));
        let scale = between(rng, 1.0, 3.0);
        let dir = Vec2::new(outward(rng, position.x), outward(rng, position.y));

        let shape = FloatingShape {
            anchor: position.truncate(),
            velocity: Vec3::new(
                dir.x * between(rng, 0.01, 0.04),
                dir.y * between(rng, 0.01, 0.03),
                spread(rng, 0.005),
            ),
            spin: Vec2::new(spread(rng, 0.0015), spread(rng, 0.0015)),
            float: FloatMotion {
                speed: between(rng, 0.05, 0.15),
                phase: phase(rng),
                amount: between(rng, 1.0, 3.0),
            },
            max_dist: between(rng, SHAPE_MAX_DIST_MIN, SHAPE_MAX_DIST_MAX),
        };

        pool.add(
            SceneObject::new(
                GeometryDesc::Solid(kind),
                MaterialDesc::basic(color, SHAPE_OPACITY).wireframe(wireframe),
                Behavior::FloatingShape(shape),
            )
            .at(position)
            .scaled(Vec3::splat(scale)),
        );
    }
}
