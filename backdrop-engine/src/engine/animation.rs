use bevy::color::Color;
use bevy::math::{Vec2, Vec3};
use constants::hex_color;
use constants::scene::{
    RAIN_BOTTOM_Y, RAIN_GLYPH_PX, RAIN_HEAD_COLOR, RAIN_RESET_Y, RAIN_SYMBOL_SPIN,
    RAIN_SYMBOL_WALL_X, RAIN_SYMBOL_WALL_Y, SHAPE_CENTER_BOUNCE, SHAPE_WALL_X, SHAPE_WALL_Y,
    SHAPE_WALL_Z, STRIP_TILT_GAIN, TIME_STEP,
};
use rand::Rng;

use crate::engine::builders::code_rain::{change_interval, random_glyph};
use crate::engine::glyph::GlyphRasterizer;
use crate::engine::scene::object::{
    DataPacket, FallingChar, FloatingShape, FloatingSymbol, GearSpin, GlyphSprite, HubNode,
};
use crate::engine::scene::{Behavior, SceneObject, SceneObjectPool};

/// Frame-locked scene time.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SceneClock {
    pub time: f32,
    pub frame: u64,
}

impl SceneClock {
    pub fn advance(&mut self) -> f32 {
        self.time += TIME_STEP;
        self.frame += 1;
        self.time
    }
}

/// Advance every live object by one frame at scene time `t`.
///
/// Rings, connections and packets read positions written earlier in the same
/// call, so they are resolved after the free-moving objects: nodes first,
/// then rings and connection endpoints, then packets along those endpoints.
pub fn step<R: Rng + ?Sized>(
    pool: &mut SceneObjectPool,
    t: f32,
    tilt: Vec2,
    rng: &mut R,
    glyphs: &mut dyn GlyphRasterizer,
) {
    if let Some(strip) = pool.strip_mut() {
        strip.rotation = Vec3::new(
            t * 0.2 + tilt.y * STRIP_TILT_GAIN,
            t * 0.3 + tilt.x * STRIP_TILT_GAIN,
            t * 0.1,
        );
    }
    if let Some(particles) = pool.particles_mut() {
        particles.rotation.x = t * 0.05;
        particles.rotation.y = t * 0.08;
    }

    for object in pool.pooled_mut() {
        step_free_object(object, t, rng, glyphs);
    }

    let node_positions: Vec<Vec3> = pool
        .nodes()
        .iter()
        .map(|id| pool.pooled()[id.index()].position)
        .collect();

    for object in pool.pooled_mut() {
        match &mut object.behavior {
            Behavior::CircuitRing { parent } => {
                if let Some(&position) = node_positions.get(*parent) {
                    object.position = position;
                }
                object.rotation.z = t * 2.0;
            }
            Behavior::CircuitConnection(connection) => {
                if let (Some(&from), Some(&to)) = (
                    node_positions.get(connection.start),
                    node_positions.get(connection.end),
                ) {
                    connection.points = [from, to];
                }
            }
            _ => {}
        }
    }

    let paths: Vec<[Vec3; 2]> = (0..pool.connection_count())
        .filter_map(|i| pool.connection(i).map(|c| c.points))
        .collect();

    let pulse = 0.8 + (t * 5.0).sin() * 0.3;
    let glow = 0.7 + (t * 8.0).sin() * 0.3;
    for object in pool.pooled_mut() {
        let Behavior::DataPacket(packet) = &mut object.behavior else {
            continue;
        };
        let Some(&[from, to]) = paths.get(packet.connection) else {
            continue;
        };
        advance_packet(packet);
        object.position = from.lerp(to, packet.progress);
        object.scale = Vec3::splat(pulse);
        object.material.opacity = glow;
    }
}

fn step_free_object<R: Rng + ?Sized>(
    object: &mut SceneObject,
    t: f32,
    rng: &mut R,
    glyphs: &mut dyn GlyphRasterizer,
) {
    let SceneObject {
        behavior,
        position,
        rotation,
        scale,
        glyph,
        ..
    } = object;

    match behavior {
        Behavior::FloatingShape(shape) => step_floating_shape(shape, position, rotation, t),
        Behavior::CircuitNode(node) => {
            position.x = node.original_pos.x + node.float.cos(t, 0.7) / 2.0;
            position.y = node.original_pos.y + node.float.sin(t, 1.0);
            position.z = node.original_pos.z;
            *scale = Vec3::splat(node.base_scale * (1.0 + 0.2 * (t * 2.0 + node.pulse).sin()));
        }
        Behavior::HubNode(hub) => step_hub(hub, position, rotation, t),
        Behavior::Gear(gear) => step_gear(gear, position, rotation, t),
        Behavior::FloatingSymbol(symbol) => step_symbol(symbol, position, rotation, t),
        Behavior::FallingChar(falling) => {
            step_falling_char(falling, position, glyph, rng, glyphs)
        }
        Behavior::StripSurface
        | Behavior::ParticleCloud
        | Behavior::CircuitRing { .. }
        | Behavior::CircuitConnection(_)
        | Behavior::DataPacket(_) => {}
    }
}

fn step_floating_shape(
    shape: &mut FloatingShape,
    position: &mut Vec3,
    rotation: &mut Vec3,
    t: f32,
) {
    shape.anchor += shape.velocity.truncate();
    position.z += shape.velocity.z;

    // Both checks run every frame; a shape past max_dist and a wall gets both.
    if shape.anchor.length() > shape.max_dist {
        shape.velocity.x *= SHAPE_CENTER_BOUNCE;
        shape.velocity.y *= SHAPE_CENTER_BOUNCE;
    }
    if shape.anchor.x.abs() > SHAPE_WALL_X {
        shape.velocity.x *= -1.0;
    }
    if shape.anchor.y.abs() > SHAPE_WALL_Y {
        shape.velocity.y *= -1.0;
    }
    if position.z.abs() > SHAPE_WALL_Z {
        shape.velocity.z *= -1.0;
    }

    position.x = shape.anchor.x + shape.float.sin(t, 0.5);
    position.y = shape.anchor.y + shape.float.sin(t, 1.0);
    rotation.x += shape.spin.x;
    rotation.y += shape.spin.y;
}

fn step_hub(hub: &HubNode, position: &mut Vec3, rotation: &mut Vec3, t: f32) {
    position.x = hub.original_pos.x + hub.float.cos(t, 0.6) * 0.4;
    position.y = hub.original_pos.y + hub.float.sin(t, 1.0);
    *rotation += hub.spin;
}

fn step_gear(gear: &GearSpin, position: &mut Vec3, rotation: &mut Vec3, t: f32) {
    position.y = gear.original_pos.y + gear.float.sin(t, 1.0);
    rotation.z += gear.spin;
}

fn step_symbol(symbol: &mut FloatingSymbol, position: &mut Vec3, rotation: &mut Vec3, t: f32) {
    symbol.anchor += symbol.velocity;
    if symbol.anchor.x.abs() > RAIN_SYMBOL_WALL_X {
        symbol.velocity.x *= -1.0;
    }
    if symbol.anchor.y.abs() > RAIN_SYMBOL_WALL_Y {
        symbol.velocity.y *= -1.0;
    }
    *position = symbol.anchor + Vec3::Y * symbol.float.sin(t, 1.0);
    rotation.z += RAIN_SYMBOL_SPIN;
}

fn step_falling_char<R: Rng + ?Sized>(
    falling: &mut FallingChar,
    position: &mut Vec3,
    sprite: &mut Option<GlyphSprite>,
    rng: &mut R,
    glyphs: &mut dyn GlyphRasterizer,
) {
    position.y -= falling.fall_speed;
    if position.y < RAIN_BOTTOM_Y {
        position.y = RAIN_RESET_Y;
    }

    falling.timer += 1.0;
    if falling.timer < falling.interval {
        return;
    }
    falling.timer = 0.0;
    falling.interval = change_interval(rng, falling.depth);

    let color: Color = if falling.head {
        hex_color(RAIN_HEAD_COLOR)
    } else {
        falling.trail_color
    };
    let next = random_glyph(rng);
    let bitmap = glyphs.rasterize(next, color, RAIN_GLYPH_PX);
    match sprite {
        Some(sprite) => {
            sprite.glyph = next;
            sprite.bitmap = bitmap;
            sprite.revision = sprite.revision.wrapping_add(1);
        }
        None => {
            *sprite = Some(GlyphSprite {
                glyph: next,
                bitmap,
                revision: 0,
            })
        }
    }
}

/// Move along the edge and bounce at either end. Progress is clamped to
/// `[0, 1]` and the direction flips in the frame a bound is reached.
pub fn advance_packet(packet: &mut DataPacket) {
    if packet.reverse {
        packet.progress -= packet.speed;
        if packet.progress <= 0.0 {
            packet.progress = 0.0;
            packet.reverse = false;
        }
    } else {
        packet.progress += packet.speed;
        if packet.progress >= 1.0 {
            packet.progress = 1.0;
            packet.reverse = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::builders::circuit;
    use crate::engine::glyph::{GlyphBitmap, StampRasterizer};
    use crate::engine::scene::object::{FloatMotion, GeometryDesc, MaterialDesc, SolidKind};
    use constants::theme::THEMES;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const STILL: FloatMotion = FloatMotion {
        speed: 0.0,
        phase: 0.0,
        amount: 0.0,
    };

    fn shape_at(anchor: Vec2, velocity: Vec3, max_dist: f32) -> SceneObject {
        SceneObject::new(
            GeometryDesc::Solid(SolidKind::Cube { size: 3.0 }),
            MaterialDesc::basic(Color::WHITE, 0.7),
            Behavior::FloatingShape(FloatingShape {
                anchor,
                velocity,
                spin: Vec2::ZERO,
                float: STILL,
                max_dist,
            }),
        )
        .at(anchor.extend(0.0))
    }

    fn velocity_of(pool: &SceneObjectPool) -> Vec3 {
        match &pool.pooled()[0].behavior {
            Behavior::FloatingShape(shape) => shape.velocity,
            other => panic!("unexpected {other:?}"),
        }
    }

    fn step_once(pool: &mut SceneObjectPool, t: f32) {
        let mut rng = StdRng::seed_from_u64(0);
        step(pool, t, Vec2::ZERO, &mut rng, &mut StampRasterizer);
    }

    #[test]
    fn clock_advances_by_fixed_step() {
        let mut clock = SceneClock::default();
        clock.advance();
        clock.advance();
        assert_eq!(clock.frame, 2);
        assert!((clock.time - 2.0 * TIME_STEP).abs() < 1e-6);
    }

    #[test]
    fn packet_flips_exactly_at_the_far_end() {
        let mut packet = DataPacket {
            connection: 0,
            progress: 0.5,
            reverse: false,
            speed: 0.5,
        };
        advance_packet(&mut packet);
        assert_eq!(packet.progress, 1.0);
        assert!(packet.reverse);

        advance_packet(&mut packet);
        assert_eq!(packet.progress, 0.5);
        advance_packet(&mut packet);
        assert_eq!(packet.progress, 0.0);
        assert!(!packet.reverse);
    }

    #[test]
    fn packet_overshoot_is_clamped() {
        let mut packet = DataPacket {
            connection: 0,
            progress: 0.9,
            reverse: false,
            speed: 0.3,
        };
        advance_packet(&mut packet);
        assert_eq!(packet.progress, 1.0);
        assert!(packet.reverse);
    }

    #[test]
    fn packet_near_the_end_clamps_then_heads_back() {
        let mut packet = DataPacket {
            connection: 0,
            progress: 0.98,
            reverse: false,
            speed: 0.05,
        };
        advance_packet(&mut packet);
        assert_eq!(packet.progress, 1.0);
        assert!(packet.reverse);

        advance_packet(&mut packet);
        assert!((packet.progress - 0.95).abs() < 1e-6);
        assert!(packet.reverse);
    }

    #[test]
    fn hub_and_gear_float_and_spin() {
        let mut pool = SceneObjectPool::new();
        let float = FloatMotion {
            speed: 1.0,
            phase: 0.0,
            amount: 2.0,
        };
        pool.add(
            SceneObject::new(
                GeometryDesc::Solid(SolidKind::Icosahedron {
                    radius: 2.5,
                    subdivisions: 1,
                }),
                MaterialDesc::basic(Color::WHITE, 0.7),
                Behavior::HubNode(HubNode {
                    original_pos: Vec3::new(5.0, 6.0, 7.0),
                    spin: Vec3::new(0.01, 0.02, 0.03),
                    float,
                }),
            )
            .at(Vec3::new(5.0, 6.0, 7.0)),
        );
        pool.add(
            SceneObject::new(
                GeometryDesc::Solid(SolidKind::Cube { size: 1.0 }),
                MaterialDesc::basic(Color::WHITE, 0.7),
                Behavior::Gear(GearSpin {
                    original_pos: Vec3::new(1.0, 2.0, 3.0),
                    spin: 0.05,
                    float: FloatMotion {
                        speed: 2.0,
                        phase: 0.5,
                        amount: 3.0,
                    },
                }),
            )
            .at(Vec3::new(1.0, 2.0, 3.0)),
        );

        step_once(&mut pool, 1.0);
        step_once(&mut pool, 1.0);

        let hub = &pool.pooled()[0];
        assert!((hub.position.x - (5.0 + 0.6f32.cos() * 2.0 * 0.4)).abs() < 1e-5);
        assert!((hub.position.y - (6.0 + 1.0f32.sin() * 2.0)).abs() < 1e-5);
        assert_eq!(hub.position.z, 7.0);
        assert!((hub.rotation - Vec3::new(0.02, 0.04, 0.06)).length() < 1e-6);

        let gear = &pool.pooled()[1];
        assert_eq!(gear.position.x, 1.0);
        assert!((gear.position.y - (2.0 + 2.5f32.sin() * 3.0)).abs() < 1e-5);
        assert_eq!(gear.position.z, 3.0);
        assert!((gear.rotation.z - 0.1).abs() < 1e-6);
        assert_eq!(gear.rotation.x, 0.0);
    }

    #[test]
    fn floating_symbol_reflects_off_the_walls() {
        let symbol = |anchor: Vec3, velocity: Vec3| {
            SceneObject::new(
                GeometryDesc::GlyphQuad,
                MaterialDesc::basic(Color::WHITE, 0.5),
                Behavior::FloatingSymbol(FloatingSymbol {
                    anchor,
                    velocity,
                    float: STILL,
                }),
            )
            .at(anchor)
        };
        let mut pool = SceneObjectPool::new();
        pool.add(symbol(Vec3::new(69.99, 0.0, 4.0), Vec3::new(0.02, 0.01, 0.0)));
        pool.add(symbol(Vec3::new(0.0, -54.99, 4.0), Vec3::new(0.01, -0.02, 0.0)));
        step_once(&mut pool, 0.5);

        let velocities: Vec<Vec3> = pool
            .pooled()
            .iter()
            .map(|object| match &object.behavior {
                Behavior::FloatingSymbol(symbol) => symbol.velocity,
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(velocities[0], Vec3::new(-0.02, 0.01, 0.0));
        assert_eq!(velocities[1], Vec3::new(0.01, 0.02, 0.0));

        let first = &pool.pooled()[0];
        assert!((first.position.x - 70.01).abs() < 1e-4);
        assert_eq!(first.position.z, 4.0);
        assert!((first.rotation.z - RAIN_SYMBOL_SPIN).abs() < 1e-6);
    }

    #[test]
    fn shape_past_max_dist_bounces_inward() {
        let mut pool = SceneObjectPool::new();
        pool.add(shape_at(Vec2::new(40.0, 40.0), Vec3::new(0.02, 0.01, 0.0), 50.0));
        step_once(&mut pool, 0.0);

        let v = velocity_of(&pool);
        assert!((v.x - -0.016).abs() < 1e-6);
        assert!((v.y - -0.008).abs() < 1e-6);
    }

    #[test]
    fn shape_past_max_dist_and_wall_gets_both_bounces() {
        let mut pool = SceneObjectPool::new();
        pool.add(shape_at(Vec2::new(99.0, 0.0), Vec3::new(0.02, 0.01, 0.0), 70.0));
        step_once(&mut pool, 0.0);

        let v = velocity_of(&pool);
        // Radial -0.8 followed by the X wall's -1.
        assert!((v.x - 0.016).abs() < 1e-6);
        assert!((v.y - -0.008).abs() < 1e-6);
    }

    #[test]
    fn shape_wall_bounce_only_flips_that_axis() {
        let mut pool = SceneObjectPool::new();
        pool.add(shape_at(Vec2::new(66.0, 0.0), Vec3::new(0.02, 0.01, 0.0), 100.0));
        step_once(&mut pool, 0.0);

        let v = velocity_of(&pool);
        assert!((v.x - -0.02).abs() < 1e-6);
        assert!((v.y - 0.01).abs() < 1e-6);
    }

    #[test]
    fn connections_and_rings_follow_their_nodes() {
        let mut pool = SceneObjectPool::new();
        let mut rng = StdRng::seed_from_u64(17);
        circuit::build(&THEMES[2], &mut pool, &mut rng).unwrap();

        for frame in 1..=5 {
            step_once(&mut pool, frame as f32 * TIME_STEP);

            for index in 0..pool.connection_count() {
                let c = pool.connection(index).unwrap();
                assert_ne!(c.start, c.end);
                assert_eq!(c.points[0], pool.node_object(c.start).unwrap().position);
                assert_eq!(c.points[1], pool.node_object(c.end).unwrap().position);
            }
            for object in pool.pooled() {
                if let Behavior::CircuitRing { parent } = object.behavior {
                    assert_eq!(object.position, pool.node_object(parent).unwrap().position);
                }
            }
            for &id in pool.packets() {
                let packet = pool.packet(id).unwrap();
                assert!((0.0..=1.0).contains(&packet.progress));
            }
        }
    }

    #[test]
    fn falling_glyph_wraps_and_redraws() {
        let mut pool = SceneObjectPool::new();
        pool.add(
            SceneObject::new(
                GeometryDesc::GlyphQuad,
                MaterialDesc::basic(Color::WHITE, 1.0),
                Behavior::FallingChar(FallingChar {
                    fall_speed: 0.1,
                    timer: 9.0,
                    interval: 10.0,
                    head: true,
                    depth: 0.0,
                    trail_color: Color::WHITE,
                }),
            )
            .at(Vec3::new(0.0, -59.95, 0.0))
            .with_glyph('A', GlyphBitmap::blank(RAIN_GLYPH_PX)),
        );
        step_once(&mut pool, 0.0);

        let object = &pool.pooled()[0];
        assert_eq!(object.position.y, RAIN_RESET_Y);
        let sprite = object.glyph.as_ref().unwrap();
        assert_eq!(sprite.revision, 1);
        assert_eq!(sprite.bitmap.size, RAIN_GLYPH_PX);
        let Behavior::FallingChar(falling) = &object.behavior else {
            unreachable!();
        };
        assert_eq!(falling.timer, 0.0);
        assert!((8.0..=18.0).contains(&falling.interval));
    }

    #[test]
    fn strip_tilt_feeds_rotation() {
        let mut pool = SceneObjectPool::new();
        let mut rng = StdRng::seed_from_u64(0);
        crate::engine::builders::strip::build(&THEMES[0], &mut pool, &mut rng).unwrap();
        step(
            &mut pool,
            1.0,
            Vec2::new(0.1, -0.2),
            &mut rng,
            &mut StampRasterizer,
        );

        let rotation = pool.strip().unwrap().rotation;
        assert!((rotation.x - (0.2 - 0.6)).abs() < 1e-5);
        assert!((rotation.y - (0.3 + 0.3)).abs() < 1e-5);
        assert!((rotation.z - 0.1).abs() < 1e-5);
    }
}
