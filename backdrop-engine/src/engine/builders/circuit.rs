use bevy::log::debug;
use bevy::math::Vec3;
use constants::hex_color;
use constants::scene::{
    CIRCUIT_CONNECT_PROBABILITY, CIRCUIT_DECOR_HALF_EXTENTS, CIRCUIT_DEPTH,
    CIRCUIT_DROP_PROBABILITY, CIRCUIT_GEAR_COUNT, CIRCUIT_GEAR_INNER_RADIUS,
    CIRCUIT_GEAR_OPACITY, CIRCUIT_GEAR_OUTER_RADIUS, CIRCUIT_GEAR_TEETH, CIRCUIT_GRID_SIZE,
    CIRCUIT_HUB_COUNT, CIRCUIT_HUB_OPACITY, CIRCUIT_HUB_RADIUS, CIRCUIT_JITTER,
    CIRCUIT_NODE_OPACITY, CIRCUIT_NODE_SEGMENTS, CIRCUIT_PACKET_COLOR, CIRCUIT_PACKET_COUNT,
    CIRCUIT_PACKET_RADIUS, CIRCUIT_RING_OPACITY, CIRCUIT_RING_SEGMENTS, CIRCUIT_SPACING,
};
use constants::theme::ThemeInfo;
use rand::Rng;

use super::{between, phase, spread};
use crate::engine::geometry::build_gear_outline;
use crate::engine::scene::object::{
    CircuitConnection, CircuitNode, DataPacket, FaceSide, FloatMotion, GearSpin, GeometryDesc,
    HubNode, MaterialDesc, SolidKind,
};
use crate::engine::scene::{Behavior, SceneObject, SceneObjectPool};
use crate::error::BackdropResult;

pub fn build<R: Rng + ?Sized>(
    theme: &ThemeInfo,
    pool: &mut SceneObjectPool,
    rng: &mut R,
) -> BackdropResult<()> {
    let primary = hex_color(theme.primary);
    let secondary = hex_color(theme.secondary);
    let accent = hex_color(theme.accent);

    // Nodes on a jittered grid, each followed by its glow ring.
    let offset = CIRCUIT_GRID_SIZE as f32 * CIRCUIT_SPACING / 2.0;
    let mut positions = Vec::new();
    for i in 0..CIRCUIT_GRID_SIZE {
        for j in 0..CIRCUIT_GRID_SIZE {
            if rng.gen_bool(CIRCUIT_DROP_PROBABILITY) {
                continue;
            }
            let position = Vec3::new(
                i as f32 * CIRCUIT_SPACING - offset + spread(rng, CIRCUIT_JITTER),
                j as f32 * CIRCUIT_SPACING - offset + spread(rng, CIRCUIT_JITTER),
                spread(rng, CIRCUIT_DEPTH),
            );
            let radius = between(rng, 0.8, 1.6);
            let node = CircuitNode {
                original_pos: position,
                float: FloatMotion {
                    speed: between(rng, 0.1, 0.4),
                    phase: phase(rng),
                    amount: between(rng, 1.0, 3.0),
                },
                pulse: phase(rng),
                base_scale: 1.0,
                base_color: primary,
                index: positions.len(),
                connections: Vec::new(),
                hovered: false,
            };
            let parent = positions.len();
            positions.push(position);

            pool.add(
                SceneObject::new(
                    GeometryDesc::Solid(SolidKind::Sphere {
                        radius,
                        segments: CIRCUIT_NODE_SEGMENTS,
                    }),
                    MaterialDesc::basic(primary, CIRCUIT_NODE_OPACITY),
                    Behavior::CircuitNode(node),
                )
                .at(position),
            );
            pool.add(
                SceneObject::new(
                    GeometryDesc::Ring {
                        inner: radius * 1.5,
                        outer: radius * 2.0,
                        segments: CIRCUIT_RING_SEGMENTS,
                    },
                    MaterialDesc::basic(secondary, CIRCUIT_RING_OPACITY).side(FaceSide::Double),
                    Behavior::CircuitRing { parent },
                )
                .at(position),
            );
        }
    }

    // Web of nearby pairs.
    let max_dist = CIRCUIT_SPACING * 2.0;
    let mut links = Vec::new();
    for a in 0..positions.len() {
        for b in (a + 1)..positions.len() {
            if positions[a].distance(positions[b]) < max_dist
                && rng.gen_bool(CIRCUIT_CONNECT_PROBABILITY)
            {
                links.push((a, b));
            }
        }
    }
    for &(start, end) in &links {
        let connection = pool.connection_count();
        let opacity = between(rng, 0.4, 0.7);
        pool.add(SceneObject::new(
            GeometryDesc::Line,
            MaterialDesc::basic(primary, opacity),
            Behavior::CircuitConnection(CircuitConnection {
                start,
                end,
                points: [positions[start], positions[end]],
                base_opacity: opacity,
            }),
        ));
        for node in [start, end] {
            if let Some(node) = pool.node_mut(node) {
                node.connections.push(connection);
            }
        }
    }
    debug!(
        "Circuit graph: {} nodes, {} connections",
        positions.len(),
        links.len()
    );

    add_packets(pool, rng);

    let [hx, hy, hz] = CIRCUIT_DECOR_HALF_EXTENTS;
    for _ in 0..CIRCUIT_HUB_COUNT {
        let position = Vec3::new(spread(rng, hx), spread(rng, hy), spread(rng, hz));
        pool.add(
            SceneObject::new(
                GeometryDesc::Solid(SolidKind::Icosahedron {
                    radius: CIRCUIT_HUB_RADIUS,
                    subdivisions: 1,
                }),
                MaterialDesc::basic(accent, CIRCUIT_HUB_OPACITY).wireframe(true),
                Behavior::HubNode(HubNode {
                    original_pos: position,
                    spin: Vec3::new(spread(rng, 0.01), spread(rng, 0.01), spread(rng, 0.01)),
                    float: FloatMotion {
                        speed: between(rng, 0.1, 0.3),
                        phase: phase(rng),
                        amount: between(rng, 2.0, 5.0),
                    },
                }),
            )
            .at(position),
        );
    }

    let outline = build_gear_outline(
        CIRCUIT_GEAR_TEETH,
        CIRCUIT_GEAR_INNER_RADIUS,
        CIRCUIT_GEAR_OUTER_RADIUS,
    )?;
    for _ in 0..CIRCUIT_GEAR_COUNT {
        let position = Vec3::new(spread(rng, hx), spread(rng, hy), spread(rng, hz));
        let scale = between(rng, 1.0, 3.0);
        pool.add(
            SceneObject::new(
                GeometryDesc::Gear(outline.clone()),
                MaterialDesc::basic(accent, CIRCUIT_GEAR_OPACITY).side(FaceSide::Double),
                Behavior::Gear(GearSpin {
                    original_pos: position,
                    spin: spread(rng, 0.01),
                    float: FloatMotion {
                        speed: between(rng, 0.08, 0.23),
                        phase: phase(rng),
                        amount: between(rng, 1.5, 3.5),
                    },
                }),
            )
            .at(position)
            .scaled(Vec3::splat(scale)),
        );
    }

    Ok(())
}

/// Scatter data packets over the existing connections. Returns how many were
/// added; a graph without connections gets none.
fn add_packets<R: Rng + ?Sized>(pool: &mut SceneObjectPool, rng: &mut R) -> usize {
    let connections = pool.connection_count();
    if connections == 0 {
        debug!("Circuit graph has no connections; skipping data packets");
        return 0;
    }

    let color = hex_color(CIRCUIT_PACKET_COLOR);
    for _ in 0..CIRCUIT_PACKET_COUNT {
        let connection = rng.gen_range(0..connections);
        let Some([from, to]) = pool.connection(connection).map(|c| c.points) else {
            continue;
        };
        let progress = rng.r#gen::<f32>();
        pool.add(
            SceneObject::new(
                GeometryDesc::Solid(SolidKind::Sphere {
                    radius: CIRCUIT_PACKET_RADIUS,
                    segments: 8,
                }),
                MaterialDesc::basic(color, 1.0),
                Behavior::DataPacket(DataPacket {
                    connection,
                    progress,
                    reverse: rng.gen_bool(0.5),
                    speed: between(rng, 0.02, 0.06),
                }),
            )
            .at(from.lerp(to, progress)),
        );
    }
    CIRCUIT_PACKET_COUNT
}
