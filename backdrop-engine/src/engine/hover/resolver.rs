use bevy::log::debug;
use bevy::math::Ray3d;
use constants::hex_color;
use constants::scene::{
    CIRCUIT_HIGHLIGHT_COLOR, CIRCUIT_HIGHLIGHT_OPACITY, CIRCUIT_REWIRE_ATTEMPTS, HOVER_EASE_IN,
    HOVER_EASE_OUT, HOVER_SCALE, SHAPE_HOVER_PUSH,
};
use rand::Rng;

use super::ray::ray_hits_volume;
use crate::engine::scene::{Behavior, NodeIndex, ObjectId, SceneObjectPool};

/// What the hover pass did this frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HoverReport {
    pub hit: Option<ObjectId>,
    /// Connections moved to a new endpoint.
    pub rewired: usize,
}

/// Nearest pooled object whose hit volume the ray enters in front of the eye.
pub fn pick(pool: &SceneObjectPool, ray: &Ray3d) -> Option<(ObjectId, f32)> {
    let mut best: Option<(ObjectId, f32)> = None;
    for (index, object) in pool.pooled().iter().enumerate() {
        let Some(volume) = object.hit_volume() else {
            continue;
        };
        if let Some(t) = ray_hits_volume(ray, &volume) {
            if t > 0.0 && best.is_none_or(|(_, best_t)| t < best_t) {
                best = Some((ObjectId(index as u32), t));
            }
        }
    }
    best
}

/// Apply one frame of hover response for `hit`.
pub fn resolve<R: Rng + ?Sized>(
    pool: &mut SceneObjectPool,
    hit: Option<ObjectId>,
    rng: &mut R,
) -> HoverReport {
    let node_count = pool.node_count();
    let mut rewire_from: Option<NodeIndex> = None;

    for (index, object) in pool.pooled_mut().iter_mut().enumerate() {
        let original = *object.original_scale.get_or_insert(object.scale);
        let hovered = hit == Some(ObjectId(index as u32));

        if hovered {
            object.scale = object.scale.lerp(original * HOVER_SCALE, HOVER_EASE_IN);
        } else {
            object.scale = object.scale.lerp(original, HOVER_EASE_OUT);
        }

        match &mut object.behavior {
            Behavior::FloatingShape(shape) if hovered => {
                shape.velocity.x += push_sign(object.position.x) * SHAPE_HOVER_PUSH;
                shape.velocity.y += push_sign(object.position.y) * SHAPE_HOVER_PUSH;
            }
            Behavior::CircuitNode(node) if hovered => {
                if !node.hovered && node_count > 2 {
                    node.hovered = true;
                    rewire_from = Some(node.index);
                    object.material.color = hex_color(CIRCUIT_HIGHLIGHT_COLOR);
                }
            }
            Behavior::CircuitNode(node) if node.hovered => {
                node.hovered = false;
                object.material.color = node.base_color;
            }
            _ => {}
        }
    }

    let rewired = match rewire_from {
        Some(node) => rewire_node(pool, node, rng),
        None => 0,
    };
    HoverReport { hit, rewired }
}

fn push_sign(coordinate: f32) -> f32 {
    if coordinate > 0.0 { 1.0 } else { -1.0 }
}

/// Move the far end of each connection incident to `node` onto a random
/// other node. Returns how many connections moved.
///
/// A candidate is rejected when it equals `node` or either current endpoint;
/// after `CIRCUIT_REWIRE_ATTEMPTS` rejections the connection is left alone.
fn rewire_node<R: Rng + ?Sized>(
    pool: &mut SceneObjectPool,
    node: NodeIndex,
    rng: &mut R,
) -> usize {
    let node_count = pool.node_count();
    let Some(incident) = pool.node(node).map(|n| n.connections.clone()) else {
        return 0;
    };

    let mut rewired = 0;
    for connection in incident {
        let Some((start, end)) = pool.connection(connection).map(|c| (c.start, c.end)) else {
            continue;
        };
        let Some(candidate) = (0..CIRCUIT_REWIRE_ATTEMPTS)
            .map(|_| rng.gen_range(0..node_count))
            .find(|&c| c != node && c != start && c != end)
        else {
            continue;
        };

        let old_end = if start == node { end } else { start };
        if let Some(object) = pool.connection_object_mut(connection) {
            if let Behavior::CircuitConnection(c) = &mut object.behavior {
                if c.start == node {
                    c.end = candidate;
                } else {
                    c.start = candidate;
                }
            }
            object.material.color = hex_color(CIRCUIT_HIGHLIGHT_COLOR);
            object.material.opacity = CIRCUIT_HIGHLIGHT_OPACITY;
        }
        if let Some(old) = pool.node_mut(old_end) {
            old.connections.retain(|&c| c != connection);
        }
        if let Some(new) = pool.node_mut(candidate) {
            new.connections.push(connection);
        }
        rewired += 1;
    }

    debug!("Rewired {} connections around node {}", rewired, node);
    rewired
}
