use bevy::prelude::*;
use bevy::render::render_resource::Face;

use crate::engine::scene::object::{FaceSide, MaterialDesc};

/// Material for a scene object or decoration. Everything is unlit and
/// alpha-blended except `lit` surfaces, which take the scene lights.
pub fn standard_material(desc: &MaterialDesc, lit: bool) -> StandardMaterial {
    let (cull_mode, double_sided) = match desc.side {
        FaceSide::Front => (Some(Face::Back), false),
        FaceSide::Back => (Some(Face::Front), false),
        FaceSide::Double => (None, true),
    };

    StandardMaterial {
        base_color: desc.color.with_alpha(desc.opacity),
        alpha_mode: if desc.additive {
            AlphaMode::Add
        } else {
            AlphaMode::Blend
        },
        unlit: !lit,
        cull_mode,
        double_sided,
        ..default()
    }
}

/// Writes colour and opacity into `material`; a no-op when they already match.
pub fn apply_tint(
    materials: &mut Assets<StandardMaterial>,
    handle: &Handle<StandardMaterial>,
    color: Color,
) {
    let Some(current) = materials.get(handle) else {
        return;
    };
    if current.base_color == color {
        return;
    }
    if let Some(material) = materials.get_mut(handle) {
        material.base_color = color;
    }
}
