use bevy::math::{Vec2, Vec3};
use std::f32::consts::TAU;

use crate::error::{BackdropError, BackdropResult};

/// Angular fractions of one tooth period: rise, outer end, fall.
const TOOTH_RISE: f32 = 0.3;
const TOOTH_TOP_END: f32 = 0.5;
const TOOTH_FALL: f32 = 0.8;

/// Closed planar outline of a toothed gear, wound counter-clockwise.
#[derive(Debug, Clone, PartialEq)]
pub struct GearOutline {
    pub points: Vec<Vec2>,
    pub inner_radius: f32,
    pub outer_radius: f32,
}

impl GearOutline {
    /// Fan-triangulate around the origin. Every outline point is at least
    /// `inner_radius` away and angles increase monotonically, so the fan
    /// never folds over itself.
    pub fn triangulate(&self) -> (Vec<Vec3>, Vec<u32>) {
        let mut positions = Vec::with_capacity(self.points.len() + 1);
        positions.push(Vec3::ZERO);
        positions.extend(self.points.iter().map(|p| p.extend(0.0)));

        let n = self.points.len() as u32;
        let mut indices = Vec::with_capacity(self.points.len() * 3);
        for i in 0..n {
            let next = (i + 1) % n;
            indices.extend_from_slice(&[0, i + 1, next + 1]);
        }
        (positions, indices)
    }
}

pub fn build_gear_outline(
    teeth: u32,
    inner_radius: f32,
    outer_radius: f32,
) -> BackdropResult<GearOutline> {
    if teeth == 0 {
        return Err(BackdropError::geometry("gear", "tooth count must be non-zero"));
    }
    if !(inner_radius > 0.0 && inner_radius < outer_radius && outer_radius.is_finite()) {
        return Err(BackdropError::geometry(
            "gear",
            format!("radii must satisfy 0 < inner < outer (got {inner_radius}, {outer_radius})"),
        ));
    }

    let at = |fraction: f32, radius: f32| {
        let angle = fraction / teeth as f32 * TAU;
        Vec2::new(angle.cos(), angle.sin()) * radius
    };

    let mut points = Vec::with_capacity(teeth as usize * 4 + 1);
    points.push(at(0.0, inner_radius));
    for i in 0..teeth {
        let i = i as f32;
        points.push(at(i + TOOTH_RISE, inner_radius));
        points.push(at(i + TOOTH_RISE, outer_radius));
        points.push(at(i + TOOTH_TOP_END, outer_radius));
        points.push(at(i + TOOTH_FALL, inner_radius));
    }

    Ok(GearOutline {
        points,
        inner_radius,
        outer_radius,
    })
}
