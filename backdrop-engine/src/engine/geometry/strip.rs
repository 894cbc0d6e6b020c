use bevy::math::Vec3;
use std::f32::consts::TAU;

use crate::error::{BackdropError, BackdropResult};

/// Indexed triangle mesh of the one-sided twisted band.
#[derive(Debug, Clone, PartialEq)]
pub struct StripMesh {
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl StripMesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn normals(&self) -> Vec<Vec3> {
        compute_vertex_normals(&self.positions, &self.indices)
    }
}

/// Sample the twisted band on a `(u_segments + 1) x (v_segments + 1)` grid.
///
/// Vertex `(i, j)` lives at index `i * (v_segments + 1) + j`. Each grid quad
/// `a b / c d` is split into triangles `(a, b, c)` and `(b, d, c)`.
pub fn build_strip_surface(
    radius_major: f32,
    half_width: f32,
    u_segments: u32,
    v_segments: u32,
) -> BackdropResult<StripMesh> {
    if u_segments == 0 || v_segments == 0 {
        return Err(BackdropError::geometry(
            "strip",
            format!("segments must be non-zero (got {u_segments}x{v_segments})"),
        ));
    }
    if !(radius_major.is_finite() && radius_major > 0.0) {
        return Err(BackdropError::geometry(
            "strip",
            format!("major radius must be positive (got {radius_major})"),
        ));
    }
    if !(half_width.is_finite() && half_width > 0.0) {
        return Err(BackdropError::geometry(
            "strip",
            format!("half width must be positive (got {half_width})"),
        ));
    }

    let columns = v_segments + 1;
    let mut positions = Vec::with_capacity(((u_segments + 1) * columns) as usize);

    for i in 0..=u_segments {
        let u = i as f32 / u_segments as f32 * TAU;
        let (sin_half, cos_half) = (u * 0.5).sin_cos();
        for j in 0..=v_segments {
            let v = (j as f32 / v_segments as f32 * 2.0 - 1.0) * half_width;
            let ring = radius_major + v * cos_half;
            positions.push(Vec3::new(ring * u.cos(), ring * u.sin(), v * sin_half));
        }
    }

    let mut indices = Vec::with_capacity((u_segments * v_segments * 6) as usize);
    for i in 0..u_segments {
        for j in 0..v_segments {
            let a = i * columns + j;
            let b = a + 1;
            let c = (i + 1) * columns + j;
            let d = c + 1;
            indices.extend_from_slice(&[a, b, c, b, d, c]);
        }
    }

    Ok(StripMesh { positions, indices })
}

/// Area-weighted smooth normals. Vertices with no usable faces get `+Z` so
/// every returned normal is unit length.
pub fn compute_vertex_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];

    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if a >= positions.len() || b >= positions.len() || c >= positions.len() {
            continue;
        }
        // Unnormalised cross product keeps the area weighting.
        let face = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
        normals[a] += face;
        normals[b] += face;
        normals[c] += face;
    }

    normals
        .into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Z))
        .collect()
}
