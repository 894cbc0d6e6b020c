use std::collections::HashSet;

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology, VertexAttributeValues};

use crate::engine::scene::object::{GeometryDesc, SolidKind};

/// Convert a scene geometry into a Bevy mesh in object space.
///
/// Lines start collapsed at the origin; their endpoints are written every
/// frame by the sync pass.
pub fn mesh_for(geometry: &GeometryDesc) -> Mesh {
    match geometry {
        GeometryDesc::Strip { mesh, normals } => {
            let mut out = Mesh::new(PrimitiveTopology::TriangleList, usage());
            out.insert_attribute(Mesh::ATTRIBUTE_POSITION, to_arrays(&mesh.positions));
            out.insert_attribute(Mesh::ATTRIBUTE_NORMAL, to_arrays(normals));
            out.insert_indices(Indices::U32(mesh.indices.clone()));
            out
        }
        GeometryDesc::PointCloud { positions, colors } => {
            let colors: Vec<[f32; 4]> = colors
                .iter()
                .map(|c| c.to_linear().to_f32_array())
                .collect();
            let mut out = Mesh::new(PrimitiveTopology::PointList, usage());
            out.insert_attribute(Mesh::ATTRIBUTE_POSITION, to_arrays(positions));
            out.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
            out
        }
        GeometryDesc::Solid(kind) => solid_mesh(*kind),
        GeometryDesc::Ring {
            inner,
            outer,
            segments,
        } => Annulus::new(*inner, *outer)
            .mesh()
            .resolution(*segments as _)
            .build(),
        GeometryDesc::Gear(outline) => {
            let (positions, indices) = outline.triangulate();
            let normals = vec![[0.0, 0.0, 1.0]; positions.len()];
            let mut out = Mesh::new(PrimitiveTopology::TriangleList, usage());
            out.insert_attribute(Mesh::ATTRIBUTE_POSITION, to_arrays(&positions));
            out.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
            out.insert_indices(Indices::U32(indices));
            out
        }
        GeometryDesc::Line => line_mesh(Vec3::ZERO, Vec3::ZERO),
        GeometryDesc::GlyphQuad => Rectangle::new(1.0, 1.0).mesh().build(),
    }
}

fn solid_mesh(kind: SolidKind) -> Mesh {
    match kind {
        SolidKind::Icosahedron {
            radius,
            subdivisions,
        } => Sphere::new(radius)
            .mesh()
            .ico(subdivisions)
            // Subdivision counts past the icosphere limit fall back to UV.
            .unwrap_or_else(|_| Sphere::new(radius).mesh().uv(16, 12)),
        SolidKind::Octahedron { radius } => {
            let v = [
                Vec3::X,
                Vec3::NEG_X,
                Vec3::Y,
                Vec3::NEG_Y,
                Vec3::Z,
                Vec3::NEG_Z,
            ]
            .map(|d| d * radius);
            let faces = [
                [0, 2, 4],
                [2, 1, 4],
                [1, 3, 4],
                [3, 0, 4],
                [2, 0, 5],
                [1, 2, 5],
                [3, 1, 5],
                [0, 3, 5],
            ];
            flat_mesh(&v, &faces)
        }
        SolidKind::Tetrahedron { radius } => {
            let v = [
                Vec3::new(1.0, 1.0, 1.0),
                Vec3::new(-1.0, -1.0, 1.0),
                Vec3::new(-1.0, 1.0, -1.0),
                Vec3::new(1.0, -1.0, -1.0),
            ]
            .map(|d| d.normalize() * radius);
            let faces = [[2, 1, 0], [0, 3, 2], [1, 3, 0], [2, 3, 1]];
            flat_mesh(&v, &faces)
        }
        SolidKind::Cube { size } => Cuboid::from_length(size).mesh().build(),
        SolidKind::Sphere { radius, segments } => {
            Sphere::new(radius).mesh().uv(segments as _, segments as _)
        }
    }
}

/// Unshared vertices per face so each face gets its own normal.
fn flat_mesh(vertices: &[Vec3], faces: &[[usize; 3]]) -> Mesh {
    let mut positions = Vec::with_capacity(faces.len() * 3);
    let mut normals = Vec::with_capacity(faces.len() * 3);
    for face in faces {
        let [a, b, c] = face.map(|i| vertices[i]);
        let normal = (b - a).cross(c - a).normalize_or_zero();
        positions.extend([a, b, c]);
        normals.extend([normal; 3]);
    }
    let indices = (0..positions.len() as u32).collect();

    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, usage());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, to_arrays(&positions));
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, to_arrays(&normals));
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

pub fn line_mesh(start: Vec3, end: Vec3) -> Mesh {
    let mut mesh = Mesh::new(PrimitiveTopology::LineList, usage());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, vec![start.to_array(), end.to_array()]);
    mesh
}

/// Unique triangle edges of `mesh` as a line list. Point and line meshes are
/// returned unchanged.
pub fn wireframe_edges(mesh: &Mesh) -> Mesh {
    if mesh.primitive_topology() != PrimitiveTopology::TriangleList {
        return mesh.clone();
    }
    let Some(VertexAttributeValues::Float32x3(positions)) =
        mesh.attribute(Mesh::ATTRIBUTE_POSITION)
    else {
        return mesh.clone();
    };

    let triangles: Vec<usize> = match mesh.indices() {
        Some(indices) => indices.iter().collect(),
        None => (0..positions.len()).collect(),
    };

    // Dedup by position so flat-shaded faces don't double their shared edges.
    let key = |i: usize| positions[i].map(f32::to_bits);
    let mut seen = HashSet::new();
    let mut lines: Vec<[f32; 3]> = Vec::new();
    for tri in triangles.chunks_exact(3) {
        for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
            let (ka, kb) = (key(a), key(b));
            let edge = if ka <= kb { (ka, kb) } else { (kb, ka) };
            if ka != kb && seen.insert(edge) {
                lines.push(positions[a]);
                lines.push(positions[b]);
            }
        }
    }

    let mut out = Mesh::new(PrimitiveTopology::LineList, usage());
    out.insert_attribute(Mesh::ATTRIBUTE_POSITION, lines);
    out
}

fn usage() -> RenderAssetUsages {
    RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD
}

fn to_arrays(values: &[Vec3]) -> Vec<[f32; 3]> {
    values.iter().map(|v| v.to_array()).collect()
}
