//! Deterministic geometry generators for the procedural backgrounds.
//!
//! Pure functions with no randomness and no ECS access; failures on bad
//! parameters are reported as [`BackdropError::InvalidGeometry`](crate::error::BackdropError).

/// Toothed gear outline and its flat fan triangulation.
pub mod gear;

/// Twisted band surface and smooth vertex normals.
pub mod strip;

pub use gear::{GearOutline, build_gear_outline};
pub use strip::{StripMesh, build_strip_surface, compute_vertex_normals};
