//! Pointer hover: ray picking, scale easing and circuit rewiring.
//!
//! Runs after the animation step each frame. Picking works on the pool's
//! analytic hit volumes rather than render meshes.

/// Ray intersection against oriented boxes and spheres.
pub mod ray;

/// Nearest-hit picking and per-frame hover response.
pub mod resolver;

pub use resolver::{HoverReport, pick, resolve};
