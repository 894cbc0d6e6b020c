//! Core-side camera and pointer models.
//!
//! The backdrop core picks objects without querying the ECS camera, so the
//! perspective used for hover rays is modelled here and mirrored onto the
//! Bevy camera by the render bridge.

/// Pointer NDC position and decaying strip tilt.
pub mod pointer;

/// Fixed perspective camera with resize and NDC ray construction.
pub mod view_camera;

pub use pointer::PointerState;
pub use view_camera::ViewCamera;
