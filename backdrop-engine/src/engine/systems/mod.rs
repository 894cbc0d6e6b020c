//! Runtime systems driving the backdrop each frame.
//!
//! Pointer and window input feed the controller, theme requests go through
//! the cycler, and the frame tick advances the scene before the render sync.

/// Pointer capture and window resize handling.
pub mod input;

/// Theme request events, keyboard shortcuts (native) and cycler polling.
pub mod theme;

/// Per-frame controller tick.
pub mod frame;
