//! Core application setup and state management.
//!
//! Handles application lifecycle, window configuration, settings loading and
//! state transitions for both native and WASM targets.

/// Application setup and plugin configuration for the Bevy engine.
///
/// Creates the main app with camera, lights, the backdrop plugins and the
/// ordered per-frame system chain.
pub mod app_setup;

/// Application state machine from settings loading to runtime.
pub mod app_state;

/// Runtime settings asset and its loader.
pub mod settings;

/// Platform-specific window configuration for native and WASM builds.
///
/// Configures canvas integration for web targets and vsync settings.
pub mod window_config;
