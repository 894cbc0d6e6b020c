//! JSON-RPC 2.0 communication layer for the host page.
//!
//! Implements bidirectional messaging between the Bevy engine and the
//! portfolio page via `postMessage`, supporting both request-response and
//! notification patterns.
//!
//! ## Message Flow
//!
//! ```text
//! Page (window / parent)  <──postMessage──>  Bevy canvas
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │                                        ├─ Queue theme request
//!        │ <───────────────── Response (with ID) ─┤
//!        │                                        │
//!        │ <──── theme_changed (no ID) ───────────┤
//! ```
//!
//! ## Methods
//!
//! - `set_theme { theme }`: switch to a theme by id
//! - `next_theme`: advance one theme
//! - `theme_click`: one click of the theme toggle; rapid clicks coalesce into
//!   a burst jump
//! - `set_auto_change { enabled }`: toggle the 20 s auto-advance
//! - `get_theme`: current theme id, copy and palette
//!
//! ## Notifications
//!
//! `theme_changed` carries the same payload as `get_theme` plus `burst`, the
//! slash count the page should play for a multi-click jump (0 otherwise).
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes:
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//! - `-32603`: Internal error (backdrop not ready)

/// JSON-RPC 2.0 bidirectional communication system for the page host.
///
/// Handles request-response patterns, notifications, and WASM message listeners.
pub mod web_rpc;
