//! Render bridge between the scene pool and Bevy entities.
//!
//! Each controller revision is spawned as a fresh set of mesh entities; the
//! per-frame sync then copies transforms, tints, connection endpoints and
//! redrawn glyph textures from the pool.

/// Standard materials built from scene material descriptions.
pub mod materials;

/// Bevy meshes for every scene geometry, plus wireframe edge extraction.
pub mod meshes;

/// Generation spawning and per-frame entity sync.
pub mod sync;
