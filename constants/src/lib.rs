//! Shared compile-time configuration for the backdrop engine.
//!
//! Theme records, per-scene counts and ranges, and camera/render settings.

pub mod render_settings;
pub mod scene;
pub mod theme;

use bevy::color::Color;

/// Convert a packed `0xRRGGBB` value into an sRGB colour.
pub fn hex_color(hex: u32) -> Color {
    Color::srgb_u8(
        ((hex >> 16) & 0xff) as u8,
        ((hex >> 8) & 0xff) as u8,
        (hex & 0xff) as u8,
    )
}

/// Format a packed colour as a CSS hex string for the host page.
pub fn hex_string(hex: u32) -> String {
    format!("#{:06x}", hex & 0x00ff_ffff)
}
