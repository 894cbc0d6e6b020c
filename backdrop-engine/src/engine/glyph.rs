use bevy::color::{Color, ColorToPacked, Srgba};

/// Square RGBA8 (sRGB) image of a single character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphBitmap {
    pub size: u32,
    pub pixels: Vec<u8>,
}

impl GlyphBitmap {
    pub fn blank(size: u32) -> Self {
        Self {
            size,
            pixels: vec![0; (size * size * 4) as usize],
        }
    }

    pub fn coverage(&self) -> usize {
        self.pixels.chunks_exact(4).filter(|px| px[3] > 0).count()
    }
}

/// Host-provided glyph-to-texture rasterisation.
///
/// Called once per sprite at build time and again whenever a falling glyph
/// changes character; the returned bitmap replaces the sprite's texture.
pub trait GlyphRasterizer: Send + Sync {
    fn rasterize(&mut self, glyph: char, color: Color, size: u32) -> GlyphBitmap;
}

/// Stamp grid resolution in cells.
const STAMP_COLS: u32 = 5;
const STAMP_ROWS: u32 = 7;

/// Font-free rasteriser: each character maps to a fixed 5x7 cell pattern
/// derived from its code point, mirrored left/right so it reads as a glyph.
#[derive(Debug, Default, Clone, Copy)]
pub struct StampRasterizer;

impl StampRasterizer {
    fn pattern(glyph: char) -> u64 {
        // FNV-1a over the code point.
        let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
        for byte in (glyph as u32).to_le_bytes() {
            hash ^= byte as u64;
            hash = hash.wrapping_mul(0x0100_0000_01b3);
        }
        hash
    }

    fn cell_lit(pattern: u64, col: u32, row: u32) -> bool {
        // Only the left three columns are sampled; the right two mirror them.
        let col = col.min(STAMP_COLS - 1 - col);
        let bit = row * 3 + col;
        // Keep the middle spine lit on the first and last rows for a solid glyph.
        (pattern >> bit) & 1 == 1 || (col == 2 && (row == 0 || row == STAMP_ROWS - 1))
    }
}

impl GlyphRasterizer for StampRasterizer {
    fn rasterize(&mut self, glyph: char, color: Color, size: u32) -> GlyphBitmap {
        let mut bitmap = GlyphBitmap::blank(size);
        if size == 0 || glyph.is_whitespace() {
            return bitmap;
        }

        let rgba = Srgba::from(color).to_u8_array();
        let pattern = Self::pattern(glyph);

        // 1/8 margin on every side, as a centred bold glyph would have.
        let margin = size / 8;
        let inner = size.saturating_sub(margin * 2).max(1);

        for y in 0..size {
            for x in 0..size {
                if x < margin || y < margin || x >= margin + inner || y >= margin + inner {
                    continue;
                }
                let col = (x - margin) * STAMP_COLS / inner;
                let row = (y - margin) * STAMP_ROWS / inner;
                if Self::cell_lit(pattern, col, row) {
                    let i = ((y * size + x) * 4) as usize;
                    bitmap.pixels[i..i + 4].copy_from_slice(&rgba);
                }
            }
        }
        bitmap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stamp_output_is_square_rgba() {
        let bitmap = StampRasterizer.rasterize('ア', Color::WHITE, 32);
        assert_eq!(bitmap.size, 32);
        assert_eq!(bitmap.pixels.len(), 32 * 32 * 4);
        assert!(bitmap.coverage() > 0);
    }

    #[test]
    fn stamp_is_deterministic_per_character() {
        let mut raster = StampRasterizer;
        let a = raster.rasterize('{', Color::WHITE, 64);
        let b = raster.rasterize('{', Color::WHITE, 64);
        assert_eq!(a, b);
    }

    #[test]
    fn stamp_uses_requested_colour() {
        let bitmap = StampRasterizer.rasterize('Z', Color::srgb_u8(245, 158, 11), 32);
        let lit = bitmap
            .pixels
            .chunks_exact(4)
            .find(|px| px[3] > 0)
            .expect("glyph should cover some pixels");
        assert_eq!(lit, &[245, 158, 11, 255]);
    }

    #[test]
    fn whitespace_rasterises_blank() {
        let bitmap = StampRasterizer.rasterize(' ', Color::WHITE, 16);
        assert_eq!(bitmap.coverage(), 0);
    }
}
