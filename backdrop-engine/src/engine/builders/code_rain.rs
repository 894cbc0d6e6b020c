use bevy::color::Color;
use bevy::math::Vec3;
use constants::hex_color;
use constants::scene::{
    RAIN_CHANGE_MIN, RAIN_CHANGE_SPAN, RAIN_COLUMN_DEPTH, RAIN_COLUMNS, RAIN_GLYPH_PX,
    RAIN_GLYPH_SCALE, RAIN_GLYPHS, RAIN_HEAD_COLOR, RAIN_MAX_LENGTH, RAIN_MIN_LENGTH,
    RAIN_ROW_SPACING, RAIN_SYMBOL_COUNT, RAIN_SYMBOL_FLOAT, RAIN_SYMBOL_HALF_EXTENTS,
    RAIN_SYMBOL_OPACITY, RAIN_SYMBOL_PX, RAIN_SYMBOL_SCALE, RAIN_SYMBOLS, RAIN_TOP_Y, RAIN_WIDTH,
};
use constants::theme::ThemeInfo;
use rand::Rng;
use rand::seq::{IteratorRandom, SliceRandom};

use super::{between, phase, spread};
use crate::engine::glyph::GlyphRasterizer;
use crate::engine::scene::object::{
    FallingChar, FloatMotion, FloatingSymbol, GeometryDesc, MaterialDesc,
};
use crate::engine::scene::{Behavior, SceneObject, SceneObjectPool};

pub(crate) fn random_glyph<R: Rng + ?Sized>(rng: &mut R) -> char {
    RAIN_GLYPHS.chars().choose(rng).unwrap_or('0')
}

/// Frames until a falling glyph changes character. The random part shrinks
/// toward the head of the column (`depth` 0) so the head flickers fastest.
pub(crate) fn change_interval<R: Rng + ?Sized>(rng: &mut R, depth: f32) -> f32 {
    RAIN_CHANGE_MIN + rng.r#gen::<f32>() * RAIN_CHANGE_SPAN * (0.5 + 0.5 * depth)
}

pub fn build<R: Rng + ?Sized>(
    theme: &ThemeInfo,
    pool: &mut SceneObjectPool,
    rng: &mut R,
    glyphs: &mut dyn GlyphRasterizer,
) {
    let head_color = hex_color(RAIN_HEAD_COLOR);
    let trail_color = hex_color(theme.primary);

    for col in 0..RAIN_COLUMNS {
        let x = col as f32 / RAIN_COLUMNS as f32 * RAIN_WIDTH - RAIN_WIDTH / 2.0;
        let length = rng.gen_range(RAIN_MIN_LENGTH..=RAIN_MAX_LENGTH);
        let fall_speed = between(rng, 0.1, 0.25);
        let z = spread(rng, RAIN_COLUMN_DEPTH);

        for row in 0..length {
            let head = row == 0;
            let depth = row as f32 / length as f32;
            let (color, opacity) = if head {
                (head_color, 1.0)
            } else {
                (trail_color, 0.4 + 0.3 * depth)
            };

            let glyph = random_glyph(rng);
            let bitmap = glyphs.rasterize(glyph, color, RAIN_GLYPH_PX);
            let position = Vec3::new(
                x + spread(rng, 1.0),
                RAIN_TOP_Y - row as f32 * RAIN_ROW_SPACING,
                z,
            );

            pool.add(
                SceneObject::new(
                    GeometryDesc::GlyphQuad,
                    MaterialDesc::basic(Color::WHITE, opacity),
                    Behavior::FallingChar(FallingChar {
                        fall_speed,
                        timer: rng.r#gen::<f32>() * 15.0,
                        interval: change_interval(rng, depth),
                        head,
                        depth,
                        trail_color,
                    }),
                )
                .at(position)
                .scaled(Vec3::new(RAIN_GLYPH_SCALE, RAIN_GLYPH_SCALE, 1.0))
                .with_glyph(glyph, bitmap),
            );
        }
    }

    let symbol_color = hex_color(theme.secondary);
    let [hx, hy, hz] = RAIN_SYMBOL_HALF_EXTENTS;
    for _ in 0..RAIN_SYMBOL_COUNT {
        let glyph = RAIN_SYMBOLS.choose(rng).copied().unwrap_or('{');
        let bitmap = glyphs.rasterize(glyph, symbol_color, RAIN_SYMBOL_PX);
        let position = Vec3::new(spread(rng, hx), spread(rng, hy), spread(rng, hz));

        pool.add(
            SceneObject::new(
                GeometryDesc::GlyphQuad,
                MaterialDesc::basic(Color::WHITE, RAIN_SYMBOL_OPACITY),
                Behavior::FloatingSymbol(FloatingSymbol {
                    anchor: position,
                    velocity: Vec3::new(spread(rng, 0.015), spread(rng, 0.015), 0.0),
                    float: FloatMotion {
                        speed: between(rng, 0.5, 2.0),
                        phase: phase(rng),
                        amount: RAIN_SYMBOL_FLOAT,
                    },
                }),
            )
            .at(position)
            .scaled(Vec3::new(RAIN_SYMBOL_SCALE, RAIN_SYMBOL_SCALE, 1.0))
            .with_glyph(glyph, bitmap),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::glyph::StampRasterizer;
    use crate::engine::scene::BehaviorTag;
    use constants::theme::THEMES;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn columns_have_one_head_each() {
        let mut pool = SceneObjectPool::new();
        let mut rng = StdRng::seed_from_u64(9);
        build(&THEMES[3], &mut pool, &mut rng, &mut StampRasterizer);

        let heads = pool
            .falling_chars()
            .iter()
            .filter_map(|&id| pool.falling_char(id))
            .filter(|c| c.head)
            .count();
        assert_eq!(heads, RAIN_COLUMNS);

        let total = pool.falling_chars().len();
        assert!((RAIN_COLUMNS * RAIN_MIN_LENGTH..=RAIN_COLUMNS * RAIN_MAX_LENGTH).contains(&total));

        let symbols = pool
            .pooled()
            .iter()
            .filter(|o| o.tag() == BehaviorTag::FloatingSymbol)
            .count();
        assert_eq!(symbols, RAIN_SYMBOL_COUNT);
    }

    #[test]
    fn glyph_sprites_carry_rasterised_bitmaps() {
        let mut pool = SceneObjectPool::new();
        let mut rng = StdRng::seed_from_u64(2);
        build(&THEMES[3], &mut pool, &mut rng, &mut StampRasterizer);

        for object in pool.pooled() {
            let sprite = object.glyph.as_ref().expect("every rain object is a glyph");
            let expected = match object.tag() {
                BehaviorTag::FallingChar => RAIN_GLYPH_PX,
                _ => RAIN_SYMBOL_PX,
            };
            assert_eq!(sprite.bitmap.size, expected);
        }
    }

    #[test]
    fn change_interval_stays_in_range_and_favours_the_head() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut head_max: f32 = 0.0;
        for _ in 0..500 {
            let head = change_interval(&mut rng, 0.0);
            let tail = change_interval(&mut rng, 0.99);
            head_max = head_max.max(head);
            assert!((8.0..=28.0).contains(&head));
            assert!((8.0..=28.0).contains(&tail));
        }
        assert!(head_max <= RAIN_CHANGE_MIN + RAIN_CHANGE_SPAN * 0.5);
    }
}
