use bevy::math::Vec2;
use bevy::prelude::Resource;
use constants::render_settings::{POINTER_TILT_DECAY, POINTER_TILT_PER_PIXEL};

/// Last pointer position in normalised device coordinates plus the strip
/// tilt offset derived from it.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq)]
pub struct PointerState {
    pub ndc: Vec2,
    pub tilt: Vec2,
}

impl PointerState {
    /// `cursor` is in window pixels with the origin at the top-left.
    pub fn on_move(&mut self, cursor: Vec2, viewport: Vec2) {
        if viewport.x <= 0.0 || viewport.y <= 0.0 {
            return;
        }
        self.ndc = Vec2::new(
            cursor.x / viewport.x * 2.0 - 1.0,
            -(cursor.y / viewport.y) * 2.0 + 1.0,
        );
        self.tilt = (cursor - viewport / 2.0) * POINTER_TILT_PER_PIXEL;
    }

    /// Once per frame. Only the tilt relaxes; the NDC keeps the last position.
    pub fn decay(&mut self) {
        self.tilt *= POINTER_TILT_DECAY;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_map_to_ndc_extremes() {
        let mut pointer = PointerState::default();
        let viewport = Vec2::new(1000.0, 500.0);

        pointer.on_move(Vec2::ZERO, viewport);
        assert_eq!(pointer.ndc, Vec2::new(-1.0, 1.0));
        pointer.on_move(viewport, viewport);
        assert_eq!(pointer.ndc, Vec2::new(1.0, -1.0));
        pointer.on_move(viewport / 2.0, viewport);
        assert_eq!(pointer.ndc, Vec2::ZERO);
        assert_eq!(pointer.tilt, Vec2::ZERO);
    }

    #[test]
    fn tilt_scales_with_offset_and_decays() {
        let mut pointer = PointerState::default();
        pointer.on_move(Vec2::new(600.0, 200.0), Vec2::new(1000.0, 500.0));
        assert!((pointer.tilt.x - 0.03).abs() < 1e-6);
        assert!((pointer.tilt.y - -0.015).abs() < 1e-6);

        let ndc = pointer.ndc;
        pointer.decay();
        assert!((pointer.tilt.x - 0.0285).abs() < 1e-6);
        assert_eq!(pointer.ndc, ndc);
    }
}
