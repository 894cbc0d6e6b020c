use bevy::prelude::*;

use crate::engine::camera::PointerState;
use crate::engine::controller::BackgroundController;

/// Motion, picking and hover for one frame. Steps are frame-locked, not
/// scaled by `Time`.
pub fn tick_backdrop(
    mut controller: ResMut<BackgroundController>,
    mut pointer: ResMut<PointerState>,
) {
    controller.tick(&mut pointer);
}
