use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};

use crate::engine::camera::PointerState;
use crate::engine::controller::BackgroundController;

/// Only the latest cursor position of the frame matters.
pub fn track_pointer(
    mut cursor_events: EventReader<CursorMoved>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut pointer: ResMut<PointerState>,
) {
    let Some(cursor) = cursor_events.read().last() else {
        return;
    };
    let Ok(window) = windows.single() else {
        return;
    };
    pointer.on_move(cursor.position, window.size());
}

pub fn handle_resize(
    mut resize_events: EventReader<WindowResized>,
    mut controller: ResMut<BackgroundController>,
) {
    for event in resize_events.read() {
        controller.resize(event.width, event.height);
    }
}
