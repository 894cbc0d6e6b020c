use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use constants::theme::THEMES;

use crate::engine::controller::BackgroundController;
use crate::engine::core::settings::BackdropSettings;
use crate::engine::glyph::StampRasterizer;
use crate::engine::theme_cycle::ThemeCycler;
use crate::engine::systems::theme::ThemeChangedEvent;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

// Transition to Running once settings are resolved (loaded or defaulted).
pub fn transition_to_running(
    settings: Option<Res<BackdropSettings>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if settings.is_some() {
        info!("→ Settings ready, transitioning to Running state");
        next_state.set(AppState::Running);
    }
}

/// Builds the first background and the theme cycler from the resolved
/// settings.
pub fn setup_backdrop(
    settings: Res<BackdropSettings>,
    time: Res<Time>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut commands: Commands,
    mut changed: EventWriter<ThemeChangedEvent>,
) {
    let initial = settings.initial_theme_index();
    let mut controller =
        match BackgroundController::new(initial, settings.seed, Box::new(StampRasterizer)) {
            Ok(controller) => controller,
            Err(err) => {
                error!("Failed to create background controller: {}", err);
                return;
            }
        };
    if let Ok(window) = windows.single() {
        controller.resize(window.width(), window.height());
    }

    let mut cycler = ThemeCycler::new(
        THEMES.len(),
        initial,
        settings.auto_change_interval_secs,
        settings.click_coalesce_secs,
    );
    cycler.set_auto(settings.auto_change, time.elapsed_secs_f64());

    info!(
        "Backdrop ready: theme '{}', auto change {}",
        controller.theme().id,
        settings.auto_change
    );
    changed.write(ThemeChangedEvent {
        index: initial,
        burst: 0,
    });
    commands.insert_resource(controller);
    commands.insert_resource(cycler);
}
