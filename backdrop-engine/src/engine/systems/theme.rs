use bevy::prelude::*;

use crate::engine::controller::BackgroundController;
use crate::engine::theme_cycle::{ThemeCycler, ThemeTransition};

/// What the page or keyboard asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeRequest {
    Set(usize),
    Next,
    /// One click of the theme toggle; rapid clicks coalesce.
    Click,
    SetAuto(bool),
}

/// Source of theme request for debugging and conditional logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeRequestSource {
    Rpc,
    Keyboard,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct ThemeRequestEvent {
    pub request: ThemeRequest,
    pub source: ThemeRequestSource,
}

/// Fired after the controller has rebuilt for a new theme.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeChangedEvent {
    pub index: usize,
    pub burst: u32,
}

/// System handling keyboard shortcuts for theme control (native builds only).
#[cfg(not(target_arch = "wasm32"))]
pub fn handle_theme_keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    cycler: Res<ThemeCycler>,
    mut requests: EventWriter<ThemeRequestEvent>,
) {
    const THEME_KEYS: [KeyCode; 4] = [
        KeyCode::Digit1,
        KeyCode::Digit2,
        KeyCode::Digit3,
        KeyCode::Digit4,
    ];

    let mut send = |request| {
        requests.write(ThemeRequestEvent {
            request,
            source: ThemeRequestSource::Keyboard,
        });
    };

    if keyboard.just_pressed(KeyCode::Space) {
        send(ThemeRequest::Click);
    }
    if keyboard.just_pressed(KeyCode::KeyA) {
        send(ThemeRequest::SetAuto(!cycler.auto_enabled()));
    }
    for (index, key) in THEME_KEYS.iter().enumerate() {
        if keyboard.just_pressed(*key) {
            send(ThemeRequest::Set(index));
        }
    }
}

/// Placeholder system for WASM builds where keyboard shortcuts are disabled.
#[cfg(target_arch = "wasm32")]
pub fn handle_theme_keyboard_shortcuts() {
    // Theme control comes from the page via RPC.
}

pub fn handle_theme_requests(
    mut requests: EventReader<ThemeRequestEvent>,
    time: Res<Time>,
    mut cycler: ResMut<ThemeCycler>,
    mut controller: ResMut<BackgroundController>,
    mut changed: EventWriter<ThemeChangedEvent>,
) {
    let now = time.elapsed_secs_f64();
    for event in requests.read() {
        debug!("Theme request {:?} from {:?}", event.request, event.source);
        let transition = match event.request {
            ThemeRequest::Set(index) => cycler.request(index),
            ThemeRequest::Next => Some(cycler.advance()),
            ThemeRequest::Click => {
                let target = cycler.register_click(now);
                debug!("Click queued, pending theme {}", target);
                None
            }
            ThemeRequest::SetAuto(enabled) => {
                cycler.set_auto(enabled, now);
                info!("Auto theme change {}", if enabled { "on" } else { "off" });
                None
            }
        };
        if let Some(transition) = transition {
            apply_transition(transition, &mut controller, &mut changed);
        }
    }
}

/// Fires due click bursts and auto-advance.
pub fn poll_theme_cycler(
    time: Res<Time>,
    mut cycler: ResMut<ThemeCycler>,
    mut controller: ResMut<BackgroundController>,
    mut changed: EventWriter<ThemeChangedEvent>,
) {
    if let Some(transition) = cycler.poll(time.elapsed_secs_f64()) {
        apply_transition(transition, &mut controller, &mut changed);
    }
}

fn apply_transition(
    transition: ThemeTransition,
    controller: &mut BackgroundController,
    changed: &mut EventWriter<ThemeChangedEvent>,
) {
    match controller.set_theme(transition.index) {
        Ok(()) => {
            changed.write(ThemeChangedEvent {
                index: transition.index,
                burst: transition.burst,
            });
        }
        Err(err) => warn!("Theme transition rejected: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::glyph::StampRasterizer;
    use constants::theme::THEMES;

    fn app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<ThemeRequestEvent>()
            .add_event::<ThemeChangedEvent>()
            .insert_resource(ThemeCycler::new(THEMES.len(), 0, 20.0, 0.3))
            .insert_resource(
                BackgroundController::new(0, Some(3), Box::new(StampRasterizer)).unwrap(),
            )
            .add_systems(Update, handle_theme_requests);
        app
    }

    fn changes(app: &mut App) -> Vec<ThemeChangedEvent> {
        app.world_mut()
            .resource_mut::<Events<ThemeChangedEvent>>()
            .drain()
            .collect()
    }

    #[test]
    fn set_request_rebuilds_and_reports() {
        let mut app = app();
        app.world_mut().send_event(ThemeRequestEvent {
            request: ThemeRequest::Set(2),
            source: ThemeRequestSource::Rpc,
        });
        app.update();

        assert_eq!(app.world().resource::<BackgroundController>().theme_index(), 2);
        assert_eq!(app.world().resource::<ThemeCycler>().current(), 2);
        assert_eq!(
            changes(&mut app),
            vec![ThemeChangedEvent { index: 2, burst: 0 }]
        );
    }

    #[test]
    fn click_and_auto_toggle_do_not_switch_immediately() {
        let mut app = app();
        app.world_mut().send_event(ThemeRequestEvent {
            request: ThemeRequest::Click,
            source: ThemeRequestSource::Keyboard,
        });
        app.world_mut().send_event(ThemeRequestEvent {
            request: ThemeRequest::SetAuto(false),
            source: ThemeRequestSource::Keyboard,
        });
        app.update();

        assert_eq!(app.world().resource::<BackgroundController>().theme_index(), 0);
        assert!(!app.world().resource::<ThemeCycler>().auto_enabled());
        assert!(changes(&mut app).is_empty());
    }
}
