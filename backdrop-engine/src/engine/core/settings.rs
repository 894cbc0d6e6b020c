use bevy::asset::LoadState;
use bevy::prelude::*;
use constants::render_settings::{AUTO_CHANGE_SECS, CLICK_COALESCE_SECS, SETTINGS_PATH};
use constants::theme::{THEMES, find_theme};
use serde::{Deserialize, Serialize};

/// Runtime options read from `backdrop.settings.json`. Missing fields take
/// their defaults.
#[derive(Asset, TypePath, Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackdropSettings {
    /// Theme id shown first.
    pub initial_theme: String,
    pub auto_change: bool,
    pub auto_change_interval_secs: f64,
    pub click_coalesce_secs: f64,
    /// Fixed RNG seed; random layouts per rebuild when absent.
    pub seed: Option<u64>,
}

impl Default for BackdropSettings {
    fn default() -> Self {
        Self {
            initial_theme: THEMES[0].id.to_string(),
            auto_change: true,
            auto_change_interval_secs: AUTO_CHANGE_SECS,
            click_coalesce_secs: CLICK_COALESCE_SECS,
            seed: None,
        }
    }
}

impl BackdropSettings {
    /// Index of `initial_theme`, falling back to the first theme.
    pub fn initial_theme_index(&self) -> usize {
        find_theme(&self.initial_theme).unwrap_or_else(|| {
            warn!(
                "Unknown initial theme '{}', using '{}'",
                self.initial_theme, THEMES[0].id
            );
            0
        })
    }
}

#[derive(Resource, Default)]
pub struct SettingsLoader {
    handle: Option<Handle<BackdropSettings>>,
}

pub fn start_loading(mut loader: ResMut<SettingsLoader>, asset_server: Res<AssetServer>) {
    loader.handle = Some(asset_server.load(SETTINGS_PATH));
}

/// Inserts `BackdropSettings` as a resource once the asset resolves. A failed
/// load inserts the defaults instead.
pub fn resolve_settings(
    loader: Res<SettingsLoader>,
    asset_server: Res<AssetServer>,
    settings_assets: Res<Assets<BackdropSettings>>,
    existing: Option<Res<BackdropSettings>>,
    mut commands: Commands,
) {
    if existing.is_some() {
        return;
    }
    let Some(handle) = loader.handle.as_ref() else {
        return;
    };

    if let Some(settings) = settings_assets.get(handle) {
        info!("Loaded settings from {}", SETTINGS_PATH);
        commands.insert_resource(settings.clone());
        return;
    }

    if let LoadState::Failed(err) = asset_server.load_state(handle.id()) {
        warn!(
            "Could not load {} ({}), using default settings",
            SETTINGS_PATH, err
        );
        commands.insert_resource(BackdropSettings::default());
    }
}
