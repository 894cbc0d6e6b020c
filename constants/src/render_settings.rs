/// Vertical field of view of the backdrop camera, in degrees.
pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_DISTANCE: f32 = 70.0;

/// Pointer offset per pixel from the viewport centre, used for strip tilt.
pub const POINTER_TILT_PER_PIXEL: f32 = 0.0003;
/// Per-frame multiplicative decay of the tilt offset.
pub const POINTER_TILT_DECAY: f32 = 0.95;

pub const AMBIENT_LIGHT_COLOR: u32 = 0x1a1a2e;
pub const KEY_LIGHT_COLOR: u32 = 0x6366f1;
pub const FILL_LIGHT_COLOR: u32 = 0x06b6d4;
pub const AMBIENT_BRIGHTNESS: f32 = 150.0;
pub const KEY_LIGHT_LUX: f32 = 8_000.0;
pub const FILL_LIGHT_LUX: f32 = 6_000.0;
pub const KEY_LIGHT_POSITION: [f32; 3] = [50.0, 50.0, 50.0];
pub const FILL_LIGHT_POSITION: [f32; 3] = [-50.0, -30.0, 30.0];

/// Canvas selector the wasm build mounts on.
pub const CANVAS_SELECTOR: &str = "#threejs-canvas";

/// Runtime settings asset, relative to the asset root.
pub const SETTINGS_PATH: &str = "backdrop.settings.json";

pub const AUTO_CHANGE_SECS: f64 = 20.0;
pub const CLICK_COALESCE_SECS: f64 = 0.3;
pub const TRANSITION_DELAY_SECS: f64 = 0.2;
pub const BURST_TRANSITION_DELAY_SECS: f64 = 0.4;
pub const MAX_BURST_SLASHES: u32 = 12;
