/// Clock advance per rendered frame. Per-frame increments (rotation rates,
/// velocities, fall speeds) are frame-locked rather than scaled by delta time.
pub const TIME_STEP: f32 = 0.01;

// Strip surface
pub const STRIP_RADIUS: f32 = 35.0;
pub const STRIP_HALF_WIDTH: f32 = 0.6;
pub const STRIP_U_SEGMENTS: u32 = 120;
pub const STRIP_V_SEGMENTS: u32 = 30;
pub const STRIP_OPACITY: f32 = 0.6;
pub const STRIP_WIREFRAME_COLOR: u32 = 0x06b6d4;
pub const STRIP_WIREFRAME_OPACITY: f32 = 0.2;
pub const STRIP_GLOW_COLOR: u32 = 0xf59e0b;
pub const STRIP_GLOW_OPACITY: f32 = 0.1;
pub const STRIP_GLOW_SCALE: f32 = 1.02;

/// Pointer tilt multiplier applied to the strip's X/Y rotation.
pub const STRIP_TILT_GAIN: f32 = 3.0;

// Particle cloud around the strip
pub const PARTICLE_COUNT: usize = 1000;
pub const PARTICLE_RADIUS_MIN: f32 = 40.0;
pub const PARTICLE_RADIUS_MAX: f32 = 190.0;
/// Cumulative thresholds for picking the first and second cloud colour.
pub const PARTICLE_COLOR_WEIGHTS: [f32; 2] = [0.4, 0.8];
pub const PARTICLE_OPACITY: f32 = 0.8;

// Floating shapes
pub const SHAPE_COUNT: usize = 60;
pub const SHAPE_EXTRA_COLORS: [u32; 2] = [0xfce7f3, 0xa855f7];
pub const SHAPE_OPACITY: f32 = 0.7;
pub const SHAPE_SPAWN_HALF_EXTENTS: [f32; 3] = [60.0, 45.0, 25.0];
pub const SHAPE_MAX_DIST_MIN: f32 = 70.0;
pub const SHAPE_MAX_DIST_MAX: f32 = 100.0;
pub const SHAPE_WALL_X: f32 = 65.0;
pub const SHAPE_WALL_Y: f32 = 50.0;
pub const SHAPE_WALL_Z: f32 = 30.0;
/// Velocity factor when the anchor strays past `max_dist`.
pub const SHAPE_CENTER_BOUNCE: f32 = -0.8;
/// Velocity nudge per frame while the cursor is over a shape.
pub const SHAPE_HOVER_PUSH: f32 = 0.015;

// Circuit graph
pub const CIRCUIT_GRID_SIZE: usize = 12;
pub const CIRCUIT_SPACING: f32 = 15.0;
pub const CIRCUIT_DROP_PROBABILITY: f64 = 0.3;
pub const CIRCUIT_JITTER: f32 = 4.0;
pub const CIRCUIT_DEPTH: f32 = 15.0;
pub const CIRCUIT_CONNECT_PROBABILITY: f64 = 0.6;
pub const CIRCUIT_NODE_OPACITY: f32 = 0.9;
pub const CIRCUIT_NODE_SEGMENTS: u32 = 16;
pub const CIRCUIT_RING_OPACITY: f32 = 0.3;
pub const CIRCUIT_RING_SEGMENTS: u32 = 16;
pub const CIRCUIT_PACKET_COUNT: usize = 80;
pub const CIRCUIT_PACKET_COLOR: u32 = 0x00ff88;
pub const CIRCUIT_PACKET_RADIUS: f32 = 0.4;
pub const CIRCUIT_HUB_COUNT: usize = 8;
pub const CIRCUIT_HUB_RADIUS: f32 = 2.5;
pub const CIRCUIT_HUB_OPACITY: f32 = 0.7;
pub const CIRCUIT_GEAR_COUNT: usize = 8;
pub const CIRCUIT_GEAR_TEETH: u32 = 12;
pub const CIRCUIT_GEAR_INNER_RADIUS: f32 = 1.5;
pub const CIRCUIT_GEAR_OUTER_RADIUS: f32 = 2.0;
pub const CIRCUIT_GEAR_OPACITY: f32 = 0.6;
pub const CIRCUIT_DECOR_HALF_EXTENTS: [f32; 3] = [50.0, 40.0, 12.5];
pub const CIRCUIT_HIGHLIGHT_COLOR: u32 = 0x00ffff;
pub const CIRCUIT_HIGHLIGHT_OPACITY: f32 = 0.9;
pub const CIRCUIT_REWIRE_ATTEMPTS: usize = 10;

// Code rain
pub const RAIN_COLUMNS: usize = 25;
pub const RAIN_WIDTH: f32 = 120.0;
pub const RAIN_MIN_LENGTH: usize = 6;
pub const RAIN_MAX_LENGTH: usize = 17;
pub const RAIN_TOP_Y: f32 = 55.0;
pub const RAIN_ROW_SPACING: f32 = 4.0;
pub const RAIN_RESET_Y: f32 = 60.0;
pub const RAIN_BOTTOM_Y: f32 = -60.0;
pub const RAIN_GLYPH_PX: u32 = 32;
pub const RAIN_GLYPH_SCALE: f32 = 3.0;
pub const RAIN_HEAD_COLOR: u32 = 0xffffff;
pub const RAIN_CHANGE_MIN: f32 = 8.0;
pub const RAIN_CHANGE_SPAN: f32 = 20.0;
pub const RAIN_SYMBOL_COUNT: usize = 20;
pub const RAIN_SYMBOL_PX: u32 = 64;
pub const RAIN_SYMBOL_SCALE: f32 = 5.0;
pub const RAIN_SYMBOL_OPACITY: f32 = 0.5;
pub const RAIN_SYMBOL_HALF_EXTENTS: [f32; 3] = [50.0, 40.0, 20.0];
pub const RAIN_COLUMN_DEPTH: f32 = 15.0;
pub const RAIN_SYMBOL_WALL_X: f32 = 70.0;
pub const RAIN_SYMBOL_WALL_Y: f32 = 55.0;
pub const RAIN_SYMBOL_FLOAT: f32 = 3.0;
pub const RAIN_SYMBOL_SPIN: f32 = 0.01;

pub const RAIN_GLYPHS: &str = concat!(
    "アイウエオカキクケコサシスセソタチツテトナニヌネノハヒフヘホマミムメモヤユヨラリルレロワヲン",
    "あいうえおかきくけこさしすせそたちつてとなにぬねのはひふへほまみむめもやゆよらりるれろわをん",
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789<>{}[]()=+-*/&|!?@#$%",
);
pub const RAIN_SYMBOLS: &[char] = &['{', '}', '[', ']', '<', '>', '(', ')', ';', '='];

// Hover interaction
pub const HOVER_SCALE: f32 = 1.3;
/// Pick distance around a connection line, in world units.
pub const LINE_PICK_THRESHOLD: f32 = 1.0;
pub const HOVER_EASE_IN: f32 = 0.08;
pub const HOVER_EASE_OUT: f32 = 0.05;
