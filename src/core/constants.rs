use std::f32::consts::PI;

// Transition tuning shared by the controller and its tests.

// Input debounce
pub const SCROLL_THRESHOLD: f64 = 50.0; // minimum |deltaY| that counts as a scroll
pub const SCROLL_COOLDOWN_SEC: f64 = 0.5; // minimum gap between accepted scrolls

// Tween timing
pub const TRANSITION_DURATION_SEC: f64 = 1.0;
pub const TEXTURE_SWAP_DELAY_SEC: f64 = 0.4; // hides the map pop behind the label wipe

// Label wipe
pub const PROGRESS_MIDPOINT: f32 = 0.5;

// Scene layout
pub const LABEL_Z: f32 = 2.0;
pub const INCOMING_LABEL_OFFSET_X: f32 = 3.5; // incoming label starts this far out, on the scroll side
pub const OUTGOING_LABEL_OFFSET_X: f32 = 3.0; // outgoing label leaves to this x, opposite side
pub const BLOB_SPIN_RADIANS: f32 = PI * 4.0;

// Background before the first preset fades in
pub const INITIAL_BACKGROUND_HEX: &str = "#333";

// Noise time wraps so the f32 uniform keeps its precision; one seam per hour
pub const ELAPSED_WRAP_SEC: f64 = 3600.0;

// Displacement time frequencies are not part of any preset
pub const POSITION_TIME_FREQUENCY: f32 = 0.3;
pub const SMALL_WAVE_TIME_FREQUENCY: f32 = 0.3;

// Synthetic wheel delta for keyboard navigation, comfortably above the threshold
pub const KEY_SCROLL_DELTA: f64 = 100.0;
