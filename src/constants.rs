/// Rendering, asset and page-level constants for the web frontend.
///
/// Transition tuning lives in `core::constants`; these only affect how the
/// scene is drawn and where assets come from.
// Camera
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_Z: f32 = 3.0;

// Blob mesh
pub const BLOB_RADIUS: f32 = 1.0;
pub const BLOB_DETAIL: u32 = 70; // ~100k triangles

// Output
pub const TONE_MAPPING_EXPOSURE: f32 = 1.0;

// Labels
pub const LABEL_FONT_FAMILY: &str = "'Aften Screen', sans-serif";
pub const LABEL_FONT_PX: f32 = 256.0; // raster size; world size comes from the viewport
pub const LABEL_FONT_SCALE_DIVISOR: f64 = 3000.0; // world em = innerWidth / divisor
pub const LABEL_LETTER_SPACING_EM: f32 = -0.1;
pub const LABEL_PADDING_PX: f32 = 16.0;

// Assets
pub const GRADIENT_DIR: &str = "./gradients";
pub const ENVIRONMENT_URL: &str = "./studio_small_08_1k.hdr";

// Canvas
pub const CANVAS_ID: &str = "app-canvas";
