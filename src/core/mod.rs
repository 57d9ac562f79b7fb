pub mod camera;
pub mod color;
pub mod constants;
pub mod ease;
pub mod error;
pub mod geometry;
pub mod material;
pub mod presets;
pub mod scene;
pub mod text_layout;
pub mod texture;
pub mod timers;
pub mod transition;
pub mod tween;

pub use camera::Camera;
pub use color::Rgb;
pub use constants::*;
pub use ease::Ease;
pub use error::ShowcaseError;
pub use material::BlobMaterial;
pub use presets::{ParamValue, Preset, PRESETS};
pub use scene::{Label, SceneState};
pub use transition::*;

// Shaders bundled as string constants
pub static BLOB_WGSL: &str = include_str!("../../shaders/blob.wgsl");
pub static LABEL_WGSL: &str = include_str!("../../shaders/label.wgsl");
pub static POST_WGSL: &str = include_str!("../../shaders/post.wgsl");
