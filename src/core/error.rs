use thiserror::Error;

/// Errors raised by the platform-independent core.
#[derive(Debug, Error)]
pub enum ShowcaseError {
    #[error("preset table is empty")]
    NoPresets,
    #[error("invalid hex color {value:?}")]
    InvalidColor { value: String },
    #[error("failed to decode texture {name:?}: {source}")]
    TextureDecode {
        name: String,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to decode environment map: {0}")]
    EnvironmentDecode(#[source] image::ImageError),
}
