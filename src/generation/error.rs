use thiserror::Error;

/// Failures inside a single strategy. They never leave the strategy: each is
/// turned into a failed `GenerationResult`.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("QR code encoding error: {0}")]
    Encode(#[from] qrcode::types::QrError),
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid colour '{0}', expected #rgb or #rrggbb")]
    InvalidColor(String),
    #[error("Invalid logo: {0}")]
    InvalidLogo(String),
    #[error("Request URL too long ({0} characters)")]
    UrlTooLong(usize),
    #[error("Renderer unavailable")]
    Unavailable,
}
