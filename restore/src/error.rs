use crate::roi::Roi;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid region {roi} for {width}x{height} image: {reason}")]
    InvalidRoi {
        roi: Roi,
        width: usize,
        height: usize,
        reason: &'static str,
    },
    #[error("invalid restoration config: {0}")]
    InvalidConfig(String),
    #[error("dimension mismatch: expected {expected_width}x{expected_height}, got {width}x{height}")]
    DimensionMismatch {
        expected_width: usize,
        expected_height: usize,
        width: usize,
        height: usize,
    },
    #[error("pixel buffer: expected {expected} elements, got {got}")]
    PixelCount { expected: usize, got: usize },
    #[error("image codec error")]
    Provider(#[from] image::ImageError),
    #[error("IO error")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
