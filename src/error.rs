use thiserror::Error;

use crate::anchors::Line;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Degenerate line {line}: {reason}")]
    DegenerateLine { line: Line, reason: &'static str },

    #[error("Insufficient samples: profile has {actual}, at least {required} required")]
    InsufficientSamples { required: usize, actual: usize },

    #[error("No edge detected (start found: {start_found}, end found: {end_found})")]
    NoEdgeDetected { start_found: bool, end_found: bool },

    #[error("Image access error: pixel ({x}, {y}) out of bounds for {width}x{height} image")]
    PixelOutOfBounds {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    },

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Empty batch: at least one distance series is required")]
    EmptyBatch,

    #[error("Length mismatch: expected {expected} distances, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
