//! Error types for trueno-raster operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in trueno-raster operations.
///
/// Out-of-bounds writes, off-screen geometry and invalid sampling levels are
/// not errors: they are clipped, skipped or answered with a sentinel color.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error (file operations, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error.
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),

    /// Invalid dimensions for a render target, output buffer or texture.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Sample rate must be a positive integer.
    #[error("Invalid sample rate: {0}")]
    InvalidSampleRate(u32),

    /// The supersample store could not be allocated.
    #[error("Failed to allocate {bytes} bytes for the supersample buffer")]
    AllocationFailed {
        /// Requested allocation size in bytes (saturated on overflow).
        bytes: usize,
    },

    /// Texel data does not match the declared texture dimensions.
    #[error("Texel data mismatch: expected {expected} bytes, got {actual}")]
    TexelDataMismatch {
        /// Expected byte count (`4 * width * height`).
        expected: usize,
        /// Byte count actually supplied.
        actual: usize,
    },

    /// Pixel data does not match the declared framebuffer dimensions.
    #[error("Pixel data mismatch: expected {expected} bytes, got {actual}")]
    PixelDataMismatch {
        /// Expected byte count (`4 * width * height`).
        expected: usize,
        /// Byte count actually supplied.
        actual: usize,
    },

    /// Mip level outside the texture's chain.
    #[error("Invalid mip level {level}: texture has {levels} level(s)")]
    InvalidMipLevel {
        /// Requested level.
        level: usize,
        /// Number of levels in the chain.
        levels: usize,
    },
}
