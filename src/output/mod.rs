//! Output encoders for resolved frames.

mod png_encoder;

pub use png_encoder::PngEncoder;
