//! Built-in image strategies
//!
//! Each strategy decodes the working copy with a guessed format, transforms
//! it, and re-encodes it in the original format, in place.

pub mod grayscale;
pub mod resize;
pub mod rotate;

pub use grayscale::GrayscaleStrategy;
pub use resize::ImageResizeStrategy;
pub use rotate::ImageRotateStrategy;

/// Raster types the `image`-based strategies can decode and re-encode.
pub(crate) fn is_supported_raster(content_type: &str) -> bool {
    matches!(
        content_type,
        "image/jpeg" | "image/jpg" | "image/png" | "image/gif" | "image/webp"
    )
}
