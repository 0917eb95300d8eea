//! Grayscale strategy

use super::is_supported_raster;
use crate::strategy::{StrategyOptions, VariantStrategy};
use anyhow::Context;
use async_trait::async_trait;
use image::ImageReader;
use std::io::Cursor;
use std::path::Path;
use tokio::fs;

/// Luma conversion. Takes no options.
#[derive(Default)]
pub struct GrayscaleStrategy;

impl GrayscaleStrategy {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl VariantStrategy for GrayscaleStrategy {
    fn should_apply_for_mime_type(&self, content_type: &str) -> bool {
        is_supported_raster(content_type)
    }

    fn set_options(&mut self, _options: &StrategyOptions) {}

    async fn apply(&self, target: &Path) -> anyhow::Result<()> {
        let data = fs::read(target).await?;

        let reader = ImageReader::new(Cursor::new(&data)).with_guessed_format()?;
        let format = reader
            .format()
            .context("could not determine image format")?;
        let img = reader.decode()?;

        let mut buffer = Vec::new();
        img.grayscale()
            .write_to(&mut Cursor::new(&mut buffer), format)?;

        fs::write(target, buffer).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgba, RgbaImage};

    #[tokio::test]
    async fn test_grayscale_flattens_color() {
        let img = image::DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            2,
            2,
            Rgba([255, 0, 0, 255]),
        ));
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
            .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("red.png");
        std::fs::write(&path, &buffer).unwrap();

        let strategy = GrayscaleStrategy::new();
        strategy.apply(&path).await.unwrap();

        let out = image::load_from_memory(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(out.dimensions(), (2, 2));
        let pixel = out.to_rgba8().get_pixel(0, 0).0;
        assert_eq!(pixel[0], pixel[1]);
        assert_eq!(pixel[1], pixel[2]);
    }

    #[test]
    fn test_applicability() {
        let strategy = GrayscaleStrategy::new();
        assert!(strategy.should_apply_for_mime_type("image/webp"));
        assert!(!strategy.should_apply_for_mime_type("text/plain"));
    }
}
