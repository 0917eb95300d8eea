//! Image rotate strategy

use super::is_supported_raster;
use crate::strategy::{StrategyOptions, VariantStrategy};
use anyhow::{bail, Context};
use async_trait::async_trait;
use image::ImageReader;
use serde::Deserialize;
use std::io::Cursor;
use std::path::Path;
use tokio::fs;

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
struct RotateOptions {
    degrees: Option<u16>,
}

/// Clockwise rotation by 90, 180 or 270 degrees (`degrees` option).
#[derive(Default)]
pub struct ImageRotateStrategy {
    options: StrategyOptions,
}

impl ImageRotateStrategy {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VariantStrategy for ImageRotateStrategy {
    fn should_apply_for_mime_type(&self, content_type: &str) -> bool {
        is_supported_raster(content_type)
    }

    fn set_options(&mut self, options: &StrategyOptions) {
        self.options
            .extend(options.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    async fn apply(&self, target: &Path) -> anyhow::Result<()> {
        let opts: RotateOptions =
            serde_json::from_value(serde_json::Value::Object(self.options.clone()))
                .context("invalid rotate options")?;

        let data = fs::read(target).await?;
        let out = rotate_bytes(&data, opts)?;
        fs::write(target, out).await?;
        Ok(())
    }
}

fn rotate_bytes(data: &[u8], opts: RotateOptions) -> anyhow::Result<Vec<u8>> {
    let Some(degrees) = opts.degrees else {
        bail!("rotate requires a degrees option");
    };

    let reader = ImageReader::new(Cursor::new(data)).with_guessed_format()?;
    let format = reader
        .format()
        .context("could not determine image format")?;
    let img = reader.decode()?;

    let rotated = match degrees {
        90 => img.rotate90(),
        180 => img.rotate180(),
        270 => img.rotate270(),
        other => bail!("unsupported rotation angle: {other}"),
    };

    let mut buffer = Vec::new();
    rotated.write_to(&mut Cursor::new(&mut buffer), format)?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, RgbaImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            width,
            height,
            image::Rgba([200, 100, 0, 255]),
        ));
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
            .unwrap();
        buffer
    }

    #[test]
    fn test_rotate_90_swaps_dimensions() {
        let out = rotate_bytes(
            &png_bytes(4, 2),
            RotateOptions { degrees: Some(90) },
        )
        .unwrap();
        let img = image::load_from_memory(&out).unwrap();
        assert_eq!(img.dimensions(), (2, 4));
    }

    #[test]
    fn test_rotate_180_keeps_dimensions() {
        let out = rotate_bytes(
            &png_bytes(4, 2),
            RotateOptions { degrees: Some(180) },
        )
        .unwrap();
        let img = image::load_from_memory(&out).unwrap();
        assert_eq!(img.dimensions(), (4, 2));
    }

    #[test]
    fn test_rotate_rejects_arbitrary_angle() {
        let result = rotate_bytes(&png_bytes(2, 2), RotateOptions { degrees: Some(45) });
        assert!(result.is_err());
    }

    #[test]
    fn test_rotate_requires_degrees() {
        let result = rotate_bytes(&png_bytes(2, 2), RotateOptions::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_applicability() {
        let strategy = ImageRotateStrategy::new();
        assert!(strategy.should_apply_for_mime_type("image/gif"));
        assert!(!strategy.should_apply_for_mime_type("video/mp4"));
    }
}
