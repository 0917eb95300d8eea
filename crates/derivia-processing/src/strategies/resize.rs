//! Image resize strategy

use super::is_supported_raster;
use crate::strategy::{StrategyOptions, VariantStrategy};
use anyhow::{bail, Context};
use async_trait::async_trait;
use image::imageops::FilterType;
use image::ImageReader;
use serde::Deserialize;
use std::io::Cursor;
use std::path::Path;
use tokio::fs;

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
struct ResizeOptions {
    width: Option<u32>,
    height: Option<u32>,
}

/// Aspect-preserving resize. Requires a `width` or `height` option (or
/// both, interpreted as a bounding box).
#[derive(Default)]
pub struct ImageResizeStrategy {
    options: StrategyOptions,
}

impl ImageResizeStrategy {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VariantStrategy for ImageResizeStrategy {
    fn should_apply_for_mime_type(&self, content_type: &str) -> bool {
        is_supported_raster(content_type)
    }

    fn set_options(&mut self, options: &StrategyOptions) {
        self.options
            .extend(options.iter().map(|(k, v)| (k.clone(), v.clone())));
    }

    async fn apply(&self, target: &Path) -> anyhow::Result<()> {
        let opts: ResizeOptions =
            serde_json::from_value(serde_json::Value::Object(self.options.clone()))
                .context("invalid resize options")?;

        let data = fs::read(target).await?;
        let out = resize_bytes(&data, opts)?;
        fs::write(target, out).await?;
        Ok(())
    }
}

fn resize_bytes(data: &[u8], opts: ResizeOptions) -> anyhow::Result<Vec<u8>> {
    let reader = ImageReader::new(Cursor::new(data)).with_guessed_format()?;
    let format = reader
        .format()
        .context("could not determine image format")?;
    let img = reader.decode()?;

    let resized = match (opts.width, opts.height) {
        (Some(w), Some(h)) => img.resize(w, h, FilterType::Lanczos3),
        (Some(w), None) => img.resize(w, u32::MAX, FilterType::Lanczos3),
        (None, Some(h)) => img.resize(u32::MAX, h, FilterType::Lanczos3),
        (None, None) => bail!("resize requires a width or height option"),
    };

    let mut buffer = Vec::new();
    resized.write_to(&mut Cursor::new(&mut buffer), format)?;
    Ok(buffer)
}
