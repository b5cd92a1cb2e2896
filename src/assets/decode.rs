use std::sync::Arc;

use anyhow::Context;

use crate::assets::svg_raster::{rasterize_svg_to_premul_rgba8, svg_intrinsic_size};
use crate::foundation::error::{PodiumError, PodiumResult};
use crate::foundation::math::premultiply_rgba8_in_place;

/// Decoded raster image in premultiplied RGBA8 form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl DecodedImage {
    /// Wrap straight-alpha RGBA8 pixels, premultiplying them.
    pub fn from_straight_rgba8(width: u32, height: u32, mut rgba: Vec<u8>) -> PodiumResult<Self> {
        if width == 0 || height == 0 {
            return Err(PodiumError::asset("image has zero width or height"));
        }
        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(PodiumError::asset(format!(
                "image {width}x{height} is too large to composite"
            )));
        }
        if rgba.len() != width as usize * height as usize * 4 {
            return Err(PodiumError::asset("image byte length mismatch"));
        }
        premultiply_rgba8_in_place(&mut rgba);
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba),
        })
    }
}

/// Decode encoded image bytes (PNG, JPEG, GIF, WebP, ... or SVG) to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> PodiumResult<DecodedImage> {
    if image::guess_format(bytes).is_err() && looks_like_svg(bytes) {
        return decode_svg(bytes);
    }

    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    DecodedImage::from_straight_rgba8(width, height, rgba.into_raw())
}

/// Parse SVG bytes and rasterize them at the document's intrinsic size.
pub fn decode_svg(bytes: &[u8]) -> PodiumResult<DecodedImage> {
    let opts = usvg::Options::default();
    let tree = usvg::Tree::from_data(bytes, &opts).context("parse svg tree")?;
    let (width, height) = svg_intrinsic_size(&tree)?;
    let rgba8_premul = rasterize_svg_to_premul_rgba8(&tree, width, height)?;
    Ok(DecodedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(512)];
    let head = String::from_utf8_lossy(head);
    let head = head.trim_start_matches('\u{feff}').trim_start();
    head.starts_with("<svg") || (head.starts_with("<?xml") && head.contains("<svg"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
