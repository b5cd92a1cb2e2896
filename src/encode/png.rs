use std::io::Cursor;
use std::path::Path;

use base64::Engine as _;

use crate::foundation::error::{PodiumError, PodiumResult};
use crate::foundation::math::{Fnv1a64, unpremultiply_rgba8_in_place};

/// A finished podium image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// PNG-encoded bytes.
    pub png: Vec<u8>,
}

impl RenderedImage {
    /// PNG bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.png
    }

    /// `data:image/png;base64,...` form, ready for an `<img src>`.
    pub fn to_data_uri(&self) -> String {
        let mut out = String::from("data:image/png;base64,");
        base64::engine::general_purpose::STANDARD.encode_string(&self.png, &mut out);
        out
    }

    /// Stable 64-bit hash of the PNG bytes.
    pub fn fingerprint(&self) -> u64 {
        let mut h = Fnv1a64::new_default();
        h.write_bytes(&self.png);
        h.finish()
    }

    /// Write the PNG to `path`, creating the parent directory if needed.
    pub fn write_to(&self, path: impl AsRef<Path>) -> PodiumResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                PodiumError::render(format!("create output dir '{}': {e}", parent.display()))
            })?;
        }
        std::fs::write(path, &self.png)
            .map_err(|e| PodiumError::render(format!("write png '{}': {e}", path.display())))
    }
}

/// Encode premultiplied RGBA8 pixels as PNG.
pub(crate) fn encode_png(
    width: u32,
    height: u32,
    mut rgba8_premul: Vec<u8>,
) -> PodiumResult<RenderedImage> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or_else(|| PodiumError::render("image dimensions overflow"))?;
    if rgba8_premul.len() != expected {
        return Err(PodiumError::render(format!(
            "pixel buffer has {} bytes, expected {expected}",
            rgba8_premul.len()
        )));
    }

    unpremultiply_rgba8_in_place(&mut rgba8_premul);
    let img = image::RgbaImage::from_raw(width, height, rgba8_premul)
        .ok_or_else(|| PodiumError::render("pixel buffer does not match image size"))?;

    let mut png = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .map_err(|e| PodiumError::render(format!("png encode failed: {e}")))?;

    Ok(RenderedImage {
        width,
        height,
        png,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
