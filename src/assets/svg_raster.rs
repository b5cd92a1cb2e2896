use crate::foundation::error::{PodiumError, PodiumResult};

// Upper bound per side for rasterized SVGs.
const MAX_DIM: u32 = 16_384;

/// Pixel size an SVG is rasterized at when used as a bitmap source.
pub(crate) fn svg_intrinsic_size(tree: &usvg::Tree) -> PodiumResult<(u32, u32)> {
    fn to_px(v: f32) -> PodiumResult<u32> {
        if !v.is_finite() || v <= 0.0 {
            return Err(PodiumError::asset("svg has invalid width/height"));
        }
        Ok((v.ceil() as u32).max(1))
    }

    let size = tree.size();
    let w = to_px(size.width())?;
    let h = to_px(size.height())?;
    if w > MAX_DIM || h > MAX_DIM {
        return Err(PodiumError::asset(format!(
            "svg raster size too large: {w}x{h} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }
    Ok((w, h))
}

pub(crate) fn rasterize_svg_to_premul_rgba8(
    tree: &usvg::Tree,
    width: u32,
    height: u32,
) -> PodiumResult<Vec<u8>> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| PodiumError::asset("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.data().to_vec())
}
