use std::sync::Arc;

use crate::assets::decode::DecodedImage;
use crate::foundation::core::{Affine, Canvas, Point, Rgba8Premul};
use crate::foundation::error::{PodiumError, PodiumResult};

/// Exclusive drawing surface for one render call.
pub(crate) struct Surface {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
}

impl Surface {
    pub(crate) fn new(canvas: Canvas) -> PodiumResult<Self> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| PodiumError::render("surface width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| PodiumError::render("surface height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(PodiumError::render("surface must not be empty"));
        }
        Ok(Self {
            width,
            height,
            ctx: vello_cpu::RenderContext::new(width, height),
        })
    }

    pub(crate) fn ctx(&mut self) -> &mut vello_cpu::RenderContext {
        &mut self.ctx
    }

    /// Restore identity transforms so each draw op starts from device space.
    pub(crate) fn reset_transforms(&mut self) {
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }

    /// Rasterize everything recorded so far and return premultiplied RGBA8 pixels.
    pub(crate) fn finish(mut self) -> Vec<u8> {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        pixmap.data_as_u8_slice().to_vec()
    }
}

pub(crate) fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

pub(crate) fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

pub(crate) fn color_to_cpu(c: Rgba8Premul) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

/// Image paint plus its intrinsic size.
#[derive(Clone)]
pub(crate) struct ImagePaint {
    pub(crate) paint: vello_cpu::Image,
    pub(crate) w: u32,
    pub(crate) h: u32,
}

pub(crate) fn image_paint(img: &DecodedImage) -> PodiumResult<ImagePaint> {
    let pixmap = pixmap_from_premul_bytes(img.rgba8_premul.as_slice(), img.width, img.height)?;
    Ok(ImagePaint {
        paint: vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        },
        w: img.width,
        h: img.height,
    })
}

fn pixmap_from_premul_bytes(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> PodiumResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| PodiumError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| PodiumError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(PodiumError::render("decoded image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

pub(crate) fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

/// Device-space circle outline.
pub(crate) fn circle_path(center: Point, radius: f64) -> vello_cpu::kurbo::BezPath {
    use kurbo::Shape;

    bezpath_to_cpu(&kurbo::Circle::new(center, radius).to_path(0.1))
}
