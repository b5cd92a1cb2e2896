use std::borrow::Cow;
use std::path::Path;
use std::sync::{Arc, OnceLock};

use usvg::fontdb;

use crate::foundation::core::{Affine, Point, Rgba8Premul, Vec2};
use crate::foundation::error::{PodiumError, PodiumResult};
use crate::render::surface::{Surface, affine_to_cpu};

/// Regular and bold font data used for every text line of a podium.
///
/// Callers normally supply fonts; [`FontSet::system`] is the fallback when they don't.
#[derive(Clone)]
pub struct FontSet {
    regular: Arc<Vec<u8>>,
    bold: Arc<Vec<u8>>,
}

impl std::fmt::Debug for FontSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontSet")
            .field("regular_len", &self.regular.len())
            .field("bold_len", &self.bold.len())
            .finish()
    }
}

impl FontSet {
    /// Build from in-memory TTF/OTF bytes.
    pub fn from_bytes(regular: Vec<u8>, bold: Vec<u8>) -> Self {
        Self {
            regular: Arc::new(regular),
            bold: Arc::new(bold),
        }
    }

    /// Load fonts from disk. Without a bold face the regular face is used for bold text too.
    pub fn load(regular: &Path, bold: Option<&Path>) -> PodiumResult<Self> {
        let read = |p: &Path| {
            std::fs::read(p).map_err(|e| {
                PodiumError::config(format!("failed to read font '{}': {e}", p.display()))
            })
        };
        let regular_bytes = Arc::new(read(regular)?);
        let bold_bytes = match bold {
            Some(p) => Arc::new(read(p)?),
            None => regular_bytes.clone(),
        };
        Ok(Self {
            regular: regular_bytes,
            bold: bold_bytes,
        })
    }

    /// Sans-serif faces from the installed system fonts, looked up once per process.
    ///
    /// `None` when no usable face is installed.
    pub fn system() -> Option<Self> {
        static SYSTEM: OnceLock<Option<FontSet>> = OnceLock::new();
        SYSTEM.get_or_init(discover_system_fonts).clone()
    }
}

const SANS_FAMILIES: [fontdb::Family<'static>; 5] = [
    fontdb::Family::SansSerif,
    fontdb::Family::Name("DejaVu Sans"),
    fontdb::Family::Name("Liberation Sans"),
    fontdb::Family::Name("Noto Sans"),
    fontdb::Family::Name("Arial"),
];

fn discover_system_fonts() -> Option<FontSet> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();
    tracing::debug!(faces = db.len(), "system font database loaded");

    let regular = system_face(&db, fontdb::Weight::NORMAL)?;
    let bold = system_face(&db, fontdb::Weight::BOLD).unwrap_or_else(|| regular.clone());
    Some(FontSet { regular, bold })
}

/// First sans-serif face at `weight` that sits at collection index 0.
fn system_face(db: &fontdb::Database, weight: fontdb::Weight) -> Option<Arc<Vec<u8>>> {
    SANS_FAMILIES.iter().find_map(|family| {
        let id = db.query(&fontdb::Query {
            families: std::slice::from_ref(family),
            weight,
            ..Default::default()
        })?;
        // Faces are handed to the painter with collection index 0.
        if db.face(id)?.index != 0 {
            return None;
        }
        db.with_face_data(id, |data, _| Arc::new(data.to_vec()))
    })
}

/// Text weight of one line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TextWeight {
    Regular,
    Bold,
}

/// One line of text centred horizontally on `anchor`, sitting on its baseline.
#[derive(Clone, Debug)]
pub(crate) struct TextDraw<'a> {
    pub(crate) text: &'a str,
    pub(crate) anchor: Point,
    pub(crate) size_px: f64,
    pub(crate) weight: TextWeight,
    pub(crate) color: Rgba8Premul,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

struct Face {
    family: String,
    font: vello_cpu::peniko::FontData,
}

/// Shapes and paints text lines. Owned by a single render call.
pub(crate) struct TextPainter {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    regular: Face,
    bold: Face,
}

impl TextPainter {
    pub(crate) fn new(fonts: &FontSet) -> PodiumResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let regular = register_face(&mut font_ctx, fonts.regular.as_slice())?;
        let bold = register_face(&mut font_ctx, fonts.bold.as_slice())?;
        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            regular,
            bold,
        })
    }

    /// Shape `text` without drawing it; used for measurement.
    pub(crate) fn layout(
        &mut self,
        text: &str,
        size_px: f32,
        weight: TextWeight,
        color: Rgba8Premul,
    ) -> PodiumResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(PodiumError::render("text size_px must be finite and > 0"));
        }

        let face = match weight {
            TextWeight::Regular => &self.regular,
            TextWeight::Bold => &self.bold,
        };
        let family_name = face.family.clone();
        let brush = TextBrushRgba8 {
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));
        if weight == TextWeight::Bold {
            builder.push_default(parley::style::StyleProperty::FontWeight(
                parley::style::FontWeight::BOLD,
            ));
        }

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }

    pub(crate) fn draw(&mut self, surface: &mut Surface, op: &TextDraw<'_>) -> PodiumResult<()> {
        if op.text.trim().is_empty() {
            return Ok(());
        }

        let layout = self.layout(op.text, op.size_px as f32, op.weight, op.color)?;
        let width = f64::from(layout.width());
        let baseline = layout
            .lines()
            .next()
            .map(|line| f64::from(line.metrics().baseline))
            .unwrap_or(0.0);

        let origin = Vec2::new(op.anchor.x - width / 2.0, op.anchor.y - baseline);
        let font = match op.weight {
            TextWeight::Regular => self.regular.font.clone(),
            TextWeight::Bold => self.bold.font.clone(),
        };

        surface.reset_transforms();
        let ctx = surface.ctx();
        ctx.set_transform(affine_to_cpu(Affine::translate(origin)));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                // Absolute pen positions: run offset, accumulated advances, line baseline.
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        Ok(())
    }
}

fn register_face(font_ctx: &mut parley::FontContext, bytes: &[u8]) -> PodiumResult<Face> {
    let families = font_ctx
        .collection
        .register_fonts(parley::fontique::Blob::from(bytes.to_vec()), None);
    let family_id = families
        .first()
        .map(|(id, _)| *id)
        .ok_or_else(|| PodiumError::render("no font families registered from font bytes"))?;

    let family = font_ctx
        .collection
        .family_name(family_id)
        .ok_or_else(|| PodiumError::render("registered font family has no name"))?
        .to_string();

    let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes.to_vec()), 0);
    Ok(Face { family, font })
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
