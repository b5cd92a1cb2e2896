use crate::assets::decode::DecodedImage;
use crate::assets::resolver::ResolvedAsset;
use crate::encode::png::{RenderedImage, encode_png};
use crate::foundation::core::{Affine, Point, Rect, Rgba8Premul, Vec2};
use crate::foundation::error::{PodiumError, PodiumResult};
use crate::layout::podium::{PlacementGeometry, PodiumLayout, Rank, TextAnchor};
use crate::render::surface::{
    Surface, affine_to_cpu, bezpath_to_cpu, circle_path, color_to_cpu, image_paint,
};
use crate::render::text::{FontSet, TextDraw, TextPainter, TextWeight};
use crate::scene::date::format_date;
use crate::scene::model::{PODIUM_SLOTS, PlayerEntry, TournamentInfo};

/// Fixed colours of the podium artwork.
pub(crate) mod palette {
    use crate::foundation::core::Rgba8Premul;

    pub(crate) const BACKGROUND: Rgba8Premul = Rgba8Premul::from_hex(0x277E30);
    pub(crate) const TEXT: Rgba8Premul = Rgba8Premul::from_hex(0x0F172A);
    pub(crate) const BLOCK: Rgba8Premul = Rgba8Premul::from_hex(0x291503);
    pub(crate) const BADGE_BACKGROUND: Rgba8Premul = Rgba8Premul::from_hex(0x277E30);
    pub(crate) const BORDER: Rgba8Premul = Rgba8Premul::from_hex(0x000000);
    pub(crate) const LABEL: Rgba8Premul = Rgba8Premul::from_hex(0xFFFFFF);
}

const WATERMARK_OPACITY: f32 = 0.18;

/// Everything one composite pass needs. Assets are already resolved.
#[derive(Clone, Copy, Debug)]
pub struct CompositeInput<'a> {
    /// Geometry for the target canvas.
    pub layout: &'a PodiumLayout,
    /// Header data.
    pub tournament: &'a TournamentInfo,
    /// Ranked players, index 0 = 1st place.
    pub players: &'a [PlayerEntry],
    /// Resolved portrait per player, same order as `players`.
    pub portraits: &'a [ResolvedAsset],
    /// Resolved watermark.
    pub watermark: &'a ResolvedAsset,
    /// Resolved team badge.
    pub team_badge: &'a ResolvedAsset,
    /// Fonts for all text; `None` falls back to [`FontSet::system`].
    pub fonts: Option<&'a FontSet>,
}

/// A filled circle, optionally with the black portrait border around it.
#[derive(Clone, Copy, Debug)]
pub(crate) struct CircleDraw {
    pub(crate) center: Point,
    pub(crate) diameter: f64,
    pub(crate) fill: Rgba8Premul,
    pub(crate) border: bool,
}

/// Paint the podium and encode it as PNG.
///
/// Paint order: background, watermark, header text, then per rank the block, ordinal label,
/// portrait or placeholder, team badge, medal, name and score.
#[tracing::instrument(
    skip_all,
    fields(width = input.layout.canvas.width, height = input.layout.canvas.height)
)]
pub fn composite(input: &CompositeInput<'_>) -> PodiumResult<RenderedImage> {
    if input.players.len() != PODIUM_SLOTS {
        return Err(PodiumError::validation(format!(
            "podium needs exactly {PODIUM_SLOTS} players, got {}",
            input.players.len()
        )));
    }
    if input.portraits.len() != input.players.len() {
        return Err(PodiumError::render(format!(
            "expected {} resolved portraits, got {}",
            input.players.len(),
            input.portraits.len()
        )));
    }

    let layout = input.layout;
    let mut surface = Surface::new(layout.canvas)?;
    let system;
    let fonts = match input.fonts {
        Some(fonts) => Some(fonts),
        None => {
            system = FontSet::system();
            system.as_ref()
        }
    };
    let mut painter = match fonts {
        Some(fonts) => Some(TextPainter::new(fonts)?),
        None => {
            tracing::warn!("no fonts configured and no system sans-serif found, text layers are skipped");
            None
        }
    };

    fill_background(&mut surface, layout);
    if let Some(img) = input.watermark.image() {
        draw_watermark(&mut surface, layout, img)?;
    }

    let date = format_date(&input.tournament.date);
    let header = &layout.header;
    draw_text(
        &mut surface,
        &mut painter,
        &input.tournament.name,
        header.title,
        TextWeight::Bold,
        palette::TEXT,
    )?;
    draw_text(
        &mut surface,
        &mut painter,
        &date,
        header.date,
        TextWeight::Regular,
        palette::TEXT,
    )?;
    draw_text(
        &mut surface,
        &mut painter,
        &input.tournament.website_url,
        header.website,
        TextWeight::Regular,
        palette::TEXT,
    )?;

    for slot in &layout.slots {
        let i = slot.rank.index();
        let player = &input.players[i];
        let badge = if player.is_team_member {
            input.team_badge.image()
        } else {
            None
        };
        draw_slot(
            &mut surface,
            &mut painter,
            layout.border_width,
            slot,
            player,
            &input.portraits[i],
            badge,
        )?;
        tracing::debug!(rank = slot.rank.ordinal(), "slot painted");
    }

    let pixels = surface.finish();
    encode_png(layout.canvas.width, layout.canvas.height, pixels)
}

fn draw_slot(
    surface: &mut Surface,
    painter: &mut Option<TextPainter>,
    border_width: f64,
    slot: &PlacementGeometry,
    player: &PlayerEntry,
    portrait: &ResolvedAsset,
    badge: Option<&DecodedImage>,
) -> PodiumResult<()> {
    fill_rect(surface, slot.block, palette::BLOCK);
    draw_text(
        surface,
        painter,
        slot.rank.ordinal(),
        slot.label,
        TextWeight::Bold,
        palette::LABEL,
    )?;

    let frame = CircleDraw {
        center: slot.portrait_center,
        diameter: slot.portrait_diameter,
        fill: slot.rank.metal(),
        border: true,
    };
    match portrait.image() {
        Some(img) => draw_image_circle(surface, &frame, border_width, img)?,
        None => draw_circle(surface, &frame, border_width),
    }

    if let Some(img) = badge {
        let backing = CircleDraw {
            center: slot.badge_center,
            diameter: slot.badge_diameter,
            fill: palette::BADGE_BACKGROUND,
            border: true,
        };
        draw_circle(surface, &backing, border_width);
        let inner = CircleDraw {
            diameter: slot.badge_diameter / 2.0,
            border: false,
            ..backing
        };
        draw_image_circle(surface, &inner, border_width, img)?;
    }

    draw_medal(surface, painter, slot.rank, slot.medal_center, slot.medal_radius)?;

    draw_text(
        surface,
        painter,
        &player.name,
        slot.name,
        TextWeight::Bold,
        palette::TEXT,
    )?;
    draw_text(
        surface,
        painter,
        &player.score.to_string(),
        slot.score,
        TextWeight::Regular,
        palette::TEXT,
    )
}

fn fill_background(surface: &mut Surface, layout: &PodiumLayout) {
    let full = Rect::new(
        0.0,
        0.0,
        f64::from(layout.canvas.width),
        f64::from(layout.canvas.height),
    );
    fill_rect(surface, full, palette::BACKGROUND);
}

fn fill_rect(surface: &mut Surface, rect: Rect, color: Rgba8Premul) {
    surface.reset_transforms();
    let ctx = surface.ctx();
    ctx.set_paint(color_to_cpu(color));
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(rect.x0, rect.y0, rect.x1, rect.y1));
}

/// Watermark spans the full canvas width from the top-left corner, aspect preserved.
fn draw_watermark(
    surface: &mut Surface,
    layout: &PodiumLayout,
    img: &DecodedImage,
) -> PodiumResult<()> {
    let paint = image_paint(img)?;
    let (w, h) = (f64::from(paint.w), f64::from(paint.h));
    let s = f64::from(layout.canvas.width) / w;

    surface.reset_transforms();
    let ctx = surface.ctx();
    ctx.set_transform(affine_to_cpu(Affine::scale(s)));
    ctx.set_paint(paint.paint);
    ctx.push_opacity_layer(WATERMARK_OPACITY);
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
    ctx.pop_layer();
    Ok(())
}

fn draw_border(surface: &mut Surface, op: &CircleDraw, border_width: f64) {
    if !op.border || border_width <= 0.0 {
        return;
    }
    surface.reset_transforms();
    let ctx = surface.ctx();
    ctx.set_paint(color_to_cpu(palette::BORDER));
    ctx.fill_path(&circle_path(op.center, op.diameter / 2.0 + border_width / 2.0));
}

fn draw_circle(surface: &mut Surface, op: &CircleDraw, border_width: f64) {
    draw_border(surface, op, border_width);
    surface.reset_transforms();
    let ctx = surface.ctx();
    ctx.set_paint(color_to_cpu(op.fill));
    ctx.fill_path(&circle_path(op.center, op.diameter / 2.0));
}

/// Cover-fit `img` into the circle: the shorter side matches the diameter, centred, clipped.
fn draw_image_circle(
    surface: &mut Surface,
    op: &CircleDraw,
    border_width: f64,
    img: &DecodedImage,
) -> PodiumResult<()> {
    let paint = image_paint(img)?;
    let (w, h) = (f64::from(paint.w), f64::from(paint.h));
    let s = op.diameter / w.min(h);
    let placement = Affine::translate(op.center.to_vec2() - Vec2::new(w * s / 2.0, h * s / 2.0))
        * Affine::scale(s);

    draw_border(surface, op, border_width);
    surface.reset_transforms();
    let ctx = surface.ctx();
    ctx.set_paint(paint.paint);
    ctx.set_paint_transform(affine_to_cpu(placement));
    ctx.fill_path(&circle_path(op.center, op.diameter / 2.0));
    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    Ok(())
}

/// Two ribbon tails, a rim disc, the metal face and the rank numeral.
fn draw_medal(
    surface: &mut Surface,
    painter: &mut Option<TextPainter>,
    rank: Rank,
    center: Point,
    radius: f64,
) -> PodiumResult<()> {
    if radius <= 0.0 {
        return Ok(());
    }

    surface.reset_transforms();
    for dir in [-1.0, 1.0] {
        let tail = ribbon_tail(center, radius, dir);
        let ctx = surface.ctx();
        ctx.set_paint(color_to_cpu(rank.ribbon()));
        ctx.fill_path(&bezpath_to_cpu(&tail));
    }

    let ctx = surface.ctx();
    ctx.set_paint(color_to_cpu(rank.metal_rim()));
    ctx.fill_path(&circle_path(center, radius));
    ctx.set_paint(color_to_cpu(rank.metal()));
    ctx.fill_path(&circle_path(center, radius * 0.8));

    let numeral = (rank.index() + 1).to_string();
    let anchor = TextAnchor {
        baseline: Point::new(center.x, center.y + radius * 0.35),
        size_px: radius,
    };
    draw_text(surface, painter, &numeral, anchor, TextWeight::Bold, rank.metal_rim())
}

/// Slanted strip from above the medal down behind its top edge. `dir` picks the side.
fn ribbon_tail(center: Point, radius: f64, dir: f64) -> kurbo::BezPath {
    let at = |dx: f64, dy: f64| Point::new(center.x + dir * dx * radius, center.y + dy * radius);
    let mut path = kurbo::BezPath::new();
    path.move_to(at(0.95, -1.9));
    path.line_to(at(0.45, -1.9));
    path.line_to(at(-0.15, -0.6));
    path.line_to(at(0.35, -0.6));
    path.close_path();
    path
}

fn draw_text(
    surface: &mut Surface,
    painter: &mut Option<TextPainter>,
    text: &str,
    anchor: TextAnchor,
    weight: TextWeight,
    color: Rgba8Premul,
) -> PodiumResult<()> {
    let Some(painter) = painter.as_mut() else {
        return Ok(());
    };
    painter.draw(
        surface,
        &TextDraw {
            text,
            anchor: anchor.baseline,
            size_px: anchor.size_px,
            weight,
            color,
        },
    )
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
