use crate::foundation::core::{Canvas, Point, Rect, Rgba8Premul};
use crate::foundation::error::PodiumResult;

/// Final standing on the podium.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rank {
    /// 1st place (centre column, tallest block).
    First,
    /// 2nd place (left column).
    Second,
    /// 3rd place (right column, shortest block).
    Third,
}

impl Rank {
    /// All ranks in paint order.
    pub const ALL: [Rank; 3] = [Rank::First, Rank::Second, Rank::Third];

    /// Rank for a 0-based player index.
    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }

    /// 0-based player index.
    pub fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
            Self::Third => 2,
        }
    }

    /// Ordinal label painted on the podium block.
    pub fn ordinal(self) -> &'static str {
        match self {
            Self::First => "1st",
            Self::Second => "2nd",
            Self::Third => "3rd",
        }
    }

    /// Gold, silver or bronze.
    pub fn metal(self) -> Rgba8Premul {
        match self {
            Self::First => Rgba8Premul::from_hex(0xFFD700),
            Self::Second => Rgba8Premul::from_hex(0xC0C0C0),
            Self::Third => Rgba8Premul::from_hex(0xCD7F32),
        }
    }

    /// Darker rim shade of [`Self::metal`].
    pub fn metal_rim(self) -> Rgba8Premul {
        match self {
            Self::First => Rgba8Premul::from_hex(0xB8860B),
            Self::Second => Rgba8Premul::from_hex(0x808080),
            Self::Third => Rgba8Premul::from_hex(0x8B4513),
        }
    }

    /// Medal ribbon colour.
    pub fn ribbon(self) -> Rgba8Premul {
        match self {
            Self::First => Rgba8Premul::from_hex(0xC62828),
            Self::Second => Rgba8Premul::from_hex(0x1565C0),
            Self::Third => Rgba8Premul::from_hex(0x2E7D32),
        }
    }
}

/// Where and how large one line of centred text is drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextAnchor {
    /// Horizontal centre on the baseline.
    pub baseline: Point,
    /// Font size in pixels.
    pub size_px: f64,
}

/// Pixel geometry for one ranked slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementGeometry {
    /// Which standing this slot renders.
    pub rank: Rank,
    /// Podium block; its bottom edge is the canvas bottom.
    pub block: Rect,
    /// Ordinal label near the block bottom.
    pub label: TextAnchor,
    /// Portrait circle centre.
    pub portrait_center: Point,
    /// Portrait circle diameter.
    pub portrait_diameter: f64,
    /// Team badge circle centre.
    pub badge_center: Point,
    /// Team badge circle diameter.
    pub badge_diameter: f64,
    /// Medal disc centre.
    pub medal_center: Point,
    /// Medal disc radius.
    pub medal_radius: f64,
    /// Player name line.
    pub name: TextAnchor,
    /// Score line.
    pub score: TextAnchor,
}

/// Header text lines, centred horizontally.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeaderGeometry {
    /// Tournament name.
    pub title: TextAnchor,
    /// Formatted date.
    pub date: TextAnchor,
    /// Website URL.
    pub website: TextAnchor,
}

/// Complete geometry for one canvas size.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PodiumLayout {
    /// Canvas the geometry was computed for.
    pub canvas: Canvas,
    /// Uniform scale from the 1400x1000 reference frame.
    pub scale: f64,
    /// Width of circle borders (half of it shows outside the circle).
    pub border_width: f64,
    /// Header lines.
    pub header: HeaderGeometry,
    /// One entry per rank, index 0 = 1st place.
    pub slots: [PlacementGeometry; 3],
}

// Reference-frame constants (1400x1000). Vertical offsets are measured up from the canvas bottom.
const PODIUM_WIDTH: f64 = 250.0;
const PODIUM_GAP: f64 = 5.0;
const PODIUM_LEFT: f64 = 400.0;
const BLOCK_INSET: f64 = 75.0;
const CENTER_OFFSET: f64 = 50.0;
const BLOCK_HEIGHTS: [f64; 3] = [200.0, 140.0, 80.0];

const PORTRAIT_LIFT: f64 = 220.0;
const PORTRAIT_DIAMETER: f64 = 200.0;
const BADGE_OFFSET_X: f64 = 120.0;
const BADGE_LIFT: f64 = 300.0;
const BADGE_DIAMETER: f64 = 60.0;
const MEDAL_LIFT: f64 = 410.0;
const MEDAL_RADIUS: f64 = 42.0;
const NAME_LIFT: f64 = 60.0;
const SCORE_LIFT: f64 = 30.0;
const LABEL_LIFT: f64 = 20.0;
const BORDER_WIDTH: f64 = 10.0;

const TITLE_Y: f64 = 80.0;
const DATE_Y: f64 = 120.0;
const WEBSITE_Y: f64 = 160.0;

const TITLE_SIZE: f64 = 48.0;
const SUBTITLE_SIZE: f64 = 24.0;
const NAME_SIZE: f64 = 32.0;
const SCORE_SIZE: f64 = 24.0;
const LABEL_SIZE: f64 = 48.0;

/// Left anchor of each rank's column: 1st in the centre, 2nd left, 3rd right.
fn column_anchor(rank: Rank) -> f64 {
    match rank {
        Rank::First => PODIUM_LEFT + PODIUM_WIDTH + PODIUM_GAP,
        Rank::Second => PODIUM_LEFT,
        Rank::Third => PODIUM_LEFT + 2.0 * (PODIUM_WIDTH + PODIUM_GAP),
    }
}

/// Maps reference-frame coordinates onto the target canvas.
#[derive(Clone, Copy, Debug)]
struct RefFrame {
    scale: f64,
    offset_x: f64,
    height: f64,
}

impl RefFrame {
    fn new(canvas: Canvas) -> Self {
        let reference = Canvas::REFERENCE;
        let sx = f64::from(canvas.width) / f64::from(reference.width);
        let sy = f64::from(canvas.height) / f64::from(reference.height);
        let scale = sx.min(sy);
        Self {
            scale,
            offset_x: (f64::from(canvas.width) - f64::from(reference.width) * scale) / 2.0,
            height: f64::from(canvas.height),
        }
    }

    fn x(self, x_ref: f64) -> f64 {
        self.offset_x + x_ref * self.scale
    }

    fn above_bottom(self, lift_ref: f64) -> f64 {
        self.height - lift_ref * self.scale
    }

    fn from_top(self, y_ref: f64) -> f64 {
        y_ref * self.scale
    }

    fn len(self, v_ref: f64) -> f64 {
        v_ref * self.scale
    }

    fn text(self, x_ref: f64, y: f64, size_ref: f64) -> TextAnchor {
        TextAnchor {
            baseline: Point::new(self.x(x_ref), y),
            size_px: self.len(size_ref),
        }
    }
}

/// Compute the podium geometry for `canvas`.
///
/// The result depends only on the canvas size; it is safe to cache and compare.
pub fn compute_layout(canvas: Canvas) -> PodiumResult<PodiumLayout> {
    canvas.validate()?;
    let f = RefFrame::new(canvas);
    let center_x = f64::from(Canvas::REFERENCE.width) / 2.0;

    let header = HeaderGeometry {
        title: f.text(center_x, f.from_top(TITLE_Y), TITLE_SIZE),
        date: f.text(center_x, f.from_top(DATE_Y), SUBTITLE_SIZE),
        website: f.text(center_x, f.from_top(WEBSITE_Y), SUBTITLE_SIZE),
    };

    let slots = Rank::ALL.map(|rank| slot_geometry(f, rank));

    Ok(PodiumLayout {
        canvas,
        scale: f.scale,
        border_width: f.len(BORDER_WIDTH),
        header,
        slots,
    })
}

fn slot_geometry(f: RefFrame, rank: Rank) -> PlacementGeometry {
    let anchor = column_anchor(rank);
    let h = BLOCK_HEIGHTS[rank.index()];
    let cx = anchor + CENTER_OFFSET;

    let block_left = anchor - BLOCK_INSET;
    let block = Rect::new(
        f.x(block_left),
        f.above_bottom(h),
        f.x(block_left + PODIUM_WIDTH),
        f.height,
    );

    PlacementGeometry {
        rank,
        block,
        label: f.text(cx, f.above_bottom(LABEL_LIFT), LABEL_SIZE),
        portrait_center: Point::new(f.x(cx), f.above_bottom(h + PORTRAIT_LIFT)),
        portrait_diameter: f.len(PORTRAIT_DIAMETER),
        badge_center: Point::new(f.x(anchor + BADGE_OFFSET_X), f.above_bottom(h + BADGE_LIFT)),
        badge_diameter: f.len(BADGE_DIAMETER),
        medal_center: Point::new(f.x(cx), f.above_bottom(h + MEDAL_LIFT)),
        medal_radius: f.len(MEDAL_RADIUS),
        name: f.text(cx, f.above_bottom(h + NAME_LIFT), NAME_SIZE),
        score: f.text(cx, f.above_bottom(h + SCORE_LIFT), SCORE_SIZE),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/podium.rs"]
mod tests;
