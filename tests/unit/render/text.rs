use super::*;
use crate::foundation::core::Canvas;

fn fixture(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures/fonts")
        .join(name)
}

fn fixture_fonts() -> FontSet {
    FontSet::load(
        &fixture("DejaVuSans.ttf"),
        Some(&fixture("DejaVuSans-Bold.ttf")),
    )
    .unwrap()
}

const BLACK: Rgba8Premul = Rgba8Premul::opaque(0, 0, 0);

/// Bounding box `(x0, y0, x1, y1)` of pixels with visible alpha, inclusive.
fn ink_bounds(pixels: &[u8], width: u32) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for (i, px) in pixels.chunks_exact(4).enumerate() {
        if px[3] < 64 {
            continue;
        }
        let (x, y) = (i as u32 % width, i as u32 / width);
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }
    bounds
}

fn draw_line(text: &str, anchor: Point, size_px: f64, weight: TextWeight) -> Vec<u8> {
    let mut surface = Surface::new(Canvas::new(400, 200).unwrap()).unwrap();
    let mut painter = TextPainter::new(&fixture_fonts()).unwrap();
    painter
        .draw(
            &mut surface,
            &TextDraw {
                text,
                anchor,
                size_px,
                weight,
                color: BLACK,
            },
        )
        .unwrap();
    surface.finish()
}

#[test]
fn garbage_font_bytes_are_a_render_error() {
    let fonts = FontSet::from_bytes(b"not a font".to_vec(), b"nope".to_vec());
    let err = TextPainter::new(&fonts).err().unwrap();
    assert!(err.to_string().contains("render error:"));
}

#[test]
fn missing_font_file_is_a_config_error() {
    let err = FontSet::load(Path::new("does/not/exist.ttf"), None).unwrap_err();
    assert!(err.to_string().contains("config error:"));
}

#[test]
fn debug_hides_font_bytes() {
    let fonts = FontSet::from_bytes(vec![0; 3], vec![0; 5]);
    let s = format!("{fonts:?}");
    assert!(s.contains("regular_len: 3"));
    assert!(s.contains("bold_len: 5"));
}

#[test]
fn layout_width_grows_with_text() {
    let mut painter = TextPainter::new(&fixture_fonts()).unwrap();

    let short = painter
        .layout("Ada", 32.0, TextWeight::Bold, BLACK)
        .unwrap();
    let long = painter
        .layout("Ada Lovelace", 32.0, TextWeight::Bold, BLACK)
        .unwrap();
    assert!(long.width() > short.width());
    assert!(painter
        .layout("x", 0.0, TextWeight::Regular, BLACK)
        .is_err());
}

#[test]
fn line_is_centred_on_anchor_and_sits_on_baseline() {
    let anchor = Point::new(200.0, 100.0);
    let pixels = draw_line("HIH HIH", anchor, 40.0, TextWeight::Bold);
    let (x0, y0, x1, y1) = ink_bounds(&pixels, 400).expect("text left no ink");

    // Glyphs advance along the line instead of piling up on one pen position.
    assert!(x1 - x0 > 120, "ink x=[{x0},{x1}] too narrow");
    let centre = f64::from(x0 + x1) / 2.0;
    assert!((centre - 200.0).abs() <= 4.0, "ink centre {centre}");

    // Capitals without descenders: ink ends on the baseline, cap height above it.
    assert!((99..=101).contains(&y1), "ink bottom {y1}");
    assert!((65..=80).contains(&y0), "ink top {y0}");
}

#[test]
fn regular_and_bold_lines_both_render() {
    let anchor = Point::new(200.0, 100.0);
    let regular = draw_line("Podium", anchor, 24.0, TextWeight::Regular);
    let bold = draw_line("Podium", anchor, 24.0, TextWeight::Bold);
    let ink = |px: &[u8]| px.chunks_exact(4).filter(|p| p[3] >= 64).count();
    assert!(ink(&regular) > 0);
    assert!(ink(&bold) > ink(&regular));
}

#[test]
fn blank_text_draws_nothing() {
    let pixels = draw_line("   ", Point::new(200.0, 100.0), 24.0, TextWeight::Regular);
    assert_eq!(ink_bounds(&pixels, 400), None);
}

#[test]
fn system_fonts_are_cached_and_usable() {
    let Some(fonts) = FontSet::system() else {
        return;
    };
    assert!(TextPainter::new(&fonts).is_ok());
    let again = FontSet::system().unwrap();
    assert!(Arc::ptr_eq(&fonts.regular, &again.regular));
}
