use image::RgbaImage;
use std::sync::Arc;
use watermark_gen::{colours, Font, Px, Row, RowGravity, Size, TextMark, Typeface, Watermark};

fn mono() -> Font {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fonts/DejaVuSansMono.ttf");
    Font::load_from_disk(path).expect("can load test font")
}

/// Smallest box holding every pixel with any coverage, as (x1, y1, x2, y2)
fn ink(image: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
    image
        .enumerate_pixels()
        .filter(|(_, _, p)| p.0[3] > 0)
        .fold(None, |acc, (x, y, _)| match acc {
            None => Some((x, y, x, y)),
            Some((x1, y1, x2, y2)) => Some((x1.min(x), y1.min(y), x2.max(x), y2.max(y))),
        })
}

#[test]
fn metrics_are_y_down() {
    let font = mono();
    let m = font.metrics(Px(40.0));
    assert!(m.ascent < 0.0 && m.descent > 0.0, "{m:?}");
    assert!(m.top < 0.0 && m.bottom > 0.0, "{m:?}");
    assert!(m.span() > 0.0);
    assert!(m.extent() > 0.0);
}

#[test]
fn monospaced_advance_adds_up() {
    let font = mono();
    let one = font.advance("H", Px(40.0));
    assert!(one > 0.0);
    assert!((font.advance("Hgjy", Px(40.0)) - one * 4.0).abs() < 1e-3);
    assert!((font.advance("H", Px(20.0)) - one / 2.0).abs() < 1e-3);
}

#[test]
fn descenders_reach_below_the_baseline() {
    let font = mono();
    let capital = font.bounds("H", Px(40.0));
    assert!(capital.y1 < 0.0);
    assert!(capital.y2.abs() < 0.5, "{capital:?}");

    let tails = font.bounds("gjy", Px(40.0));
    assert!(tails.y2 > 0.0, "{tails:?}");
}

#[test]
fn outlines_sit_on_the_pen() {
    let font = mono();
    let path = font.outline("H", Px(40.0), 10.0, 100.0).expect("H is inked");
    let bounds = path.bounds();
    let glyph = font.bounds("H", Px(40.0));
    assert!((bounds.top() - (100.0 + glyph.y1)).abs() < 0.5, "{bounds:?}");
    assert!((bounds.bottom() - 100.0).abs() < 0.5, "{bounds:?}");
    assert!(bounds.left() >= 10.0);

    assert!(font.outline(" ", Px(40.0), 0.0, 0.0).is_none());
}

#[test]
fn rendered_text_stays_inside_its_mark() {
    let font: Arc<dyn Typeface> = Arc::new(mono());
    for gravity in [RowGravity::Top, RowGravity::Center, RowGravity::Bottom] {
        let mut watermark = Watermark::builder(Size::Compute)
            .font(font.clone())
            .row(
                Row::new().mark(
                    TextMark::new("Hgjy")
                        .size(40.0)
                        .colour(colours::WHITE)
                        .gravity(gravity),
                ),
            )
            .build();
        let layout = watermark.layout();
        assert!((layout.width - font.advance("Hgjy", Px(40.0))).abs() < 1e-3);
        assert!((layout.height - font.metrics(Px(40.0)).span()).abs() < 1e-3);

        let image = watermark.make().expect("composes");
        let (w, h) = image.dimensions();
        assert_eq!((w, h), (layout.width.ceil() as u32, layout.height.ceil() as u32));
        let (x1, y1, x2, y2) = ink(image).expect("text is inked");
        assert!(x1 > 0 && y1 > 0, "{gravity:?} ink starts at ({x1}, {y1})");
        assert!(x2 < w - 1 && y2 < h - 1, "{gravity:?} ink ends at ({x2}, {y2}) in {w}x{h}");
    }
}
