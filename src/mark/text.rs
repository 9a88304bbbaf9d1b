use super::{Measure, MarkStyle, MeasureContext, RowGravity};
use crate::canvas::Canvas;
use crate::colour::{colours, Colour};
use crate::font::{FontMetrics, Typeface};
use crate::paint::Paint;
use crate::resources::Source;
use crate::units::Px;
use std::sync::Arc;

/// Resolved content, kept once the mark has been measured
struct TextLayout {
    text: String,
    face: Arc<dyn Typeface>,
    metrics: FontMetrics,
}

/// A single line of text drawn in one size, colour and typeface.
pub struct TextMark {
    pub(crate) style: MarkStyle,
    text: Source<String>,
    size: Px,
    colour: Colour,
    face: Option<Arc<dyn Typeface>>,
    layout: Option<TextLayout>,
    measured: Option<Measure>,
}

impl TextMark {
    pub fn new<S: Into<String>>(text: S) -> TextMark {
        TextMark::from_source(Source::Inline(text.into()))
    }

    /// Text looked up in the watermark's string resources when first measured
    pub fn from_resource<K: Into<String>>(key: K) -> TextMark {
        TextMark::from_source(Source::Resource(key.into()))
    }

    fn from_source(text: Source<String>) -> TextMark {
        TextMark {
            style: MarkStyle::default(),
            text,
            size: Px(22.0),
            colour: colours::WHITE,
            face: None,
            layout: None,
            measured: None,
        }
    }

    /// Font size, 22px unless set
    pub fn size<S: Into<Px>>(mut self, size: S) -> Self {
        self.size = size.into();
        self
    }

    /// Text colour, white unless set. The mark's alpha replaces the alpha of
    /// this colour when drawing.
    pub fn colour(mut self, colour: Colour) -> Self {
        self.colour = colour;
        self
    }

    /// The typeface to draw with; marks without one use the watermark's font
    pub fn font(mut self, face: Arc<dyn Typeface>) -> Self {
        self.face = Some(face);
        self
    }

    style_setters!();

    pub(crate) fn measure(&self) -> Measure {
        self.measured.unwrap_or(Measure::ZERO)
    }

    pub(crate) fn init(&mut self, ctx: &MeasureContext<'_>) -> Measure {
        if let Some(measured) = self.measured {
            return measured;
        }
        let measured = match self.resolve(ctx) {
            Some(layout) => {
                let padding = &self.style.padding;
                let measured = Measure {
                    width: layout.face.advance(&layout.text, self.size) + padding.horizontal(),
                    height: layout.metrics.span() + padding.vertical(),
                    baseline: layout.metrics.descent,
                };
                self.layout = Some(layout);
                measured
            }
            None => Measure::ZERO,
        };
        self.measured = Some(measured);
        measured
    }

    fn resolve(&self, ctx: &MeasureContext<'_>) -> Option<TextLayout> {
        let text = match &self.text {
            Source::Inline(text) => text.clone(),
            Source::Resource(key) => ctx.resources.string(key)?,
        };
        if text.is_empty() {
            return None;
        }
        let Some(face) = self.face.clone().or_else(|| ctx.font.cloned()) else {
            log::warn!("text mark {text:?} has no typeface and will not be drawn");
            return None;
        };
        let metrics = face.metrics(self.size);
        Some(TextLayout {
            text,
            face,
            metrics,
        })
    }

    /// Where the baseline sits for a mark whose box starts at `top` in a row
    /// `row_height` tall
    fn baseline_y(&self, layout: &TextLayout, top: f32, row_height: f32) -> f32 {
        let metrics = &layout.metrics;
        let y = if self.style.gravity == RowGravity::Center {
            let content = self.measure().height - self.style.padding.vertical();
            // the centre of the mark's box, measured from the row's top
            let centre = top + row_height / 2.0 - (row_height - content) / 2.0;
            let ink = layout.face.bounds(&layout.text, self.size);
            if ink.height() > metrics.span() {
                centre + metrics.extent() / 2.0 - metrics.bottom
            } else {
                centre + metrics.span() / 2.0 - metrics.descent
            }
        } else {
            top - metrics.ascent
        };
        y + self.style.padding.top.0
    }

    pub(crate) fn draw(&self, canvas: &mut Canvas, paint: &Paint, x: f32, top: f32, row_height: f32) {
        let Some(layout) = &self.layout else {
            return;
        };
        let text_paint = match &self.style.paint {
            Some(over) => over.clone(),
            None => paint.with_colour(self.colour.with_alpha(self.style.alpha)),
        };
        let baseline = self.baseline_y(layout, top, row_height);
        canvas.draw_text(
            &*layout.face,
            &layout.text,
            self.size,
            x - self.style.padding.left.0,
            baseline,
            &text_paint,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::padding::Padding;
    use crate::resources::Resources;
    use crate::testing::BlockFace;

    fn measure(mark: &mut TextMark, font: Option<Arc<dyn Typeface>>) -> Measure {
        let resources = Resources::new().with_string("nickname", "dkzwm");
        mark.init(&MeasureContext {
            resources: &resources,
            font: font.as_ref(),
        })
    }

    fn block() -> Option<Arc<dyn Typeface>> {
        Some(Arc::new(BlockFace::new()))
    }

    #[test]
    fn size_includes_padding() {
        let mut mark = TextMark::new("abc")
            .size(20.0)
            .padding(Padding::ltrb(2.0, 3.0, 4.0, 5.0));
        let m = measure(&mut mark, block());
        assert_eq!((m.width, m.height, m.baseline), (36.0, 28.0, 5.0));
    }

    #[test]
    fn empty_or_faceless_text_is_invalid() {
        assert!(!measure(&mut TextMark::new(""), block()).is_valid());
        assert!(!measure(&mut TextMark::new("abc"), None).is_valid());
        assert!(!measure(&mut TextMark::from_resource("missing"), block()).is_valid());
    }

    #[test]
    fn own_font_wins_over_the_default() {
        let mut mark = TextMark::new("ab").size(20.0).font(Arc::new(BlockFace {
            advance: 1.0,
            ..BlockFace::new()
        }));
        assert_eq!(measure(&mut mark, block()).width, 40.0);
    }

    #[test]
    fn resource_text_is_resolved_once() {
        let mut mark = TextMark::from_resource("nickname").size(20.0);
        let first = measure(&mut mark, block());
        assert_eq!(first.width, 50.0);
        // a second context without the resource does not change anything
        let second = mark.init(&MeasureContext {
            resources: &Resources::new(),
            font: None,
        });
        assert_eq!(first, second);
    }

    #[test]
    fn centred_baseline_uses_the_line_box() {
        let mut mark = TextMark::new("a").size(20.0);
        measure(&mut mark, block());
        let layout = mark.layout.as_ref().expect("measured");
        assert_eq!(mark.baseline_y(layout, 0.0, 20.0), 15.0);
        assert_eq!(mark.baseline_y(layout, 10.0, 20.0), 25.0);
    }

    #[test]
    fn centred_baseline_uses_the_ink_box_when_it_is_taller() {
        let mut mark = TextMark::new("a").size(20.0);
        measure(&mut mark, Some(Arc::new(BlockFace::tall_ink())));
        let layout = mark.layout.as_ref().expect("measured");
        // extent 28, bottom 8: 10 + 14 - 8
        assert_eq!(mark.baseline_y(layout, 0.0, 20.0), 16.0);
    }

    #[test]
    fn top_and_bottom_gravity_hang_from_the_ascent() {
        let mut mark = TextMark::new("a")
            .size(20.0)
            .gravity(RowGravity::Bottom)
            .padding(Padding::trbl(4.0, 0.0, 0.0, 0.0));
        measure(&mut mark, block());
        let layout = mark.layout.as_ref().expect("measured");
        assert_eq!(mark.baseline_y(layout, 6.0, 40.0), 25.0);
    }

    #[test]
    fn text_is_drawn_in_the_mark_colour() {
        let mut mark = TextMark::new("a").size(20.0).colour(colours::RED);
        measure(&mut mark, block());
        let mut canvas = Canvas::new(20, 20).expect("allocates");
        mark.draw(&mut canvas, &Paint::default(), 0.0, 0.0, 20.0);
        // glyph block spans x 1..9 and y 1..17 with the baseline at 15
        let image = canvas.into_image();
        assert_eq!(image.get_pixel(5, 10).0, [255, 0, 0, 255]);
        assert_eq!(image.get_pixel(15, 10).0[3], 0);
    }
}
