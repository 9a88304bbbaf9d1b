//! Marks are the atomic units of a watermark: a run of text or an image, each
//! with its own alignment, opacity, background, padding and shadow.
//!
//! A mark is measured lazily the first time its row is laid out, and the
//! measurement is kept for the lifetime of the mark. Marks that measure to
//! zero width or height (empty text, an image that could not be resolved)
//! are *invalid*: layout skips them and they are never drawn.
//!
//! # Example
//!
//! ```
//! use watermark_gen::{colours, ImageMark, Mark, Padding, RowGravity, TextMark};
//! use image::RgbaImage;
//!
//! let name: Mark = TextMark::new("dkzwm")
//!     .size(14.0)
//!     .colour(colours::WHITE)
//!     .gravity(RowGravity::Bottom)
//!     .into();
//! let avatar: Mark = ImageMark::new(RgbaImage::new(32, 32))
//!     .scale(0.5)
//!     .padding(Padding::all(4.0))
//!     .into();
//! ```

use crate::canvas::Canvas;
use crate::colour::{colours, Colour};
use crate::font::Typeface;
use crate::padding::Padding;
use crate::paint::{Paint, Shadow};
use crate::rect::Rect;
use crate::resources::Resources;
use crate::WatermarkError;
use std::sync::Arc;

/// Builder methods shared by every kind of mark
macro_rules! style_setters {
    () => {
        /// Vertical alignment of the mark within its row
        pub fn gravity(mut self, gravity: $crate::RowGravity) -> Self {
            self.style.gravity = gravity;
            self
        }

        /// Opacity of the mark's content, 0 (invisible) to 255 (opaque)
        pub fn alpha(mut self, alpha: u8) -> Self {
            self.style.alpha = alpha;
            self
        }

        /// Fill colour behind the mark, padding included
        pub fn background(mut self, colour: $crate::Colour) -> Self {
            self.style.background = colour;
            self
        }

        pub fn padding(mut self, padding: $crate::Padding) -> Self {
            self.style.padding = padding;
            self
        }

        pub fn shadow(mut self, shadow: $crate::Shadow) -> Self {
            self.style.shadow = Some(shadow);
            self
        }

        /// Paint the mark's box (and text) with this paint instead of the
        /// background colour and shadow
        pub fn override_paint(mut self, paint: $crate::Paint) -> Self {
            self.style.paint = Some(paint);
            self
        }
    };
}

mod image;
mod text;

pub use self::image::*;
pub use text::*;

/// Vertical alignment of a mark within the height of its row
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum RowGravity {
    Top,
    #[default]
    Center,
    Bottom,
}

/// The measured size of a mark, padding included
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Measure {
    pub width: f32,
    pub height: f32,
    /// Distance from the bottom of the content to the text baseline; zero for
    /// anything that is not text
    pub baseline: f32,
}

impl Measure {
    pub const ZERO: Measure = Measure {
        width: 0.0,
        height: 0.0,
        baseline: 0.0,
    };

    /// A mark is only laid out and drawn once it has a positive area
    pub fn is_valid(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Appearance shared by all marks
#[derive(Debug, Clone, PartialEq)]
pub struct MarkStyle {
    pub gravity: RowGravity,
    pub alpha: u8,
    pub background: Colour,
    pub padding: Padding,
    pub shadow: Option<Shadow>,
    pub paint: Option<Paint>,
}

impl Default for MarkStyle {
    fn default() -> Self {
        MarkStyle {
            gravity: RowGravity::Center,
            alpha: 255,
            background: colours::TRANSPARENT,
            padding: Padding::empty(),
            shadow: None,
            paint: None,
        }
    }
}

/// What a mark may consult while measuring itself
pub struct MeasureContext<'a> {
    pub resources: &'a Resources,
    /// Typeface for text marks that do not name their own
    pub font: Option<&'a Arc<dyn Typeface>>,
}

/// A text or image mark
pub enum Mark {
    Text(TextMark),
    Image(ImageMark),
}

impl Mark {
    pub fn style(&self) -> &MarkStyle {
        match self {
            Mark::Text(m) => &m.style,
            Mark::Image(m) => &m.style,
        }
    }

    pub fn gravity(&self) -> RowGravity {
        self.style().gravity
    }

    /// The cached measurement; zero until [`init`](Mark::init) has run
    pub fn measure(&self) -> Measure {
        match self {
            Mark::Text(m) => m.measure(),
            Mark::Image(m) => m.measure(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.measure().is_valid()
    }

    /// Resolve deferred content and measure the mark. Only the first call does
    /// any work.
    pub fn init(&mut self, ctx: &MeasureContext<'_>) -> Measure {
        match self {
            Mark::Text(m) => m.init(ctx),
            Mark::Image(m) => m.init(ctx),
        }
    }

    /// Draw the mark with its box's top-left corner at `(x, top)` inside a row
    /// `row_height` tall.
    ///
    /// This installs the mark's shadow on `paint`; the caller is expected to
    /// clear it before drawing the next mark.
    pub fn paint(
        &self,
        canvas: &mut Canvas,
        paint: &mut Paint,
        x: f32,
        top: f32,
        row_height: f32,
    ) -> Result<(), WatermarkError> {
        let measure = self.measure();
        if !measure.is_valid() {
            return Ok(());
        }
        paint_box(self.style(), &measure, canvas, paint, x, top);
        match self {
            Mark::Text(m) => {
                m.draw(canvas, paint, x, top, row_height);
                Ok(())
            }
            Mark::Image(m) => m.draw(canvas, paint, x, top),
        }
    }
}

impl From<TextMark> for Mark {
    fn from(mark: TextMark) -> Self {
        Mark::Text(mark)
    }
}

impl From<ImageMark> for Mark {
    fn from(mark: ImageMark) -> Self {
        Mark::Image(mark)
    }
}

/// Common first step of drawing any mark: the override paint fills the box,
/// otherwise the shadow is installed and the background colour fills the box
fn paint_box(
    style: &MarkStyle,
    measure: &Measure,
    canvas: &mut Canvas,
    paint: &mut Paint,
    x: f32,
    top: f32,
) {
    let bounds = Rect::from_xywh(x, top, measure.width, measure.height);
    match &style.paint {
        Some(over) => canvas.fill_rect(bounds, over),
        None => {
            paint.set_shadow(style.shadow);
            if !style.background.is_transparent() {
                canvas.fill_rect(bounds, &paint.with_colour(style.background));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{solid, BlockFace};

    fn context<'a>(resources: &'a Resources, font: Option<&'a Arc<dyn Typeface>>) -> MeasureContext<'a> {
        MeasureContext { resources, font }
    }

    #[test]
    fn invalid_marks_are_not_painted() {
        let resources = Resources::new();
        let mut mark: Mark = TextMark::new("").background(colours::RED).into();
        assert!(!mark.init(&context(&resources, None)).is_valid());

        let mut canvas = Canvas::new(4, 4).expect("allocates");
        let mut paint = Paint::default();
        mark.paint(&mut canvas, &mut paint, 0.0, 0.0, 4.0).expect("draws");
        assert!(canvas.into_image().pixels().all(|p| p.0[3] == 0));
    }

    #[test]
    fn paint_installs_the_mark_shadow() {
        let resources = Resources::new();
        let shadow = Shadow::new(2.0, 1.0, 1.0, colours::BLACK);
        let mut mark: Mark = ImageMark::new(solid(2, 2, [255, 0, 0, 255]))
            .shadow(shadow)
            .into();
        mark.init(&context(&resources, None));

        let mut canvas = Canvas::new(8, 8).expect("allocates");
        let mut paint = Paint::default();
        mark.paint(&mut canvas, &mut paint, 2.0, 2.0, 2.0).expect("draws");
        assert_eq!(paint.shadow, Some(shadow));
    }

    #[test]
    fn override_paint_fills_the_box_and_skips_the_shadow() {
        let resources = Resources::new();
        let face: Arc<dyn Typeface> = Arc::new(BlockFace::new());
        let mut mark: Mark = TextMark::new("ab")
            .size(20.0)
            .shadow(Shadow::new(2.0, 1.0, 1.0, colours::BLACK))
            .override_paint(Paint::new(colours::BLUE))
            .into();
        let measure = mark.init(&context(&resources, Some(&face)));
        assert_eq!((measure.width, measure.height), (20.0, 20.0));

        let mut canvas = Canvas::new(20, 20).expect("allocates");
        let mut paint = Paint::default();
        mark.paint(&mut canvas, &mut paint, 0.0, 0.0, 20.0).expect("draws");
        assert_eq!(paint.shadow, None);
        let image = canvas.into_image();
        assert_eq!(image.get_pixel(0, 0).0, [0, 0, 255, 255]);
        assert_eq!(image.get_pixel(19, 19).0, [0, 0, 255, 255]);
    }

    #[test]
    fn background_covers_padding() {
        let resources = Resources::new();
        let mut mark: Mark = ImageMark::new(solid(4, 4, [255, 0, 0, 255]))
            .padding(Padding::all(2.0))
            .background(colours::BLUE)
            .into();
        let measure = mark.init(&context(&resources, None));
        assert_eq!((measure.width, measure.height), (8.0, 8.0));

        let mut canvas = Canvas::new(8, 8).expect("allocates");
        let mut paint = Paint::default();
        mark.paint(&mut canvas, &mut paint, 0.0, 0.0, 8.0).expect("draws");
        let image = canvas.into_image();
        assert_eq!(image.get_pixel(7, 7).0, [0, 0, 255, 255]);
        assert_eq!(image.get_pixel(1, 1).0, [255, 0, 0, 255]);
    }
}
