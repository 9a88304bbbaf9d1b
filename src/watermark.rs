use crate::canvas::image_from_pixmap;
use crate::font::Typeface;
use crate::item::{Background, Item, ItemGravity, ItemLayout, ItemStyle};
use crate::mark::MeasureContext;
use crate::resources::Resources;
use crate::row::Row;
use crate::size::Size;
use crate::tile::{CanvasGravity, Repeat, Tiling};
use crate::units::Px;
use crate::WatermarkError;
use image::RgbaImage;
use std::sync::Arc;

/// A configured watermark: rows of marks composed into an item, tiled over a
/// destination.
///
/// The composed image is cached; [`make`](Watermark::make) only does work the
/// first time it is called, or after [`recycle`](Watermark::recycle).
///
/// # Example
///
/// ```
/// use watermark_gen::{CanvasGravity, ImageMark, Repeat, Row, Size, Watermark};
/// use image::{Rgba, RgbaImage};
///
/// let logo = RgbaImage::from_pixel(16, 16, Rgba([255, 255, 255, 128]));
/// let mut watermark = Watermark::builder(Size::fixed(200, 100))
///     .row(Row::new().mark(ImageMark::new(logo)))
///     .item_rotation(-30.0)
///     .canvas_gravity(CanvasGravity::LeftTop)
///     .repeat(Repeat::Odd)
///     .build();
/// let image = watermark.make().unwrap();
/// assert_eq!(image.dimensions(), (200, 100));
/// ```
pub struct Watermark {
    size: Size,
    item: Item,
    tiling: Tiling,
    resources: Resources,
    font: Option<Arc<dyn Typeface>>,
    output: Option<RgbaImage>,
}

impl Watermark {
    pub fn builder(size: Size) -> WatermarkBuilder {
        WatermarkBuilder::new(size)
    }

    pub fn size(&self) -> &Size {
        &self.size
    }

    pub fn tiling(&self) -> &Tiling {
        &self.tiling
    }

    pub fn item_style(&self) -> &ItemStyle {
        self.item.style()
    }

    /// Measure the item without composing it
    pub fn layout(&mut self) -> ItemLayout {
        let ctx = MeasureContext {
            resources: &self.resources,
            font: self.font.as_ref(),
        };
        self.item.layout(&ctx)
    }

    /// Compose the watermark. Degenerate destinations or items give an empty
    /// (0x0) image rather than an error.
    pub fn make(&mut self) -> Result<&RgbaImage, WatermarkError> {
        let output = match self.output.take() {
            Some(output) => output,
            None => self.compose()?,
        };
        Ok(self.output.insert(output))
    }

    fn compose(&mut self) -> Result<RgbaImage, WatermarkError> {
        let ctx = MeasureContext {
            resources: &self.resources,
            font: self.font.as_ref(),
        };
        if self.size.is_compute() {
            return Ok(match self.item.raster(&ctx)? {
                Some(item) => image_from_pixmap(item),
                None => RgbaImage::new(0, 0),
            });
        }
        match self.size.surface()? {
            Some(mut canvas) => {
                if let Some(item) = self.item.raster(&ctx)? {
                    self.tiling.compose(&mut canvas, item);
                }
                Ok(canvas.into_image())
            }
            None => {
                log::debug!("destination {:?} has no pixels", self.size.dimensions());
                Ok(RgbaImage::new(0, 0))
            }
        }
    }

    /// Drop the composed image and the item raster; the next
    /// [`make`](Watermark::make) composes from scratch
    pub fn recycle(&mut self) {
        self.output = None;
        self.item.invalidate();
    }
}

/// Builds a [`Watermark`]. Defaults: no rotation, no spacing between rows or
/// marks, centred rows, no background, a single copy centred on the origin,
/// and 12px gaps between copies once repeated.
pub struct WatermarkBuilder {
    size: Size,
    rows: Vec<Row>,
    style: ItemStyle,
    tiling: Tiling,
    resources: Resources,
    font: Option<Arc<dyn Typeface>>,
}

impl WatermarkBuilder {
    pub fn new(size: Size) -> WatermarkBuilder {
        WatermarkBuilder {
            size,
            rows: Vec::new(),
            style: ItemStyle::default(),
            tiling: Tiling::default(),
            resources: Resources::default(),
            font: None,
        }
    }

    pub fn row(mut self, row: Row) -> Self {
        self.rows.push(row);
        self
    }

    /// Typeface for text marks that do not set their own
    pub fn font(mut self, font: Arc<dyn Typeface>) -> Self {
        self.font = Some(font);
        self
    }

    /// Where marks built from resource keys look their content up
    pub fn resources(mut self, resources: Resources) -> Self {
        self.resources = resources;
        self
    }

    pub fn item_rotation(mut self, degrees: f32) -> Self {
        self.style.rotation = degrees;
        self
    }

    pub fn row_spacing<S: Into<Px>>(mut self, spacing: S) -> Self {
        self.style.row_spacing = spacing.into();
        self
    }

    pub fn column_spacing<S: Into<Px>>(mut self, spacing: S) -> Self {
        self.style.column_spacing = spacing.into();
        self
    }

    pub fn item_gravity(mut self, gravity: ItemGravity) -> Self {
        self.style.gravity = gravity;
        self
    }

    pub fn background<B: Into<Background>>(mut self, background: B) -> Self {
        self.style.background = background.into();
        self
    }

    pub fn canvas_gravity(mut self, gravity: CanvasGravity) -> Self {
        self.tiling.gravity = gravity;
        self
    }

    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.tiling.repeat = repeat;
        self
    }

    /// Anchor of the single copy drawn when not repeating
    pub fn position<X: Into<Px>, Y: Into<Px>>(mut self, x: X, y: Y) -> Self {
        self.tiling.position = (x.into(), y.into());
        self
    }

    pub fn horizontal_gap<G: Into<Px>>(mut self, gap: G) -> Self {
        self.tiling.gap_x = gap.into();
        self
    }

    pub fn vertical_gap<G: Into<Px>>(mut self, gap: G) -> Self {
        self.tiling.gap_y = gap.into();
        self
    }

    pub fn build(self) -> Watermark {
        Watermark {
            size: self.size,
            item: Item::new(self.rows, self.style),
            tiling: self.tiling,
            resources: self.resources,
            font: self.font,
            output: None,
        }
    }
}
