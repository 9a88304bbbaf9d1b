//! The item composer: stacks rows into a single raster, rotated and laid over
//! an optional background. The raster is what the tiler repeats.

use crate::canvas::{pixel_extent, pixmap_from_image, transformed, Canvas};
use crate::colour::Colour;
use crate::mark::MeasureContext;
use crate::paint::Paint;
use crate::rect::Rect;
use crate::row::{Row, RowLayout};
use crate::transform::Transform;
use crate::units::Px;
use crate::WatermarkError;
use image::RgbaImage;
use tiny_skia::Pixmap;

/// Horizontal alignment of rows narrower than the widest row
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum ItemGravity {
    Left,
    #[default]
    Center,
    Right,
}

/// How a background image is sized
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum BackgroundScale {
    Factor(f32),
    /// Scale so the (rotated) image's longest side matches the item raster's
    /// shortest side
    Fit,
}

/// An image drawn centred behind the item's rows
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundImage {
    pub image: RgbaImage,
    pub alpha: u8,
    /// Absolute rotation in degrees. `None` lets the image turn with the item.
    pub rotation: Option<f32>,
    pub scale: BackgroundScale,
}

impl BackgroundImage {
    pub fn new(image: RgbaImage) -> BackgroundImage {
        BackgroundImage {
            image,
            alpha: 255,
            rotation: None,
            scale: BackgroundScale::Factor(1.0),
        }
    }

    pub fn alpha(mut self, alpha: u8) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn rotation(mut self, degrees: f32) -> Self {
        self.rotation = Some(degrees);
        self
    }

    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = BackgroundScale::Factor(scale);
        self
    }

    pub fn fit(mut self) -> Self {
        self.scale = BackgroundScale::Fit;
        self
    }

    fn needs_transform(&self) -> bool {
        self.rotation.is_some() || self.scale != BackgroundScale::Factor(1.0)
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub enum Background {
    #[default]
    None,
    /// Fills the whole item raster, corners included
    Colour(Colour),
    Image(BackgroundImage),
}

impl From<Colour> for Background {
    fn from(colour: Colour) -> Self {
        Background::Colour(colour)
    }
}

impl From<BackgroundImage> for Background {
    fn from(image: BackgroundImage) -> Self {
        Background::Image(image)
    }
}

/// Item-wide configuration
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ItemStyle {
    /// Degrees clockwise
    pub rotation: f32,
    /// Vertical space between consecutive rows
    pub row_spacing: Px,
    /// Horizontal space between consecutive marks of a row
    pub column_spacing: Px,
    pub gravity: ItemGravity,
    pub background: Background,
}

/// The measured geometry of an [`Item`]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ItemLayout {
    pub rows: Vec<RowLayout>,
    /// Width of the unrotated content
    pub width: f32,
    /// Height of the unrotated content
    pub height: f32,
}

impl ItemLayout {
    /// Pixel size of the raster that holds the content rotated by `degrees`
    pub fn raster_size(&self, degrees: f32) -> (u32, u32) {
        if self.width <= 0.0 || self.height <= 0.0 {
            return (0, 0);
        }
        let bounds = Transform::rotate_about(degrees, self.width / 2.0, self.height / 2.0)
            .map_rect(&Rect::from_size(self.width, self.height));
        (pixel_extent(bounds.width()), pixel_extent(bounds.height()))
    }
}

/// Rows composed into one cached raster.
pub struct Item {
    rows: Vec<Row>,
    style: ItemStyle,
    raster: Option<Pixmap>,
    composed: bool,
}

impl Item {
    pub fn new(rows: Vec<Row>, style: ItemStyle) -> Item {
        Item {
            rows,
            style,
            raster: None,
            composed: false,
        }
    }

    pub fn style(&self) -> &ItemStyle {
        &self.style
    }

    /// Measure every row. A row without a valid mark is zero high but still
    /// takes its share of row spacing.
    pub fn layout(&mut self, ctx: &MeasureContext<'_>) -> ItemLayout {
        let column_spacing = self.style.column_spacing.0;
        let rows: Vec<RowLayout> = self
            .rows
            .iter_mut()
            .map(|row| row.layout(ctx, column_spacing))
            .collect();

        let gaps = rows.len().saturating_sub(1) as f32;
        ItemLayout {
            width: rows.iter().map(|r| r.width).fold(0.0, f32::max),
            height: rows.iter().map(|r| r.height).sum::<f32>() + self.style.row_spacing.0 * gaps,
            rows,
        }
    }

    /// The composed raster, rendered on first use. `None` when the item has
    /// nothing to draw.
    pub fn raster(&mut self, ctx: &MeasureContext<'_>) -> Result<Option<&Pixmap>, WatermarkError> {
        if !self.composed {
            self.raster = self.compose(ctx)?;
            self.composed = true;
        }
        Ok(self.raster.as_ref())
    }

    /// Drop the cached raster so the next call to [`raster`](Item::raster)
    /// renders again
    pub fn invalidate(&mut self) {
        self.raster = None;
        self.composed = false;
    }

    fn compose(&mut self, ctx: &MeasureContext<'_>) -> Result<Option<Pixmap>, WatermarkError> {
        let layout = self.layout(ctx);
        let (width, height) = layout.raster_size(self.style.rotation);
        if width == 0 || height == 0 {
            log::debug!("item has no visible marks, nothing to compose");
            return Ok(None);
        }
        log::debug!(
            "composing {} rows into a {width}x{height} item ({}x{} rotated {}°)",
            layout.rows.len(),
            layout.width,
            layout.height,
            self.style.rotation
        );

        let mut canvas = Canvas::new(width, height)?;
        let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
        canvas.save();
        canvas.rotate_about(self.style.rotation, cx, cy);
        self.paint_background(&mut canvas)?;

        canvas.translate(
            (width as f32 - layout.width) / 2.0,
            (height as f32 - layout.height) / 2.0,
        );
        let mut paint = Paint::default();
        let column_spacing = self.style.column_spacing.0;
        let mut top = 0.0;
        for (row, row_layout) in self.rows.iter().zip(&layout.rows) {
            let x = match self.style.gravity {
                ItemGravity::Left => 0.0,
                ItemGravity::Center => (layout.width - row_layout.width) / 2.0,
                ItemGravity::Right => layout.width - row_layout.width,
            };
            row.paint(&mut canvas, &mut paint, row_layout, x, top, column_spacing)?;
            top += row_layout.height + self.style.row_spacing.0;
        }
        canvas.restore();
        Ok(Some(canvas.into_pixmap()))
    }

    /// Paint the background. Expects the canvas to be rotated about its centre
    /// by the item rotation.
    fn paint_background(&self, canvas: &mut Canvas) -> Result<(), WatermarkError> {
        match &self.style.background {
            Background::None => Ok(()),
            Background::Colour(colour) => {
                canvas.fill_colour(*colour);
                Ok(())
            }
            Background::Image(background) => {
                let Some(raster) = pixmap_from_image(&background.image) else {
                    return Ok(());
                };
                let raster = if background.needs_transform() {
                    let matrix = self.background_matrix(
                        background,
                        raster.width() as f32,
                        raster.height() as f32,
                        canvas.width() as f32,
                        canvas.height() as f32,
                    );
                    match transformed(&raster, &matrix)? {
                        Some(copy) => copy,
                        None => return Ok(()),
                    }
                } else {
                    raster
                };
                let x = (canvas.width() as f32 - raster.width() as f32) / 2.0;
                let y = (canvas.height() as f32 - raster.height() as f32) / 2.0;
                canvas.draw_pixmap(&raster, x, y, &Paint::default().with_alpha(background.alpha));
                Ok(())
            }
        }
    }

    /// Scale about the image centre, then rotate it so that once the item's
    /// own rotation is applied it ends up at its absolute angle
    fn background_matrix(
        &self,
        background: &BackgroundImage,
        width: f32,
        height: f32,
        raster_width: f32,
        raster_height: f32,
    ) -> Transform {
        let scale = match background.scale {
            BackgroundScale::Factor(scale) => scale,
            BackgroundScale::Fit => {
                let turned = Transform::rotate_about(background.rotation.unwrap_or(0.0), width / 2.0, height / 2.0)
                    .map_rect(&Rect::from_size(width, height));
                raster_width.min(raster_height) / turned.width().max(turned.height())
            }
        };
        let delta = background
            .rotation
            .map(|degrees| degrees - self.style.rotation)
            .unwrap_or(0.0);
        Transform::translate(-width / 2.0, -height / 2.0)
            .with_scale(scale, scale)
            .with_rotate(delta)
            .with_translate(width / 2.0, height / 2.0)
    }
}
