use super::{Measure, MarkStyle, MeasureContext};
use crate::canvas::{pixmap_from_image, transformed, Canvas};
use crate::paint::Paint;
use crate::rect::Rect;
use crate::resources::Source;
use crate::transform::Transform;
use crate::WatermarkError;
use image::RgbaImage;
use tiny_skia::Pixmap;

/// A bitmap, optionally scaled down and rotated about its centre.
pub struct ImageMark {
    pub(crate) style: MarkStyle,
    image: Source<RgbaImage>,
    scale: f32,
    rotation: f32,
    raster: Option<Pixmap>,
    measured: Option<Measure>,
}

impl ImageMark {
    pub fn new(image: RgbaImage) -> ImageMark {
        ImageMark::from_source(Source::Inline(image))
    }

    /// An image looked up in the watermark's image resources when first
    /// measured
    pub fn from_resource<K: Into<String>>(key: K) -> ImageMark {
        ImageMark::from_source(Source::Resource(key.into()))
    }

    fn from_source(image: Source<RgbaImage>) -> ImageMark {
        ImageMark {
            style: MarkStyle::default(),
            image,
            scale: 1.0,
            rotation: 0.0,
            raster: None,
            measured: None,
        }
    }

    /// Shrink the image by `scale`, which is clamped to `0.0..=1.0`
    pub fn scale(mut self, scale: f32) -> Self {
        self.scale = if scale.is_nan() { 1.0 } else { scale.clamp(0.0, 1.0) };
        self
    }

    /// Rotate the image about its centre, in degrees clockwise
    pub fn rotation(mut self, degrees: f32) -> Self {
        self.rotation = degrees;
        self
    }

    style_setters!();

    fn needs_transform(&self) -> bool {
        self.scale < 1.0 || self.rotation % 360.0 != 0.0
    }

    /// Scale then rotate about the centre of a `width` x `height` image
    fn matrix(&self, width: f32, height: f32) -> Transform {
        Transform::translate(-width / 2.0, -height / 2.0)
            .with_scale(self.scale, self.scale)
            .with_rotate(self.rotation)
            .with_translate(width / 2.0, height / 2.0)
    }

    pub(crate) fn measure(&self) -> Measure {
        self.measured.unwrap_or(Measure::ZERO)
    }

    pub(crate) fn init(&mut self, ctx: &MeasureContext<'_>) -> Measure {
        if let Some(measured) = self.measured {
            return measured;
        }
        let raster = match &self.image {
            Source::Inline(image) => pixmap_from_image(image),
            Source::Resource(key) => ctx.resources.image(key).and_then(|i| pixmap_from_image(&i)),
        };
        let measured = match &raster {
            Some(raster) => {
                let (w, h) = (raster.width() as f32, raster.height() as f32);
                let (w, h) = if self.needs_transform() {
                    let bounds = self.matrix(w, h).map_rect(&Rect::from_size(w, h));
                    (bounds.width(), bounds.height())
                } else {
                    (w, h)
                };
                let padding = &self.style.padding;
                Measure {
                    width: w + padding.horizontal(),
                    height: h + padding.vertical(),
                    baseline: 0.0,
                }
            }
            None => {
                log::debug!("image mark has no pixels and will not be drawn");
                Measure::ZERO
            }
        };
        self.raster = raster;
        self.measured = Some(measured);
        measured
    }

    /// Draw the (transformed) image at the box origin offset back by the
    /// leading padding, at the mark's alpha
    pub(crate) fn draw(
        &self,
        canvas: &mut Canvas,
        paint: &Paint,
        x: f32,
        top: f32,
    ) -> Result<(), WatermarkError> {
        let Some(raster) = &self.raster else {
            return Ok(());
        };
        let image_paint = paint.with_alpha(self.style.alpha);
        let x = x - self.style.padding.left.0;
        let y = top - self.style.padding.top.0;

        if self.needs_transform() {
            let matrix = self.matrix(raster.width() as f32, raster.height() as f32);
            if let Some(copy) = transformed(raster, &matrix)? {
                canvas.draw_pixmap(&copy, x, y, &image_paint);
            }
        } else {
            canvas.draw_pixmap(raster, x, y, &image_paint);
        }
        Ok(())
    }
}
