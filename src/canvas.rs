//! The raster surface the engine draws into.
//!
//! [`Canvas`] wraps a premultiplied [`tiny_skia::Pixmap`] together with a
//! transform stack, and offers the handful of primitives the layout engine
//! needs: filled rectangles, text, bitmaps and shadow layers. Images enter and
//! leave the crate as straight-alpha [`image::RgbaImage`]s.

use crate::colour::Colour;
use crate::font::Typeface;
use crate::paint::{Paint, Shadow};
use crate::rect::Rect;
use crate::transform::Transform;
use crate::units::Px;
use crate::WatermarkError;
use image::{Rgba, RgbaImage};
use tiny_skia::{BlendMode, FillRule, FilterQuality, Pixmap, PixmapPaint};

/// Allocate a transparent raster. Zero-sized or oversized requests fail.
pub fn allocate(width: u32, height: u32) -> Result<Pixmap, WatermarkError> {
    Pixmap::new(width, height).ok_or(WatermarkError::Allocation { width, height })
}

/// Round a floating point extent up to whole pixels, ignoring float noise
pub(crate) fn pixel_extent(value: f32) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    (value - 1e-3).ceil().max(0.0) as u32
}

/// Convert a straight-alpha image into a premultiplied raster. Returns `None`
/// for images with no pixels.
pub fn pixmap_from_image(image: &RgbaImage) -> Option<Pixmap> {
    let (width, height) = image.dimensions();
    let mut pixmap = Pixmap::new(width, height)?;
    for (src, dst) in image
        .as_raw()
        .chunks_exact(4)
        .zip(pixmap.data_mut().chunks_exact_mut(4))
    {
        let a = src[3];
        dst[0] = premultiply(src[0], a);
        dst[1] = premultiply(src[1], a);
        dst[2] = premultiply(src[2], a);
        dst[3] = a;
    }
    Some(pixmap)
}

/// Convert a premultiplied raster back into a straight-alpha image
pub fn image_from_pixmap(pixmap: &Pixmap) -> RgbaImage {
    let mut image = RgbaImage::new(pixmap.width(), pixmap.height());
    for (src, dst) in pixmap.pixels().iter().zip(image.pixels_mut()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    image
}

fn premultiply(channel: u8, alpha: u8) -> u8 {
    let prod = (channel as u16) * (alpha as u16) + 127;
    ((prod + (prod >> 8)) >> 8) as u8
}

/// Render `src` through `transform` into a new raster sized to the rounded
/// bounds of the transformed image. The result is translated so that those
/// bounds start at the origin. Returns `None` if the result has no pixels.
pub fn transformed(src: &Pixmap, transform: &Transform) -> Result<Option<Pixmap>, WatermarkError> {
    let bounds = transform.map_rect(&Rect::from_size(src.width() as f32, src.height() as f32));
    let width = bounds.width().round().max(0.0) as u32;
    let height = bounds.height().round().max(0.0) as u32;
    if width == 0 || height == 0 {
        return Ok(None);
    }

    let mut out = allocate(width, height)?;
    let placed = transform.with_translate(-bounds.x1, -bounds.y1);
    out.draw_pixmap(
        0,
        0,
        src.as_ref(),
        &PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        },
        placed.into(),
        None,
    );
    Ok(Some(out))
}

/// A drawing surface with a current transform.
pub struct Canvas {
    pixmap: Pixmap,
    transform: Transform,
    stack: Vec<Transform>,
}

impl Canvas {
    /// Allocate a transparent canvas
    pub fn new(width: u32, height: u32) -> Result<Canvas, WatermarkError> {
        Ok(Canvas::from_pixmap(allocate(width, height)?))
    }

    pub fn from_pixmap(pixmap: Pixmap) -> Canvas {
        Canvas {
            pixmap,
            transform: Transform::identity(),
            stack: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Push the current transform so it can be restored later
    pub fn save(&mut self) {
        self.stack.push(self.transform);
    }

    /// Pop the transform saved by the matching [`save`](Canvas::save)
    pub fn restore(&mut self) {
        if let Some(transform) = self.stack.pop() {
            self.transform = transform;
        }
    }

    /// Rotate subsequent drawing about `(px, py)`, in the current coordinates
    pub fn rotate_about(&mut self, degrees: f32, px: f32, py: f32) {
        self.transform = Transform::rotate_about(degrees, px, py).then(self.transform);
    }

    /// Translate subsequent drawing, in the current coordinates
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.transform = Transform::translate(dx, dy).then(self.transform);
    }

    /// Composite a colour over the whole surface, ignoring the transform
    pub fn fill_colour(&mut self, colour: Colour) {
        let Some(rect) = tiny_skia::Rect::from_xywh(
            0.0,
            0.0,
            self.pixmap.width() as f32,
            self.pixmap.height() as f32,
        ) else {
            return;
        };
        let paint = Paint::new(colour).to_skia();
        self.pixmap
            .fill_rect(rect, &paint, tiny_skia::Transform::identity(), None);
    }

    /// Fill a rectangle with the paint's colour (and shadow)
    pub fn fill_rect(&mut self, rect: Rect, paint: &Paint) {
        let Some(rect) = rect.to_skia() else {
            return;
        };
        let sk_paint = paint.to_skia();
        self.draw_with_shadow(paint, |pixmap, ts| {
            pixmap.fill_rect(rect, &sk_paint, ts, None);
        });
    }

    /// Fill the glyphs of `text`, with the pen starting at `(x, baseline)`
    pub fn draw_text(
        &mut self,
        face: &dyn Typeface,
        text: &str,
        size: Px,
        x: f32,
        baseline: f32,
        paint: &Paint,
    ) {
        let Some(path) = face.outline(text, size, x, baseline) else {
            return;
        };
        let sk_paint = paint.to_skia();
        self.draw_with_shadow(paint, |pixmap, ts| {
            pixmap.fill_path(&path, &sk_paint, FillRule::Winding, ts, None);
        });
    }

    /// Draw a raster with its top-left corner at `(x, y)`. The paint's alpha
    /// becomes the opacity of the draw.
    pub fn draw_pixmap(&mut self, src: &Pixmap, x: f32, y: f32, paint: &Paint) {
        let pixmap_paint = PixmapPaint {
            opacity: paint.colour.a.clamp(0.0, 1.0),
            blend_mode: BlendMode::SourceOver,
            quality: FilterQuality::Bilinear,
        };
        self.draw_with_shadow(paint, |pixmap, ts| {
            pixmap.draw_pixmap(0, 0, src.as_ref(), &pixmap_paint, ts.pre_translate(x, y), None);
        });
    }

    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }

    pub fn into_image(self) -> RgbaImage {
        image_from_pixmap(&self.pixmap)
    }

    /// Run `draw` against the surface, first compositing a blurred, tinted,
    /// offset copy of it when the paint carries a visible shadow
    fn draw_with_shadow<F>(&mut self, paint: &Paint, draw: F)
    where
        F: Fn(&mut Pixmap, tiny_skia::Transform),
    {
        let ts: tiny_skia::Transform = self.transform.into();
        if let Some(shadow) = paint.visible_shadow() {
            if let Some(layer) = self.shadow_layer(shadow, &draw, ts) {
                let (dx, dy) = self.transform.map_vector(shadow.dx.0, shadow.dy.0);
                self.pixmap.draw_pixmap(
                    0,
                    0,
                    layer.as_ref(),
                    &PixmapPaint::default(),
                    tiny_skia::Transform::from_translate(dx, dy),
                    None,
                );
            }
        }
        draw(&mut self.pixmap, ts);
    }

    fn shadow_layer<F>(&self, shadow: &Shadow, draw: &F, ts: tiny_skia::Transform) -> Option<Pixmap>
    where
        F: Fn(&mut Pixmap, tiny_skia::Transform),
    {
        let mut layer = Pixmap::new(self.pixmap.width(), self.pixmap.height())?;
        draw(&mut layer, ts);

        let [r, g, b, a] = shadow.colour.to_rgba_bytes();
        let mut mask = RgbaImage::new(layer.width(), layer.height());
        for (src, dst) in layer.pixels().iter().zip(mask.pixels_mut()) {
            let alpha = (src.alpha() as u16 * a as u16 / 255) as u8;
            *dst = Rgba([r, g, b, alpha]);
        }
        let blurred = image::imageops::blur(&mask, shadow.sigma());
        pixmap_from_image(&blurred)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::colours;
    use crate::paint::Shadow;
    use crate::testing::solid;

    #[test]
    fn pixel_extent_ignores_float_noise() {
        assert_eq!(pixel_extent(50.000_004), 50);
        assert_eq!(pixel_extent(50.2), 51);
        assert_eq!(pixel_extent(0.0), 0);
        assert_eq!(pixel_extent(-3.0), 0);
        assert_eq!(pixel_extent(f32::NAN), 0);
    }

    #[test]
    fn allocation_of_empty_raster_fails() {
        assert!(matches!(
            allocate(0, 10),
            Err(WatermarkError::Allocation {
                width: 0,
                height: 10
            })
        ));
    }

    #[test]
    fn image_round_trips_through_pixmap() {
        let src = solid(3, 2, [200, 100, 50, 255]);
        let pixmap = pixmap_from_image(&src).expect("non-empty image");
        assert_eq!(image_from_pixmap(&pixmap), src);
        assert!(pixmap_from_image(&RgbaImage::new(0, 0)).is_none());
    }

    #[test]
    fn transformed_copy_takes_rotated_bounds() {
        let src = pixmap_from_image(&solid(40, 20, [255, 0, 0, 255])).expect("non-empty");
        let rotated = transformed(&src, &Transform::rotate_about(90.0, 20.0, 10.0))
            .expect("allocates")
            .expect("non-empty");
        assert_eq!((rotated.width(), rotated.height()), (20, 40));

        let halved = transformed(&src, &Transform::scale(0.5, 0.5))
            .expect("allocates")
            .expect("non-empty");
        assert_eq!((halved.width(), halved.height()), (20, 10));
    }

    #[test]
    fn fill_rect_respects_transform() {
        let mut canvas = Canvas::new(10, 10).expect("allocates");
        canvas.save();
        canvas.translate(5.0, 0.0);
        canvas.fill_rect(Rect::from_xywh(0.0, 0.0, 5.0, 5.0), &Paint::new(colours::RED));
        canvas.restore();
        assert_eq!(canvas.transform(), Transform::identity());

        let image = canvas.into_image();
        assert_eq!(image.get_pixel(7, 2).0, [255, 0, 0, 255]);
        assert_eq!(image.get_pixel(2, 2).0[3], 0);
    }

    #[test]
    fn draw_pixmap_applies_paint_alpha() {
        let src = pixmap_from_image(&solid(2, 2, [0, 0, 255, 255])).expect("non-empty");
        let mut canvas = Canvas::new(4, 4).expect("allocates");
        canvas.draw_pixmap(&src, 1.0, 1.0, &Paint::default().with_alpha(128));
        let image = canvas.into_image();
        let alpha = image.get_pixel(1, 1).0[3];
        assert!((120..=136).contains(&alpha), "alpha was {alpha}");
        assert_eq!(image.get_pixel(0, 0).0[3], 0);
    }

    #[test]
    fn shadow_is_drawn_offset_behind_the_shape() {
        let mut canvas = Canvas::new(30, 30).expect("allocates");
        let paint = Paint::new(colours::WHITE).with_shadow(Shadow::new(1.0, 8.0, 8.0, colours::BLACK));
        canvas.fill_rect(Rect::from_xywh(5.0, 5.0, 10.0, 10.0), &paint);
        let image = canvas.into_image();
        // inside the shape: the shape itself
        assert_eq!(image.get_pixel(8, 8).0, [255, 255, 255, 255]);
        // below-right of the shape: only the shadow
        let shadow = image.get_pixel(20, 20).0;
        assert!(shadow[3] > 128, "shadow alpha was {}", shadow[3]);
        assert!(shadow[0] < 32);
    }
}
