use crate::canvas::{pixmap_from_image, Canvas};
use crate::WatermarkError;
use image::RgbaImage;

/// The destination a watermark is composed onto
#[derive(Debug, Clone, PartialEq)]
pub enum Size {
    /// No destination: the output is the item raster itself, untiled
    Compute,
    /// A transparent surface of the given size
    Fixed { width: u32, height: u32 },
    /// A surface the size of the image, with the image drawn under the tiles
    Image(RgbaImage),
}

impl Size {
    pub fn fixed(width: u32, height: u32) -> Size {
        Size::Fixed { width, height }
    }

    pub fn is_compute(&self) -> bool {
        matches!(self, Size::Compute)
    }

    /// Pixel dimensions of the destination; `None` for [`Size::Compute`]
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        match self {
            Size::Compute => None,
            Size::Fixed { width, height } => Some((*width, *height)),
            Size::Image(image) => Some(image.dimensions()),
        }
    }

    /// A fresh surface to tile onto, or `None` when the destination has no
    /// pixels
    pub(crate) fn surface(&self) -> Result<Option<Canvas>, WatermarkError> {
        match self {
            Size::Compute => Ok(None),
            Size::Fixed { width, height } if *width == 0 || *height == 0 => Ok(None),
            Size::Fixed { width, height } => Canvas::new(*width, *height).map(Some),
            Size::Image(image) => Ok(pixmap_from_image(image).map(Canvas::from_pixmap)),
        }
    }
}

impl From<RgbaImage> for Size {
    fn from(image: RgbaImage) -> Self {
        Size::Image(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::solid;

    #[test]
    fn zero_sized_destinations_have_no_surface() {
        assert!(Size::fixed(0, 10).surface().expect("no allocation").is_none());
        assert!(Size::Image(RgbaImage::new(5, 0)).surface().expect("no allocation").is_none());
        assert!(Size::Compute.surface().expect("no allocation").is_none());
    }

    #[test]
    fn image_destination_starts_with_the_image() {
        let size = Size::from(solid(3, 2, [10, 20, 30, 255]));
        assert_eq!(size.dimensions(), Some((3, 2)));
        let canvas = size.surface().expect("allocates").expect("has pixels");
        assert_eq!(canvas.into_image().get_pixel(2, 1).0, [10, 20, 30, 255]);
    }
}
