//! Deterministic test doubles shared by the unit tests.

use crate::{FontMetrics, Px, Rect, Typeface};
use image::{Rgba, RgbaImage};
use tiny_skia::{Path, PathBuilder};

/// A typeface whose glyphs are all the same solid block. Every dimension is a
/// fraction of the font size, so a size of 20px gives a 20px line with a
/// 5px descent.
pub(crate) struct BlockFace {
    pub advance: f32,
    pub ascent: f32,
    pub descent: f32,
    pub ink_top: f32,
    pub ink_bottom: f32,
}

impl BlockFace {
    pub fn new() -> Self {
        BlockFace {
            advance: 0.5,
            ascent: -0.75,
            descent: 0.25,
            ink_top: -0.7,
            ink_bottom: 0.1,
        }
    }

    /// Glyphs that ink well outside the recommended line box
    pub fn tall_ink() -> Self {
        BlockFace {
            ink_top: -1.0,
            ink_bottom: 0.4,
            ..BlockFace::new()
        }
    }

    fn glyph_box(&self, pen: f32, size: f32) -> Rect {
        Rect {
            x1: pen + 0.05 * size,
            y1: self.ink_top * size,
            x2: pen + (self.advance - 0.05) * size,
            y2: self.ink_bottom * size,
        }
    }
}

impl Typeface for BlockFace {
    fn advance(&self, text: &str, size: Px) -> f32 {
        text.chars().count() as f32 * self.advance * size.0
    }

    fn metrics(&self, size: Px) -> FontMetrics {
        FontMetrics {
            ascent: self.ascent * size.0,
            descent: self.descent * size.0,
            top: self.ink_top.min(self.ascent) * size.0,
            bottom: self.ink_bottom.max(self.descent) * size.0,
        }
    }

    fn bounds(&self, text: &str, size: Px) -> Rect {
        (0..text.chars().count())
            .map(|i| self.glyph_box(i as f32 * self.advance * size.0, size.0))
            .fold(Rect::default(), |acc, r| acc.union(&r))
    }

    fn outline(&self, text: &str, size: Px, x: f32, baseline: f32) -> Option<Path> {
        let mut builder = PathBuilder::new();
        for i in 0..text.chars().count() {
            let r = self.glyph_box(x + i as f32 * self.advance * size.0, size.0);
            builder.move_to(r.x1, baseline + r.y1);
            builder.line_to(r.x2, baseline + r.y1);
            builder.line_to(r.x2, baseline + r.y2);
            builder.line_to(r.x1, baseline + r.y2);
            builder.close();
        }
        builder.finish()
    }
}

/// A solid image of the given size
pub(crate) fn solid(width: u32, height: u32, rgba: [u8; 4]) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba(rgba))
}
