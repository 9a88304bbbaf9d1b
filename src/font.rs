use crate::{rect::Rect, units::Px, WatermarkError};
use owned_ttf_parser::{AsFaceRef, Face, GlyphId, OutlineBuilder, OwnedFace};
use std::path::Path as FsPath;
use tiny_skia::{Path, PathBuilder};

/// Vertical font metrics at a given size, in a y-down space relative to the
/// baseline: values above the baseline are negative.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct FontMetrics {
    /// Recommended distance above the baseline (negative)
    pub ascent: f32,
    /// Recommended distance below the baseline (positive)
    pub descent: f32,
    /// Highest extent of any glyph above the baseline (negative)
    pub top: f32,
    /// Lowest extent of any glyph below the baseline (positive)
    pub bottom: f32,
}

impl FontMetrics {
    /// Height of the recommended line box, `descent - ascent`
    pub fn span(&self) -> f32 {
        self.descent - self.ascent
    }

    /// Height of the extreme glyph box, `bottom - top`
    pub fn extent(&self) -> f32 {
        self.bottom - self.top
    }
}

/// Everything the layout engine needs to know about a typeface: how wide a
/// string is, how tall a line is, how tall the inked glyphs are, and what
/// the glyphs look like.
///
/// [`Font`] implements this from TrueType / OpenType data; other sources of
/// metrics can be plugged in by implementing it directly.
pub trait Typeface {
    /// The advance width of `text` at `size`
    fn advance(&self, text: &str, size: Px) -> f32;

    /// The vertical metrics at `size`
    fn metrics(&self, size: Px) -> FontMetrics;

    /// The tight bounds of the inked glyphs of `text`, relative to a pen
    /// starting at `(0, 0)` on the baseline
    fn bounds(&self, text: &str, size: Px) -> Rect;

    /// The glyph outlines of `text` with the pen starting at `(x, baseline)`.
    /// Returns `None` if nothing would be inked.
    fn outline(&self, text: &str, size: Px, x: f32, baseline: f32) -> Option<Path>;
}

/// A parsed font object. Fonts can be TTF or OTF fonts.
///
/// Fonts are usually shared between marks behind an `Arc<dyn Typeface>`.
pub struct Font {
    pub face: OwnedFace,
}

impl Font {
    /// Load a font from raw bytes, parsing the font and returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, WatermarkError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        let font = Font { face };
        log::debug!(
            "loaded font {}",
            font.name().unwrap_or_else(|| "<unnamed>".to_string())
        );
        Ok(font)
    }

    /// Load a font file from disk
    pub fn load_from_disk<P: AsRef<FsPath>>(path: P) -> Result<Font, WatermarkError> {
        let bytes = std::fs::read(path)?;
        Self::load(bytes)
    }

    /// Obtain the full name of the font, if the font carries one
    pub fn name(&self) -> Option<String> {
        self.face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == owned_ttf_parser::name_id::FULL_NAME && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    fn face_ref(&self) -> &Face<'_> {
        self.face.as_face_ref()
    }

    fn scaling(&self, size: Px) -> f32 {
        size.0 / self.face_ref().units_per_em().max(1) as f32
    }

    /// The glyph for `ch`, falling back to the replacement character and
    /// finally to the `.notdef` glyph
    fn glyph(&self, ch: char) -> GlyphId {
        let face = self.face_ref();
        face.glyph_index(ch)
            .or_else(|| face.glyph_index('\u{FFFD}'))
            .unwrap_or(GlyphId(0))
    }

    /// Walk the glyphs of `text`, yielding each glyph with the pen position (in
    /// pixels) at which it starts
    fn pen_positions<'a>(
        &'a self,
        text: &'a str,
        scaling: f32,
    ) -> impl Iterator<Item = (GlyphId, f32)> + 'a {
        let face = self.face_ref();
        text.chars().scan(0.0_f32, move |pen, ch| {
            let gid = self.glyph(ch);
            let start = *pen;
            *pen += face.glyph_hor_advance(gid).unwrap_or_default() as f32 * scaling;
            Some((gid, start))
        })
    }
}

impl Typeface for Font {
    fn advance(&self, text: &str, size: Px) -> f32 {
        let scaling = self.scaling(size);
        text.chars()
            .map(|ch| self.face_ref().glyph_hor_advance(self.glyph(ch)).unwrap_or_default() as f32)
            .map(|adv| adv * scaling)
            .sum()
    }

    fn metrics(&self, size: Px) -> FontMetrics {
        let scaling = self.scaling(size);
        let face = self.face_ref();
        let bbox = face.global_bounding_box();
        FontMetrics {
            ascent: -(face.ascender() as f32) * scaling,
            descent: -(face.descender() as f32) * scaling,
            top: -(bbox.y_max as f32) * scaling,
            bottom: -(bbox.y_min as f32) * scaling,
        }
    }

    fn bounds(&self, text: &str, size: Px) -> Rect {
        let scaling = self.scaling(size);
        self.pen_positions(text, scaling)
            .filter_map(|(gid, pen)| {
                self.face_ref().glyph_bounding_box(gid).map(|bbox| Rect {
                    x1: pen + bbox.x_min as f32 * scaling,
                    y1: -(bbox.y_max as f32) * scaling,
                    x2: pen + bbox.x_max as f32 * scaling,
                    y2: -(bbox.y_min as f32) * scaling,
                })
            })
            .fold(Rect::default(), |acc, glyph| acc.union(&glyph))
    }

    fn outline(&self, text: &str, size: Px, x: f32, baseline: f32) -> Option<Path> {
        let scaling = self.scaling(size);
        let mut builder = GlyphPathBuilder::new(scaling);
        for (gid, pen) in self.pen_positions(text, scaling) {
            builder.origin_x = x + pen;
            builder.origin_y = baseline;
            // glyphs without outlines (spaces) are fine to skip
            let _ = self.face_ref().outline_glyph(gid, &mut builder);
        }
        builder.finish()
    }
}

/// Converts font-unit glyph outlines (y-up) into raster paths (y-down)
struct GlyphPathBuilder {
    builder: PathBuilder,
    origin_x: f32,
    origin_y: f32,
    scale: f32,
}

impl GlyphPathBuilder {
    fn new(scale: f32) -> Self {
        Self {
            builder: PathBuilder::new(),
            origin_x: 0.0,
            origin_y: 0.0,
            scale,
        }
    }

    fn point(&self, x: f32, y: f32) -> (f32, f32) {
        (self.origin_x + x * self.scale, self.origin_y - y * self.scale)
    }

    fn finish(self) -> Option<Path> {
        self.builder.finish()
    }
}

impl OutlineBuilder for GlyphPathBuilder {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.point(x, y);
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.point(x, y);
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1) = self.point(x1, y1);
        let (x, y) = self.point(x, y);
        self.builder.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = self.point(x1, y1);
        let (x2, y2) = self.point(x2, y2);
        let (x, y) = self.point(x, y);
        self.builder.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}
