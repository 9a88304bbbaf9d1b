use crate::canvas::Canvas;
use crate::mark::{Mark, Measure, MeasureContext, RowGravity};
use crate::paint::Paint;
use crate::WatermarkError;

/// A horizontal run of marks, drawn left to right in insertion order.
#[derive(Default)]
pub struct Row {
    marks: Vec<Mark>,
    baseline_align: bool,
}

/// The measured geometry of a [`Row`]
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct RowLayout {
    pub width: f32,
    pub height: f32,
    /// Largest baseline offset of any valid mark
    pub baseline: f32,
    /// Whether bottom-aligned marks sit on the shared text baseline rather
    /// than on the bottom edge of the row
    pub compensate: bool,
}

impl RowLayout {
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

impl Row {
    pub fn new() -> Row {
        Row::default()
    }

    pub fn mark<M: Into<Mark>>(mut self, mark: M) -> Row {
        self.marks.push(mark.into());
        self
    }

    /// Line up the bottom of images with the baseline of text when both are
    /// bottom-aligned in this row
    pub fn baseline_align(mut self, align: bool) -> Row {
        self.baseline_align = align;
        self
    }

    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    fn valid_marks(&self) -> impl Iterator<Item = &Mark> {
        self.marks.iter().filter(|m| m.is_valid())
    }

    /// Measure every mark and combine the results. Invalid marks take no space
    /// and no spacing.
    pub fn layout(&mut self, ctx: &MeasureContext<'_>, column_spacing: f32) -> RowLayout {
        for mark in self.marks.iter_mut() {
            mark.init(ctx);
        }

        let mut layout = RowLayout::default();
        let mut count = 0;
        // tallest bottom-aligned mark that is not text, and whether any
        // bottom-aligned mark is
        let mut plain_height: f32 = 0.0;
        let mut has_text = false;
        for mark in self.valid_marks() {
            let m = mark.measure();
            layout.width += m.width;
            layout.height = layout.height.max(m.height);
            layout.baseline = layout.baseline.max(m.baseline);
            count += 1;

            if self.baseline_align && mark.gravity() == RowGravity::Bottom {
                if m.baseline == 0.0 {
                    plain_height = plain_height.max(m.height);
                } else {
                    has_text = true;
                }
            }
        }
        if count > 1 {
            layout.width += column_spacing * (count - 1) as f32;
        }

        layout.compensate = has_text && plain_height > 0.0;
        if layout.compensate {
            layout.height = layout.height.max(plain_height + layout.baseline);
        }
        layout
    }

    /// Distance from the top of the row to the top of a mark
    fn offset_y(layout: &RowLayout, gravity: RowGravity, measure: &Measure) -> f32 {
        match gravity {
            RowGravity::Top => 0.0,
            RowGravity::Center => (layout.height - measure.height) / 2.0,
            RowGravity::Bottom if layout.compensate => {
                layout.height - measure.height - (layout.baseline - measure.baseline)
            }
            RowGravity::Bottom => layout.height - measure.height,
        }
    }

    /// Draw the row with its top-left corner at `(x, top)`
    pub(crate) fn paint(
        &self,
        canvas: &mut Canvas,
        paint: &mut Paint,
        layout: &RowLayout,
        x: f32,
        top: f32,
        column_spacing: f32,
    ) -> Result<(), WatermarkError> {
        let mut x = x;
        for mark in self.valid_marks() {
            let measure = mark.measure();
            let y = top + Row::offset_y(layout, mark.gravity(), &measure);
            mark.paint(canvas, paint, x, y, layout.height)?;
            paint.clear_shadow();
            x += measure.width + column_spacing;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::Typeface;
    use crate::mark::{ImageMark, TextMark};
    use crate::resources::Resources;
    use crate::testing::{solid, BlockFace};
    use std::sync::Arc;

    fn layout(row: &mut Row, spacing: f32) -> RowLayout {
        let face: Arc<dyn Typeface> = Arc::new(BlockFace::new());
        let resources = Resources::new();
        row.layout(
            &MeasureContext {
                resources: &resources,
                font: Some(&face),
            },
            spacing,
        )
    }

    fn image(width: u32, height: u32) -> ImageMark {
        ImageMark::new(solid(width, height, [0, 0, 0, 255]))
    }

    #[test]
    fn invalid_marks_take_no_space() {
        let mut alone = Row::new().mark(image(80, 20));
        let mut mixed = Row::new()
            .mark(image(80, 20))
            .mark(ImageMark::new(image::RgbaImage::new(0, 0)));
        let expected = layout(&mut alone, 6.0);
        assert_eq!((expected.width, expected.height), (80.0, 20.0));
        assert_eq!(layout(&mut mixed, 6.0), expected);
    }

    #[test]
    fn spacing_only_between_valid_marks() {
        let mut row = Row::new()
            .mark(image(10, 10))
            .mark(TextMark::new(""))
            .mark(image(20, 5))
            .mark(image(30, 8));
        let l = layout(&mut row, 4.0);
        assert_eq!((l.width, l.height), (68.0, 10.0));
        assert!(!l.compensate);
    }

    #[test]
    fn baseline_alignment_grows_the_row() {
        // a 40px image and a 20px line with a 5px descent, both on the bottom
        let mut row = Row::new()
            .baseline_align(true)
            .mark(image(30, 40).gravity(RowGravity::Bottom))
            .mark(TextMark::new("ab").size(20.0).gravity(RowGravity::Bottom));
        let l = layout(&mut row, 0.0);
        assert!(l.compensate);
        assert_eq!((l.height, l.baseline), (45.0, 5.0));

        let image = row.marks()[0].measure();
        let text = row.marks()[1].measure();
        assert_eq!(Row::offset_y(&l, RowGravity::Bottom, &image), 0.0);
        assert_eq!(Row::offset_y(&l, RowGravity::Bottom, &text), 25.0);
    }

    #[test]
    fn baseline_alignment_does_not_depend_on_order() {
        let mut row = Row::new()
            .baseline_align(true)
            .mark(TextMark::new("ab").size(20.0).gravity(RowGravity::Bottom))
            .mark(image(30, 40).gravity(RowGravity::Bottom));
        assert_eq!(layout(&mut row, 0.0).height, 45.0);
    }

    #[test]
    fn no_compensation_without_the_flag_or_bottom_gravity() {
        let mut unflagged = Row::new()
            .mark(image(30, 40).gravity(RowGravity::Bottom))
            .mark(TextMark::new("ab").size(20.0).gravity(RowGravity::Bottom));
        assert_eq!(layout(&mut unflagged, 0.0).height, 40.0);

        let mut centred = Row::new()
            .baseline_align(true)
            .mark(image(30, 40))
            .mark(TextMark::new("ab").size(20.0).gravity(RowGravity::Bottom));
        assert_eq!(layout(&mut centred, 0.0).height, 40.0);
    }

    #[test]
    fn marks_are_placed_by_gravity() {
        let l = RowLayout {
            width: 0.0,
            height: 30.0,
            baseline: 0.0,
            compensate: false,
        };
        let m = Measure {
            width: 5.0,
            height: 10.0,
            baseline: 0.0,
        };
        assert_eq!(Row::offset_y(&l, RowGravity::Top, &m), 0.0);
        assert_eq!(Row::offset_y(&l, RowGravity::Center, &m), 10.0);
        assert_eq!(Row::offset_y(&l, RowGravity::Bottom, &m), 20.0);
    }
}
