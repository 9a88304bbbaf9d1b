//! The tiler: decides where copies of the item raster land on the destination.
//!
//! With [`Repeat::None`] a single copy is placed at an explicit anchor,
//! adjusted by the canvas gravity. Every other mode covers the whole
//! destination, sweeping outwards from the edge (or, for
//! [`CanvasGravity::Center`], the middle) that the gravity names. Staggered
//! modes skip every other column and shift alternate rows by one column.

use crate::canvas::Canvas;
use crate::paint::Paint;
use crate::units::Px;
use tiny_skia::Pixmap;

/// Where tiling starts from, and what the single-placement anchor refers to
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum CanvasGravity {
    LeftTop,
    LeftBottom,
    #[default]
    Center,
    RightTop,
    RightBottom,
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Repeat {
    /// A single copy at the anchor position
    #[default]
    None,
    /// A contiguous grid
    Repeat,
    /// A staggered grid whose first row is not shifted
    Odd,
    /// A staggered grid whose first row is shifted
    Even,
}

impl Repeat {
    fn staggered(self) -> bool {
        matches!(self, Repeat::Odd | Repeat::Even)
    }

    fn start_parity(self) -> u32 {
        match self {
            Repeat::Even => 1,
            _ => 0,
        }
    }
}

/// Tiling configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Tiling {
    pub gravity: CanvasGravity,
    pub repeat: Repeat,
    /// Horizontal gap between neighbouring copies
    pub gap_x: Px,
    /// Vertical gap between neighbouring copies
    pub gap_y: Px,
    /// Anchor of the single copy placed by [`Repeat::None`]
    pub position: (Px, Px),
}

impl Default for Tiling {
    fn default() -> Self {
        Tiling {
            gravity: CanvasGravity::Center,
            repeat: Repeat::None,
            gap_x: Px(12.0),
            gap_y: Px(12.0),
            position: (Px::ZERO, Px::ZERO),
        }
    }
}

/// Geometry shared by every sweep over one destination
struct Sweep {
    dest_w: f32,
    dest_h: f32,
    item_w: f32,
    /// Distance between the origins of horizontally adjacent copies
    column: f32,
    /// Distance between the origins of vertically adjacent rows
    row: f32,
    repeat: Repeat,
    out: Vec<(f32, f32)>,
}

impl Sweep {
    fn step_x(&self) -> f32 {
        if self.repeat.staggered() {
            self.column * 2.0
        } else {
            self.column
        }
    }

    /// Whether the row with this parity is shifted by one column
    fn shifted(&self, parity: u32) -> bool {
        self.repeat.staggered() && parity % 2 == 1
    }

    fn rightwards(&mut self, mut x: f32, y: f32) {
        let step = self.step_x();
        while x < self.dest_w {
            self.out.push((x, y));
            x += step;
        }
    }

    fn leftwards(&mut self, mut x: f32, y: f32) {
        let step = self.step_x();
        let limit = -self.column;
        while x > limit {
            self.out.push((x, y));
            x -= step;
        }
    }

    /// Rows from `y` downwards, parity counting from `parity`
    fn downwards<F>(&mut self, mut y: f32, mut parity: u32, row: F)
    where
        F: Fn(&mut Sweep, f32, bool),
    {
        while y < self.dest_h {
            let shifted = self.shifted(parity);
            row(self, y, shifted);
            parity += 1;
            y += self.row;
        }
    }

    /// Rows from `y` upwards, parity counting from `parity`
    fn upwards<F>(&mut self, mut y: f32, mut parity: u32, row: F)
    where
        F: Fn(&mut Sweep, f32, bool),
    {
        let limit = -self.row;
        while y > limit {
            let shifted = self.shifted(parity);
            row(self, y, shifted);
            parity += 1;
            y -= self.row;
        }
    }

    fn from_left(sweep: &mut Sweep, y: f32, shifted: bool) {
        let x = if shifted { sweep.column } else { 0.0 };
        sweep.rightwards(x, y);
    }

    fn from_right(sweep: &mut Sweep, y: f32, shifted: bool) {
        let x = sweep.dest_w - sweep.item_w;
        let x = if shifted { x - sweep.column } else { x };
        sweep.leftwards(x, y);
    }

    fn from_centre(sweep: &mut Sweep, y: f32, shifted: bool) {
        let centre = sweep.dest_w / 2.0 - sweep.item_w / 2.0;
        let left = if shifted { centre - sweep.column } else { centre };
        sweep.leftwards(left, y);
        let right = if !sweep.repeat.staggered() || shifted {
            centre + sweep.column
        } else {
            centre + sweep.column * 2.0
        };
        sweep.rightwards(right, y);
    }
}

impl Tiling {
    /// Top-left corner of the single copy placed by [`Repeat::None`]
    pub fn anchor(&self, item_w: f32, item_h: f32) -> (f32, f32) {
        let (x, y) = (self.position.0 .0, self.position.1 .0);
        match self.gravity {
            CanvasGravity::LeftTop => (x, y),
            CanvasGravity::LeftBottom => (x, y - item_h),
            CanvasGravity::Center => (x - item_w / 2.0, y - item_h / 2.0),
            CanvasGravity::RightTop => (x - item_w, y),
            CanvasGravity::RightBottom => (x - item_w, y - item_h),
        }
    }

    /// Top-left corners of every copy of an `item`-sized raster on a
    /// `dest`-sized surface, in drawing order
    pub fn placements(&self, dest: (u32, u32), item: (u32, u32)) -> Vec<(f32, f32)> {
        if dest.0 == 0 || dest.1 == 0 || item.0 == 0 || item.1 == 0 {
            return Vec::new();
        }
        let (item_w, item_h) = (item.0 as f32, item.1 as f32);
        if self.repeat == Repeat::None {
            return vec![self.anchor(item_w, item_h)];
        }

        let mut sweep = Sweep {
            dest_w: dest.0 as f32,
            dest_h: dest.1 as f32,
            item_w,
            // a gap that swallows the item would never advance
            column: (item_w + self.gap_x.0).max(1.0),
            row: (item_h + self.gap_y.0).max(1.0),
            repeat: self.repeat,
            out: Vec::new(),
        };
        let parity = self.repeat.start_parity();
        let bottom = sweep.dest_h - item_h;
        match self.gravity {
            CanvasGravity::LeftTop => sweep.downwards(0.0, parity, Sweep::from_left),
            CanvasGravity::LeftBottom => sweep.upwards(bottom, parity, Sweep::from_left),
            CanvasGravity::RightTop => sweep.downwards(0.0, parity, Sweep::from_right),
            CanvasGravity::RightBottom => sweep.upwards(bottom, parity, Sweep::from_right),
            CanvasGravity::Center => {
                let centre = sweep.dest_h / 2.0 - item_h / 2.0;
                sweep.upwards(centre, parity, Sweep::from_centre);
                let below = centre + sweep.row;
                sweep.downwards(below, parity + 1, Sweep::from_centre);
            }
        }
        sweep.out
    }

    /// Draw every placement of `item` onto `canvas`
    pub fn compose(&self, canvas: &mut Canvas, item: &Pixmap) {
        let placements = self.placements(
            (canvas.width(), canvas.height()),
            (item.width(), item.height()),
        );
        log::debug!(
            "tiling a {}x{} item {} times over {}x{} ({:?}, {:?})",
            item.width(),
            item.height(),
            placements.len(),
            canvas.width(),
            canvas.height(),
            self.gravity,
            self.repeat
        );
        let paint = Paint::default();
        for (x, y) in placements {
            log::trace!("item at ({x}, {y})");
            canvas.draw_pixmap(item, x, y, &paint);
        }
    }
}
