/// An axis-aligned rectangle, specified by two opposite corners in a y-down
/// coordinate space (the origin is the top-left of the raster).
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Rect {
    /// The x-coordinate of the left edge
    pub x1: f32,
    /// The y-coordinate of the top edge
    pub y1: f32,
    /// The x-coordinate of the right edge
    pub x2: f32,
    /// The y-coordinate of the bottom edge
    pub y2: f32,
}

impl Rect {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Rect {
        Rect { x1, y1, x2, y2 }
    }

    /// A rectangle anchored at the origin with the given size
    pub fn from_size(width: f32, height: f32) -> Rect {
        Rect::new(0.0, 0.0, width, height)
    }

    pub fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Rect {
        Rect::new(x, y, x + width, y + height)
    }

    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// The smallest rectangle containing both `self` and `other`. Empty
    /// rectangles do not contribute.
    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Rect {
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
            x2: self.x2.max(other.x2),
            y2: self.y2.max(other.y2),
        }
    }
}

impl Rect {
    /// Convert into a raster rectangle; `None` when the rectangle is empty or not finite
    pub(crate) fn to_skia(self) -> Option<tiny_skia::Rect> {
        tiny_skia::Rect::from_ltrb(self.x1, self.y1, self.x2, self.y2)
    }
}
