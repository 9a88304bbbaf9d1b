//! 2D affine transformation matrices for positioning rasters.

use crate::rect::Rect;

/// An affine transformation in a y-down raster space.
///
/// The matrix is represented as [a, b, c, d, e, f] and maps a point as:
/// ```text
/// x' = a·x + c·y + e
/// y' = b·x + d·y + f
/// ```
///
/// # Composing transforms
///
/// Transforms are chained with [`then`](Transform::then) or the builder methods
/// [`with_translate`](Transform::with_translate), [`with_scale`](Transform::with_scale)
/// and [`with_rotate`](Transform::with_rotate). Operations are applied in the order
/// they're chained.
///
/// ```
/// use watermark_gen::Transform;
///
/// // rotate a 40x20 image about its own centre
/// let transform = Transform::translate(-20.0, -10.0)
///     .with_rotate(90.0)
///     .with_translate(20.0, 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Identity transform (no transformation)
    pub fn identity() -> Self {
        Transform {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Create a translation transform
    pub fn translate(x: f32, y: f32) -> Self {
        Transform {
            e: x,
            f: y,
            ..Self::identity()
        }
    }

    /// Create a scaling transform
    pub fn scale(sx: f32, sy: f32) -> Self {
        Transform {
            a: sx,
            d: sy,
            ..Self::identity()
        }
    }

    /// Create a rotation transform, clockwise on screen for positive degrees.
    ///
    /// Quarter turns produce exact matrices so that rotated bounding boxes do not
    /// pick up floating point noise.
    pub fn rotate(degrees: f32) -> Self {
        let normalized = degrees.rem_euclid(360.0);
        let (sin, cos) = if normalized == 0.0 {
            (0.0, 1.0)
        } else if normalized == 90.0 {
            (1.0, 0.0)
        } else if normalized == 180.0 {
            (0.0, -1.0)
        } else if normalized == 270.0 {
            (-1.0, 0.0)
        } else {
            normalized.to_radians().sin_cos()
        };
        Transform {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        }
    }

    /// Rotate about the pivot `(px, py)`
    pub fn rotate_about(degrees: f32, px: f32, py: f32) -> Self {
        Transform::translate(-px, -py)
            .with_rotate(degrees)
            .with_translate(px, py)
    }

    /// Combine this transform with another: `self` is applied first, then `other`
    pub fn then(self, other: Transform) -> Self {
        Transform {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    /// Add a translation to this transform
    pub fn with_translate(self, x: f32, y: f32) -> Self {
        self.then(Transform::translate(x, y))
    }

    /// Add a scale to this transform
    pub fn with_scale(self, sx: f32, sy: f32) -> Self {
        self.then(Transform::scale(sx, sy))
    }

    /// Add a rotation (in degrees) to this transform
    pub fn with_rotate(self, degrees: f32) -> Self {
        self.then(Transform::rotate(degrees))
    }

    /// Map a point through the transform
    pub fn map_point(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    /// Map a vector through the linear part of the transform (translation is ignored)
    pub fn map_vector(&self, dx: f32, dy: f32) -> (f32, f32) {
        (self.a * dx + self.c * dy, self.b * dx + self.d * dy)
    }

    /// Map a rectangle and return the axis-aligned bounds of the result
    pub fn map_rect(&self, rect: &Rect) -> Rect {
        let corners = [
            self.map_point(rect.x1, rect.y1),
            self.map_point(rect.x2, rect.y1),
            self.map_point(rect.x2, rect.y2),
            self.map_point(rect.x1, rect.y2),
        ];
        let mut bounds = Rect::new(f32::MAX, f32::MAX, f32::MIN, f32::MIN);
        for (x, y) in corners {
            bounds.x1 = bounds.x1.min(x);
            bounds.y1 = bounds.y1.min(y);
            bounds.x2 = bounds.x2.max(x);
            bounds.y2 = bounds.y2.max(y);
        }
        bounds
    }
}

impl From<Transform> for tiny_skia::Transform {
    fn from(t: Transform) -> Self {
        tiny_skia::Transform::from_row(t.a, t.b, t.c, t.d, t.e, t.f)
    }
}
