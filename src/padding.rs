use crate::units::Px;

/// Space reserved around the content of a mark. Padding grows the measured size
/// of the mark, and the mark's background fill covers it.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Padding {
    pub top: Px,
    pub right: Px,
    pub bottom: Px,
    pub left: Px,
}

impl Padding {
    /// Create padding by specifying individual components in a clockwise fashion
    /// starting at the top (in the same order as CSS padding)
    pub fn trbl<T, R, B, L>(top: T, right: R, bottom: B, left: L) -> Padding
    where
        T: Into<Px>,
        R: Into<Px>,
        B: Into<Px>,
        L: Into<Px>,
    {
        Padding {
            top: top.into(),
            right: right.into(),
            bottom: bottom.into(),
            left: left.into(),
        }
    }

    /// Create padding in the `left, top, right, bottom` order
    pub fn ltrb<D: Into<Px>>(left: D, top: D, right: D, bottom: D) -> Padding {
        Padding {
            top: top.into(),
            right: right.into(),
            bottom: bottom.into(),
            left: left.into(),
        }
    }

    /// Create padding where all values are equal
    pub fn all<D: Into<Px>>(value: D) -> Padding {
        let value: Px = value.into();
        Padding {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Create padding by specifying different values for vertical (top and bottom)
    /// and horizontal (left and right) sides
    pub fn symmetric<D: Into<Px>>(vertical: D, horizontal: D) -> Padding {
        let vertical: Px = vertical.into();
        let horizontal: Px = horizontal.into();
        Padding {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// Create padding where all values are 0.0
    pub fn empty() -> Padding {
        Padding::all(Px::ZERO)
    }

    /// Left plus right padding
    pub fn horizontal(&self) -> f32 {
        self.left.0 + self.right.0
    }

    /// Top plus bottom padding
    pub fn vertical(&self) -> f32 {
        self.top.0 + self.bottom.0
    }
}
