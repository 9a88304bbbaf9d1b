use derive_more::{
    Add, AddAssign, Deref, DerefMut, Display, Div, From, Into, Mul, MulAssign, Neg, Sub,
    SubAssign, Sum,
};

/// A length in device pixels. Every configurable length (padding, spacing, text
/// size, shadow offsets, anchor positions) is expressed in pixels; fractional
/// values are allowed and only rounded when a raster is allocated.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Mul,
    MulAssign,
    Div,
    Neg,
    Sum,
    Deref,
    DerefMut,
    From,
    Into,
    Display,
)]
#[display("{_0}px")]
pub struct Px(pub f32);

impl Px {
    pub const ZERO: Px = Px(0.0);
}

impl From<f64> for Px {
    fn from(value: f64) -> Self {
        Px(value as f32)
    }
}

impl From<i32> for Px {
    fn from(value: i32) -> Self {
        Px(value as f32)
    }
}

impl From<u32> for Px {
    fn from(value: u32) -> Self {
        Px(value as f32)
    }
}
