//! Compose repeating watermarks onto raster images.
//!
//! A watermark is built from [`Row`]s of [`Mark`]s (text or images). The rows
//! are stacked into a single *item*, optionally rotated and laid over a
//! background, and the item is then placed once or tiled across the
//! destination according to a [`CanvasGravity`] and a [`Repeat`] mode.
//!
//! ```no_run
//! use std::sync::Arc;
//! use watermark_gen::{colours, Font, Repeat, Row, Size, TextMark, Watermark};
//!
//! # fn main() -> Result<(), watermark_gen::WatermarkError> {
//! let font = Font::load_from_disk("fonts/NotoSans-Regular.ttf")?;
//! let base = watermark_gen::load_image("photo.jpg")?;
//! let mut watermark = Watermark::builder(Size::Image(base))
//!     .font(Arc::new(font))
//!     .row(Row::new().mark(TextMark::new("© dkzwm").colour(colours::WHITE).alpha(96)))
//!     .item_rotation(-30.0)
//!     .repeat(Repeat::Odd)
//!     .build();
//! watermark.make()?.save("photo-watermarked.png")?;
//! # Ok(())
//! # }
//! ```

mod canvas;
pub use canvas::*;

mod colour;
pub use colour::*;

mod error;
pub use error::*;

mod font;
pub use font::*;

mod item;
pub use item::*;

mod mark;
pub use mark::*;

mod padding;
pub use padding::*;

mod paint;
pub use paint::*;

mod rect;
pub use rect::*;

mod resources;
pub use resources::*;

mod row;
pub use row::*;

mod size;
pub use size::*;

mod tile;
pub use tile::*;

mod transform;
pub use transform::*;

mod units;
pub use units::*;

mod watermark;
pub use watermark::*;

#[cfg(test)]
mod testing;
