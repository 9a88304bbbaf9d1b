//! Stamp a tiled, rotated watermark onto an image.
//!
//! ```text
//! cargo run --example watermark -- <font.ttf> <input image> <output.png>
//! ```
//!
//! Set `RUST_LOG=watermark_gen=debug` to see the layout decisions.

use image::{Rgba, RgbaImage};
use std::sync::Arc;
use watermark_gen::{
    colours, BackgroundImage, CanvasGravity, Colour, Font, ImageMark, Padding, Repeat, Resources,
    Row, RowGravity, Shadow, Size, TextMark, Watermark,
};

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let (Some(font), Some(input), Some(output)) = (args.next(), args.next(), args.next()) else {
        eprintln!("usage: watermark <font.ttf> <input image> <output.png>");
        std::process::exit(2);
    };

    let font = Font::load_from_disk(font).unwrap();
    let base = watermark_gen::load_image(input).unwrap();
    let badge = RgbaImage::from_pixel(24, 24, Rgba([255, 196, 0, 255]));
    let resources = Resources::new().with_string("nickname", "dkzwm");

    let mut watermark = Watermark::builder(Size::Image(base))
        .font(Arc::new(font))
        .resources(resources)
        .row(
            Row::new()
                .baseline_align(true)
                .mark(
                    ImageMark::new(badge.clone())
                        .rotation(45.0)
                        .scale(0.75)
                        .gravity(RowGravity::Bottom),
                )
                .mark(
                    TextMark::from_resource("nickname")
                        .size(28.0)
                        .colour(colours::WHITE)
                        .gravity(RowGravity::Bottom)
                        .padding(Padding::symmetric(0.0, 6.0))
                        .shadow(Shadow::new(3.0, 1.0, 1.0, Colour::from_argb(0x80000000))),
                ),
        )
        .row(
            Row::new().mark(
                TextMark::new("all rights reserved")
                    .size(14.0)
                    .alpha(180)
                    .background(Colour::new_rgba_bytes(0, 0, 0, 96))
                    .padding(Padding::all(4.0)),
            ),
        )
        .row_spacing(4.0)
        .column_spacing(8.0)
        .item_rotation(-30.0)
        .background(BackgroundImage::new(badge).alpha(48).fit())
        .canvas_gravity(CanvasGravity::Center)
        .repeat(Repeat::Odd)
        .horizontal_gap(48.0)
        .vertical_gap(32.0)
        .build();

    let image = watermark.make().unwrap();
    image.save(&output).unwrap();
    println!("wrote {}x{} image to {output}", image.width(), image.height());
}
