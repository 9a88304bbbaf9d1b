use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum WatermarkError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsing(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// [image] failed to decode or encode an image
    Image(#[from] image::ImageError),

    #[error("unable to allocate a {width}x{height} raster")]
    /// A raster buffer could not be allocated
    Allocation { width: u32, height: u32 },
}
