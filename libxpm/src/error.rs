use crate::serde;
use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
/// Possible `libxpm` errors
pub enum Error {
    /// Error returned if an `.xpm` file parse fails
    #[error("parse error: {0}")]
    Parse(#[from] serde::ParseError),
    /// Error returned if reading or writing a file fails
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// Error returned if the requested bitmap variant is neither `Windows` nor `OS/2`
    #[error("unsupported bitmap variant: {0:?} (expected \"Windows\" or \"OS/2\")")]
    UnsupportedBitmapVariant(String),
    /// Error returned if the length of the raster data does not match
    /// the given width/height
    #[error("raster data does not match dimensions. width: {width}, height: {height}, channels: {channels}, data_length: {data_length}")]
    MismatchDimensions {
        /// raster width
        width: u32,
        /// raster height
        height: u32,
        /// channels per pixel
        channels: usize,
        /// length of the provided data
        data_length: usize,
    },
    /// Error returned if the image is too large for the bitmap header fields
    #[error("image dimensions {width}x{height} do not fit into the bitmap header")]
    DimensionsTooLarge {
        /// raster width
        width: u32,
        /// raster height
        height: u32,
    },
}
