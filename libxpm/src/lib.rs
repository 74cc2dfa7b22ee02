//! # libxpm
//!
//!
//! This library reads XPM (X `PixMap`) images, the text format that stores a picture as a C
//! array of strings, and turns them into RGBA rasters, 24-bit bitmaps and terminal colors.
//!
//! An XPM file holds three sections inside one bracketed container of quoted strings:
//! - a values line: `<width> <height> <ncolors> <cpp> [<x_hotspot> <y_hotspot>]`
//! - `ncolors` color rows, each a `cpp`-character symbol followed by `key value` groups (`c`, `s`, `m`, `g`)
//! - `height` pixel rows of `width` symbols each
//!
//! C comments anywhere in the file are ignored.
//!
//! ### Limitations
//!
//! XPM extensions (`XPMEXT`) are not supported and files are parsed as a whole. Escape sequences
//! inside the quoted strings are rejected.
//!
//! ### Usage
//!
//! #### Converting a pixmap to a bitmap
//!
//! ```rust
//! use libxpm::{BitmapVariant, ColorResolver, Pixmap};
//!
//! fn main() -> anyhow::Result<()> {
//!     let pixmap = Pixmap::from_file("../test_assets/smiley.xpm")?;
//!     let resolver = ColorResolver::default();
//!
//!     let grid = pixmap.to_pixel_grid(&resolver);
//!     let bytes = grid.to_bitmap(BitmapVariant::Windows)?;
//!     libxpm::image::write_bitmap("xpm_to_bmp_example.bmp", &bytes)?;
//! #    std::fs::remove_file("xpm_to_bmp_example.bmp")?;
//!     Ok(())
//! }
//! ```
//!
//! #### Converting a pixmap to PNG
//!
//! A [`PixelGrid`] converts into an [`::image::RgbaImage`], so any encoder of the `image`
//! crate can be used.
//!
//! ```rust
//! use libxpm::{ColorResolver, Pixmap};
//!
//! fn main() -> anyhow::Result<()> {
//!     let pixmap: Pixmap = r#"
//!     /* XPM */
//!     static char *dot[] = {
//!     "2 1 2 1",
//!     ". c None",
//!     "o c tomato",
//!     ".o"
//!     };"#
//!     .parse()?;
//!
//!     let img = pixmap.to_pixel_grid(&ColorResolver::default()).to_rgba_image();
//!     assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 0]);
//!     assert_eq!(img.get_pixel(1, 0).0, [255, 99, 71, 255]);
//!     img.save("xpm_to_png_example.png")?;
//! #    std::fs::remove_file("xpm_to_png_example.png")?;
//!     Ok(())
//! }
//! ```
//!
//! #### Terminal colors
//!
//! ```rust
//! use libxpm::color::{palette_index_to_truecolor, quantize_to_palette, escape, Rgb};
//!
//! let index = quantize_to_palette(Rgb::new(255, 128, 0));
//! assert_eq!(index, 208);
//! assert_eq!(palette_index_to_truecolor(index), Rgb::new(255, 135, 0));
//! println!("{}orange{}", escape::fg256(index), escape::RESET);
//! ```
//!
//! #### Color names
//!
//! Names are looked up in a [`color::ColorNameSource`]. The default source knows the CSS/X11
//! names, the single-letter base colors and `gray0..=gray100`. Supply your own with
//! [`ColorResolver::new`]. Unknown names in a pixmap are logged as a warning and drawn black.
//!
//! #### Unstable API
//!
//! This crate is still very much a work-in-progress. Expect breaking changes between minor
//! releases until`v1.0`.
//!
//!

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    missing_docs
)]

pub mod color;
mod error;
/// Module containing the pixmap, pixel grid and bitmap types
pub mod image;
mod serde;
pub mod vim;

pub use color::{ColorEntry, ColorResolver, ColorSpec, ColorTable, Rgb};
pub use error::Error;
pub use image::{BitmapVariant, PixelGrid, Pixmap, PixmapHeader};
pub use serde::{strip_comments, strip_comments_str, ParseError};
pub use vim::VimHighlights;
