#![allow(clippy::module_name_repetitions)]

pub(crate) mod bmp;
pub(crate) mod grid;
pub(crate) mod header;

pub use bmp::{encode_bitmap, write_bitmap, BitmapVariant, ColorType};
pub use grid::PixelGrid;
pub use header::PixmapHeader;

use crate::{
    color::{ColorEntry, ColorResolver, ColorTable},
    error::Error,
    serde::{record, strip_comments, ParseError},
};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};
use tracing::debug;

/// A typed representation of an XPM pixmap
///
/// Holds the header, the color table and the symbolic pixel rows exactly as read from the
/// file. Use [`Pixmap::to_pixel_grid`] to get actual colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pixmap {
    header: PixmapHeader,
    colors: ColorTable,
    body: Vec<String>,
}

impl Pixmap {
    /// Creates a new [`Pixmap`]
    ///
    /// # Errors
    /// This function errors if the parts are inconsistent: the color table size differs from
    /// the header, the rows do not match the header width/height, or a row references a
    /// symbol missing from the color table
    pub fn new(
        header: PixmapHeader,
        colors: impl IntoIterator<Item = ColorEntry>,
        body: Vec<String>,
    ) -> Result<Self, ParseError> {
        let mut table = ColorTable::new();
        for entry in colors {
            if table.contains_key(&entry.symbol) {
                return Err(ParseError::DuplicateSymbol(entry.symbol));
            }
            table.insert(entry.symbol.clone(), entry);
        }
        let expected = header.num_colors as usize;
        if table.len() < expected {
            return Err(ParseError::MissingColors {
                expected,
                found: table.len(),
            });
        }
        if table.len() > expected {
            return Err(ParseError::TooManyColors {
                expected,
                found: table.len(),
            });
        }
        record::validate_body(&header, &table, &body)?;
        Ok(Self::from_parts(header, table, body))
    }

    pub(crate) const fn from_parts(
        header: PixmapHeader,
        colors: ColorTable,
        body: Vec<String>,
    ) -> Self {
        Self {
            header,
            colors,
            body,
        }
    }

    /// Tries to read a [`Self`] from a buffer
    ///
    /// # Errors
    ///
    /// This function will error if the buffer cannot be read or does not hold a valid pixmap.
    /// See [`ParseError`] for the possible parse failures
    pub fn from_reader(r: impl BufRead) -> Result<Self, Error> {
        let lines = r.lines().collect::<Result<Vec<_>, _>>()?;
        debug!("read {} lines", lines.len());
        Ok(record::parse(&strip_comments(&lines))?)
    }

    /// Tries to read [`Self`] from a provided file path
    ///
    /// # Errors
    ///
    /// This function will error if the file cannot be opened or if the file contains invalid data.
    /// See [`Self::from_reader`] for potential errors
    pub fn from_file<P: AsRef<Path>>(filename: P) -> Result<Self, Error> {
        let file = File::open(filename)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Returns a reference to the [`PixmapHeader`]
    #[must_use]
    pub const fn header(&self) -> &PixmapHeader {
        &self.header
    }

    /// Returns the color table, in file order
    #[must_use]
    pub const fn color_table(&self) -> &ColorTable {
        &self.colors
    }

    /// Returns the symbolic pixel rows, top to bottom
    #[must_use]
    pub fn body(&self) -> &[String] {
        &self.body
    }

    /// Returns the symbols of row `y`, left to right
    #[must_use]
    pub fn row_symbols(&self, y: u32) -> Option<Vec<&str>> {
        let row = self.body.get(y as usize)?;
        Some(record::split_symbols(
            row,
            self.header.char_per_pixel as usize,
        ))
    }

    /// Resolves every pixel to RGBA
    ///
    /// See [`PixelGrid::build`]
    #[must_use]
    pub fn to_pixel_grid(&self, resolver: &ColorResolver) -> PixelGrid {
        PixelGrid::build(self, resolver)
    }

    /// Returns the image width
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.header.width
    }

    /// Returns the image height
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.header.height
    }
}
