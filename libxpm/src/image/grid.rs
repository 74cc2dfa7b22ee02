use std::collections::HashMap;

use image::RgbaImage;
use tracing::debug;

use super::{
    bmp::{encode_bitmap, BitmapVariant, ColorType},
    Pixmap,
};
use crate::{color::ColorResolver, error::Error, serde::record::split_symbols};

/// Fully resolved RGBA raster of a pixmap
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PixelGrid {
    /// The width of the image
    width: u32,
    /// The height of the image
    height: u32,
    /// RGBA quads, row-major, top row first
    pixels: Vec<u8>,
}

/// Transparent cells are stored as all-zero quads
const TRANSPARENT: [u8; 4] = [0, 0, 0, 0];

impl PixelGrid {
    /// Resolves every symbol of `pixmap` through `resolver`
    ///
    /// Transparent symbols (`None`) become `(0, 0, 0, 0)`, all others `(r, g, b, 255)`.
    /// Each color table entry is resolved once, so an unknown color name yields a single
    /// warning however many pixels use it.
    #[must_use]
    pub fn build(pixmap: &Pixmap, resolver: &ColorResolver) -> Self {
        let quads: HashMap<&str, [u8; 4]> = pixmap
            .color_table()
            .iter()
            .map(|(symbol, entry)| {
                let quad = resolver
                    .resolve_truecolor(&entry.color)
                    .map_or(TRANSPARENT, |rgb| [rgb.r, rgb.g, rgb.b, u8::MAX]);
                (symbol.as_str(), quad)
            })
            .collect();

        let (width, height) = (pixmap.width(), pixmap.height());
        let cpp = pixmap.header().char_per_pixel as usize;
        let mut pixels = Vec::with_capacity(width as usize * height as usize * 4);
        for row in pixmap.body() {
            for symbol in split_symbols(row, cpp) {
                // a parsed Pixmap only holds known symbols
                pixels.extend_from_slice(quads.get(symbol).unwrap_or(&TRANSPARENT));
            }
        }
        debug!("built {width}x{height} pixel grid ({} bytes)", pixels.len());
        Self::new(width, height, pixels)
    }

    pub(crate) fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(width as usize * height as usize * 4, pixels.len());
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Returns the width of the image
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the image
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Returns the RGBA quad at `(x, y)`, `(0, 0)` being the top left pixel
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x < self.width && y < self.height {
            let i = (y as usize * self.width as usize + x as usize) * 4;
            let mut quad = [0; 4];
            quad.copy_from_slice(&self.pixels[i..i + 4]);
            Some(quad)
        } else {
            None
        }
    }

    /// Returns an entire row of RGBA bytes
    #[must_use]
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y < self.height {
            let stride = self.width as usize * 4;
            let start_index = y as usize * stride;
            Some(&self.pixels[start_index..start_index + stride])
        } else {
            None
        }
    }

    /// Returns the raw RGBA bytes
    #[must_use]
    pub fn as_raw(&self) -> &[u8] {
        &self.pixels
    }

    /// Returns the RGB bytes, dropping the alpha channel
    #[must_use]
    pub fn to_rgb(&self) -> Vec<u8> {
        self.pixels
            .chunks_exact(4)
            .flat_map(|quad| [quad[0], quad[1], quad[2]])
            .collect()
    }

    /// Converts the grid into an [`image::RgbaImage`], e.g. to save it as PNG
    #[must_use]
    pub fn to_rgba_image(&self) -> RgbaImage {
        // dimensions and buffer length always agree
        RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
            .unwrap_or_else(|| RgbaImage::new(self.width, self.height))
    }

    /// Encodes the grid as a 24-bit bitmap. The alpha channel is dropped.
    ///
    /// # Errors
    ///
    /// See [`encode_bitmap`]
    pub fn to_bitmap(&self, variant: BitmapVariant) -> Result<Vec<u8>, Error> {
        encode_bitmap(
            &self.pixels,
            self.width,
            self.height,
            ColorType::Rgba8,
            variant,
        )
    }
}
