//! Color values of XPM color tables and their conversion to truecolor and
//! 256-color terminal palette indices.

pub mod escape;
pub(crate) mod names;
pub(crate) mod palette;
pub(crate) mod resolver;

use indexmap::IndexMap;
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

pub use names::{BuiltinColorNames, ColorNameSource, NameLookupCache};
pub use palette::{palette_index_to_truecolor, quantize_to_palette, SystemColor, PALETTE};
pub use resolver::{ColorFormat, ColorResolver, ConvertedColor};

/// A 24-bit truecolor value
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rgb {
    /// red channel
    pub r: u8,
    /// green channel
    pub g: u8,
    /// blue channel
    pub b: u8,
}

impl Rgb {
    /// Opaque black, the fallback for unknown color names
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// Creates a new [`Rgb`]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Converts channels in `[0, 1]` to 8-bit channels, rounding to the nearest value
    #[must_use]
    pub fn from_unit(channels: [f64; 3]) -> Self {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let to_u8 = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(to_u8(channels[0]), to_u8(channels[1]), to_u8(channels[2]))
    }

    /// Parses an X11 hex color: `#rgb`, `#rrggbb`, `#rrrgggbbb` or `#rrrrggggbbbb`
    ///
    /// The wide forms keep the most significant byte of each channel.
    ///
    /// # Errors
    ///
    /// Errors if the leading `#` is missing, the digit count is not 3, 6, 9 or 12,
    /// or a digit is not hexadecimal
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex.strip_prefix('#').ok_or(ColorParseError::MissingHash)?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidHex(hex.to_owned()));
        }
        let width = match digits.len() {
            3 | 6 | 9 | 12 => digits.len() / 3,
            n => return Err(ColorParseError::InvalidLength(n)),
        };
        let channel = |i: usize| -> Result<u8, ColorParseError> {
            let part = &digits[i * width..(i + 1) * width];
            let value = u16::from_str_radix(part, 16)
                .map_err(|_| ColorParseError::InvalidHex(hex.to_owned()))?;
            #[allow(clippy::cast_possible_truncation)]
            let byte = match width {
                1 => value as u8 * 17,
                2 => value as u8,
                3 => (value >> 4) as u8,
                _ => (value >> 8) as u8,
            };
            Ok(byte)
        };
        Ok(Self::new(channel(0)?, channel(1)?, channel(2)?))
    }

    /// Returns the channels as an array
    #[must_use]
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(value: Rgb) -> Self {
        value.to_array()
    }
}

impl Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Errors raised while reading a color value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ColorParseError {
    /// A hex color without the leading `#`
    #[error("hex color must start with '#'")]
    MissingHash,
    /// A hex color whose digit count is not 3, 6, 9 or 12
    #[error("hex color has {0} digits, expected 3, 6, 9 or 12")]
    InvalidLength(usize),
    /// A hex color with non-hexadecimal digits
    #[error("invalid hex color {0:?}")]
    InvalidHex(String),
    /// An empty color value
    #[error("empty color value")]
    Empty,
}

/// The value of a color key in an XPM color table
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColorSpec {
    /// A color name, such as `red` or `gray50`, resolved through a [`ColorResolver`]
    Named(String),
    /// A hex color
    Hex(Rgb),
    /// The transparent marker `None`
    None,
}

impl ColorSpec {
    /// Returns `true` for the transparent marker
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl FromStr for ColorSpec {
    type Err = ColorParseError;

    /// Parses a color value. The value is lower-cased first, so `None` and `NONE` are both
    /// the transparent marker and names compare case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_lowercase();
        if value.is_empty() {
            return Err(ColorParseError::Empty);
        }
        if value == "none" {
            Ok(Self::None)
        } else if value.starts_with('#') {
            Rgb::from_hex(&value).map(Self::Hex)
        } else {
            Ok(Self::Named(value))
        }
    }
}

impl Display for ColorSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Hex(rgb) => write!(f, "{rgb}"),
            Self::None => f.write_str("none"),
        }
    }
}

/// Symbol to color mapping of an XPM file, in file order
pub type ColorTable = IndexMap<String, ColorEntry>;

/// One row of an XPM color table
///
/// Only [`ColorEntry::color`] is needed to build a raster; the other keys are carried along
/// as they appear in the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorEntry {
    /// The pixel symbol, `char_per_pixel` characters long
    pub symbol: String,
    /// Key `c`: the color visual, as written in the file (lower-cased)
    pub source: String,
    /// Key `c`: the parsed color
    pub color: ColorSpec,
    /// Key `s`: symbolic name
    pub string: Option<String>,
    /// Key `m`: monochrome visual
    pub mono: Option<String>,
    /// Key `g`: grayscale visual
    pub gray: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_widths() {
        assert_eq!(Rgb::from_hex("#ff0000"), Ok(Rgb::new(255, 0, 0)));
        assert_eq!(Rgb::from_hex("#F80"), Ok(Rgb::new(255, 136, 0)));
        assert_eq!(Rgb::from_hex("#ffff80800000"), Ok(Rgb::new(255, 128, 0)));
        assert_eq!(Rgb::from_hex("#fff808000"), Ok(Rgb::new(255, 128, 0)));
        assert_eq!(Rgb::from_hex("#12345"), Err(ColorParseError::InvalidLength(5)));
        assert!(matches!(Rgb::from_hex("#gg0000"), Err(ColorParseError::InvalidHex(_))));
        assert_eq!(Rgb::from_hex("ff0000"), Err(ColorParseError::MissingHash));
    }

    #[test]
    fn color_spec_dispatches_on_shape() {
        assert_eq!("None".parse::<ColorSpec>(), Ok(ColorSpec::None));
        assert_eq!("#00FF00".parse::<ColorSpec>(), Ok(ColorSpec::Hex(Rgb::new(0, 255, 0))));
        assert_eq!("Light Blue".parse::<ColorSpec>(), Ok(ColorSpec::Named("light blue".into())));
        assert_eq!("".parse::<ColorSpec>(), Err(ColorParseError::Empty));
    }

    #[test]
    fn unit_channels_round() {
        assert_eq!(Rgb::from_unit([0.0, 0.5, 1.0]), Rgb::new(0, 128, 255));
        assert_eq!(Rgb::from_unit([-1.0, 0.2, 2.0]), Rgb::new(0, 51, 255));
    }

    #[test]
    fn displays_lower_hex() {
        assert_eq!(Rgb::new(10, 20, 255).to_string(), "#0a14ff");
    }
}
