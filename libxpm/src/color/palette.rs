use strum::{Display, EnumIter, EnumString, FromRepr, IntoStaticStr};

use super::Rgb;

/// The 16 system colors occupying indices 0-15 of the 256-color palette
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    FromRepr,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum SystemColor {
    Black = 0,
    Maroon,
    Green,
    Olive,
    Navy,
    Purple,
    Teal,
    Silver,
    Grey,
    Red,
    Lime,
    Yellow,
    Blue,
    Fuchsia,
    Aqua,
    White,
}

impl SystemColor {
    /// The truecolor value of the system color
    #[must_use]
    pub const fn rgb(self) -> Rgb {
        match self {
            Self::Black => Rgb::new(0x00, 0x00, 0x00),
            Self::Maroon => Rgb::new(0x80, 0x00, 0x00),
            Self::Green => Rgb::new(0x00, 0x80, 0x00),
            Self::Olive => Rgb::new(0x80, 0x80, 0x00),
            Self::Navy => Rgb::new(0x00, 0x00, 0x80),
            Self::Purple => Rgb::new(0x80, 0x00, 0x80),
            Self::Teal => Rgb::new(0x00, 0x80, 0x80),
            Self::Silver => Rgb::new(0xc0, 0xc0, 0xc0),
            Self::Grey => Rgb::new(0x80, 0x80, 0x80),
            Self::Red => Rgb::new(0xff, 0x00, 0x00),
            Self::Lime => Rgb::new(0x00, 0xff, 0x00),
            Self::Yellow => Rgb::new(0xff, 0xff, 0x00),
            Self::Blue => Rgb::new(0x00, 0x00, 0xff),
            Self::Fuchsia => Rgb::new(0xff, 0x00, 0xff),
            Self::Aqua => Rgb::new(0x00, 0xff, 0xff),
            Self::White => Rgb::new(0xff, 0xff, 0xff),
        }
    }
}

// first index of the 6x6x6 cube and of the grayscale ramp
const CUBE_START: u8 = 16;
const GRAY_START: u8 = 232;

/// The 256-color terminal palette: 16 system colors, a 6x6x6 cube and a 24-step grayscale ramp
pub static PALETTE: [Rgb; 256] = build_palette();

#[allow(clippy::cast_possible_truncation)]
const fn build_palette() -> [Rgb; 256] {
    let mut palette = [Rgb::BLACK; 256];
    let mut i = 0;
    while i < 256 {
        palette[i] = palette_index_to_truecolor(i as u8);
        i += 1;
    }
    palette
}

const fn cube_level(index: u8) -> u8 {
    if index == 0 {
        0
    } else {
        55 + 40 * index
    }
}

/// Maps a palette index to its truecolor value
///
/// This is the approximate inverse of [`quantize_to_palette`]: the cube region (16-231)
/// round-trips exactly, the system colors and the grayscale ramp do not.
#[must_use]
pub const fn palette_index_to_truecolor(index: u8) -> Rgb {
    if index < CUBE_START {
        match SystemColor::from_repr(index) {
            Some(color) => color.rgb(),
            None => Rgb::BLACK,
        }
    } else if index < GRAY_START {
        let i = index - CUBE_START;
        Rgb::new(cube_level(i / 36), cube_level((i % 36) / 6), cube_level(i % 6))
    } else {
        let level = 8 + 10 * (index - GRAY_START);
        Rgb::new(level, level, level)
    }
}

// `round((c - 55) / 40)` with halves rounded up, clamped at zero:
// floor((c - 55) / 40 + 0.5) == floor((c - 35) / 40)
const fn cube_index(channel: u8) -> u8 {
    channel.saturating_sub(35) / 40
}

/// Quantizes a truecolor value to the nearest entry of the 6x6x6 cube (indices 16-231)
///
/// The mapping is lossy and never selects a system color or a gray ramp entry. Terminal
/// renderers depend on its exact output.
#[must_use]
pub const fn quantize_to_palette(rgb: Rgb) -> u8 {
    36 * cube_index(rgb.r) + 6 * cube_index(rgb.g) + cube_index(rgb.b) + CUBE_START
}
