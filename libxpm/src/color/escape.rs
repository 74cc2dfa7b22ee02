//! ANSI escape sequences for terminal colors and a 256-color palette chart.

use bon::Builder;
use core::fmt::Write;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use super::Rgb;

/// Resets all attributes
pub const RESET: &str = "\x1b[0m";

/// The 8 base terminal colors, keyed by their one-letter names
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr,
)]
pub enum BaseColor {
    /// `k`
    #[strum(serialize = "k")]
    Black,
    /// `r`
    #[strum(serialize = "r")]
    Red,
    /// `g`
    #[strum(serialize = "g")]
    Green,
    /// `y`
    #[strum(serialize = "y")]
    Yellow,
    /// `b`
    #[strum(serialize = "b")]
    Blue,
    /// `m`
    #[strum(serialize = "m")]
    Magenta,
    /// `c`
    #[strum(serialize = "c")]
    Cyan,
    /// `w`
    #[strum(serialize = "w")]
    White,
}

impl BaseColor {
    const fn code(self) -> u8 {
        match self {
            Self::Black => 0,
            Self::Red => 1,
            Self::Green => 2,
            Self::Yellow => 3,
            Self::Blue => 4,
            Self::Magenta => 5,
            Self::Cyan => 6,
            Self::White => 7,
        }
    }

    /// Foreground escape sequence, `ESC[3Nm`
    #[must_use]
    pub fn fg(self) -> String {
        format!("\x1b[3{}m", self.code())
    }

    /// Background escape sequence, `ESC[4Nm`
    #[must_use]
    pub fn bg(self) -> String {
        format!("\x1b[4{}m", self.code())
    }
}

/// Foreground escape sequence for a 256-color palette index
#[must_use]
pub fn fg256(index: u8) -> String {
    format!("\x1b[38;5;{index}m")
}

/// Background escape sequence for a 256-color palette index
#[must_use]
pub fn bg256(index: u8) -> String {
    format!("\x1b[48;5;{index}m")
}

/// Foreground escape sequence for a 24-bit color
#[must_use]
pub fn fg_truecolor(rgb: Rgb) -> String {
    format!("\x1b[38;2;{};{};{}m", rgb.r, rgb.g, rgb.b)
}

/// Background escape sequence for a 24-bit color
#[must_use]
pub fn bg_truecolor(rgb: Rgb) -> String {
    format!("\x1b[48;2;{};{};{}m", rgb.r, rgb.g, rgb.b)
}

/// How [`palette_chart`] labels its cells
#[derive(Builder, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartOptions {
    /// Print the palette index inside each cell
    #[builder(default)]
    pub numbers: bool,
    /// Print indices in decimal instead of hexadecimal
    #[builder(default)]
    pub decimal: bool,
}

impl ChartOptions {
    // label of a system color or cube cell: white text on even indices, black on odd ones
    fn label(self, index: u8, separator: &str) -> String {
        if !self.numbers {
            return "  ".to_owned();
        }
        let fg = if index % 2 == 0 {
            BaseColor::White.fg()
        } else {
            BaseColor::Black.fg()
        };
        if self.decimal {
            format!("{fg}{index:03}{RESET}{separator}")
        } else {
            format!("{fg}{index:02x}{RESET}")
        }
    }

    fn gray_label(self, index: u8) -> String {
        if !self.numbers {
            return "  ".to_owned();
        }
        // text runs from the lightest gray down while the cells get lighter
        let fg = fg256(255 - (index - 232));
        if self.decimal {
            format!("{fg}{index:03}{RESET}|")
        } else {
            format!("{fg}{index:02x}{RESET}")
        }
    }
}

fn cell(out: &mut String, index: u8, label: &str) {
    let _ = write!(out, "{}{label}{RESET}", bg256(index));
}

/// Renders the 256-color palette as three blocks: the 16 system colors,
/// the 6x6x6 cube and the grayscale ramp
#[must_use]
pub fn palette_chart(options: ChartOptions) -> String {
    let mut out = String::from("system colors\n");
    for row in [0..8u8, 8..16] {
        for i in row {
            cell(&mut out, i, &options.label(i, "|"));
        }
        out.push('\n');
    }
    out.push('\n');

    out.push_str("6x6x6 color blocks\n");
    for g in 0..6u8 {
        for r in 0..6u8 {
            for b in 0..6u8 {
                let i = 36 * r + 6 * g + b + 16;
                cell(&mut out, i, &options.label(i, ""));
            }
            out.push(' ');
        }
        out.push('\n');
    }
    out.push('\n');

    out.push_str("gray scales\n");
    for i in 232..=255u8 {
        cell(&mut out, i, &options.gray_label(i));
    }
    out.push_str("\n\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_colors() {
        assert_eq!("r".parse::<BaseColor>().unwrap().fg(), "\x1b[31m");
        assert_eq!("k".parse::<BaseColor>().unwrap().bg(), "\x1b[40m");
        assert_eq!(BaseColor::White.bg(), "\x1b[47m");
        assert_eq!(BaseColor::Cyan.fg(), "\x1b[36m");
        assert!("x".parse::<BaseColor>().is_err());
    }

    #[test]
    fn indexed_and_truecolor() {
        assert_eq!(fg256(196), "\x1b[38;5;196m");
        assert_eq!(bg256(0), "\x1b[48;5;0m");
        assert_eq!(fg_truecolor(Rgb::new(1, 2, 3)), "\x1b[38;2;1;2;3m");
        assert_eq!(bg_truecolor(Rgb::new(255, 0, 10)), "\x1b[48;2;255;0;10m");
    }

    #[test]
    fn chart_layout() {
        let chart = palette_chart(ChartOptions::default());
        let lines: Vec<_> = chart.lines().collect();
        assert_eq!(lines[0], "system colors");
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "6x6x6 color blocks");
        assert_eq!(lines[11], "");
        assert_eq!(lines[12], "gray scales");
        assert_eq!(lines.len(), 15);
        assert_eq!(chart.matches(RESET).count(), 256);
        assert!(lines[1].starts_with(&format!("{}  {RESET}", bg256(0))));
        assert!(lines[5].starts_with(&format!("{}  {RESET}{}  {RESET}", bg256(16), bg256(17))));
        assert_eq!(lines[5].matches(' ').count(), 6 * 6 * 2 + 6);
    }

    #[test]
    fn chart_numbers() {
        let decimal = palette_chart(ChartOptions::builder().numbers(true).decimal(true).build());
        assert!(decimal.contains(&format!(
            "{}{}007{RESET}|{RESET}",
            bg256(7),
            BaseColor::Black.fg()
        )));
        assert!(decimal.contains(&format!("{}{}232{RESET}|{RESET}", bg256(232), fg256(255))));

        let hex = palette_chart(ChartOptions::builder().numbers(true).build());
        assert!(hex.contains(&format!("{}{}e7{RESET}{RESET}", bg256(231), BaseColor::Black.fg())));
        assert!(hex.contains(&format!("{}{}ff{RESET}{RESET}", bg256(255), fg256(232))));
    }
}
