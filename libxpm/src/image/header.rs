use bon::Builder;

/// The values line of an XPM file
///
/// ```"not rust"
/// <width> <height> <ncolors> <cpp> [<x_hotspot> <y_hotspot>]
/// ```
///
/// ## Note
///
/// A [`PixmapHeader`] on its own is unchecked. The invariants below are enforced when it is
/// combined with a color table and pixel rows into a [`super::Pixmap`]:
///
/// 1. every pixel row is `width * char_per_pixel` characters long
/// 2. there are `height` pixel rows
/// 3. the color table holds `num_colors` entries
#[derive(Builder, Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub struct PixmapHeader {
    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// Number of entries in the color table
    pub num_colors: u32,

    /// Characters per pixel
    ///
    /// Each pixel of a row is written as a symbol of this many characters
    pub char_per_pixel: u32,

    /// Optional hotspot coordinates, as used by cursors
    pub hotspot: Option<(u32, u32)>,
}

impl PixmapHeader {
    /// Serializes the header back into a values line
    #[must_use]
    pub fn into_values_line(self) -> String {
        let mut line = format!(
            "{} {} {} {}",
            self.width, self.height, self.num_colors, self.char_per_pixel
        );
        if let Some((x, y)) = self.hotspot {
            line.push_str(&format!(" {x} {y}"));
        }
        line
    }

    /// Number of characters of every pixel row
    #[must_use]
    pub const fn row_length(&self) -> usize {
        self.width as usize * self.char_per_pixel as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_line() {
        let header = PixmapHeader::builder()
            .width(16)
            .height(16)
            .num_colors(4)
            .char_per_pixel(2)
            .build();
        assert_eq!(header.into_values_line(), "16 16 4 2");
        assert_eq!(header.row_length(), 32);

        let header = PixmapHeader::builder()
            .width(3)
            .height(1)
            .num_colors(1)
            .char_per_pixel(1)
            .hotspot((1, 0))
            .build();
        assert_eq!(header.into_values_line(), "3 1 1 1 1 0");
    }
}
