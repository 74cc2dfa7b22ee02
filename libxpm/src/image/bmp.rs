use std::{io::Write, path::Path};

use strum::{Display, EnumIter, IntoStaticStr};
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument, trace};

use crate::error::Error;

// 'BM'
const SIGNATURE: [u8; 2] = [0x42, 0x4d];
const FILE_HEADER_SIZE: u32 = 0x0e;
const WINDOWS_INFO_HEADER_SIZE: u32 = 0x28;
const OS2_INFO_HEADER_SIZE: u32 = 0x0c;
const PLANES: u16 = 1;
const BITS_PER_PIXEL: u16 = 24;
// BI_RGB
const NO_COMPRESSION: u32 = 0;

/// The two bitmap info header layouts
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
pub enum BitmapVariant {
    /// `BITMAPINFOHEADER`, 40 bytes, 4-byte width/height
    #[default]
    #[strum(serialize = "Windows")]
    Windows,
    /// `BITMAPCOREHEADER`, 12 bytes, 2-byte width/height
    #[strum(serialize = "OS/2")]
    Os2,
}

impl BitmapVariant {
    /// Parses a variant name: `Windows` or `OS/2` (`os2` is accepted too), ignoring case
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedBitmapVariant`] for any other name
    pub fn from_name(name: &str) -> Result<Self, Error> {
        match name.to_ascii_lowercase().as_str() {
            "windows" => Ok(Self::Windows),
            "os/2" | "os2" => Ok(Self::Os2),
            _ => Err(Error::UnsupportedBitmapVariant(name.to_owned())),
        }
    }

    const fn info_header_size(self) -> u32 {
        match self {
            Self::Windows => WINDOWS_INFO_HEADER_SIZE,
            Self::Os2 => OS2_INFO_HEADER_SIZE,
        }
    }
}

/// Layout of the raster data handed to [`encode_bitmap`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorType {
    /// 3 bytes per pixel
    Rgb8,
    /// 4 bytes per pixel, the alpha channel is dropped when encoding
    Rgba8,
}

impl ColorType {
    /// Bytes per pixel
    #[must_use]
    pub const fn channels(self) -> usize {
        match self {
            Self::Rgb8 => 3,
            Self::Rgba8 => 4,
        }
    }
}

fn too_large(width: u32, height: u32) -> Error {
    Error::DimensionsTooLarge { width, height }
}

/// Encodes row-major, top-to-bottom raster data as an uncompressed 24-bit bitmap
///
/// Rows are stored bottom-up as `B, G, R` triples, each row zero-padded to a multiple of
/// 4 bytes. No color table is written. Bitmaps have no alpha, so RGBA input loses it.
///
/// # Errors
///
/// Nothing is produced if:
/// - `data` is not `width * height * channels` bytes long
/// - the dimensions do not fit the header fields of `variant`, or the file would exceed 4 GiB
#[instrument(skip(data), level = "debug")]
pub fn encode_bitmap(
    data: &[u8],
    width: u32,
    height: u32,
    color: ColorType,
    variant: BitmapVariant,
) -> Result<Vec<u8>, Error> {
    let channels = color.channels();
    let (w, h) = (width as usize, height as usize);
    if w.checked_mul(h).and_then(|n| n.checked_mul(channels)) != Some(data.len()) {
        return Err(Error::MismatchDimensions {
            width,
            height,
            channels,
            data_length: data.len(),
        });
    }

    let row_length = w * 3;
    let padding = (4 - row_length % 4) % 4;
    let image_size =
        u32::try_from((row_length + padding) * h).map_err(|_| too_large(width, height))?;
    // no color table for 24-bit bitmaps
    let color_table_length = 0;
    let offset = FILE_HEADER_SIZE + variant.info_header_size() + color_table_length;
    let file_size = offset
        .checked_add(image_size)
        .ok_or_else(|| too_large(width, height))?;
    debug!("{width}x{height}, {variant} bitmap, offset: {offset}, file size: {file_size}");

    // width and height fields, 4 signed bytes each (Windows) or 2 unsigned bytes each (OS/2)
    let dimensions: Vec<u8> = match variant {
        BitmapVariant::Windows => {
            let bmp_width = i32::try_from(width).map_err(|_| too_large(width, height))?;
            let bmp_height = i32::try_from(height).map_err(|_| too_large(width, height))?;
            [bmp_width.to_le_bytes(), bmp_height.to_le_bytes()].concat()
        }
        BitmapVariant::Os2 => {
            let bmp_width = u16::try_from(width).map_err(|_| too_large(width, height))?;
            let bmp_height = u16::try_from(height).map_err(|_| too_large(width, height))?;
            [bmp_width.to_le_bytes(), bmp_height.to_le_bytes()].concat()
        }
    };

    let mut buf = Vec::with_capacity(file_size as usize);

    // file header
    buf.extend_from_slice(&SIGNATURE);
    buf.extend_from_slice(&file_size.to_le_bytes());
    buf.extend_from_slice(&0u16.to_le_bytes());
    buf.extend_from_slice(&0u16.to_le_bytes());
    buf.extend_from_slice(&offset.to_le_bytes());

    // info header
    buf.extend_from_slice(&variant.info_header_size().to_le_bytes());
    buf.extend_from_slice(&dimensions);
    buf.extend_from_slice(&PLANES.to_le_bytes());
    buf.extend_from_slice(&BITS_PER_PIXEL.to_le_bytes());
    if variant == BitmapVariant::Windows {
        buf.extend_from_slice(&NO_COMPRESSION.to_le_bytes());
        buf.extend_from_slice(&image_size.to_le_bytes());
        // horizontal and vertical resolution
        buf.extend_from_slice(&0u32.to_le_bytes());
        buf.extend_from_slice(&0u32.to_le_bytes());
        // palette size, then important colors (0 = all)
        buf.extend_from_slice(&(color_table_length / 4).to_le_bytes());
        buf.extend_from_slice(&0u32.to_le_bytes());
    }
    debug_assert_eq!(buf.len(), offset as usize);

    // pixel data starts at the bottom left
    let stride = w * channels;
    if stride > 0 {
        for row in data.chunks_exact(stride).rev() {
            for pixel in row.chunks_exact(channels) {
                buf.extend_from_slice(&[pixel[2], pixel[1], pixel[0]]);
            }
            buf.extend(std::iter::repeat(0).take(padding));
        }
    }
    trace!("pixel data: {} bytes", buf.len() - offset as usize);
    debug_assert_eq!(buf.len(), file_size as usize);

    Ok(buf)
}

/// Writes a complete file at once: the bytes go to a uniquely named temporary file next to
/// `filename`, which is then renamed over the destination
///
/// # Errors
///
/// This will error if unable to write the temporary file or to rename it. The temporary file is
/// removed on failure and the destination is left untouched.
pub fn write_bitmap(filename: impl AsRef<Path>, bytes: &[u8]) -> Result<(), Error> {
    let filename = filename.as_ref();
    let dir = match filename.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    trace!("temporary bitmap file: {}", tmp.path().display());
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(filename).map_err(|e| e.error)?;
    info!("wrote {} bytes to {}", bytes.len(), filename.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u32_at(buf: &[u8], at: usize) -> u32 {
        u32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
    }

    fn u16_at(buf: &[u8], at: usize) -> u16 {
        u16::from_le_bytes([buf[at], buf[at + 1]])
    }

    #[test]
    fn single_pixel_windows() {
        let buf =
            encode_bitmap(&[10, 20, 30], 1, 1, ColorType::Rgb8, BitmapVariant::Windows).unwrap();
        assert_eq!(buf.len(), 58);
        assert_eq!(&buf[..2], b"BM");
        assert_eq!(u32_at(&buf, 0x02), 58);
        assert_eq!(u32_at(&buf, 0x06), 0);
        assert_eq!(buf[0x0a], 54);
        assert_eq!(u32_at(&buf, 0x0a), 54);
        assert_eq!(u32_at(&buf, 0x0e), 40);
        assert_eq!(u32_at(&buf, 0x12), 1);
        assert_eq!(u32_at(&buf, 0x16), 1);
        assert_eq!(u16_at(&buf, 0x1a), 1);
        assert_eq!(u16_at(&buf, 0x1c), 24);
        assert_eq!(u32_at(&buf, 0x1e), 0);
        assert_eq!(u32_at(&buf, 0x22), 4);
        assert_eq!(&buf[54..], &[30, 20, 10, 0]);
    }

    #[test]
    fn os2_header_and_bottom_up_rows() {
        // 2x2: top row red, green; bottom row blue, white
        let data = [255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255];
        let buf = encode_bitmap(&data, 2, 2, ColorType::Rgb8, BitmapVariant::Os2).unwrap();
        let offset = 14 + 12;
        assert_eq!(u32_at(&buf, 0x0a), offset);
        assert_eq!(u32_at(&buf, 0x0e), 12);
        assert_eq!(u16_at(&buf, 0x12), 2);
        assert_eq!(u16_at(&buf, 0x14), 2);
        assert_eq!(u16_at(&buf, 0x16), 1);
        assert_eq!(u16_at(&buf, 0x18), 24);
        // 6 bytes per row + 2 padding
        assert_eq!(buf.len(), offset as usize + 16);
        assert_eq!(u32_at(&buf, 0x02) as usize, buf.len());
        let pixels = &buf[offset as usize..];
        assert_eq!(&pixels[..8], &[255, 0, 0, 255, 255, 255, 0, 0]);
        assert_eq!(&pixels[8..], &[0, 0, 255, 0, 255, 0, 0, 0]);
    }

    #[test]
    fn alpha_is_dropped() {
        let rgba = encode_bitmap(
            &[1, 2, 3, 0, 4, 5, 6, 255],
            2,
            1,
            ColorType::Rgba8,
            BitmapVariant::Windows,
        )
        .unwrap();
        let rgb = encode_bitmap(&[1, 2, 3, 4, 5, 6], 2, 1, ColorType::Rgb8, BitmapVariant::Windows)
            .unwrap();
        assert_eq!(rgba, rgb);
        assert_eq!(&rgb[54..], &[3, 2, 1, 6, 5, 4, 0, 0]);
    }

    #[test]
    fn rows_aligned_to_four_bytes_need_no_padding() {
        let data = vec![7; 4 * 3 * 2];
        let buf = encode_bitmap(&data, 4, 2, ColorType::Rgb8, BitmapVariant::Windows).unwrap();
        assert_eq!(buf.len(), 54 + 24);
        assert_eq!(u32_at(&buf, 0x22), 24);
    }

    #[test]
    fn rejects_bad_input_before_encoding() {
        assert!(matches!(
            encode_bitmap(&[1, 2], 1, 1, ColorType::Rgb8, BitmapVariant::Windows),
            Err(Error::MismatchDimensions { data_length: 2, .. })
        ));
        assert!(matches!(
            encode_bitmap(&[], 70_000, 0, ColorType::Rgb8, BitmapVariant::Os2),
            Err(Error::DimensionsTooLarge { width: 70_000, .. })
        ));
    }

    #[test]
    fn variant_names() {
        assert_eq!(BitmapVariant::from_name("Windows").unwrap(), BitmapVariant::Windows);
        assert_eq!(BitmapVariant::from_name("OS/2").unwrap(), BitmapVariant::Os2);
        assert_eq!(BitmapVariant::from_name("os2").unwrap(), BitmapVariant::Os2);
        assert!(matches!(
            BitmapVariant::from_name("Amiga"),
            Err(Error::UnsupportedBitmapVariant(name)) if name == "Amiga"
        ));
        assert_eq!(BitmapVariant::Os2.to_string(), "OS/2");
    }
}
