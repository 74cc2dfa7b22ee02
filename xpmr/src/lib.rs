use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use image::ImageFormat;
use libxpm::{
    color::{
        escape::{self, ChartOptions},
        ColorFormat, ConvertedColor,
    },
    image::write_bitmap,
    BitmapVariant, ColorResolver, Pixmap, VimHighlights,
};
use tracing::{debug, info, instrument};

/// `input` with its extension replaced by `suffix`, next to the input
pub fn default_output(input: &Path, suffix: &str) -> Result<PathBuf> {
    let Some(dir) = input.parent() else {
        bail!("Invalid xpm file: {}", input.display());
    };
    let Some(Some(filename)) = input.file_stem().map(|os| os.to_str()) else {
        bail!("Invalid xpm file: {}", input.display());
    };
    let output = dir.join(format!("{filename}.{suffix}"));
    info!("output name: {}", output.display());
    Ok(output)
}

fn read_pixmap(xpm_file: &Path) -> Result<Pixmap> {
    Pixmap::from_file(xpm_file).with_context(|| format!("Failed to read {}", xpm_file.display()))
}

#[instrument]
pub fn xpm_to_bitmap(xpm_file: &Path, output_name: &Path, variant: BitmapVariant) -> Result<()> {
    let pixmap = read_pixmap(xpm_file)?;
    debug!("Read xpm from file");

    let grid = pixmap.to_pixel_grid(&ColorResolver::default());
    let bytes = grid.to_bitmap(variant)?;
    debug!("Encoded {} bitmap: {} bytes", variant, bytes.len());

    write_bitmap(output_name, &bytes)
        .with_context(|| format!("Failed to write {}", output_name.display()))?;
    info!("Successfully wrote bitmap to {}", output_name.display());
    Ok(())
}

#[instrument]
pub fn xpm_to_image(xpm_file: &Path, output_name: &Path) -> Result<()> {
    let format = ImageFormat::from_path(output_name)
        .with_context(|| format!("Unsupported image extension: {}", output_name.display()))?;
    let pixmap = read_pixmap(xpm_file)?;
    debug!("Read xpm from file");

    let img = pixmap
        .to_pixel_grid(&ColorResolver::default())
        .to_rgba_image();
    info!("Writing {format:?} image to {}", output_name.display());
    img.save_with_format(output_name, format)?;
    info!("Successfully wrote image to {}", output_name.display());
    Ok(())
}

/// Header and color table of a pixmap, one color per line with a swatch
#[instrument]
pub fn describe(xpm_file: &Path) -> Result<String> {
    let pixmap = read_pixmap(xpm_file)?;
    let resolver = ColorResolver::default();
    let header = pixmap.header();

    let mut out = format!(
        "{}: {}x{}, {} colors, {} char(s) per pixel",
        xpm_file.display(),
        header.width,
        header.height,
        header.num_colors,
        header.char_per_pixel
    );
    if let Some((x, y)) = header.hotspot {
        out.push_str(&format!(", hotspot ({x}, {y})"));
    }
    for entry in pixmap.color_table().values() {
        let swatch = resolver.resolve_truecolor(&entry.color).map_or_else(
            || "  ".to_owned(),
            |rgb| format!("{}  {}", escape::bg_truecolor(rgb), escape::RESET),
        );
        out.push_str(&format!("\n{swatch} {:?} {}", entry.symbol, entry.source));
        if let Some(name) = &entry.string {
            out.push_str(&format!(" ({name})"));
        }
    }
    Ok(out)
}

#[instrument]
pub fn vim_highlights(xpm_file: &Path, gui: bool) -> Result<String> {
    let pixmap = read_pixmap(xpm_file)?;
    let highlights = VimHighlights::new(&pixmap, &ColorResolver::default(), gui);
    Ok(highlights.to_script())
}

#[instrument]
pub fn convert_color(name: &str, format: ColorFormat) -> Result<String> {
    let Some(color) = ColorResolver::default().convert_color_name(name, format) else {
        bail!("Unknown color: {name}");
    };
    let swatch = match color {
        ConvertedColor::Full(rgb) => escape::bg_truecolor(rgb),
        ConvertedColor::Palette(index) => escape::bg256(index),
    };
    Ok(format!("{color} {swatch}  {}", escape::RESET))
}

pub fn palette(numbers: bool, decimal: bool) -> String {
    escape::palette_chart(
        ChartOptions::builder()
            .numbers(numbers)
            .decimal(decimal)
            .build(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use mktemp::Temp;

    #[test]
    fn output_next_to_input() {
        let out = default_output(Path::new("icons/smiley.xpm"), "bmp").unwrap();
        assert_eq!(out, PathBuf::from("icons/smiley.bmp"));
        let out = default_output(Path::new("smiley"), "png").unwrap();
        assert_eq!(out, PathBuf::from("smiley.png"));
    }

    #[test]
    fn image_format_from_extension() {
        let dir = Temp::new_dir().unwrap();
        let input = Path::new("../test_assets/smiley.xpm");

        let unknown = dir.join("smiley.xyz");
        let err = xpm_to_image(input, &unknown).unwrap_err();
        assert!(err.to_string().contains("Unsupported image extension"));
        assert!(!unknown.exists());

        let png = dir.join("smiley.png");
        xpm_to_image(input, &png).unwrap();
        assert_eq!(image::open(&png).unwrap().width(), 8);
    }

    #[test]
    fn color_conversion() {
        assert!(convert_color("red", ColorFormat::Palette)
            .unwrap()
            .starts_with("196 "));
        assert!(convert_color("red", ColorFormat::Full)
            .unwrap()
            .starts_with("#ff0000 "));
        assert!(convert_color("not a color", ColorFormat::Full).is_err());
    }
}
