/// Demonstrates how to write both bitmap variants of a [`Pixmap`]
///
use libxpm::{image::write_bitmap, BitmapVariant, ColorResolver, Pixmap};

fn main() -> anyhow::Result<()> {
    let pixmap = Pixmap::from_file("../test_assets/cursor.xpm")?;
    let grid = pixmap.to_pixel_grid(&ColorResolver::default());

    write_bitmap("xpm_to_bmp_example.bmp", &grid.to_bitmap(BitmapVariant::Windows)?)?;
    write_bitmap("xpm_to_bmp_os2_example.bmp", &grid.to_bitmap(BitmapVariant::Os2)?)?;
    Ok(())
}
