/// Demonstrates how to create a png file from a [`Pixmap`]
/// using the [`image`] crate
///
use libxpm::{ColorResolver, Pixmap};

fn main() -> anyhow::Result<()> {
    let pixmap = Pixmap::from_file("../test_assets/smiley.xpm")?;

    let img = pixmap
        .to_pixel_grid(&ColorResolver::default())
        .to_rgba_image();

    img.save("xpm_to_png_example.png")?;
    Ok(())
}
