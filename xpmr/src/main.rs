use libxpm::{color::ColorFormat, BitmapVariant};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use xpmr::{
    convert_color, default_output, describe, palette, vim_highlights, xpm_to_bitmap, xpm_to_image,
};

use anyhow::Result;
use clap::{Parser, Subcommand};

#[cfg(not(debug_assertions))]
const DEFAULT_DEBUG_LEVEL: u8 = 1;
#[cfg(debug_assertions)]
const DEFAULT_DEBUG_LEVEL: u8 = 99;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Turn debugging information on (ignored when RUST_LOG is set)
    #[arg(short, long, default_value_t = DEFAULT_DEBUG_LEVEL, action = clap::ArgAction::Count)]
    verbosity: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// converts an XPM image to a 24-bit BMP
    #[command(name = "xpmbmp")]
    XpmToBitmap {
        /// The xpm image
        xpm_file: PathBuf,

        /// The output file name
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// The bitmap header layout, "Windows" or "OS/2"
        #[arg(long, default_value = "Windows", value_parser = BitmapVariant::from_name)]
        variant: BitmapVariant,
    },

    /// converts an XPM image to a different image format (PNG by default)
    #[command(name = "xpmimg")]
    XpmToImage {
        /// The xpm image
        xpm_file: PathBuf,

        /// The output file name, its extension selects the format
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// prints the header and color table of an XPM image
    Info {
        /// The xpm image
        xpm_file: PathBuf,
    },

    /// prints vim commands highlighting every symbol of an XPM image in its color
    Vim {
        /// The xpm image
        xpm_file: PathBuf,

        /// Use 256-color palette indices (ctermfg/ctermbg) instead of gui colors
        #[arg(long)]
        cterm: bool,
    },

    /// converts a color name or hex value to truecolor or a 256-color palette index
    Color {
        /// The color name
        name: String,

        /// Print the nearest 256-color palette index
        #[arg(short, long)]
        palette: bool,
    },

    /// prints the 256-color terminal palette
    Palette {
        /// Print the index of every color
        #[arg(short, long)]
        numbers: bool,

        /// Print indices in decimal instead of hexadecimal
        #[arg(short, long)]
        decimal: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .init();
    } else {
        let level = match cli.verbosity {
            0 => Level::ERROR,
            1 => Level::WARN,
            2 => Level::INFO,
            3 => Level::DEBUG,
            _ => Level::TRACE,
        };
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command {
        Commands::XpmToBitmap {
            xpm_file,
            output,
            variant,
        } => {
            let output = match output {
                Some(o) => o,
                None => default_output(&xpm_file, "bmp")?,
            };
            xpm_to_bitmap(&xpm_file, &output, variant)?;
        }
        Commands::XpmToImage { xpm_file, output } => {
            let output = match output {
                Some(o) => o,
                None => default_output(&xpm_file, "png")?,
            };
            xpm_to_image(&xpm_file, &output)?;
        }
        Commands::Info { xpm_file } => println!("{}", describe(&xpm_file)?),
        Commands::Vim { xpm_file, cterm } => println!("{}", vim_highlights(&xpm_file, !cterm)?),
        Commands::Color {
            name,
            palette: to_palette,
        } => {
            let format = if to_palette {
                ColorFormat::Palette
            } else {
                ColorFormat::Full
            };
            println!("{}", convert_color(&name, format)?);
        }
        Commands::Palette { numbers, decimal } => print!("{}", palette(numbers, decimal)),
    }
    Ok(())
}
