//! # escraster CLI
//!
//! Command-line front end for the raster image encoder.
//!
//! ## Usage
//!
//! ```bash
//! # List printer presets
//! escraster printers
//!
//! # Encode a PNG for an 80mm printer, write commands to a file
//! escraster encode logo.png -o logo.bin
//!
//! # 58mm upside-down printer, centered, no dithering
//! escraster encode --printer 58mm --upside-down --align center --no-dither logo.png > /dev/usb/lp0
//!
//! # Several images concatenated, plus a PNG preview of the first one
//! escraster encode --preview preview.png header.png body.png -o job.bin
//!
//! # Input files hold base64 payloads (bare or data: URLs)
//! escraster encode --base64 logo.b64 -o logo.bin
//! ```
//!
//! Set `RUST_LOG=debug` to see per-image encoding details on stderr.

use clap::{Parser, Subcommand};
use rayon::prelude::*;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use escraster::{
    DecodedImage, EncodeError, EncoderConfig, PrinterConfig, encoder, protocol::layout::Alignment,
    raster::Bitmap,
};

/// escraster - ESC/POS raster image encoder
#[derive(Parser, Debug)]
#[command(name = "escraster")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode images as raster bitmap commands
    Encode {
        /// Image files to encode, in print order ("-" reads stdin)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Write commands to FILE instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Printer preset ("80mm", "58mm", "tm-t88", "custom:WIDTH[xROWS]")
        #[arg(long, default_value = "80mm")]
        printer: String,

        /// JSON encoder config; flags given on the command line override it
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Image alignment (left, center, right)
        #[arg(long)]
        align: Option<Alignment>,

        /// Left margin in dots
        #[arg(long)]
        left_margin: Option<u16>,

        /// Right margin in dots
        #[arg(long)]
        right_margin: Option<u16>,

        /// Printer gamma
        #[arg(long)]
        gamma: Option<f64>,

        /// Binarization threshold (0-255)
        #[arg(long)]
        threshold: Option<u8>,

        /// Flat thresholding instead of error diffusion
        #[arg(long)]
        no_dither: bool,

        /// Print mechanism is mounted upside-down
        #[arg(long)]
        upside_down: bool,

        /// Maximum rows per raster command
        #[arg(long)]
        chunk_rows: Option<u16>,

        /// Omit the margin/alignment prefix
        #[arg(long)]
        no_layout: bool,

        /// Inputs contain base64 payloads instead of binary images
        #[arg(long)]
        base64: bool,

        /// Save the packed bitmap of the first input as a PNG
        #[arg(long, value_name = "FILE")]
        preview: Option<PathBuf>,
    },

    /// List printer presets
    Printers,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), EncodeError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Printers => {
            println!("Available printers:");
            for printer in PrinterConfig::built_in() {
                println!(
                    "  {:<14} {} dots ({:.0}mm) @ {} DPI, {} rows/chunk",
                    printer.name,
                    printer.width_dots,
                    printer.width_mm(),
                    printer.dpi,
                    printer.max_chunk_rows
                );
            }
        }
        Commands::Encode {
            inputs,
            output,
            printer,
            config,
            align,
            left_margin,
            right_margin,
            gamma,
            threshold,
            no_dither,
            upside_down,
            chunk_rows,
            no_layout,
            base64,
            preview,
        } => {
            let printer = PrinterConfig::parse(&printer).map_err(EncodeError::InvalidConfig)?;
            let mut config = match config {
                Some(path) => {
                    EncoderConfig::from_json_file_with(path, EncoderConfig::for_printer(&printer))?
                }
                None => EncoderConfig::for_printer(&printer),
            };

            if let Some(align) = align {
                config.alignment = align;
            }
            if let Some(left) = left_margin {
                config.left_margin = left;
            }
            if let Some(right) = right_margin {
                config.right_margin = right;
            }
            if let Some(gamma) = gamma {
                config.gamma = gamma;
            }
            if let Some(threshold) = threshold {
                config.threshold = threshold;
            }
            if let Some(rows) = chunk_rows {
                config.max_chunk_rows = rows;
            }
            config.dithering &= !no_dither;
            config.upside_down |= upside_down;
            config.emit_layout &= !no_layout;
            config.validate()?;

            // Each input owns its own error buffer, so they encode independently.
            let encoded = inputs
                .par_iter()
                .map(|path| encode_input(path, &config, base64))
                .collect::<Result<Vec<_>, _>>()?;

            if let Some(preview_path) = preview
                && let Some((bitmap, _)) = encoded.first()
            {
                save_png(&preview_path, bitmap)?;
                info!(path = %preview_path.display(), "Saved preview");
            }

            let commands: Vec<u8> = encoded.into_iter().flat_map(|(_, bytes)| bytes).collect();
            match output {
                Some(path) => std::fs::write(&path, &commands)?,
                None => {
                    let mut stdout = std::io::stdout().lock();
                    stdout.write_all(&commands)?;
                    stdout.flush()?;
                }
            }
        }
    }

    Ok(())
}

/// Decode, rasterize and frame one input.
fn encode_input(
    path: &Path,
    config: &EncoderConfig,
    base64: bool,
) -> Result<(Bitmap, Vec<u8>), EncodeError> {
    let raw = read_input(path)?;
    let image = if base64 {
        let text = String::from_utf8(raw)
            .map_err(|e| EncodeError::Image(format!("{}: not UTF-8 text: {}", path.display(), e)))?;
        DecodedImage::from_base64(&text)?
    } else {
        DecodedImage::from_bytes(&raw)?
    };

    let buffer = image.as_pixel_buffer()?;
    let bitmap = config.rasterizer().rasterize(&buffer);
    let commands = encoder::frame(&bitmap, config)?;

    info!(
        path = %path.display(),
        width = image.width,
        height = image.height,
        bytes = commands.len(),
        "Encoded image"
    );
    Ok((bitmap, commands))
}

fn read_input(path: &Path) -> Result<Vec<u8>, EncodeError> {
    if path == Path::new("-") {
        let mut data = Vec::new();
        std::io::stdin().lock().read_to_end(&mut data)?;
        Ok(data)
    } else {
        Ok(std::fs::read(path)?)
    }
}

/// Save a packed bitmap as a PNG (black = inked dot)
fn save_png(path: &Path, bitmap: &Bitmap) -> Result<(), EncodeError> {
    use image::{GrayImage, Luma};

    let mut img = GrayImage::new(bitmap.width() as u32, bitmap.height() as u32);
    for y in 0..bitmap.height() {
        for x in 0..bitmap.width() {
            let color = if bitmap.is_ink(x, y) { 0u8 } else { 255u8 };
            img.put_pixel(x as u32, y as u32, Luma([color]));
        }
    }

    img.save(path)
        .map_err(|e| EncodeError::Image(format!("Failed to save PNG: {}", e)))?;

    Ok(())
}
