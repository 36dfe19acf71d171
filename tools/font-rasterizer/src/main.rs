//! Rasterizes the first 128 codepoints of a TrueType font into fixed-size cells, printing them
//! as a C array and saving the whole raster as a grayscale PNG.

use std::{
    io::{self, BufWriter, Write},
    path::Path,
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use font_rasterizer::{
    cli::{self, Config},
    driver,
    emit::{self, ImageWriteError},
    layout::{self, LayoutError, SizeRequest},
    loader::{self, FontLoadError, Metrics},
};

/// Exit code when the arguments are incomplete (`-1`).
const USAGE_EXIT_CODE: u8 = 255;
/// Exit code when the font could not be read or parsed (`-2`).
const FONT_LOAD_EXIT_CODE: u8 = 254;
/// Exit code when the requested cell size is invalid (`-3`).
const LAYOUT_EXIT_CODE: u8 = 253;
/// Exit code when the preview image could not be written (`-4`).
const IMAGE_WRITE_EXIT_CODE: u8 = 252;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match cli::get_config() {
        Ok(config) => config,
        Err(error) if matches!(error.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            error.exit()
        }
        Err(error) => {
            log::debug!("{error}");
            println!("{}", cli::command_parser().render_long_help());
            return ExitCode::from(USAGE_EXIT_CODE);
        }
    };

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(exit_code(&error))
        }
    }
}

/// Loads the font described by `config`, prints its raster to standard output and writes the
/// preview image to the current directory.
fn run(config: &Config) -> Result<()> {
    let font = loader::load_font(&config.font_path)?;

    let request = SizeRequest::new(config.height, config.width)?;
    let metrics = Metrics::new(&font, request.height());
    let geometry = layout::plan(&font, &metrics, request)?;

    let mut canvas = geometry.canvas();
    let rasterization = driver::rasterize(&font, &metrics, geometry, &mut canvas);

    let mut stdout = BufWriter::new(io::stdout().lock());
    emit::write_source(&mut stdout, geometry, &rasterization)
        .and_then(|()| stdout.flush())
        .context("failed to write raster to standard output")?;

    let image_path = emit::image_file_name(geometry.height);
    emit::write_png(Path::new(&image_path), &canvas)
        .with_context(|| format!("failed to write \"{image_path}\""))?;

    Ok(())
}

/// Returns the exit code reported for `error`.
fn exit_code(error: &anyhow::Error) -> u8 {
    if error.is::<FontLoadError>() {
        FONT_LOAD_EXIT_CODE
    } else if error.is::<LayoutError>() {
        LAYOUT_EXIT_CODE
    } else if error.is::<ImageWriteError>() {
        IMAGE_WRITE_EXIT_CODE
    } else {
        1
    }
}
