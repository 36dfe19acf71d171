//! Command line parsing and [`Config`] construction.

use std::{ffi::OsString, path::PathBuf};

use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};

/// Description of the font to rasterize and the requested cell size.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Config {
    /// The path of the font file.
    pub font_path: PathBuf,
    /// The requested cell height in pixels.
    pub height: i32,
    /// The requested cell width in pixels, or zero to derive it from the font.
    pub width: i32,
}

/// Parses the process arguments to construct a [`Config`].
///
/// # Errors
///
/// Returns [`clap::Error`] if the arguments are incomplete or help was requested.
pub fn get_config() -> Result<Config, clap::Error> {
    parse_from(std::env::args_os())
}

/// Parses `args`, including the program name, to construct a [`Config`].
///
/// # Errors
///
/// Returns [`clap::Error`] if the arguments are incomplete or help was requested.
pub fn parse_from<I, T>(args: I) -> Result<Config, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = command_parser().try_get_matches_from(args)?;
    Ok(parse_arguments(&matches))
}

/// Parses the arguments required to produce a valid [`Config`].
pub fn parse_arguments(matches: &ArgMatches) -> Config {
    let font_path = matches
        .get_one::<PathBuf>("font")
        .cloned()
        .unwrap_or_else(|| unreachable!("`font` is a required argument"));

    let height = matches
        .get_one::<String>("height")
        .map(|height| parse_lenient_int(height))
        .unwrap_or_else(|| unreachable!("`height` is a required argument"));

    let width = matches
        .get_one::<String>("width")
        .map_or(0, |width| parse_lenient_int(width));

    Config {
        font_path,
        height,
        width,
    }
}

/// Returns the command parser for `font-rasterizer`.
pub fn command_parser() -> Command {
    let font = Arg::new("font")
        .value_name("FONT")
        .help("The TrueType or OpenType font to rasterize")
        .value_parser(value_parser!(PathBuf))
        .required(true);

    let height = Arg::new("height")
        .value_name("HEIGHT")
        .help("The height of each cell in pixels")
        .allow_hyphen_values(true)
        .required(true);

    let width = Arg::new("width")
        .value_name("WIDTH")
        .help("The width of each cell in pixels, overriding the detected width")
        .allow_hyphen_values(true);

    let ignored = Arg::new("ignored")
        .num_args(1..)
        .action(ArgAction::Append)
        .allow_hyphen_values(true)
        .hide(true);

    Command::new("font-rasterizer")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Rasterizes the first 128 codepoints of a font into fixed-size cells")
        .after_help(
            "The raster is printed to standard output as a C array and a preview is written to \
             raster-h<HEIGHT>.png in the current directory.",
        )
        .arg(font)
        .arg(height)
        .arg(width)
        .arg(ignored)
}

/// Parses the leading integer of `value` the way C's `atoi` does.
///
/// Leading whitespace and a single sign are accepted, parsing stops at the first non-digit, and
/// a value without any digits is zero. Values outside of the [`i32`] range saturate.
pub fn parse_lenient_int(value: &str) -> i32 {
    let value = value.trim_start_matches([' ', '\t', '\n', '\x0B', '\x0C', '\r']);
    let (negative, digits) = match value.as_bytes().first() {
        Some(b'-') => (true, &value[1..]),
        Some(b'+') => (false, &value[1..]),
        _ => (false, value),
    };

    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, digit| {
            acc.saturating_mul(10)
                .saturating_add(i64::from(digit - b'0'))
        });
    let signed = if negative { -magnitude } else { magnitude };

    i32::try_from(signed).unwrap_or(if negative { i32::MIN } else { i32::MAX })
}
