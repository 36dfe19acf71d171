//! Output of the rasterized cells as C source and of the canvas as a grayscale PNG.

use core::{error, fmt};
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use font::canvas::Canvas;
use log::{info, warn};

use crate::{driver::Rasterization, layout::CellGeometry};

/// Writes the cell size constants, the raster array and, if the cells are wider than any glyph
/// needs, an advisory comment to `writer`.
///
/// # Errors
///
/// Returns any error produced by `writer`.
pub fn write_source<W: Write>(
    mut writer: W,
    geometry: CellGeometry,
    rasterization: &Rasterization,
) -> io::Result<()> {
    write_header(&mut writer, geometry)?;
    write_raster_array(&mut writer, rasterization)?;

    if let Some(width) = rasterization.suggested_width() {
        warn!("no glyph needs more than {width} of the {} columns", geometry.width);
        writeln!(
            writer,
            "// warning : max character width was {width}. consider lowering the width parameter \
             to this value"
        )?;
    }

    Ok(())
}

/// Writes the `FONT_SIZE_X` and `FONT_SIZE_Y` constants describing `geometry`.
///
/// # Errors
///
/// Returns any error produced by `writer`.
pub fn write_header<W: Write>(mut writer: W, geometry: CellGeometry) -> io::Result<()> {
    writeln!(writer, "static const int FONT_SIZE_X = {};", geometry.width)?;
    writeln!(writer, "static const int FONT_SIZE_Y = {};", geometry.height)?;
    writeln!(writer)
}

/// Writes the `kFontRaster` array with one row of coverage values per codepoint.
///
/// # Errors
///
/// Returns any error produced by `writer`.
pub fn write_raster_array<W: Write>(
    mut writer: W,
    rasterization: &Rasterization,
) -> io::Result<()> {
    let glyphs = &rasterization.glyphs;

    writeln!(
        writer,
        "static const unsigned char kFontRaster[{}][FONT_SIZE_Y*FONT_SIZE_X] = {{",
        glyphs.glyph_count()
    )?;
    for (codepoint, glyph) in glyphs.iter().enumerate() {
        write!(writer, "    {{")?;
        for value in glyph.pixels() {
            write!(writer, " {value:3},")?;
        }
        writeln!(writer, " }}, // U+{codepoint:04}")?;
    }
    writeln!(writer, "}};")
}

/// Returns the name of the preview image for cells `height` pixels tall.
pub fn image_file_name(height: usize) -> String {
    format!("raster-h{height}.png")
}

/// Writes `canvas` to a new file at `path` as an 8-bit grayscale PNG.
///
/// Nothing is created if the canvas cannot be encoded.
///
/// # Errors
///
/// - [`ImageWriteError::InvalidDimensions`]: Returned if the canvas is empty or too large.
/// - [`ImageWriteError::Io`]: Returned if the file could not be created or written.
/// - [`ImageWriteError::Encoding`]: Returned if PNG encoding failed.
pub fn write_png(path: &Path, canvas: &Canvas) -> Result<(), ImageWriteError> {
    png_dimensions(canvas)?;

    let mut writer = BufWriter::new(File::create(path)?);
    encode_png(&mut writer, canvas)?;
    writer.flush()?;

    info!(
        "wrote {}x{} preview to \"{}\"",
        canvas.width(),
        canvas.height(),
        path.display()
    );
    Ok(())
}

/// Encodes `canvas` into `writer` as an 8-bit grayscale PNG with a stride of one canvas row.
///
/// # Errors
///
/// - [`ImageWriteError::InvalidDimensions`]: Returned if the canvas is empty or too large.
/// - [`ImageWriteError::Encoding`]: Returned if PNG encoding or writing failed.
pub fn encode_png<W: Write>(writer: W, canvas: &Canvas) -> Result<(), ImageWriteError> {
    let (width, height) = png_dimensions(canvas)?;

    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(png::ColorType::Grayscale);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(canvas.as_bytes())?;
    writer.finish()?;
    Ok(())
}

/// Returns the dimensions of `canvas` as PNG dimensions.
fn png_dimensions(canvas: &Canvas) -> Result<(u32, u32), ImageWriteError> {
    let invalid = || ImageWriteError::InvalidDimensions {
        width: canvas.width(),
        height: canvas.height(),
    };

    if canvas.is_empty() {
        return Err(invalid());
    }

    let width = u32::try_from(canvas.width()).map_err(|_| invalid())?;
    let height = u32::try_from(canvas.height()).map_err(|_| invalid())?;
    Ok((width, height))
}

/// Various errors that can occur while writing the preview image.
#[derive(Debug)]
pub enum ImageWriteError {
    /// The canvas cannot be stored in a PNG.
    InvalidDimensions {
        /// The width of the canvas.
        width: usize,
        /// The height of the canvas.
        height: usize,
    },
    /// The image file could not be created or written.
    Io(io::Error),
    /// The PNG encoder failed.
    Encoding(png::EncodingError),
}

impl From<io::Error> for ImageWriteError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<png::EncodingError> for ImageWriteError {
    fn from(value: png::EncodingError) -> Self {
        Self::Encoding(value)
    }
}

impl fmt::Display for ImageWriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => {
                write!(f, "cannot write a {width}x{height} image")
            }
            Self::Io(error) => write!(f, "error writing image: {error}"),
            Self::Encoding(error) => write!(f, "error encoding image: {error}"),
        }
    }
}

impl error::Error for ImageWriteError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::InvalidDimensions { .. } => None,
            Self::Io(error) => Some(error),
            Self::Encoding(error) => Some(error),
        }
    }
}

#[cfg(test)]
mod test {
    use std::fs;

    use font::{canvas::Canvas, glyph::GlyphArray};

    use super::{ImageWriteError, encode_png, image_file_name, write_png, write_source};
    use crate::{
        driver::{self, Rasterization},
        face::test_source::FixedSource,
        layout::{self, CellGeometry, SizeRequest},
        loader::Metrics,
    };

    fn tiny_rasterization(max_ink_column: usize) -> (CellGeometry, Rasterization) {
        let geometry = CellGeometry {
            width: 2,
            height: 2,
        };
        let mut glyphs = GlyphArray::with_capacity(2, 2, 2);
        glyphs.push(&[0, 7, 128, 255]);
        glyphs.push(&[0, 0, 0, 0]);

        let rasterization = Rasterization {
            glyphs,
            max_ink_column,
        };
        (geometry, rasterization)
    }

    fn source_text(geometry: CellGeometry, rasterization: &Rasterization) -> String {
        let mut output = Vec::new();
        write_source(&mut output, geometry, rasterization).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn source_layout() {
        let (geometry, rasterization) = tiny_rasterization(1);

        let expected = "\
static const int FONT_SIZE_X = 2;
static const int FONT_SIZE_Y = 2;

static const unsigned char kFontRaster[2][FONT_SIZE_Y*FONT_SIZE_X] = {
    {   0,   7, 128, 255, }, // U+0000
    {   0,   0,   0,   0, }, // U+0001
};
";
        assert_eq!(source_text(geometry, &rasterization), expected);
    }

    #[test]
    fn advisory_when_cells_are_too_wide() {
        let (geometry, rasterization) = tiny_rasterization(0);

        let text = source_text(geometry, &rasterization);
        assert!(text.ends_with(
            "};\n// warning : max character width was 1. consider lowering the width parameter \
             to this value\n"
        ));
    }

    #[test]
    fn full_raster_source() {
        let source = FixedSource::default();
        let request = SizeRequest::new(16, 0).unwrap();
        let metrics = Metrics::new(&source, request.height());
        let geometry = layout::plan(&source, &metrics, request).unwrap();
        let mut canvas = geometry.canvas();
        let rasterization = driver::rasterize(&source, &metrics, geometry, &mut canvas);

        let text = source_text(geometry, &rasterization);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("static const int FONT_SIZE_X = 9;"));
        assert_eq!(lines.next(), Some("static const int FONT_SIZE_Y = 16;"));

        let rows = text
            .lines()
            .filter(|line| line.starts_with("    {"))
            .collect::<Vec<_>>();
        assert_eq!(rows.len(), 128);
        for (codepoint, row) in rows.iter().enumerate() {
            assert!(row.ends_with(&format!(" }}, // U+{codepoint:04}")));

            let values = row
                .trim_start_matches("    {")
                .split(" },")
                .next()
                .unwrap()
                .split(',')
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(|value| value.parse::<u8>().unwrap())
                .collect::<Vec<_>>();
            assert_eq!(values.len(), 144);
        }

        assert!(text.contains("// warning : max character width was 7."));
        assert_eq!(source_text(geometry, &rasterization), text);
    }

    #[test]
    fn png_round_trip_preserves_canvas() {
        let mut canvas = Canvas::new(5, 3);
        canvas.set(0, 0, 255);
        canvas.set(4, 2, 17);

        let mut encoded = Vec::new();
        encode_png(&mut encoded, &canvas).unwrap();

        let decoder = png::Decoder::new(encoded.as_slice());
        let mut reader = decoder.read_info().unwrap();
        let mut pixels = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut pixels).unwrap();

        assert_eq!((info.width, info.height), (5, 3));
        assert_eq!(info.color_type, png::ColorType::Grayscale);
        assert_eq!(info.bit_depth, png::BitDepth::Eight);
        assert_eq!(&pixels[..info.buffer_size()], canvas.as_bytes());
    }

    #[test]
    fn empty_canvas_is_rejected_without_creating_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");

        let result = write_png(&path, &Canvas::new(0, 16));

        assert!(matches!(
            result,
            Err(ImageWriteError::InvalidDimensions {
                width: 0,
                height: 16
            })
        ));
        assert!(!path.exists());
    }

    #[test]
    fn unwritable_path_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("raster-h16.png");

        let result = write_png(&path, &Canvas::new(4, 4));

        assert!(matches!(result, Err(ImageWriteError::Io(_))));
    }

    #[test]
    fn writes_png_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(image_file_name(16));
        let canvas = Canvas::new(1152, 16);

        write_png(&path, &canvas).unwrap();

        let decoder = png::Decoder::new(fs::File::open(&path).unwrap());
        let reader = decoder.read_info().unwrap();
        assert_eq!((reader.info().width, reader.info().height), (1152, 16));
    }

    #[test]
    fn image_name_includes_height() {
        assert_eq!(image_file_name(16), "raster-h16.png");
    }
}
