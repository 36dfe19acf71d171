//! Loading of font files and derivation of the [`Metrics`] used for every glyph cell.

use core::{error, fmt};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

use ab_glyph::InvalidFont;
use log::{debug, info};

use crate::{
    face::{GlyphSource, TrueTypeFont},
    truncate_px,
};

/// Reads the file at `path` and parses it as a [`TrueTypeFont`].
///
/// The returned font owns the file's bytes for as long as it lives.
///
/// # Errors
///
/// - [`FontLoadError::Read`]: Returned if the file could not be read.
/// - [`FontLoadError::Parse`]: Returned if the file is not a valid font.
pub fn load_font(path: &Path) -> Result<TrueTypeFont, FontLoadError> {
    let data = fs::read(path).map_err(|source| FontLoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    info!("read {} bytes from \"{}\"", data.len(), path.display());

    TrueTypeFont::from_bytes(data).map_err(FontLoadError::Parse)
}

/// Font-wide metrics scaled to the requested cell height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Metrics {
    /// Pixels per font unit.
    pub scale: f32,
    /// Scaled ascent in whole pixels.
    pub ascent: i32,
    /// Scaled descent in whole pixels.
    pub descent: i32,
    /// Scaled line gap in whole pixels.
    pub line_gap: i32,
}

impl Metrics {
    /// Computes the [`Metrics`] of `source` for glyphs `height` pixels tall.
    #[expect(clippy::cast_precision_loss)]
    pub fn new<S: GlyphSource + ?Sized>(source: &S, height: usize) -> Self {
        let scale = source.scale_for_pixel_height(height as f32);
        let v_metrics = source.v_metrics();

        let metrics = Self {
            scale,
            ascent: truncate_px(v_metrics.ascent * scale),
            descent: truncate_px(v_metrics.descent * scale),
            line_gap: truncate_px(v_metrics.line_gap * scale),
        };
        debug!("metrics for {height}px: {metrics:?}");
        metrics
    }
}

/// Various errors that can occur while loading a font.
#[derive(Debug)]
pub enum FontLoadError {
    /// The font file could not be read.
    Read {
        /// The path of the font file.
        path: PathBuf,
        /// The underlying I/O error.
        source: io::Error,
    },
    /// The font file could not be parsed.
    Parse(InvalidFont),
}

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "error reading \"{}\": {source}", path.display())
            }
            Self::Parse(error) => write!(f, "failed to load ttf font: {error}"),
        }
    }
}

impl error::Error for FontLoadError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse(error) => Some(error),
        }
    }
}

#[cfg(test)]
mod test {
    use std::path::Path;

    use super::{FontLoadError, Metrics, load_font};
    use crate::face::test_source::FixedSource;

    #[test]
    fn missing_file() {
        let path = Path::new("this/font/does/not/exist.ttf");
        let Err(FontLoadError::Read { path: error_path, .. }) = load_font(path) else {
            panic!("expected a read error");
        };

        assert_eq!(error_path, path);
    }

    #[test]
    fn unparsable_file() {
        // The crate manifest is certainly not a font.
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");

        assert!(matches!(load_font(&path), Err(FontLoadError::Parse(_))));
    }

    #[test]
    fn metrics_are_scaled_and_truncated() {
        let metrics = Metrics::new(&FixedSource::default(), 16);

        assert_eq!(metrics.scale, 1.0 / 64.0);
        assert_eq!(metrics.ascent, 12);
        assert_eq!(metrics.descent, -4);
        assert_eq!(metrics.line_gap, 1);
    }

    #[test]
    fn metrics_truncate_towards_zero() {
        // 768 * 10 / 1024 = 7.5 and -256 * 10 / 1024 = -2.5.
        let metrics = Metrics::new(&FixedSource::default(), 10);

        assert_eq!(metrics.ascent, 7);
        assert_eq!(metrics.descent, -2);
        assert_eq!(metrics.line_gap, 0);
    }
}
