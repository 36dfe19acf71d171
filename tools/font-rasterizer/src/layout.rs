//! Planning of the uniform glyph cell size and the canvas holding every cell.

use core::{error, fmt};

use font::canvas::Canvas;
use log::info;

use crate::{CODEPOINT_COUNT, codepoints, face::GlyphSource, loader::Metrics, truncate_px};

/// A validated request for the size of each glyph cell.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct SizeRequest {
    /// The height of each cell in pixels.
    height: usize,
    /// The width of each cell in pixels, or `None` if it should be derived from the font.
    width: Option<usize>,
}

impl SizeRequest {
    /// Validates the requested `height` and `width`. A `width` of zero requests that the width be
    /// derived from the font.
    ///
    /// # Errors
    ///
    /// - [`LayoutError::NonPositiveHeight`]: Returned if `height` is zero or negative.
    /// - [`LayoutError::NegativeWidth`]: Returned if `width` is negative.
    pub fn new(height: i32, width: i32) -> Result<Self, LayoutError> {
        let height = match usize::try_from(height) {
            Ok(0) | Err(_) => return Err(LayoutError::NonPositiveHeight(height)),
            Ok(height) => height,
        };

        let width = match usize::try_from(width) {
            Ok(0) => None,
            Ok(width) => Some(width),
            Err(_) => return Err(LayoutError::NegativeWidth(width)),
        };

        Ok(Self { height, width })
    }

    /// Returns the requested cell height in pixels.
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns the requested cell width in pixels, if one was given.
    pub const fn width(&self) -> Option<usize> {
        self.width
    }
}

/// The size of every glyph cell.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct CellGeometry {
    /// The width of a cell in pixels.
    pub width: usize,
    /// The height of a cell in pixels.
    pub height: usize,
}

impl CellGeometry {
    /// Returns the width of a canvas that holds every cell side by side.
    pub const fn canvas_width(&self) -> usize {
        CODEPOINT_COUNT * self.width
    }

    /// Returns the height of a canvas that holds every cell side by side.
    pub const fn canvas_height(&self) -> usize {
        self.height
    }

    /// Creates a zeroed [`Canvas`] that holds every cell side by side.
    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.canvas_width(), self.canvas_height())
    }
}

/// Determines the [`CellGeometry`] for `request`.
///
/// A requested width is used as is. Otherwise the cell is as wide as the widest scaled advance
/// among the rasterized codepoints.
///
/// # Errors
///
/// Returns [`LayoutError::TooLarge`] if a canvas holding every cell cannot be allocated.
pub fn plan<S: GlyphSource + ?Sized>(
    source: &S,
    metrics: &Metrics,
    request: SizeRequest,
) -> Result<CellGeometry, LayoutError> {
    let width = match request.width() {
        Some(width) => width,
        None => max_advance_width(source, metrics.scale),
    };

    let geometry = CellGeometry {
        width,
        height: request.height(),
    };
    let too_large = LayoutError::TooLarge {
        width: geometry.width,
        height: geometry.height,
    };
    let size = CODEPOINT_COUNT
        .checked_mul(geometry.width)
        .and_then(|canvas_width| canvas_width.checked_mul(geometry.height))
        .ok_or(too_large)?;
    if isize::try_from(size).is_err() {
        return Err(too_large);
    }

    info!(
        "cells are {}x{} pixels, canvas is {}x{} pixels",
        geometry.width,
        geometry.height,
        geometry.canvas_width(),
        geometry.canvas_height()
    );
    Ok(geometry)
}

/// Returns the widest advance among the rasterized codepoints after scaling by `scale` and
/// truncating to whole pixels.
pub fn max_advance_width<S: GlyphSource + ?Sized>(source: &S, scale: f32) -> usize {
    let max = codepoints()
        .map(|codepoint| truncate_px(source.h_metrics(codepoint).advance_width * scale))
        .fold(0, i32::max);

    usize::try_from(max).unwrap_or_default()
}

/// Various errors that can occur while planning the glyph cells.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum LayoutError {
    /// The requested height was not positive.
    NonPositiveHeight(i32),
    /// The requested width was negative.
    NegativeWidth(i32),
    /// A canvas holding every cell would not fit in memory.
    TooLarge {
        /// The width of a cell.
        width: usize,
        /// The height of a cell.
        height: usize,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveHeight(height) => {
                write!(f, "cell height must be positive, got {height}")
            }
            Self::NegativeWidth(width) => write!(f, "cell width must not be negative, got {width}"),
            Self::TooLarge { width, height } => {
                write!(f, "{CODEPOINT_COUNT} cells of {width}x{height} pixels do not fit in memory")
            }
        }
    }
}

impl error::Error for LayoutError {}
