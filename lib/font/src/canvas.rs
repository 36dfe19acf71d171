//! Single-channel coverage buffer onto which glyphs are rasterized.

use alloc::{vec, vec::Vec};

/// A zero-initialized, row-major buffer of 8-bit coverage values.
///
/// Pixels can be addressed either by `(x, y)` or by a linear offset `x + y * width`. Linear
/// addressing mirrors a flat buffer with a stride equal to [`Canvas::width()`]: a run of pixels
/// that passes the right edge continues on the next row. Neither form of access ever touches
/// memory outside of the buffer.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Canvas {
    /// The coverage values, `width * height` bytes.
    buffer: Vec<u8>,
    /// The number of pixels in each row.
    width: usize,
    /// The number of rows.
    height: usize,
}

impl Canvas {
    /// Creates a new [`Canvas`] of `width` by `height` pixels with every pixel set to zero.
    ///
    /// # Panics
    ///
    /// Panics if `width * height` overflows [`usize`].
    pub fn new(width: usize, height: usize) -> Self {
        let size = width.strict_mul(height);

        Self {
            buffer: vec![0; size],
            width,
            height,
        }
    }

    /// Returns the width of the [`Canvas`] in pixels. This is also the stride of a row.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Returns the height of the [`Canvas`] in pixels.
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns `true` if the [`Canvas`] contains no pixels.
    pub const fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns the underlying row-major pixel buffer.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Returns the pixels of row `y`, or `None` if `y` is out of bounds.
    pub fn row(&self, y: usize) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }

        let start = y * self.width;
        Some(&self.buffer[start..start + self.width])
    }

    /// Returns the coverage at `(x, y)`, or `None` if the pixel is out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width {
            return None;
        }

        self.row(y).map(|row| row[x])
    }

    /// Sets the coverage at `(x, y)`, returning `false` if the pixel is out of bounds.
    pub fn set(&mut self, x: usize, y: usize, value: u8) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }

        self.buffer[y * self.width + x] = value;
        true
    }

    /// Returns the linear offset of `(x, y)`. Either coordinate may lie outside of the
    /// [`Canvas`].
    #[expect(clippy::cast_possible_wrap)]
    pub const fn linear_offset(&self, x: i64, y: i64) -> i64 {
        x + y * self.width as i64
    }

    /// Returns the coverage stored at the linear `offset`, or `0` if `offset` lies outside of
    /// the buffer.
    pub fn read_linear(&self, offset: i64) -> u8 {
        self.linear_index(offset).map_or(0, |index| self.buffer[index])
    }

    /// Stores `value` at the linear `offset`, returning `false` if `offset` lies outside of the
    /// buffer.
    pub fn write_linear(&mut self, offset: i64, value: u8) -> bool {
        match self.linear_index(offset) {
            Some(index) => {
                self.buffer[index] = value;
                true
            }
            None => false,
        }
    }

    /// Converts a linear `offset` into an index into `buffer`.
    fn linear_index(&self, offset: i64) -> Option<usize> {
        let index = usize::try_from(offset).ok()?;
        (index < self.buffer.len()).then_some(index)
    }
}
