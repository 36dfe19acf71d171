//! Interface for interacting with rasterized glyph cells.

use alloc::vec::Vec;

/// An ordered array of equally sized [`Glyph`] cells, where each pixel is an 8-bit coverage
/// value.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct GlyphArray {
    /// The buffer that contains the glyph data, one cell after another.
    buffer: Vec<u8>,
    /// The width of each glyph.
    width: usize,
    /// The height of each glyph.
    height: usize,
    /// The number of glyphs pushed so far.
    count: usize,
}

impl GlyphArray {
    /// Creates a new, empty [`GlyphArray`] of `width` by `height` cells with room for
    /// `capacity` glyphs.
    pub fn with_capacity(width: usize, height: usize, capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(width * height * capacity),
            width,
            height,
            count: 0,
        }
    }

    /// Appends a glyph cell given as `height` rows of `width` coverage values.
    ///
    /// # Panics
    ///
    /// Panics if `pixels` does not contain exactly `width * height` values.
    pub fn push(&mut self, pixels: &[u8]) {
        assert_eq!(
            pixels.len(),
            self.glyph_size(),
            "glyph cell must be {}x{} pixels",
            self.width,
            self.height
        );

        self.buffer.extend_from_slice(pixels);
        self.count += 1;
    }

    /// Returns the [`Glyph`] at `index` or `None` if out of bounds.
    pub fn get(&self, index: usize) -> Option<Glyph<'_>> {
        if index >= self.glyph_count() {
            return None;
        }

        let glyph_size = self.glyph_size();
        let glyph = Glyph {
            buffer: &self.buffer[index * glyph_size..(index + 1) * glyph_size],
            width: self.width,
            height: self.height,
        };
        Some(glyph)
    }

    /// Returns an [`Iterator`] over the [`Glyph`]s in order.
    pub fn iter(&self) -> impl Iterator<Item = Glyph<'_>> {
        (0..self.glyph_count()).filter_map(|index| self.get(index))
    }

    /// Returns the width of a [`Glyph`] in pixels.
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of [`Glyph`]s in this [`GlyphArray`].
    ///
    /// Zero-sized cells hold no data but are still counted.
    pub const fn glyph_count(&self) -> usize {
        self.count
    }

    /// Returns the number of coverage values in a single [`Glyph`].
    const fn glyph_size(&self) -> usize {
        self.width * self.height
    }
}

/// Stores the coverage of a specific glyph in a font.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Glyph<'buffer> {
    /// The buffer utilized to store the glyph.
    buffer: &'buffer [u8],
    /// The width of the glyph.
    width: usize,
    /// The height of the glyph.
    height: usize,
}

impl<'buffer> Glyph<'buffer> {
    /// Returns the coverage values of the [`Glyph`], row after row.
    pub const fn pixels(&self) -> &'buffer [u8] {
        self.buffer
    }
}

impl<'buffer> IntoIterator for Glyph<'buffer> {
    type IntoIter = GlyphRowsIter<'buffer>;
    type Item = GlyphRow<'buffer>;

    fn into_iter(self) -> Self::IntoIter {
        GlyphRowsIter {
            buffer: self.buffer,
            width: self.width,
            height: self.height,
            index: 0,
        }
    }
}

/// An [`Iterator`] over the rows of a [`Glyph`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct GlyphRowsIter<'buffer> {
    /// The buffer utilized to store the glyph.
    buffer: &'buffer [u8],
    /// The width of each row.
    width: usize,
    /// The height of the glyph.
    height: usize,
    /// The index of the row that will be returned next.
    index: usize,
}

impl<'buffer> Iterator for GlyphRowsIter<'buffer> {
    type Item = GlyphRow<'buffer>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.height {
            return None;
        }

        let row_start = self.width * self.index;

        self.index += 1;
        let row = GlyphRow {
            buffer: &self.buffer[row_start..row_start + self.width],
        };
        Some(row)
    }
}

/// A row in the [`Glyph`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct GlyphRow<'buffer> {
    /// The coverage values in the row.
    buffer: &'buffer [u8],
}

impl<'buffer> GlyphRow<'buffer> {
    /// Returns the coverage values in the row.
    pub const fn pixels(&self) -> &'buffer [u8] {
        self.buffer
    }
}

impl<'buffer> IntoIterator for GlyphRow<'buffer> {
    type Item = u8;
    type IntoIter = core::iter::Copied<core::slice::Iter<'buffer, u8>>;

    fn into_iter(self) -> Self::IntoIter {
        self.buffer.iter().copied()
    }
}
