//! Rasterization of every codepoint onto the shared [`Canvas`] and extraction of the fixed-size
//! glyph cells.
//!
//! Glyphs are laid out left to right along a cursor that advances by each glyph's scaled advance
//! and kerning, independently of the cell width. Each cell is then read back through a window of
//! `width` by `height` pixels anchored at the glyph's linear origin on the canvas, right after
//! the glyph is drawn. Because the window follows the cursor rather than the cell grid, a cell
//! may contain ink from previously drawn glyphs, and windows that leave the canvas read as zero.

use std::iter;

use font::{canvas::Canvas, glyph::GlyphArray};
use log::trace;

use crate::{
    CODEPOINT_COUNT, codepoints,
    face::{BitmapBox, GlyphSource},
    layout::CellGeometry,
    loader::Metrics,
    truncate_px,
};

/// The result of rasterizing every codepoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rasterization {
    /// One cell per codepoint, in codepoint order.
    pub glyphs: GlyphArray,
    /// The largest column within any cell that holds non-zero coverage, or zero if no cell does.
    pub max_ink_column: usize,
}

impl Rasterization {
    /// Returns a narrower cell width that would still hold every inked column, if one exists.
    pub fn suggested_width(&self) -> Option<usize> {
        let width = self.max_ink_column + 1;
        (width < self.glyphs.width()).then_some(width)
    }
}

/// Renders every codepoint of `source` onto `canvas` and extracts one cell per codepoint.
///
/// `canvas` must be zeroed and sized for `geometry`.
pub fn rasterize<S: GlyphSource + ?Sized>(
    source: &S,
    metrics: &Metrics,
    geometry: CellGeometry,
    canvas: &mut Canvas,
) -> Rasterization {
    let scale = metrics.scale;

    let mut glyphs = GlyphArray::with_capacity(geometry.width, geometry.height, CODEPOINT_COUNT);
    let mut cell = vec![0; geometry.width * geometry.height];
    let mut max_ink_column = 0;

    let mut cursor = 0i32;
    let successors = codepoints().skip(1).map(Some).chain(iter::once(None));
    for (codepoint, successor) in codepoints().zip(successors) {
        let h_metrics = source.h_metrics(codepoint);
        let bitmap_box = source.bitmap_box(codepoint, scale);

        // Glyphs that would start above the canvas are pushed down to its top edge.
        let top = (metrics.ascent + bitmap_box.y1).max(0);
        let bearing = i64::from(truncate_px((h_metrics.left_side_bearing * scale).floor()));
        let origin = canvas.linear_offset(i64::from(cursor) + bearing, i64::from(top));

        draw_glyph(source, codepoint, scale, bitmap_box, canvas, origin);

        for (row, cell_row) in cell.chunks_exact_mut(geometry.width.max(1)).enumerate() {
            for (column, value) in cell_row.iter_mut().enumerate() {
                let offset = canvas.linear_offset(signed(column), signed(row) - i64::from(top));
                *value = canvas.read_linear(origin + offset);
                if *value != 0 {
                    max_ink_column = max_ink_column.max(column);
                }
            }
        }
        glyphs.push(&cell);

        trace!("U+{:04X} at cursor {cursor}, top {top}: {bitmap_box:?}", u32::from(codepoint));

        cursor = advance_cursor(cursor, h_metrics.advance_width * scale);
        if let Some(successor) = successor {
            cursor = advance_cursor(cursor, source.kern_advance(codepoint, successor) * scale);
        }
    }

    Rasterization {
        glyphs,
        max_ink_column,
    }
}

/// Renders `codepoint` into `canvas`, clipped to `bitmap_box`, with the top-left corner of the
/// box at the linear `origin`.
fn draw_glyph<S: GlyphSource + ?Sized>(
    source: &S,
    codepoint: char,
    scale: f32,
    bitmap_box: BitmapBox,
    canvas: &mut Canvas,
    origin: i64,
) {
    let width = i64::from(bitmap_box.width());
    let height = i64::from(bitmap_box.height());

    source.render(codepoint, scale, &mut |x, y, coverage| {
        let (x, y) = (i64::from(x), i64::from(y));
        if x < width && y < height {
            let offset = canvas.linear_offset(x, y);
            canvas.write_linear(origin + offset, coverage);
        }
    });
}

/// Moves `cursor` by the fractional pixel distance `delta`, truncating the result.
#[expect(clippy::cast_precision_loss)]
fn advance_cursor(cursor: i32, delta: f32) -> i32 {
    truncate_px(cursor as f32 + delta)
}

/// Converts a cell coordinate into a signed canvas coordinate.
#[expect(clippy::cast_possible_wrap)]
const fn signed(value: usize) -> i64 {
    value as i64
}
