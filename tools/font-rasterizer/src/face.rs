//! The font capabilities needed to lay out and rasterize glyph cells, and their implementation
//! for TrueType/OpenType fonts.
//!
//! All metrics are reported in font units unless a `scale` is supplied, in which case the
//! result is in pixels. Vertical pixel coordinates grow downwards from the baseline.

use ab_glyph::{Font, FontVec, GlyphId, InvalidFont, OutlinedGlyph, PxScale};

/// Vertical metrics shared by every glyph in a font.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VMetrics {
    /// Distance from the baseline to the top of the tallest glyph.
    pub ascent: f32,
    /// Distance from the baseline to the bottom of the lowest glyph, usually negative.
    pub descent: f32,
    /// Additional spacing between consecutive lines.
    pub line_gap: f32,
}

/// Horizontal metrics of a single glyph.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HMetrics {
    /// Distance the cursor moves after the glyph.
    pub advance_width: f32,
    /// Offset from the glyph origin to the left edge of its ink.
    pub left_side_bearing: f32,
}

/// The pixel bounding box of a scaled glyph, relative to its origin on the baseline.
///
/// `(x1, y1)` is the inclusive top-left corner and `(x2, y2)` the exclusive bottom-right corner.
/// A glyph without an outline has an all-zero box.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct BitmapBox {
    /// Left edge.
    pub x1: i32,
    /// Top edge.
    pub y1: i32,
    /// Right edge.
    pub x2: i32,
    /// Bottom edge.
    pub y2: i32,
}

impl BitmapBox {
    /// Returns the width of the box in pixels.
    pub const fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    /// Returns the height of the box in pixels.
    pub const fn height(&self) -> i32 {
        self.y2 - self.y1
    }
}

/// Provider of glyph metrics and glyph coverage for codepoints.
pub trait GlyphSource {
    /// Returns the factor that scales font units so that `ascent - descent` spans `height`
    /// pixels.
    fn scale_for_pixel_height(&self, height: f32) -> f32;

    /// Returns the unscaled [`VMetrics`] of the font.
    fn v_metrics(&self) -> VMetrics;

    /// Returns the unscaled [`HMetrics`] of `codepoint`.
    fn h_metrics(&self, codepoint: char) -> HMetrics;

    /// Returns the [`BitmapBox`] of `codepoint` when rendered with `scale`.
    fn bitmap_box(&self, codepoint: char, scale: f32) -> BitmapBox;

    /// Returns the unscaled kerning adjustment applied between `first` and `second`.
    fn kern_advance(&self, first: char, second: char) -> f32;

    /// Renders `codepoint` at `scale`, calling `plot` with the position of each pixel relative
    /// to the top-left corner of its [`BitmapBox`] and the pixel's coverage.
    fn render(&self, codepoint: char, scale: f32, plot: &mut dyn FnMut(u32, u32, u8));
}

/// A parsed TrueType or OpenType font that owns its backing bytes.
pub struct TrueTypeFont {
    /// The parsed font.
    font: FontVec,
}

impl TrueTypeFont {
    /// Parses `data` as the first face of a TrueType or OpenType font.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidFont`] if `data` is not a font that can be parsed.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self, InvalidFont> {
        FontVec::try_from_vec(data).map(|font| Self { font })
    }

    /// Returns the [`GlyphId`] mapped to `codepoint`, or the missing glyph.
    fn glyph_id(&self, codepoint: char) -> GlyphId {
        self.font.glyph_id(codepoint)
    }

    /// Returns the outline of `codepoint` at `scale` positioned at the origin.
    fn outline(&self, codepoint: char, scale: f32) -> Option<OutlinedGlyph> {
        let px_scale = PxScale::from(scale * self.font.height_unscaled());
        let glyph = self.glyph_id(codepoint).with_scale(px_scale);
        self.font.outline_glyph(glyph)
    }
}

impl GlyphSource for TrueTypeFont {
    fn scale_for_pixel_height(&self, height: f32) -> f32 {
        height / self.font.height_unscaled()
    }

    fn v_metrics(&self) -> VMetrics {
        VMetrics {
            ascent: self.font.ascent_unscaled(),
            descent: self.font.descent_unscaled(),
            line_gap: self.font.line_gap_unscaled(),
        }
    }

    fn h_metrics(&self, codepoint: char) -> HMetrics {
        let id = self.glyph_id(codepoint);
        HMetrics {
            advance_width: self.font.h_advance_unscaled(id),
            left_side_bearing: self.font.h_side_bearing_unscaled(id),
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    fn bitmap_box(&self, codepoint: char, scale: f32) -> BitmapBox {
        let Some(outline) = self.outline(codepoint, scale) else {
            return BitmapBox::default();
        };

        // `px_bounds` is already rounded outwards to whole pixels.
        let bounds = outline.px_bounds();
        BitmapBox {
            x1: bounds.min.x as i32,
            y1: bounds.min.y as i32,
            x2: bounds.max.x as i32,
            y2: bounds.max.y as i32,
        }
    }

    fn kern_advance(&self, first: char, second: char) -> f32 {
        self.font.kern_unscaled(self.glyph_id(first), self.glyph_id(second))
    }

    fn render(&self, codepoint: char, scale: f32, plot: &mut dyn FnMut(u32, u32, u8)) {
        if let Some(outline) = self.outline(codepoint, scale) {
            outline.draw(|x, y, coverage| plot(x, y, coverage_to_byte(coverage)));
        }
    }
}

/// Converts a fractional coverage into an 8-bit coverage value.
#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn coverage_to_byte(coverage: f32) -> u8 {
    // Float to integer casts saturate, which clamps accumulated coverage above 1.0.
    (coverage * 255.0).round() as u8
}


#[cfg(test)]
mod test {
    use super::{BitmapBox, GlyphSource, TrueTypeFont, coverage_to_byte};
    use crate::layout::max_advance_width;

    /// DejaVu Sans Mono, 2048 units per em with an ascent of 1901 and a descent of -483.
    const MONO_FONT: &[u8] = include_bytes!("../tests/fonts/DejaVuSansMono.ttf");

    fn mono_font() -> TrueTypeFont {
        TrueTypeFont::from_bytes(MONO_FONT.to_vec()).unwrap()
    }

    #[test]
    fn coverage_rounds_and_saturates() {
        assert_eq!(coverage_to_byte(0.0), 0);
        assert_eq!(coverage_to_byte(0.5), 128);
        assert_eq!(coverage_to_byte(1.0), 255);
        assert_eq!(coverage_to_byte(1.2), 255);
        assert_eq!(coverage_to_byte(-0.1), 0);
    }

    #[test]
    fn bitmap_box_dimensions() {
        let bitmap_box = BitmapBox {
            x1: -1,
            y1: -11,
            x2: 8,
            y2: 3,
        };

        assert_eq!(bitmap_box.width(), 9);
        assert_eq!(bitmap_box.height(), 14);
        assert_eq!(BitmapBox::default().width(), 0);
    }

    #[test]
    fn rejects_non_font_bytes() {
        assert!(TrueTypeFont::from_bytes(b"definitely not a font".to_vec()).is_err());
        assert!(TrueTypeFont::from_bytes(Vec::new()).is_err());
    }

    #[test]
    fn scale_spans_ascent_to_descent() {
        let font = mono_font();
        let v_metrics = font.v_metrics();

        assert_eq!((v_metrics.ascent, v_metrics.descent), (1901.0, -483.0));

        let scale = font.scale_for_pixel_height(16.0);
        assert!(((v_metrics.ascent - v_metrics.descent) * scale - 16.0).abs() < 1e-4);
    }

    #[test]
    fn monospace_advances() {
        let font = mono_font();

        assert_eq!(font.h_metrics('A').advance_width, 1233.0);
        assert_eq!(font.h_metrics('i').advance_width, 1233.0);

        // 1233 * 16 / 2384 = 8.27
        let scale = font.scale_for_pixel_height(16.0);
        assert_eq!(max_advance_width(&font, scale), 8);
    }

    #[test]
    fn blank_glyphs_have_no_box() {
        let font = mono_font();
        let scale = font.scale_for_pixel_height(16.0);

        assert_eq!(font.bitmap_box(' ', scale), BitmapBox::default());

        let mut plotted = 0;
        font.render(' ', scale, &mut |_, _, _| plotted += 1);
        assert_eq!(plotted, 0);
    }

    #[test]
    fn rendered_pixels_stay_inside_the_box() {
        let font = mono_font();
        let scale = font.scale_for_pixel_height(16.0);

        let bitmap_box = font.bitmap_box('A', scale);
        assert!(bitmap_box.y1 < -5, "{bitmap_box:?}");
        assert!((0..=1).contains(&bitmap_box.y2), "{bitmap_box:?}");
        assert!((1..=9).contains(&bitmap_box.width()), "{bitmap_box:?}");

        let width = u32::try_from(bitmap_box.width()).unwrap();
        let height = u32::try_from(bitmap_box.height()).unwrap();
        let mut inked = 0;
        font.render('A', scale, &mut |x, y, coverage| {
            assert!(x < width && y < height, "({x}, {y}) outside {bitmap_box:?}");
            if coverage != 0 {
                inked += 1;
            }
        });
        assert!(inked > 0);
    }
}
