//! Rasterizes the first [`CODEPOINT_COUNT`] codepoints of a TrueType font into uniformly sized
//! coverage cells, emitted as a C array and a grayscale PNG contact sheet.
//!
//! The pipeline runs strictly in order: [`loader`] → [`layout`] → [`driver`] → [`emit`].

pub mod cli;
pub mod driver;
pub mod emit;
pub mod face;
pub mod layout;
pub mod loader;

/// The number of codepoints rasterized, starting at U+0000.
pub const CODEPOINT_COUNT: usize = 128;

/// Returns an [`Iterator`] over the rasterized codepoints in ascending order.
pub fn codepoints() -> impl Iterator<Item = char> + Clone {
    (0..=u8::MAX).take(CODEPOINT_COUNT).map(char::from)
}

/// Converts a pixel distance to a whole number of pixels, truncating towards zero.
#[expect(clippy::cast_possible_truncation)]
pub(crate) fn truncate_px(value: f32) -> i32 {
    value as i32
}
