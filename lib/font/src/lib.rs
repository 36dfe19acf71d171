//! Defines the coverage canvas and glyph cell structures produced by `font-rasterizer`.
//!
//! Only `alloc` is required, so the structures can be consumed by `no_std` code that embeds
//! the generated raster.
#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod canvas;
pub mod glyph;
