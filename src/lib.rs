//! # zenblit
//!
//! Pixel format conversion and rectangle blitting for remote-display
//! pipelines.
//!
//! ## Formats
//!
//! Twenty-one fixed wire formats at 32, 24, 16, 15, 8, 4 and 1 bits per
//! pixel, identified by stable `u32` ids that encode depth and channel
//! order. Colors move between any two convertible formats through a generic
//! pack/split pair, with palette lookup for 8-bit indexed sources.
//!
//! ## Blitting
//!
//! [`image_copy`] converts a rectangle between two non-overlapping buffers.
//! [`image_copy_within`] and [`image_copy_overlap`] handle single-buffer
//! moves, picking a scan order (or staging rows) so overlapping rectangles
//! copy correctly. [`image_fill`] floods a rectangle with one color, and
//! [`image_scale`] resamples between differently sized rectangles behind
//! the `resample` feature.
//!
//! Decoders for the bit-packed payloads that ride alongside plain bitmaps
//! are included: 1-bpp glyphs ([`glyph_convert`],
//! [`image_copy_from_monochrome`]), icons with AND masks
//! ([`image_copy_from_icon`]), and pointer shapes
//! ([`image_copy_from_cursor`]).
//!
//! ## Non-Goals
//!
//! - Compressed bitmap codecs (RLE, planar, interleaved)
//! - Color management and gamma handling
//! - SIMD; the [`CopyBackend`] trait is the seam for accelerated copies
//!
//! ## Usage
//!
//! ```no_run
//! use zenblit::{image_copy, CopyFlags, PixelFormat};
//!
//! let src = vec![0u8; 64 * 64 * 4];
//! let mut dst = vec![0u8; 64 * 64 * 2];
//!
//! // Convert a 64x64 BGRA rectangle to RGB 5-6-5.
//! image_copy(
//!     &mut dst, PixelFormat::Rgb16, 0, 0, 0, 64, 64,
//!     &src, PixelFormat::Bgra32, 0, 0, 0,
//!     None, CopyFlags::empty(),
//! )?;
//! # Ok::<(), zenblit::BlitError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod backend;
mod color;
mod copy;
mod cursor;
mod error;
mod format;
mod glyph;
mod icon;
mod scale;

// Re-exports
pub use backend::{CopyBackend, GenericBackend};
pub use color::{
    convert_color, pack_color, read_color, split_color, write_color, write_color_ignore_alpha,
};
pub use copy::{
    image_copy, image_copy_overlap, image_copy_with, image_copy_within, image_copy_within_with,
    image_fill,
};
pub use cursor::{image_copy_from_cursor, inverted_cursor_color};
pub use error::BlitError;
pub use format::{CopyFlags, Palette, PixelFormat};
pub use glyph::{glyph_convert, image_copy_from_monochrome};
pub use icon::image_copy_from_icon;
pub use rgb::Rgba;
pub use scale::image_scale;
