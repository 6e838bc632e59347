//! Non-overlapping copy backends.
//!
//! The copy engine delegates every non-overlapping blit to a [`CopyBackend`].
//! [`GenericBackend`] is the portable scalar implementation and the default;
//! callers with accelerated primitives (SIMD, GPU upload paths) implement the
//! trait and pass their backend to the `*_with` entry points. The crate holds
//! no process-wide backend handle.

use crate::color::{read_color, write_color, write_color_ignore_alpha};
use crate::copy::{RunCache, check_rect, check_size, resolve_stride, source_row};
use crate::{BlitError, CopyFlags, Palette, PixelFormat};

/// A rectangle copier for non-overlapping source and destination buffers.
pub trait CopyBackend {
    /// Copies a `width` x `height` rectangle from `src` at (`src_x`,
    /// `src_y`) to `dst` at (`dst_x`, `dst_y`), converting between the two
    /// formats. Strides are in bytes, 0 meaning tightly packed rows of
    /// `width` pixels. The slices are distinct, so no aliasing is possible.
    #[allow(clippy::too_many_arguments)]
    fn copy_no_overlap(
        &self,
        dst: &mut [u8],
        dst_format: PixelFormat,
        dst_stride: usize,
        dst_x: u32,
        dst_y: u32,
        width: u32,
        height: u32,
        src: &[u8],
        src_format: PixelFormat,
        src_stride: usize,
        src_x: u32,
        src_y: u32,
        palette: Option<&Palette>,
        flags: CopyFlags,
    ) -> Result<(), BlitError>;
}

/// Portable scalar copy implementation, used when no accelerated backend is
/// injected.
#[derive(Clone, Copy, Debug, Default)]
pub struct GenericBackend;

impl CopyBackend for GenericBackend {
    fn copy_no_overlap(
        &self,
        dst: &mut [u8],
        dst_format: PixelFormat,
        dst_stride: usize,
        dst_x: u32,
        dst_y: u32,
        width: u32,
        height: u32,
        src: &[u8],
        src_format: PixelFormat,
        src_stride: usize,
        src_x: u32,
        src_y: u32,
        palette: Option<&Palette>,
        flags: CopyFlags,
    ) -> Result<(), BlitError> {
        generic_copy_no_overlap(
            dst, dst_format, dst_stride, dst_x, dst_y, width, height, src, src_format, src_stride,
            src_x, src_y, palette, flags,
        )
    }
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn generic_copy_no_overlap(
    dst: &mut [u8],
    dst_format: PixelFormat,
    dst_stride: usize,
    dst_x: u32,
    dst_y: u32,
    width: u32,
    height: u32,
    src: &[u8],
    src_format: PixelFormat,
    src_stride: usize,
    src_x: u32,
    src_y: u32,
    palette: Option<&Palette>,
    flags: CopyFlags,
) -> Result<(), BlitError> {
    check_size(width, height)?;
    if width == 0 || height == 0 {
        return Ok(());
    }
    let dst_stride = resolve_stride(dst_stride, dst_format, width, height)?;
    let src_stride = resolve_stride(src_stride, src_format, width, height)?;
    check_rect(dst.len(), dst_format, dst_stride, dst_x, dst_y, width, height)?;
    check_rect(src.len(), src_format, src_stride, src_x, src_y, width, height)?;

    let flip = flags.contains(CopyFlags::FLIP_VERTICAL);
    if flags.contains(CopyFlags::KEEP_DST_ALPHA) && dst_format.has_alpha() {
        copy_dst_alpha(
            dst, dst_format, dst_stride, dst_x, dst_y, width, height, src, src_format, src_stride,
            src_x, src_y, palette, flip,
        )
    } else if src_format.is_memory_compatible(dst_format) {
        copy_rows(
            dst, dst_stride, dst_x, dst_y, width, height, src, src_stride, src_x, src_y,
            dst_format.bytes_per_pixel(), flip,
        );
        Ok(())
    } else {
        copy_convert(
            dst, dst_format, dst_stride, dst_x, dst_y, width, height, src, src_format, src_stride,
            src_x, src_y, palette, flip,
        )
    }
}

/// Memory-compatible formats: bulk row copies.
#[allow(clippy::too_many_arguments)]
fn copy_rows(
    dst: &mut [u8],
    dst_stride: usize,
    dst_x: u32,
    dst_y: u32,
    width: u32,
    height: u32,
    src: &[u8],
    src_stride: usize,
    src_x: u32,
    src_y: u32,
    bpp: usize,
    flip: bool,
) {
    let row_bytes = width as usize * bpp;
    for y in 0..height as usize {
        let s = source_row(y, src_y as usize, height as usize, flip) * src_stride
            + src_x as usize * bpp;
        let d = (dst_y as usize + y) * dst_stride + dst_x as usize * bpp;
        dst[d..d + row_bytes].copy_from_slice(&src[s..s + row_bytes]);
    }
}

/// Differing formats: per-pixel conversion with the run cache.
#[allow(clippy::too_many_arguments)]
fn copy_convert(
    dst: &mut [u8],
    dst_format: PixelFormat,
    dst_stride: usize,
    dst_x: u32,
    dst_y: u32,
    width: u32,
    height: u32,
    src: &[u8],
    src_format: PixelFormat,
    src_stride: usize,
    src_x: u32,
    src_y: u32,
    palette: Option<&Palette>,
    flip: bool,
) -> Result<(), BlitError> {
    let src_bpp = src_format.bytes_per_pixel();
    let dst_bpp = dst_format.bytes_per_pixel();
    let mut cache = RunCache::new();
    for y in 0..height as usize {
        let src_row = source_row(y, src_y as usize, height as usize, flip) * src_stride;
        let dst_row = (dst_y as usize + y) * dst_stride;
        for x in 0..width as usize {
            let s = src_row + (src_x as usize + x) * src_bpp;
            let d = dst_row + (dst_x as usize + x) * dst_bpp;
            let color = read_color(&src[s..], src_format)?;
            let converted = cache.convert(color, src_format, dst_format, palette)?;
            write_color(&mut dst[d..], dst_format, converted)?;
        }
    }
    Ok(())
}

/// Alpha-preserving copy onto a destination with a real alpha channel.
///
/// Known fast pairs move the three color bytes and leave the alpha byte;
/// everything else goes through convert + ignore-alpha writes.
#[allow(clippy::too_many_arguments)]
fn copy_dst_alpha(
    dst: &mut [u8],
    dst_format: PixelFormat,
    dst_stride: usize,
    dst_x: u32,
    dst_y: u32,
    width: u32,
    height: u32,
    src: &[u8],
    src_format: PixelFormat,
    src_stride: usize,
    src_x: u32,
    src_y: u32,
    palette: Option<&Palette>,
    flip: bool,
) -> Result<(), BlitError> {
    match (src_format, dst_format) {
        (PixelFormat::Bgr24, PixelFormat::Bgrx32 | PixelFormat::Bgra32) => {
            copy_color_bytes(
                dst, dst_stride, dst_x, dst_y, width, height, src, src_stride, src_x, src_y, 3,
                flip,
            );
            Ok(())
        }
        (
            PixelFormat::Bgrx32 | PixelFormat::Bgra32,
            PixelFormat::Bgrx32 | PixelFormat::Bgra32,
        ) => {
            copy_color_bytes(
                dst, dst_stride, dst_x, dst_y, width, height, src, src_stride, src_x, src_y, 4,
                flip,
            );
            Ok(())
        }
        _ => copy_convert_ignore_alpha(
            dst, dst_format, dst_stride, dst_x, dst_y, width, height, src, src_format, src_stride,
            src_x, src_y, palette, flip,
        ),
    }
}

/// BGR-ordered source to a 4-byte BGRX/BGRA destination: copy B,G,R per
/// pixel, leave the destination's fourth byte alone.
#[allow(clippy::too_many_arguments)]
fn copy_color_bytes(
    dst: &mut [u8],
    dst_stride: usize,
    dst_x: u32,
    dst_y: u32,
    width: u32,
    height: u32,
    src: &[u8],
    src_stride: usize,
    src_x: u32,
    src_y: u32,
    src_bpp: usize,
    flip: bool,
) {
    let w = width as usize;
    for y in 0..height as usize {
        let s = source_row(y, src_y as usize, height as usize, flip) * src_stride
            + src_x as usize * src_bpp;
        let d = (dst_y as usize + y) * dst_stride + dst_x as usize * 4;
        let src_px = src[s..s + w * src_bpp].chunks_exact(src_bpp);
        let dst_px = dst[d..d + w * 4].chunks_exact_mut(4);
        for (out, px) in dst_px.zip(src_px) {
            out[..3].copy_from_slice(&px[..3]);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn copy_convert_ignore_alpha(
    dst: &mut [u8],
    dst_format: PixelFormat,
    dst_stride: usize,
    dst_x: u32,
    dst_y: u32,
    width: u32,
    height: u32,
    src: &[u8],
    src_format: PixelFormat,
    src_stride: usize,
    src_x: u32,
    src_y: u32,
    palette: Option<&Palette>,
    flip: bool,
) -> Result<(), BlitError> {
    let src_bpp = src_format.bytes_per_pixel();
    let dst_bpp = dst_format.bytes_per_pixel();
    let mut cache = RunCache::new();
    for y in 0..height as usize {
        let src_row = source_row(y, src_y as usize, height as usize, flip) * src_stride;
        let dst_row = (dst_y as usize + y) * dst_stride;
        for x in 0..width as usize {
            let s = src_row + (src_x as usize + x) * src_bpp;
            let d = dst_row + (dst_x as usize + x) * dst_bpp;
            let color = read_color(&src[s..], src_format)?;
            let converted = cache.convert(color, src_format, dst_format, palette)?;
            write_color_ignore_alpha(&mut dst[d..], dst_format, converted)?;
        }
    }
    Ok(())
}
