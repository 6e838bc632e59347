//! 1-bpp glyph and brush payloads.

use alloc::vec;
use alloc::vec::Vec;

use crate::color::write_color;
use crate::copy::{check_rect, resolve_stride};
use crate::{BlitError, PixelFormat};

/// Expands a 1-bpp glyph into one byte per pixel, 0xff where the bit is set.
///
/// Input rows are `(width+7)/8` bytes, MSB first. The byte-per-pixel form
/// trades a little memory for direct pixel addressing when blitting glyphs.
pub fn glyph_convert(width: u32, height: u32, data: &[u8]) -> Result<Vec<u8>, BlitError> {
    if width == 0 || height == 0 {
        return Ok(Vec::new());
    }
    let w = width as usize;
    let h = height as usize;
    let scanline = w.div_ceil(8);
    let needed = scanline
        .checked_mul(h)
        .ok_or(BlitError::DimensionsTooLarge { width, height })?;
    if data.len() < needed {
        return Err(BlitError::BufferTooSmall {
            needed,
            actual: data.len(),
        });
    }
    let out_len = w
        .checked_mul(h)
        .ok_or(BlitError::DimensionsTooLarge { width, height })?;
    let mut out = vec![0u8; out_len];
    for (row, out_row) in data.chunks(scanline).zip(out.chunks_mut(w)) {
        for (x, px) in out_row.iter_mut().enumerate() {
            if row[x / 8] & (0x80 >> (x % 8)) != 0 {
                *px = 0xff;
            }
        }
    }
    Ok(out)
}

/// Draws a 1-bpp bitmap into `dst`, writing `back_color` where bits are set
/// and `fore_color` where they are clear.
///
/// `src` rows are `(width+7)/8` bytes, MSB first; both colors are already
/// packed in the destination format.
#[allow(clippy::too_many_arguments)]
pub fn image_copy_from_monochrome(
    dst: &mut [u8],
    dst_format: PixelFormat,
    dst_stride: usize,
    dst_x: u32,
    dst_y: u32,
    width: u32,
    height: u32,
    src: &[u8],
    back_color: u32,
    fore_color: u32,
) -> Result<(), BlitError> {
    if width == 0 || height == 0 {
        return Ok(());
    }
    let dst_stride = resolve_stride(dst_stride, dst_format, width, height)?;
    check_rect(dst.len(), dst_format, dst_stride, dst_x, dst_y, width, height)?;
    let mono_step = (width as usize).div_ceil(8);
    let needed = mono_step
        .checked_mul(height as usize)
        .ok_or(BlitError::DimensionsTooLarge { width, height })?;
    if src.len() < needed {
        return Err(BlitError::MaskTooSmall {
            needed,
            actual: src.len(),
        });
    }
    let bpp = dst_format.bytes_per_pixel();
    for y in 0..height as usize {
        let row = &src[mono_step * y..];
        let dst_row = (dst_y as usize + y) * dst_stride;
        for x in 0..width as usize {
            let set = row[x / 8] & (0x80 >> (x % 8)) != 0;
            let color = if set { back_color } else { fore_color };
            let d = dst_row + (dst_x as usize + x) * bpp;
            write_color(&mut dst[d..], dst_format, color)?;
        }
    }
    Ok(())
}
