//! Pointer (cursor) XOR/AND mask decoding.
//!
//! Pointers are shipped as a bottom-up XOR color plane plus a 1-bpp AND
//! mask, both with rows padded to 16-bit boundaries. 1-bpp pointers use a
//! four-state truth table over the two masks; higher depths convert the
//! XOR plane and then punch transparency and inversion out of the AND bits.

use rgb::Rgba;

use crate::color::{convert_color, pack_color, read_color, write_color};
use crate::copy::{check_rect, resolve_stride};
use crate::{BlitError, Palette, PixelFormat};

/// Decodes a pointer's XOR/AND masks into `dst`.
///
/// `xor_bpp` is the depth of the XOR plane: 1, 8, 16, 24 or 32. At 1 bpp
/// both masks are required; at 8 bpp a palette is. The AND mask turns fully
/// black pixels transparent and fully white pixels into an inverted
/// checkerboard so the pointer stays visible on any background.
#[allow(clippy::too_many_arguments)]
pub fn image_copy_from_cursor(
    dst: &mut [u8],
    dst_format: PixelFormat,
    dst_stride: usize,
    dst_x: u32,
    dst_y: u32,
    width: u32,
    height: u32,
    xor_mask: &[u8],
    and_mask: Option<&[u8]>,
    xor_bpp: u32,
    palette: Option<&Palette>,
) -> Result<(), BlitError> {
    let bpp = dst_format.bytes_per_pixel();
    let dst_stride = resolve_stride(dst_stride, dst_format, width, height)?;
    if width > 0 && height > 0 {
        check_rect(dst.len(), dst_format, dst_stride, dst_x, dst_y, width, height)?;
    }

    // Clear the area below and right of the target origin before drawing.
    let cols = width.saturating_sub(dst_x) as usize;
    if cols > 0 {
        for y in dst_y..height {
            let row = y as usize * dst_stride + dst_x as usize * bpp;
            dst[row..row + cols * bpp].fill(0);
        }
    }

    match xor_bpp {
        1 => copy_1bpp(
            dst, dst_format, dst_stride, dst_x, dst_y, width, height, xor_mask, and_mask,
        ),
        8 | 16 | 24 | 32 => copy_xbpp(
            dst, dst_format, dst_stride, dst_x, dst_y, width, height, xor_mask, and_mask,
            xor_bpp, palette,
        ),
        other => {
            log::error!("cannot convert a {other} bpp cursor to {dst_format}");
            Err(BlitError::UnsupportedDepth { bpp: other })
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn copy_1bpp(
    dst: &mut [u8],
    dst_format: PixelFormat,
    dst_stride: usize,
    dst_x: u32,
    dst_y: u32,
    width: u32,
    height: u32,
    xor_mask: &[u8],
    and_mask: Option<&[u8]>,
) -> Result<(), BlitError> {
    let and_mask = and_mask
        .filter(|m| !m.is_empty())
        .ok_or(BlitError::MaskRequired)?;
    if xor_mask.is_empty() {
        return Err(BlitError::MaskRequired);
    }
    let step = (width as usize).div_ceil(8).next_multiple_of(2);
    let needed = step
        .checked_mul(height as usize)
        .ok_or(BlitError::DimensionsTooLarge { width, height })?;
    if needed > xor_mask.len() {
        return Err(BlitError::MaskTooSmall {
            needed,
            actual: xor_mask.len(),
        });
    }
    if needed > and_mask.len() {
        return Err(BlitError::MaskTooSmall {
            needed,
            actual: and_mask.len(),
        });
    }
    let bpp = dst_format.bytes_per_pixel();
    for y in 0..height as usize {
        let xor_row = &xor_mask[step * y..];
        let and_row = &and_mask[step * y..];
        let dst_row = (dst_y as usize + y) * dst_stride + dst_x as usize * bpp;
        for x in 0..width as usize {
            let bit = 0x80 >> (x % 8);
            let xor_bit = xor_row[x / 8] & bit != 0;
            let and_bit = and_row[x / 8] & bit != 0;
            let color = match (and_bit, xor_bit) {
                (false, false) => pack_color(
                    dst_format,
                    Rgba {
                        r: 0,
                        g: 0,
                        b: 0,
                        a: 0xff,
                    },
                )?,
                (false, true) => pack_color(
                    dst_format,
                    Rgba {
                        r: 0xff,
                        g: 0xff,
                        b: 0xff,
                        a: 0xff,
                    },
                )?,
                (true, false) => pack_color(
                    dst_format,
                    Rgba {
                        r: 0,
                        g: 0,
                        b: 0,
                        a: 0,
                    },
                )?,
                (true, true) => inverted_cursor_color(x as u32, y as u32, dst_format)?,
            };
            write_color(&mut dst[dst_row + x * bpp..], dst_format, color)?;
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn copy_xbpp(
    dst: &mut [u8],
    dst_format: PixelFormat,
    dst_stride: usize,
    dst_x: u32,
    dst_y: u32,
    width: u32,
    height: u32,
    xor_mask: &[u8],
    and_mask: Option<&[u8]>,
    xor_bpp: u32,
    palette: Option<&Palette>,
) -> Result<(), BlitError> {
    if xor_mask.is_empty() {
        return Err(BlitError::MaskRequired);
    }
    if xor_bpp == 8 && palette.is_none() {
        log::error!("no palette in conversion from {xor_bpp} bpp to {dst_format}");
        return Err(BlitError::PaletteRequired(PixelFormat::Rgb8));
    }
    let xor_bytes = (xor_bpp / 8) as usize;
    let xor_step = (width as usize)
        .checked_mul(xor_bytes)
        .ok_or(BlitError::DimensionsTooLarge { width, height })?
        .next_multiple_of(2);
    let and_step = (width as usize).div_ceil(8).next_multiple_of(2);
    let needed = xor_step
        .checked_mul(height as usize)
        .ok_or(BlitError::DimensionsTooLarge { width, height })?;
    if needed > xor_mask.len() {
        return Err(BlitError::MaskTooSmall {
            needed,
            actual: xor_mask.len(),
        });
    }
    if let Some(mask) = and_mask {
        let needed = and_step
            .checked_mul(height as usize)
            .ok_or(BlitError::DimensionsTooLarge { width, height })?;
        if needed > mask.len() {
            return Err(BlitError::MaskTooSmall {
                needed,
                actual: mask.len(),
            });
        }
    }
    let bpp = dst_format.bytes_per_pixel();
    for y in 0..height as usize {
        // XOR and AND planes are stored bottom-up.
        let sy = height as usize - 1 - y;
        let xor_row = &xor_mask[xor_step * sy..];
        let and_row = and_mask.map(|m| &m[and_step * sy..]);
        let dst_row = (dst_y as usize + y) * dst_stride + dst_x as usize * bpp;
        for x in 0..width as usize {
            let (src_format, color) = match xor_bpp {
                32 => (
                    PixelFormat::Bgra32,
                    read_color(&xor_row[x * 4..], PixelFormat::Bgra32)?,
                ),
                24 => (
                    PixelFormat::Bgr24,
                    read_color(&xor_row[x * 3..], PixelFormat::Bgr24)?,
                ),
                16 => (
                    PixelFormat::Rgb15,
                    read_color(&xor_row[x * 2..], PixelFormat::Rgb15)?,
                ),
                8 => {
                    let pal = palette.ok_or(BlitError::PaletteRequired(PixelFormat::Rgb8))?;
                    (pal.format, pal.entries[usize::from(xor_row[x])])
                }
                other => return Err(BlitError::UnsupportedDepth { bpp: other }),
            };
            let mut argb = convert_color(color, src_format, PixelFormat::Argb32, palette)?;
            if let Some(and_row) = and_row {
                if and_row[x / 8] & (0x80 >> (x % 8)) != 0 {
                    if argb == 0xff00_0000 {
                        // Opaque black under the AND bit means transparent.
                        argb = 0;
                    } else if argb == 0xffff_ffff {
                        argb = inverted_cursor_color(x as u32, y as u32, PixelFormat::Argb32)?;
                    }
                }
            }
            let out = convert_color(argb, PixelFormat::Argb32, dst_format, palette)?;
            write_color(&mut dst[dst_row + x * bpp..], dst_format, out)?;
        }
    }
    Ok(())
}

/// Color for a pixel the AND mask asks to invert.
///
/// A static bitmap cannot XOR against whatever ends up below it, so inverted
/// pixels become an opaque 2x2 checkerboard that stays visible on both light
/// and dark backgrounds.
pub fn inverted_cursor_color(x: u32, y: u32, format: PixelFormat) -> Result<u32, BlitError> {
    let fill = if (x + y) & 1 != 0 { 0x00 } else { 0xff };
    pack_color(
        format,
        Rgba {
            r: fill,
            g: fill,
            b: fill,
            a: 0xff,
        },
    )
}
