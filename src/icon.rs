//! Icon color+mask decoding.
//!
//! Icons arrive as a bottom-up color plane, an optional 1-bpp AND mask
//! (also bottom-up, rows padded to 32-bit boundaries), and for indexed
//! sources a BGRX color table.

use rgb::Rgba;

use crate::color::{pack_color, read_color, split_color, write_color};
use crate::copy::{check_rect, resolve_stride};
use crate::{BlitError, CopyFlags, Palette, PixelFormat, image_copy};

/// Decodes an icon into `dst`.
///
/// `bpp` selects the color plane's source format: 8 is palette-indexed
/// (through `color_table`), 16 is RGB 5-5-5, 24 is RGB, 32 is BGRA. 1- and
/// 4-bpp icons need a palette the wire never carries and are rejected. The
/// AND mask is applied only when the destination format has alpha.
#[allow(clippy::too_many_arguments)]
pub fn image_copy_from_icon(
    dst: &mut [u8],
    dst_format: PixelFormat,
    dst_stride: usize,
    dst_x: u32,
    dst_y: u32,
    width: u32,
    height: u32,
    bits_color: &[u8],
    bits_mask: Option<&[u8]>,
    color_table: Option<&[u8]>,
    bpp: u32,
) -> Result<(), BlitError> {
    let src_format = match bpp {
        1 | 4 => {
            log::error!("{bpp} bpp icons are not supported");
            return Err(BlitError::UnsupportedDepth { bpp });
        }
        8 => PixelFormat::Rgb8,
        16 => PixelFormat::Rgb15,
        24 => PixelFormat::Rgb24,
        32 => PixelFormat::Bgra32,
        other => {
            log::error!("invalid icon bpp: {other}");
            return Err(BlitError::UnsupportedDepth { bpp });
        }
    };
    let needed = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(src_format.bytes_per_pixel()))
        .ok_or(BlitError::DimensionsTooLarge { width, height })?;
    if bits_color.len() < needed {
        return Err(BlitError::BufferTooSmall {
            needed,
            actual: bits_color.len(),
        });
    }

    let palette = icon_palette(color_table);
    image_copy(
        dst,
        dst_format,
        dst_stride,
        dst_x,
        dst_y,
        width,
        height,
        bits_color,
        src_format,
        0,
        0,
        0,
        Some(&palette),
        CopyFlags::FLIP_VERTICAL,
    )?;

    if dst_format.has_alpha() {
        if let Some(mask) = bits_mask {
            if !mask.is_empty() {
                apply_icon_mask(dst, dst_format, dst_stride, dst_x, dst_y, width, height, mask)?;
            }
        }
    }
    Ok(())
}

/// Builds the icon's palette from a BGRX color table. Malformed tables are
/// tolerated: the palette stays zeroed and decoding continues.
fn icon_palette(color_table: Option<&[u8]>) -> Palette {
    let mut palette = Palette::new(PixelFormat::Bgrx32);
    let Some(table) = color_table else {
        return palette;
    };
    if table.is_empty() {
        return palette;
    }
    if table.len() % 4 != 0 || table.len() / 4 > 256 {
        log::warn!("weird icon palette size: {}", table.len());
        return palette;
    }
    for (entry, quad) in palette.entries.iter_mut().zip(table.chunks_exact(4)) {
        *entry = u32::from_be_bytes([quad[0], quad[1], quad[2], quad[3]]);
    }
    palette
}

/// Clears the alpha of pixels whose AND-mask bit is set. Mask rows are
/// `(width+7)/8` bytes padded to 32-bit boundaries and stored bottom-up.
#[allow(clippy::too_many_arguments)]
fn apply_icon_mask(
    dst: &mut [u8],
    dst_format: PixelFormat,
    dst_stride: usize,
    dst_x: u32,
    dst_y: u32,
    width: u32,
    height: u32,
    mask: &[u8],
) -> Result<(), BlitError> {
    if width == 0 || height == 0 {
        return Ok(());
    }
    let dst_stride = resolve_stride(dst_stride, dst_format, width, height)?;
    check_rect(dst.len(), dst_format, dst_stride, dst_x, dst_y, width, height)?;
    let stride = (width as usize).div_ceil(8).next_multiple_of(4);
    let needed = stride
        .checked_mul(height as usize)
        .ok_or(BlitError::DimensionsTooLarge { width, height })?;
    if mask.len() < needed {
        return Err(BlitError::MaskTooSmall {
            needed,
            actual: mask.len(),
        });
    }
    let bpp = dst_format.bytes_per_pixel();
    for y in 0..height as usize {
        let mask_row = &mask[stride * (height as usize - 1 - y)..];
        let dst_row = (dst_y as usize + y) * dst_stride;
        for x in 0..width as usize {
            let alpha = if mask_row[x / 8] & (0x80 >> (x % 8)) != 0 {
                0x00
            } else {
                0xff
            };
            let d = dst_row + (dst_x as usize + x) * bpp;
            let color = read_color(&dst[d..], dst_format)?;
            let px = split_color(color, dst_format, None)?;
            let merged = pack_color(
                dst_format,
                Rgba {
                    r: px.r,
                    g: px.g,
                    b: px.b,
                    a: alpha,
                },
            )?;
            write_color(&mut dst[d..], dst_format, merged)?;
        }
    }
    Ok(())
}
