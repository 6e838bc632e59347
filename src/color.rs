//! Packed color codec: pack, split, convert, and per-pixel buffer access.
//!
//! A packed color is a `u32` laid out per [`PixelFormat`]; buffer bytes are
//! big-endian for 32- and 24-bpp formats and little-endian for 16- and
//! 15-bpp formats. All arithmetic here is exact and branch-per-format, so a
//! new variant fails to compile until every operation handles it.

use rgb::Rgba;

use crate::{BlitError, Palette, PixelFormat};

// ── Channel expansion ────────────────────────────────────────────────

/// 5-bit channel to 8 bits: `(c << 3) + c/4`, clamped.
fn expand_5bit(c: u32) -> u8 {
    ((c << 3) + (c >> 2)).min(255) as u8
}

/// 6-bit channel to 8 bits: `(c << 2) + c/8`, clamped (63 maps to 259
/// before the clamp).
fn expand_6bit(c: u32) -> u8 {
    ((c << 2) + (c >> 3)).min(255) as u8
}

// ── Pack / split ─────────────────────────────────────────────────────

/// Packs 8-bit channels into a color value laid out per `format`.
///
/// `Rgbx32` and `Bgrx32` place the alpha byte in their padding position;
/// readers ignore it. Indexed and sub-byte formats (`Rgb8`, `A4`, `Mono`)
/// cannot be packed from channels.
pub fn pack_color(format: PixelFormat, color: Rgba<u8>) -> Result<u32, BlitError> {
    let r = u32::from(color.r);
    let g = u32::from(color.g);
    let b = u32::from(color.b);
    let a = u32::from(color.a);
    let packed = match format {
        PixelFormat::Argb32 => (a << 24) | (r << 16) | (g << 8) | b,
        PixelFormat::Xrgb32 => (r << 16) | (g << 8) | b,
        PixelFormat::Abgr32 => (a << 24) | (b << 16) | (g << 8) | r,
        PixelFormat::Xbgr32 => (b << 16) | (g << 8) | r,
        PixelFormat::Rgba32 | PixelFormat::Rgbx32 => (r << 24) | (g << 16) | (b << 8) | a,
        PixelFormat::Bgra32 | PixelFormat::Bgrx32 => (b << 24) | (g << 16) | (r << 8) | a,
        PixelFormat::Bgrx32Depth30 | PixelFormat::Rgbx32Depth30 => {
            // 10-bit channels at bits 22/12/2, stored byte-swapped.
            let t = (r << 22) | (g << 12) | (b << 2);
            t.swap_bytes()
        }
        PixelFormat::Rgb24 => (r << 16) | (g << 8) | b,
        PixelFormat::Bgr24 => (b << 16) | (g << 8) | r,
        PixelFormat::Rgb16 => {
            (((r >> 3) & 0x1f) << 11) | (((g >> 2) & 0x3f) << 5) | ((b >> 3) & 0x1f)
        }
        PixelFormat::Bgr16 => {
            (((b >> 3) & 0x1f) << 11) | (((g >> 2) & 0x3f) << 5) | ((r >> 3) & 0x1f)
        }
        PixelFormat::Argb15 => {
            let alpha = if a != 0 { 0x8000 } else { 0 };
            (((r >> 3) & 0x1f) << 10) | (((g >> 3) & 0x1f) << 5) | ((b >> 3) & 0x1f) | alpha
        }
        PixelFormat::Abgr15 => {
            let alpha = if a != 0 { 0x8000 } else { 0 };
            (((b >> 3) & 0x1f) << 10) | (((g >> 3) & 0x1f) << 5) | ((r >> 3) & 0x1f) | alpha
        }
        PixelFormat::Rgb15 => {
            (((r >> 3) & 0x1f) << 10) | (((g >> 3) & 0x1f) << 5) | ((b >> 3) & 0x1f)
        }
        PixelFormat::Bgr15 => {
            (((b >> 3) & 0x1f) << 10) | (((g >> 3) & 0x1f) << 5) | ((r >> 3) & 0x1f)
        }
        PixelFormat::Rgb8 | PixelFormat::A4 | PixelFormat::Mono => {
            log::error!("cannot pack channels into {format}");
            return Err(BlitError::UnsupportedFormat(format));
        }
    };
    Ok(packed)
}

/// Splits a packed color into 8-bit channels.
///
/// Opaque formats synthesize alpha 0xff. `Rgb8` resolves the value through
/// `palette` and re-splits the entry in the palette's format; an index above
/// 0xff yields all-zero channels without error. `Mono` maps any nonzero
/// value to white and zero to black, alpha following the value.
pub fn split_color(
    color: u32,
    format: PixelFormat,
    palette: Option<&Palette>,
) -> Result<Rgba<u8>, BlitError> {
    let split = match format {
        PixelFormat::Argb32 => Rgba {
            r: (color >> 16) as u8,
            g: (color >> 8) as u8,
            b: color as u8,
            a: (color >> 24) as u8,
        },
        PixelFormat::Xrgb32 => Rgba {
            r: (color >> 16) as u8,
            g: (color >> 8) as u8,
            b: color as u8,
            a: 0xff,
        },
        PixelFormat::Abgr32 => Rgba {
            r: color as u8,
            g: (color >> 8) as u8,
            b: (color >> 16) as u8,
            a: (color >> 24) as u8,
        },
        PixelFormat::Xbgr32 => Rgba {
            r: color as u8,
            g: (color >> 8) as u8,
            b: (color >> 16) as u8,
            a: 0xff,
        },
        PixelFormat::Rgba32 => Rgba {
            r: (color >> 24) as u8,
            g: (color >> 16) as u8,
            b: (color >> 8) as u8,
            a: color as u8,
        },
        PixelFormat::Rgbx32 => Rgba {
            r: (color >> 24) as u8,
            g: (color >> 16) as u8,
            b: (color >> 8) as u8,
            a: 0xff,
        },
        PixelFormat::Bgra32 => Rgba {
            r: (color >> 8) as u8,
            g: (color >> 16) as u8,
            b: (color >> 24) as u8,
            a: color as u8,
        },
        PixelFormat::Bgrx32 => Rgba {
            r: (color >> 8) as u8,
            g: (color >> 16) as u8,
            b: (color >> 24) as u8,
            a: 0xff,
        },
        PixelFormat::Rgb24 => Rgba {
            r: (color >> 16) as u8,
            g: (color >> 8) as u8,
            b: color as u8,
            a: 0xff,
        },
        PixelFormat::Bgr24 => Rgba {
            r: color as u8,
            g: (color >> 8) as u8,
            b: (color >> 16) as u8,
            a: 0xff,
        },
        PixelFormat::Rgb16 => Rgba {
            r: expand_5bit((color >> 11) & 0x1f),
            g: expand_6bit((color >> 5) & 0x3f),
            b: expand_5bit(color & 0x1f),
            a: 0xff,
        },
        PixelFormat::Bgr16 => Rgba {
            r: expand_5bit(color & 0x1f),
            g: expand_6bit((color >> 5) & 0x3f),
            b: expand_5bit((color >> 11) & 0x1f),
            a: 0xff,
        },
        PixelFormat::Argb15 => Rgba {
            r: expand_5bit((color >> 10) & 0x1f),
            g: expand_5bit((color >> 5) & 0x1f),
            b: expand_5bit(color & 0x1f),
            a: if color & 0x8000 != 0 { 0xff } else { 0x00 },
        },
        PixelFormat::Abgr15 => Rgba {
            r: expand_5bit(color & 0x1f),
            g: expand_5bit((color >> 5) & 0x1f),
            b: expand_5bit((color >> 10) & 0x1f),
            a: if color & 0x8000 != 0 { 0xff } else { 0x00 },
        },
        PixelFormat::Rgb15 => Rgba {
            r: expand_5bit((color >> 10) & 0x1f),
            g: expand_5bit((color >> 5) & 0x1f),
            b: expand_5bit(color & 0x1f),
            a: 0xff,
        },
        PixelFormat::Bgr15 => Rgba {
            r: expand_5bit(color & 0x1f),
            g: expand_5bit((color >> 5) & 0x1f),
            b: expand_5bit((color >> 10) & 0x1f),
            a: 0xff,
        },
        PixelFormat::Rgb8 => {
            if color > 0xff {
                Rgba { r: 0, g: 0, b: 0, a: 0 }
            } else {
                let Some(palette) = palette else {
                    log::error!("have index 0x{color:02x} and no palette");
                    return Err(BlitError::PaletteRequired(format));
                };
                let entry = palette.entries[color as usize];
                return split_color(entry, palette.format, None);
            }
        }
        PixelFormat::Mono => {
            let v = if color != 0 { 0xff } else { 0x00 };
            Rgba { r: v, g: v, b: v, a: v }
        }
        PixelFormat::A4 | PixelFormat::Bgrx32Depth30 | PixelFormat::Rgbx32Depth30 => {
            log::error!("cannot split {format}");
            return Err(BlitError::UnsupportedFormat(format));
        }
    };
    Ok(split)
}

/// Splits in the source format and repacks in the destination format.
pub fn convert_color(
    color: u32,
    src_format: PixelFormat,
    dst_format: PixelFormat,
    palette: Option<&Palette>,
) -> Result<u32, BlitError> {
    let split = split_color(color, src_format, palette)?;
    pack_color(dst_format, split)
}

// ── Buffer access ────────────────────────────────────────────────────

/// Reads one packed pixel from the head of `src`.
pub fn read_color(src: &[u8], format: PixelFormat) -> Result<u32, BlitError> {
    let needed = format.bytes_per_pixel();
    if src.len() < needed {
        return Err(BlitError::BufferTooSmall {
            needed,
            actual: src.len(),
        });
    }
    let color = match format.bits_per_pixel() {
        32 => u32::from_be_bytes([src[0], src[1], src[2], src[3]]),
        24 => (u32::from(src[0]) << 16) | (u32::from(src[1]) << 8) | u32::from(src[2]),
        16 | 15 => u32::from(u16::from_le_bytes([src[0], src[1]])),
        8 => u32::from(src[0]),
        _ => {
            log::error!("cannot read single {format} pixels");
            return Err(BlitError::UnsupportedFormat(format));
        }
    };
    Ok(color)
}

/// Writes one packed pixel to the head of `dst`.
pub fn write_color(dst: &mut [u8], format: PixelFormat, color: u32) -> Result<(), BlitError> {
    let needed = format.bytes_per_pixel();
    if dst.len() < needed {
        return Err(BlitError::BufferTooSmall {
            needed,
            actual: dst.len(),
        });
    }
    match format.bits_per_pixel() {
        32 => dst[..4].copy_from_slice(&color.to_be_bytes()),
        24 => dst[..3].copy_from_slice(&color.to_be_bytes()[1..]),
        16 | 15 => dst[..2].copy_from_slice(&(color as u16).to_le_bytes()),
        8 => dst[0] = color as u8,
        _ => {
            log::error!("cannot write single {format} pixels");
            return Err(BlitError::UnsupportedFormat(format));
        }
    }
    Ok(())
}

/// Like [`write_color`], but keeps the alpha (or padding) byte already
/// present in `dst` for the 32-bpp 8-bit-channel formats.
pub fn write_color_ignore_alpha(
    dst: &mut [u8],
    format: PixelFormat,
    color: u32,
) -> Result<(), BlitError> {
    match format {
        PixelFormat::Argb32 | PixelFormat::Xrgb32 | PixelFormat::Abgr32 | PixelFormat::Xbgr32 => {
            let needed = format.bytes_per_pixel();
            if dst.len() < needed {
                return Err(BlitError::BufferTooSmall {
                    needed,
                    actual: dst.len(),
                });
            }
            let merged = (u32::from(dst[0]) << 24) | (color & 0x00ff_ffff);
            write_color(dst, format, merged)
        }
        PixelFormat::Rgba32 | PixelFormat::Rgbx32 | PixelFormat::Bgra32 | PixelFormat::Bgrx32 => {
            let needed = format.bytes_per_pixel();
            if dst.len() < needed {
                return Err(BlitError::BufferTooSmall {
                    needed,
                    actual: dst.len(),
                });
            }
            let merged = u32::from(dst[3]) | (color & 0xffff_ff00);
            write_color(dst, format, merged)
        }
        _ => write_color(dst, format, color),
    }
}
