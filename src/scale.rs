//! Rectangle scaling.
//!
//! Equal extents degenerate to a plain copy. Differing extents need the
//! `resample` feature, which pulls in the `image` crate for bilinear
//! sampling; without it the call fails with [`BlitError::ScaleUnavailable`].

use crate::copy::image_copy;
use crate::{BlitError, CopyFlags, PixelFormat};

/// Scales a source rectangle onto a destination rectangle.
///
/// Resampling is restricted to the 8-bit 32-bpp formats `Argb32`, `Xrgb32`,
/// `Bgra32`, and `Bgrx32`. A zero-sized destination is a no-op; a zero-sized
/// source with a nonzero destination is rejected.
#[allow(clippy::too_many_arguments)]
pub fn image_scale(
    dst: &mut [u8],
    dst_format: PixelFormat,
    dst_stride: usize,
    dst_x: u32,
    dst_y: u32,
    dst_width: u32,
    dst_height: u32,
    src: &[u8],
    src_format: PixelFormat,
    src_stride: usize,
    src_x: u32,
    src_y: u32,
    src_width: u32,
    src_height: u32,
) -> Result<(), BlitError> {
    if dst_width == src_width && dst_height == src_height {
        return image_copy(
            dst,
            dst_format,
            dst_stride,
            dst_x,
            dst_y,
            dst_width,
            dst_height,
            src,
            src_format,
            src_stride,
            src_x,
            src_y,
            None,
            CopyFlags::empty(),
        );
    }

    #[cfg(feature = "resample")]
    {
        resample_rect(
            dst, dst_format, dst_stride, dst_x, dst_y, dst_width, dst_height, src, src_format,
            src_stride, src_x, src_y, src_width, src_height,
        )
    }
    #[cfg(not(feature = "resample"))]
    {
        log::warn!("scaling requested but built without the `resample` feature");
        Err(BlitError::ScaleUnavailable)
    }
}

#[cfg(feature = "resample")]
#[allow(clippy::too_many_arguments)]
fn resample_rect(
    dst: &mut [u8],
    dst_format: PixelFormat,
    dst_stride: usize,
    dst_x: u32,
    dst_y: u32,
    dst_width: u32,
    dst_height: u32,
    src: &[u8],
    src_format: PixelFormat,
    src_stride: usize,
    src_x: u32,
    src_y: u32,
    src_width: u32,
    src_height: u32,
) -> Result<(), BlitError> {
    use alloc::vec;

    use rgb::Rgba;

    use crate::color::{pack_color, read_color, split_color, write_color};
    use crate::copy::{check_rect, check_size, resolve_stride};

    fn resamplable(format: PixelFormat) -> bool {
        matches!(
            format,
            PixelFormat::Argb32 | PixelFormat::Xrgb32 | PixelFormat::Bgra32 | PixelFormat::Bgrx32
        )
    }

    if !resamplable(src_format) {
        return Err(BlitError::UnsupportedFormat(src_format));
    }
    if !resamplable(dst_format) {
        return Err(BlitError::UnsupportedFormat(dst_format));
    }
    if dst_width == 0 || dst_height == 0 {
        return Ok(());
    }
    if src_width == 0 || src_height == 0 {
        return Err(BlitError::DimensionsTooLarge {
            width: src_width,
            height: src_height,
        });
    }
    check_size(dst_width, dst_height)?;
    check_size(src_width, src_height)?;
    let dst_stride = resolve_stride(dst_stride, dst_format, dst_width, dst_height)?;
    let src_stride = resolve_stride(src_stride, src_format, src_width, src_height)?;
    check_rect(dst.len(), dst_format, dst_stride, dst_x, dst_y, dst_width, dst_height)?;
    check_rect(src.len(), src_format, src_stride, src_x, src_y, src_width, src_height)?;

    let src_bpp = src_format.bytes_per_pixel();
    let dst_bpp = dst_format.bytes_per_pixel();
    let staging_len = (src_width as usize)
        .checked_mul(src_height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or(BlitError::DimensionsTooLarge {
            width: src_width,
            height: src_height,
        })?;
    let mut staging = vec![0u8; staging_len];
    for y in 0..src_height as usize {
        for x in 0..src_width as usize {
            let s = (src_y as usize + y) * src_stride + (src_x as usize + x) * src_bpp;
            let color = read_color(&src[s..], src_format)?;
            let px = split_color(color, src_format, None)?;
            let o = (y * src_width as usize + x) * 4;
            staging[o..o + 4].copy_from_slice(&[px.r, px.g, px.b, px.a]);
        }
    }

    let img = image::RgbaImage::from_raw(src_width, src_height, staging).ok_or(
        BlitError::DimensionsTooLarge {
            width: src_width,
            height: src_height,
        },
    )?;
    let resized =
        image::imageops::resize(&img, dst_width, dst_height, image::imageops::FilterType::Triangle);

    for (x, y, px) in resized.enumerate_pixels() {
        let [r, g, b, a] = px.0;
        let packed = pack_color(dst_format, Rgba { r, g, b, a })?;
        let d = (dst_y as usize + y as usize) * dst_stride + (dst_x as usize + x as usize) * dst_bpp;
        write_color(&mut dst[d..], dst_format, packed)?;
    }
    Ok(())
}
