//! Rectangle copy and fill over caller-owned pixel buffers.
//!
//! Two-slice copies ([`image_copy`]) can never alias and go straight to a
//! [`CopyBackend`]. Same-buffer copies ([`image_copy_within`]) first compare
//! the precise byte intervals touched by the two rectangles; disjoint
//! rectangles are split apart and handed to the backend, overlapping ones go
//! through the overlap-safe path ([`image_copy_overlap`]), which picks a scan
//! order from the rectangles' relative placement and stages converting rows
//! through a scratch scanline so that reads always happen before the bytes
//! they depend on are overwritten.

use alloc::vec;

use crate::backend::{CopyBackend, GenericBackend, generic_copy_no_overlap};
use crate::color::{convert_color, read_color, write_color, write_color_ignore_alpha};
use crate::{BlitError, CopyFlags, Palette, PixelFormat};

// ── Geometry helpers ─────────────────────────────────────────────────

pub(crate) fn check_size(width: u32, height: u32) -> Result<(), BlitError> {
    if width > i32::MAX as u32 || height > i32::MAX as u32 {
        return Err(BlitError::DimensionsTooLarge { width, height });
    }
    Ok(())
}

/// A zero stride means tightly packed rows of `width` pixels.
pub(crate) fn resolve_stride(
    stride: usize,
    format: PixelFormat,
    width: u32,
    height: u32,
) -> Result<usize, BlitError> {
    if stride != 0 {
        return Ok(stride);
    }
    (width as usize)
        .checked_mul(format.bytes_per_pixel())
        .ok_or(BlitError::DimensionsTooLarge { width, height })
}

/// Byte interval `[start, end)` touched by a `width` x `height` rectangle at
/// (`x`, `y`). Requires a nonzero extent.
pub(crate) fn rect_extent(
    format: PixelFormat,
    stride: usize,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> Result<(usize, usize), BlitError> {
    let bpp = format.bytes_per_pixel();
    let err = BlitError::DimensionsTooLarge { width, height };
    let start = (y as usize)
        .checked_mul(stride)
        .and_then(|v| v.checked_add((x as usize).checked_mul(bpp)?))
        .ok_or(err)?;
    let span = (height as usize)
        .checked_sub(1)
        .and_then(|rows| rows.checked_mul(stride))
        .and_then(|v| v.checked_add((width as usize).checked_mul(bpp)?))
        .ok_or(err)?;
    let end = start.checked_add(span).ok_or(err)?;
    Ok((start, end))
}

/// Validates that `len` covers the rectangle and returns its byte interval.
pub(crate) fn check_rect(
    len: usize,
    format: PixelFormat,
    stride: usize,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> Result<(usize, usize), BlitError> {
    let (start, end) = rect_extent(format, stride, x, y, width, height)?;
    if len < end {
        return Err(BlitError::BufferTooSmall {
            needed: end,
            actual: len,
        });
    }
    Ok((start, end))
}

pub(crate) fn ranges_overlap(a: (usize, usize), b: (usize, usize)) -> bool {
    a.0 < b.1 && b.0 < a.1
}

/// Source row index for output row `y`, reflecting the rectangle when
/// reading bottom-to-top.
pub(crate) fn source_row(y: usize, src_y: usize, height: usize, flip: bool) -> usize {
    if flip {
        src_y + (height - 1) - y
    } else {
        src_y + y
    }
}

/// Cache for runs of identical source pixels: repeated values skip the
/// split/pack round trip.
pub(crate) struct RunCache {
    last: Option<(u32, u32)>,
}

impl RunCache {
    pub(crate) fn new() -> Self {
        Self { last: None }
    }

    pub(crate) fn convert(
        &mut self,
        color: u32,
        src_format: PixelFormat,
        dst_format: PixelFormat,
        palette: Option<&Palette>,
    ) -> Result<u32, BlitError> {
        if let Some((src, dst)) = self.last {
            if src == color {
                return Ok(dst);
            }
        }
        let dst = convert_color(color, src_format, dst_format, palette)?;
        self.last = Some((color, dst));
        Ok(dst)
    }
}

// ── Scan direction ───────────────────────────────────────────────────

/// Scan order for an overlapping same-buffer copy, chosen so that every
/// source byte is read before the copy overwrites it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ScanDirection {
    /// Destination above the source: walk rows top to bottom.
    TopDown,
    /// Destination below the source: walk rows bottom to top.
    BottomUp,
    /// Same rows, destination left of the source.
    LeftToRight,
    /// Same rows, destination right of the source.
    RightToLeft,
    /// Rectangles coincide: nothing to move.
    Identical,
}

pub(crate) fn scan_direction(dst_x: u32, dst_y: u32, src_x: u32, src_y: u32) -> ScanDirection {
    use core::cmp::Ordering;
    match dst_y.cmp(&src_y) {
        Ordering::Less => ScanDirection::TopDown,
        Ordering::Greater => ScanDirection::BottomUp,
        Ordering::Equal => match src_x.cmp(&dst_x) {
            Ordering::Greater => ScanDirection::LeftToRight,
            Ordering::Less => ScanDirection::RightToLeft,
            Ordering::Equal => ScanDirection::Identical,
        },
    }
}

fn rows_reversed(direction: ScanDirection) -> bool {
    matches!(
        direction,
        ScanDirection::BottomUp | ScanDirection::RightToLeft
    )
}

// ── Copy entry points ────────────────────────────────────────────────

/// Copies a rectangle between two distinct buffers, converting formats.
///
/// Distinct slices cannot alias, so this always takes the non-overlapping
/// path through [`GenericBackend`]. Use [`image_copy_within`] to move pixels
/// inside one buffer.
#[allow(clippy::too_many_arguments)]
pub fn image_copy(
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
    image_copy_with(
        &GenericBackend,
        dst,
        dst_format,
        dst_stride,
        dst_x,
        dst_y,
        width,
        height,
        src,
        src_format,
        src_stride,
        src_x,
        src_y,
        palette,
        flags,
    )
}

/// [`image_copy`] with an injected backend.
///
/// Geometry is validated and strides are resolved here; the backend receives
/// arguments it can trust and is responsible only for the copy loop itself.
#[allow(clippy::too_many_arguments)]
pub fn image_copy_with(
    backend: &dyn CopyBackend,
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
    backend.copy_no_overlap(
        dst, dst_format, dst_stride, dst_x, dst_y, width, height, src, src_format, src_stride,
        src_x, src_y, palette, flags,
    )
}

/// Copies a rectangle within one buffer, converting formats.
///
/// The byte intervals touched by the two rectangles decide the path:
/// disjoint rectangles are split apart and copied through the backend,
/// overlapping ones go through the overlap-safe path.
#[allow(clippy::too_many_arguments)]
pub fn image_copy_within(
    buf: &mut [u8],
    dst_format: PixelFormat,
    dst_stride: usize,
    dst_x: u32,
    dst_y: u32,
    width: u32,
    height: u32,
    src_format: PixelFormat,
    src_stride: usize,
    src_x: u32,
    src_y: u32,
    palette: Option<&Palette>,
    flags: CopyFlags,
) -> Result<(), BlitError> {
    image_copy_within_with(
        &GenericBackend,
        buf,
        dst_format,
        dst_stride,
        dst_x,
        dst_y,
        width,
        height,
        src_format,
        src_stride,
        src_x,
        src_y,
        palette,
        flags,
    )
}

/// [`image_copy_within`] with an injected backend for the disjoint case.
#[allow(clippy::too_many_arguments)]
pub fn image_copy_within_with(
    backend: &dyn CopyBackend,
    buf: &mut [u8],
    dst_format: PixelFormat,
    dst_stride: usize,
    dst_x: u32,
    dst_y: u32,
    width: u32,
    height: u32,
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
    let dst_range = check_rect(buf.len(), dst_format, dst_stride, dst_x, dst_y, width, height)?;
    let src_range = check_rect(buf.len(), src_format, src_stride, src_x, src_y, width, height)?;

    if ranges_overlap(dst_range, src_range) {
        return image_copy_overlap(
            buf, dst_format, dst_stride, dst_x, dst_y, width, height, src_format, src_stride,
            src_x, src_y, palette, flags,
        );
    }

    // Disjoint: split the buffer so the backend sees two slices, each
    // rebased to its rectangle's first byte.
    if dst_range.1 <= src_range.0 {
        let (head, tail) = buf.split_at_mut(src_range.0);
        backend.copy_no_overlap(
            &mut head[dst_range.0..],
            dst_format,
            dst_stride,
            0,
            0,
            width,
            height,
            tail,
            src_format,
            src_stride,
            0,
            0,
            palette,
            flags,
        )
    } else {
        let (head, tail) = buf.split_at_mut(dst_range.0);
        backend.copy_no_overlap(
            tail,
            dst_format,
            dst_stride,
            0,
            0,
            width,
            height,
            &head[src_range.0..],
            src_format,
            src_stride,
            0,
            0,
            palette,
            flags,
        )
    }
}

/// Copies a rectangle within one buffer through the overlap-safe path,
/// regardless of whether the rectangles actually overlap.
#[allow(clippy::too_many_arguments)]
pub fn image_copy_overlap(
    buf: &mut [u8],
    dst_format: PixelFormat,
    dst_stride: usize,
    dst_x: u32,
    dst_y: u32,
    width: u32,
    height: u32,
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
    check_rect(buf.len(), dst_format, dst_stride, dst_x, dst_y, width, height)?;
    check_rect(buf.len(), src_format, src_stride, src_x, src_y, width, height)?;

    // Scan order keeps reads ahead of writes only when both rectangles share
    // a stride and each row span stays inside its stride slot. Outside that
    // (reflected reads, in-place conversion between tight strides of
    // different widths) no order is safe, so the source rectangle is staged
    // whole.
    let w = width as usize;
    let rows_nest = src_stride == dst_stride
        && (src_x as usize + w) * src_format.bytes_per_pixel() <= src_stride
        && (dst_x as usize + w) * dst_format.bytes_per_pixel() <= dst_stride;
    if flags.contains(CopyFlags::FLIP_VERTICAL) || !rows_nest {
        return overlap_copy_staged_full(
            buf, dst_format, dst_stride, dst_x, dst_y, width, height, src_format, src_stride,
            src_x, src_y, palette, flags,
        );
    }

    let direction = scan_direction(dst_x, dst_y, src_x, src_y);
    if flags.contains(CopyFlags::KEEP_DST_ALPHA) && dst_format.has_alpha() {
        overlap_copy_staged(
            buf,
            dst_format,
            dst_stride,
            dst_x,
            dst_y,
            width,
            height,
            src_format,
            src_stride,
            src_x,
            src_y,
            palette,
            rows_reversed(direction),
            true,
        )
    } else if src_format.is_memory_compatible(dst_format) {
        overlap_move_rows(
            buf, dst_stride, dst_x, dst_y, width, height, src_stride, src_x, src_y,
            dst_format.bytes_per_pixel(), direction,
        );
        Ok(())
    } else {
        overlap_copy_staged(
            buf,
            dst_format,
            dst_stride,
            dst_x,
            dst_y,
            width,
            height,
            src_format,
            src_stride,
            src_x,
            src_y,
            palette,
            rows_reversed(direction),
            false,
        )
    }
}

/// Memory-compatible formats: whole scanlines move with `copy_within`, rows
/// walked in the direction that keeps unread source rows intact.
#[allow(clippy::too_many_arguments)]
fn overlap_move_rows(
    buf: &mut [u8],
    dst_stride: usize,
    dst_x: u32,
    dst_y: u32,
    width: u32,
    height: u32,
    src_stride: usize,
    src_x: u32,
    src_y: u32,
    bpp: usize,
    direction: ScanDirection,
) {
    if direction == ScanDirection::Identical {
        return;
    }
    let row_bytes = width as usize * bpp;
    let h = height as usize;
    for i in 0..h {
        let y = if rows_reversed(direction) { h - 1 - i } else { i };
        let s = (src_y as usize + y) * src_stride + src_x as usize * bpp;
        let d = (dst_y as usize + y) * dst_stride + dst_x as usize * bpp;
        buf.copy_within(s..s + row_bytes, d);
    }
}

/// Converting overlap copy: each destination row is assembled in a scratch
/// scanline, then written back in one block. With `keep_alpha` the scratch
/// starts as the current destination row so alpha bytes survive, and the
/// known fast pairs move only the three color bytes.
#[allow(clippy::too_many_arguments)]
fn overlap_copy_staged(
    buf: &mut [u8],
    dst_format: PixelFormat,
    dst_stride: usize,
    dst_x: u32,
    dst_y: u32,
    width: u32,
    height: u32,
    src_format: PixelFormat,
    src_stride: usize,
    src_x: u32,
    src_y: u32,
    palette: Option<&Palette>,
    reversed: bool,
    keep_alpha: bool,
) -> Result<(), BlitError> {
    let src_bpp = src_format.bytes_per_pixel();
    let dst_bpp = dst_format.bytes_per_pixel();
    let w = width as usize;
    let h = height as usize;
    let row_bytes = w * dst_bpp;
    let mut scratch = vec![0u8; row_bytes];
    let mut cache = RunCache::new();
    let color_bytes = if keep_alpha {
        match (src_format, dst_format) {
            (PixelFormat::Bgr24, PixelFormat::Bgrx32 | PixelFormat::Bgra32) => Some(3),
            (
                PixelFormat::Bgrx32 | PixelFormat::Bgra32,
                PixelFormat::Bgrx32 | PixelFormat::Bgra32,
            ) => Some(4),
            _ => None,
        }
    } else {
        None
    };

    for i in 0..h {
        let y = if reversed { h - 1 - i } else { i };
        let s = (src_y as usize + y) * src_stride + src_x as usize * src_bpp;
        let d = (dst_y as usize + y) * dst_stride + dst_x as usize * dst_bpp;
        if keep_alpha {
            scratch.copy_from_slice(&buf[d..d + row_bytes]);
        }
        match color_bytes {
            Some(n) => {
                let src_px = buf[s..s + w * n].chunks_exact(n);
                for (out, px) in scratch.chunks_exact_mut(4).zip(src_px) {
                    out[..3].copy_from_slice(&px[..3]);
                }
            }
            None => {
                for x in 0..w {
                    let color = read_color(&buf[s + x * src_bpp..], src_format)?;
                    let converted = cache.convert(color, src_format, dst_format, palette)?;
                    let out = &mut scratch[x * dst_bpp..];
                    if keep_alpha {
                        write_color_ignore_alpha(out, dst_format, converted)?;
                    } else {
                        write_color(out, dst_format, converted)?;
                    }
                }
            }
        }
        buf[d..d + row_bytes].copy_from_slice(&scratch);
    }
    Ok(())
}

/// Extracts the source rectangle into a staging buffer, then runs the
/// ordinary non-overlapping copy from it honoring `flags`.
#[allow(clippy::too_many_arguments)]
fn overlap_copy_staged_full(
    buf: &mut [u8],
    dst_format: PixelFormat,
    dst_stride: usize,
    dst_x: u32,
    dst_y: u32,
    width: u32,
    height: u32,
    src_format: PixelFormat,
    src_stride: usize,
    src_x: u32,
    src_y: u32,
    palette: Option<&Palette>,
    flags: CopyFlags,
) -> Result<(), BlitError> {
    let src_bpp = src_format.bytes_per_pixel();
    let row_bytes = width as usize * src_bpp;
    let staged_len = row_bytes
        .checked_mul(height as usize)
        .ok_or(BlitError::DimensionsTooLarge { width, height })?;
    let mut staged = vec![0u8; staged_len];
    for y in 0..height as usize {
        let s = (src_y as usize + y) * src_stride + src_x as usize * src_bpp;
        staged[y * row_bytes..][..row_bytes].copy_from_slice(&buf[s..s + row_bytes]);
    }
    generic_copy_no_overlap(
        buf, dst_format, dst_stride, dst_x, dst_y, width, height, &staged, src_format, 0, 0, 0,
        palette, flags,
    )
}

// ── Fill ─────────────────────────────────────────────────────────────

/// Fills a rectangle with one packed color.
///
/// The first scanline is written pixel by pixel, the remaining rows are bulk
/// copies of it. A zero stride resolves to `(x + width)` pixels per row.
#[allow(clippy::too_many_arguments)]
pub fn image_fill(
    dst: &mut [u8],
    format: PixelFormat,
    stride: usize,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    color: u32,
) -> Result<(), BlitError> {
    if width == 0 || height == 0 {
        return Ok(());
    }
    check_size(width, height)?;
    let bpp = format.bytes_per_pixel();
    let stride = if stride != 0 {
        stride
    } else {
        (x as usize)
            .checked_add(width as usize)
            .and_then(|px| px.checked_mul(bpp))
            .ok_or(BlitError::DimensionsTooLarge { width, height })?
    };
    let (start, _) = check_rect(dst.len(), format, stride, x, y, width, height)?;
    let row_bytes = width as usize * bpp;
    for px in dst[start..start + row_bytes].chunks_exact_mut(bpp) {
        write_color(px, format, color)?;
    }
    for row in 1..height as usize {
        dst.copy_within(start..start + row_bytes, start + row * stride);
    }
    Ok(())
}

// ── Tests ────────────────────────────────────────────────────────────
