use crate::PixelFormat;

/// Errors from color packing, blitting, and bit-packed decoding.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum BlitError {
    #[error("unsupported pixel format: {0}")]
    UnsupportedFormat(PixelFormat),

    #[error("unsupported source depth: {bpp} bpp")]
    UnsupportedDepth { bpp: u32 },

    #[error("palette required for {0}")]
    PaletteRequired(PixelFormat),

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("mask too small: need {needed} bytes, got {actual}")]
    MaskTooSmall { needed: usize, actual: usize },

    #[error("required cursor mask missing or empty")]
    MaskRequired,

    #[error("no resampling backend built in (enable the `resample` feature)")]
    ScaleUnavailable,
}
