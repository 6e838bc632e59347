use core::fmt;

bitflags::bitflags! {
    /// Behavior flags for the copy operations.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct CopyFlags: u32 {
        /// Read source scanlines bottom-to-top.
        const FLIP_VERTICAL = 1 << 0;
        /// Keep the destination's alpha channel instead of the converted
        /// alpha. Only meaningful when the destination format has alpha.
        const KEEP_DST_ALPHA = 1 << 2;
    }
}

/// Pixel memory format.
///
/// Variant names give the channel order from the most significant byte of the
/// packed 32-bit value down; `X` marks a padding byte that carries no alpha.
/// The discriminant is the format's stable wire identifier, encoded as
/// `(bpp << 24) | (type << 16) | (a << 12) | (r << 8) | (g << 4) | b` with
/// per-channel bit widths in the low nibbles.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PixelFormat {
    /// 4 channels, 8-bit ARGB.
    Argb32 = 0x2001_8888,
    /// 3 channels, 8-bit RGB with a padding byte in the alpha position.
    Xrgb32 = 0x2001_0888,
    /// 4 channels, 8-bit ABGR.
    Abgr32 = 0x2002_8888,
    /// 3 channels, 8-bit BGR with a padding byte in the alpha position.
    Xbgr32 = 0x2002_0888,
    /// 4 channels, 8-bit RGBA.
    Rgba32 = 0x2003_8888,
    /// 3 channels, 8-bit RGB with a trailing padding byte.
    Rgbx32 = 0x2003_0888,
    /// 4 channels, 8-bit BGRA.
    Bgra32 = 0x2004_8888,
    /// 3 channels, 8-bit BGR with a trailing padding byte.
    Bgrx32 = 0x2004_0888,
    /// 10-bit BGR packed in 32 bits (deep color).
    Bgrx32Depth30 = 0x2004_0aaa,
    /// 10-bit RGB packed in 32 bits (deep color).
    Rgbx32Depth30 = 0x2003_0aaa,
    /// 3 channels, 8-bit RGB, 3 bytes per pixel.
    Rgb24 = 0x1801_0888,
    /// 3 channels, 8-bit BGR, 3 bytes per pixel.
    Bgr24 = 0x1802_0888,
    /// 5-6-5 RGB in 2 bytes.
    Rgb16 = 0x1001_0565,
    /// 5-6-5 BGR in 2 bytes.
    Bgr16 = 0x1002_0565,
    /// 1-5-5-5 ARGB in 2 bytes.
    Argb15 = 0x1001_1555,
    /// 1-5-5-5 ABGR in 2 bytes.
    Abgr15 = 0x1002_1555,
    /// 5-5-5 RGB in 2 bytes, top bit unused.
    Rgb15 = 0x0f01_0555,
    /// 5-5-5 BGR in 2 bytes, top bit unused.
    Bgr15 = 0x0f02_0555,
    /// 8-bit palette index.
    Rgb8 = 0x0800_8000,
    /// 4-bit alpha-only.
    A4 = 0x0400_4000,
    /// 1-bit monochrome.
    Mono = 0x0100_1000,
}

impl PixelFormat {
    /// Looks up a format by its wire identifier.
    pub fn from_bits(bits: u32) -> Option<Self> {
        Some(match bits {
            0x2001_8888 => Self::Argb32,
            0x2001_0888 => Self::Xrgb32,
            0x2002_8888 => Self::Abgr32,
            0x2002_0888 => Self::Xbgr32,
            0x2003_8888 => Self::Rgba32,
            0x2003_0888 => Self::Rgbx32,
            0x2004_8888 => Self::Bgra32,
            0x2004_0888 => Self::Bgrx32,
            0x2004_0aaa => Self::Bgrx32Depth30,
            0x2003_0aaa => Self::Rgbx32Depth30,
            0x1801_0888 => Self::Rgb24,
            0x1802_0888 => Self::Bgr24,
            0x1001_0565 => Self::Rgb16,
            0x1002_0565 => Self::Bgr16,
            0x1001_1555 => Self::Argb15,
            0x1002_1555 => Self::Abgr15,
            0x0f01_0555 => Self::Rgb15,
            0x0f02_0555 => Self::Bgr15,
            0x0800_8000 => Self::Rgb8,
            0x0400_4000 => Self::A4,
            0x0100_1000 => Self::Mono,
            _ => return None,
        })
    }

    /// The format's stable wire identifier.
    pub const fn bits(self) -> u32 {
        self as u32
    }

    /// Declared bits per pixel (15-bpp formats still occupy 2 bytes).
    pub fn bits_per_pixel(&self) -> u32 {
        match self {
            Self::Argb32
            | Self::Xrgb32
            | Self::Abgr32
            | Self::Xbgr32
            | Self::Rgba32
            | Self::Rgbx32
            | Self::Bgra32
            | Self::Bgrx32
            | Self::Bgrx32Depth30
            | Self::Rgbx32Depth30 => 32,
            Self::Rgb24 | Self::Bgr24 => 24,
            Self::Rgb16 | Self::Bgr16 | Self::Argb15 | Self::Abgr15 => 16,
            Self::Rgb15 | Self::Bgr15 => 15,
            Self::Rgb8 => 8,
            Self::A4 => 4,
            Self::Mono => 1,
        }
    }

    /// Bytes per pixel in buffer memory.
    pub fn bytes_per_pixel(&self) -> usize {
        self.bits_per_pixel().div_ceil(8) as usize
    }

    /// Whether the format carries a real alpha channel.
    pub fn has_alpha(&self) -> bool {
        matches!(
            self,
            Self::Argb32 | Self::Abgr32 | Self::Rgba32 | Self::Bgra32 | Self::Argb15 | Self::Abgr15
        )
    }

    /// Whether this format has the same memory representation as `other`
    /// once the alpha/padding distinction is ignored.
    ///
    /// For example, `Bgra32` and `Bgrx32` are compatible (same 4-byte
    /// B,G,R,X/A layout), while `Argb15` and `Rgb15` are not (16 vs 15
    /// declared bits).
    pub fn is_memory_compatible(&self, other: PixelFormat) -> bool {
        fn opaque(f: PixelFormat) -> PixelFormat {
            match f {
                PixelFormat::Argb32 => PixelFormat::Xrgb32,
                PixelFormat::Abgr32 => PixelFormat::Xbgr32,
                PixelFormat::Rgba32 => PixelFormat::Rgbx32,
                PixelFormat::Bgra32 => PixelFormat::Bgrx32,
                other => other,
            }
        }
        opaque(*self) == opaque(other)
    }

    /// Human-readable format name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Argb32 => "ARGB32",
            Self::Xrgb32 => "XRGB32",
            Self::Abgr32 => "ABGR32",
            Self::Xbgr32 => "XBGR32",
            Self::Rgba32 => "RGBA32",
            Self::Rgbx32 => "RGBX32",
            Self::Bgra32 => "BGRA32",
            Self::Bgrx32 => "BGRX32",
            Self::Bgrx32Depth30 => "BGRX32_DEPTH30",
            Self::Rgbx32Depth30 => "RGBX32_DEPTH30",
            Self::Rgb24 => "RGB24",
            Self::Bgr24 => "BGR24",
            Self::Rgb16 => "RGB16",
            Self::Bgr16 => "BGR16",
            Self::Argb15 => "ARGB15",
            Self::Abgr15 => "ABGR15",
            Self::Rgb15 => "RGB15",
            Self::Bgr15 => "BGR15",
            Self::Rgb8 => "RGB8",
            Self::A4 => "A4",
            Self::Mono => "MONO",
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 256-entry color table for indexed (`Rgb8`) sources.
#[derive(Clone)]
pub struct Palette {
    /// Format the entries are packed in.
    pub format: PixelFormat,
    /// One packed color per index.
    pub entries: [u32; 256],
}

impl Palette {
    /// A zero-filled palette with entries packed in `format`.
    pub const fn new(format: PixelFormat) -> Self {
        Self {
            format,
            entries: [0; 256],
        }
    }
}

impl fmt::Debug for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Palette")
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}
