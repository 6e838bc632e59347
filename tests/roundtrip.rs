//! Pack/split roundtrips and raw marshalling for every pixel format.

use zenblit::*;

/// All formats a color can be packed into.
const PACKABLE: &[PixelFormat] = &[
    PixelFormat::Argb32,
    PixelFormat::Xrgb32,
    PixelFormat::Abgr32,
    PixelFormat::Xbgr32,
    PixelFormat::Rgba32,
    PixelFormat::Rgbx32,
    PixelFormat::Bgra32,
    PixelFormat::Bgrx32,
    PixelFormat::Rgb24,
    PixelFormat::Bgr24,
    PixelFormat::Rgb16,
    PixelFormat::Bgr16,
    PixelFormat::Argb15,
    PixelFormat::Abgr15,
    PixelFormat::Rgb15,
    PixelFormat::Bgr15,
];

fn rgba(r: u8, g: u8, b: u8, a: u8) -> Rgba<u8> {
    Rgba { r, g, b, a }
}

// ── Pack / split roundtrips ──────────────────────────────────────────

#[test]
fn roundtrip_exact_for_8bit_channels() {
    let samples = [
        rgba(0, 0, 0, 255),
        rgba(255, 255, 255, 255),
        rgba(255, 0, 0, 255),
        rgba(0, 255, 0, 255),
        rgba(0, 0, 255, 255),
        rgba(1, 2, 3, 255),
        rgba(200, 100, 50, 255),
    ];
    for format in [
        PixelFormat::Argb32,
        PixelFormat::Abgr32,
        PixelFormat::Rgba32,
        PixelFormat::Bgra32,
    ] {
        for px in samples {
            let packed = pack_color(format, px).unwrap();
            assert_eq!(split_color(packed, format, None).unwrap(), px, "{format}");
        }
        // Alpha carried exactly on the alpha formats.
        let packed = pack_color(format, rgba(10, 20, 30, 0x55)).unwrap();
        assert_eq!(split_color(packed, format, None).unwrap().a, 0x55, "{format}");
    }
    for format in [PixelFormat::Rgb24, PixelFormat::Bgr24] {
        for px in samples {
            let packed = pack_color(format, px).unwrap();
            assert_eq!(split_color(packed, format, None).unwrap(), px, "{format}");
        }
    }
}

#[test]
fn x_formats_read_back_opaque() {
    for format in [
        PixelFormat::Xrgb32,
        PixelFormat::Xbgr32,
        PixelFormat::Rgbx32,
        PixelFormat::Bgrx32,
    ] {
        let packed = pack_color(format, rgba(9, 8, 7, 0)).unwrap();
        let split = split_color(packed, format, None).unwrap();
        assert_eq!((split.r, split.g, split.b), (9, 8, 7), "{format}");
        assert_eq!(split.a, 0xff, "{format}");
    }
}

#[test]
fn roundtrip_small_error_for_narrow_channels() {
    let samples = [
        rgba(0, 0, 0, 255),
        rgba(255, 255, 255, 255),
        rgba(128, 128, 128, 255),
        rgba(37, 99, 201, 255),
        rgba(250, 5, 67, 255),
    ];
    for format in [
        PixelFormat::Rgb16,
        PixelFormat::Bgr16,
        PixelFormat::Argb15,
        PixelFormat::Abgr15,
        PixelFormat::Rgb15,
        PixelFormat::Bgr15,
    ] {
        for px in samples {
            let packed = pack_color(format, px).unwrap();
            let split = split_color(packed, format, None).unwrap();
            assert!(split.r.abs_diff(px.r) <= 8, "{format} r: {} vs {}", split.r, px.r);
            assert!(split.g.abs_diff(px.g) <= 8, "{format} g: {} vs {}", split.g, px.g);
            assert!(split.b.abs_diff(px.b) <= 8, "{format} b: {} vs {}", split.b, px.b);
            assert_eq!(split.a, 0xff, "{format}");
        }
    }
    // Extremes stay exact under the expansion formula.
    for format in [PixelFormat::Rgb16, PixelFormat::Rgb15] {
        let white = pack_color(format, rgba(255, 255, 255, 255)).unwrap();
        assert_eq!(split_color(white, format, None).unwrap(), rgba(255, 255, 255, 255));
        let black = pack_color(format, rgba(0, 0, 0, 255)).unwrap();
        assert_eq!(split_color(black, format, None).unwrap(), rgba(0, 0, 0, 255));
    }
}

#[test]
fn one_bit_alpha_maps_to_full_or_zero() {
    for format in [PixelFormat::Argb15, PixelFormat::Abgr15] {
        let opaque = pack_color(format, rgba(10, 20, 30, 1)).unwrap();
        assert_ne!(opaque & 0x8000, 0, "{format}");
        assert_eq!(split_color(opaque, format, None).unwrap().a, 0xff);

        let clear = pack_color(format, rgba(10, 20, 30, 0)).unwrap();
        assert_eq!(clear & 0x8000, 0, "{format}");
        assert_eq!(split_color(clear, format, None).unwrap().a, 0x00);
    }
}

// ── Bit-exact packing pins ───────────────────────────────────────────

#[test]
fn packed_layouts_are_bit_exact() {
    assert_eq!(pack_color(PixelFormat::Argb32, rgba(1, 2, 3, 4)).unwrap(), 0x0401_0203);
    assert_eq!(pack_color(PixelFormat::Xrgb32, rgba(1, 2, 3, 4)).unwrap(), 0x0001_0203);
    assert_eq!(pack_color(PixelFormat::Abgr32, rgba(1, 2, 3, 4)).unwrap(), 0x0403_0201);
    assert_eq!(pack_color(PixelFormat::Rgba32, rgba(1, 2, 3, 4)).unwrap(), 0x0102_0304);
    assert_eq!(pack_color(PixelFormat::Bgra32, rgba(1, 2, 3, 4)).unwrap(), 0x0302_0104);
    // The X-byte of RGBX/BGRX still receives the alpha argument.
    assert_eq!(pack_color(PixelFormat::Rgbx32, rgba(1, 2, 3, 4)).unwrap(), 0x0102_0304);
    assert_eq!(pack_color(PixelFormat::Bgrx32, rgba(1, 2, 3, 4)).unwrap(), 0x0302_0104);

    assert_eq!(pack_color(PixelFormat::Rgb24, rgba(1, 2, 3, 0)).unwrap(), 0x0001_0203);
    assert_eq!(pack_color(PixelFormat::Bgr24, rgba(1, 2, 3, 0)).unwrap(), 0x0003_0201);

    assert_eq!(pack_color(PixelFormat::Rgb16, rgba(255, 0, 0, 0)).unwrap(), 0xf800);
    assert_eq!(pack_color(PixelFormat::Rgb16, rgba(0, 255, 0, 0)).unwrap(), 0x07e0);
    assert_eq!(pack_color(PixelFormat::Rgb16, rgba(0, 0, 255, 0)).unwrap(), 0x001f);
    assert_eq!(pack_color(PixelFormat::Bgr16, rgba(255, 0, 0, 0)).unwrap(), 0x001f);
    assert_eq!(pack_color(PixelFormat::Argb15, rgba(255, 255, 255, 255)).unwrap(), 0xffff);
    assert_eq!(pack_color(PixelFormat::Argb15, rgba(255, 255, 255, 0)).unwrap(), 0x7fff);
    assert_eq!(pack_color(PixelFormat::Rgb15, rgba(255, 255, 255, 255)).unwrap(), 0x7fff);
}

#[test]
fn narrow_channel_expansion_is_bit_exact() {
    // 0x8421: r=16, g=33, b=1 in 5-6-5. Expansion is (c<<3)+c/4 for 5-bit
    // channels and (c<<2)+c/8 for the 6-bit green.
    let split = split_color(0x8421, PixelFormat::Rgb16, None).unwrap();
    assert_eq!((split.r, split.g, split.b, split.a), (132, 136, 8, 0xff));

    // 6-bit 63 expands past 255 and clamps.
    let split = split_color(0x07e0, PixelFormat::Rgb16, None).unwrap();
    assert_eq!(split.g, 255);

    // 5-bit channels recover exactly after truncation.
    for c in 0u32..32 {
        let px = split_color(c, PixelFormat::Rgb15, None).unwrap();
        let repacked = pack_color(PixelFormat::Rgb15, px).unwrap();
        assert_eq!(repacked, c);
    }
}

#[test]
fn depth30_packing_is_byte_swapped() {
    // 10-bit channels at bits 22/12/2, byte-swapped for the big-endian write.
    for format in [PixelFormat::Bgrx32Depth30, PixelFormat::Rgbx32Depth30] {
        assert_eq!(pack_color(format, rgba(255, 0, 0, 0)).unwrap(), 0x0000_c03f);
        assert_eq!(pack_color(format, rgba(0, 0, 255, 0)).unwrap(), 0xfc03_0000);
        assert_eq!(pack_color(format, rgba(0, 255, 0, 0)).unwrap(), 0x000f_f000u32.swap_bytes());
    }
    // Both depth-30 variants pack identically.
    let a = pack_color(PixelFormat::Bgrx32Depth30, rgba(11, 22, 33, 0)).unwrap();
    let b = pack_color(PixelFormat::Rgbx32Depth30, rgba(11, 22, 33, 0)).unwrap();
    assert_eq!(a, b);
}

// ── Unsupported directions ───────────────────────────────────────────

#[test]
fn indexed_and_subbyte_formats_cannot_pack() {
    for format in [PixelFormat::Rgb8, PixelFormat::A4, PixelFormat::Mono] {
        assert_eq!(
            pack_color(format, rgba(1, 2, 3, 4)),
            Err(BlitError::UnsupportedFormat(format))
        );
    }
}

#[test]
fn depth30_and_a4_cannot_split() {
    for format in [
        PixelFormat::Bgrx32Depth30,
        PixelFormat::Rgbx32Depth30,
        PixelFormat::A4,
    ] {
        assert_eq!(
            split_color(0, format, None),
            Err(BlitError::UnsupportedFormat(format))
        );
    }
}

// ── Palette and mono splits ──────────────────────────────────────────

#[test]
fn indexed_split_resolves_through_palette() {
    let mut palette = Palette::new(PixelFormat::Xrgb32);
    palette.entries[7] = pack_color(PixelFormat::Xrgb32, rgba(10, 20, 30, 0)).unwrap();

    let split = split_color(7, PixelFormat::Rgb8, Some(&palette)).unwrap();
    assert_eq!(split, rgba(10, 20, 30, 0xff));

    // Entries are re-split in the palette's own format.
    let mut bgr = Palette::new(PixelFormat::Bgr24);
    bgr.entries[0] = pack_color(PixelFormat::Bgr24, rgba(1, 2, 3, 0)).unwrap();
    assert_eq!(split_color(0, PixelFormat::Rgb8, Some(&bgr)).unwrap(), rgba(1, 2, 3, 0xff));
}

#[test]
fn indexed_split_without_palette_is_an_error() {
    assert_eq!(
        split_color(3, PixelFormat::Rgb8, None),
        Err(BlitError::PaletteRequired(PixelFormat::Rgb8))
    );
}

#[test]
fn indexed_split_out_of_range_yields_zeros() {
    // Yields zero channels without touching the palette and without error.
    let split = split_color(0x100, PixelFormat::Rgb8, None).unwrap();
    assert_eq!(split, rgba(0, 0, 0, 0));
}

#[test]
fn mono_split_follows_the_bit() {
    assert_eq!(split_color(1, PixelFormat::Mono, None).unwrap(), rgba(255, 255, 255, 255));
    assert_eq!(split_color(0, PixelFormat::Mono, None).unwrap(), rgba(0, 0, 0, 0));
}

// ── Convert ──────────────────────────────────────────────────────────

#[test]
fn convert_is_split_then_pack() {
    for src in PACKABLE {
        let packed = pack_color(*src, rgba(200, 100, 50, 255)).unwrap();
        let via_convert =
            convert_color(packed, *src, PixelFormat::Argb32, None).unwrap();
        let via_parts = pack_color(
            PixelFormat::Argb32,
            split_color(packed, *src, None).unwrap(),
        )
        .unwrap();
        assert_eq!(via_convert, via_parts, "{src}");
    }
}

#[test]
fn convert_there_and_back_is_identity_when_lossless() {
    // 8-bit-per-channel pairs lose nothing.
    let v = pack_color(PixelFormat::Bgra32, rgba(1, 250, 3, 200)).unwrap();
    let there = convert_color(v, PixelFormat::Bgra32, PixelFormat::Argb32, None).unwrap();
    assert_eq!(
        convert_color(there, PixelFormat::Argb32, PixelFormat::Bgra32, None).unwrap(),
        v
    );

    // 5-bit channels expand and re-truncate exactly.
    for v in [0x0000u32, 0x7fff, 0x1234, 0x5555] {
        let there = convert_color(v, PixelFormat::Rgb15, PixelFormat::Argb32, None).unwrap();
        assert_eq!(
            convert_color(there, PixelFormat::Argb32, PixelFormat::Rgb15, None).unwrap(),
            v
        );
    }
}

// ── Raw buffer marshalling ───────────────────────────────────────────

#[test]
fn read_write_byte_orders() {
    let mut buf = [0u8; 4];

    write_color(&mut buf, PixelFormat::Bgra32, 0x0102_0304).unwrap();
    assert_eq!(buf, [1, 2, 3, 4]);
    assert_eq!(read_color(&buf, PixelFormat::Bgra32).unwrap(), 0x0102_0304);

    write_color(&mut buf[..3], PixelFormat::Rgb24, 0x00aa_bbcc).unwrap();
    assert_eq!(&buf[..3], &[0xaa, 0xbb, 0xcc]);
    assert_eq!(read_color(&buf[..3], PixelFormat::Rgb24).unwrap(), 0x00aa_bbcc);

    // 16- and 15-bpp formats are little-endian in memory.
    write_color(&mut buf[..2], PixelFormat::Rgb16, 0x3102).unwrap();
    assert_eq!(&buf[..2], &[0x02, 0x31]);
    assert_eq!(read_color(&buf[..2], PixelFormat::Rgb16).unwrap(), 0x3102);
    write_color(&mut buf[..2], PixelFormat::Rgb15, 0x7fff).unwrap();
    assert_eq!(&buf[..2], &[0xff, 0x7f]);

    write_color(&mut buf[..1], PixelFormat::Rgb8, 0x42).unwrap();
    assert_eq!(buf[0], 0x42);
    assert_eq!(read_color(&buf[..1], PixelFormat::Rgb8).unwrap(), 0x42);
}

#[test]
fn read_write_reject_short_buffers_and_subbyte_formats() {
    let mut buf = [0u8; 4];
    assert_eq!(
        read_color(&buf[..2], PixelFormat::Bgra32),
        Err(BlitError::BufferTooSmall { needed: 4, actual: 2 })
    );
    assert_eq!(
        write_color(&mut buf[..1], PixelFormat::Rgb16, 0),
        Err(BlitError::BufferTooSmall { needed: 2, actual: 1 })
    );
    for format in [PixelFormat::A4, PixelFormat::Mono] {
        assert_eq!(read_color(&buf, format), Err(BlitError::UnsupportedFormat(format)));
        assert_eq!(
            write_color(&mut buf, format, 0),
            Err(BlitError::UnsupportedFormat(format))
        );
    }
}

#[test]
fn ignore_alpha_write_keeps_the_destination_byte() {
    // Alpha leads in ARGB-layout formats.
    let mut buf = [0x77u8, 0, 0, 0];
    let color = pack_color(PixelFormat::Argb32, rgba(1, 2, 3, 0xff)).unwrap();
    write_color_ignore_alpha(&mut buf, PixelFormat::Argb32, color).unwrap();
    assert_eq!(buf, [0x77, 1, 2, 3]);

    // Alpha trails in RGBA/BGRA-layout formats.
    let mut buf = [0u8, 0, 0, 0x99];
    let color = pack_color(PixelFormat::Bgra32, rgba(1, 2, 3, 0xff)).unwrap();
    write_color_ignore_alpha(&mut buf, PixelFormat::Bgra32, color).unwrap();
    assert_eq!(buf, [3, 2, 1, 0x99]);

    // Formats without a dedicated alpha byte write through unchanged.
    let mut buf = [0u8; 3];
    write_color_ignore_alpha(&mut buf, PixelFormat::Rgb24, 0x00aa_bbcc).unwrap();
    assert_eq!(buf, [0xaa, 0xbb, 0xcc]);
}

// ── Format metadata ──────────────────────────────────────────────────

#[test]
fn wire_identifiers_are_stable() {
    assert_eq!(PixelFormat::Argb32.bits(), 0x2001_8888);
    assert_eq!(PixelFormat::Bgra32.bits(), 0x2004_8888);
    assert_eq!(PixelFormat::Bgrx32.bits(), 0x2004_0888);
    assert_eq!(PixelFormat::Bgrx32Depth30.bits(), 0x2004_0aaa);
    assert_eq!(PixelFormat::Rgb24.bits(), 0x1801_0888);
    assert_eq!(PixelFormat::Rgb16.bits(), 0x1001_0565);
    assert_eq!(PixelFormat::Argb15.bits(), 0x1001_1555);
    assert_eq!(PixelFormat::Rgb15.bits(), 0x0f01_0555);
    assert_eq!(PixelFormat::Rgb8.bits(), 0x0800_8000);
    assert_eq!(PixelFormat::A4.bits(), 0x0400_4000);
    assert_eq!(PixelFormat::Mono.bits(), 0x0100_1000);

    for format in PACKABLE {
        assert_eq!(PixelFormat::from_bits(format.bits()), Some(*format));
    }
    assert_eq!(PixelFormat::from_bits(0xdead_beef), None);
}

#[test]
fn bits_and_bytes_per_pixel() {
    assert_eq!(PixelFormat::Bgra32.bits_per_pixel(), 32);
    assert_eq!(PixelFormat::Bgra32.bytes_per_pixel(), 4);
    assert_eq!(PixelFormat::Rgb24.bytes_per_pixel(), 3);
    // 15-bpp formats still occupy two bytes.
    assert_eq!(PixelFormat::Rgb15.bits_per_pixel(), 15);
    assert_eq!(PixelFormat::Rgb15.bytes_per_pixel(), 2);
    assert_eq!(PixelFormat::Argb15.bits_per_pixel(), 16);
    assert_eq!(PixelFormat::Mono.bytes_per_pixel(), 1);
}

#[test]
fn alpha_is_limited_to_real_alpha_channels() {
    let with_alpha = [
        PixelFormat::Argb32,
        PixelFormat::Abgr32,
        PixelFormat::Rgba32,
        PixelFormat::Bgra32,
        PixelFormat::Argb15,
        PixelFormat::Abgr15,
    ];
    for format in with_alpha {
        assert!(format.has_alpha(), "{format}");
    }
    for format in [
        PixelFormat::Xrgb32,
        PixelFormat::Bgrx32,
        PixelFormat::Rgb24,
        PixelFormat::Rgb16,
        PixelFormat::Rgb15,
        PixelFormat::Rgb8,
        PixelFormat::A4,
        PixelFormat::Mono,
    ] {
        assert!(!format.has_alpha(), "{format}");
    }
}

#[test]
fn memory_compatibility_ignores_only_the_alpha_byte() {
    assert!(PixelFormat::Argb32.is_memory_compatible(PixelFormat::Xrgb32));
    assert!(PixelFormat::Bgra32.is_memory_compatible(PixelFormat::Bgrx32));
    assert!(PixelFormat::Rgba32.is_memory_compatible(PixelFormat::Rgbx32));
    assert!(PixelFormat::Bgra32.is_memory_compatible(PixelFormat::Bgra32));

    assert!(!PixelFormat::Argb32.is_memory_compatible(PixelFormat::Abgr32));
    assert!(!PixelFormat::Bgra32.is_memory_compatible(PixelFormat::Rgba32));
    // 15- and 16-bpp formats differ in declared depth, not just alpha.
    assert!(!PixelFormat::Argb15.is_memory_compatible(PixelFormat::Rgb15));
    // Depth-30 channel widths differ from the 8-bit layouts.
    assert!(!PixelFormat::Bgrx32.is_memory_compatible(PixelFormat::Bgrx32Depth30));
}

#[test]
fn format_names() {
    assert_eq!(PixelFormat::Bgra32.name(), "BGRA32");
    assert_eq!(PixelFormat::Bgrx32Depth30.name(), "BGRX32_DEPTH30");
    assert_eq!(PixelFormat::Mono.name(), "MONO");
    assert_eq!(format!("{}", PixelFormat::Rgb16), "RGB16");
}
