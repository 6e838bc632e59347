#![no_main]
use libfuzzer_sys::fuzz_target;
use zenblit::{
    glyph_convert, image_copy_from_cursor, image_copy_from_icon, image_copy_from_monochrome,
    Palette, PixelFormat,
};

// First bytes pick the geometry and depth, the rest is the payload fed to
// every bit-packed decoder. None of them may panic on arbitrary input.
fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }
    let width = u32::from(data[0]) % 64;
    let height = u32::from(data[1]) % 64;
    let bpp = [1u32, 4, 8, 12, 16, 24, 32][usize::from(data[2]) % 7];
    let split = usize::from(data[3]).min(data.len() - 4);
    let (head, tail) = data[4..].split_at(split);

    let mut dst = vec![0u8; 64 * 64 * 4];
    let palette = Palette::new(PixelFormat::Bgrx32);

    let _ = glyph_convert(width, height, head);
    let _ = image_copy_from_monochrome(
        &mut dst,
        PixelFormat::Bgra32,
        64 * 4,
        0,
        0,
        width,
        height,
        head,
        0xffff_ffff,
        0,
    );
    let _ = image_copy_from_icon(
        &mut dst,
        PixelFormat::Bgra32,
        64 * 4,
        0,
        0,
        width,
        height,
        head,
        Some(tail),
        Some(tail),
        bpp,
    );
    let _ = image_copy_from_cursor(
        &mut dst,
        PixelFormat::Bgra32,
        64 * 4,
        0,
        0,
        width,
        height,
        head,
        Some(tail),
        bpp,
        Some(&palette),
    );
});
