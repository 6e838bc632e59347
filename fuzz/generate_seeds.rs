#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // fuzz_decode input layout: [width, height, bpp-selector, head-split]
    // followed by the payload. The head feeds the glyph/mono/color planes,
    // the tail feeds the masks and the icon color table.

    // 2x2 1-bpp cursor: both masks present, exercises the truth table.
    let mut cursor_1bpp = vec![2u8, 2, 0, 4];
    cursor_1bpp.extend_from_slice(&[0b1000_0000, 0, 0b0100_0000, 0]); // XOR
    cursor_1bpp.extend_from_slice(&[0b0100_0000, 0, 0b0100_0000, 0]); // AND
    fs::write(format!("{dir}/cursor_1bpp_2x2.bin"), &cursor_1bpp).unwrap();

    // 2x2 32-bpp cursor: black and white pixels under set AND bits.
    let mut cursor_32bpp = vec![2u8, 2, 6, 16];
    cursor_32bpp.extend_from_slice(&[0, 0, 0, 255, 255, 255, 255, 255]);
    cursor_32bpp.extend_from_slice(&[0, 0, 255, 255, 0, 255, 0, 255]);
    cursor_32bpp.extend_from_slice(&[0b1100_0000, 0, 0, 0]);
    fs::write(format!("{dir}/cursor_32bpp_2x2.bin"), &cursor_32bpp).unwrap();

    // 2x2 8-bpp icon with a two-entry BGRX color table in the tail.
    let mut icon_8bpp = vec![2u8, 2, 2, 4];
    icon_8bpp.extend_from_slice(&[1, 0, 0, 1]);
    icon_8bpp.extend_from_slice(&[0, 0, 0, 0, 10, 20, 30, 0]);
    fs::write(format!("{dir}/icon_8bpp_2x2.bin"), &icon_8bpp).unwrap();

    // 10x2 glyph scanlines.
    let mut glyph = vec![10u8, 2, 0, 4];
    glyph.extend_from_slice(&[0b1010_0000, 0b0100_0000, 0b0000_0001, 0b1000_0000]);
    fs::write(format!("{dir}/glyph_10x2.bin"), &glyph).unwrap();

    // Truncated/degenerate seeds for edge coverage.
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/zero_extent.bin"), [0u8, 0, 6, 0]).unwrap();
    fs::write(format!("{dir}/short_masks.bin"), [8u8, 8, 6, 2, 0xab, 0xcd]).unwrap();

    println!("Generated seed corpus in {dir}/");
}
