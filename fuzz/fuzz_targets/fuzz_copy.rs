#![no_main]
use libfuzzer_sys::fuzz_target;
use zenblit::{image_copy, image_copy_within, CopyFlags, PixelFormat};

const SIDE: u32 = 32;
const STRIDE: usize = SIDE as usize * 4;

// Same-buffer copies must match the copy-through-scratch result for any
// rectangle placement, overlapping or not.
fuzz_target!(|data: &[u8]| {
    if data.len() < 8 {
        return;
    }
    let width = 1 + u32::from(data[0]) % 16;
    let height = 1 + u32::from(data[1]) % 16;
    let dst_x = u32::from(data[2]) % (SIDE - width + 1);
    let dst_y = u32::from(data[3]) % (SIDE - height + 1);
    let src_x = u32::from(data[4]) % (SIDE - width + 1);
    let src_y = u32::from(data[5]) % (SIDE - height + 1);
    let dst_format = if data[6] & 1 == 0 {
        PixelFormat::Bgra32
    } else {
        PixelFormat::Rgb24
    };
    let flags = if data[6] & 2 == 0 {
        CopyFlags::empty()
    } else {
        CopyFlags::FLIP_VERTICAL
    };

    let mut buf = vec![0u8; SIDE as usize * STRIDE];
    let mut state = 0x9e37_79b9u32;
    for (i, b) in buf.iter_mut().enumerate() {
        state = state.wrapping_mul(0x01000193) ^ u32::from(data[7 + i % (data.len() - 7)]);
        *b = state as u8;
    }

    // Reference: pull the source rectangle out, then copy from the scratch.
    let mut scratch = vec![0u8; width as usize * height as usize * 4];
    image_copy(
        &mut scratch,
        PixelFormat::Bgra32,
        0,
        0,
        0,
        width,
        height,
        &buf,
        PixelFormat::Bgra32,
        STRIDE,
        src_x,
        src_y,
        None,
        CopyFlags::empty(),
    )
    .unwrap();
    let mut expect = buf.clone();
    image_copy(
        &mut expect,
        dst_format,
        STRIDE,
        dst_x,
        dst_y,
        width,
        height,
        &scratch,
        PixelFormat::Bgra32,
        0,
        0,
        0,
        None,
        flags,
    )
    .unwrap();

    image_copy_within(
        &mut buf,
        dst_format,
        STRIDE,
        dst_x,
        dst_y,
        width,
        height,
        PixelFormat::Bgra32,
        STRIDE,
        src_x,
        src_y,
        None,
        flags,
    )
    .unwrap();
    assert_eq!(buf, expect, "in-place copy diverged from the staged copy");
});
