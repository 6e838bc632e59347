//! Criterion benchmarks for the copy engine hot paths.
//!
//! Run with: `cargo bench`
//! Quick compile check: `cargo bench -- --test`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use zenblit::{image_copy, image_fill, CopyFlags, PixelFormat};

const W: u32 = 256;
const H: u32 = 256;

fn gradient(bpp: usize) -> Vec<u8> {
    let mut pixels = vec![0u8; W as usize * H as usize * bpp];
    for (i, p) in pixels.iter_mut().enumerate() {
        *p = (i / 7) as u8;
    }
    pixels
}

fn bench_copy(c: &mut Criterion) {
    let mut group = c.benchmark_group("image_copy");
    group.throughput(Throughput::Bytes(u64::from(W * H * 4)));

    // Memory-compatible formats take the bulk row path.
    let src = gradient(4);
    let mut dst = vec![0u8; src.len()];
    group.bench_function("bgra_to_bgrx_256", |b| {
        b.iter(|| {
            image_copy(
                black_box(&mut dst),
                PixelFormat::Bgrx32,
                0,
                0,
                0,
                W,
                H,
                black_box(&src),
                PixelFormat::Bgra32,
                0,
                0,
                0,
                None,
                CopyFlags::empty(),
            )
        });
    });

    // Differing formats run the per-pixel conversion loop.
    let mut dst16 = vec![0u8; W as usize * H as usize * 2];
    group.bench_function("bgra_to_rgb16_256", |b| {
        b.iter(|| {
            image_copy(
                black_box(&mut dst16),
                PixelFormat::Rgb16,
                0,
                0,
                0,
                W,
                H,
                black_box(&src),
                PixelFormat::Bgra32,
                0,
                0,
                0,
                None,
                CopyFlags::empty(),
            )
        });
    });

    // A solid source keeps the run cache hot.
    let solid = vec![0x42u8; W as usize * H as usize * 4];
    group.bench_function("solid_bgra_to_rgb16_256", |b| {
        b.iter(|| {
            image_copy(
                black_box(&mut dst16),
                PixelFormat::Rgb16,
                0,
                0,
                0,
                W,
                H,
                black_box(&solid),
                PixelFormat::Bgra32,
                0,
                0,
                0,
                None,
                CopyFlags::empty(),
            )
        });
    });

    group.finish();
}

fn bench_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("image_fill");
    group.throughput(Throughput::Bytes(u64::from(W * H * 4)));

    let mut dst = vec![0u8; W as usize * H as usize * 4];
    group.bench_function("bgra_256", |b| {
        b.iter(|| {
            image_fill(
                black_box(&mut dst),
                PixelFormat::Bgra32,
                0,
                0,
                0,
                W,
                H,
                black_box(0x010a_f0ff),
            )
        });
    });

    group.finish();
}

criterion_group!(benches, bench_copy, bench_fill);
criterion_main!(benches);
