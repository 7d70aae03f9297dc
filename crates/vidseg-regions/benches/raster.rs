//! Benchmarks for rasterizing a full-HD segmentation at several levels.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use vidseg_regions::{id_image, render_random_color, Frame, HierarchyLevel, Region};

const WIDTH: u32 = 1920;
const HEIGHT: u32 = 1080;
const BLOCK: u32 = 24;

/// 80x45 square regions, parent of `id` is `id / 4`.
fn blocks() -> (Frame, Vec<HierarchyLevel>) {
    let cols = WIDTH / BLOCK;
    let rows = HEIGHT / BLOCK;
    let mut frame = Frame::new(WIDTH, HEIGHT);
    for r in 0..rows {
        for c in 0..cols {
            let id = r * cols + c;
            let run = [(c * BLOCK, c * BLOCK + BLOCK - 1)];
            let lines: Vec<&[(u32, u32)]> = (0..BLOCK).map(|_| &run[..]).collect();
            frame
                .regions
                .push(Region::from_rows(id, id / 4, r * BLOCK, &lines));
        }
    }

    let mut hierarchy = Vec::new();
    let mut count = (cols * rows).div_ceil(4);
    while count > 1 {
        hierarchy.push(HierarchyLevel::new((0..count).map(|id| id / 4).collect()));
        count = count.div_ceil(4);
    }
    (frame, hierarchy)
}

fn bench_raster(c: &mut Criterion) {
    let (frame, hierarchy) = blocks();
    let mut group = c.benchmark_group("raster");
    group.throughput(Throughput::Elements(frame.pixel_count() as u64));

    for level in [0usize, 1, 3] {
        group.bench_with_input(BenchmarkId::new("id_image", level), &level, |b, &level| {
            b.iter(|| id_image(black_box(&frame), level, Some(hierarchy.as_slice())).unwrap());
        });
    }

    for highlight in [false, true] {
        group.bench_with_input(
            BenchmarkId::new("random_color", highlight),
            &highlight,
            |b, &highlight| {
                b.iter(|| {
                    render_random_color(black_box(&frame), 2, Some(hierarchy.as_slice()), highlight)
                        .unwrap()
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_raster);
criterion_main!(benches);
