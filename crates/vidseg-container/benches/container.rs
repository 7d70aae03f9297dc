//! Benchmark container write and random-access read throughput.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::io::Cursor;
use vidseg_container::{ContainerReader, ContainerWriter};

fn build_container(frames: usize, payload_len: usize) -> Vec<u8> {
    let payload = vec![0xA5u8; payload_len];
    let mut writer = ContainerWriter::new(Cursor::new(Vec::new())).unwrap();
    for i in 0..frames {
        writer.write_frame(&payload, i as i64 * 33).unwrap();
    }
    writer.finalize().unwrap().into_inner()
}

fn bench_container(c: &mut Criterion) {
    let mut group = c.benchmark_group("container");

    group.bench_function("write_300x16k", |b| {
        b.iter(|| build_container(black_box(300), 16 * 1024));
    });

    let bytes = build_container(300, 16 * 1024);
    group.bench_function("open_index_300", |b| {
        b.iter(|| ContainerReader::new(Cursor::new(black_box(&bytes[..]))).unwrap());
    });

    group.bench_function("random_read_300", |b| {
        let mut reader = ContainerReader::new(Cursor::new(&bytes[..])).unwrap();
        b.iter(|| {
            for i in (0..300).rev().step_by(7) {
                black_box(reader.read_frame_at(i).unwrap());
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_container);
criterion_main!(benches);
