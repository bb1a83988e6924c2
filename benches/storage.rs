//! Storage benchmarks.
//!
//! Compares construct/read/destroy cycles on a flat union, on a deep split
//! union and on a plain enum, which pays for its discriminant.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use variadic_union::variadic_union;

variadic_union! {
    union Flat { u8, u64, String }

    union Deep {
        u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, bool, char,
        (), String, [u8; 1], [u8; 2], [u8; 3], [u8; 4], [u8; 5], [u8; 6], [u8; 7], [u8; 8],
        [u8; 9], [u8; 10], [u8; 11], [u8; 12], [u8; 13], [u8; 14]
    }
}

#[allow(dead_code)]
enum Tagged {
    Byte(u8),
    Word(u64),
    Text(String),
}

fn bench_scalar_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalar_cycle");

    group.bench_function("flat", |b| {
        let mut storage = Flat::new();
        b.iter(|| {
            storage.construct::<u64, _>(black_box(7));
            black_box(unsafe { *storage.reference::<u64, _>() })
        })
    });

    group.bench_function("deep", |b| {
        let mut storage = Deep::new();
        b.iter(|| {
            storage.construct::<[u8; 14], _>(black_box([7; 14]));
            black_box(unsafe { *storage.reference::<[u8; 14], _>() })
        })
    });

    group.bench_function("enum", |b| {
        b.iter(|| {
            let tagged = Tagged::Word(black_box(7));
            match tagged {
                Tagged::Word(word) => black_box(word),
                Tagged::Byte(byte) => black_box(u64::from(byte)),
                Tagged::Text(text) => black_box(text.len() as u64),
            }
        })
    });

    group.finish();
}

fn bench_owned_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("owned_cycle");

    group.bench_function("flat", |b| {
        let mut storage = Flat::new();
        b.iter(|| {
            storage.construct::<String, _>(String::from(black_box("text")));
            black_box(unsafe { storage.reference::<String, _>() }.len());
            unsafe { storage.destroy::<String, _>() };
        })
    });

    group.bench_function("deep_guard", |b| {
        let mut storage = Deep::new();
        b.iter(|| {
            let text = storage.occupy::<String, _>(String::from(black_box("text")));
            black_box(text.len())
        })
    });

    group.finish();
}

criterion_group!(storage_benches, bench_scalar_cycle, bench_owned_cycle);
criterion_main!(storage_benches);
