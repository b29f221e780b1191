//! Benchmarks for demangling throughput.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use mwsym_demangle::{demangle, demangle_or_original};

/// A realistic mix of symbols as they appear in a CodeWarrior map file:
/// plain C names, member functions, const members, qualified scopes,
/// templates, function pointers, and generated initializers.
const SYMBOLS: &[&str] = &[
    "main",
    "OSReport",
    "memcpy__FPvPCvUi",
    "insert__4ListFPv",
    "GetLength__9RangeListCFv",
    "insert__Q24util4ListFPv",
    "get__9Pair<i,i>Fv",
    "SetCallback__FPFi_v",
    "sum__FA3_A4_i",
    "blend__FfUid",
    "__ct__3FooFv",
    "__sinit_Object_cpp",
];

fn bench_demangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("demangle");

    let total_bytes: usize = SYMBOLS.iter().map(|s| s.len()).sum();
    group.throughput(Throughput::Bytes(total_bytes as u64));

    group.bench_function("symbol_mix", |b| {
        b.iter(|| {
            for symbol in SYMBOLS {
                let _ = demangle(black_box(symbol));
            }
        })
    });

    group.bench_function("with_fallback", |b| {
        b.iter(|| {
            for symbol in SYMBOLS {
                let _ = demangle_or_original(black_box(symbol));
            }
        })
    });

    // Worst case the depth cap exists for: pathological nesting.
    let pathological = format!("f__F{}i", "Q2".repeat(300));
    group.bench_function("pathological_nesting", |b| {
        b.iter(|| {
            let _ = demangle(black_box(&pathological));
        })
    });

    group.finish();
}

criterion_group!(benches, bench_demangle);
criterion_main!(benches);
