use core::hint::black_box;
use criterion::{BatchSize, Criterion, Throughput, criterion_group, criterion_main};
use stowage::{
    DimensionSpec, GenerationPreview, GenerationScheme, LocationGenerator, MemoryLocationStore,
    RECOMMENDED_LIMIT, build_grid_view, compose,
};
use tokio::runtime::Builder;

fn cabinet(depth: i64) -> GenerationScheme {
    GenerationScheme::three_d_grid(
        "cab-",
        DimensionSpec::numbers(1, depth),
        DimensionSpec::letters('A', 'Z'),
        DimensionSpec::numbers(1, 40).zero_padded(),
    )
    .with_separators("-", ".")
}

fn bench_compose(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose");
    for depth in [1, 10, 50] {
        let scheme = cabinet(depth);
        let total = 26 * 40 * depth as u64;
        group.throughput(Throughput::Elements(total));
        group.bench_function(format!("elems/{total}"), |b| {
            b.iter(|| black_box(compose(black_box(&scheme))));
        });
    }
    group.finish();
}

fn bench_grid_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_view");
    for depth in [1, 10, 50] {
        let scheme = cabinet(depth);
        let names = compose(&scheme);
        group.throughput(Throughput::Elements(names.len() as u64));
        group.bench_function(format!("elems/{}", names.len()), |b| {
            b.iter(|| black_box(build_grid_view(black_box(&scheme), black_box(&names))));
        });
    }
    group.finish();
}

fn bench_preview(c: &mut Criterion) {
    let scheme = cabinet(10);
    let mut group = c.benchmark_group("preview");
    group.throughput(Throughput::Elements(10_400));
    group.bench_function("elems/10400", |b| {
        b.iter(|| black_box(GenerationPreview::build(&scheme, RECOMMENDED_LIMIT)));
    });
    group.finish();
}

fn bench_generate_memory(c: &mut Criterion) {
    let runtime = Builder::new_current_thread().build().unwrap();
    let scheme = cabinet(10);
    let mut group = c.benchmark_group("generate/memory");
    group.throughput(Throughput::Elements(10_400));
    group.bench_function("elems/10400", |b| {
        b.to_async(&runtime).iter_batched(
            || LocationGenerator::new(MemoryLocationStore::new()),
            |generator| {
                let scheme = &scheme;
                async move { black_box(generator.generate(scheme).await.unwrap()) }
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_compose,
    bench_grid_view,
    bench_preview,
    bench_generate_memory,
);
criterion_main!(benches);
