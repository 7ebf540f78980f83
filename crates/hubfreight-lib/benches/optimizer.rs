use criterion::{criterion_group, criterion_main, Criterion};
use hubfreight_lib::{optimize, quote, Catalog, Order, PathGenerator};
use once_cell::sync::Lazy;
use std::hint::black_box;

static CATALOG: Lazy<Catalog> = Lazy::new(Catalog::reference);
static SINGLE_CENTER: Lazy<Order> = Lazy::new(|| Order::new().with_item("A", 1));
static ALL_CENTERS: Lazy<Order> = Lazy::new(|| {
    Order::new()
        .with_item("A", 2)
        .with_item("E", 1)
        .with_item("H", 4)
});

fn benchmark_optimizer(c: &mut Criterion) {
    let catalog = &*CATALOG;

    c.bench_function("generate_all_centers", |b| {
        let order = &*ALL_CENTERS;
        let generator = PathGenerator::new(catalog);
        b.iter(|| black_box(generator.generate_paths(order).len()));
    });

    c.bench_function("optimize_single_center", |b| {
        let order = &*SINGLE_CENTER;
        b.iter(|| {
            let result = optimize(catalog, order).expect("optimizes");
            black_box(result.minimum_cost)
        });
    });

    c.bench_function("optimize_all_centers", |b| {
        let order = &*ALL_CENTERS;
        b.iter(|| {
            let result = optimize(catalog, order).expect("optimizes");
            black_box(result.minimum_cost)
        });
    });

    c.bench_function("quote_all_centers", |b| {
        let order = &*ALL_CENTERS;
        b.iter(|| {
            let quote = quote(catalog, order).expect("quotes");
            black_box(quote.legs.len())
        });
    });
}

criterion_group!(benches, benchmark_optimizer);
criterion_main!(benches);
