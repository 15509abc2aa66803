use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use tsmpos_core::{Money, ProductId};
use tsmpos_products::Product;
use tsmpos_sales::CartLedger;

fn catalog(size: usize) -> Vec<Product> {
    (0..size)
        .map(|i| Product {
            id: ProductId::new(format!("p{i}")),
            name: format!("Product {i}"),
            price: format!("{}.{:02}", i % 50, i % 100).parse::<Money>().unwrap(),
            stock: 1_000,
        })
        .collect()
}

fn bench_add_to_cart(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_to_cart");

    for size in [10usize, 100, 500] {
        let products = catalog(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &products, |b, products| {
            b.iter(|| {
                let mut ledger = CartLedger::new();
                for product in products {
                    ledger = ledger.add_to_cart(black_box(product)).unwrap();
                }
                ledger
            });
        });
    }

    group.finish();
}

fn bench_total(c: &mut Criterion) {
    let mut ledger = CartLedger::new();
    for product in catalog(500) {
        ledger = ledger.add_to_cart(&product).unwrap();
    }

    c.bench_function("total_500_lines", |b| b.iter(|| black_box(&ledger).total()));
}

criterion_group!(benches, bench_add_to_cart, bench_total);
criterion_main!(benches);
