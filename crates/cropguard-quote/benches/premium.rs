//! Calculation benchmarks
//!
//! A premium calculation should stay far below a millisecond.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use cropguard_common::EligibilityChecklist;
use cropguard_quote::{compute_order_total, evaluate_eligibility, PremiumCalculator};
use rust_decimal::Decimal;

fn bench_premium(c: &mut Criterion) {
    let mut group = c.benchmark_group("premium");
    let calculator = PremiumCalculator::default();

    for tier in ["Basic Protection", "Standard Protection", "Comprehensive Protection"] {
        group.bench_with_input(BenchmarkId::new("compute", tier), tier, |b, tier| {
            let area = Decimal::new(25, 1);
            b.iter(|| {
                calculator
                    .compute_premium(black_box("Groundnut"), black_box(tier), black_box(area))
                    .map(|result| result.rounded())
            });
        });
    }

    group.finish();
}

fn bench_checkout(c: &mut Criterion) {
    let mut group = c.benchmark_group("checkout");

    group.bench_function("order_total", |b| {
        let amount = Decimal::new(1875, 0);
        b.iter(|| compute_order_total(black_box(amount)))
    });

    group.bench_function("eligibility", |b| {
        let checklist = EligibilityChecklist::all_checked();
        b.iter(|| evaluate_eligibility(black_box(&checklist)))
    });

    group.finish();
}

criterion_group!(benches, bench_premium, bench_checkout);
criterion_main!(benches);
