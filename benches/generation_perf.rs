use criterion::{BatchSize, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use opphub::analysis;
use opphub::config::GeneratorConfig;
use opphub::filter::{OpportunityFilter, TemperatureBand};
use opphub::insights::pattern_insights;
use opphub::opportunity::{self, Opportunity};
use opphub::policy;
use opphub::team::sales_team;

fn config(opportunities: usize, policies: usize) -> GeneratorConfig {
    GeneratorConfig {
        opportunity_count: opportunities,
        policy_count: policies,
        ..GeneratorConfig::canonical()
    }
}

// ── Group 1: opportunity_book — row count scaling ────────────────────────────

fn bench_opportunity_book(c: &mut Criterion) {
    let mut group = c.benchmark_group("opportunity_book");
    for &count in &[100usize, 1_000, 5_000, 15_000] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &n| {
            let cfg = config(n, 0);
            b.iter(|| opportunity::generate(&cfg))
        });
    }
    group.finish();
}

// ── Group 2: policy_book ─────────────────────────────────────────────────────

fn bench_policy_book(c: &mut Criterion) {
    let mut group = c.benchmark_group("policy_book");
    for &count in &[500usize, 2_000, 10_000] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &n| {
            let cfg = config(0, n);
            b.iter(|| policy::generate(&cfg))
        });
    }
    group.finish();
}

// ── Group 3: filter_and_summarize — aggregation over a fixed book ────────────

fn bench_filter_and_summarize(c: &mut Criterion) {
    let book = opportunity::generate(&config(15_000, 0));

    let mut group = c.benchmark_group("filter_and_summarize");
    group.throughput(Throughput::Elements(book.len() as u64));

    group.bench_function("hot_high_value_filter", |b| {
        let filter = OpportunityFilter {
            temperature_bands: vec![TemperatureBand::Hot],
            min_value: Some(200_000),
            ..OpportunityFilter::default()
        };
        b.iter(|| filter.apply(&book))
    });

    group.bench_function("full_rollup", |b| {
        b.iter_batched(
            || book.iter().collect::<Vec<&Opportunity>>(),
            |view| {
                (
                    analysis::summarize(&view),
                    analysis::stage_funnel(&view),
                    analysis::rep_leaderboard(&view),
                    analysis::product_mix(&view),
                )
            },
            BatchSize::LargeInput,
        )
    });

    group.bench_function("pattern_insights", |b| {
        let team = sales_team();
        b.iter(|| pattern_insights(&book, &team))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_opportunity_book,
    bench_policy_book,
    bench_filter_and_summarize,
);
criterion_main!(benches);
