//! Bubble vs merge sort benchmarks.
//!
//! Run with:
//! ```bash
//! cargo bench --bench sorting
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use recipe_rs::catalog::{RecipeCatalog, SortField};
use recipe_rs::parser::parse;
use recipe_rs::recipe::Recipe;
use recipe_rs::sort::{SortAlgorithm, SortingAlgorithm};

// ============================================================================
// Helper: random recipes
// ============================================================================

fn random_recipes(n: usize, seed: u64) -> Vec<Recipe> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let ingredients = if rng.gen_bool(0.3) {
                vec!["chicken".to_string()]
            } else {
                vec!["tofu".to_string()]
            };
            Recipe::new(
                format!("Recipe {}", i),
                "main",
                rng.gen_range(1..=40) as f64 / 4.0,
                rng.gen_range(5..=90),
                ingredients,
                vec!["cook".to_string()],
            )
            .with_calories(rng.gen_range(100..=900))
        })
        .collect()
}

// ============================================================================
// Benchmark: both algorithms on the time key
// ============================================================================

fn bench_sort_by_time(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort/by_time");

    for n in [10, 50, 100, 500] {
        let recipes = random_recipes(n, 42);
        group.throughput(Throughput::Elements(n as u64));
        for algorithm in SortAlgorithm::ALL {
            group.bench_with_input(BenchmarkId::new(algorithm.name(), n), &recipes, |b, recipes| {
                b.iter(|| algorithm.sort_by_key(recipes, |r| r.time_minutes, false));
            });
        }
    }

    group.finish();
}

// ============================================================================
// Benchmark: catalog sort with a secondary expression
// ============================================================================

fn bench_catalog_secondary(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort/catalog_secondary");
    group.sample_size(20);

    let catalog = RecipeCatalog::from_recipes(random_recipes(200, 7));
    for algorithm in SortAlgorithm::ALL {
        group.bench_function(algorithm.name(), |b| {
            b.iter(|| catalog.sorted(algorithm, SortField::Price, Some("healthy and not contains_chicken"), false));
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: parsing
// ============================================================================

fn bench_parse(c: &mut Criterion) {
    let text = "(contains_chicken and quick) or (healthy and not cheap) or not (quick or healthy)";
    c.bench_function("parse/filter", |b| b.iter(|| parse(text)));
}

criterion_group!(benches, bench_sort_by_time, bench_catalog_secondary, bench_parse);
criterion_main!(benches);
