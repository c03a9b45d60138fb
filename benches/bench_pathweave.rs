#![allow(
    clippy::tests_outside_test_module,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    reason = "benchmark"
)]

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use pathweave::{EmitSettings, Features, PathweaveEngine, PathweaveInterface};

mod utils;

fn pathweave_benchmark(c: &mut Criterion) {
    // Generate 100 random production bodies
    let templates = utils::generate_random_templates(100, 6);
    let features = Features::from_iter(["on"]);

    // Print binary size information
    utils::print_binary_size();

    let mut group = c.benchmark_group("Production Generation");
    group.sample_size(50);

    // Normalization only
    group.bench_function("pathweave_build", |b| {
        b.iter(|| {
            for template in &templates {
                black_box(template.build(&features));
            }
        });
    });

    // Registration plus emission of the whole module
    group.bench_function("pathweave_generate_all", |b| {
        b.iter(|| {
            let mut engine =
                PathweaveEngine::with_config(features.clone(), EmitSettings::default());
            for (i, template) in templates.iter().enumerate() {
                engine
                    .add_production(format!("Production{}", i), template.clone())
                    .unwrap();
            }
            black_box(engine.generate_all());
        });
    });

    group.finish();
}

criterion_group!(benches, pathweave_benchmark);
criterion_main!(benches);
