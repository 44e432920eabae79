use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use taguchi_robust::{ControlFactor, Experiment, NoiseFactor, OptimizationGoal};

fn experiment(array: &str, factors: usize, levels: usize, noise_levels: usize) -> Experiment {
    let level_values: Vec<f64> = (1..=levels).map(|l| l as f64).collect();
    let control = (0..factors)
        .map(|i| ControlFactor::new(format!("F{i}"), level_values.clone()))
        .collect();
    let noise = vec![
        NoiseFactor::new("N1", (0..noise_levels).map(|l| l as f64).collect::<Vec<_>>()),
        NoiseFactor::new("N2", [0.0, 1.0]),
    ];
    Experiment::with_standard_array(OptimizationGoal::SmallerTheBetter, control, array, noise)
        .unwrap()
}

fn with_results(mut exp: Experiment, replicates: usize) -> Experiment {
    let mut rng = StdRng::seed_from_u64(7);
    for trial in exp.generate_trials() {
        let obs: Vec<f64> = (0..replicates).map(|_| rng.gen_range(1.0..100.0)).collect();
        exp.add_result(&trial, obs);
    }
    exp
}

fn bench_generate_trials(c: &mut Criterion) {
    let mut group = c.benchmark_group("GenerateTrials");

    for (array, factors, levels) in [("L8", 7, 2), ("L16", 15, 2), ("L27", 13, 3)] {
        let exp = experiment(array, factors, levels, 5);
        group.bench_with_input(BenchmarkId::from_parameter(array), &exp, |b, exp| {
            b.iter(|| black_box(exp.generate_trials()));
        });
    }
    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("Analyze");

    for (array, factors, levels) in [("L8", 7, 2), ("L12", 11, 2), ("L27", 13, 3)] {
        let exp = with_results(experiment(array, factors, levels, 5), 3);
        group.bench_with_input(BenchmarkId::from_parameter(array), &exp, |b, exp| {
            b.iter(|| black_box(exp.analyze()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generate_trials, bench_analyze);
criterion_main!(benches);
