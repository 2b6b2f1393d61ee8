use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use math_audio_gauss::{
    CofactorExpansion, DeterminantStrategy, LinearSystem, PivotProduct, PivotStrategy,
    SolverConfig, generate_dataset,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn system(n: usize) -> LinearSystem {
    let mut rng = StdRng::seed_from_u64(n as u64);
    generate_dataset(n, &mut rng)
        .expect("size in range")
        .to_system()
        .expect("finite system")
}

fn bench_determinant(c: &mut Criterion) {
    let mut group = c.benchmark_group("determinant");
    for n in [3, 5, 7] {
        let s = system(n);
        group.bench_with_input(BenchmarkId::new("pivot_product", n), &s, |b, s| {
            b.iter(|| PivotProduct::default().determinant(black_box(s.matrix())))
        });
        group.bench_with_input(BenchmarkId::new("cofactor", n), &s, |b, s| {
            b.iter(|| CofactorExpansion.determinant(black_box(s.matrix())))
        });
    }
    group.finish();
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve");
    for n in [5, 10, 20] {
        let s = system(n);
        for pivoting in [PivotStrategy::FirstNonZero, PivotStrategy::MaxMagnitude] {
            let config = SolverConfig::new().pivoting(pivoting);
            group.bench_with_input(BenchmarkId::new(pivoting.name(), n), &s, |b, s| {
                b.iter(|| black_box(s).solve_with(&config))
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_determinant, bench_solve);
criterion_main!(benches);
