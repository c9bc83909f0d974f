use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kkr_bands::coupling::CouplingCoefficients;
use kkr_bands::numerov::{Numerov, RadialGrid, RadialGridKind};
use kkr_bands::potential::Potential;
use kkr_bands::structural::StructuralMatrix;
use kkr_bands::ModelPotential;
use ndarray::Array1;
use utilities::{copper_basis, random_wavevectors};

pub fn bench_secular_determinant(c: &mut Criterion) {
    let basis = copper_basis(3, 1);
    let wavevectors = random_wavevectors(16, basis.reciprocal_scale());

    let mut group = c.benchmark_group("secular_determinant");
    for l_max in [0, 1, 2, 3].into_iter() {
        let coefficients = CouplingCoefficients::new(l_max);
        let mut lambda = StructuralMatrix::new(&basis, l_max);
        let ratios = Array1::from_elem(l_max + 1, 0.5);
        group.bench_with_input(BenchmarkId::from_parameter(l_max), &l_max, |b, _| {
            b.iter(|| {
                for wavevector in wavevectors.iter() {
                    lambda.compute(
                        black_box(0.35),
                        black_box(wavevector),
                        ratios.view(),
                        &coefficients,
                    );
                    black_box(lambda.determinant());
                }
            })
        });
    }
    group.finish();
}

pub fn bench_log_derivative(c: &mut Criterion) {
    let basis = copper_basis(3, 1);
    let mut group = c.benchmark_group("log_derivative");
    for kind in [RadialGridKind::Uniform, RadialGridKind::Exponential].into_iter() {
        let grid = RadialGrid::new(kind, basis.muffin_tin_radius(), 2000, 0.005);
        let potential = Potential::sample(&grid, &ModelPotential::Copper);
        let numerov = Numerov::new(&potential, grid);
        group.bench_with_input(
            BenchmarkId::new(format!("{:?}", kind), 2000),
            &kind,
            |b, _| b.iter(|| numerov.log_derivative(black_box(2), black_box(0.35))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_secular_determinant, bench_log_derivative);
criterion_main!(benches);
