//! Fixtures shared by the integration tests and benches of `kkr-bands`

use kkr_bands::constants::COPPER_LATTICE_CONSTANT;
use kkr_bands::Options;
use kkr_lattice::{Fcc, LatticeBasis, LatticeBasisBuilder};
use nalgebra::Vector3;
use rand::{thread_rng, Rng};

/// The copper lattice with touching spheres and the given cutoffs
pub fn copper_basis(reciprocal_cutoff: usize, real_cutoff: usize) -> LatticeBasis<f64> {
    LatticeBasisBuilder::new()
        .with_lattice(Fcc)
        .with_lattice_constant(COPPER_LATTICE_CONSTANT)
        .with_cutoffs(reciprocal_cutoff, real_cutoff)
        .build()
        .expect("the copper lattice is valid")
}

/// A basis holding only the zero reciprocal vector and no real space vectors, on which the
/// secular determinant for `l_max = 0` has a closed form
pub fn isolated_site_basis(muffin_tin_radius: f64) -> LatticeBasis<f64> {
    let a = COPPER_LATTICE_CONSTANT;
    LatticeBasis::from_vectors(a, muffin_tin_radius, a.powi(3) / 4., vec![Vector3::zeros()], vec![])
}

/// Wavevectors drawn uniformly from the cube `[-scale, scale]^3`
pub fn random_wavevectors(number: usize, scale: f64) -> Vec<Vector3<f64>> {
    let mut rng = thread_rng();
    (0..number)
        .map(|_| {
            Vector3::new(
                rng.gen_range(-scale..scale),
                rng.gen_range(-scale..scale),
                rng.gen_range(-scale..scale),
            )
        })
        .collect()
}

/// Options for a short, coarse copper calculation along `Γ-X`
pub fn short_copper_options(threads: usize) -> Options {
    Options {
        path: vec!["G".into(), "X".into()],
        number_of_points: 8,
        energy_step: 2e-3,
        threads,
        ..Options::default()
    }
}

/// The s-wave logarithmic derivative `u'/u` at `radius` for a flat well of depth `depth`,
/// where `u = r j_0(q r)` with `q = sqrt(2 (E + depth))`
pub fn flat_well_s_wave_ratio(energy: f64, depth: f64, radius: f64) -> f64 {
    let q = (2. * (energy + depth)).sqrt();
    let x = q * radius;
    // d/dr ln(sin(qr)) = q cot(qr)
    q * x.cos() / x.sin()
}
