// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Structural matrix
//!
//! Assembly of the KKR secular matrix
//!
//! `Λ_{lm,l'm'}(E, k) = 4π i^{l-l'} Σ_L C(l, l', L, m, m') D_{L,m-m'}(E, k) + δ κ cot η_l`
//!
//! whose determinant vanishes on the band energies. The structure constants `D_LM` are Ewald
//! summed in `ewald`, the phase shift enters on the diagonal through the logarithmic derivative
//! of the radial solution at the muffin-tin radius.

mod ewald;

use crate::coupling::CouplingCoefficients;
use crate::special::BesselValues;
use kkr_lattice::LatticeBasis;
use nalgebra::{DMatrix, Vector3};
use ndarray::ArrayView1;
use num_complex::Complex;
use std::f64::consts::PI;

/// The wavenumber `κ = sqrt(2E)`, on the positive imaginary axis for negative energies
pub(crate) fn kappa(energy: f64) -> Complex<f64> {
    if energy >= 0. {
        Complex::new((2. * energy).sqrt(), 0.)
    } else {
        Complex::new(0., (-2. * energy).sqrt())
    }
}

/// `i^n` for any integer `n`
pub(crate) fn i_power(n: i64) -> Complex<f64> {
    match n.rem_euclid(4) {
        0 => Complex::new(1., 0.),
        1 => Complex::new(0., 1.),
        2 => Complex::new(-1., 0.),
        _ => Complex::new(0., -1.),
    }
}

/// Composite index of the pair `(l, m)` in `l`-major order
fn lm_index(l: usize, m: i64) -> usize {
    l * l + (l as i64 + m) as usize
}

/// The KKR secular matrix for a single muffin-tin site per cell
///
/// The engine owns its matrix and structure-constant buffers and is not shared between workers,
/// the lattice basis it reads is.
pub struct StructuralMatrix<'a> {
    basis: &'a LatticeBasis<f64>,
    l_max: usize,
    eta: f64,
    structure_constants: Vec<Complex<f64>>,
    matrix: DMatrix<Complex<f64>>,
}

impl<'a> StructuralMatrix<'a> {
    pub fn new(basis: &'a LatticeBasis<f64>, l_max: usize) -> Self {
        let dimension = (l_max + 1) * (l_max + 1);
        let structure_dimension = (2 * l_max + 1) * (2 * l_max + 1);
        Self {
            basis,
            l_max,
            // Balances the convergence of the real and reciprocal space sums
            eta: 4. * PI / basis.cell_volume().powf(2. / 3.),
            structure_constants: vec![Complex::new(0., 0.); structure_dimension],
            matrix: DMatrix::zeros(dimension, dimension),
        }
    }

    pub fn l_max(&self) -> usize {
        self.l_max
    }

    /// The Ewald splitting parameter `η`
    pub fn eta(&self) -> f64 {
        self.eta
    }

    /// The matrix assembled by the last call to `compute`
    pub fn matrix(&self) -> &DMatrix<Complex<f64>> {
        &self.matrix
    }

    /// Assembles `Λ(E, k)` from the logarithmic derivatives `ratios[l]` of the radial solutions
    pub fn compute(
        &mut self,
        energy: f64,
        wavevector: &Vector3<f64>,
        ratios: ArrayView1<f64>,
        coefficients: &CouplingCoefficients,
    ) {
        let kappa = kappa(energy);
        let radius = self.basis.muffin_tin_radius();
        let kappa_r = kappa * radius;

        self.fill_structure_constants(energy, wavevector, coefficients);

        let l_max = self.l_max as i64;
        let mut i = 0;
        for l in 0..=self.l_max {
            let bessel = BesselValues::at(l, kappa_r);
            let log_derivative = ratios[l] - 1. / radius;
            let cotangent = (kappa * bessel.n_derivative - bessel.n * log_derivative)
                / (kappa * bessel.j_derivative - bessel.j * log_derivative);

            let l_i64 = l as i64;
            for m in -l_i64..=l_i64 {
                let mut j = i;
                for l_prime in l_i64..=l_max {
                    let m_prime_start = if l_prime == l_i64 { m } else { -l_prime };
                    for m_prime in m_prime_start..=l_prime {
                        let mut element = Complex::new(0., 0.);
                        let lower = (l_i64 - l_prime).unsigned_abs() as usize;
                        let upper = (l_i64 + l_prime) as usize;
                        for big_l in (lower..=upper).step_by(2) {
                            let c = coefficients.coefficient(l, l_prime as usize, big_l, m, m_prime);
                            if c != 0. {
                                element += self.structure_constant_at(big_l, m - m_prime) * c;
                            }
                        }
                        element *= i_power(l_i64 - l_prime) * (4. * PI);

                        if i == j {
                            self.matrix[(i, i)] = element + kappa * cotangent;
                        } else {
                            self.matrix[(i, j)] = element;
                            self.matrix[(j, i)] = element.conj();
                        }
                        j += 1;
                    }
                }
                i += 1;
            }
        }
    }

    /// The determinant of the assembled matrix
    pub fn determinant(&self) -> Complex<f64> {
        self.matrix.determinant()
    }

    /// Flags samples too close to a singularity of the free Green's function, where
    /// `2E = |k + K|^2` to within `limit`, or to a zero of the phase-shift denominator
    /// `κ j_l'(κR) - j_l(κR) (u'/u - 1/R)`, to within `cotangent_limit`
    pub fn is_close_to_pole(
        &self,
        energy: f64,
        wavevector: &Vector3<f64>,
        limit: f64,
        ratios: ArrayView1<f64>,
        cotangent_limit: f64,
    ) -> bool {
        let free_pole = self
            .basis
            .reciprocal_vectors()
            .iter()
            .any(|g| (2. * energy - (g + wavevector).norm_squared()).abs() < limit);
        if free_pole {
            return true;
        }

        let kappa = kappa(energy);
        let radius = self.basis.muffin_tin_radius();
        ratios
            .iter()
            .take(self.l_max + 1)
            .enumerate()
            .any(|(l, ratio)| {
                let bessel = BesselValues::at(l, kappa * radius);
                let check = kappa * bessel.j_derivative - bessel.j * (ratio - 1. / radius);
                check.norm() < cotangent_limit
            })
    }

    fn structure_constant_at(&self, big_l: usize, big_m: i64) -> Complex<f64> {
        if big_m.unsigned_abs() as usize > big_l {
            return Complex::new(0., 0.);
        }
        self.structure_constants[lm_index(big_l, big_m)]
    }

    /// Evaluates `D_LM` for `M >= 0` and mirrors `D_{L,-M} = (-1)^M D_LM^*`
    fn fill_structure_constants(
        &mut self,
        energy: f64,
        wavevector: &Vector3<f64>,
        coefficients: &CouplingCoefficients,
    ) {
        for big_l in 0..=2 * self.l_max {
            let big_l_i64 = big_l as i64;
            for big_m in 0..=big_l_i64 {
                let value = self.structure_constant(energy, wavevector, big_l, big_m, coefficients);
                self.structure_constants[lm_index(big_l, big_m)] = value;
            }
            for big_m in 1..=big_l_i64 {
                let sign = if big_m % 2 == 0 { 1. } else { -1. };
                let mirrored = self.structure_constants[lm_index(big_l, big_m)].conj() * sign;
                self.structure_constants[lm_index(big_l, -big_m)] = mirrored;
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::{i_power, kappa, lm_index, StructuralMatrix};
    use crate::coupling::CouplingCoefficients;
    use crate::utilities::{has_hermitian_off_diagonal, is_hermitian};
    use kkr_lattice::{Fcc, LatticeBasis, LatticeBasisBuilder};
    use nalgebra::Vector3;
    use ndarray::array;

    fn copper_basis() -> LatticeBasis<f64> {
        LatticeBasisBuilder::new()
            .with_lattice(Fcc)
            .with_lattice_constant(crate::constants::COPPER_LATTICE_CONSTANT)
            .build()
            .unwrap()
    }

    #[test]
    fn composite_indices_are_contiguous() {
        let mut expected = 0;
        for l in 0..=4_usize {
            for m in -(l as i64)..=l as i64 {
                assert_eq!(lm_index(l, m), expected);
                expected += 1;
            }
        }
    }

    #[test]
    fn powers_of_i_cycle() {
        assert_eq!(i_power(0), i_power(4));
        assert_eq!(i_power(-1), i_power(3));
        assert_eq!(i_power(2).re, -1.);
    }

    #[test]
    fn kappa_is_imaginary_below_zero() {
        approx::assert_relative_eq!(kappa(0.5).re, 1.);
        approx::assert_relative_eq!(kappa(-0.5).im, 1.);
        assert_eq!(kappa(-0.5).re, 0.);
    }

    #[test]
    fn secular_matrix_is_hermitian_off_the_diagonal() {
        let basis = copper_basis();
        let coefficients = CouplingCoefficients::new(2);
        let mut lambda = StructuralMatrix::new(&basis, 2);
        let ratios = array![0.4, 1.1, 1.9];
        let scale = basis.reciprocal_scale();
        for (energy, k) in [
            (0.35, Vector3::new(0.3, 0.1, 0.0) * scale),
            (0.62, Vector3::new(0.5, 0.5, 0.5) * scale),
            (-0.02, Vector3::new(1.0, 0.25, 0.25) * scale),
        ] {
            lambda.compute(energy, &k, ratios.view(), &coefficients);
            assert_eq!(lambda.matrix().nrows(), 9);
            assert!(has_hermitian_off_diagonal(lambda.matrix()));
        }
    }

    #[test]
    fn secular_matrix_is_hermitian_above_zero_energy() {
        // With real κ and an inversion symmetric lattice the diagonal is real
        let basis = copper_basis();
        let coefficients = CouplingCoefficients::new(2);
        let mut lambda = StructuralMatrix::new(&basis, 2);
        let ratios = array![0.4, 1.1, 1.9];
        let k = Vector3::new(0.3, 0.1, 0.0) * basis.reciprocal_scale();
        lambda.compute(0.45, &k, ratios.view(), &coefficients);
        assert!(is_hermitian(lambda.matrix(), 1e-9));
    }

    #[test]
    fn determinant_of_a_single_channel_is_its_only_element() {
        let basis = copper_basis();
        let coefficients = CouplingCoefficients::new(0);
        let mut lambda = StructuralMatrix::new(&basis, 0);
        let ratios = array![0.7];
        let k = Vector3::new(0.1, 0.2, 0.3);
        lambda.compute(0.3, &k, ratios.view(), &coefficients);
        assert_eq!(lambda.determinant(), lambda.matrix()[(0, 0)]);
    }

    #[test]
    fn free_electron_poles_are_detected() {
        let basis = copper_basis();
        let lambda = StructuralMatrix::new(&basis, 2);
        let ratios = array![0.4, 1.1, 1.9];
        let k = Vector3::new(0.4, 0., 0.);
        // 2E = |k|^2 for the K = 0 vector
        let energy = 0.5 * k.norm_squared();
        assert!(lambda.is_close_to_pole(energy, &k, 2e-3, ratios.view(), 1e-4));
    }

    #[test]
    fn vanishing_phase_shift_denominator_is_detected() {
        let basis = copper_basis();
        let lambda = StructuralMatrix::new(&basis, 0);
        let energy = 0.3;
        let k = Vector3::new(0.05, 0.02, 0.01);
        let kappa = kappa(energy).re;
        let x = kappa * basis.muffin_tin_radius();
        // Choose the s-wave ratio that zeroes κ j_0' - j_0 (u'/u - 1/R)
        let j = x.sin() / x;
        let j_derivative = -(x.sin() / (x * x) - x.cos() / x);
        let ratio = kappa * j_derivative / j + 1. / basis.muffin_tin_radius();
        let ratios = array![ratio];
        assert!(lambda.is_close_to_pole(energy, &k, 1e-8, ratios.view(), 1e-4));
        let ratios = array![ratio + 0.5];
        assert!(!lambda.is_close_to_pole(energy, &k, 1e-8, ratios.view(), 1e-4));
    }
}
