//! Ewald summation of the KKR structure constants
//!
//! `D_LM(E, k) = D1 + D2 + δ_L0 D3` splits the slowly converging lattice sum into a reciprocal
//! space part `D1`, a real space part `D2` and, for the monopole, a self-interaction correction
//! `D3`. Both the reciprocal and real space sums carry the factor `κ^{-L}`.

use super::{i_power, kappa, StructuralMatrix};
use crate::constants::{EWALD_SERIES_TERMS, EWALD_SERIES_TOLERANCE};
use crate::coupling::CouplingCoefficients;
use crate::special::{angles, spherical_harmonic, upper_incomplete_gamma};
use nalgebra::Vector3;
use num_complex::Complex;
use std::f64::consts::PI;

impl<'a> StructuralMatrix<'a> {
    /// The structure constant `D_LM(E, k)` for a single pair `(L, M)`
    pub fn structure_constant(
        &self,
        energy: f64,
        wavevector: &Vector3<f64>,
        big_l: usize,
        big_m: i64,
        coefficients: &CouplingCoefficients,
    ) -> Complex<f64> {
        let kappa_power = kappa(energy).powi(-(big_l as i32));
        let mut value = self.reciprocal_space_sum(energy, wavevector, big_l, big_m) * kappa_power
            + self.real_space_sum(energy, wavevector, big_l, big_m, coefficients) * kappa_power;
        if big_l == 0 {
            value += self.monopole_correction(energy, coefficients);
        }
        value
    }

    /// `4π/V e^{2E/η} Σ_K |k+K|^L e^{-|k+K|²/η} / (2E - |k+K|²) Y_LM(k+K)`
    fn reciprocal_space_sum(
        &self,
        energy: f64,
        wavevector: &Vector3<f64>,
        big_l: usize,
        big_m: i64,
    ) -> Complex<f64> {
        let sum: Complex<f64> = self
            .basis
            .reciprocal_vectors()
            .iter()
            .map(|g| {
                let q = g + wavevector;
                let q_squared = q.norm_squared();
                let (theta, phi) = angles(&q);
                spherical_harmonic(big_l, big_m, theta, phi)
                    * (q_squared.sqrt().powi(big_l as i32) * (-q_squared / self.eta).exp()
                        / (2. * energy - q_squared))
            })
            .sum();
        sum * (4. * PI / self.basis.cell_volume() * (2. * energy / self.eta).exp())
    }

    /// `π^{-1/2} (-2)^{L+1} i^L Σ_R |R|^L e^{i k·R} Y_LM(R) I_L(|R|)`
    ///
    /// The real space vectors are sorted by length so the radial integral is only re-evaluated
    /// when a new shell is entered.
    fn real_space_sum(
        &self,
        energy: f64,
        wavevector: &Vector3<f64>,
        big_l: usize,
        big_m: i64,
        coefficients: &CouplingCoefficients,
    ) -> Complex<f64> {
        let mut sum = Complex::new(0., 0.);
        let mut integral = 0.;
        let mut shell = 0.;
        for r in self.basis.real_vectors() {
            let length_squared = r.norm_squared();
            if length_squared > shell + f64::EPSILON {
                integral = self.radial_integral(energy, big_l, length_squared, coefficients);
                shell = length_squared;
            }
            let (theta, phi) = angles(r);
            sum += spherical_harmonic(big_l, big_m, theta, phi)
                * Complex::from_polar(1., wavevector.dot(r))
                * (length_squared.sqrt().powi(big_l as i32) * integral);
        }
        sum * i_power(big_l as i64) * ((-2_f64).powi(big_l as i32 + 1) / PI.sqrt())
    }

    /// `I_L(R) = 1 / (2 R^{2L+1}) Σ_m (E R² / 2)^m / m! Γ(1/2 + L - m, R² η / 4)`
    fn radial_integral(
        &self,
        energy: f64,
        big_l: usize,
        length_squared: f64,
        coefficients: &CouplingCoefficients,
    ) -> f64 {
        let x = length_squared * self.eta / 4.;
        let z = energy * length_squared / 2.;
        let mut sum = 0.;
        for m in 0..EWALD_SERIES_TERMS {
            let term = z.powi(m as i32) / coefficients.factorial(m)
                * upper_incomplete_gamma(0.5 + big_l as f64 - m as f64, x);
            sum += term;
            if term.abs() < EWALD_SERIES_TOLERANCE {
                break;
            }
        }
        0.5 * sum / length_squared.sqrt().powi(2 * big_l as i32 + 1)
    }

    /// `-√η / 2π Σ_s (2E/η)^s / ((2s - 1) s!)`
    fn monopole_correction(&self, energy: f64, coefficients: &CouplingCoefficients) -> Complex<f64> {
        let z = 2. * energy / self.eta;
        let mut sum = 0.;
        for s in 0..EWALD_SERIES_TERMS {
            let term = z.powi(s as i32) / ((2. * s as f64 - 1.) * coefficients.factorial(s));
            sum += term;
            if term.abs() < EWALD_SERIES_TOLERANCE {
                break;
            }
        }
        Complex::new(-0.5 * self.eta.sqrt() / PI * sum, 0.)
    }
}

#[cfg(test)]
mod test {
    use super::super::StructuralMatrix;
    use crate::constants::COPPER_LATTICE_CONSTANT;
    use crate::coupling::CouplingCoefficients;
    use kkr_lattice::{Fcc, LatticeBasis, LatticeBasisBuilder};
    use nalgebra::Vector3;
    use std::f64::consts::PI;

    fn copper_basis() -> LatticeBasis<f64> {
        LatticeBasisBuilder::new()
            .with_lattice(Fcc)
            .with_lattice_constant(COPPER_LATTICE_CONSTANT)
            .build()
            .unwrap()
    }

    #[test]
    fn monopole_constant_of_an_isolated_reciprocal_vector() {
        let a = COPPER_LATTICE_CONSTANT;
        let volume = a.powi(3) / 4.;
        let basis = LatticeBasis::from_vectors(a, 2., volume, vec![Vector3::zeros()], vec![]);
        let coefficients = CouplingCoefficients::new(0);
        let lambda = StructuralMatrix::new(&basis, 0);
        let eta = lambda.eta();
        approx::assert_relative_eq!(eta, 4. * PI / volume.powf(2. / 3.));

        let energy = 0.2;
        let k = Vector3::new(0.3_f64, 0.1, 0.);
        let q2 = k.norm_squared();
        let y00 = 0.5 / PI.sqrt();
        let reciprocal = 4. * PI / volume * (2. * energy / eta).exp() * (-q2 / eta).exp()
            / (2. * energy - q2)
            * y00;
        let z = 2. * energy / eta;
        let correction = -0.5 * eta.sqrt() / PI
            * (0..16)
                .map(|s| z.powi(s) / ((2. * s as f64 - 1.) * coefficients.factorial(s as usize)))
                .sum::<f64>();

        let value = lambda.structure_constant(energy, &k, 0, 0, &coefficients);
        approx::assert_relative_eq!(value.re, reciprocal + correction, max_relative = 1e-12);
        approx::assert_relative_eq!(value.im, 0., epsilon = 1e-12);
    }

    #[test]
    fn structure_constants_are_independent_of_the_splitting_shell_order() {
        // Reversing the real space vectors within a basis must not change D, the shells are
        // re-sorted on construction
        let basis = copper_basis();
        let reversed = LatticeBasis::from_vectors(
            basis.lattice_constant(),
            basis.muffin_tin_radius(),
            basis.cell_volume(),
            basis.reciprocal_vectors().to_vec(),
            basis.real_vectors().iter().rev().cloned().collect(),
        );
        let coefficients = CouplingCoefficients::new(2);
        let k = Vector3::new(0.2, 0.1, 0.05) * basis.reciprocal_scale();
        let first = StructuralMatrix::new(&basis, 2);
        let second = StructuralMatrix::new(&reversed, 2);
        for (big_l, big_m) in [(0, 0), (1, 1), (2, 0), (3, 2), (4, 4)] {
            let a = first.structure_constant(0.4, &k, big_l, big_m, &coefficients);
            let b = second.structure_constant(0.4, &k, big_l, big_m, &coefficients);
            approx::assert_relative_eq!(a.re, b.re, max_relative = 1e-10, epsilon = 1e-12);
            approx::assert_relative_eq!(a.im, b.im, max_relative = 1e-10, epsilon = 1e-12);
        }
    }

    #[test]
    fn structure_constants_are_finite_in_the_band_window() {
        let basis = copper_basis();
        let coefficients = CouplingCoefficients::new(2);
        let lambda = StructuralMatrix::new(&basis, 2);
        let k = Vector3::new(0.5, 0.25, 0.) * basis.reciprocal_scale();
        for energy in [-0.04, 0.1, 0.45, 0.79] {
            for big_l in 0..=4 {
                for big_m in 0..=big_l as i64 {
                    let value = lambda.structure_constant(energy, &k, big_l, big_m, &coefficients);
                    assert!(value.re.is_finite() && value.im.is_finite());
                }
            }
        }
    }
}
