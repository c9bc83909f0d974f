use nalgebra::Vector3;
use num_complex::Complex;
use std::f64::consts::PI;

/// The polar and azimuthal angles `(θ, φ)` of a vector, the zero vector maps to `(0, 0)`
pub(crate) fn angles(vector: &Vector3<f64>) -> (f64, f64) {
    let theta = vector.x.hypot(vector.y).atan2(vector.z);
    let phi = vector.y.atan2(vector.x);
    (theta, phi)
}

/// Spherical harmonic `Y_lm(θ, φ)` including the Condon-Shortley phase
pub(crate) fn spherical_harmonic(l: usize, m: i64, theta: f64, phi: f64) -> Complex<f64> {
    if m.unsigned_abs() as usize > l {
        return Complex::new(0., 0.);
    }
    if m < 0 {
        // Y_{l,-m} = (-1)^m Y_{lm}^*
        let sign = if m % 2 == 0 { 1. } else { -1. };
        return spherical_harmonic(l, -m, theta, phi).conj() * sign;
    }
    let legendre = normalised_associated_legendre(l, m as usize, theta.cos());
    Complex::from_polar(legendre, m as f64 * phi)
}

/// `sqrt((2l + 1) / 4π (l - m)! / (l + m)!) P_l^m(x)` for `0 <= m <= l`
fn normalised_associated_legendre(l: usize, m: usize, x: f64) -> f64 {
    let mut p_mm = 1.;
    if m > 0 {
        let sin_theta = ((1. - x) * (1. + x)).sqrt();
        let mut odd = 1.;
        for _ in 0..m {
            p_mm *= -odd * sin_theta;
            odd += 2.;
        }
    }

    let p_lm = if l == m {
        p_mm
    } else {
        let mut previous = p_mm;
        let mut current = x * (2 * m + 1) as f64 * p_mm;
        for ll in (m + 2)..=l {
            let next = (x * (2 * ll - 1) as f64 * current - (ll + m - 1) as f64 * previous)
                / (ll - m) as f64;
            previous = current;
            current = next;
        }
        current
    };

    // (l - m)! / (l + m)! as a product over the factors that do not cancel
    let factorial_ratio = ((l - m + 1)..=(l + m)).fold(1., |acc, k| acc / k as f64);
    ((2 * l + 1) as f64 / (4. * PI) * factorial_ratio).sqrt() * p_lm
}
