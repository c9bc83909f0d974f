/// Depth of the continued fraction, accurate to better than 1e-9 for `x >= 1`
const CONTINUED_FRACTION_DEPTH: usize = 30;

/// Upper incomplete gamma function `Γ(a, x)` for real `a` and `x > 0`
pub(crate) fn upper_incomplete_gamma(a: f64, x: f64) -> f64 {
    upper_incomplete_gamma_with_depth(a, x, CONTINUED_FRACTION_DEPTH)
}

/// Evaluates Legendre's continued fraction
///
/// `Γ(a, x) = e^{-x} x^a / (x + 1 - a + 1(a - 1) / (x + 3 - a + 2(a - 2) / (x + 5 - a + ...)))`
///
/// from the innermost level outwards, truncated after `depth` levels.
pub(crate) fn upper_incomplete_gamma_with_depth(a: f64, x: f64, depth: usize) -> f64 {
    let depth = depth.max(1);
    let innermost = (depth + 1) as f64;
    let mut tail = innermost * (a - innermost) / (2. * innermost + 1. + x - a);
    for k in (1..=depth).rev() {
        let k = k as f64;
        tail = k * (a - k) / (2. * k + 1. + x - a + tail);
    }
    (-x).exp() * x.powf(a) / (x - a + 1. + tail)
}
