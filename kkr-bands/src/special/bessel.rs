use nalgebra::ComplexField;

/// Spherical Bessel function of the first kind `j_l(x)`
pub(crate) fn spherical_j<T: ComplexField + Copy>(l: usize, x: T) -> T {
    let (sin, cos) = x.sin_cos();
    let j0 = sin / x;
    let j1 = sin / (x * x) - cos / x;
    upward_recurrence(l, x, j0, j1)
}

/// Spherical Neumann function `n_l(x)`, or spherical Bessel function of the second kind
pub(crate) fn spherical_n<T: ComplexField + Copy>(l: usize, x: T) -> T {
    let (sin, cos) = x.sin_cos();
    let n0 = -cos / x;
    let n1 = -cos / (x * x) - sin / x;
    upward_recurrence(l, x, n0, n1)
}

/// Steps `f_{i} = (2i - 1) / x f_{i-1} - f_{i-2}` from `f_0` and `f_1` up to `f_l`
fn upward_recurrence<T: ComplexField + Copy>(l: usize, x: T, f0: T, f1: T) -> T {
    match l {
        0 => f0,
        1 => f1,
        _ => {
            let (mut previous, mut current) = (f0, f1);
            for i in 2..=l {
                let next = nalgebra::convert::<f64, T>((2 * i - 1) as f64) / x * current - previous;
                previous = current;
                current = next;
            }
            current
        }
    }
}

/// The values and first derivatives of `j_l` and `n_l` at a single argument
#[derive(Copy, Clone, Debug)]
pub(crate) struct BesselValues<T> {
    pub(crate) j: T,
    pub(crate) n: T,
    pub(crate) j_derivative: T,
    pub(crate) n_derivative: T,
}

impl<T: ComplexField + Copy> BesselValues<T> {
    /// Derivatives follow from `f_l'(x) = (l / x) f_l(x) - f_{l+1}(x)`
    pub(crate) fn at(l: usize, x: T) -> Self {
        let j = spherical_j(l, x);
        let n = spherical_n(l, x);
        let l_over_x = nalgebra::convert::<f64, T>(l as f64) / x;
        Self {
            j,
            n,
            j_derivative: l_over_x * j - spherical_j(l + 1, x),
            n_derivative: l_over_x * n - spherical_n(l + 1, x),
        }
    }
}
