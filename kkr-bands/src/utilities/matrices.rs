use nalgebra::DMatrix;
use num_complex::Complex;

/// Tests for hermiticity of a matrix, elementwise to within a tolerance relative to the larger
/// of the two elements compared
pub(crate) fn is_hermitian(matrix: &DMatrix<Complex<f64>>, tolerance: f64) -> bool {
    matrix.is_square()
        && (0..matrix.nrows()).all(|i| {
            (i..matrix.ncols()).all(|j| {
                let element = matrix[(i, j)];
                let adjoint_element = matrix[(j, i)].conj();
                let scale = element.norm().max(adjoint_element.norm()).max(1.);
                approx::relative_eq!(
                    (element - adjoint_element).norm() / scale,
                    0.,
                    epsilon = tolerance
                )
            })
        })
}

/// Tests the strictly upper and lower triangles are conjugate transposes of one another
pub(crate) fn has_hermitian_off_diagonal(matrix: &DMatrix<Complex<f64>>) -> bool {
    matrix.is_square()
        && (0..matrix.nrows())
            .all(|i| (i + 1..matrix.ncols()).all(|j| matrix[(i, j)] == matrix[(j, i)].conj()))
}

#[cfg(test)]
mod test {
    use super::{has_hermitian_off_diagonal, is_hermitian};
    use nalgebra::DMatrix;
    use num_complex::Complex;

    #[test]
    fn real_non_hermitian_matrix_returns_false() {
        let matrix = DMatrix::from_row_slice(3, 3, &[1., 2., 3., 4., 5., 6., 7., 8., 9.])
            .map(Complex::from);
        assert!(!is_hermitian(&matrix, 1e-12));
        assert!(!has_hermitian_off_diagonal(&matrix));
    }

    #[test]
    fn complex_hermitian_matrix_returns_true() {
        let matrix = DMatrix::from_row_slice(
            3,
            3,
            &[
                Complex::new(1., 0.),
                Complex::new(1., 1.),
                Complex::new(0., 2.),
                Complex::new(1., -1.),
                Complex::new(5., 0.),
                Complex::new(-3., 0.),
                Complex::new(0., -2.),
                Complex::new(-3., 0.),
                Complex::new(0., 0.),
            ],
        );
        assert!(is_hermitian(&matrix, 1e-12));
        assert!(has_hermitian_off_diagonal(&matrix));
    }

    #[test]
    fn complex_diagonal_only_breaks_full_hermiticity() {
        let matrix = DMatrix::from_row_slice(
            2,
            2,
            &[
                Complex::new(1., 0.5),
                Complex::new(2., 1.),
                Complex::new(2., -1.),
                Complex::new(0., 0.),
            ],
        );
        assert!(!is_hermitian(&matrix, 1e-12));
        assert!(has_hermitian_off_diagonal(&matrix));
    }

    #[test]
    fn non_square_matrix_is_not_hermitian() {
        let matrix = DMatrix::<Complex<f64>>::zeros(2, 3);
        assert!(!is_hermitian(&matrix, 1e-12));
    }
}
