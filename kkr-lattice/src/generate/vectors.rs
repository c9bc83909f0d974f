use crate::BravaisLattice;
use nalgebra::{RealField, Vector3};
use std::cmp::Ordering;

/// Added to every squared cutoff so lattice points lying on the cutoff sphere are retained
const CUTOFF_TOLERANCE: f64 = 1e-3;

/// Enumerates the reciprocal lattice vectors `G` with `|G|^2 <= max_size^2`
///
/// The vectors are dimensionless (units of `2π / a`) and the origin is included.
pub fn generate_reciprocal_vectors<T, L>(lattice: &L, max_size: usize) -> Vec<Vector3<T>>
where
    T: Copy + RealField,
    L: BravaisLattice<T>,
{
    let primitives = lattice.reciprocal_primitives();
    lattice_points_within_sphere(&primitives, max_size as i64, max_size, true)
}

/// Enumerates the non-zero direct lattice vectors `R` with `|R|^2 <= real_size^2`
///
/// The vectors are dimensionless (units of `a`) and are returned sorted by ascending length.
pub fn generate_real_vectors<T, L>(lattice: &L, real_size: usize) -> Vec<Vector3<T>>
where
    T: Copy + RealField,
    L: BravaisLattice<T>,
{
    let primitives = lattice.direct_primitives();
    let mut vectors =
        lattice_points_within_sphere(&primitives, 2 * real_size as i64, real_size, false);
    sort_by_length(&mut vectors);
    vectors
}

/// Stable sort of a set of vectors by their length
pub fn sort_by_length<T: Copy + RealField>(vectors: &mut [Vector3<T>]) {
    vectors.sort_by(|a, b| {
        a.norm_squared()
            .partial_cmp(&b.norm_squared())
            .unwrap_or(Ordering::Equal)
    });
}

fn lattice_points_within_sphere<T: Copy + RealField>(
    primitives: &[Vector3<T>; 3],
    extent: i64,
    cutoff: usize,
    include_origin: bool,
) -> Vec<Vector3<T>> {
    let cutoff_squared: T = nalgebra::convert((cutoff * cutoff) as f64 + CUTOFF_TOLERANCE);
    let mut vectors = Vec::new();
    for i in -extent..=extent {
        for j in -extent..=extent {
            for k in -extent..=extent {
                if !include_origin && i == 0 && j == 0 && k == 0 {
                    continue;
                }
                let vector = primitives[0] * nalgebra::convert::<f64, T>(i as f64)
                    + primitives[1] * nalgebra::convert::<f64, T>(j as f64)
                    + primitives[2] * nalgebra::convert::<f64, T>(k as f64);
                if vector.norm_squared() <= cutoff_squared {
                    vectors.push(vector);
                }
            }
        }
    }
    vectors
}
