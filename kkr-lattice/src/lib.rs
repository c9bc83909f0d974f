//! Lattice geometry for the KKR band solver
//!
//! Generates the reciprocal and real space lattice vectors of the face centred cubic
//! Bravais lattice and samples piecewise linear paths through its Brillouin zone.

mod basis;
mod error;
mod generate;
mod path;
mod symmetry;

pub use basis::*;
pub use error::*;
pub use generate::*;
pub use path::*;
pub use symmetry::*;

use nalgebra::{RealField, Vector3};

/// A Bravais lattice described by dimensionless primitive vectors
///
/// Real space vectors are in units of the lattice constant `a`, reciprocal space vectors are
/// in units of `2π / a`.
pub trait BravaisLattice<T: RealField> {
    /// The primitive vectors of the direct lattice
    fn direct_primitives(&self) -> [Vector3<T>; 3];
    /// The primitive vectors of the reciprocal lattice
    fn reciprocal_primitives(&self) -> [Vector3<T>; 3];
    /// The volume of the primitive cell in units of `a^3`
    fn cell_volume_fraction(&self) -> T;
    /// The labelled high symmetry points of the first Brillouin zone, in units of `2π / a`
    fn symmetry_points(&self) -> SymmetryPoints<T>;
}

/// The face centred cubic lattice, whose reciprocal lattice is body centred cubic
#[derive(Copy, Clone, Debug, Default)]
pub struct Fcc;

impl<T: Copy + RealField> BravaisLattice<T> for Fcc {
    fn direct_primitives(&self) -> [Vector3<T>; 3] {
        let half: T = nalgebra::convert(0.5);
        [
            Vector3::new(T::zero(), half, half),
            Vector3::new(half, T::zero(), half),
            Vector3::new(half, half, T::zero()),
        ]
    }

    fn reciprocal_primitives(&self) -> [Vector3<T>; 3] {
        [
            Vector3::new(-T::one(), T::one(), T::one()),
            Vector3::new(T::one(), -T::one(), T::one()),
            Vector3::new(T::one(), T::one(), -T::one()),
        ]
    }

    fn cell_volume_fraction(&self) -> T {
        nalgebra::convert(0.25)
    }

    fn symmetry_points(&self) -> SymmetryPoints<T> {
        let point = |label, x: f64, y: f64, z: f64| SymmetryPoint {
            label,
            position: Vector3::new(
                nalgebra::convert(x),
                nalgebra::convert(y),
                nalgebra::convert(z),
            ),
        };
        SymmetryPoints::from_points(vec![
            point("L", 0.5, 0.5, 0.5),
            point("G", 0., 0., 0.),
            point("X", 1., 0., 0.),
            point("W", 1., 0.5, 0.),
            point("K", 0.75, 0.75, 0.),
            point("U", 1., 0.25, 0.25),
        ])
    }
}
