use crate::{generate_real_vectors, generate_reciprocal_vectors, BravaisLattice, LatticeError};
use nalgebra::{RealField, Vector3};

/// The lattice vectors entering the KKR lattice sums for a monatomic crystal
///
/// Reciprocal vectors are scaled to inverse bohr and real vectors to bohr. The real vectors are
/// sorted by length, which lets radial lattice sums reuse work within a shell.
#[derive(Clone, Debug)]
pub struct LatticeBasis<T: RealField> {
    lattice_constant: T,
    muffin_tin_radius: T,
    cell_volume: T,
    reciprocal_vectors: Vec<Vector3<T>>,
    real_vectors: Vec<Vector3<T>>,
}

impl<T: Copy + RealField> LatticeBasis<T> {
    /// Assemble a basis from explicit vector sets
    ///
    /// The real space vectors are sorted by length before storage.
    pub fn from_vectors(
        lattice_constant: T,
        muffin_tin_radius: T,
        cell_volume: T,
        reciprocal_vectors: Vec<Vector3<T>>,
        mut real_vectors: Vec<Vector3<T>>,
    ) -> Self {
        crate::sort_by_length(&mut real_vectors);
        Self {
            lattice_constant,
            muffin_tin_radius,
            cell_volume,
            reciprocal_vectors,
            real_vectors,
        }
    }

    pub fn lattice_constant(&self) -> T {
        self.lattice_constant
    }

    pub fn muffin_tin_radius(&self) -> T {
        self.muffin_tin_radius
    }

    pub fn cell_volume(&self) -> T {
        self.cell_volume
    }

    pub fn reciprocal_vectors(&self) -> &[Vector3<T>] {
        &self.reciprocal_vectors
    }

    pub fn real_vectors(&self) -> &[Vector3<T>] {
        &self.real_vectors
    }

    /// The factor `2π / a` converting dimensionless reciprocal coordinates to inverse bohr
    pub fn reciprocal_scale(&self) -> T {
        T::two_pi() / self.lattice_constant
    }
}

/// Builder for a `LatticeBasis`, the lattice and the lattice constant must be provided
pub struct LatticeBasisBuilder<T, Lattice, LatticeConstant> {
    lattice: Lattice,
    lattice_constant: LatticeConstant,
    muffin_tin_radius: Option<T>,
    reciprocal_cutoff: usize,
    real_cutoff: usize,
}

impl<T> Default for LatticeBasisBuilder<T, (), ()> {
    fn default() -> Self {
        Self {
            lattice: (),
            lattice_constant: (),
            muffin_tin_radius: None,
            reciprocal_cutoff: 3,
            real_cutoff: 1,
        }
    }
}

impl<T> LatticeBasisBuilder<T, (), ()> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T, Lattice, LatticeConstant> LatticeBasisBuilder<T, Lattice, LatticeConstant> {
    pub fn with_lattice<L>(self, lattice: L) -> LatticeBasisBuilder<T, L, LatticeConstant> {
        LatticeBasisBuilder {
            lattice,
            lattice_constant: self.lattice_constant,
            muffin_tin_radius: self.muffin_tin_radius,
            reciprocal_cutoff: self.reciprocal_cutoff,
            real_cutoff: self.real_cutoff,
        }
    }

    pub fn with_lattice_constant(self, lattice_constant: T) -> LatticeBasisBuilder<T, Lattice, T> {
        LatticeBasisBuilder {
            lattice: self.lattice,
            lattice_constant,
            muffin_tin_radius: self.muffin_tin_radius,
            reciprocal_cutoff: self.reciprocal_cutoff,
            real_cutoff: self.real_cutoff,
        }
    }

    /// A radius of `None`, or any non-positive value, gives touching spheres
    pub fn with_muffin_tin_radius(self, muffin_tin_radius: Option<T>) -> Self {
        Self {
            muffin_tin_radius,
            ..self
        }
    }

    /// Cutoffs in units of `2π / a` for reciprocal space and `a` for real space
    pub fn with_cutoffs(self, reciprocal_cutoff: usize, real_cutoff: usize) -> Self {
        Self {
            reciprocal_cutoff,
            real_cutoff,
            ..self
        }
    }
}

impl<T, Lattice> LatticeBasisBuilder<T, Lattice, T>
where
    T: Copy + RealField,
    Lattice: BravaisLattice<T>,
{
    pub fn build(self) -> Result<LatticeBasis<T>, LatticeError> {
        let a = self.lattice_constant;
        if a <= T::zero() {
            return Err(LatticeError::LatticeConstant(
                a.to_subset().unwrap_or(f64::NAN),
            ));
        }

        let muffin_tin_radius = match self.muffin_tin_radius {
            Some(radius) if radius > T::zero() => radius,
            // Touching spheres on the fcc nearest neighbour distance a / sqrt(2)
            _ => nalgebra::convert::<f64, T>(2_f64.sqrt() / 4.) * a,
        };

        let reciprocal_scale = T::two_pi() / a;
        let reciprocal_vectors =
            generate_reciprocal_vectors(&self.lattice, self.reciprocal_cutoff)
                .into_iter()
                .map(|vector| vector * reciprocal_scale)
                .collect();
        let real_vectors = generate_real_vectors(&self.lattice, self.real_cutoff)
            .into_iter()
            .map(|vector| vector * a)
            .collect();

        Ok(LatticeBasis {
            lattice_constant: a,
            muffin_tin_radius,
            cell_volume: self.lattice.cell_volume_fraction() * a * a * a,
            reciprocal_vectors,
            real_vectors,
        })
    }
}
