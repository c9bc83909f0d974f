/// Errors raised while assembling a lattice basis or a path through the Brillouin zone
#[derive(thiserror::Error, Debug)]
pub enum LatticeError {
    #[error("unknown symmetry point `{0}`")]
    UnknownSymmetryPoint(String),
    #[error("lattice constant must be positive, got {0}")]
    LatticeConstant(f64),
    #[error("no predefined path with index {0}, there are {1}")]
    PathIndex(usize, usize),
}
