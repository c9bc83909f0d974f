use crate::LatticeError;
use nalgebra::{RealField, Vector3};

/// Paths through the fcc Brillouin zone offered by the command line application
pub const PREDEFINED_PATHS: [&[&str]; 17] = [
    &["K", "W", "X", "G", "L", "W"],
    &["W", "G", "X", "W", "L", "G"],
    &["W", "L", "G", "X", "W", "K"],
    &["L", "G", "X", "K", "G"],
    &["L", "G", "X", "W", "K", "G"],
    &["L", "G", "X", "U", "K", "G"],
    &["L", "G", "X", "U", "G"],
    &["L", "K", "W", "G", "X", "W", "L", "G", "K"],
    &["G", "X", "K", "G", "L", "K", "W", "X"],
    &["G", "X", "W", "L", "G", "K", "W", "U"],
    &["G", "X", "W", "L", "G", "K"],
    &["G", "X", "W", "L", "G", "K", "X"],
    &["G", "X", "W", "L", "G", "X"],
    &["G", "X", "W", "G", "U", "X"],
    &["G", "X", "W", "K", "L", "G"],
    &["G", "X", "W", "K", "G", "L", "U", "W", "L", "K"],
    &["G", "X", "U", "K", "G", "L", "W", "X"],
];

/// Index into `PREDEFINED_PATHS` of the path used when none is requested
pub const DEFAULT_PATH: usize = 10;

/// Returns an owned copy of one of the `PREDEFINED_PATHS`
pub fn predefined_path(index: usize) -> Result<Vec<String>, LatticeError> {
    PREDEFINED_PATHS
        .get(index)
        .map(|path| path.iter().map(|label| label.to_string()).collect())
        .ok_or(LatticeError::PathIndex(index, PREDEFINED_PATHS.len()))
}

#[derive(Clone, Debug)]
pub struct SymmetryPoint<T: RealField> {
    pub label: &'static str,
    pub position: Vector3<T>,
}

/// A lookup table of labelled points in the Brillouin zone
#[derive(Clone, Debug)]
pub struct SymmetryPoints<T: RealField> {
    points: Vec<SymmetryPoint<T>>,
}

impl<T: RealField> SymmetryPoints<T> {
    pub fn from_points(points: Vec<SymmetryPoint<T>>) -> Self {
        Self { points }
    }

    pub fn get(&self, label: &str) -> Result<&SymmetryPoint<T>, LatticeError> {
        self.points
            .iter()
            .find(|point| point.label == label)
            .ok_or_else(|| LatticeError::UnknownSymmetryPoint(label.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &SymmetryPoint<T>> {
        self.points.iter()
    }
}
