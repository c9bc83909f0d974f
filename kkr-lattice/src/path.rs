use crate::{LatticeError, SymmetryPoints};
use nalgebra::{RealField, Vector3};
use num_traits::ToPrimitive;

/// The position of a named symmetry point within a sampled path
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymmetryMarker {
    pub label: String,
    pub index: usize,
}

/// A polyline through the Brillouin zone sampled at near-uniform arc length
#[derive(Clone, Debug)]
pub struct KPath<T: RealField> {
    points: Vec<Vector3<T>>,
    markers: Vec<SymmetryMarker>,
}

impl<T: RealField> Default for KPath<T> {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            markers: Vec::new(),
        }
    }
}

impl<T: Copy + RealField> KPath<T> {
    pub fn points(&self) -> &[Vector3<T>] {
        &self.points
    }

    pub fn markers(&self) -> &[SymmetryMarker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Multiplies every sample by `factor`, used to move from units of `2π / a` to inverse bohr
    pub fn scaled(mut self, factor: T) -> Self {
        self.points.iter_mut().for_each(|point| *point *= factor);
        self
    }

    /// The cumulative arc length at each sample, starting from zero
    pub fn distances(&self) -> Vec<T> {
        let mut total = T::zero();
        let mut distances = Vec::with_capacity(self.points.len());
        for (idx, point) in self.points.iter().enumerate() {
            if idx > 0 {
                total += (point - self.points[idx - 1]).norm();
            }
            distances.push(total);
        }
        distances
    }
}

/// Samples a path through the labelled points `path` with close to `number_of_points` samples
///
/// Each leg receives a whole number of equal steps chosen to match the global step length
/// `total_length / (number_of_points - 1)`, and the final symmetry point closes the path. A
/// marker is recorded for each symmetry point: the first always sits at index zero and the last
/// at the final index. When `number_of_points` is too small to place at least one sample
/// between each pair of symmetry points an empty path is returned.
pub fn sample_path<T, S>(
    symmetry_points: &SymmetryPoints<T>,
    path: &[S],
    number_of_points: usize,
) -> Result<KPath<T>, LatticeError>
where
    T: Copy + RealField + ToPrimitive,
    S: AsRef<str>,
{
    let vertices = path
        .iter()
        .map(|label| symmetry_points.get(label.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;

    if vertices.len() < 2 || number_of_points <= 2 * vertices.len() + 1 {
        return Ok(KPath::default());
    }

    let total_length = vertices
        .windows(2)
        .fold(T::zero(), |acc, leg| acc + (leg[1].position - leg[0].position).norm());
    if total_length <= T::zero() {
        return Ok(KPath::default());
    }
    let step = total_length / nalgebra::convert((number_of_points - 1) as f64);

    let mut points = Vec::with_capacity(number_of_points);
    let mut markers = Vec::with_capacity(vertices.len());
    for leg in vertices.windows(2) {
        let start = leg[0].position;
        let difference = leg[1].position - start;
        markers.push(SymmetryMarker {
            label: leg[0].label.to_string(),
            index: points.len(),
        });
        let steps = (difference.norm() / step)
            .round()
            .to_usize()
            .unwrap_or(1)
            .max(1);
        let steps_as_t: T = nalgebra::convert(steps as f64);
        for j in 0..steps {
            let fraction = nalgebra::convert::<f64, T>(j as f64) / steps_as_t;
            points.push(start + difference * fraction);
        }
    }
    if let Some(last) = vertices.last() {
        markers.push(SymmetryMarker {
            label: last.label.to_string(),
            index: points.len(),
        });
        points.push(last.position);
    }

    Ok(KPath { points, markers })
}
