use crate::constants::{FAR_BOUNDARY_UNDERFLOW, UNIFORM_GRID_DECAY_LENGTHS};
use crate::potential::Potential;
use serde::Deserialize;

/// The discretisation of the radial coordinate seen by the Numerov integrator
///
/// Implementors map a node index to a physical radius and supply the transformed coefficient
/// function of `u'' = f u`, so the Numerov recurrence can always run in index space.
pub trait GridStrategy {
    /// The number of intervals between the origin and the outer radius
    fn number_of_intervals(&self) -> usize;
    /// The physical radius of node `index`
    fn radius(&self, index: usize) -> f64;
    /// The step of the recurrence variable
    fn step(&self) -> f64;
    /// The potential plus centrifugal barrier at node `index`
    fn effective_potential(&self, potential: &Potential, l: usize, index: usize) -> f64 {
        let radius = self.radius(index);
        potential.at(index) + (l * (l + 1)) as f64 / (2. * radius * radius)
    }
    /// The Numerov coefficient `f` at node `index`
    fn step_function(&self, potential: &Potential, l: usize, energy: f64, index: usize) -> f64;
    /// The regular solution `r^{l+1}` at the first node off the origin, in recurrence variables
    fn boundary_near(&self, l: usize) -> f64;
    /// The decaying solution `exp(-sqrt(2|E|) r)` at node `index`, in recurrence variables
    fn boundary_far(&self, index: usize, energy: f64) -> f64;
    /// The last node worth integrating to at this energy, never beyond the grid
    fn max_radius_index(&self, energy: f64) -> usize;
    /// The radial distance between node `index` and its predecessor
    fn derivative_step(&self, index: usize) -> f64;
    /// Converts a recurrence variable at node `index` back to the radial wavefunction `u`
    fn wavefunction_value(&self, index: usize, value: f64) -> f64;
    fn is_uniform(&self) -> bool;
}

/// A grid with constant spacing `h = R / N`
#[derive(Copy, Clone, Debug)]
pub struct UniformGrid {
    spacing: f64,
    intervals: usize,
}

impl UniformGrid {
    pub fn new(outer_radius: f64, intervals: usize) -> Self {
        Self {
            spacing: outer_radius / intervals as f64,
            intervals,
        }
    }
}

impl GridStrategy for UniformGrid {
    fn number_of_intervals(&self) -> usize {
        self.intervals
    }

    fn radius(&self, index: usize) -> f64 {
        index as f64 * self.spacing
    }

    fn step(&self) -> f64 {
        self.spacing
    }

    fn step_function(&self, potential: &Potential, l: usize, energy: f64, index: usize) -> f64 {
        2. * (self.effective_potential(potential, l, index) - energy)
    }

    fn boundary_near(&self, l: usize) -> f64 {
        self.spacing.powi(l as i32 + 1)
    }

    fn boundary_far(&self, index: usize, energy: f64) -> f64 {
        (-self.radius(index) * (2. * energy.abs()).sqrt()).exp()
    }

    fn max_radius_index(&self, energy: f64) -> usize {
        let decay_radius = UNIFORM_GRID_DECAY_LENGTHS / (2. * energy.abs()).sqrt();
        let index = (decay_radius / self.spacing).floor();
        if index.is_finite() && index < self.intervals as f64 {
            index as usize
        } else {
            self.intervals
        }
    }

    fn derivative_step(&self, _index: usize) -> f64 {
        self.spacing
    }

    fn wavefunction_value(&self, _index: usize, value: f64) -> f64 {
        value
    }

    fn is_uniform(&self) -> bool {
        true
    }
}

/// A grid dense near the nucleus, `r(i) = Rp (e^{iδ} - 1)` with `r(N) = R`
///
/// Under the substitution `u = e^{iδ/2} v` the radial equation in the index variable keeps the
/// form `v'' = f v` with unit step, absorbing the Jacobian and a constant `δ^2 / 4` into `f`.
#[derive(Copy, Clone, Debug)]
pub struct ExponentialGrid {
    scale: f64,
    delta: f64,
    intervals: usize,
}

impl ExponentialGrid {
    pub fn new(outer_radius: f64, intervals: usize, delta: f64) -> Self {
        Self {
            scale: outer_radius / ((intervals as f64 * delta).exp() - 1.),
            delta,
            intervals,
        }
    }
}

impl GridStrategy for ExponentialGrid {
    fn number_of_intervals(&self) -> usize {
        self.intervals
    }

    fn radius(&self, index: usize) -> f64 {
        self.scale * ((index as f64 * self.delta).exp() - 1.)
    }

    fn step(&self) -> f64 {
        1.
    }

    fn step_function(&self, potential: &Potential, l: usize, energy: f64, index: usize) -> f64 {
        let jacobian = self.scale * self.delta * (index as f64 * self.delta).exp();
        2. * (self.effective_potential(potential, l, index) - energy) * jacobian * jacobian
            + self.delta * self.delta / 4.
    }

    fn boundary_near(&self, l: usize) -> f64 {
        self.radius(1).powi(l as i32 + 1) * (-self.delta / 2.).exp()
    }

    fn boundary_far(&self, index: usize, energy: f64) -> f64 {
        (-self.radius(index) * (2. * energy.abs()).sqrt() - index as f64 * self.delta / 2.).exp()
    }

    fn max_radius_index(&self, energy: f64) -> usize {
        if self.boundary_far(self.intervals, energy) >= FAR_BOUNDARY_UNDERFLOW {
            return self.intervals;
        }
        // The tail decays monotonically: bisect for the first node where it underflows
        let (mut inside, mut outside) = (0, self.intervals);
        while outside - inside > 1 {
            let middle = (inside + outside) / 2;
            if self.boundary_far(middle, energy) < FAR_BOUNDARY_UNDERFLOW {
                outside = middle;
            } else {
                inside = middle;
            }
        }
        outside
    }

    fn derivative_step(&self, index: usize) -> f64 {
        self.scale * (index as f64 * self.delta).exp() * (1. - (-self.delta).exp())
    }

    fn wavefunction_value(&self, index: usize, value: f64) -> f64 {
        (index as f64 * self.delta / 2.).exp() * value
    }

    fn is_uniform(&self) -> bool {
        false
    }
}

#[derive(Copy, Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RadialGridKind {
    Uniform,
    Exponential,
}

/// A radial grid whose strategy is chosen at run time
#[derive(Copy, Clone, Debug)]
pub enum RadialGrid {
    Uniform(UniformGrid),
    Exponential(ExponentialGrid),
}

impl RadialGrid {
    /// `delta` is ignored for uniform grids
    pub fn new(kind: RadialGridKind, outer_radius: f64, intervals: usize, delta: f64) -> Self {
        match kind {
            RadialGridKind::Uniform => Self::Uniform(UniformGrid::new(outer_radius, intervals)),
            RadialGridKind::Exponential => {
                Self::Exponential(ExponentialGrid::new(outer_radius, intervals, delta))
            }
        }
    }
}

macro_rules! delegate {
    ($self:ident, $grid:ident => $call:expr) => {
        match $self {
            RadialGrid::Uniform($grid) => $call,
            RadialGrid::Exponential($grid) => $call,
        }
    };
}

impl GridStrategy for RadialGrid {
    fn number_of_intervals(&self) -> usize {
        delegate!(self, grid => grid.number_of_intervals())
    }

    fn radius(&self, index: usize) -> f64 {
        delegate!(self, grid => grid.radius(index))
    }

    fn step(&self) -> f64 {
        delegate!(self, grid => grid.step())
    }

    fn step_function(&self, potential: &Potential, l: usize, energy: f64, index: usize) -> f64 {
        delegate!(self, grid => grid.step_function(potential, l, energy, index))
    }

    fn boundary_near(&self, l: usize) -> f64 {
        delegate!(self, grid => grid.boundary_near(l))
    }

    fn boundary_far(&self, index: usize, energy: f64) -> f64 {
        delegate!(self, grid => grid.boundary_far(index, energy))
    }

    fn max_radius_index(&self, energy: f64) -> usize {
        delegate!(self, grid => grid.max_radius_index(energy))
    }

    fn derivative_step(&self, index: usize) -> f64 {
        delegate!(self, grid => grid.derivative_step(index))
    }

    fn wavefunction_value(&self, index: usize, value: f64) -> f64 {
        delegate!(self, grid => grid.wavefunction_value(index, value))
    }

    fn is_uniform(&self) -> bool {
        delegate!(self, grid => grid.is_uniform())
    }
}

#[cfg(test)]
mod test {
    use super::{ExponentialGrid, GridStrategy, RadialGrid, RadialGridKind, UniformGrid};

    #[test]
    fn exponential_grid_ends_at_the_outer_radius() {
        let grid = ExponentialGrid::new(2.41, 2000, 0.005);
        approx::assert_relative_eq!(grid.radius(0), 0.);
        approx::assert_relative_eq!(grid.radius(2000), 2.41, max_relative = 1e-12);
        approx::assert_relative_eq!(
            grid.derivative_step(2000),
            grid.radius(2000) - grid.radius(1999),
            max_relative = 1e-9
        );
    }

    #[test]
    fn uniform_grid_is_evenly_spaced() {
        let grid = UniformGrid::new(2., 400);
        approx::assert_relative_eq!(grid.radius(400), 2., max_relative = 1e-12);
        approx::assert_relative_eq!(grid.derivative_step(17), 0.005);
        assert!(grid.is_uniform());
    }

    #[test]
    fn deep_energies_shrink_the_integration_range() {
        let grid = ExponentialGrid::new(2.41, 2000, 0.005);
        assert_eq!(grid.max_radius_index(-0.05), 2000);
        let index = grid.max_radius_index(-1e6);
        assert!(index < 2000);
        assert!(grid.boundary_far(index, -1e6) < 1e-200);
        assert!(grid.boundary_far(index - 1, -1e6) >= 1e-200);
    }

    #[test]
    fn uniform_range_is_capped_by_the_grid() {
        let grid = UniformGrid::new(2.41, 2000);
        assert_eq!(grid.max_radius_index(0.), 2000);
        assert_eq!(grid.max_radius_index(0.5), 2000);
        assert!(grid.max_radius_index(-1e6) < 2000);
    }

    #[test]
    fn runtime_selection_delegates_to_the_strategy() {
        let grid = RadialGrid::new(RadialGridKind::Exponential, 2.41, 2000, 0.005);
        let reference = ExponentialGrid::new(2.41, 2000, 0.005);
        assert!(!grid.is_uniform());
        approx::assert_relative_eq!(grid.radius(1234), reference.radius(1234));
        let grid = RadialGrid::new(RadialGridKind::Uniform, 2.41, 2000, 0.005);
        assert!(grid.is_uniform());
    }
}
