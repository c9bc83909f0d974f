// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Numerov
//!
//! Outward integration of the radial Schrodinger equation `u'' = 2(V + l(l+1)/2r^2 - E) u` from
//! the regular behaviour `u ~ r^{l+1}` at the origin to the muffin-tin radius. The quantity of
//! interest is the logarithmic derivative `u'(R) / u(R)`, which carries the scattering phase shift
//! into the KKR secular equation.

mod grid;

pub use grid::{ExponentialGrid, GridStrategy, RadialGrid, RadialGridKind, UniformGrid};

use crate::potential::Potential;

/// A radial integrator bound to a tabulated potential
///
/// Each worker owns its own `Numerov`, the potential table is shared.
pub struct Numerov<'a, G> {
    potential: &'a Potential,
    grid: G,
}

impl<'a, G: GridStrategy> Numerov<'a, G> {
    pub fn new(potential: &'a Potential, grid: G) -> Self {
        Self { potential, grid }
    }

    pub fn grid(&self) -> &G {
        &self.grid
    }

    /// The logarithmic derivative `u'/u` at the end of the integration range
    ///
    /// A diverging solution returns `f64::INFINITY`, which downstream consumers treat as an
    /// unusable sample rather than an error.
    pub fn log_derivative(&self, l: usize, energy: f64) -> f64 {
        let end = self
            .grid
            .max_radius_index(energy)
            .min(self.grid.number_of_intervals())
            .min(self.potential.len().saturating_sub(1));
        if end < 2 {
            return f64::INFINITY;
        }

        let h2 = self.grid.step().powi(2);
        let mut solution = self.grid.boundary_near(l);
        let mut function_value = self.grid.step_function(self.potential, l, energy, 1);
        let mut w = (1. - h2 * function_value / 12.) * solution;
        let mut w_previous = 0.;
        let mut previous_solution = 0.;

        for index in 2..=end {
            let w_next = 2. * w - w_previous + h2 * solution * function_value;
            w_previous = w;
            w = w_next;

            function_value = self.grid.step_function(self.potential, l, energy, index);
            previous_solution = solution;
            solution = w / (1. - h2 * function_value / 12.);

            if !solution.is_finite() {
                return f64::INFINITY;
            }
        }

        let u_end = self.grid.wavefunction_value(end, solution);
        let u_previous = self.grid.wavefunction_value(end - 1, previous_solution);
        (u_end - u_previous) / (self.grid.derivative_step(end) * u_end)
    }
}
