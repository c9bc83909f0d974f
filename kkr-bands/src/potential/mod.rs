// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Potential
//!
//! The spherically symmetric muffin-tin potential, tabulated on the nodes of a radial grid before
//! the radial integration begins.

mod models;

pub use models::ModelPotential;

use crate::numerov::GridStrategy;

/// A source of the crystal potential in Hartree as a function of radius in bohr
pub trait PotentialSampler: Send + Sync {
    fn value(&self, radius: f64) -> f64;
}

/// The potential evaluated at every node of a radial grid
///
/// The value at the origin is never read by the integrator and is stored as zero.
#[derive(Clone, Debug)]
pub struct Potential {
    values: Vec<f64>,
}

impl Potential {
    /// Tabulates `sampler` on all `number_of_intervals + 1` nodes of `grid`
    #[tracing::instrument(name = "Potential sampling", level = "info", skip_all)]
    pub fn sample<G, S>(grid: &G, sampler: &S) -> Self
    where
        G: GridStrategy,
        S: PotentialSampler + ?Sized,
    {
        let values = (0..=grid.number_of_intervals())
            .map(|index| match index {
                0 => 0.,
                _ => sampler.value(grid.radius(index)),
            })
            .collect::<Vec<_>>();
        tracing::trace!("Sampled the potential on {} nodes", values.len());
        Self { values }
    }

    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn at(&self, index: usize) -> f64 {
        self.values[index]
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
