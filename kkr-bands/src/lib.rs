// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! KKR-bands computes electronic band structures with the Korringa-Kohn-Rostoker method
//!
//! # Overview
//! In the KKR, or multiple scattering, formalism the crystal is modelled as an array of
//! non-overlapping spherical muffin-tin potentials. The scattering properties of a single
//! muffin-tin enter through the logarithmic derivative of the radial wavefunction at its surface,
//! the geometry of the crystal through lattice sums of the free particle Green's function. Band
//! energies are the energies at which the determinant of the resulting secular matrix vanishes.
//!
//! The calculation proceeds in two phases. First the radial Schrodinger equation is integrated
//! with Numerov's method for every energy on the scan and every angular momentum up to `l_max`.
//! Then, for every k-point on a path through the Brillouin zone, the secular determinant is
//! evaluated along the energy axis and its sign changes and small same-sign minima are
//! interpolated to band energies.
//!
//! # Usage
//! KKR-bands is distributed as a binary crate, run from the repository root. The defaults in
//! `.config/default.toml` compute the bands of copper, any field can be overridden by a further
//! `.toml` file passed on the command line:
//!
//! ```toml
//! [band_search]
//! l_max = 3
//!
//! [potential]
//! model = "step"
//! charge = 3.0
//! core_radius = 2.675
//! core_value = 0.69525
//! ```
//!
//! The bands are written to `bands.csv` in the output directory, with the positions of the
//! symmetry points in `symmetry_points.csv`.

/// The command line application, configuration, tracing and output
pub mod app;

/// The energy scan state machine
pub mod band_search;

/// The top level two phase calculation
pub mod band_structure;

/// Physical constants
pub mod constants;

/// Gaunt coefficients coupling angular momenta in the secular matrix
pub mod coupling;

/// Error handling
pub mod error;

/// Radial integration of the Schrodinger equation
pub mod numerov;

/// Fork-join work partitioning and cooperative cancellation
pub mod partition;

/// Muffin-tin potentials
pub mod potential;

/// Spherical Bessel functions, spherical harmonics and the incomplete gamma function
mod special;

/// The energy axis and the logarithmic derivatives sampled on it
pub mod spectral;

/// Ewald summed structure constants and the KKR secular matrix
pub mod structural;

/// Helper methods for tests
#[cfg(test)]
mod utilities;

pub use band_structure::{BandStructure, BandStructureBuilder, Bands, Options};
pub use partition::Cancellation;
pub use potential::{ModelPotential, PotentialSampler};
