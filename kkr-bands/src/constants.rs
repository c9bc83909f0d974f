// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Constants
//!
//! Defines physical constants and numerical tolerances used in the calculation. All energies are
//! in Hartree and lengths in bohr.

pub const HARTREE_IN_EV: f64 = 27.211386245988; // The Hartree energy in eV
pub const COPPER_LATTICE_CONSTANT: f64 = 6.8219117; // The fcc lattice constant of copper in bohr

pub(crate) const BLOWUP_RATIO: f64 = 300.; // Log-derivative magnitude beyond which a sample is discarded
pub(crate) const FAR_BOUNDARY_UNDERFLOW: f64 = 1e-200; // Decaying tail amplitude treated as zero
pub(crate) const UNIFORM_GRID_DECAY_LENGTHS: f64 = 200.; // Outer radius of a uniform grid in units of 1 / sqrt(2|E|)
pub(crate) const EWALD_SERIES_TERMS: usize = 16; // Maximum number of terms in the Ewald energy expansions
pub(crate) const EWALD_SERIES_TOLERANCE: f64 = 1e-13; // Terms below this truncate the Ewald energy expansions
