// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Special functions
//!
//! Spherical Bessel and Neumann functions, spherical harmonics and the upper incomplete gamma
//! function. The Bessel functions are generic over `ComplexField` as the KKR equations evaluate
//! them at the imaginary argument `i sqrt(-2E) R` below the energy zero.

mod bessel;
mod gamma;
mod harmonics;

pub(crate) use bessel::BesselValues;
#[cfg(test)]
pub(crate) use bessel::spherical_j;
pub(crate) use gamma::upper_incomplete_gamma;
pub(crate) use harmonics::{angles, spherical_harmonic};
