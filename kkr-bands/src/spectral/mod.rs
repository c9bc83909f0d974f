// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Spectral
//!
//! The discrete energy axis scanned by the band search and the table of logarithmic derivatives
//! sampled on it.

mod energy;
mod ratios;

pub use energy::{EnergyGrid, EnergyGridBuilder};
pub use ratios::RatioTable;
