// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Error
//! Errors raised while assembling a calculation. Numerical anomalies met during the band search
//! are not errors: they are skipped samples.

use miette::Diagnostic;

#[derive(thiserror::Error, Debug, Diagnostic)]
pub enum BuildError {
    #[error(transparent)]
    #[diagnostic(code(kkr_bands::lattice))]
    Lattice(#[from] kkr_lattice::LatticeError),
    #[error("the energy window [{minimum}, {maximum}] with step {step} contains no samples")]
    #[diagnostic(code(kkr_bands::energy_grid))]
    EnergyGrid { minimum: f64, maximum: f64, step: f64 },
    #[error("invalid radial grid: {0}")]
    #[diagnostic(code(kkr_bands::radial_grid))]
    RadialGrid(String),
    #[error("the calculation needs at least one worker thread")]
    #[diagnostic(code(kkr_bands::threads))]
    NoWorkers,
    #[error(transparent)]
    #[diagnostic(code(kkr_bands::thread_pool))]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

#[derive(thiserror::Error, Debug, Diagnostic)]
/// Error for IO events
pub enum IOError {
    #[error("IO Failure: {0}")]
    IO(#[from] std::io::Error),
}
