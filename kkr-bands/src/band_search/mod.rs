// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Band search
//!
//! A state machine over the energy axis of a single k-point. Each step consumes the secular
//! determinant at the next energy and reports a band energy when it detects either a sign change
//! or a same-sign local minimum of small magnitude in the sampled curve.

mod interpolate;
mod limits;

pub use limits::StabilityLimits;

use interpolate::{linear_root, quadratic_stationary_point};

/// A single sample of the secular determinant
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Sample {
    /// A logarithmic derivative at this energy diverged, the determinant is meaningless
    Blowup,
    /// The real part of the secular determinant
    Value(f64),
}

/// Rolling state of one k-point's energy scan
///
/// A fresh context is created for every k-point and never shared between them.
#[derive(Clone, Debug)]
pub struct ScanContext {
    limits: StabilityLimits,
    step: f64,
    position: usize,
    old: f64,
    older: f64,
}

impl ScanContext {
    pub fn new(step: f64, limits: StabilityLimits) -> Self {
        Self {
            limits,
            step,
            position: 0,
            old: 0.,
            older: 0.,
        }
    }

    /// The number of energies consumed so far
    pub fn position(&self) -> usize {
        self.position
    }

    /// The last two determinant values, most recent first
    pub fn rolling_state(&self) -> (f64, f64) {
        (self.old, self.older)
    }

    /// Consumes the sample at `energy` and returns a band energy if one was found
    ///
    /// `close_to_pole` is only evaluated once a candidate root has passed every cheaper test.
    pub fn step<F>(&mut self, energy: f64, sample: Sample, close_to_pole: F) -> Option<f64>
    where
        F: FnOnce() -> bool,
    {
        let position = self.position;
        self.position += 1;

        let determinant = match sample {
            Sample::Blowup => {
                self.old = f64::INFINITY;
                self.older = f64::INFINITY;
                return None;
            }
            Sample::Value(determinant) => determinant,
        };

        let (old, older) = (self.old, self.older);
        let root = if position > 0 && determinant * old < 0. {
            if self.limits.is_usable(determinant)
                && self.limits.is_usable(old)
                && !close_to_pole()
            {
                Some(linear_root(energy, self.step, old, determinant))
            } else {
                None
            }
        } else if position > 1 && self.is_small_minimum(energy, determinant) && !close_to_pole() {
            Some(quadratic_stationary_point(
                energy, self.step, older, old, determinant,
            ))
        } else {
            None
        };

        self.older = old;
        self.old = determinant;
        root
    }

    /// Whether the previous sample is a same-sign local minimum in magnitude, small enough to be
    /// a near miss of a band rather than a spurious dip
    fn is_small_minimum(&self, energy: f64, determinant: f64) -> bool {
        let (old, older) = (self.old, self.older);
        self.limits.is_usable(determinant)
            && self.limits.is_usable(old)
            && self.limits.is_usable(older)
            && old.abs() < older.abs()
            && old.abs() < determinant.abs()
            && old.abs() < self.limits.extremum_ceiling(energy)
            && ((determinant > 0. && old > 0. && older > 0.)
                || (determinant < 0. && old < 0. && older < 0.))
    }
}
