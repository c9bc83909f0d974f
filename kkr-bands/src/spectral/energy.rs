use crate::error::BuildError;
use std::ops::Range;

/// Guards the sample count against rounding of `(max - min) / step`
const COUNT_TOLERANCE: f64 = 1e-9;

pub struct EnergyGridBuilder<RefEnergyRange, RefStep> {
    energy_range: RefEnergyRange,
    step: RefStep,
}

impl Default for EnergyGridBuilder<(), ()> {
    fn default() -> Self {
        Self {
            energy_range: (),
            step: (),
        }
    }
}

impl EnergyGridBuilder<(), ()> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<RefEnergyRange, RefStep> EnergyGridBuilder<RefEnergyRange, RefStep> {
    pub fn with_energy_range(self, energy_range: Range<f64>) -> EnergyGridBuilder<Range<f64>, RefStep> {
        EnergyGridBuilder {
            energy_range,
            step: self.step,
        }
    }

    pub fn with_step(self, step: f64) -> EnergyGridBuilder<RefEnergyRange, f64> {
        EnergyGridBuilder {
            energy_range: self.energy_range,
            step,
        }
    }
}

impl EnergyGridBuilder<Range<f64>, f64> {
    pub fn build(self) -> Result<EnergyGrid, BuildError> {
        let Range { start, end } = self.energy_range;
        let error = BuildError::EnergyGrid {
            minimum: start,
            maximum: end,
            step: self.step,
        };
        if !(start.is_finite() && end.is_finite() && self.step.is_finite()) || self.step <= 0. {
            return Err(error);
        }
        let count = ((end - start) / self.step + COUNT_TOLERANCE).floor();
        if count < 1. {
            return Err(error);
        }
        Ok(EnergyGrid {
            minimum: start,
            step: self.step,
            count: count as usize,
        })
    }
}

/// Uniformly spaced energies `minimum + i step` for `i` in `0..len`
///
/// The maximum of the window is excluded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnergyGrid {
    minimum: f64,
    step: f64,
    count: usize,
}

impl EnergyGrid {
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn minimum(&self) -> f64 {
        self.minimum
    }

    pub fn energy_at(&self, index: usize) -> f64 {
        self.minimum + index as f64 * self.step
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.count).map(move |index| self.energy_at(index))
    }
}
