use super::PotentialSampler;
use serde::Deserialize;

/// Analytic model potentials
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum ModelPotential {
    /// A fitted effective potential for copper
    Copper,
    /// The Starkloff-Joannopoulos local pseudopotential
    StarkloffJoannopoulos {
        charge: f64,
        lambda: f64,
        core_radius: f64,
    },
    /// A constant `core_value` inside `core_radius` and a bare Coulomb tail outside it
    Step {
        charge: f64,
        core_radius: f64,
        core_value: f64,
    },
    /// A flat well
    Constant { value: f64 },
}

impl Default for ModelPotential {
    fn default() -> Self {
        Self::Copper
    }
}

impl ModelPotential {
    /// An empty core model for aluminium
    pub fn aluminium() -> Self {
        Self::Step {
            charge: 3.,
            core_radius: 2.675,
            core_value: 1.3905 * 0.5,
        }
    }
}

impl PotentialSampler for ModelPotential {
    fn value(&self, radius: f64) -> f64 {
        match *self {
            Self::Copper => -copper_effective_charge(radius) / radius,
            Self::StarkloffJoannopoulos {
                charge,
                lambda,
                core_radius,
            } => {
                -charge * (1. - (-lambda * radius).exp())
                    / (1. + (-lambda * (radius - core_radius)).exp())
                    / radius
            }
            Self::Step {
                charge,
                core_radius,
                core_value,
            } => {
                if radius < core_radius {
                    core_value
                } else {
                    -charge / radius
                }
            }
            Self::Constant { value } => value,
        }
    }
}

/// The screened charge `r V(r)` of the copper fit, tending to `Z = 29` at the nucleus
fn copper_effective_charge(radius: f64) -> f64 {
    let r = radius;
    29. * (-2.3151241717834 * r.powf(0.81266614122432)
        + 2.1984250222603e-2 * r.powf(4.2246376280056))
    .exp()
        - 0.15595606773483 * r
        - 3.1350051440417e-3 * r * r
        + 5.1895222293006e-2 * r.powi(3)
        - 2.8027608685637e-2 * r.powi(4)
}
