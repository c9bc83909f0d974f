use serde::Deserialize;

/// Energy above which the extremum ceiling is tightened for `l_max >= 3`
const HIGH_ENERGY_THRESHOLD: f64 = 0.3;

/// Empirically tuned bounds separating genuine roots of the secular determinant from numerical
/// artifacts
///
/// The values depend on `l_max` and on the radial grid density, they are not derivable and may
/// need retuning when either changes.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub struct StabilityLimits {
    /// Ceiling on the determinant magnitude of a usable sample
    pub determinant: f64,
    /// Threshold on the phase-shift denominator below which a sample is close to a pole
    pub cotangent: f64,
    /// Ceiling on the magnitude of a same-sign local minimum reported as a root
    pub small_minimum: f64,
    /// Scale applied to `small_minimum` above `|E| = 0.3`
    #[serde(default = "unit_scale")]
    pub high_energy_scale: f64,
}

fn unit_scale() -> f64 {
    1.
}

impl StabilityLimits {
    pub fn for_l_max(l_max: usize) -> Self {
        if l_max < 3 {
            Self {
                determinant: 1e50,
                cotangent: 1e-4,
                small_minimum: 1e5,
                high_energy_scale: 1.,
            }
        } else {
            Self {
                determinant: 1e70,
                cotangent: 5e-5,
                small_minimum: 1e27,
                high_energy_scale: 1e-8,
            }
        }
    }

    /// The extremum ceiling at a given energy
    pub(crate) fn extremum_ceiling(&self, energy: f64) -> f64 {
        if energy.abs() > HIGH_ENERGY_THRESHOLD {
            self.high_energy_scale * self.small_minimum
        } else {
            self.small_minimum
        }
    }

    /// A determinant sample which can take part in root detection
    pub(crate) fn is_usable(&self, value: f64) -> bool {
        value.is_finite() && value.abs() < self.determinant
    }
}

#[cfg(test)]
mod test {
    use super::StabilityLimits;

    #[test]
    fn limits_tighten_for_high_angular_momentum() {
        let low = StabilityLimits::for_l_max(2);
        let high = StabilityLimits::for_l_max(3);
        assert!(high.determinant > low.determinant);
        assert!(high.cotangent < low.cotangent);
        assert_eq!(low.extremum_ceiling(0.5), low.small_minimum);
        approx::assert_relative_eq!(high.extremum_ceiling(0.5), 1e19);
        assert_eq!(high.extremum_ceiling(0.2), high.small_minimum);
    }

    #[test]
    fn unusable_samples_are_rejected() {
        let limits = StabilityLimits::for_l_max(2);
        assert!(limits.is_usable(-3.));
        assert!(!limits.is_usable(f64::NAN));
        assert!(!limits.is_usable(f64::INFINITY));
        assert!(!limits.is_usable(2e50));
    }
}
