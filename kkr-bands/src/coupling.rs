// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Coupling coefficients
//!
//! Gaunt coefficients `C(l, l', L, m, m') = ∫ Y*_{lm} Y_{l'm'} Y_{L,m-m'} dΩ` which combine the
//! structure constants `D_LM` into the KKR secular matrix. They are evaluated once per run from
//! Wigner 3j symbols and shared read-only by every worker.

use itertools::iproduct;
use std::collections::HashMap;
use std::f64::consts::PI;

type CouplingKey = (usize, usize, usize, i64, i64);

/// The non-zero Gaunt coefficients up to a maximum angular momentum
#[derive(Clone, Debug)]
pub struct CouplingCoefficients {
    l_max: usize,
    factorials: Vec<f64>,
    coefficients: HashMap<CouplingKey, f64>,
}

impl CouplingCoefficients {
    /// Tabulates every coefficient with `l, l' <= l_max` and `|l - l'| <= L <= l + l'`
    #[tracing::instrument(name = "Coupling coefficients", level = "info")]
    pub fn new(l_max: usize) -> Self {
        // Racah's formula for the 3j symbols needs factorials up to 2 l + 2 l' + 1
        let factorials = (0..=(4 * l_max + 1).max(crate::constants::EWALD_SERIES_TERMS))
            .scan(1_f64, |product, n| {
                if n > 0 {
                    *product *= n as f64;
                }
                Some(*product)
            })
            .collect::<Vec<_>>();

        let mut table = Self {
            l_max,
            factorials,
            coefficients: HashMap::new(),
        };

        let l_max_i64 = l_max as i64;
        for (l, l_prime) in iproduct!(0..=l_max, 0..=l_max) {
            for big_l in (l.max(l_prime) - l.min(l_prime))..=(l + l_prime) {
                for (m, m_prime) in iproduct!(-l_max_i64..=l_max_i64, -l_max_i64..=l_max_i64) {
                    if m.unsigned_abs() as usize > l || m_prime.unsigned_abs() as usize > l_prime {
                        continue;
                    }
                    let value = table.gaunt(l, l_prime, big_l, m, m_prime);
                    if value != 0. {
                        table
                            .coefficients
                            .insert((l, l_prime, big_l, m, m_prime), value);
                    }
                }
            }
        }
        tracing::info!(
            "Tabulated {} non-zero coefficients for l_max = {}",
            table.coefficients.len(),
            l_max
        );
        table
    }

    pub fn l_max(&self) -> usize {
        self.l_max
    }

    /// The coefficient `C(l, l', L, m, m')`, zero when it was not tabulated
    pub fn coefficient(&self, l: usize, l_prime: usize, big_l: usize, m: i64, m_prime: i64) -> f64 {
        self.coefficients
            .get(&(l, l_prime, big_l, m, m_prime))
            .copied()
            .unwrap_or(0.)
    }

    /// `n!`, read from the table when available
    pub fn factorial(&self, n: usize) -> f64 {
        match self.factorials.get(n) {
            Some(&value) => value,
            None => (1..=n).fold(1., |acc, k| acc * k as f64),
        }
    }

    /// `∫ Y*_{lm} Y_{l'm'} Y_{L,m-m'} dΩ` via `Y*_{lm} = (-1)^m Y_{l,-m}`
    fn gaunt(&self, l: usize, l_prime: usize, big_l: usize, m: i64, m_prime: i64) -> f64 {
        let big_m = m - m_prime;
        if big_m.unsigned_abs() as usize > big_l || (l + l_prime + big_l) % 2 == 1 {
            return 0.;
        }
        let prefactor =
            ((2 * l + 1) as f64 * (2 * l_prime + 1) as f64 * (2 * big_l + 1) as f64 / (4. * PI))
                .sqrt();
        let sign = if m % 2 == 0 { 1. } else { -1. };
        sign * prefactor
            * self.wigner_3j([l, l_prime, big_l], [0, 0, 0])
            * self.wigner_3j([l, l_prime, big_l], [-m, m_prime, big_m])
    }

    /// The Wigner 3j symbol `(j1 j2 j3; m1 m2 m3)` from Racah's formula
    fn wigner_3j(&self, j: [usize; 3], m: [i64; 3]) -> f64 {
        let [j1, j2, j3] = j.map(|value| value as i64);
        let [m1, m2, m3] = m;
        if m1 + m2 + m3 != 0
            || j3 < (j1 - j2).abs()
            || j3 > j1 + j2
            || m1.abs() > j1
            || m2.abs() > j2
            || m3.abs() > j3
        {
            return 0.;
        }

        let fact = |n: i64| self.factorial(n as usize);
        let triangle = fact(j1 + j2 - j3) * fact(j1 - j2 + j3) * fact(-j1 + j2 + j3)
            / fact(j1 + j2 + j3 + 1);
        let projections = fact(j1 + m1)
            * fact(j1 - m1)
            * fact(j2 + m2)
            * fact(j2 - m2)
            * fact(j3 + m3)
            * fact(j3 - m3);

        let k_min = 0.max(j2 - j3 - m1).max(j1 - j3 + m2);
        let k_max = (j1 + j2 - j3).min(j1 - m1).min(j2 + m2);
        let sum = (k_min..=k_max).fold(0., |acc, k| {
            let sign = if k % 2 == 0 { 1. } else { -1. };
            acc + sign
                / (fact(k)
                    * fact(j3 - j2 + k + m1)
                    * fact(j3 - j1 + k - m2)
                    * fact(j1 + j2 - j3 - k)
                    * fact(j1 - k - m1)
                    * fact(j2 - k + m2))
        });

        let phase = if (j1 - j2 - m3).rem_euclid(2) == 0 { 1. } else { -1. };
        phase * (triangle * projections).sqrt() * sum
    }
}
