// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

//! # Band structure
//!
//! The top level calculation. The logarithmic derivatives are tabulated for every energy on the
//! scan in a first parallel phase, then every k-point on the path scans the secular determinant
//! along the energy axis in a second. The two phases share only read-only data, so the bands do
//! not depend on the number of workers.

use crate::band_search::{Sample, ScanContext, StabilityLimits};
use crate::coupling::CouplingCoefficients;
use crate::error::BuildError;
use crate::numerov::{Numerov, RadialGrid, RadialGridKind};
use crate::partition::{Cancellation, WorkPartitioner};
use crate::potential::{Potential, PotentialSampler};
use crate::spectral::{EnergyGrid, EnergyGridBuilder, RatioTable};
use crate::structural::StructuralMatrix;
use console::Term;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use kkr_lattice::{
    predefined_path, sample_path, BravaisLattice, Fcc, KPath, LatticeBasis, LatticeBasisBuilder,
    SymmetryMarker, DEFAULT_PATH,
};
use nalgebra::Vector3;
use ndarray::Axis;

/// The parameters of a band structure calculation
#[derive(Clone, Debug)]
pub struct Options {
    /// Cubic lattice constant in bohr
    pub lattice_constant: f64,
    /// Muffin-tin radius in bohr, `None` or a non-positive value gives touching spheres
    pub muffin_tin_radius: Option<f64>,
    /// Reciprocal space cutoff in units of `2π / a`
    pub reciprocal_cutoff: usize,
    /// Real space cutoff in units of `a`
    pub real_cutoff: usize,
    pub radial_grid: RadialGridKind,
    /// Number of radial intervals between the origin and the muffin-tin radius
    pub radial_intervals: usize,
    /// Logarithmic step of the exponential radial grid
    pub radial_delta: f64,
    pub minimum_energy: f64,
    pub maximum_energy: f64,
    pub energy_step: f64,
    pub l_max: usize,
    pub limits: StabilityLimits,
    /// Labels of the symmetry points the path visits
    pub path: Vec<String>,
    /// Target number of k-points along the path
    pub number_of_points: usize,
    pub threads: usize,
    /// Draw a progress bar on stdout during the band search
    pub show_progress: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            lattice_constant: crate::constants::COPPER_LATTICE_CONSTANT,
            muffin_tin_radius: None,
            reciprocal_cutoff: 3,
            real_cutoff: 1,
            radial_grid: RadialGridKind::Exponential,
            radial_intervals: 2000,
            radial_delta: 0.005,
            minimum_energy: -0.05,
            maximum_energy: 0.8,
            energy_step: 1e-3,
            l_max: 2,
            limits: StabilityLimits::for_l_max(2),
            path: predefined_path(DEFAULT_PATH).unwrap_or_default(),
            number_of_points: 400,
            threads: 4,
            show_progress: false,
        }
    }
}

/// Band energies along a path through the Brillouin zone
#[derive(Clone, Debug, Default)]
pub struct Bands {
    path: KPath<f64>,
    energies: Vec<Vec<f64>>,
}

impl Bands {
    /// The k-points in inverse bohr
    pub fn kpoints(&self) -> &[Vector3<f64>] {
        self.path.points()
    }

    pub fn markers(&self) -> &[SymmetryMarker] {
        self.path.markers()
    }

    /// Cumulative distance along the path at each k-point
    pub fn distances(&self) -> Vec<f64> {
        self.path.distances()
    }

    /// The band energies found at each k-point, in ascending order
    pub fn energies(&self) -> &[Vec<f64>] {
        &self.energies
    }

    pub fn len(&self) -> usize {
        self.energies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energies.is_empty()
    }

    pub fn number_of_roots(&self) -> usize {
        self.energies.iter().map(Vec::len).sum()
    }
}

pub struct BandStructureBuilder<RefOptions, RefPotential, RefCancellation> {
    options: RefOptions,
    potential: RefPotential,
    cancellation: RefCancellation,
}

impl BandStructureBuilder<(), (), ()> {
    pub fn new() -> Self {
        Self {
            options: (),
            potential: (),
            cancellation: (),
        }
    }
}

impl Default for BandStructureBuilder<(), (), ()> {
    fn default() -> Self {
        Self::new()
    }
}

impl<RefOptions, RefPotential, RefCancellation>
    BandStructureBuilder<RefOptions, RefPotential, RefCancellation>
{
    pub fn with_options<Options>(
        self,
        options: &Options,
    ) -> BandStructureBuilder<&Options, RefPotential, RefCancellation> {
        BandStructureBuilder {
            options,
            potential: self.potential,
            cancellation: self.cancellation,
        }
    }

    pub fn with_potential<Potential: ?Sized>(
        self,
        potential: &Potential,
    ) -> BandStructureBuilder<RefOptions, &Potential, RefCancellation> {
        BandStructureBuilder {
            options: self.options,
            potential,
            cancellation: self.cancellation,
        }
    }

    pub fn with_cancellation(
        self,
        cancellation: &Cancellation,
    ) -> BandStructureBuilder<RefOptions, RefPotential, &Cancellation> {
        BandStructureBuilder {
            options: self.options,
            potential: self.potential,
            cancellation,
        }
    }
}

impl<'a, S> BandStructureBuilder<&'a Options, &'a S, &'a Cancellation>
where
    S: PotentialSampler + ?Sized,
{
    /// Validates the options and prepares everything the two phases share
    #[tracing::instrument(name = "Band structure builder", level = "info", skip_all)]
    pub fn build(self) -> Result<BandStructure, BuildError> {
        let options = self.options;
        let basis = LatticeBasisBuilder::new()
            .with_lattice(Fcc)
            .with_lattice_constant(options.lattice_constant)
            .with_muffin_tin_radius(options.muffin_tin_radius)
            .with_cutoffs(options.reciprocal_cutoff, options.real_cutoff)
            .build()?;
        tracing::info!(
            "Lattice basis with {} reciprocal and {} real space vectors, muffin-tin radius {:.5} bohr",
            basis.reciprocal_vectors().len(),
            basis.real_vectors().len(),
            basis.muffin_tin_radius()
        );

        let energies = EnergyGridBuilder::new()
            .with_energy_range(options.minimum_energy..options.maximum_energy)
            .with_step(options.energy_step)
            .build()?;

        let kpath = sample_path(
            &BravaisLattice::<f64>::symmetry_points(&Fcc),
            options.path.as_slice(),
            options.number_of_points,
        )?
        .scaled(basis.reciprocal_scale());

        if options.radial_intervals < 2 {
            return Err(BuildError::RadialGrid(format!(
                "at least two intervals are needed, found {}",
                options.radial_intervals
            )));
        }
        if options.radial_grid == RadialGridKind::Exponential
            && !(options.radial_delta.is_finite() && options.radial_delta > 0.)
        {
            return Err(BuildError::RadialGrid(format!(
                "the logarithmic step must be positive, found {}",
                options.radial_delta
            )));
        }
        let grid = RadialGrid::new(
            options.radial_grid,
            basis.muffin_tin_radius(),
            options.radial_intervals,
            options.radial_delta,
        );
        let potential = Potential::sample(&grid, self.potential);

        Ok(BandStructure {
            partitioner: WorkPartitioner::new(options.threads)?,
            coefficients: CouplingCoefficients::new(options.l_max),
            l_max: options.l_max,
            limits: options.limits,
            show_progress: options.show_progress,
            cancellation: self.cancellation.clone(),
            basis,
            energies,
            kpath,
            grid,
            potential,
        })
    }
}

/// A prepared band structure calculation
pub struct BandStructure {
    basis: LatticeBasis<f64>,
    energies: EnergyGrid,
    kpath: KPath<f64>,
    grid: RadialGrid,
    potential: Potential,
    coefficients: CouplingCoefficients,
    partitioner: WorkPartitioner,
    l_max: usize,
    limits: StabilityLimits,
    show_progress: bool,
    cancellation: Cancellation,
}

impl BandStructure {
    pub fn basis(&self) -> &LatticeBasis<f64> {
        &self.basis
    }

    pub fn energies(&self) -> &EnergyGrid {
        &self.energies
    }

    pub fn kpath(&self) -> &KPath<f64> {
        &self.kpath
    }

    /// Runs both phases, returning empty bands if the path is too short to sample or the
    /// calculation is cancelled
    #[tracing::instrument(name = "Band structure", level = "info", skip_all)]
    pub fn compute(&self) -> Bands {
        if self.kpath.is_empty() {
            tracing::info!("Too few k-points to sample the requested path");
            return Bands::default();
        }

        let ratios = match self.tabulate_ratios() {
            Some(ratios) => ratios,
            None => {
                tracing::info!("Cancelled during the radial integration");
                return Bands::default();
            }
        };

        match self.search_bands(&ratios) {
            Some(energies) => {
                let bands = Bands {
                    path: self.kpath.clone(),
                    energies,
                };
                tracing::info!(
                    "Found {} band energies over {} k-points",
                    bands.number_of_roots(),
                    bands.len()
                );
                bands
            }
            None => {
                tracing::info!("Cancelled during the band search");
                Bands::default()
            }
        }
    }

    /// Phase one: the logarithmic derivative for every energy and angular momentum
    #[tracing::instrument(name = "Radial integration", level = "info", skip_all)]
    pub fn tabulate_ratios(&self) -> Option<RatioTable> {
        let mut table = RatioTable::new(self.energies.len(), self.l_max);
        let size = self.partitioner.chunk_size(self.energies.len());
        {
            let mut values = table.values_mut();
            let chunks = values.axis_chunks_iter_mut(Axis(0), size).collect::<Vec<_>>();
            self.partitioner.run_chunks(chunks, |chunk_index, mut rows| {
                let numerov = Numerov::new(&self.potential, self.grid);
                let offset = chunk_index * size;
                for (row_index, mut row) in rows.outer_iter_mut().enumerate() {
                    let energy = self.energies.energy_at(offset + row_index);
                    for (l, ratio) in row.iter_mut().enumerate() {
                        if self.cancellation.is_cancelled() {
                            return;
                        }
                        *ratio = numerov.log_derivative(l, energy);
                    }
                }
                tracing::trace!("Integrated energies {} to {}", offset, offset + rows.nrows());
            });
        }

        if self.cancellation.is_cancelled() {
            return None;
        }
        let blowups = (0..table.number_of_energies())
            .filter(|&index| table.is_blowup(index))
            .count();
        tracing::info!(
            "Tabulated {} energies, {} of which diverged",
            table.number_of_energies(),
            blowups
        );
        Some(table)
    }

    /// Phase two: the band energies at every k-point on the path
    #[tracing::instrument(name = "Band search", level = "info", skip_all)]
    pub fn search_bands(&self, ratios: &RatioTable) -> Option<Vec<Vec<f64>>> {
        let mut energies = vec![Vec::new(); self.kpath.len()];
        let size = self.partitioner.chunk_size(energies.len());
        let progress = self.progress_bar(energies.len() as u64);

        let chunks = energies.chunks_mut(size).collect::<Vec<_>>();
        self.partitioner.run_chunks(chunks, |chunk_index, slots| {
            let mut lambda = StructuralMatrix::new(&self.basis, self.l_max);
            let offset = chunk_index * size;
            for (slot_index, slot) in slots.iter_mut().enumerate() {
                if self.cancellation.is_cancelled() {
                    return;
                }
                let wavevector = &self.kpath.points()[offset + slot_index];
                *slot = self.scan(&mut lambda, wavevector, ratios);
                progress.inc(1);
            }
        });
        progress.finish_and_clear();

        if self.cancellation.is_cancelled() {
            return None;
        }
        Some(energies)
    }

    /// Scans the secular determinant at one k-point along the whole energy axis
    pub fn scan(
        &self,
        lambda: &mut StructuralMatrix,
        wavevector: &Vector3<f64>,
        ratios: &RatioTable,
    ) -> Vec<f64> {
        let mut context = ScanContext::new(self.energies.step(), self.limits);
        let pole_limit = 2. * self.energies.step();
        let mut roots = Vec::new();
        for (index, energy) in self.energies.iter().enumerate() {
            if self.cancellation.is_cancelled() {
                break;
            }
            let row = ratios.row(index);
            let sample = if ratios.is_blowup(index) {
                Sample::Blowup
            } else {
                lambda.compute(energy, wavevector, row, &self.coefficients);
                Sample::Value(lambda.determinant().re)
            };
            let close_to_pole = || {
                lambda.is_close_to_pole(energy, wavevector, pole_limit, row, self.limits.cotangent)
            };
            if let Some(root) = context.step(energy, sample, close_to_pole) {
                roots.push(root);
            }
        }
        roots
    }

    fn progress_bar(&self, length: u64) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let style = ProgressStyle::default_bar()
            .template("{prefix:.bold.dim} [{wide_bar:.cyan/blue}] {pos}/{len} k-points ({eta})");
        let progress =
            ProgressBar::with_draw_target(length, ProgressDrawTarget::term(Term::stdout(), 60));
        progress.set_style(style);
        progress.set_prefix("Band search");
        progress
    }
}
