use crate::band_search::StabilityLimits;
use crate::band_structure::Options;
use crate::error::BuildError;
use crate::numerov::RadialGridKind;
use crate::potential::ModelPotential;
use color_eyre::eyre::eyre;
use config::{Config, File};
use kkr_lattice::{predefined_path, DEFAULT_PATH};
use serde::Deserialize;
use std::env;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub(crate) struct Configuration {
    pub(crate) global: GlobalConfiguration,
    pub(crate) lattice: LatticeConfiguration,
    pub(crate) potential: ModelPotential,
    pub(crate) radial_grid: RadialGridConfiguration,
    pub(crate) energy: EnergyConfiguration,
    pub(crate) band_search: BandSearchConfiguration,
    pub(crate) path: PathConfiguration,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GlobalConfiguration {
    pub(crate) threads: usize,
    #[serde(default)]
    pub(crate) show_progress: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LatticeConfiguration {
    pub(crate) lattice_constant: f64,
    /// Touching spheres when absent or non-positive
    pub(crate) muffin_tin_radius: Option<f64>,
    pub(crate) reciprocal_cutoff: usize,
    pub(crate) real_cutoff: usize,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RadialGridConfiguration {
    pub(crate) kind: RadialGridKind,
    pub(crate) intervals: usize,
    pub(crate) delta: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EnergyConfiguration {
    pub(crate) minimum: f64,
    pub(crate) maximum: f64,
    pub(crate) step: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BandSearchConfiguration {
    pub(crate) l_max: usize,
    /// Replaces the limits tuned for `l_max`
    pub(crate) limits: Option<StabilityLimits>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PathConfiguration {
    /// One of the predefined paths
    pub(crate) index: Option<usize>,
    /// An explicit list of symmetry point labels, takes precedence over `index`
    pub(crate) labels: Option<Vec<String>>,
    pub(crate) number_of_points: usize,
}

impl Configuration {
    /// Layers the repository defaults, the optional `RUN_MODE` overrides and an optional user
    /// file, in increasing priority
    pub(crate) fn build(user_file: Option<&Path>) -> color_eyre::Result<Self> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            // The default settings for the calculation which we use in the general case
            .add_source(File::with_name(".config/default"))
            // The override settings for the current run mode, optional
            .add_source(File::with_name(&format!(".config/{}", run_mode)).required(false));
        if let Some(user_file) = user_file {
            builder = builder.add_source(File::from(user_file));
        }

        Self::deserialize(builder.build()?)
    }

    fn deserialize(config: Config) -> color_eyre::Result<Self> {
        config
            .try_deserialize()
            .map_err(|e| eyre!(format!("Failed to deserialize the config file: {:?}", e)))
    }

    /// The calculation parameters, resolving the symmetry path
    pub(crate) fn options(&self) -> Result<Options, BuildError> {
        let path = match &self.path.labels {
            Some(labels) => labels.clone(),
            None => predefined_path(self.path.index.unwrap_or(DEFAULT_PATH))?,
        };
        let l_max = self.band_search.l_max;
        Ok(Options {
            lattice_constant: self.lattice.lattice_constant,
            muffin_tin_radius: self.lattice.muffin_tin_radius,
            reciprocal_cutoff: self.lattice.reciprocal_cutoff,
            real_cutoff: self.lattice.real_cutoff,
            radial_grid: self.radial_grid.kind,
            radial_intervals: self.radial_grid.intervals,
            radial_delta: self.radial_grid.delta,
            minimum_energy: self.energy.minimum,
            maximum_energy: self.energy.maximum,
            energy_step: self.energy.step,
            l_max,
            limits: self
                .band_search
                .limits
                .unwrap_or_else(|| StabilityLimits::for_l_max(l_max)),
            path,
            number_of_points: self.path.number_of_points,
            threads: self.global.threads,
            show_progress: self.global.show_progress,
        })
    }
}
