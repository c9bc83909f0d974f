use kkr_bands::{BandStructureBuilder, Cancellation, ModelPotential};
use kkr_bands::spectral::RatioTable;
use kkr_lattice::{predefined_path, DEFAULT_PATH};
use std::thread;
use std::time::{Duration, Instant};
use utilities::short_copper_options;

#[test]
fn copper_bands_along_gamma_x() {
    let options = short_copper_options(4);
    let cancellation = Cancellation::new();
    let band_structure = BandStructureBuilder::new()
        .with_options(&options)
        .with_potential(&ModelPotential::Copper)
        .with_cancellation(&cancellation)
        .build()
        .unwrap();
    let bands = band_structure.compute();

    assert_eq!(bands.len(), band_structure.kpath().len());
    let markers = bands.markers();
    assert_eq!(markers.len(), 2);
    assert_eq!(markers[0].index, 0);
    assert_eq!(markers[1].index, bands.len() - 1);

    assert!(bands.number_of_roots() > 0);
    let energies = band_structure.energies();
    for roots in bands.energies() {
        assert!(roots.windows(2).all(|pair| pair[0] <= pair[1]));
        assert!(roots
            .iter()
            .all(|&root| root >= energies.minimum() - energies.step()
                && root <= energies.energy_at(energies.len() - 1)));
    }
}

#[test]
fn bands_do_not_depend_on_the_number_of_workers() {
    let cancellation = Cancellation::new();
    let compute = |threads| {
        let options = short_copper_options(threads);
        BandStructureBuilder::new()
            .with_options(&options)
            .with_potential(&ModelPotential::Copper)
            .with_cancellation(&cancellation)
            .build()
            .unwrap()
            .compute()
    };
    let serial = compute(1);
    let parallel = compute(4);
    assert_eq!(serial.energies(), parallel.energies());
    assert_eq!(serial.markers(), parallel.markers());
}

#[test]
fn cancellation_returns_empty_bands() {
    let options = short_copper_options(2);
    let cancellation = Cancellation::new();
    let band_structure = BandStructureBuilder::new()
        .with_options(&options)
        .with_potential(&ModelPotential::Copper)
        .with_cancellation(&cancellation)
        .build()
        .unwrap();
    cancellation.cancel();
    let bands = band_structure.compute();
    assert!(bands.is_empty());
    assert!(bands.markers().is_empty());
    assert!(band_structure.tabulate_ratios().is_none());
}

#[test]
fn cancellation_during_the_band_search_returns_empty_bands() {
    let mut options = short_copper_options(2);
    options.path = predefined_path(DEFAULT_PATH).unwrap();
    options.number_of_points = 400;
    options.energy_step = 1e-3;
    let cancellation = Cancellation::new();
    let band_structure = BandStructureBuilder::new()
        .with_options(&options)
        .with_potential(&ModelPotential::Copper)
        .with_cancellation(&cancellation)
        .build()
        .unwrap();
    let ratios = band_structure.tabulate_ratios().unwrap();

    let handle = cancellation.clone();
    let canceller = thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        handle.cancel();
    });
    let started = Instant::now();
    let search = band_structure.search_bands(&ratios);
    canceller.join().unwrap();

    assert!(search.is_none());
    assert!(started.elapsed() >= Duration::from_millis(50));
    assert!(cancellation.is_cancelled());
    let bands = band_structure.compute();
    assert!(bands.is_empty());
    assert!(bands.markers().is_empty());
}

#[test]
fn too_few_points_returns_empty_bands() {
    let mut options = short_copper_options(2);
    options.number_of_points = 5;
    let cancellation = Cancellation::new();
    let bands = BandStructureBuilder::new()
        .with_options(&options)
        .with_potential(&ModelPotential::Copper)
        .with_cancellation(&cancellation)
        .build()
        .unwrap()
        .compute();
    assert!(bands.is_empty());
}

#[test]
fn unknown_symmetry_point_is_a_build_error() {
    let mut options = short_copper_options(2);
    options.path = vec!["G".into(), "Q".into()];
    let cancellation = Cancellation::new();
    let result = BandStructureBuilder::new()
        .with_options(&options)
        .with_potential(&ModelPotential::Copper)
        .with_cancellation(&cancellation)
        .build();
    assert!(result.is_err());
}

#[test]
fn divergent_ratio_suppresses_roots_around_its_energy() {
    let options = short_copper_options(2);
    let cancellation = Cancellation::new();
    let band_structure = BandStructureBuilder::new()
        .with_options(&options)
        .with_potential(&ModelPotential::Copper)
        .with_cancellation(&cancellation)
        .build()
        .unwrap();
    let energies = *band_structure.energies();
    let ratios = band_structure.tabulate_ratios().unwrap();

    let blown_up = energies.len() / 2;
    let mut values = ratios.values().to_owned();
    values[[blown_up, 1]] = f64::NAN;
    let ratios = RatioTable::from(values);
    assert!(ratios.is_blowup(blown_up));

    let bands = band_structure.search_bands(&ratios).unwrap();
    let lower = energies.energy_at(blown_up - 1);
    let upper = energies.energy_at(blown_up + 1);
    for roots in bands {
        assert!(roots.iter().all(|&root| root <= lower || root >= upper));
    }
}
