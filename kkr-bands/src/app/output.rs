use crate::band_structure::Bands;
use crate::constants::HARTREE_IN_EV;
use crate::error::IOError;
use std::io::Write;
use std::path::Path;

/// Writes every band energy as a row of `bands.csv` and the symmetry point positions to
/// `symmetry_points.csv` in `directory`, creating it when missing
pub(crate) fn write_bands(bands: &Bands, directory: &Path) -> Result<(), IOError> {
    if !directory.exists() {
        std::fs::create_dir_all(directory)?;
    }

    let mut file = std::fs::File::create(directory.join("bands.csv"))?;
    writeln!(file, "k_index, distance, energy_hartree, energy_ev")?;
    for (index, (distance, energies)) in bands
        .distances()
        .iter()
        .zip(bands.energies().iter())
        .enumerate()
    {
        for energy in energies {
            writeln!(
                file,
                "{}, {}, {}, {}",
                index,
                distance,
                energy,
                energy * HARTREE_IN_EV
            )?;
        }
    }

    let mut file = std::fs::File::create(directory.join("symmetry_points.csv"))?;
    writeln!(file, "label, k_index")?;
    for marker in bands.markers() {
        writeln!(file, "{}, {}", marker.label, marker.index)?;
    }
    Ok(())
}
