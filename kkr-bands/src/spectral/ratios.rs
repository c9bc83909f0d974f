use crate::constants::BLOWUP_RATIO;
use ndarray::{Array2, ArrayView1, ArrayView2, ArrayViewMut2};

/// Logarithmic derivatives `u'(R)/u(R)` indexed by energy sample and angular momentum
///
/// Entries start out infinite, so rows left unwritten by an interrupted integration read as
/// blowups.
#[derive(Clone, Debug)]
pub struct RatioTable {
    values: Array2<f64>,
}

impl RatioTable {
    pub fn new(number_of_energies: usize, l_max: usize) -> Self {
        Self {
            values: Array2::from_elem((number_of_energies, l_max + 1), f64::INFINITY),
        }
    }

    pub fn number_of_energies(&self) -> usize {
        self.values.nrows()
    }

    pub fn row(&self, energy_index: usize) -> ArrayView1<'_, f64> {
        self.values.row(energy_index)
    }

    pub fn values(&self) -> ArrayView2<'_, f64> {
        self.values.view()
    }

    pub(crate) fn values_mut(&mut self) -> ArrayViewMut2<'_, f64> {
        self.values.view_mut()
    }

    /// Whether any angular momentum channel diverged at this energy
    pub fn is_blowup(&self, energy_index: usize) -> bool {
        self.values
            .row(energy_index)
            .iter()
            .any(|ratio| !ratio.is_finite() || ratio.abs() > BLOWUP_RATIO)
    }
}

impl From<Array2<f64>> for RatioTable {
    fn from(values: Array2<f64>) -> Self {
        Self { values }
    }
}

#[cfg(test)]
mod test {
    use super::RatioTable;
    use ndarray::array;

    #[test]
    fn unwritten_rows_are_blowups() {
        let table = RatioTable::new(3, 2);
        assert!((0..3).all(|index| table.is_blowup(index)));
    }

    #[test]
    fn divergent_or_oversized_entries_are_blowups() {
        let table = RatioTable::from(array![
            [0.1, 0.2, 0.3],
            [0.1, f64::NAN, 0.3],
            [0.1, 0.2, -301.],
            [f64::INFINITY, 0.2, 0.3]
        ]);
        assert!(!table.is_blowup(0));
        assert!(table.is_blowup(1));
        assert!(table.is_blowup(2));
        assert!(table.is_blowup(3));
        assert_eq!(table.row(0).len(), 3);
    }

    #[test]
    fn writes_through_the_mutable_view_are_visible_in_rows() {
        let mut table = RatioTable::new(2, 1);
        table.values_mut().row_mut(1).assign(&array![0.5, -0.25]);
        assert_eq!(table.row(1), array![0.5, -0.25]);
        assert_eq!(table.values().dim(), (2, 2));
        assert!(table.is_blowup(0));
        assert!(!table.is_blowup(1));
    }
}
