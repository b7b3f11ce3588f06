//! First-order loss of pollutant.

use crate::core_types::CellIndex;
use crate::grid::PollutionGrid;
use crate::updater::Updater;

/// Removes pollutant in proportion to the cell's own concentration.
///
/// Contributes `-rate * concentration` to the acted cell. Concentration is
/// read from before the step, so the result does not depend on visit order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decay {
    /// Fractional loss per second (1/s)
    rate: f32,
}

impl Decay {
    pub fn new(rate: f32) -> Self {
        Decay { rate }
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }
}

impl Updater for Decay {
    fn act(&self, index: CellIndex, grid: &mut PollutionGrid) {
        if let Some(cell) = grid.cell_at_if_valid_mut(index) {
            let loss = self.rate * cell.concentration();
            cell.accumulate_rate(-loss);
        }
    }

    fn name(&self) -> &'static str {
        "decay"
    }
}
