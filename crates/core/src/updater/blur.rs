//! Diffusive smoothing through cell faces.

use crate::core_types::CellIndex;
use crate::grid::PollutionGrid;
use crate::updater::Updater;

/// Isotropic diffusion between face neighbours.
///
/// Each application takes `6 * blur` from the acted cell and gives `blur` to
/// every face neighbour that exists. Cells on the boundary have fewer than six
/// neighbours, so pollutant leaks out of the grid there: there is no
/// reflection and no wrap-around.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blur {
    /// Exchange rate per face (particles/m³/s)
    blur: f32,
}

impl Blur {
    /// Rate used by [`Blur::default`]
    pub const DEFAULT_BLUR: f32 = 0.01;

    /// Number of faces of a cell
    const FACES: f32 = 6.0;

    /// Create a blur updater; `blur` should be positive
    pub fn new(blur: f32) -> Self {
        Blur { blur }
    }

    pub fn blur(&self) -> f32 {
        self.blur
    }
}

impl Default for Blur {
    fn default() -> Self {
        Blur::new(Self::DEFAULT_BLUR)
    }
}

impl Updater for Blur {
    fn act(&self, index: CellIndex, grid: &mut PollutionGrid) {
        let Some(cell) = grid.cell_at_if_valid_mut(index) else {
            return;
        };
        cell.accumulate_rate(-Self::FACES * self.blur);

        for neighbor in grid.face_neighbors(index) {
            grid.cell_at_mut(neighbor).accumulate_rate(self.blur);
        }
    }

    fn name(&self) -> &'static str {
        "blur"
    }
}
