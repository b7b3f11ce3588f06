//! Localised constant injection, like a smokestack.

use crate::core_types::{CellIndex, Vec3};
use crate::grid::PollutionGrid;
use crate::updater::Updater;

/// Ball-shaped pollutant source.
///
/// Every cell whose centre lies inside the ball (boundary included) gains
/// `pollution` rate each step. A radius too small to contain any cell centre is
/// legal and injects nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Source {
    /// Injection rate per covered cell (particles/m³/s)
    pollution: f32,
    /// Ball centre (m)
    center: Vec3,
    radius: f32,
    /// Cached `radius²`, compared against squared distances
    radius_squared: f32,
}

impl Source {
    pub const DEFAULT_POLLUTION: f32 = 0.05;
    pub const DEFAULT_X: f32 = 5.0;
    pub const DEFAULT_Y: f32 = 1.0;
    pub const DEFAULT_Z: f32 = 2.0;
    pub const DEFAULT_RADIUS: f32 = 2.0;

    /// Create a source of `pollution` rate centred at `(x, y, z)` with the given radius
    pub fn new(pollution: f32, x: f32, y: f32, z: f32, radius: f32) -> Self {
        Self::at(pollution, Vec3::new(x, y, z), radius)
    }

    /// Create a source centred at `center`
    pub fn at(pollution: f32, center: Vec3, radius: f32) -> Self {
        Source {
            pollution,
            center,
            radius,
            radius_squared: radius * radius,
        }
    }

    pub fn pollution(&self) -> f32 {
        self.pollution
    }

    pub fn center(&self) -> &Vec3 {
        &self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// True if `point` lies inside the ball or on its surface
    #[inline]
    pub fn contains(&self, point: &Vec3) -> bool {
        (point - self.center).norm_squared() <= self.radius_squared
    }
}

impl Default for Source {
    fn default() -> Self {
        Source::new(
            Self::DEFAULT_POLLUTION,
            Self::DEFAULT_X,
            Self::DEFAULT_Y,
            Self::DEFAULT_Z,
            Self::DEFAULT_RADIUS,
        )
    }
}

impl Updater for Source {
    fn act(&self, index: CellIndex, grid: &mut PollutionGrid) {
        let center = grid.center_from_index(index);
        if !self.contains(&center) {
            return;
        }
        if let Some(cell) = grid.cell_at_if_valid_mut(index) {
            cell.accumulate_rate(self.pollution);
        }
    }

    fn name(&self) -> &'static str {
        "source"
    }
}
