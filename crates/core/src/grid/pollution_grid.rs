//! Dense 3D grid of pollutant cells.
//!
//! The grid owns every [`Cell`] in one flat buffer and does all spatial
//! reasoning on the cells' behalf: coordinate conversion, bounds checks,
//! neighbour lookup, and driving updaters and commits across the whole volume.

use crate::core_types::{Cell, CellIndex, Vec3};
use crate::error::GridError;
use crate::grid::geometry::GridGeometry;
use crate::grid::neighbors::{ALL_OFFSETS, FACE_OFFSETS};
use crate::updater::Updater;
use serde::{Deserialize, Serialize};
use tracing::{info, trace};

/// Fixed-size 3D arrangement of cells plus its coordinate system
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollutionGrid {
    geometry: GridGeometry,
    /// Cells in buffer order, see [`GridGeometry::linear_index`]
    cells: Vec<Cell>,
}

impl PollutionGrid {
    /// Create a grid of empty cells.
    ///
    /// # Arguments
    ///
    /// * `width`, `breadth`, `height` - Extents in cells along i, j, k
    /// * `origin` - Minimum corner of cell `(0, 0, 0)` in metres
    /// * `cell_size` - Per-axis cell edge length in metres
    ///
    /// # Errors
    ///
    /// Returns a [`GridError`] when the extents or geometry are invalid.
    pub fn new(
        width: usize,
        breadth: usize,
        height: usize,
        origin: Vec3,
        cell_size: Vec3,
    ) -> Result<Self, GridError> {
        let geometry = GridGeometry::new(width, breadth, height, origin, cell_size)?;
        Ok(Self::from_geometry(geometry))
    }

    /// Create a grid with the origin at zero and 1 m cubic cells.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidExtent`] when an extent is zero.
    pub fn with_unit_cells(width: usize, breadth: usize, height: usize) -> Result<Self, GridError> {
        Ok(Self::from_geometry(GridGeometry::unit(width, breadth, height)?))
    }

    /// Create a grid of empty cells over an already validated geometry
    pub fn from_geometry(geometry: GridGeometry) -> Self {
        let (width, breadth, height) = geometry.extents();
        info!(
            "Pollution grid initialized: {}x{}x{} cells, cell_size=({:.3}, {:.3}, {:.3})m",
            width,
            breadth,
            height,
            geometry.cell_size().x,
            geometry.cell_size().y,
            geometry.cell_size().z
        );

        PollutionGrid {
            cells: vec![Cell::new(); geometry.len()],
            geometry,
        }
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always false for a constructed grid
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Volume of a single cell (m³)
    pub fn cell_volume(&self) -> f32 {
        self.geometry.cell_volume()
    }

    // Coordinate conversion

    /// See [`GridGeometry::index_from_location`]
    pub fn index_from_location(&self, point: &Vec3) -> CellIndex {
        self.geometry.index_from_location(point)
    }

    /// See [`GridGeometry::corner_from_index`]
    pub fn corner_from_index(&self, index: CellIndex) -> Vec3 {
        self.geometry.corner_from_index(index)
    }

    /// See [`GridGeometry::center_from_index`]
    pub fn center_from_index(&self, index: CellIndex) -> Vec3 {
        self.geometry.center_from_index(index)
    }

    /// See [`GridGeometry::is_valid_index`]
    #[inline]
    pub fn is_valid_index(&self, index: CellIndex) -> bool {
        self.geometry.is_valid_index(index)
    }

    // Cell lookup

    /// Get the cell at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside the grid. Use [`cell_at_if_valid`](Self::cell_at_if_valid)
    /// for indices produced by offset arithmetic.
    #[inline]
    pub fn cell_at(&self, index: CellIndex) -> &Cell {
        let n = self.expect_linear(index);
        &self.cells[n]
    }

    /// Get the cell at `index` mutably.
    ///
    /// # Panics
    ///
    /// Panics if `index` is outside the grid.
    #[inline]
    pub fn cell_at_mut(&mut self, index: CellIndex) -> &mut Cell {
        let n = self.expect_linear(index);
        &mut self.cells[n]
    }

    /// Get the cell at `index`, or `None` if the index is outside the grid
    #[inline]
    pub fn cell_at_if_valid(&self, index: CellIndex) -> Option<&Cell> {
        let n = self.geometry.linear_index(index)?;
        Some(&self.cells[n])
    }

    /// Get the cell at `index` mutably, or `None` if the index is outside the grid
    #[inline]
    pub fn cell_at_if_valid_mut(&mut self, index: CellIndex) -> Option<&mut Cell> {
        let n = self.geometry.linear_index(index)?;
        Some(&mut self.cells[n])
    }

    fn expect_linear(&self, index: CellIndex) -> usize {
        let Some(n) = self.geometry.linear_index(index) else {
            let (width, breadth, height) = self.geometry.extents();
            panic!(
                "cell index {} out of range for {}x{}x{} grid",
                index, width, breadth, height
            );
        };
        n
    }

    // Neighbour queries

    /// Indices of the existing face neighbours of `index`.
    ///
    /// Yields up to six indices in `+x, -x, +y, -y, +z, -z` order. Offsets that
    /// leave the grid (or the `i32` range) are skipped; there is no wrap-around
    /// or padding. The
    /// iterator does not borrow the grid, so callers may mutate cells while
    /// walking it.
    pub fn face_neighbors(&self, index: CellIndex) -> impl Iterator<Item = CellIndex> {
        let geometry = self.geometry;
        FACE_OFFSETS
            .into_iter()
            .filter_map(move |offset| index.checked_offset(offset))
            .filter(move |neighbor| geometry.is_valid_index(*neighbor))
    }

    /// The existing face-neighbour cells of `index`, in the order of [`face_neighbors`](Self::face_neighbors)
    pub fn face_neighbor_cells(&self, index: CellIndex) -> impl Iterator<Item = &Cell> + '_ {
        self.face_neighbors(index).map(move |n| self.cell_at(n))
    }

    /// Indices of the existing face, edge and corner neighbours of `index` (up to 26)
    pub fn all_neighbors(&self, index: CellIndex) -> impl Iterator<Item = CellIndex> {
        let geometry = self.geometry;
        ALL_OFFSETS
            .into_iter()
            .filter_map(move |offset| index.checked_offset(offset))
            .filter(move |neighbor| geometry.is_valid_index(*neighbor))
    }

    // Bulk driving

    /// Run `updater` once for every cell, `i` outermost and `k` innermost.
    ///
    /// Updaters only add into `rate`, so the visiting order has no effect on the
    /// accumulated result. Concentrations are left untouched.
    pub fn apply_to_all<U: Updater + ?Sized>(&mut self, updater: &U) {
        trace!(
            "Applying updater '{}' to {} cells",
            updater.name(),
            self.cells.len()
        );
        for n in 0..self.cells.len() {
            let index = self.geometry.index_from_linear(n);
            updater.act(index, self);
        }
    }

    /// Commit every cell: integrate its rate over `dt` seconds and reset the rate
    pub fn commit_all(&mut self, dt: f32) {
        for cell in &mut self.cells {
            cell.commit(dt);
        }
    }

    /// Instantly add `delta` to the concentration of the cell containing `point`.
    ///
    /// Returns `false` and changes nothing when the point lies outside the grid.
    pub fn perturb_at(&mut self, point: &Vec3, delta: f32) -> bool {
        let index = self.index_from_location(point);
        if let Some(cell) = self.cell_at_if_valid_mut(index) {
            cell.set_concentration_delta(delta);
            true
        } else {
            false
        }
    }

    // Read accessors

    /// All cells in buffer order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Every valid index in traversal order
    pub fn indices(&self) -> impl Iterator<Item = CellIndex> {
        self.geometry.indices()
    }

    /// Every cell together with its index, in traversal order
    pub fn iter(&self) -> impl Iterator<Item = (CellIndex, &Cell)> + '_ {
        self.indices().zip(self.cells.iter())
    }

    /// Sum of all concentrations (particles/m³)
    pub fn total_concentration(&self) -> f32 {
        self.cells.iter().map(Cell::concentration).sum()
    }

    /// Total pollutant amount: concentration times cell volume, summed (particles)
    pub fn total_mass(&self) -> f32 {
        self.total_concentration() * self.cell_volume()
    }

    /// Highest concentration of any cell (particles/m³)
    pub fn max_concentration(&self) -> f32 {
        self.cells
            .iter()
            .map(Cell::concentration)
            .fold(0.0, f32::max)
    }
}
