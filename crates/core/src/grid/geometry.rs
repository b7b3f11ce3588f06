//! Grid geometry: extents, placement in physical space, and the mapping
//! between physical coordinates and cell indices.
//!
//! Cell `(i, j, k)` occupies the axis-aligned box from
//! `origin + (i, j, k) * cell_size` to `origin + (i + 1, j + 1, k + 1) * cell_size`.
//! Cells are stored in a flat buffer with `k` varying fastest:
//! `(i * breadth + j) * height + k`.

use crate::core_types::{CellIndex, Vec3};
use crate::error::{Axis, GridError};
use serde::{Deserialize, Serialize};

/// Fixed shape and placement of a grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridGeometry {
    /// Cells along the first axis (i)
    width: usize,
    /// Cells along the second axis (j)
    breadth: usize,
    /// Cells along the third axis (k)
    height: usize,
    /// Minimum corner of cell (0, 0, 0) in metres
    origin: Vec3,
    /// Cell edge length per axis in metres
    cell_size: Vec3,
}

impl GridGeometry {
    /// Validate and build a geometry.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidExtent`] if an extent is zero or exceeds `i32::MAX`,
    /// [`GridError::TooManyCells`] if the cell count overflows `usize`,
    /// [`GridError::InvalidCellSize`] if a cell size component is not positive and finite,
    /// and [`GridError::NonFiniteOrigin`] if the origin is not finite.
    pub fn new(
        width: usize,
        breadth: usize,
        height: usize,
        origin: Vec3,
        cell_size: Vec3,
    ) -> Result<Self, GridError> {
        for (axis, value) in [
            (Axis::Width, width),
            (Axis::Breadth, breadth),
            (Axis::Height, height),
        ] {
            if value == 0 || i32::try_from(value).is_err() {
                return Err(GridError::InvalidExtent { axis, value });
            }
        }

        if width
            .checked_mul(breadth)
            .and_then(|n| n.checked_mul(height))
            .is_none()
        {
            return Err(GridError::TooManyCells {
                width,
                breadth,
                height,
            });
        }

        for (axis, value) in [
            (Axis::Width, cell_size.x),
            (Axis::Breadth, cell_size.y),
            (Axis::Height, cell_size.z),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(GridError::InvalidCellSize { axis, value });
            }
        }

        if !(origin.x.is_finite() && origin.y.is_finite() && origin.z.is_finite()) {
            return Err(GridError::NonFiniteOrigin);
        }

        Ok(GridGeometry {
            width,
            breadth,
            height,
            origin,
            cell_size,
        })
    }

    /// Geometry with the origin at zero and 1 m cubic cells.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::InvalidExtent`] if an extent is zero or exceeds `i32::MAX`.
    pub fn unit(width: usize, breadth: usize, height: usize) -> Result<Self, GridError> {
        Self::new(
            width,
            breadth,
            height,
            Vec3::zeros(),
            Vec3::new(1.0, 1.0, 1.0),
        )
    }

    /// Extents as `(width, breadth, height)` in cells
    pub fn extents(&self) -> (usize, usize, usize) {
        (self.width, self.breadth, self.height)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn breadth(&self) -> usize {
        self.breadth
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Minimum corner of the whole grid (m)
    pub fn origin(&self) -> &Vec3 {
        &self.origin
    }

    /// Per-axis cell size (m)
    pub fn cell_size(&self) -> &Vec3 {
        &self.cell_size
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.width * self.breadth * self.height
    }

    /// Always false: every validated geometry holds at least one cell
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Volume of a single cell (m³)
    pub fn cell_volume(&self) -> f32 {
        self.cell_size.x * self.cell_size.y * self.cell_size.z
    }

    /// True iff every component lies in `[0, extent)` on its axis
    #[inline]
    pub fn is_valid_index(&self, index: CellIndex) -> bool {
        index.i >= 0
            && index.j >= 0
            && index.k >= 0
            && (index.i as usize) < self.width
            && (index.j as usize) < self.breadth
            && (index.k as usize) < self.height
    }

    /// Position of `index` in the flat cell buffer, or `None` when out of range
    #[inline]
    pub fn linear_index(&self, index: CellIndex) -> Option<usize> {
        if self.is_valid_index(index) {
            Some((index.i as usize * self.breadth + index.j as usize) * self.height + index.k as usize)
        } else {
            None
        }
    }

    /// Inverse of [`linear_index`](Self::linear_index) for `n < len()`
    #[inline]
    pub fn index_from_linear(&self, n: usize) -> CellIndex {
        let k = n % self.height;
        let j = (n / self.height) % self.breadth;
        let i = n / (self.height * self.breadth);
        CellIndex::new(i as i32, j as i32, k as i32)
    }

    /// Every valid index, `i` outermost and `k` innermost (buffer order)
    pub fn indices(&self) -> impl Iterator<Item = CellIndex> {
        let geometry = *self;
        (0..geometry.len()).map(move |n| geometry.index_from_linear(n))
    }

    /// Index of the cell containing `point`: `floor((point - origin) / cell_size)` per axis.
    ///
    /// The result may be out of range; validate it before dereferencing.
    /// Components far outside the grid saturate at the `i32` limits and NaN
    /// components map to `i32::MIN`, so neither lands inside the grid.
    pub fn index_from_location(&self, point: &Vec3) -> CellIndex {
        let scaled = (point - self.origin)
            .component_div(&self.cell_size)
            .map(f32::floor);
        CellIndex::new(
            Self::saturate(scaled.x),
            Self::saturate(scaled.y),
            Self::saturate(scaled.z),
        )
    }

    #[inline]
    fn saturate(value: f32) -> i32 {
        if value.is_nan() {
            i32::MIN
        } else {
            value as i32
        }
    }

    /// Minimum corner of the cell box at `index` (m)
    pub fn corner_from_index(&self, index: CellIndex) -> Vec3 {
        let steps = Vec3::new(index.i as f32, index.j as f32, index.k as f32);
        self.origin + steps.component_mul(&self.cell_size)
    }

    /// Centre of the cell box at `index` (m)
    pub fn center_from_index(&self, index: CellIndex) -> Vec3 {
        self.corner_from_index(index) + self.cell_size * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn offset_geometry() -> GridGeometry {
        GridGeometry::new(4, 3, 2, Vec3::new(-2.0, 10.0, 0.5), Vec3::new(0.5, 2.0, 1.0)).unwrap()
    }

    #[test]
    fn test_rejects_zero_extent() {
        let err = GridGeometry::unit(4, 0, 2).unwrap_err();
        assert_eq!(
            err,
            GridError::InvalidExtent {
                axis: Axis::Breadth,
                value: 0
            }
        );
    }

    #[test]
    fn test_rejects_cell_count_overflow() {
        let err = GridGeometry::unit(1 << 30, 1 << 30, 1 << 30).unwrap_err();
        assert_eq!(
            err,
            GridError::TooManyCells {
                width: 1 << 30,
                breadth: 1 << 30,
                height: 1 << 30
            }
        );
    }

    #[test]
    fn test_rejects_bad_cell_size() {
        let err = GridGeometry::new(2, 2, 2, Vec3::zeros(), Vec3::new(1.0, 1.0, 0.0)).unwrap_err();
        assert!(matches!(
            err,
            GridError::InvalidCellSize {
                axis: Axis::Height,
                ..
            }
        ));

        let err =
            GridGeometry::new(2, 2, 2, Vec3::zeros(), Vec3::new(f32::NAN, 1.0, 1.0)).unwrap_err();
        assert!(matches!(
            err,
            GridError::InvalidCellSize {
                axis: Axis::Width,
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_non_finite_origin() {
        let err = GridGeometry::new(
            2,
            2,
            2,
            Vec3::new(0.0, f32::INFINITY, 0.0),
            Vec3::new(1.0, 1.0, 1.0),
        )
        .unwrap_err();
        assert_eq!(err, GridError::NonFiniteOrigin);
    }

    #[test]
    fn test_index_validity() {
        let geometry = offset_geometry();

        assert!(geometry.is_valid_index(CellIndex::new(0, 0, 0)));
        assert!(geometry.is_valid_index(CellIndex::new(3, 2, 1)));

        assert!(!geometry.is_valid_index(CellIndex::new(-1, 0, 0)));
        assert!(!geometry.is_valid_index(CellIndex::new(4, 0, 0)));
        assert!(!geometry.is_valid_index(CellIndex::new(0, -1, 0)));
        assert!(!geometry.is_valid_index(CellIndex::new(0, 3, 0)));
        assert!(!geometry.is_valid_index(CellIndex::new(0, 0, -1)));
        assert!(!geometry.is_valid_index(CellIndex::new(0, 0, 2)));
    }

    #[test]
    fn test_linear_index_round_trip_covers_buffer() {
        let geometry = offset_geometry();
        assert_eq!(geometry.len(), 24);

        let linear: Vec<usize> = geometry
            .indices()
            .map(|index| geometry.linear_index(index).unwrap())
            .collect();
        assert_eq!(linear, (0..24).collect::<Vec<_>>());

        assert_eq!(geometry.linear_index(CellIndex::new(0, 0, 1)), Some(1));
        assert_eq!(geometry.linear_index(CellIndex::new(0, 1, 0)), Some(2));
        assert_eq!(geometry.linear_index(CellIndex::new(1, 0, 0)), Some(6));
        assert_eq!(geometry.linear_index(CellIndex::new(4, 0, 0)), None);
    }

    #[test]
    fn test_traversal_order_is_width_then_breadth_then_height() {
        let geometry = GridGeometry::unit(2, 2, 2).unwrap();
        let order: Vec<CellIndex> = geometry.indices().collect();
        assert_eq!(order[0], CellIndex::new(0, 0, 0));
        assert_eq!(order[1], CellIndex::new(0, 0, 1));
        assert_eq!(order[2], CellIndex::new(0, 1, 0));
        assert_eq!(order[4], CellIndex::new(1, 0, 0));
        assert_eq!(order[7], CellIndex::new(1, 1, 1));
    }

    #[test]
    fn test_index_from_location_floors() {
        let geometry = offset_geometry();

        assert_eq!(
            geometry.index_from_location(&Vec3::new(-2.0, 10.0, 0.5)),
            CellIndex::new(0, 0, 0)
        );
        assert_eq!(
            geometry.index_from_location(&Vec3::new(-0.6, 13.9, 2.0)),
            CellIndex::new(2, 1, 1)
        );
        // Below the origin floors to negative indices
        assert_eq!(
            geometry.index_from_location(&Vec3::new(-2.1, 9.0, 0.0)),
            CellIndex::new(-1, -1, -1)
        );
        // Past the far faces
        assert_eq!(
            geometry.index_from_location(&Vec3::new(0.0, 16.0, 2.5)),
            CellIndex::new(4, 3, 2)
        );
    }

    #[test]
    fn test_index_from_location_non_finite() {
        let geometry = offset_geometry();

        let index = geometry.index_from_location(&Vec3::new(f32::NAN, f32::NAN, f32::NAN));
        assert_eq!(index, CellIndex::new(i32::MIN, i32::MIN, i32::MIN));
        assert!(!geometry.is_valid_index(index));

        let index = geometry.index_from_location(&Vec3::new(1e20, f32::NEG_INFINITY, 1.0));
        assert_eq!(index, CellIndex::new(i32::MAX, i32::MIN, 0));
        assert!(!geometry.is_valid_index(index));
    }

    #[test]
    fn test_corner_and_center() {
        let geometry = offset_geometry();
        let index = CellIndex::new(2, 1, 1);

        let corner = geometry.corner_from_index(index);
        assert_relative_eq!(corner, Vec3::new(-1.0, 12.0, 1.5));

        let center = geometry.center_from_index(index);
        assert_relative_eq!(center, Vec3::new(-0.75, 13.0, 2.0));

        // The centre maps back to its own cell
        assert_eq!(geometry.index_from_location(&center), index);
    }

    #[test]
    fn test_cell_volume() {
        assert_relative_eq!(offset_geometry().cell_volume(), 1.0);
        assert_relative_eq!(GridGeometry::unit(1, 1, 1).unwrap().cell_volume(), 1.0);
    }
}
