//! Grid geometry, neighbour topology and the cell grid itself

pub mod geometry;
pub mod neighbors;
pub mod pollution_grid;

// Re-export main types
pub use geometry::GridGeometry;
pub use neighbors::{ALL_OFFSETS, FACE_OFFSETS};
pub use pollution_grid::PollutionGrid;
