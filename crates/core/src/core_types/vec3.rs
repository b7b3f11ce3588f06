//! Vector type alias for 3D positions and per-axis sizes.

use nalgebra::Vector3;

/// 3D vector type for physical positions (m) and per-axis cell sizes (m).
///
/// This is a simple alias for `nalgebra::Vector3<f32>`, used for grid
/// origins, cell corners and centres, and source locations.
pub type Vec3 = Vector3<f32>;
