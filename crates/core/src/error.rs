//! Error types for grid construction and simulation configuration.
//!
//! Stepping a simulation never fails; only building one can.

use thiserror::Error;

/// Axis of the grid, used to point at the offending value in errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// First index component (i, x)
    Width,
    /// Second index component (j, y)
    Breadth,
    /// Third index component (k, z)
    Height,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Axis::Width => "width",
            Axis::Breadth => "breadth",
            Axis::Height => "height",
        };
        f.write_str(name)
    }
}

/// Invalid grid geometry
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    /// An extent was zero or too large to index with `i32`
    #[error("grid {axis} must be between 1 and {max} cells, got {value}", max = i32::MAX)]
    InvalidExtent { axis: Axis, value: usize },

    /// A cell size was not strictly positive and finite
    #[error("cell size along {axis} must be positive and finite, got {value}")]
    InvalidCellSize { axis: Axis, value: f32 },

    /// The extents are individually valid but their product overflows `usize`
    #[error("grid of {width}x{breadth}x{height} cells is too large to allocate")]
    TooManyCells {
        width: usize,
        breadth: usize,
        height: usize,
    },

    /// The origin contained NaN or an infinity
    #[error("grid origin must be finite")]
    NonFiniteOrigin,
}

/// Invalid simulation configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid grid: {0}")]
    Grid(#[from] GridError),

    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(f32),

    #[error("blur rate must be positive and finite, got {0}")]
    InvalidBlur(f32),

    #[error("source radius must be non-negative and finite, got {0}")]
    InvalidRadius(f32),

    #[error("decay rate must be non-negative and finite, got {0}")]
    InvalidDecay(f32),
}
