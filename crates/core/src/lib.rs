//! Pollution Simulation Core Library
//!
//! Discrete-time, discrete-space simulation of a pollutant diffusing through a
//! 3D volume. Physical effects are expressed as [`Updater`]s that add into each
//! cell's rate of change; a step applies every updater across the grid and then
//! commits all cells at once.
//!
//! ## Units
//!
//! - Distance: metres
//! - Time: seconds
//! - Concentration: particles per cubic metre
//!
//! ## Example
//!
//! ```rust
//! use pollution_sim_core::{Blur, PollutionGrid, PollutionSimulation, Source, Vec3};
//!
//! let grid = PollutionGrid::new(10, 10, 10, Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0)).unwrap();
//! let mut simulation = PollutionSimulation::new(grid)
//!     .with_updater(Blur::new(0.01))
//!     .with_updater(Source::new(0.05, 5.0, 5.0, 5.0, 2.0));
//!
//! let stats = simulation.run(100, 0.1);
//! assert!(stats.total_mass > 0.0);
//! ```

// Core types and utilities
pub mod core_types;
pub mod error;

// Spatial grid and the rules acting on it
pub mod grid;
pub mod updater;

// Driver loop
pub mod simulation;

// Re-export core types
pub use core_types::{Cell, CellIndex, Vec3};
pub use error::{Axis, ConfigError, GridError};
pub use grid::{GridGeometry, PollutionGrid};
pub use simulation::{
    BlurConfig, DecayConfig, GridConfig, PollutionSimulation, SimulationConfig, SimulationStats,
    SourceConfig,
};
pub use updater::{Blur, Decay, Source, Updater};
