//! Simulation driver and configuration

pub mod config;
pub mod pollution_simulation;

pub use config::{BlurConfig, DecayConfig, GridConfig, SimulationConfig, SourceConfig};
pub use pollution_simulation::{PollutionSimulation, SimulationStats};
