//! Driver loop over a pollution grid.

use crate::grid::PollutionGrid;
use crate::updater::Updater;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// Summary of a simulation's current state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationStats {
    /// Steps completed
    pub steps: u64,
    /// Simulated time (s)
    pub elapsed: f32,
    /// Total pollutant amount, concentration times cell volume (particles)
    pub total_mass: f32,
    /// Highest concentration of any cell (particles/m³)
    pub max_concentration: f32,
}

impl fmt::Display for SimulationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "step {:>6}  t={:>8.2}s  total={:.4}  max={:.4}",
            self.steps, self.elapsed, self.total_mass, self.max_concentration
        )
    }
}

/// Owns a grid and an ordered list of updaters and advances them in fixed steps.
///
/// Each step has two strictly ordered phases: every updater is applied across
/// the whole grid (rates accumulate, concentrations stay frozen), then every
/// cell commits.
#[derive(Debug)]
pub struct PollutionSimulation {
    grid: PollutionGrid,
    updaters: Vec<Box<dyn Updater>>,
    steps: u64,
    elapsed: f32,
}

impl PollutionSimulation {
    /// Create a simulation with no updaters
    pub fn new(grid: PollutionGrid) -> Self {
        info!("Creating pollution simulation over {} cells", grid.len());
        PollutionSimulation {
            grid,
            updaters: Vec::new(),
            steps: 0,
            elapsed: 0.0,
        }
    }

    /// Register an updater; updaters run in registration order
    pub fn add_updater(&mut self, updater: Box<dyn Updater>) {
        debug!(
            "Registered updater '{}' ({} total)",
            updater.name(),
            self.updaters.len() + 1
        );
        self.updaters.push(updater);
    }

    /// Builder form of [`add_updater`](Self::add_updater)
    pub fn with_updater(mut self, updater: impl Updater + 'static) -> Self {
        self.add_updater(Box::new(updater));
        self
    }

    pub fn updaters(&self) -> &[Box<dyn Updater>] {
        &self.updaters
    }

    pub fn grid(&self) -> &PollutionGrid {
        &self.grid
    }

    /// Mutable grid access for scripted perturbations between steps
    pub fn grid_mut(&mut self) -> &mut PollutionGrid {
        &mut self.grid
    }

    pub fn into_grid(self) -> PollutionGrid {
        self.grid
    }

    /// Steps completed so far
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Simulated time so far (s)
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Advance by one step of `dt` seconds
    pub fn step(&mut self, dt: f32) {
        for updater in &self.updaters {
            self.grid.apply_to_all(updater.as_ref());
        }
        self.grid.commit_all(dt);

        self.steps += 1;
        self.elapsed += dt;

        debug!(
            "Simulation step {}: t={:.2}s, total_mass={:.4}",
            self.steps,
            self.elapsed,
            self.grid.total_mass()
        );
    }

    /// Advance by `steps` steps of `dt` seconds and return the final statistics
    pub fn run(&mut self, steps: u32, dt: f32) -> SimulationStats {
        for _ in 0..steps {
            self.step(dt);
        }

        let stats = self.stats();
        info!(
            "Run complete: {} steps, t={:.2}s, total_mass={:.4}, max={:.4}",
            stats.steps, stats.elapsed, stats.total_mass, stats.max_concentration
        );
        stats
    }

    pub fn stats(&self) -> SimulationStats {
        SimulationStats {
            steps: self.steps,
            elapsed: self.elapsed,
            total_mass: self.grid.total_mass(),
            max_concentration: self.grid.max_concentration(),
        }
    }
}
