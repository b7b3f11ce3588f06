//! Pluggable rules that contribute to each cell's rate of change.
//!
//! The core abstraction is the [`Updater`] trait. A simulation step runs every
//! registered updater across the whole grid with
//! [`PollutionGrid::apply_to_all`], then commits all cells with
//! [`PollutionGrid::commit_all`].
//!
//! # Contract
//!
//! - Updaters only ever add into a cell's rate with
//!   [`Cell::accumulate_rate`](crate::Cell::accumulate_rate); they never
//!   overwrite it and never change concentration. Addition commutes, so the
//!   order in which cells and updaters are visited does not change the result.
//! - Any concentration an updater reads is the value from before the step,
//!   because commits only happen after every updater has run.
//! - Indices reached by offset arithmetic must go through the checked
//!   accessors ([`PollutionGrid::cell_at_if_valid_mut`]) or
//!   [`PollutionGrid::face_neighbors`].
//!
//! # Example
//!
//! ```rust
//! use pollution_sim_core::{Blur, PollutionGrid, Source, Updater};
//!
//! let mut grid = PollutionGrid::with_unit_cells(10, 10, 10).unwrap();
//! let blur = Blur::new(0.01);
//! let source = Source::default();
//! let updaters: [&dyn Updater; 2] = [&blur, &source];
//!
//! for _ in 0..10 {
//!     for updater in updaters {
//!         grid.apply_to_all(updater);
//!     }
//!     grid.commit_all(0.1);
//! }
//! assert!(grid.total_mass() > 0.0);
//! ```

mod blur;
mod decay;
mod source;

pub use blur::Blur;
pub use decay::Decay;
pub use source::Source;

use crate::core_types::CellIndex;
use crate::grid::PollutionGrid;
use std::fmt::Debug;

/// A rule that, given one cell's index, accumulates rate contributions into
/// that cell and/or its neighbours for the current step.
///
/// Implementations carry only immutable parameters; all per-step state lives
/// in the grid.
pub trait Updater: Debug + Send + Sync {
    /// Accumulate this rule's contribution for the cell at `index`.
    ///
    /// # Arguments
    ///
    /// * `index` - Cell being acted on; `apply_to_all` only passes valid indices
    /// * `grid` - The grid holding the cell, for neighbour access
    fn act(&self, index: CellIndex, grid: &mut PollutionGrid);

    /// Short name used in log output
    fn name(&self) -> &'static str;
}
