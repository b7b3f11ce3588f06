//! Per-cell pollutant state.
//!
//! A cell knows nothing about where it sits; the grid owns all spatial
//! relationships. Concentration is in particles per cubic metre, rate in
//! particles per cubic metre per second.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Pollutant concentration of one grid volume plus its pending rate of change.
///
/// `concentration` is never negative when observed. `rate` accumulates any
/// number of contributions during a step and is consumed by [`Cell::commit`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Cell {
    /// Pollutant concentration (particles/m³)
    concentration: f32,
    /// Accumulated rate of change for the current step (particles/m³/s)
    rate: f32,
}

impl Cell {
    /// Create an empty cell
    pub fn new() -> Self {
        Cell::default()
    }

    /// Create a cell holding an initial concentration (clamped to zero if negative)
    pub fn with_concentration(concentration: f32) -> Self {
        let mut cell = Cell {
            concentration,
            rate: 0.0,
        };
        cell.clamp_negative();
        cell
    }

    /// Get pollutant concentration (particles/m³)
    pub fn concentration(&self) -> f32 {
        self.concentration
    }

    /// Get the pending rate of change (particles/m³/s)
    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Add a contribution of either sign to the pending rate.
    ///
    /// No clamping happens here; a transiently negative rate is expected.
    #[inline]
    pub fn accumulate_rate(&mut self, delta: f32) {
        self.rate += delta;
    }

    /// Change concentration immediately, bypassing the rate mechanism.
    ///
    /// Meant for scripted one-off perturbations between steps.
    pub fn set_concentration_delta(&mut self, delta: f32) {
        self.concentration += delta;
        self.clamp_negative();
    }

    /// Integrate the pending rate over `dt` seconds and reset it.
    ///
    /// Must run exactly once per step, after every updater for that step.
    #[inline]
    pub fn commit(&mut self, dt: f32) {
        self.concentration += self.rate * dt;
        self.rate = 0.0;
        self.clamp_negative();
    }

    /// Negative and NaN concentrations become zero
    #[inline]
    fn clamp_negative(&mut self) {
        self.concentration = self.concentration.max(0.0);
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rate == 0.0 {
            write!(f, "({})", self.concentration)
        } else {
            write!(f, "({},{})", self.concentration, self.rate)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_cell_is_empty() {
        let cell = Cell::new();
        assert_eq!(cell.concentration(), 0.0);
        assert_eq!(cell.rate(), 0.0);
    }

    #[test]
    fn test_initial_concentration_is_clamped() {
        assert_eq!(Cell::with_concentration(-4.0).concentration(), 0.0);
        assert_eq!(Cell::with_concentration(2.5).concentration(), 2.5);
        assert_eq!(Cell::with_concentration(f32::NAN).concentration(), 0.0);
    }

    #[test]
    fn test_nan_never_reaches_concentration() {
        let mut cell = Cell::with_concentration(1.0);
        cell.set_concentration_delta(f32::NAN);
        assert_eq!(cell.concentration(), 0.0);

        cell.accumulate_rate(f32::NAN);
        cell.commit(0.1);
        assert_eq!(cell.concentration(), 0.0);
        assert_eq!(cell.rate(), 0.0);
    }

    #[test]
    fn test_accumulate_rate_sums_contributions() {
        let mut cell = Cell::new();
        cell.accumulate_rate(0.5);
        cell.accumulate_rate(-2.0);
        cell.accumulate_rate(0.25);

        // Negative transient rate is allowed, concentration untouched
        assert_relative_eq!(cell.rate(), -1.25);
        assert_eq!(cell.concentration(), 0.0);
    }

    #[test]
    fn test_commit_integrates_and_resets() {
        let mut cell = Cell::with_concentration(1.0);
        cell.accumulate_rate(2.0);
        cell.commit(0.25);

        assert_relative_eq!(cell.concentration(), 1.5);
        assert_eq!(cell.rate(), 0.0);
    }

    #[test]
    fn test_commit_clamps_to_zero() {
        let mut cell = Cell::with_concentration(1.0);
        cell.accumulate_rate(-100.0);
        cell.commit(1.0);

        assert_eq!(cell.concentration(), 0.0);
        assert_eq!(cell.rate(), 0.0);
    }

    #[test]
    fn test_commit_matches_closed_form() {
        // concentration = max(0, c + r*dt), rate = 0
        for &(c, r, dt) in &[
            (0.0_f32, 1.0_f32, 0.1_f32),
            (3.0, -1.0, 2.0),
            (3.0, -1.0, 4.0),
            (0.5, 0.0, 10.0),
        ] {
            let mut cell = Cell::with_concentration(c);
            cell.accumulate_rate(r);
            cell.commit(dt);
            assert_relative_eq!(cell.concentration(), (c + r * dt).max(0.0));
            assert_eq!(cell.rate(), 0.0);
        }
    }

    #[test]
    fn test_large_negative_delta_clamps() {
        let mut cell = Cell::with_concentration(0.3);
        cell.set_concentration_delta(-1.0e9);
        assert_eq!(cell.concentration(), 0.0);

        cell.set_concentration_delta(0.75);
        assert_relative_eq!(cell.concentration(), 0.75);
        assert_eq!(cell.rate(), 0.0);
    }

    #[test]
    fn test_display_forms() {
        let mut cell = Cell::with_concentration(1.5);
        assert_eq!(cell.to_string(), "(1.5)");

        cell.accumulate_rate(-0.5);
        assert_eq!(cell.to_string(), "(1.5,-0.5)");
    }
}
