use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::color::Rgb;
use super::phase::Phase;

/// Cycle state that survives a restart.
///
/// Only what is needed to continue the cycle is stored: the phase clock, the phase and
/// both ramps' current/desired values. Progress inside a ramp is not stored: a ramp
/// short of its target restarts from the saved current value on restore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    pub rotated_angle: f64,
    pub phase: Phase,
    pub current_color: Rgb,
    pub desired_color: Rgb,
    pub current_intensity: f64,
    pub desired_intensity: f64,
    /// `false` forces a fresh dawn regardless of the other fields.
    pub initialized: bool,
    /// Dawn was triggered but its ramps are still held back by the dawn hour.
    #[serde(default)]
    pub awaiting_dawn_hour: bool,
}

impl PersistedState {
    /// Reject values that cannot come from a running cycle.
    pub fn validate(&self) -> Result<()> {
        let numbers = [
            ("rotated_angle", self.rotated_angle),
            ("current_intensity", self.current_intensity),
            ("desired_intensity", self.desired_intensity),
        ];
        for (name, value) in numbers {
            if !value.is_finite() || value < 0.0 {
                anyhow::bail!("Persisted {} must be a non-negative number (got {})", name, value);
            }
        }

        for (name, color) in [
            ("current_color", self.current_color),
            ("desired_color", self.desired_color),
        ] {
            if color.channels().iter().any(|c| !c.is_finite()) {
                anyhow::bail!("Persisted {} has a non-finite channel", name);
            }
        }

        Ok(())
    }
}
