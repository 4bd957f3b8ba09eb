use serde::{Deserialize, Serialize};
use std::fmt;

/// Segment of the day/night cycle. `Dawn` and `Dusk` are ramping periods during
/// which color and intensity move toward new targets; `Day` and `Night` are stable.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Sun rising - dawn color fading into day color, intensity climbing
    Dawn,

    /// Full daylight
    Day,

    /// Sun setting - day color fading into dusk color, intensity falling to zero
    Dusk,

    /// Sun below the horizon, no ramps running
    Night,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl Phase {
    /// Returns true if this phase runs ramps (Dawn or Dusk).
    pub fn is_transitioning(&self) -> bool {
        matches!(self, Self::Dawn | Self::Dusk)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Dawn => "Dawn",
            Self::Day => "Day",
            Self::Dusk => "Dusk",
            Self::Night => "Night",
        }
    }

    /// Returns the icon/symbol for this phase.
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Dawn => "󰖜 ",
            Self::Day => "󰖨 ",
            Self::Dusk => "󰖛 ",
            Self::Night => " ",
        }
    }

    /// Phase entered when the color ramp started in `self` completes.
    ///
    /// Only the ramping phases have an entry. A ramp resumed while the cycle sits in a
    /// stable phase settles its value without moving the cycle along.
    pub fn after_color_ramp(&self) -> Option<Phase> {
        match self {
            Self::Dawn => Some(Self::Day),
            Self::Dusk => Some(Self::Night),
            Self::Day | Self::Night => None,
        }
    }
}
