//! Light sinks: consumers of the per-tick light frame.
//!
//! The cycle never touches a physical light. Each tick it hands a [`LightFrame`] to a
//! [`LightSink`], which applies it to whatever the host renders (a scene light, a
//! terminal, a JSON stream).

pub mod console;
pub mod json;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::cycle::color::Rgb;

pub use console::ConsoleSink;
pub use json::JsonLinesSink;

/// Values produced by one tick of the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LightFrame {
    /// Rotation around the sun's axis in degrees, or `None` when no visual rotation
    /// is due this tick (sub-threshold movement or sun below the horizon).
    pub rotation: Option<f64>,
    pub color: Rgb,
    pub intensity: f64,
}

/// Destination for light frames.
#[cfg_attr(test, mockall::automock)]
pub trait LightSink {
    /// Apply one frame to the light.
    fn apply(&mut self, frame: &LightFrame) -> Result<()>;
}
