//! Terminal sink that reports visible light changes through the logger.

use anyhow::Result;

use super::{LightFrame, LightSink};

/// Logs a frame whenever its visible output changes: the 8-bit color or the
/// intensity at two decimals. Rotation updates are folded into the next printed line.
#[derive(Debug, Default)]
pub struct ConsoleSink {
    last_color: Option<String>,
    last_intensity: Option<i64>,
    last_rotation: Option<f64>,
    frames: u64,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames received so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl LightSink for ConsoleSink {
    fn apply(&mut self, frame: &LightFrame) -> Result<()> {
        self.frames += 1;
        if let Some(rotation) = frame.rotation {
            self.last_rotation = Some(rotation);
        }

        let color = frame.color.to_hex();
        let intensity = (frame.intensity * 100.0).round() as i64;
        if self.last_color.as_deref() == Some(color.as_str())
            && self.last_intensity == Some(intensity)
        {
            return Ok(());
        }

        match self.last_rotation {
            Some(rotation) => log_indented!(
                "color {color}  intensity {:.2}  rotation {rotation:.1}°",
                frame.intensity
            ),
            None => log_indented!("color {color}  intensity {:.2}", frame.intensity),
        }

        self.last_color = Some(color);
        self.last_intensity = Some(intensity);
        Ok(())
    }
}
