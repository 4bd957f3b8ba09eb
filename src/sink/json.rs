//! Machine-readable sink writing one JSON object per frame.

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;

use super::{LightFrame, LightSink};

#[derive(Serialize)]
struct FrameLine<'a> {
    tick: u64,
    #[serde(flatten)]
    frame: &'a LightFrame,
}

/// Writes frames as JSON lines (`{"tick":1,"rotation":0.0,"color":{...},"intensity":0.0}`).
pub struct JsonLinesSink<W: Write> {
    writer: W,
    tick: u64,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, tick: 0 }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> LightSink for JsonLinesSink<W> {
    fn apply(&mut self, frame: &LightFrame) -> Result<()> {
        self.tick += 1;
        let line = FrameLine {
            tick: self.tick,
            frame,
        };
        serde_json::to_writer(&mut self.writer, &line).context("Failed to encode light frame")?;
        self.writer
            .write_all(b"\n")
            .context("Failed to write light frame")?;
        Ok(())
    }
}
