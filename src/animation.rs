use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// Grid cell of an atlas, row runs down the image and col runs across
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellCoord {
    pub row: u32,
    pub col: u32,
}

impl CellCoord {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl From<(u32, u32)> for CellCoord {
    fn from((row, col): (u32, u32)) -> Self {
        Self { row, col }
    }
}

/// How an animation consumes accumulated time
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvanceMode {
    /// Step once per elapsed interval, a long tick skips frames
    #[default]
    CatchUp,
    /// Step at most once per call, leftover time stays in the accumulator
    SingleStep,
}

/// Frame cycle of a sprite
///
/// Frames and their offsets are only appended together, so both lists always
/// have the same length and `index < max_index` holds whenever there is a
/// frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    frames: Vec<CellCoord>,
    offsets: Vec<Vec2>,
    index: usize,
    cumu_dt: f32,
    interval: f32,
    mode: AdvanceMode,
}

impl Animation {
    /// Build an empty animation, `interval` is in seconds
    pub fn new(interval: f32) -> Result<Self, Error> {
        if !interval.is_finite() || interval <= 0.0 {
            return Err(Error::InvalidInterval(interval));
        }
        Ok(Self {
            frames: Vec::new(),
            offsets: Vec::new(),
            index: 0,
            cumu_dt: 0.0,
            interval,
            mode: AdvanceMode::default(),
        })
    }

    pub fn with_mode(mut self, mode: AdvanceMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn set_mode(&mut self, mode: AdvanceMode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> AdvanceMode {
        self.mode
    }

    /// Append a frame with zero offset
    pub fn push_frame(&mut self, cell: impl Into<CellCoord>) {
        self.push_frame_with_offset(cell, Vec2::ZERO);
    }

    pub fn push_frame_with_offset(&mut self, cell: impl Into<CellCoord>, offset: Vec2) {
        self.frames.push(cell.into());
        self.offsets.push(offset);
    }

    /// Override the offset of an existing frame
    pub fn set_offset(&mut self, index: usize, offset: Vec2) -> Result<(), Error> {
        let len = self.offsets.len();
        let slot = self
            .offsets
            .get_mut(index)
            .ok_or(Error::FrameOutOfRange { index, len })?;
        *slot = offset;
        Ok(())
    }

    /// Advance by `dt` seconds
    pub fn advance(&mut self, dt: f32) {
        if self.frames.is_empty() {
            return;
        }
        if dt.is_finite() && dt > 0.0 {
            self.cumu_dt += dt;
        }
        match self.mode {
            AdvanceMode::CatchUp => {
                if self.cumu_dt >= self.interval {
                    self.skip();
                }
            }
            AdvanceMode::SingleStep => {
                if self.cumu_dt >= self.interval {
                    self.step();
                }
            }
        }
    }

    /// Consume every whole interval at once
    fn skip(&mut self) {
        let len = self.frames.len() as f32;
        let leftover = self.cumu_dt % self.interval;
        let steps = ((self.cumu_dt - leftover) / self.interval).round();
        self.index = (self.index + (steps % len) as usize) % self.frames.len();
        self.cumu_dt = leftover;
    }

    fn step(&mut self) {
        self.index += 1;
        if self.index == self.frames.len() {
            self.index -= self.frames.len();
        }
        self.cumu_dt -= self.interval;
    }

    /// Rewind to the first frame
    pub fn reset(&mut self) {
        self.index = 0;
        self.cumu_dt = 0.0;
    }

    /// Cell and offset shown right now
    pub fn current_frame(&self) -> Option<(CellCoord, Vec2)> {
        let cell = self.frames.get(self.index)?;
        Some((*cell, self.offsets[self.index]))
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Cycle length
    pub fn max_index(&self) -> usize {
        self.frames.len()
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Seconds accumulated toward the next step
    pub fn cumu_dt(&self) -> f32 {
        self.cumu_dt
    }

    pub fn frames(&self) -> &[CellCoord] {
        &self.frames
    }

    pub fn offsets(&self) -> &[Vec2] {
        &self.offsets
    }
}
