/// Counts presented frames and reports the rate once per window
#[derive(Debug, Clone)]
pub struct FrameCounter {
    window: f32,
    window_start: f32,
    frames: u32,
    fps: f32,
}

impl Default for FrameCounter {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl FrameCounter {
    /// `window` is the reporting period in seconds
    pub fn new(window: f32) -> Self {
        Self {
            window,
            window_start: 0.0,
            frames: 0,
            fps: 0.0,
        }
    }

    /// Start counting at `now`
    pub fn reset(&mut self, now: f32) {
        self.window_start = now;
        self.frames = 0;
    }

    /// Count one frame, returns the new rate when a window closes
    pub fn tick(&mut self, now: f32) -> Option<f32> {
        self.frames += 1;
        let elapsed = now - self.window_start;
        if elapsed < self.window {
            return None;
        }
        self.fps = self.frames as f32 / elapsed;
        self.reset(now);
        Some(self.fps)
    }

    /// Rate of the last closed window
    pub fn fps(&self) -> f32 {
        self.fps
    }
}
