use std::path::PathBuf;

use anyhow::Result;
use glam::UVec2;

use crate::{
    color::{Color, BLACK},
    engine::Scene,
    platform::platform_run,
};

#[derive(Debug)]
pub struct App {
    pub title: String,
    pub window: UVec2,
    pub vsync: bool,
    /// Directory assets are loaded from, relative paths resolve against
    /// `MIYU_ASSET_ROOT`, then `CARGO_MANIFEST_DIR`, then the executable
    pub asset_root: PathBuf,
    pub clear_color: Color,
}

impl Default for App {
    fn default() -> Self {
        Self {
            title: "Miyu".to_string(),
            window: UVec2::new(1280, 800),
            vsync: true,
            asset_root: PathBuf::from("assets"),
            clear_color: BLACK,
        }
    }
}

impl App {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn window(mut self, window: UVec2) -> Self {
        self.window = window;
        self
    }

    pub fn vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    pub fn asset_root(mut self, asset_root: impl Into<PathBuf>) -> Self {
        self.asset_root = asset_root.into();
        self
    }

    pub fn clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    /// Open the window and run `scene` until quit
    pub fn run<S: Scene>(self, scene: S) -> Result<()> {
        log::debug!("Run {self:?}");
        platform_run(self, scene)
    }
}
