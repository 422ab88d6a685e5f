use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to load {path}: {reason}")]
    ResourceLoad { path: PathBuf, reason: String },
    #[error("init: {0}")]
    Init(String),
    #[error("invalid cell size {width}x{height} for image {image_width}x{image_height}")]
    InvalidCellSize {
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    },
    #[error("invalid animation interval {0}")]
    InvalidInterval(f32),
    #[error("frame {index} out of range, animation has {len} frames")]
    FrameOutOfRange { index: usize, len: usize },
    #[error("no atlas")]
    NoAtlas,
}

impl Error {
    pub(crate) fn resource_load(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::ResourceLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}
