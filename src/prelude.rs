pub use crate::animation::{AdvanceMode, Animation, CellCoord};
pub use crate::app::*;
pub use crate::atlas::{AtlasId, SpriteId, TextureAtlas};
pub use crate::color::*;
pub use crate::engine::{Engine, Scene, Sheet};
pub use crate::errors::Error as MiyuError;
pub use crate::input::{Event, KeyCode};
pub use crate::sprite::{AnimatedSprite, FrameRects};
pub use crate::types::Rect;
pub use crate::world::{DrawCall, World};
pub use anyhow::{self, Error, Result};
pub use glam::{self, UVec2, Vec2};
