//! JSON description of an atlas and the sprites cut from it.
//!
//! ```json
//! {
//!   "image": "0x72_DungeonTilesetII_v1.4.png",
//!   "cellSize": [16, 16],
//!   "sprites": [
//!     {
//!       "name": "princess",
//!       "interval": 0.1,
//!       "frames": [[1, 8], [1, 9]],
//!       "offsets": [[0, 0], [0, -1]],
//!       "pos": [100, 100],
//!       "scale": 10
//!     }
//!   ]
//! }
//! ```
//!
//! Frames are `[row, col]` cells, offsets are `[x, y]` pixels and apply to
//! the frame with the same index.

use std::path::PathBuf;

use glam::{UVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::{
    animation::{AdvanceMode, Animation, CellCoord},
    errors::Error,
    sprite::AnimatedSprite,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetManifest {
    /// Atlas image, relative to the asset root
    pub image: PathBuf,
    pub cell_size: [u32; 2],
    #[serde(default)]
    pub sprites: Vec<SpriteDef>,
}

impl SheetManifest {
    pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    pub fn cell_size(&self) -> UVec2 {
        UVec2::from_array(self.cell_size)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpriteDef {
    pub name: String,
    /// Seconds per frame
    pub interval: f32,
    pub frames: Vec<[u32; 2]>,
    #[serde(default)]
    pub offsets: Vec<[f32; 2]>,
    #[serde(default)]
    pub pos: [f32; 2],
    #[serde(default = "default_scale")]
    pub scale: f32,
    #[serde(default)]
    pub mode: AdvanceMode,
}

fn default_scale() -> f32 {
    1.0
}

impl SpriteDef {
    pub fn build(&self) -> Result<AnimatedSprite, Error> {
        let mut animation = Animation::new(self.interval)?.with_mode(self.mode);
        for [row, col] in &self.frames {
            animation.push_frame(CellCoord::new(*row, *col));
        }
        for (index, offset) in self.offsets.iter().enumerate() {
            animation.set_offset(index, Vec2::from_array(*offset))?;
        }
        Ok(AnimatedSprite::new(animation)
            .with_pos(Vec2::from_array(self.pos))
            .with_scale(self.scale))
    }
}

#[cfg(test)]
mod tests {
    use glam::{UVec2, Vec2};

    use super::SheetManifest;
    use crate::{
        animation::{AdvanceMode, Animation, CellCoord},
        asset::AssetManager,
        atlas::TextureAtlas,
        errors::Error,
        sprite::AnimatedSprite,
    };

    const MANIFEST: &str = r#"{
        "image": "dungeon.png",
        "cellSize": [16, 16],
        "sprites": [
            {
                "name": "princess",
                "interval": 0.1,
                "frames": [[1, 8], [1, 9]],
                "offsets": [[0, 0], [0, -4]],
                "pos": [100, 100],
                "scale": 10
            },
            {
                "name": "torch",
                "interval": 0.25,
                "frames": [[5, 0]],
                "mode": "single_step"
            }
        ]
    }"#;

    #[test]
    fn test_parse_manifest() {
        let manifest = SheetManifest::from_slice(MANIFEST.as_bytes()).unwrap();
        assert_eq!(manifest.cell_size(), UVec2::splat(16));
        assert_eq!(manifest.sprites.len(), 2);
        let torch = &manifest.sprites[1];
        assert_eq!(torch.scale, 1.0);
        assert_eq!(torch.pos, [0.0, 0.0]);
        assert_eq!(torch.mode, AdvanceMode::SingleStep);
        assert!(torch.offsets.is_empty());
    }

    #[test]
    fn test_built_sprite_matches_hand_built() {
        let manifest = SheetManifest::from_slice(MANIFEST.as_bytes()).unwrap();
        let mut built = manifest.sprites[0].build().unwrap();

        let mut animation = Animation::new(0.1).unwrap();
        animation.push_frame(CellCoord::new(1, 8));
        animation.push_frame_with_offset(CellCoord::new(1, 9), Vec2::new(0., -4.));
        let mut hand = AnimatedSprite::new(animation)
            .with_pos(Vec2::new(100., 100.))
            .with_scale(10.);

        let mut assets = AssetManager::new(".");
        let atlas =
            TextureAtlas::new(assets.alloc_handle(), UVec2::splat(512), manifest.cell_size())
                .unwrap();
        for _ in 0..2 {
            assert_eq!(built.frame_rects(&atlas), hand.frame_rects(&atlas));
            built.update(0.1);
            hand.update(0.1);
        }
    }

    #[test]
    fn test_too_many_offsets() {
        let json = r#"{
            "image": "dungeon.png",
            "cellSize": [16, 16],
            "sprites": [
                { "name": "bad", "interval": 0.1, "frames": [[0, 0]], "offsets": [[0, 0], [1, 1]] }
            ]
        }"#;
        let manifest = SheetManifest::from_slice(json.as_bytes()).unwrap();
        assert!(matches!(
            manifest.sprites[0].build(),
            Err(Error::FrameOutOfRange { index: 1, len: 1 })
        ));
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(SheetManifest::from_slice(b"{\"image\": 3}").is_err());
    }
}
