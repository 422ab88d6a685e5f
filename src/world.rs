use crate::{
    atlas::{AtlasId, SpriteId, TextureAtlas},
    errors::Error,
    handle::Handle,
    sprite::{AnimatedSprite, FrameRects},
};

/// One texture copy
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub texture: Handle,
    pub sprite: SpriteId,
    pub rects: FrameRects,
}

/// Registry of atlases and the sprites drawn from them
#[derive(Debug, Default)]
pub struct World {
    atlases: Vec<TextureAtlas>,
    sprites: Vec<AnimatedSprite>,
}

impl World {
    pub fn add_atlas(&mut self, atlas: TextureAtlas) -> AtlasId {
        let id = AtlasId(self.atlases.len());
        log::debug!("Add atlas {id:?} {atlas:?}");
        self.atlases.push(atlas);
        id
    }

    /// Register `sprite` with an atlas, it is updated and drawn from now on
    pub fn spawn(&mut self, atlas: AtlasId, mut sprite: AnimatedSprite) -> Result<SpriteId, Error> {
        let id = SpriteId(self.sprites.len());
        let target = self.atlases.get_mut(atlas.0).ok_or(Error::NoAtlas)?;
        if let Some(cell) = sprite
            .animation
            .frames()
            .iter()
            .find(|cell| !target.contains(**cell))
        {
            log::warn!("Sprite {id:?} uses {cell:?} outside of atlas {atlas:?}");
        }
        target.sprites.push(id);
        sprite.atlas = Some(atlas);
        self.sprites.push(sprite);
        Ok(id)
    }

    pub fn atlas(&self, id: AtlasId) -> Option<&TextureAtlas> {
        self.atlases.get(id.0)
    }

    pub fn sprite(&self, id: SpriteId) -> Option<&AnimatedSprite> {
        self.sprites.get(id.0)
    }

    pub fn sprite_mut(&mut self, id: SpriteId) -> Option<&mut AnimatedSprite> {
        self.sprites.get_mut(id.0)
    }

    pub fn atlases(&self) -> &[TextureAtlas] {
        &self.atlases
    }

    pub fn sprites_count(&self) -> usize {
        self.sprites.len()
    }

    /// Advance every registered sprite by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        for atlas in &self.atlases {
            for id in &atlas.sprites {
                if let Some(sprite) = self.sprites.get_mut(id.0) {
                    sprite.update(dt);
                }
            }
        }
    }

    /// Draw calls of the current frame, atlases in registration order
    pub fn draw_calls(&self) -> impl Iterator<Item = DrawCall> + '_ {
        self.atlases.iter().flat_map(move |atlas| {
            atlas.sprites.iter().filter_map(move |id| {
                let rects = self.sprites.get(id.0)?.frame_rects(atlas)?;
                Some(DrawCall {
                    texture: atlas.texture.clone(),
                    sprite: *id,
                    rects,
                })
            })
        })
    }

    /// Drop every atlas and sprite, releasing their texture handles
    pub fn clear(&mut self) {
        self.atlases.clear();
        self.sprites.clear();
    }
}
