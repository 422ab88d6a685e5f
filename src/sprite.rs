use glam::{UVec2, Vec2};

use crate::{
    animation::{Animation, CellCoord},
    atlas::{AtlasId, TextureAtlas},
    types::Rect,
};

/// Source and destination of one sprite draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRects {
    /// Rect in the atlas image
    pub src: Rect,
    /// Rect on screen
    pub dst: Rect,
}

/// A sprite cycling through atlas cells
#[derive(Debug, Clone)]
pub struct AnimatedSprite {
    pub animation: Animation,
    /// Top-left corner on screen
    pub pos: Vec2,
    /// Uniform scale
    pub scale: f32,
    pub(crate) atlas: Option<AtlasId>,
}

impl AnimatedSprite {
    pub fn new(animation: Animation) -> Self {
        Self {
            animation,
            pos: Vec2::ZERO,
            scale: 1.0,
            atlas: None,
        }
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Append a frame, see [`Animation::push_frame`]
    pub fn push_frame(&mut self, cell: impl Into<CellCoord>) {
        self.animation.push_frame(cell);
    }

    /// Atlas the sprite is registered with
    pub fn atlas(&self) -> Option<AtlasId> {
        self.atlas
    }

    pub fn update(&mut self, dt: f32) {
        self.animation.advance(dt);
    }

    /// Screen rect of a cell of `cell_size`, shifted by `offset`
    pub fn dest_rect(&self, cell_size: UVec2, offset: Vec2) -> Rect {
        let size = Vec2::new(cell_size.x as f32, cell_size.y as f32) * self.scale;
        Rect::from_pos_size(self.pos + offset, size)
    }

    /// Rects of the current frame, `None` if the sprite has no frames
    pub fn frame_rects(&self, atlas: &TextureAtlas) -> Option<FrameRects> {
        let (cell, offset) = self.animation.current_frame()?;
        Some(FrameRects {
            src: atlas.source_rect(cell, offset),
            dst: self.dest_rect(atlas.cell_size(), offset),
        })
    }
}

#[cfg(test)]
mod tests {
    use glam::{UVec2, Vec2};

    use super::AnimatedSprite;
    use crate::{
        animation::{Animation, CellCoord},
        asset::AssetManager,
        atlas::TextureAtlas,
        types::Rect,
    };

    fn dungeon_atlas() -> TextureAtlas {
        let mut assets = AssetManager::new(".");
        TextureAtlas::new(assets.alloc_handle(), UVec2::splat(512), UVec2::splat(16)).unwrap()
    }

    fn princess() -> AnimatedSprite {
        let mut sprite = AnimatedSprite::new(Animation::new(0.1).unwrap())
            .with_pos(Vec2::new(100., 100.))
            .with_scale(10.);
        sprite.push_frame(CellCoord::new(1, 8));
        sprite.push_frame(CellCoord::new(1, 9));
        sprite
    }

    #[test]
    fn test_frame_rects() {
        let atlas = dungeon_atlas();
        let mut sprite = princess();

        let rects = sprite.frame_rects(&atlas).unwrap();
        assert_eq!(
            rects.src,
            Rect::from_pos_size(Vec2::new(128., 16.), Vec2::splat(16.))
        );
        assert_eq!(
            rects.dst,
            Rect::from_pos_size(Vec2::new(100., 100.), Vec2::splat(160.))
        );

        sprite.update(0.1);
        let rects = sprite.frame_rects(&atlas).unwrap();
        assert_eq!(
            rects.src,
            Rect::from_pos_size(Vec2::new(144., 16.), Vec2::splat(16.))
        );
        assert_eq!(rects.dst.pos(), Vec2::new(100., 100.));
    }

    #[test]
    fn test_frame_rects_idempotent() {
        let atlas = dungeon_atlas();
        let mut sprite = princess();
        sprite.update(0.05);
        let a = sprite.frame_rects(&atlas).unwrap();
        let b = sprite.frame_rects(&atlas).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.src.min.x.to_bits(), b.src.min.x.to_bits());
        assert_eq!(a.dst.max.y.to_bits(), b.dst.max.y.to_bits());
    }

    #[test]
    fn test_offset_moves_src_and_dst() {
        let atlas = dungeon_atlas();
        let mut sprite = princess();
        sprite.animation.set_offset(1, Vec2::new(0., -4.)).unwrap();

        // frame 0 keeps the zero default
        let rects = sprite.frame_rects(&atlas).unwrap();
        assert_eq!(rects.src.pos(), Vec2::new(128., 16.));
        assert_eq!(rects.dst.pos(), Vec2::new(100., 100.));

        sprite.update(0.1);
        let rects = sprite.frame_rects(&atlas).unwrap();
        assert_eq!(rects.src.pos(), Vec2::new(144., 12.));
        assert_eq!(rects.dst.pos(), Vec2::new(100., 96.));
        assert_eq!(rects.dst.size(), Vec2::splat(160.));
    }

    #[test]
    fn test_dest_rect_non_square_cell() {
        let sprite = AnimatedSprite::new(Animation::new(0.1).unwrap())
            .with_pos(Vec2::new(5., 6.))
            .with_scale(2.);
        let rect = sprite.dest_rect(UVec2::new(16, 28), Vec2::new(1., 2.));
        assert_eq!(rect.pos(), Vec2::new(6., 8.));
        assert_eq!(rect.size(), Vec2::new(32., 56.));
    }

    #[test]
    fn test_no_frames_no_rects() {
        let atlas = dungeon_atlas();
        let sprite = AnimatedSprite::new(Animation::new(0.1).unwrap());
        assert!(sprite.frame_rects(&atlas).is_none());
    }
}
