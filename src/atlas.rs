use core::fmt;
use std::fmt::Debug;

use glam::{UVec2, Vec2};

use crate::{animation::CellCoord, errors::Error, handle::Handle, types::Rect};

/// Index of an atlas in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtlasId(pub(crate) usize);

/// Index of a sprite in the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpriteId(pub(crate) usize);

/// An image sliced into a grid of equally sized cells
#[derive(Clone)]
pub struct TextureAtlas {
    /// texture
    pub texture: Handle,
    /// image size in pixels
    size: UVec2,
    /// cell width and height in pixels
    cell_size: UVec2,
    rows: u32,
    cols: u32,
    /// sprites drawn from this atlas, in registration order
    pub(crate) sprites: Vec<SpriteId>,
}

impl TextureAtlas {
    /// Slice `texture` of `size` pixels into `cell_size` cells
    pub fn new(texture: Handle, size: UVec2, cell_size: UVec2) -> Result<Self, Error> {
        if cell_size.x == 0 || cell_size.y == 0 || cell_size.x > size.x || cell_size.y > size.y {
            return Err(Error::InvalidCellSize {
                width: cell_size.x,
                height: cell_size.y,
                image_width: size.x,
                image_height: size.y,
            });
        }
        Ok(Self {
            texture,
            size,
            cell_size,
            rows: size.y / cell_size.y,
            cols: size.x / cell_size.x,
            sprites: Vec::new(),
        })
    }

    /// Source rectangle of `cell` in the atlas image, shifted by `offset`
    pub fn source_rect(&self, cell: CellCoord, offset: Vec2) -> Rect {
        let cell_size = self.cell_sizef();
        let pos = Vec2::new(
            cell.col as f32 * cell_size.x + offset.x,
            cell.row as f32 * cell_size.y + offset.y,
        );
        Rect::from_pos_size(pos, cell_size)
    }

    /// Whether `cell` lies inside the grid
    pub fn contains(&self, cell: CellCoord) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    pub fn size(&self) -> UVec2 {
        self.size
    }

    pub fn cell_size(&self) -> UVec2 {
        self.cell_size
    }

    pub fn cell_sizef(&self) -> Vec2 {
        Vec2::new(self.cell_size.x as f32, self.cell_size.y as f32)
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn sprites(&self) -> &[SpriteId] {
        &self.sprites
    }
}

impl Debug for TextureAtlas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextureAtlas")
            .field("texture", &self.texture.id())
            .field("size", &self.size)
            .field("cell_size", &self.cell_size)
            .field("sprites", &self.sprites.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use glam::{UVec2, Vec2};

    use super::TextureAtlas;
    use crate::{animation::CellCoord, asset::AssetManager, errors::Error, types::Rect};

    fn atlas(size: UVec2, cell: UVec2) -> Result<TextureAtlas, Error> {
        let mut assets = AssetManager::new(".");
        TextureAtlas::new(assets.alloc_handle(), size, cell)
    }

    #[test]
    fn test_grid_dimensions() {
        let atlas = atlas(UVec2::new(512, 512), UVec2::new(16, 32)).unwrap();
        assert_eq!(atlas.cols(), 32);
        assert_eq!(atlas.rows(), 16);
        assert!(atlas.contains(CellCoord::new(15, 31)));
        assert!(!atlas.contains(CellCoord::new(16, 0)));
    }

    #[test]
    fn test_invalid_cell_size() {
        assert!(matches!(
            atlas(UVec2::new(64, 64), UVec2::new(0, 16)),
            Err(Error::InvalidCellSize { .. })
        ));
        assert!(atlas(UVec2::new(64, 64), UVec2::new(16, 128)).is_err());
    }

    #[test]
    fn test_source_rect() {
        let atlas = atlas(UVec2::new(512, 512), UVec2::splat(16)).unwrap();
        let rect = atlas.source_rect(CellCoord::new(1, 8), Vec2::ZERO);
        assert_eq!(
            rect,
            Rect::from_pos_size(Vec2::new(128., 16.), Vec2::splat(16.))
        );
        let rect = atlas.source_rect(CellCoord::new(1, 9), Vec2::ZERO);
        assert_eq!(rect.pos(), Vec2::new(144., 16.));
    }

    #[test]
    fn test_source_rect_keeps_axes_apart() {
        let atlas = atlas(UVec2::new(256, 128), UVec2::new(16, 32)).unwrap();
        let rect = atlas.source_rect(CellCoord::new(2, 3), Vec2::new(1., -4.));
        assert_eq!(rect.pos(), Vec2::new(3. * 16. + 1., 2. * 32. - 4.));
        assert_eq!(rect.size(), Vec2::new(16., 32.));
    }
}
