use std::{
    path::Path,
    sync::mpsc::{channel, Receiver, Sender},
};

use glam::UVec2;
use image::RgbaImage;
use io::{AssetReader, FileAssetReader};

use crate::{
    errors::Error,
    handle::{DropEvent, Handle, HandleId},
};

mod io;

pub use io::ASSET_ROOT_ENV;

/// RGBA8 pixels ready for texture upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub data: Vec<u8>,
    pub size: UVec2,
}

impl From<RgbaImage> for DecodedImage {
    fn from(im: RgbaImage) -> Self {
        let size = UVec2::new(im.width(), im.height());
        Self {
            data: im.into_raw(),
            size,
        }
    }
}

/// Hands out texture handles and reads assets below a root directory
pub struct AssetManager {
    reader: Box<dyn AssetReader>,
    asset_id: HandleId,
    receiver: Receiver<DropEvent>,
    sender: Sender<DropEvent>,
}

impl AssetManager {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let (sender, receiver) = channel();
        Self {
            reader: Box::new(FileAssetReader::new(root)),
            asset_id: 0,
            sender,
            receiver,
        }
    }

    pub(crate) fn alloc_handle(&mut self) -> Handle {
        let id = self.asset_id;
        self.asset_id += 1;
        Handle::new(id, self.sender.clone())
    }

    /// Read raw bytes
    pub fn load_bytes<P: AsRef<Path>>(&self, path: P) -> Result<Vec<u8>, Error> {
        self.reader.read(path.as_ref())
    }

    /// Read and decode an image into RGBA8
    pub fn load_image<P: AsRef<Path>>(&self, path: P) -> Result<DecodedImage, Error> {
        let path = path.as_ref();
        let bytes = self.reader.read(path)?;
        let im = match image::ImageFormat::from_path(path) {
            Ok(f) => image::load_from_memory_with_format(&bytes, f),
            _ => image::load_from_memory(&bytes),
        }
        .map_err(|err| Error::resource_load(self.reader.get_full_path(path), err))?;
        log::debug!(
            "Decoded {} {}x{}",
            path.display(),
            im.width(),
            im.height()
        );
        Ok(im.into_rgba8().into())
    }

    /// Ids of handles whose last clone was dropped since the previous call
    pub(crate) fn collect_dropped(&mut self) -> Vec<HandleId> {
        self.receiver.try_iter().map(|event| event.0).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::{env, fs, path::PathBuf};

    use glam::UVec2;
    use image::{Rgba, RgbaImage};

    use super::AssetManager;
    use crate::errors::Error;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("miyu-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_load_image() {
        let dir = temp_dir("load-image");
        let mut im = RgbaImage::new(32, 16);
        im.put_pixel(1, 0, Rgba([1, 2, 3, 4]));
        im.save(dir.join("atlas.png")).unwrap();

        let assets = AssetManager::new(&dir);
        let decoded = assets.load_image("atlas.png").unwrap();
        assert_eq!(decoded.size, UVec2::new(32, 16));
        assert_eq!(decoded.data.len(), 32 * 16 * 4);
        assert_eq!(&decoded.data[4..8], &[1, 2, 3, 4]);
    }

    #[test]
    fn test_load_missing_image() {
        let dir = temp_dir("missing-image");
        let assets = AssetManager::new(&dir);
        let err = assets.load_image("nope.png").unwrap_err();
        match err {
            Error::ResourceLoad { path, .. } => assert!(path.ends_with("nope.png")),
            err => panic!("unexpected {err:?}"),
        }
    }

    #[test]
    fn test_load_garbage_image() {
        let dir = temp_dir("garbage-image");
        fs::write(dir.join("broken.png"), b"not a png").unwrap();
        let assets = AssetManager::new(&dir);
        assert!(matches!(
            assets.load_image("broken.png"),
            Err(Error::ResourceLoad { .. })
        ));
    }

    #[test]
    fn test_handles_are_unique_and_reported_once() {
        let mut assets = AssetManager::new(".");
        let a = assets.alloc_handle();
        let b = assets.alloc_handle();
        assert_ne!(a.id(), b.id());
        let b_id = b.id();
        drop(b);
        assert_eq!(assets.collect_dropped(), vec![b_id]);
        assert!(assets.collect_dropped().is_empty());
    }
}
