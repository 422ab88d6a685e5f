use std::path::{Path, PathBuf};

use crate::errors::Error;

mod file;

pub(crate) use file::FileAssetReader;
pub use file::ASSET_ROOT_ENV;

/// Source of raw asset bytes
pub trait AssetReader: 'static {
    fn get_full_path(&self, path: &Path) -> PathBuf;
    fn read(&self, path: &Path) -> Result<Vec<u8>, Error>;
}
