use super::AssetReader;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::errors::Error;

/// Environment variable overriding the asset root
pub const ASSET_ROOT_ENV: &str = "MIYU_ASSET_ROOT";

fn get_base_path() -> PathBuf {
    if let Ok(root) = env::var(ASSET_ROOT_ENV) {
        PathBuf::from(root)
    } else if let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") {
        PathBuf::from(manifest_dir)
    } else {
        env::current_exe()
            .ok()
            .and_then(|path| path.parent().map(ToOwned::to_owned))
            .unwrap_or_default()
    }
}

pub(crate) struct FileAssetReader {
    root_path: PathBuf,
}

impl FileAssetReader {
    /// Relative roots resolve against the base path, absolute ones are kept
    pub(crate) fn new<P: AsRef<Path>>(path: P) -> Self {
        let root_path = get_base_path().join(path);
        Self { root_path }
    }
}

impl AssetReader for FileAssetReader {
    fn get_full_path(&self, path: &Path) -> PathBuf {
        self.root_path.join(path)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>, Error> {
        let full_path = self.get_full_path(path);
        fs::read(&full_path).map_err(|err| Error::resource_load(full_path, err))
    }
}
