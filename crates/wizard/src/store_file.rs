//! Local filesystem store.

use std::path::Path;

use {async_trait::async_trait, tokio::fs, tracing::debug};

use crate::{Error, Result, store::FileStore};

/// Store backed by the local filesystem. Writes create missing parent
/// directories.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsFileStore;

impl FsFileStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileStore for FsFileStore {
    async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).await.map_err(|e| Error::store(path, e))
    }

    async fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::store(parent, e))?;
        }
        fs::write(path, contents)
            .await
            .map_err(|e| Error::store(path, e))?;
        debug!(path = %path.display(), bytes = contents.len(), "file written");
        Ok(())
    }
}
