//! In-memory store for testing.

use std::{
    collections::HashMap,
    io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use async_trait::async_trait;

use crate::{Error, Result, store::FileStore};

/// In-memory store backed by a `HashMap`. No persistence.
#[derive(Default)]
pub struct InMemoryFileStore {
    files: Mutex<HashMap<PathBuf, Vec<u8>>>,
    reads: Mutex<Vec<PathBuf>>,
}

impl InMemoryFileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file.
    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        self.files
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(path.into(), contents.into());
        self
    }

    pub fn get(&self, path: &Path) -> Option<Vec<u8>> {
        let files = self.files.lock().unwrap_or_else(|e| e.into_inner());
        files.get(path).cloned()
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        let files = self.files.lock().unwrap_or_else(|e| e.into_inner());
        let mut paths: Vec<PathBuf> = files.keys().cloned().collect();
        paths.sort();
        paths
    }

    /// Paths passed to `read`, in call order.
    pub fn reads(&self) -> Vec<PathBuf> {
        self.reads.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl FileStore for InMemoryFileStore {
    async fn read(&self, path: &Path) -> Result<Vec<u8>> {
        self.reads
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(path.to_path_buf());
        let files = self.files.lock().unwrap_or_else(|e| e.into_inner());
        files
            .get(path)
            .cloned()
            .ok_or_else(|| Error::store(path, io::Error::from(io::ErrorKind::NotFound)))
    }

    async fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        let mut files = self.files.lock().unwrap_or_else(|e| e.into_inner());
        files.insert(path.to_path_buf(), contents.to_vec());
        Ok(())
    }
}
