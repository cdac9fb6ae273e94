//! Storage trait for template input and generated output.

use std::path::Path;

use async_trait::async_trait;

use crate::Result;

/// Where templates are read from and generated files are written to.
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn read(&self, path: &Path) -> Result<Vec<u8>>;
    async fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;
}
