//! Document loading

use crate::error::Result;

/// Fetches the full text of a building document
///
/// Loading happens outside the scene: the session asks for the text once and
/// parses the complete buffer. Timeouts and retries belong to the loader.
pub trait TextLoader {
    /// Return the complete document at `path`
    fn load(&self, path: &str) -> Result<String>;
}

/// Loads documents from the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLoader;

impl TextLoader for FsLoader {
    fn load(&self, path: &str) -> Result<String> {
        Ok(std::fs::read_to_string(path)?)
    }
}

impl<T: TextLoader + ?Sized> TextLoader for &T {
    fn load(&self, path: &str) -> Result<String> {
        (**self).load(path)
    }
}
