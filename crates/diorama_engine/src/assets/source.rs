//! Asset sources
//!
//! Loaders never touch the filesystem directly; they ask an [`AssetSource`]
//! for bytes by relative path. Sources are shared with loader threads.

use std::collections::HashMap;
use std::path::PathBuf;

use super::AssetError;

/// Provides raw asset bytes by relative path
pub trait AssetSource: Send + Sync {
    /// Fetch the complete contents of `path`
    fn fetch(&self, path: &str) -> Result<Vec<u8>, AssetError>;
}

/// Reads assets from disk, trying each search root in order
#[derive(Debug, Clone)]
pub struct FileSystemSource {
    search_paths: Vec<PathBuf>,
}

impl FileSystemSource {
    /// Create a source over the given search roots
    pub fn new<I, P>(search_paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            search_paths: search_paths.into_iter().map(Into::into).collect(),
        }
    }
    
    /// Search roots in lookup order
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }
    
    fn locate(&self, path: &str) -> Option<PathBuf> {
        self.search_paths
            .iter()
            .map(|root| root.join(path))
            .find(|candidate| candidate.is_file())
    }
}

impl AssetSource for FileSystemSource {
    fn fetch(&self, path: &str) -> Result<Vec<u8>, AssetError> {
        let full_path = self
            .locate(path)
            .ok_or_else(|| AssetError::NotFound(path.to_string()))?;
        log::debug!("Reading {} from {}", path, full_path.display());
        Ok(std::fs::read(full_path)?)
    }
}

/// Serves assets from memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    /// Create an empty source
    pub fn new() -> Self {
        Self::default()
    }
    
    /// Register `bytes` under `path`
    pub fn insert(&mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), bytes.into());
    }
    
    /// Builder-style [`MemorySource::insert`]
    pub fn with_file(mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(path, bytes);
        self
    }
}

impl AssetSource for MemorySource {
    fn fetch(&self, path: &str) -> Result<Vec<u8>, AssetError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(path.to_string()))
    }
}

/// Resolve `reference` relative to the directory containing `base`
///
/// `.` and `..` segments are folded; leading `..` segments that climb past
/// the root are kept.
pub fn resolve_relative(base: &str, reference: &str) -> String {
    let mut segments: Vec<&str> = base.split('/').collect();
    segments.pop();
    
    for segment in reference.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if matches!(segments.last(), Some(last) if *last != "..") {
                    segments.pop();
                } else {
                    segments.push("..");
                }
            }
            other => segments.push(other),
        }
    }
    
    segments.retain(|segment| !segment.is_empty());
    segments.join("/")
}
