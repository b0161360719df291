use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{RankCardError, RankCardResult};

/// Caller-provided capability that turns a location into encoded raster bytes.
///
/// The renderer never performs I/O on its own for card inputs; network or filesystem access is
/// front-loaded through this trait before any pixels are touched.
pub trait RasterSource {
    /// Fetch the encoded bytes stored at `location`.
    fn fetch(&self, location: &str) -> RankCardResult<Vec<u8>>;
}

impl<F> RasterSource for F
where
    F: Fn(&str) -> RankCardResult<Vec<u8>>,
{
    fn fetch(&self, location: &str) -> RankCardResult<Vec<u8>> {
        self(location)
    }
}

/// Reads rasters from the local filesystem, resolving relative locations against `root`.
#[derive(Clone, Debug)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, location: &str) -> PathBuf {
        let p = Path::new(location);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.root.join(p)
        }
    }
}

impl RasterSource for FsSource {
    fn fetch(&self, location: &str) -> RankCardResult<Vec<u8>> {
        let path = self.resolve(location);
        let bytes =
            std::fs::read(&path).with_context(|| format!("read raster '{}'", path.display()))?;
        Ok(bytes)
    }
}

/// In-memory source keyed by location string.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    entries: BTreeMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, location: impl Into<String>, bytes: Vec<u8>) {
        self.entries.insert(location.into(), bytes);
    }

    pub fn with(mut self, location: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.insert(location, bytes);
        self
    }
}

impl RasterSource for MemorySource {
    fn fetch(&self, location: &str) -> RankCardResult<Vec<u8>> {
        self.entries
            .get(location)
            .cloned()
            .ok_or_else(|| RankCardError::invalid_image(format!("no raster at '{location}'")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/source.rs"]
mod tests;
