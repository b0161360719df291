use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::assets::decode::{PreparedImage, decode_image};
use crate::foundation::error::{RankCardError, RankCardResult};

/// Normalize and validate asset paths relative to the asset root.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub fn normalize_rel_path(source: &str) -> RankCardResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(RankCardError::invalid_asset("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(RankCardError::invalid_asset("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(RankCardError::invalid_asset(
                "asset paths must not contain '..'",
            ));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(RankCardError::invalid_asset(
            "asset path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

/// Read-only access to fonts and mask/overlay art.
///
/// Assets resolve first against bytes registered in memory, then against files under `root`.
/// Nothing is cached between lookups.
#[derive(Clone, Debug, Default)]
pub struct AssetStore {
    root: PathBuf,
    registered: BTreeMap<String, Arc<Vec<u8>>>,
}

impl AssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            registered: BTreeMap::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Register asset bytes under a relative name, shadowing any file with the same name.
    pub fn insert(&mut self, rel: &str, bytes: Vec<u8>) -> RankCardResult<()> {
        let key = normalize_rel_path(rel)?;
        self.registered.insert(key, Arc::new(bytes));
        Ok(())
    }

    pub fn with_asset(mut self, rel: &str, bytes: Vec<u8>) -> RankCardResult<Self> {
        self.insert(rel, bytes)?;
        Ok(self)
    }

    /// Raw bytes of a required asset. Missing files are [`RankCardError::InvalidAsset`].
    pub fn bytes(&self, rel: &str) -> RankCardResult<Arc<Vec<u8>>> {
        let key = normalize_rel_path(rel)?;
        if let Some(b) = self.registered.get(&key) {
            return Ok(b.clone());
        }
        let p = self.root.join(Path::new(&key));
        std::fs::read(&p).map(Arc::new).map_err(|e| {
            RankCardError::invalid_asset(format!("failed to read asset '{}': {e}", p.display()))
        })
    }

    /// Font file bytes, checked to contain at least a font header.
    pub fn font(&self, rel: &str) -> RankCardResult<Arc<Vec<u8>>> {
        let bytes = self.bytes(rel)?;
        if bytes.len() < 12 {
            return Err(RankCardError::invalid_asset(format!(
                "font asset '{rel}' is truncated"
            )));
        }
        Ok(bytes)
    }

    /// Decoded image asset (masks, overlays).
    pub fn image(&self, rel: &str) -> RankCardResult<PreparedImage> {
        let bytes = self.bytes(rel)?;
        decode_image(&bytes).map_err(|e| match e {
            RankCardError::InvalidImageFormat(msg) => {
                RankCardError::invalid_asset(format!("asset '{rel}' is not an image: {msg}"))
            }
            other => other,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
