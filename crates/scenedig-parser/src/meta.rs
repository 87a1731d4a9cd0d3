//! Asset metadata (`.meta` sidecar files) and the asset registry built from them.

use crate::fields::ScalarField;
use log::{debug, warn};
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

static GUID: Lazy<ScalarField> = Lazy::new(|| ScalarField::new("guid"));

/// The asset identifier stored in a `.meta` file, if any.
pub fn read_guid(meta_text: &str) -> Option<&str> {
    GUID.extract(meta_text).filter(|guid| !guid.is_empty())
}

/// Path of the sidecar metadata file for `asset`: `Foo.cs` -> `Foo.cs.meta`.
pub fn meta_path(asset: &Path) -> PathBuf {
    let mut name = asset.as_os_str().to_owned();
    name.push(".meta");
    PathBuf::from(name)
}

/// One discoverable source asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRegistryEntry {
    /// Hexadecimal identifier, compared case-insensitively
    pub asset_id: String,
    /// Path relative to the project root
    pub path: PathBuf,
}

/// Identifier to path registry, in discovery order.
///
/// Identifiers are unique: inserting an id already present (ignoring case)
/// keeps the first entry.
#[derive(Debug, Clone, Default)]
pub struct AssetRegistry {
    entries: Vec<AssetRegistryEntry>,
    seen: HashSet<String>,
}

impl AssetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false when the id was already registered.
    pub fn insert(&mut self, asset_id: impl Into<String>, path: impl Into<PathBuf>) -> bool {
        let asset_id = asset_id.into();
        let path = path.into();
        if !self.seen.insert(asset_id.to_ascii_lowercase()) {
            warn!(
                "Duplicate asset id {asset_id} for {}, keeping the first entry",
                path.display()
            );
            return false;
        }
        self.entries.push(AssetRegistryEntry { asset_id, path });
        true
    }

    pub fn entries(&self) -> &[AssetRegistryEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AssetRegistryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build a registry from the metadata files next to `assets`.
    ///
    /// Paths are stored relative to `project_root`. Assets whose metadata is
    /// missing, unreadable or has no identifier are skipped with a warning.
    pub fn load<P: AsRef<Path>>(project_root: &Path, assets: &[P]) -> Self {
        let mut registry = Self::new();
        for asset in assets {
            let asset = asset.as_ref();
            let meta = meta_path(asset);
            let text = match std::fs::read_to_string(&meta) {
                Ok(text) => text,
                Err(e) => {
                    warn!("Skipping {}: cannot read {}: {e}", asset.display(), meta.display());
                    continue;
                }
            };
            let Some(guid) = read_guid(&text) else {
                warn!("Skipping {}: no guid in {}", asset.display(), meta.display());
                continue;
            };
            let relative = asset.strip_prefix(project_root).unwrap_or(asset);
            registry.insert(guid, relative);
        }
        debug!("Loaded {} registry entries from {} assets", registry.len(), assets.len());
        registry
    }
}

impl<'a> IntoIterator for &'a AssetRegistry {
    type Item = &'a AssetRegistryEntry;
    type IntoIter = std::slice::Iter<'a, AssetRegistryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
