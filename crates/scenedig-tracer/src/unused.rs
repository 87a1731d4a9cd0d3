//! Unused script detection.

use crate::usage::UsedScripts;
use log::debug;
use scenedig_parser::AssetRegistry;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A registry entry that no scene references.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnusedAsset {
    pub path: PathBuf,
    pub asset_id: String,
}

/// Registry entries whose id is not in `used`, in registry order.
///
/// `used` must already hold the union over every scene of the run.
pub fn find_unused(registry: &AssetRegistry, used: &UsedScripts) -> Vec<UnusedAsset> {
    let unused: Vec<UnusedAsset> = registry
        .iter()
        .filter(|entry| !used.contains(&entry.asset_id))
        .map(|entry| UnusedAsset {
            path: entry.path.clone(),
            asset_id: entry.asset_id.clone(),
        })
        .collect();
    debug!(
        "{} of {} registered scripts are unused",
        unused.len(),
        registry.len()
    );
    unused
}
