//! Accumulating the script assets referenced by scenes.

use crate::graph::SceneGraph;
use std::collections::HashSet;

/// Set of referenced script asset ids, compared case-insensitively.
///
/// Each scene produces its own set; sets from different scenes are combined
/// with [`UsedScripts::merge`] once every scene is done, so scenes can be
/// processed independently or in parallel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsedScripts {
    ids: HashSet<String>,
}

impl UsedScripts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script ids referenced by one scene.
    pub fn from_graph(graph: &SceneGraph) -> Self {
        graph.script_asset_ids().collect()
    }

    pub fn record(&mut self, asset_id: &str) {
        self.ids.insert(asset_id.to_ascii_lowercase());
    }

    pub fn contains(&self, asset_id: &str) -> bool {
        self.ids.contains(&asset_id.to_ascii_lowercase())
    }

    pub fn merge(&mut self, other: UsedScripts) {
        self.ids.extend(other.ids);
    }

    /// Union of two sets.
    pub fn union(mut self, other: UsedScripts) -> Self {
        self.merge(other);
        self
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Lower-cased ids, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> Extend<S> for UsedScripts {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for id in iter {
            self.record(id.as_ref());
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for UsedScripts {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut used = Self::new();
        used.extend(iter);
        used
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_membership() {
        let used: UsedScripts = ["AbC1"].into_iter().collect();
        assert!(used.contains("abc1"));
        assert!(used.contains("ABC1"));
        assert!(!used.contains("abc2"));
    }

    #[test]
    fn test_union_across_scenes() {
        let a: UsedScripts = ["aaaa", "bbbb"].into_iter().collect();
        let b: UsedScripts = ["BBBB", "cccc"].into_iter().collect();
        let all = a.union(b);
        assert_eq!(all.len(), 3);
        assert!(all.contains("CCCC"));
    }
}
