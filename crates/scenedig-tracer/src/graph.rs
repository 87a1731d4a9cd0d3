//! Scene graph reconstruction from flat records.
//!
//! Entities live in lookup tables keyed by their local id and refer to each
//! other by plain ids. Edges that point at nothing stay as ids and are simply
//! not followed later.

use log::{debug, trace, warn};
use once_cell::sync::Lazy;
use scenedig_parser::{
    Record, RecordKind, ReferenceField, ReferenceListField, ScalarField, section,
};
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Display name used for objects without an `m_Name` field.
pub const UNNAMED_OBJECT: &str = "<unnamed>";

/// Id value meaning "no object" / "no parent".
pub const NO_ID: i64 = 0;

struct ScenePatterns {
    name: ScalarField,
    components: ReferenceListField,
    game_object: ReferenceField,
    father: ReferenceField,
    children: ReferenceListField,
    script: ReferenceField,
}

static PATTERNS: Lazy<ScenePatterns> = Lazy::new(|| ScenePatterns {
    name: ScalarField::new("m_Name"),
    components: ReferenceListField::keyed("component"),
    game_object: ReferenceField::new("m_GameObject"),
    father: ReferenceField::new("m_Father"),
    children: ReferenceListField::bare(),
    script: ReferenceField::new("m_Script"),
});

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SceneObject {
    pub id: i64,
    pub name: String,
    pub component_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TransformNode {
    pub id: i64,
    /// [`NO_ID`] for roots
    pub parent_id: i64,
    /// Ordered, without duplicates
    pub child_ids: Vec<i64>,
    /// [`NO_ID`] when the record names no owner
    pub owner_object_id: i64,
}

impl TransformNode {
    pub fn is_root(&self) -> bool {
        self.parent_id == NO_ID
    }

    fn push_child(&mut self, child: i64) -> bool {
        if self.child_ids.contains(&child) {
            return false;
        }
        self.child_ids.push(child);
        true
    }
}

/// A script component and the asset it runs.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScriptReference {
    /// `None` for missing or broken script links
    pub script_asset_id: Option<String>,
    pub owner_object_id: i64,
}

/// Objects, transforms and script components of one scene.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    pub objects: HashMap<i64, SceneObject>,
    pub transforms: HashMap<i64, TransformNode>,
    /// Root transform ids in document order
    pub roots: Vec<i64>,
    pub script_references: Vec<ScriptReference>,
}

impl SceneGraph {
    /// Build the graph of one scene from its records.
    ///
    /// Records of unknown kinds are ignored. Duplicate local ids keep the
    /// first record.
    pub fn build<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = Record<'a>>,
    {
        let mut graph = SceneGraph::default();
        let mut transform_order = Vec::new();

        for record in records {
            let kind = record.kind();
            trace!("Record &{} kind {:?}", record.local_id, kind);
            match kind {
                RecordKind::GameObject => graph.add_object(&record),
                RecordKind::Transform | RecordKind::RectTransform => {
                    if graph.add_transform(&record) {
                        transform_order.push(record.local_id);
                    }
                }
                RecordKind::MonoBehaviour => graph.add_script(&record),
                RecordKind::Other(_) => {}
            }
        }

        graph.link_parents(&transform_order);
        graph.roots = transform_order
            .into_iter()
            .filter(|id| graph.transforms.get(id).is_some_and(TransformNode::is_root))
            .collect();

        debug!(
            "Scene graph: {} objects, {} transforms ({} roots), {} script components",
            graph.objects.len(),
            graph.transforms.len(),
            graph.roots.len(),
            graph.script_references.len()
        );
        graph
    }

    fn add_object(&mut self, record: &Record<'_>) {
        if self.objects.contains_key(&record.local_id) {
            warn!("Duplicate object id &{}, keeping the first record", record.local_id);
            return;
        }
        let patterns = &*PATTERNS;
        let name = patterns
            .name
            .extract(record.body)
            .map_or_else(|| UNNAMED_OBJECT.to_string(), str::to_string);
        let component_ids = patterns.components.extract(record.body);
        self.objects.insert(
            record.local_id,
            SceneObject {
                id: record.local_id,
                name,
                component_ids,
            },
        );
    }

    fn add_transform(&mut self, record: &Record<'_>) -> bool {
        if self.transforms.contains_key(&record.local_id) {
            warn!("Duplicate transform id &{}, keeping the first record", record.local_id);
            return false;
        }
        let patterns = &*PATTERNS;
        let parent_id = patterns
            .father
            .extract(record.body)
            .map_or(NO_ID, |r| r.file_id);
        let owner_object_id = patterns
            .game_object
            .extract(record.body)
            .map_or(NO_ID, |r| r.file_id);

        let mut node = TransformNode {
            id: record.local_id,
            parent_id,
            child_ids: Vec::new(),
            owner_object_id,
        };
        for child in patterns
            .children
            .extract(section(record.body, "m_Children"))
        {
            node.push_child(child);
        }
        self.transforms.insert(record.local_id, node);
        true
    }

    fn add_script(&mut self, record: &Record<'_>) {
        let patterns = &*PATTERNS;
        let script_asset_id = patterns
            .script
            .extract(record.body)
            .and_then(|r| r.guid);
        let owner_object_id = patterns
            .game_object
            .extract(record.body)
            .map_or(NO_ID, |r| r.file_id);
        if script_asset_id.is_none() {
            debug!("Script component &{} has no script asset", record.local_id);
        }
        self.script_references.push(ScriptReference {
            script_asset_id,
            owner_object_id,
        });
    }

    /// Add every child to its parent's child list unless already listed there.
    fn link_parents(&mut self, transform_order: &[i64]) {
        for &id in transform_order {
            let Some(parent_id) = self.transforms.get(&id).map(|t| t.parent_id) else {
                continue;
            };
            if parent_id == NO_ID {
                continue;
            }
            match self.transforms.get_mut(&parent_id) {
                Some(parent) => {
                    parent.push_child(id);
                }
                None => warn!("Transform &{id} points at missing parent &{parent_id}"),
            }
        }
    }

    /// Owner object of a transform, if it resolves.
    pub fn owner_of(&self, transform: &TransformNode) -> Option<&SceneObject> {
        if transform.owner_object_id == NO_ID {
            return None;
        }
        self.objects.get(&transform.owner_object_id)
    }

    /// Script asset ids referenced by this scene, broken links excluded.
    pub fn script_asset_ids(&self) -> impl Iterator<Item = &str> {
        self.script_references
            .iter()
            .filter_map(|r| r.script_asset_id.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenedig_parser::records;

    const SCENE: &str = "%YAML 1.1
%TAG !u! tag:unity3d.com,2011:
--- !u!1 &100
GameObject:
  m_Component:
  - component: {fileID: 101}
  - component: {fileID: 102}
  m_Name: Player
--- !u!4 &101
Transform:
  m_GameObject: {fileID: 100}
  m_Children:
  - {fileID: 201}
  m_Father: {fileID: 0}
--- !u!114 &102
MonoBehaviour:
  m_GameObject: {fileID: 100}
  m_Script: {fileID: 11500000, guid: ABCDEF0123456789abcdef0123456789, type: 3}
--- !u!1 &200
GameObject:
  m_Component:
  - component: {fileID: 201}
--- !u!4 &201
Transform:
  m_GameObject: {fileID: 200}
  m_Children: []
  m_Father: {fileID: 101}
--- !u!114 &300
MonoBehaviour:
  m_GameObject: {fileID: 100}
  m_Script: {fileID: 0}
";

    #[test]
    fn test_entities_are_extracted() {
        let graph = SceneGraph::build(records(SCENE));
        assert_eq!(graph.objects.len(), 2);
        assert_eq!(graph.objects[&100].name, "Player");
        assert_eq!(graph.objects[&100].component_ids, vec![101, 102]);
        assert_eq!(graph.objects[&200].name, UNNAMED_OBJECT);
        assert_eq!(graph.transforms[&201].parent_id, 101);
        assert_eq!(graph.transforms[&201].owner_object_id, 200);
        assert_eq!(graph.roots, vec![101]);
    }

    #[test]
    fn test_explicit_and_parent_links_are_unioned() {
        let graph = SceneGraph::build(records(SCENE));
        assert_eq!(graph.transforms[&101].child_ids, vec![201]);
    }

    #[test]
    fn test_script_references() {
        let graph = SceneGraph::build(records(SCENE));
        assert_eq!(graph.script_references.len(), 2);
        assert_eq!(graph.script_references[1].script_asset_id, None);
        let ids: Vec<_> = graph.script_asset_ids().collect();
        assert_eq!(ids, vec!["ABCDEF0123456789abcdef0123456789"]);
    }

    #[test]
    fn test_missing_owner_and_dangling_parent() {
        let text = "--- !u!4 &1\nTransform:\n  m_Father: {fileID: 999}\n";
        let graph = SceneGraph::build(records(text));
        let node = &graph.transforms[&1];
        assert_eq!(node.owner_object_id, NO_ID);
        assert!(graph.owner_of(node).is_none());
        assert!(graph.roots.is_empty());
    }

    #[test]
    fn test_duplicate_ids_keep_first_record() {
        let text = "--- !u!1 &5\nGameObject:\n  m_Name: First\n--- !u!1 &5\nGameObject:\n  m_Name: Second\n";
        let graph = SceneGraph::build(records(text));
        assert_eq!(graph.objects[&5].name, "First");
    }

    #[test]
    fn test_unknown_kinds_do_not_disturb_later_records() {
        let text = "--- !u!29 &1\nOcclusionCullingSettings:\n  m_Name: Nope\n--- !u!1 &2\nGameObject:\n  m_Name: Yes\n";
        let graph = SceneGraph::build(records(text));
        assert_eq!(graph.objects.len(), 1);
        assert_eq!(graph.objects[&2].name, "Yes");
    }
}
