//! # scenedig-tracer
//!
//! Scene analysis for Unity projects.
//!
//! This crate rebuilds the object hierarchy of a scene from the flat records
//! produced by `scenedig-parser`, and cross-references script usage across
//! scenes to find scripts nothing uses.
//!
//! ## Key Features
//!
//! - **Graph reconstruction**: objects, transforms and script components keyed
//!   by local id, with explicit and parent-derived child links merged
//! - **Cycle-safe rendering**: hand-edited scenes with looping parent links
//!   still render, and arbitrarily deep hierarchies never recurse
//! - **Order-independent usage**: per-scene used-script sets are combined
//!   after the fact, so scenes can be analysed in any order or in parallel
//!
//! ## Example
//!
//! ```ignore
//! use scenedig_tracer::{analyze_scene, find_unused, RenderOptions, UsedScripts};
//!
//! let mut used = UsedScripts::new();
//! for text in scenes {
//!     let analysis = analyze_scene(&text, RenderOptions::default());
//!     used.merge(analysis.used);
//! }
//! let unused = find_unused(&registry, &used);
//! ```

pub mod graph;
pub mod hierarchy;
pub mod unused;
pub mod usage;

pub use graph::{NO_ID, SceneGraph, SceneObject, ScriptReference, TransformNode, UNNAMED_OBJECT};
pub use hierarchy::{
    HierarchyLine, HierarchyNode, RenderOptions, assemble, flatten, hierarchy_tree,
    render_hierarchy, render_hierarchy_with,
};
pub use unused::{UnusedAsset, find_unused};
pub use usage::UsedScripts;

use log::debug;
use scenedig_parser::records;

/// Everything one scene contributes to a run.
#[derive(Debug, Clone)]
pub struct SceneAnalysis {
    /// Rendered hierarchy in pre-order
    pub lines: Vec<HierarchyLine>,
    /// Script ids referenced by this scene
    pub used: UsedScripts,
}

impl SceneAnalysis {
    /// Number of rendered roots.
    pub fn root_count(&self) -> usize {
        self.lines.iter().filter(|line| line.depth == 0).count()
    }

    /// The rendered hierarchy as a forest.
    pub fn tree(&self) -> Vec<HierarchyNode> {
        assemble(&self.lines, HierarchyNode::from_line)
    }
}

/// Parse one scene document and reduce it to its hierarchy and script usage.
pub fn analyze_scene(text: &str, options: RenderOptions) -> SceneAnalysis {
    let graph = SceneGraph::build(records(text));
    let lines = render_hierarchy_with(&graph, options);
    let used = UsedScripts::from_graph(&graph);
    let analysis = SceneAnalysis { lines, used };
    debug!(
        "Scene analysed: {} visible roots, {} objects, {} distinct scripts",
        analysis.root_count(),
        analysis.lines.len(),
        analysis.used.len()
    );
    analysis
}
