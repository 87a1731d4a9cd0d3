pub mod hierarchy;
pub mod scan;
pub mod unused;

// Re-export command functions for main.rs
pub use hierarchy::cmd_hierarchy;
pub use scan::cmd_scan;
pub use unused::cmd_unused;

use crate::config::ScanOptions;
use crate::util::analyze_scenes;
use log::warn;
use scenedig_error::ScenedigError;
use scenedig_parser::{AssetRegistry, ProjectFiles};
use scenedig_tracer::{HierarchyLine, SceneAnalysis, UnusedAsset, UsedScripts, find_unused};
use std::path::{Path, PathBuf};

/// Shared result of walking a project and analysing all of its scenes.
pub(crate) struct ProjectAnalysis {
    /// Rendered hierarchy of each readable scene, in discovery order
    pub scenes: Vec<(PathBuf, Vec<HierarchyLine>)>,
    pub skipped: usize,
    pub unused: Vec<UnusedAsset>,
}

pub(crate) fn analyze_project(
    project: &Path,
    files: &ProjectFiles,
    options: &ScanOptions,
) -> Result<ProjectAnalysis, ScenedigError> {
    let registry = AssetRegistry::load(project, &files.scripts);

    let mut scenes = Vec::with_capacity(files.scenes.len());
    let mut skipped = 0;
    let mut used = UsedScripts::new();
    for (path, outcome) in analyze_scenes(&files.scenes, options)? {
        match outcome {
            Ok(SceneAnalysis {
                lines,
                used: scene_used,
            }) => {
                used.merge(scene_used);
                scenes.push((path, lines));
            }
            Err(e) => {
                warn!("Skipping scene: {}", e.user_message());
                skipped += 1;
            }
        }
    }

    let unused = find_unused(&registry, &used);
    Ok(ProjectAnalysis {
        scenes,
        skipped,
        unused,
    })
}
