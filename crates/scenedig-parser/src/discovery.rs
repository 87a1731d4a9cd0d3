//! Finding scene and script files under a project root.

use log::{debug, warn};
use scenedig_error::{Result, ScenedigError};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const SCENE_EXTENSION: &str = "unity";
pub const SCRIPT_EXTENSION: &str = "cs";

/// Candidate files of one project, each list sorted by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectFiles {
    pub scenes: Vec<PathBuf>,
    pub scripts: Vec<PathBuf>,
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

/// Walk `root` recursively and collect scene documents and script sources.
///
/// Unreadable directory entries are logged and skipped; only a missing or
/// non-directory root is an error.
pub fn discover(root: &Path) -> Result<ProjectFiles> {
    if !root.is_dir() {
        return Err(ScenedigError::project_invalid_root(root));
    }

    let mut files = ProjectFiles::default();
    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {e}", root.display());
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if has_extension(path, SCENE_EXTENSION) {
            files.scenes.push(path.to_path_buf());
        } else if has_extension(path, SCRIPT_EXTENSION) {
            files.scripts.push(path.to_path_buf());
        }
    }

    files.scenes.sort();
    files.scripts.sort();
    debug!(
        "Discovered {} scenes and {} scripts under {}",
        files.scenes.len(),
        files.scripts.len(),
        root.display()
    );
    Ok(files)
}
