// Utility functions for CLI

use crate::config::{DUMP_EXTENSION, ScanOptions};
use log::debug;
use owo_colors::OwoColorize;
use rayon::prelude::*;
use scenedig_error::ScenedigError;
use scenedig_parser::read_scene;
use scenedig_tracer::{SceneAnalysis, analyze_scene};
use std::collections::HashSet;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// Output handler that respects quiet mode
pub struct OutputHandler {
    quiet: bool,
}

impl OutputHandler {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Print explanatory text (suppressed in quiet mode)
    pub fn print_info(&self, text: &str) {
        if !self.quiet {
            println!("{text}");
        }
    }

    /// Print formatted explanatory text (suppressed in quiet mode)
    pub fn print_info_fmt(&self, args: std::fmt::Arguments) {
        if !self.quiet {
            println!("{args}");
        }
    }

    /// Print raw results (always shown)
    pub fn print_result(&self, text: &str) {
        println!("{text}");
    }

    /// Print to stderr (always shown)
    pub fn print_error(&self, text: &str) {
        eprintln!("{text}");
    }
}

// Colorization helpers
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

pub fn colorize_count(count: usize) -> String {
    if should_use_colors() {
        count.to_string().green().to_string()
    } else {
        count.to_string()
    }
}

pub fn colorize_path(path: &Path) -> String {
    let text = path.display().to_string();
    if should_use_colors() {
        text.yellow().to_string()
    } else {
        text
    }
}

/// Per-scene outcome of a parallel analysis run, in input order.
pub type SceneOutcome = (PathBuf, Result<SceneAnalysis, ScenedigError>);

/// Read and analyse every scene, in parallel, keeping input order.
pub fn analyze_scenes(
    paths: &[PathBuf],
    options: &ScanOptions,
) -> Result<Vec<SceneOutcome>, ScenedigError> {
    let render = options.render_options();
    let run = || -> Vec<SceneOutcome> {
        paths
            .par_iter()
            .map(|path| {
                let analysis = read_scene(path).map(|text| analyze_scene(&text, render));
                (path.clone(), analysis)
            })
            .collect()
    };

    match options.jobs {
        Some(threads) => {
            debug!("Analysing {} scenes on {threads} threads", paths.len());
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| {
                    ScenedigError::cli_execution_failed(format!(
                        "Failed to create thread pool: {e}"
                    ))
                })?;
            Ok(pool.install(run))
        }
        None => Ok(run()),
    }
}

/// `<Scene>.unity.dump` style names, unique across one run.
///
/// Scenes sharing a file name in different folders fall back to their
/// project-relative path with separators flattened to `_`.
pub fn dump_file_names(project_root: &Path, scenes: &[PathBuf]) -> Vec<String> {
    let mut counts = std::collections::HashMap::new();
    for scene in scenes {
        *counts.entry(base_file_name(scene)).or_insert(0usize) += 1;
    }

    let mut taken = HashSet::new();
    scenes
        .iter()
        .map(|scene| {
            let base = base_file_name(scene);
            let stem = if counts.get(&base).copied().unwrap_or(0) > 1 {
                let relative = scene.strip_prefix(project_root).unwrap_or(scene);
                relative
                    .to_string_lossy()
                    .replace(['/', '\\'], "_")
            } else {
                base
            };
            let mut name = format!("{stem}.{DUMP_EXTENSION}");
            let mut suffix = 1;
            while !taken.insert(name.clone()) {
                name = format!("{stem}.{suffix}.{DUMP_EXTENSION}");
                suffix += 1;
            }
            name
        })
        .collect()
}

fn base_file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "scene".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dump_names_use_file_name() {
        let root = PathBuf::from("/project");
        let scenes = vec![
            root.join("Assets/Scenes/Main.unity"),
            root.join("Assets/Scenes/Menu.unity"),
        ];
        assert_eq!(
            dump_file_names(&root, &scenes),
            vec!["Main.unity.dump", "Menu.unity.dump"]
        );
    }

    #[test]
    fn test_dump_names_disambiguate_collisions() {
        let root = PathBuf::from("/project");
        let scenes = vec![
            root.join("Assets/A/Level.unity"),
            root.join("Assets/B/Level.unity"),
        ];
        assert_eq!(
            dump_file_names(&root, &scenes),
            vec!["Assets_A_Level.unity.dump", "Assets_B_Level.unity.dump"]
        );
    }
}
