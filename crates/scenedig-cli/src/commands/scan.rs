use super::analyze_project;
use crate::config::{ScanOptions, UNUSED_REPORT_FILE};
use crate::report::{format_dump, format_unused_csv};
use crate::util::{OutputHandler, colorize_count, colorize_path, dump_file_names};
use log::{debug, info};
use scenedig_error::ScenedigError;
use scenedig_parser::{ProjectFiles, discover};
use std::fs;
use std::path::{Path, PathBuf};

/// What a scan produced on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSummary {
    pub dumps: Vec<PathBuf>,
    pub skipped_scenes: usize,
    pub unused_scripts: usize,
    pub report: PathBuf,
}

pub fn cmd_scan(
    project: &Path,
    output_dir: &Path,
    options: &ScanOptions,
    output: &OutputHandler,
) -> Result<ScanSummary, ScenedigError> {
    let files = discover(project)?;
    fs::create_dir_all(output_dir)
        .map_err(|e| ScenedigError::io_with_path(e.to_string(), output_dir))?;
    report_discovery(&files, output);

    let analysis = analyze_project(project, &files, options)?;

    let scene_paths: Vec<PathBuf> = analysis.scenes.iter().map(|(p, _)| p.clone()).collect();
    let names = dump_file_names(project, &scene_paths);
    let mut dumps = Vec::with_capacity(names.len());
    for ((scene, lines), name) in analysis.scenes.iter().zip(names) {
        let target = output_dir.join(name);
        let text = format_dump(lines, &options.indent);
        fs::write(&target, text).map_err(|e| ScenedigError::io_with_path(e.to_string(), &target))?;
        debug!("{} -> {}", scene.display(), target.display());
        dumps.push(target);
    }

    let report = output_dir.join(UNUSED_REPORT_FILE);
    fs::write(&report, format_unused_csv(&analysis.unused))
        .map_err(|e| ScenedigError::io_with_path(e.to_string(), &report))?;
    info!(
        "Wrote {} dumps and {} unused scripts",
        dumps.len(),
        analysis.unused.len()
    );

    output.print_info_fmt(format_args!(
        "Wrote {} hierarchy dumps to {}",
        colorize_count(dumps.len()),
        colorize_path(output_dir)
    ));
    output.print_info_fmt(format_args!(
        "Unused scripts: {} (see {})",
        colorize_count(analysis.unused.len()),
        colorize_path(&report)
    ));
    if analysis.skipped > 0 {
        output.print_error(&format!(
            "{} scene(s) could not be read and were skipped",
            analysis.skipped
        ));
    }

    Ok(ScanSummary {
        dumps,
        skipped_scenes: analysis.skipped,
        unused_scripts: analysis.unused.len(),
        report,
    })
}

fn report_discovery(files: &ProjectFiles, output: &OutputHandler) {
    output.print_info_fmt(format_args!("Found {} .cs files", files.scripts.len()));
    output.print_info_fmt(format_args!(
        "Found {} .unity scene files",
        files.scenes.len()
    ));
}
