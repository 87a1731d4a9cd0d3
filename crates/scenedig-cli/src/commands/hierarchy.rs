use crate::HierarchyFormat;
use crate::config::{ScanOptions, TREE_DEPTH_LIMIT};
use crate::report::{build_text_trees, format_dump};
use crate::util::OutputHandler;
use log::{debug, warn};
use scenedig_error::ScenedigError;
use scenedig_parser::read_scene;
use scenedig_tracer::{SceneAnalysis, analyze_scene};
use std::path::Path;
use text_trees::{FormatCharacters, TreeFormatting};

pub fn cmd_hierarchy(
    scene: &Path,
    format: HierarchyFormat,
    ascii: bool,
    options: &ScanOptions,
    output: &OutputHandler,
) -> Result<(), ScenedigError> {
    let text = read_scene(scene)?;
    let analysis = analyze_scene(&text, options.render_options());
    debug!(
        "{}: {} roots, {} scripts referenced",
        scene.display(),
        analysis.root_count(),
        analysis.used.len()
    );

    match format {
        HierarchyFormat::Dump => print_dump(&analysis, options, output),
        HierarchyFormat::Tree => {
            let deepest = analysis.lines.iter().map(|line| line.depth).max().unwrap_or(0);
            if deepest > TREE_DEPTH_LIMIT {
                warn!(
                    "{} nests {} levels deep, printing a dump instead of a tree",
                    scene.display(),
                    deepest + 1
                );
                print_dump(&analysis, options, output);
                return Ok(());
            }

            output.print_info_fmt(format_args!("Hierarchy of {}:", scene.display()));
            let format_chars = if ascii {
                FormatCharacters::ascii()
            } else {
                FormatCharacters::box_chars()
            };
            let formatting = TreeFormatting::dir_tree(format_chars);
            for tree in build_text_trees(&analysis.lines, false) {
                let rendered = tree.to_string_with_format(&formatting).map_err(|e| {
                    ScenedigError::cli_output_format(format!("Error formatting tree: {e}"))
                })?;
                output.print_result(rendered.trim_end_matches('\n'));
            }
            output.print_info("Summary:");
            output.print_info_fmt(format_args!("  Roots: {}", analysis.root_count()));
            output.print_info_fmt(format_args!("  Objects: {}", analysis.lines.len()));
            output.print_info_fmt(format_args!("  Scripts referenced: {}", analysis.used.len()));
        }
        HierarchyFormat::Json => {
            let json = serde_json::to_string_pretty(&analysis.lines).map_err(|e| {
                ScenedigError::cli_output_format(format!("Error serializing to JSON: {e}"))
            })?;
            output.print_result(&json);
        }
    }
    Ok(())
}

fn print_dump(analysis: &SceneAnalysis, options: &ScanOptions, output: &OutputHandler) {
    let dump = format_dump(&analysis.lines, &options.indent);
    output.print_result(dump.trim_end_matches('\n'));
}
