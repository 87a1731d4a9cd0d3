use super::analyze_project;
use crate::ReportFormat;
use crate::config::ScanOptions;
use crate::report::format_unused_csv;
use crate::util::OutputHandler;
use log::info;
use scenedig_error::ScenedigError;
use scenedig_parser::discover;
use std::path::Path;

/// Print the unused script report; stdout carries nothing but the report.
pub fn cmd_unused(
    project: &Path,
    format: ReportFormat,
    options: &ScanOptions,
    output: &OutputHandler,
) -> Result<(), ScenedigError> {
    let report = unused_report(project, format, options)?;
    output.print_result(report.trim_end_matches('\n'));
    Ok(())
}

fn unused_report(
    project: &Path,
    format: ReportFormat,
    options: &ScanOptions,
) -> Result<String, ScenedigError> {
    let files = discover(project)?;
    info!(
        "Found {} .cs files and {} .unity scene files",
        files.scripts.len(),
        files.scenes.len()
    );
    let analysis = analyze_project(project, &files, options)?;

    match format {
        ReportFormat::Csv => Ok(format_unused_csv(&analysis.unused)),
        ReportFormat::Json => serde_json::to_string_pretty(&analysis.unused).map_err(|e| {
            ScenedigError::cli_output_format(format!("Error serializing to JSON: {e}"))
        }),
    }
}
