mod commands;
mod config;
mod report;
mod util;

use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, error};
use scenedig_error::{ProjectErrorKind, ScenedigError};
use std::path::PathBuf;

use crate::config::ScanOptions;
use crate::util::OutputHandler;

#[derive(Parser)]
#[command(name = "scenedig", version, about = "Scene hierarchy dumps and unused script reports for Unity projects")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (can be used multiple times: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode: suppress explanatory output, show only raw results
    #[arg(short = 'q', long = "quiet", global = true)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum, Debug)]
enum HierarchyFormat {
    /// Indent prefix repeated per depth, one object per line
    Dump,
    /// Box-drawn tree
    Tree,
    /// JSON output
    Json,
}

#[derive(Clone, Copy, ValueEnum, Debug)]
enum ReportFormat {
    /// `Relative Path,GUID` rows with a header
    Csv,
    /// JSON output
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Dump every scene's hierarchy and write the unused script report
    Scan {
        /// Unity project root
        project: PathBuf,
        /// Directory receiving the `.dump` files and `UnusedScripts.csv`
        output: PathBuf,
        #[command(flatten)]
        render: RenderArgs,
        #[command(flatten)]
        jobs: JobsArgs,
    },
    /// Print the hierarchy of one scene
    Hierarchy {
        scene: PathBuf,
        #[arg(short, long, value_enum, default_value_t = HierarchyFormat::Dump)]
        format: HierarchyFormat,
        #[arg(
            long,
            help = "Use ASCII characters instead of Unicode box characters for tree output"
        )]
        ascii: bool,
        #[command(flatten)]
        render: RenderArgs,
    },
    /// Print scripts no scene references
    Unused {
        project: PathBuf,
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Csv)]
        format: ReportFormat,
        #[command(flatten)]
        jobs: JobsArgs,
    },
}

#[derive(clap::Args, Debug, Clone)]
struct RenderArgs {
    /// Prefix repeated once per depth level in dumps
    #[arg(long, default_value = config::DEFAULT_INDENT)]
    indent: String,

    /// Deepest hierarchy level to render (roots are level 0)
    #[arg(long)]
    max_depth: Option<usize>,
}

#[derive(clap::Args, Debug, Clone)]
struct JobsArgs {
    /// Number of worker threads for scene analysis (defaults to all cores)
    #[arg(short = 'j', long = "jobs")]
    jobs: Option<usize>,
}

fn scan_options(render: Option<RenderArgs>, jobs: Option<JobsArgs>) -> ScanOptions {
    let mut options = ScanOptions::default();
    if let Some(render) = render {
        options.indent = render.indent;
        options.max_depth = render.max_depth;
    }
    options.jobs = jobs.and_then(|j| j.jobs);
    options.validate()
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout and succeed; usage errors exit 1
            let _ = e.print();
            std::process::exit(if e.use_stderr() { 1 } else { 0 });
        }
    };
    init_logging(cli.verbose);

    if let Err(e) = run_main(cli) {
        error!("{}", e.user_message());
        std::process::exit(exit_code(&e));
    }
}

/// 2 for an unusable project path, 1 for everything else, usage errors included
fn exit_code(err: &ScenedigError) -> i32 {
    match err {
        ScenedigError::Project {
            kind: ProjectErrorKind::InvalidRoot,
            ..
        } => 2,
        _ => 1,
    }
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => log::LevelFilter::Warn,  // Default: only warnings and errors
        1 => log::LevelFilter::Info,  // -v: info level
        2 => log::LevelFilter::Debug, // -vv: debug level
        _ => log::LevelFilter::Trace, // -vvv+: trace level (everything)
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .format(|buf, record| {
            use std::io::Write;
            let level_style = match record.level() {
                log::Level::Error => "\x1b[31mERROR\x1b[0m", // Red
                log::Level::Warn => "\x1b[33mWARN\x1b[0m",   // Yellow
                log::Level::Info => "\x1b[32mINFO\x1b[0m",   // Green
                log::Level::Debug => "\x1b[36mDEBUG\x1b[0m", // Cyan
                log::Level::Trace => "\x1b[35mTRACE\x1b[0m", // Magenta
            };

            writeln!(buf, "[{}] {}", level_style, record.args())
        })
        .init();
}

fn run_main(cli: Cli) -> Result<(), ScenedigError> {
    let output = OutputHandler::new(cli.quiet);
    match cli.command {
        Commands::Scan {
            project,
            output: output_dir,
            render,
            jobs,
        } => {
            debug!("scan {} -> {}", project.display(), output_dir.display());
            let options = scan_options(Some(render), Some(jobs));
            commands::cmd_scan(&project, &output_dir, &options, &output)
                .map(|_| ())
                .map_err(|e| e.with_command("scan"))
        }
        Commands::Hierarchy {
            scene,
            format,
            ascii,
            render,
        } => {
            let options = scan_options(Some(render), None);
            commands::cmd_hierarchy(&scene, format, ascii, &options, &output)
                .map_err(|e| e.with_command("hierarchy"))
        }
        Commands::Unused {
            project,
            format,
            jobs,
        } => {
            let options = scan_options(None, Some(jobs));
            commands::cmd_unused(&project, format, &options, &output)
                .map_err(|e| e.with_command("unused"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hierarchy_rejects_jobs_flag() {
        let err = Cli::try_parse_from(["scenedig", "hierarchy", "Main.unity", "--jobs", "4"])
            .err()
            .map(|e| e.kind());
        assert_eq!(err, Some(clap::error::ErrorKind::UnknownArgument));
    }

    #[test]
    fn test_scan_accepts_render_and_jobs_flags() {
        let cli = Cli::try_parse_from([
            "scenedig", "scan", "proj", "out", "--indent", "  ", "--max-depth", "3", "-j", "0",
        ])
        .unwrap();
        let Commands::Scan { render, jobs, .. } = cli.command else {
            panic!("expected scan");
        };
        let options = scan_options(Some(render), Some(jobs));
        assert_eq!(options.indent, "  ");
        assert_eq!(options.max_depth, Some(3));
        assert_eq!(options.jobs, Some(1));
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(&ScenedigError::project_invalid_root("nope")), 2);
        assert_eq!(exit_code(&ScenedigError::cli_execution_failed("boom")), 1);
    }

    #[test]
    fn test_usage_errors_report_on_stderr() {
        let err = Cli::try_parse_from(["scenedig", "scan", "only-project"]).err();
        assert!(err.is_some_and(|e| e.use_stderr()));
        let help = Cli::try_parse_from(["scenedig", "--help"]).err();
        assert!(help.is_some_and(|e| !e.use_stderr()));
    }
}
