use scenedig_tracer::RenderOptions;

pub const DEFAULT_INDENT: &str = "--";
pub const UNUSED_REPORT_FILE: &str = "UnusedScripts.csv";
pub const DUMP_EXTENSION: &str = "dump";
/// Deeper hierarchies print as dumps instead of drawn trees.
pub const TREE_DEPTH_LIMIT: usize = 256;

#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub indent: String,
    pub max_depth: Option<usize>,
    pub jobs: Option<usize>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT.to_string(),
            max_depth: None,
            jobs: None,
        }
    }
}

impl ScanOptions {
    pub fn validate(self) -> Self {
        let jobs = self.jobs.map(|n| n.max(1));
        Self { jobs, ..self }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            max_depth: self.max_depth,
        }
    }
}
