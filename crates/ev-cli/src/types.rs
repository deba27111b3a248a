use std::path::PathBuf;

use ev_cli::pipeline::PipelineRun;

#[derive(Debug)]
pub struct BuildResult {
    pub run: PipelineRun,
    /// Written output file; `None` on a dry run.
    pub output_path: Option<PathBuf>,
    pub issues_json: Option<PathBuf>,
    pub preview_rows: usize,
    pub has_errors: bool,
}
