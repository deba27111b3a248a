use anyhow::Result;
use comfy_table::Table;
use tracing::{info, info_span};

use ev_cli::pipeline::{output, run_pipeline, write_issues_json};
use ev_model::{PipelineConfig, SourceKind};

use crate::cli::BuildArgs;
use crate::summary::apply_table_style;
use crate::types::BuildResult;

pub fn run_sources() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Source", "Default file", "Description"]);
    apply_table_style(&mut table);
    for kind in SourceKind::ALL {
        table.add_row(vec![
            kind.to_string(),
            kind.default_file_name().to_string(),
            kind.description().to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub fn run_build(args: &BuildArgs) -> Result<BuildResult> {
    let config = build_config(args);
    let build_span = info_span!("build", input_dir = %config.input_dir.display());
    let _build_guard = build_span.enter();

    let mut run = run_pipeline(&config)?;

    let output_path = if args.dry_run {
        info!("dry run: output not written");
        None
    } else {
        Some(info_span!("output").in_scope(|| output(&mut run.frame, &config))?)
    };

    if let Some(path) = &args.issues_json {
        write_issues_json(path, &run.report)?;
    }

    let has_errors = run.report.has_errors();
    Ok(BuildResult {
        run,
        output_path,
        issues_json: args.issues_json.clone(),
        preview_rows: config.preview_rows,
        has_errors,
    })
}

fn build_config(args: &BuildArgs) -> PipelineConfig {
    let mut config = PipelineConfig::default().with_input_dir(&args.input_dir);
    if let Some(path) = &args.output {
        config = config.with_output_path(path);
    }
    if let Some(rows) = args.preview_rows {
        config = config.with_preview_rows(rows);
    }
    if let Some(marker) = &args.missing_value {
        config = config.with_missing_value(marker);
    }
    config
}
