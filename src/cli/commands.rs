//! Command execution
//!
//! Ties arguments, configuration, analysis and output together. A file
//! target runs a single-entry analysis; a directory target discovers and
//! analyzes every entry point in the repository.

use crate::cli::args::Args;
use crate::config::{file as config_file, ConfigBuilder};
use crate::core::{analyze_multiple_entry_points, Analyzer, ParseCache, RepoAnalysisOptions};
use crate::error::{DepgraphError, Result};
use crate::models::config::{OutputFormat, PartialSettings, Settings};
use crate::output::{dot, formatters, writers};
use std::sync::Arc;
use tracing::{debug, info};

/// Run the command described by the parsed arguments
pub fn run(args: &Args) -> Result<()> {
    if args.init {
        let path = config_file::write_default()?;
        info!(path = %path.display(), "wrote default configuration");
        println!("Created {}", path.display());
        return Ok(());
    }

    let file_settings = config_file::load(args.config.as_deref())?;
    let settings = ConfigBuilder::new()
        .merge(file_settings)
        .merge(PartialSettings::from(args))
        .build()?;

    execute(&settings)
}

/// Execute an analysis with fully-resolved settings
pub fn execute(settings: &Settings) -> Result<()> {
    let cache = Arc::new(if settings.cache_enabled {
        ParseCache::new()
    } else {
        ParseCache::disabled()
    });

    if settings.target_path.is_file() {
        run_single_entry(settings, cache)
    } else {
        run_repository(settings, cache)
    }
}

fn run_single_entry(settings: &Settings, cache: Arc<ParseCache>) -> Result<()> {
    debug!(entry = %settings.target_path.display(), "analyzing single entry point");

    let mut analyzer = Analyzer::with_cache(cache)?;
    let graph = analyzer.analyze_from_file(
        &settings.target_path,
        !settings.include_external,
        &settings.exclude_dirs,
    )?;

    if graph.packages.is_empty() {
        return Err(DepgraphError::analysis_failed("No packages found to analyze"));
    }

    let content = match settings.output_format {
        OutputFormat::Text => {
            formatters::format_graph_text(&graph, settings.use_colors, settings.verbose)
        }
        OutputFormat::Json => formatters::format_graph_json(&graph)?,
        OutputFormat::Dot => dot::render(&graph),
        OutputFormat::Csv => formatters::format_graph_csv(&graph)?,
    };

    writers::write_output(&content, settings.output_file.as_deref())
}

fn run_repository(settings: &Settings, cache: Arc<ParseCache>) -> Result<()> {
    debug!(repo = %settings.target_path.display(), "analyzing repository");

    let options = RepoAnalysisOptions {
        exclude_external: !settings.include_external,
        exclude_dirs: settings.exclude_dirs.clone(),
        parallel: settings.parallel,
        show_progress: settings.show_progress && !settings.quiet,
    };
    let result = analyze_multiple_entry_points(&cache, &settings.target_path, &options)?;

    if !result.success {
        let reason = result
            .error
            .clone()
            .unwrap_or_else(|| "repository analysis failed".to_string());
        return Err(DepgraphError::analysis_failed(reason));
    }

    let content = match settings.output_format {
        OutputFormat::Text => {
            formatters::format_multi_text(&result, settings.use_colors, settings.verbose)
        }
        OutputFormat::Json => formatters::format_multi_json(&result)?,
        OutputFormat::Dot => single_entry_dot(&result)?,
        OutputFormat::Csv => formatters::format_multi_csv(&result)?,
    };

    writers::write_output(&content, settings.output_file.as_deref())
}

/// DOT output covers one graph; a repository target is only renderable when
/// exactly one entry point was discovered.
fn single_entry_dot(result: &crate::models::entry::MultiEntryResult) -> Result<String> {
    match result.entry_points.as_slice() {
        [only] => Ok(only.dot_content.clone()),
        many => Err(DepgraphError::config_error(format!(
            "DOT output needs a single entry point, but {} were found; pass an entry file or use --output json",
            many.len()
        ))),
    }
}
