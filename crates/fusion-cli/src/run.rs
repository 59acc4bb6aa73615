//! Fusion against a workspace file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fusion_core::{
    FusionError, FusionOptions, FusionPipeline, FusionRequest, FusionSummary, ProgressReporter,
};
use fusion_store::{MemoryStore, SourceOption, list_sources};
use tracing::{info, warn};

use crate::resolve::{SourceArg, resolve_sources, resolve_table};

#[derive(Debug, Clone)]
pub struct RunSettings {
    pub workspace: PathBuf,
    pub sources: Vec<SourceArg>,
    /// Output table id or display name.
    pub output: String,
    pub options: FusionOptions,
    /// Run every stage but leave the workspace file unchanged.
    pub dry_run: bool,
}

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub summary: FusionSummary,
    pub output_name: String,
    pub saved: bool,
}

/// Loads the workspace, fuses the selected sources into the output table
/// and saves the workspace back unless this is a dry run.
///
/// The file is only written after a successful run.
///
/// # Errors
///
/// Fails with a [`FusionError::Validation`] (see [`is_validation`]) when
/// fewer than two sources are given, before the file is opened.
pub async fn run_fusion(settings: &RunSettings, reporter: &dyn ProgressReporter) -> Result<RunOutcome> {
    if settings.sources.len() < 2 {
        warn!(source_count = settings.sources.len(), "too few sources");
        return Err(FusionError::Validation {
            count: settings.sources.len(),
        }
        .into());
    }
    let path = settings.workspace.as_path();
    let store = open(path)?;

    let sources = resolve_sources(&store, &settings.sources)
        .await
        .context("resolve sources")?;
    let output = resolve_table(&store, &settings.output)
        .await
        .context("resolve output table")?;
    let request = FusionRequest {
        sources,
        output: output.id.clone(),
    };

    let summary = FusionPipeline::new(&store)
        .with_options(settings.options.clone())
        .with_reporter(reporter)
        .run(&request)
        .await
        .with_context(|| format!("fuse into table `{}`", output.name))?;

    let saved = if settings.dry_run {
        info!(path = %path.display(), "dry run, workspace not saved");
        false
    } else {
        store
            .save(path)
            .await
            .with_context(|| format!("save workspace {}", path.display()))?;
        true
    };
    Ok(RunOutcome {
        summary,
        output_name: output.name,
        saved,
    })
}

/// Every grid view of every table in the workspace.
pub async fn workspace_sources(path: &Path) -> Result<Vec<SourceOption>> {
    let store = open(path)?;
    list_sources(&store).await.context("list sources")
}

/// True when `error` is a refusal to run, not a failure while running.
pub fn is_validation(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<FusionError>()
        .is_some_and(FusionError::is_validation)
}

fn open(path: &Path) -> Result<MemoryStore> {
    MemoryStore::open(path).with_context(|| format!("open workspace {}", path.display()))
}
