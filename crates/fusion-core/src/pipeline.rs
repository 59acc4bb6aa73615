//! Fusion pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Read**: extract every selected (table, view) source concurrently
//! 2. **Transform**: prefix field names with their source's name
//! 3. **Fuse**: left fold of the cartesian merge over the sources
//! 4. **Switch view**: bring the output table into focus
//! 5. **Clear**: delete every field and record of the output table
//! 6. **Write**: create the merged fields and insert the merged records
//!
//! The merged table is fully computed before the output table is touched,
//! so a failure while reading or merging leaves the destination intact.

use std::time::Instant;

use fusion_model::{NormalizedTable, TableId, ViewId};
use fusion_store::TableStore;
use futures_util::future::try_join_all;
use serde::{Deserialize, Serialize};
use tracing::{Instrument, debug, info, info_span};

use crate::error::{FusionError, Result, WriteStep};
use crate::extract::extract_table_view;
use crate::materialize::{clear_table, write_table};
use crate::merge::fold_tables;
use crate::options::FusionOptions;
use crate::progress::{NoopReporter, ProgressReporter, Stage};
use crate::rename::{ensure_disjoint, rename_fields_with, resolve_prefixes};

static NOOP: NoopReporter = NoopReporter;

/// One selected source: a view of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceSelection {
    pub table: TableId,
    pub view: ViewId,
}

impl SourceSelection {
    pub fn new(table: TableId, view: ViewId) -> Self {
        Self { table, view }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FusionRequest {
    /// Sources in fold order.
    pub sources: Vec<SourceSelection>,
    pub output: TableId,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FusionSummary {
    pub output: TableId,
    pub source_count: usize,
    pub field_names: Vec<String>,
    pub record_count: usize,
    pub fields_deleted: usize,
    pub records_deleted: usize,
    pub duration_ms: u128,
}

pub struct FusionPipeline<'a, S: TableStore + ?Sized> {
    store: &'a S,
    options: FusionOptions,
    reporter: &'a dyn ProgressReporter,
}

impl<'a, S: TableStore + ?Sized> FusionPipeline<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            options: FusionOptions::default(),
            reporter: &NOOP,
        }
    }

    pub fn with_options(mut self, options: FusionOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_reporter(mut self, reporter: &'a dyn ProgressReporter) -> Self {
        self.reporter = reporter;
        self
    }

    /// Runs every stage and rewrites the output table.
    ///
    /// # Errors
    ///
    /// - [`FusionError::Validation`] when fewer than two sources are given;
    ///   nothing is read or written.
    /// - [`FusionError::NotFound`] when a source vanished; the output table
    ///   is untouched.
    /// - [`FusionError::Write`] when the host rejects a change to the output
    ///   table; earlier changes are not rolled back.
    pub async fn run(&self, request: &FusionRequest) -> Result<FusionSummary> {
        let span = info_span!(
            "fusion",
            output = %request.output,
            source_count = request.sources.len()
        );
        self.run_inner(request).instrument(span).await
    }

    async fn run_inner(&self, request: &FusionRequest) -> Result<FusionSummary> {
        let start = Instant::now();
        let fused = self.fuse(&request.sources).await?;
        fused.validate()?;

        let output = &request.output;
        if self.options.switch_to_output {
            self.reporter.stage(Stage::SwitchView);
            self.store
                .switch_to_table(output)
                .await
                .map_err(|source| FusionError::write(WriteStep::SwitchView, output, source))?;
        }

        self.reporter.stage(Stage::Clear);
        let cleared = clear_table(self.store, output).await?;

        self.reporter.stage(Stage::Write);
        let written = write_table(self.store, output, &fused).await?;

        self.reporter.stage(Stage::Done);
        let summary = FusionSummary {
            output: output.clone(),
            source_count: request.sources.len(),
            field_names: fused.field_names,
            record_count: written.records_written,
            fields_deleted: cleared.fields_deleted,
            records_deleted: cleared.records_deleted,
            duration_ms: start.elapsed().as_millis(),
        };
        info!(
            output = %summary.output,
            field_count = summary.field_names.len(),
            record_count = summary.record_count,
            duration_ms = summary.duration_ms,
            "fusion complete"
        );
        Ok(summary)
    }

    /// Reads, renames and merges the sources without touching any output
    /// table.
    pub async fn fuse(&self, sources: &[SourceSelection]) -> Result<NormalizedTable> {
        if sources.len() < 2 {
            return Err(FusionError::Validation {
                count: sources.len(),
            });
        }

        self.reporter.stage(Stage::Read);
        let read_start = Instant::now();
        let tables = try_join_all(
            sources
                .iter()
                .map(|source| extract_table_view(self.store, &source.table, &source.view)),
        )
        .await?;
        info!(
            table_count = tables.len(),
            record_count = tables.iter().map(NormalizedTable::record_count).sum::<usize>(),
            duration_ms = read_start.elapsed().as_millis(),
            "read sources"
        );

        self.reporter.stage(Stage::Transform);
        let renamed = self.rename_all(&tables);
        ensure_disjoint(&renamed)?;

        self.reporter.stage(Stage::Fuse);
        let fused = fold_tables(&renamed)?;
        debug!(
            field_count = fused.field_count(),
            record_count = fused.record_count(),
            "fused sources"
        );
        Ok(fused)
    }

    fn rename_all(&self, tables: &[NormalizedTable]) -> Vec<NormalizedTable> {
        let separator = self.options.separator.as_str();
        if self.options.disambiguate_duplicate_names {
            let prefixes = resolve_prefixes(tables, separator);
            tables
                .iter()
                .zip(&prefixes)
                .map(|(table, prefix)| rename_fields_with(table, prefix, separator))
                .collect()
        } else {
            tables
                .iter()
                .map(|table| rename_fields_with(table, &table.name, separator))
                .collect()
        }
    }
}
