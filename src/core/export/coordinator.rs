//! Export coordinator - main orchestrator for the export process
//!
//! This module runs the six category/window operations. Each one fetches its
//! sources, merges and projects the records, serializes them, and hands the
//! artifact to every sink. Operations never share state, and a failure in
//! one is recorded without stopping the others.

use crate::adapters::api::{ApiClient, FetchRequest, RecordSource};
use crate::adapters::sink::{create_sinks, ArtifactSink};
use crate::config::{FeedConfig, Settings};
use crate::core::export::serialize::serialize_records;
use crate::core::export::summary::{
    DestinationOutcome, ExportError, ExportSummary, OperationOutcome,
};
use crate::core::transform::{merge_records, project_records};
use crate::core::window::DateRangeResolver;
use crate::domain::{artifact_name, Artifact, Category, DateWindow, Result};
use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

/// Export coordinator
pub struct ExportCoordinator {
    config: FeedConfig,
    source: Arc<dyn RecordSource>,
    sinks: Vec<Arc<dyn ArtifactSink>>,
    today: NaiveDate,
    dry_run: bool,
    run_id: String,
}

impl ExportCoordinator {
    /// Create a coordinator talking to the configured API and sinks
    ///
    /// # Errors
    ///
    /// Returns `FeedError::Configuration` if the HTTP client or a sink cannot
    /// be configured.
    pub async fn new(settings: Settings) -> Result<Self> {
        let source: Arc<dyn RecordSource> =
            Arc::new(ApiClient::new(&settings.api, &settings.feed.http)?);
        let sinks = create_sinks(&settings.feed.output).await?;
        Ok(Self::with_parts(settings.feed, source, sinks))
    }

    /// Create a coordinator from already built parts
    pub fn with_parts(
        config: FeedConfig,
        source: Arc<dyn RecordSource>,
        sinks: Vec<Arc<dyn ArtifactSink>>,
    ) -> Self {
        Self {
            config,
            source,
            sinks,
            today: chrono::Local::now().date_naive(),
            dry_run: false,
            run_id: Uuid::new_v4().to_string(),
        }
    }

    /// Resolve windows relative to `today` instead of the local date
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Fetch and serialize without writing to any sink
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Execute the export
    ///
    /// This is the main entry point for the export process. It:
    /// 1. Resolves the history and onhand windows
    /// 2. Runs every category/window operation, at most
    ///    `export.max_concurrency` at a time
    /// 3. Collects the outcomes, in category then window order, into the summary
    ///
    /// # Errors
    ///
    /// Only window resolution can fail the whole run, with
    /// `FeedError::Configuration`, before any request is made. Operation
    /// failures are reported in the summary.
    pub async fn execute_export(&self) -> Result<ExportSummary> {
        let span = tracing::info_span!("export", run_id = %self.run_id);
        self.run().instrument(span).await
    }

    async fn run(&self) -> Result<ExportSummary> {
        let start_time = Instant::now();
        let mut summary = ExportSummary::new(self.run_id.clone(), self.dry_run);

        let windows = DateRangeResolver::new(self.config.date_ranges.clone()).resolve_all(self.today)?;
        for window in &windows {
            tracing::info!(
                window = %window.name(),
                start = %window.start(),
                end = %window.end(),
                "Resolved date window"
            );
        }

        let jobs: Vec<(Category, DateWindow)> = Category::ALL
            .iter()
            .flat_map(|category| windows.iter().map(move |window| (*category, *window)))
            .collect();

        tracing::info!(
            operations = jobs.len(),
            max_concurrency = self.config.export.max_concurrency,
            dry_run = self.dry_run,
            sinks = self.sinks.len(),
            "Starting export process"
        );

        summary.operations = stream::iter(jobs)
            .map(|(category, window)| self.run_operation(category, window))
            .buffered(self.config.export.max_concurrency.max(1))
            .collect()
            .await;
        summary.windows = windows;

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();
        Ok(summary)
    }

    async fn run_operation(&self, category: Category, window: DateWindow) -> OperationOutcome {
        let started = Instant::now();
        let name = artifact_name(category, window.name());
        let mut outcome = OperationOutcome::new(category, window, name.clone());

        let artifact = match self.build_artifact(category, window, &name).await {
            Ok(artifact) => artifact,
            Err(e) => {
                tracing::error!(
                    category = %category,
                    window = %window.name(),
                    error = %e,
                    "Failed to build artifact"
                );
                outcome.error = Some(ExportError::from(&e).with_context(format!("artifact={name}")));
                outcome.duration = started.elapsed();
                return outcome;
            }
        };

        outcome.record_count = artifact.record_count;
        outcome.sha256 = Some(artifact.sha256.clone());

        if self.dry_run {
            tracing::info!(
                artifact = %artifact.file_name,
                records = artifact.record_count,
                bytes = artifact.size(),
                "Dry run: skipping sinks"
            );
        } else {
            for sink in &self.sinks {
                outcome
                    .destinations
                    .push(self.write_to_sink(sink.as_ref(), &artifact).await);
            }
        }

        outcome.duration = started.elapsed();
        outcome
    }

    async fn build_artifact(
        &self,
        category: Category,
        window: DateWindow,
        name: &str,
    ) -> Result<Artifact> {
        let dataset = self.config.datasets.get(category);
        let primary_name = dataset.primary_source_name(category);

        let mut primary = Vec::new();
        let mut secondaries = Vec::new();
        for source in dataset.effective_sources(category) {
            let request = FetchRequest::for_source(category, window, &source, &dataset.fields);
            let records = project_records(self.source.fetch(&request).await?, &source.fields);
            if source.name == primary_name {
                primary = records;
            } else {
                secondaries.push(records);
            }
        }

        let mut merged = primary;
        for secondary in &secondaries {
            merged = merge_records(merged, secondary, &dataset.merge_key);
        }
        let records = project_records(merged, &dataset.fields);

        serialize_records(name, &records, &dataset.fields, self.config.output.format)
    }

    async fn write_to_sink(&self, sink: &dyn ArtifactSink, artifact: &Artifact) -> DestinationOutcome {
        match sink.write(artifact).await {
            Ok(location) => {
                tracing::info!(
                    artifact = %artifact.file_name,
                    destination = sink.name(),
                    location = %location,
                    records = artifact.record_count,
                    sha256 = %artifact.sha256,
                    "Wrote artifact"
                );
                DestinationOutcome::written(sink.name(), location)
            }
            Err(e) => {
                tracing::error!(
                    artifact = %artifact.file_name,
                    destination = sink.name(),
                    error = %e,
                    "Failed to write artifact"
                );
                DestinationOutcome::failed(
                    sink.name(),
                    ExportError::from(&e).with_context(format!("{} -> {}", artifact.name, sink.name())),
                )
            }
        }
    }
}
