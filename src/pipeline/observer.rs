//! Pipeline observer: hooks for logging, profiling, and debugging.
//!
//! Observers receive notifications at stage boundaries without coupling to
//! stage logic. Use cases include timing stages, capturing intermediate
//! artifacts for debugging, and emitting structured telemetry.
//!
//! All methods have empty default bodies, so an observer overrides only what
//! it needs. [`NoopObserver`] is the default and compiles away entirely.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::pipeline::artifacts::{Ranking, Sentence};
use crate::summarizer::similarity::SimilarityMatrix;

pub const STAGE_PREPROCESS: &str = "preprocess";
pub const STAGE_SEGMENT: &str = "segment";
pub const STAGE_EMBED: &str = "embed";
pub const STAGE_SIMILARITY: &str = "similarity";
pub const STAGE_RANK: &str = "rank";
pub const STAGE_SELECT: &str = "select";
pub const STAGE_FILTER: &str = "filter";
pub const STAGE_CLEAN: &str = "clean";

/// Every stage name in execution order.
pub const ALL_STAGES: &[&str] = &[
    STAGE_PREPROCESS,
    STAGE_SEGMENT,
    STAGE_EMBED,
    STAGE_SIMILARITY,
    STAGE_RANK,
    STAGE_SELECT,
    STAGE_FILTER,
    STAGE_CLEAN,
];

// ============================================================================
// StageClock / StageReport
// ============================================================================

/// Wall-clock timer for one stage.
#[derive(Debug, Clone, Copy)]
pub struct StageClock(Instant);

impl StageClock {
    pub fn start() -> Self {
        Self(Instant::now())
    }

    pub fn elapsed(&self) -> Duration {
        self.0.elapsed()
    }
}

/// What a stage reports when it finishes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageReport {
    elapsed: Duration,
    items: Option<usize>,
    iterations: Option<usize>,
    converged: Option<bool>,
}

impl StageReport {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            elapsed,
            ..Self::default()
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Number of artifacts the stage produced (sentences, vectors, rows, ...).
    pub fn items(&self) -> Option<usize> {
        self.items
    }

    pub fn iterations(&self) -> Option<usize> {
        self.iterations
    }

    pub fn converged(&self) -> Option<bool> {
        self.converged
    }
}

/// Fluent construction of a [`StageReport`] with optional metrics.
#[derive(Debug, Clone)]
pub struct StageReportBuilder(StageReport);

impl StageReportBuilder {
    pub fn new(elapsed: Duration) -> Self {
        Self(StageReport::new(elapsed))
    }

    pub fn items(mut self, items: usize) -> Self {
        self.0.items = Some(items);
        self
    }

    pub fn iterations(mut self, iterations: usize) -> Self {
        self.0.iterations = Some(iterations);
        self
    }

    pub fn converged(mut self, converged: bool) -> Self {
        self.0.converged = Some(converged);
        self
    }

    pub fn build(self) -> StageReport {
        self.0
    }
}

// ============================================================================
// PipelineObserver
// ============================================================================

/// Callbacks fired by [`Summarizer`](super::runner::Summarizer) while it runs.
///
/// Stage callbacks fire only for stages that actually run; a run that fails
/// early stops reporting at the failing stage.
pub trait PipelineObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}

    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}

    /// Segmented sentences, before embedding.
    fn on_sentences(&mut self, _sentences: &[Sentence]) {}

    fn on_similarity(&mut self, _matrix: &SimilarityMatrix) {}

    fn on_ranking(&mut self, _ranking: &Ranking) {}

    /// Selected indices in selection order, before filtering.
    fn on_selection(&mut self, _selected: &[usize]) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PipelineObserver for NoopObserver {}

/// Emits every stage report as a `debug!` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl PipelineObserver for TracingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        debug!(
            stage,
            elapsed_us = report.elapsed().as_micros() as u64,
            items = report.items(),
            iterations = report.iterations(),
            converged = report.converged(),
            "stage finished"
        );
    }

    fn on_ranking(&mut self, ranking: &Ranking) {
        debug!(method = ?ranking.method, sentences = ranking.len(), "ranking ready");
    }
}

/// Collects `(stage, report)` pairs in execution order.
#[derive(Debug, Clone, Default)]
pub struct StageTimingObserver {
    reports: Vec<(&'static str, StageReport)>,
}

impl StageTimingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reports(&self) -> &[(&'static str, StageReport)] {
        &self.reports
    }

    pub fn report(&self, stage: &str) -> Option<&StageReport> {
        self.reports
            .iter()
            .find(|(name, _)| *name == stage)
            .map(|(_, r)| r)
    }

    pub fn total_elapsed(&self) -> Duration {
        self.reports.iter().map(|(_, r)| r.elapsed()).sum()
    }
}

impl PipelineObserver for StageTimingObserver {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        self.reports.push((stage, report.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_builder_sets_metrics() {
        let report = StageReportBuilder::new(Duration::from_millis(3))
            .items(7)
            .iterations(42)
            .converged(true)
            .build();

        assert_eq!(report.elapsed(), Duration::from_millis(3));
        assert_eq!(report.items(), Some(7));
        assert_eq!(report.iterations(), Some(42));
        assert_eq!(report.converged(), Some(true));
    }

    #[test]
    fn test_plain_report_has_no_metrics() {
        let report = StageReport::new(Duration::ZERO);
        assert!(report.items().is_none());
        assert!(report.iterations().is_none());
    }

    #[test]
    fn test_timing_observer_collects_in_order() {
        let mut obs = StageTimingObserver::new();
        obs.on_stage_end(STAGE_SEGMENT, &StageReport::new(Duration::from_millis(1)));
        obs.on_stage_end(STAGE_EMBED, &StageReport::new(Duration::from_millis(2)));

        let names: Vec<_> = obs.reports().iter().map(|(n, _)| *n).collect();
        assert_eq!(names, vec![STAGE_SEGMENT, STAGE_EMBED]);
        assert_eq!(obs.total_elapsed(), Duration::from_millis(3));
        assert!(obs.report(STAGE_RANK).is_none());
    }

    #[test]
    fn test_stage_names_unique() {
        let mut names = ALL_STAGES.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ALL_STAGES.len());
    }
}
