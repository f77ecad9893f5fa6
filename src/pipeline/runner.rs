//! Pipeline runner: orchestrates stage execution and artifact flow.
//!
//! [`Summarizer`] holds the injectable front stages (preprocessor, sentence
//! splitter) and the shared [`EmbeddingService`]. Calling
//! [`Summarizer::summarize`] runs the stages in order, threading artifacts
//! between them and notifying an optional [`PipelineObserver`] at each
//! boundary.
//!
//! # Failure order
//!
//! Each check short-circuits with its own [`SummaryError`]:
//!
//! 1. embedding backend missing
//! 2. blank input
//! 3. blank after preprocessing (when enabled)
//! 4. no sentences, or a target count of zero
//! 5. embedding failed
//! 6. similarity matrix failed or empty
//! 7. empty ranking (a lone sentence is returned verbatim instead)
//! 8. empty selection
//! 9. nothing left after filtering and cleaning
//!
//! # Static dispatch
//!
//! `Summarizer` is generic over its stages, so the default stages are
//! zero-sized and cost nothing.

use rayon::prelude::*;
use tracing::debug;

use crate::embedding::EmbeddingService;
use crate::nlp::preprocess::FillerPreprocessor;
use crate::nlp::segmenter::PunctuationSegmenter;
use crate::pipeline::artifacts::{RankMethod, Ranking, Sentence, Summary, SummarySentence};
use crate::pipeline::errors::SummaryError;
use crate::pipeline::observer::{
    NoopObserver, PipelineObserver, StageClock, StageReport, StageReportBuilder, STAGE_CLEAN,
    STAGE_EMBED, STAGE_FILTER, STAGE_PREPROCESS, STAGE_RANK, STAGE_SEGMENT, STAGE_SELECT,
    STAGE_SIMILARITY,
};
use crate::pipeline::traits::{Preprocessor, SentenceSplitter};
use crate::summarizer::cleaner::NoiseCleaner;
use crate::summarizer::filter::ClosingFilter;
use crate::summarizer::ranker::GraphRanker;
use crate::summarizer::selector::SentenceSelector;
use crate::summarizer::similarity::SimilarityMatrix;
use crate::types::SummaryConfig;

/// Enter a tracing span for a pipeline stage. The span closes at the end of
/// the enclosing block.
macro_rules! trace_stage {
    ($name:expr) => {
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

// ============================================================================
// Summarizer: statically-composed front stages + shared embedder
// ============================================================================

/// Extractive summarizer for transcripts.
///
/// # Type parameters
///
/// | Param | Trait | Default impl |
/// |-------|-------|--------------|
/// | `Pre` | [`Preprocessor`] | [`FillerPreprocessor`] |
/// | `Seg` | [`SentenceSplitter`] | [`PunctuationSegmenter`] |
#[derive(Debug, Clone)]
pub struct Summarizer<Pre = FillerPreprocessor, Seg = PunctuationSegmenter> {
    pub preprocessor: Pre,
    pub splitter: Seg,
    service: EmbeddingService,
}

impl Summarizer {
    /// Summarizer with the default transcript stages.
    pub fn new(service: EmbeddingService) -> Self {
        Summarizer {
            preprocessor: FillerPreprocessor,
            splitter: PunctuationSegmenter,
            service,
        }
    }
}

impl<Pre, Seg> Summarizer<Pre, Seg> {
    /// Override the preprocessor stage.
    pub fn with_preprocessor<P: Preprocessor>(self, p: P) -> Summarizer<P, Seg> {
        Summarizer {
            preprocessor: p,
            splitter: self.splitter,
            service: self.service,
        }
    }

    /// Override the sentence splitter stage.
    pub fn with_splitter<S: SentenceSplitter>(self, s: S) -> Summarizer<Pre, S> {
        Summarizer {
            preprocessor: self.preprocessor,
            splitter: s,
            service: self.service,
        }
    }

    pub fn service(&self) -> &EmbeddingService {
        &self.service
    }
}

/// The regex-backed tail stages, compiled once per config and shared by
/// every document run with it.
#[derive(Debug, Clone)]
struct PatternStages {
    filter: Option<ClosingFilter>,
    cleaner: NoiseCleaner,
}

impl PatternStages {
    fn from_config(cfg: &SummaryConfig) -> Self {
        Self {
            filter: cfg.filter_closings.then(|| ClosingFilter::from_config(cfg)),
            cleaner: NoiseCleaner::from_config(cfg),
        }
    }
}

// ============================================================================
// Summarizer::summarize: execute stages in order
// ============================================================================

impl<Pre, Seg> Summarizer<Pre, Seg>
where
    Pre: Preprocessor,
    Seg: SentenceSplitter,
{
    /// Summarize `text` without an observer.
    pub fn summarize(&self, text: &str, cfg: &SummaryConfig) -> Result<Summary, SummaryError> {
        self.summarize_with_observer(text, cfg, &mut NoopObserver)
    }

    /// Summarize `text` into its newline-joined summary, or the failure's
    /// message. Callers that need to tell the two apart should use
    /// [`summarize`](Self::summarize).
    pub fn summarize_text(&self, text: &str, cfg: &SummaryConfig) -> String {
        match self.summarize(text, cfg) {
            Ok(summary) => summary.text(),
            Err(err) => err.to_string(),
        }
    }

    /// Execute the pipeline, producing a [`Summary`].
    ///
    /// Stages run in order:
    /// 1. Preprocess (only when `run_preprocessing` is set)
    /// 2. Segment
    /// 3. Embed
    /// 4. Similarity matrix
    /// 5. Rank
    /// 6. Select (MMR or top-k)
    /// 7. Filter closing remarks (only when `filter_closings` is set)
    /// 8. Clean and restore document order
    pub fn summarize_with_observer(
        &self,
        text: &str,
        cfg: &SummaryConfig,
        observer: &mut impl PipelineObserver,
    ) -> Result<Summary, SummaryError> {
        self.run(text, cfg, &PatternStages::from_config(cfg), observer)
    }

    fn run(
        &self,
        text: &str,
        cfg: &SummaryConfig,
        stages: &PatternStages,
        observer: &mut impl PipelineObserver,
    ) -> Result<Summary, SummaryError> {
        if !self.service.is_available() {
            return Err(SummaryError::EmbeddingUnavailable);
        }
        if text.trim().is_empty() {
            return Err(SummaryError::EmptyInput);
        }

        // Stage 0: Preprocess
        let processed = if cfg.run_preprocessing {
            trace_stage!(STAGE_PREPROCESS);
            observer.on_stage_start(STAGE_PREPROCESS);
            let clock = StageClock::start();
            let processed = self.preprocessor.normalize(text, cfg);
            observer.on_stage_end(STAGE_PREPROCESS, &StageReport::new(clock.elapsed()));
            processed
        } else {
            text.to_string()
        };
        if processed.trim().is_empty() {
            return Err(SummaryError::PreprocessingEmptiedInput);
        }

        // Stage 1: Segment
        let sentences = {
            trace_stage!(STAGE_SEGMENT);
            observer.on_stage_start(STAGE_SEGMENT);
            let clock = StageClock::start();
            let sentences = self.splitter.split(&processed);
            let report = StageReportBuilder::new(clock.elapsed())
                .items(sentences.len())
                .build();
            observer.on_stage_end(STAGE_SEGMENT, &report);
            sentences
        };
        observer.on_sentences(&sentences);
        if sentences.is_empty() {
            return Err(SummaryError::NoSentencesFound);
        }

        let target = cfg.target_sentence_count(sentences.len());
        if target == 0 {
            return Err(SummaryError::NoSentencesFound);
        }

        // Stage 2: Embed
        let embeddings = {
            trace_stage!(STAGE_EMBED);
            observer.on_stage_start(STAGE_EMBED);
            let clock = StageClock::start();
            let texts: Vec<&str> = sentences.iter().map(|s| s.text.as_str()).collect();
            let embeddings = match self.service.embed(&texts) {
                Ok(Some(embeddings)) => embeddings,
                Ok(None) => return Err(SummaryError::EmbeddingUnavailable),
                Err(err) => return Err(SummaryError::EmbeddingFailed(err.to_string())),
            };
            let report = StageReportBuilder::new(clock.elapsed())
                .items(embeddings.len())
                .build();
            observer.on_stage_end(STAGE_EMBED, &report);
            embeddings
        };

        // Stage 3: Similarity matrix
        let matrix = {
            trace_stage!(STAGE_SIMILARITY);
            observer.on_stage_start(STAGE_SIMILARITY);
            let clock = StageClock::start();
            let matrix = SimilarityMatrix::from_embeddings(&embeddings)
                .map_err(|err| SummaryError::SimilarityComputationFailed(err.to_string()))?;
            let report = StageReportBuilder::new(clock.elapsed())
                .items(matrix.size())
                .build();
            observer.on_stage_end(STAGE_SIMILARITY, &report);
            matrix
        };
        if matrix.is_empty() {
            return Err(SummaryError::SimilarityComputationFailed(
                "similarity matrix is empty".into(),
            ));
        }
        observer.on_similarity(&matrix);

        // Stage 4: Rank
        let ranking = {
            trace_stage!(STAGE_RANK);
            observer.on_stage_start(STAGE_RANK);
            let clock = StageClock::start();
            let ranking = GraphRanker::from_config(cfg).rank(&matrix);
            let report = StageReportBuilder::new(clock.elapsed())
                .items(ranking.len())
                .iterations(ranking.iterations)
                .converged(ranking.method == RankMethod::PageRank)
                .build();
            observer.on_stage_end(STAGE_RANK, &report);
            ranking
        };
        observer.on_ranking(&ranking);
        if ranking.is_empty() {
            return match sentences.as_slice() {
                [only] => Ok(verbatim(only, &ranking)),
                _ => Err(SummaryError::RankingFailed),
            };
        }

        // Stage 5: Select
        let selected = {
            trace_stage!(STAGE_SELECT);
            observer.on_stage_start(STAGE_SELECT);
            let clock = StageClock::start();
            let selected = SentenceSelector::from_config(cfg).select(&ranking, &matrix, target);
            let report = StageReportBuilder::new(clock.elapsed())
                .items(selected.len())
                .build();
            observer.on_stage_end(STAGE_SELECT, &report);
            selected
        };
        observer.on_selection(&selected);
        if selected.is_empty() {
            return Err(SummaryError::SelectionEmpty);
        }

        // Stage 6: Filter closing remarks
        let kept = match &stages.filter {
            Some(filter) => {
                trace_stage!(STAGE_FILTER);
                observer.on_stage_start(STAGE_FILTER);
                let clock = StageClock::start();
                let kept = filter.apply(&selected, &sentences);
                let report = StageReportBuilder::new(clock.elapsed())
                    .items(kept.len())
                    .build();
                observer.on_stage_end(STAGE_FILTER, &report);
                kept
            }
            None => selected.clone(),
        };
        if kept.is_empty() {
            return Err(SummaryError::FilteringEmptiedResult);
        }

        // Stage 7: Clean and restore document order
        let cleaned = {
            trace_stage!(STAGE_CLEAN);
            observer.on_stage_start(STAGE_CLEAN);
            let clock = StageClock::start();
            let cleaned = stages.cleaner.finalize(&kept, &sentences);
            let report = StageReportBuilder::new(clock.elapsed())
                .items(cleaned.len())
                .build();
            observer.on_stage_end(STAGE_CLEAN, &report);
            cleaned
        };
        if cleaned.is_empty() {
            return Err(SummaryError::FilteringEmptiedResult);
        }

        debug!(
            source = sentences.len(),
            target,
            selected = selected.len(),
            kept = cleaned.len(),
            method = ?ranking.method,
            "summary ready"
        );

        Ok(Summary {
            sentences: cleaned,
            selection_order: selected,
            rank_method: ranking.method,
            iterations: ranking.iterations,
            source_sentences: sentences.len(),
        })
    }
}

impl<Pre, Seg> Summarizer<Pre, Seg>
where
    Pre: Preprocessor + Sync,
    Seg: SentenceSplitter + Sync,
{
    /// Summarize independent documents in parallel. Results keep input
    /// order. Closing and noise patterns are compiled once for the batch.
    pub fn summarize_batch<S>(&self, texts: &[S], cfg: &SummaryConfig) -> Vec<Result<Summary, SummaryError>>
    where
        S: AsRef<str> + Sync,
    {
        let stages = PatternStages::from_config(cfg);
        texts
            .par_iter()
            .map(|text| self.run(text.as_ref(), cfg, &stages, &mut NoopObserver))
            .collect()
    }
}

fn verbatim(only: &Sentence, ranking: &Ranking) -> Summary {
    Summary {
        sentences: vec![SummarySentence {
            index: only.index,
            text: only.text.clone(),
        }],
        selection_order: vec![only.index],
        rank_method: ranking.method,
        iterations: ranking.iterations,
        source_sentences: 1,
    }
}

// ============================================================================
// Tests
// ============================================================================
