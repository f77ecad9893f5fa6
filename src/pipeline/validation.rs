//! Validation engine for summarization configs.
//!
//! The engine runs all registered [`ValidationRule`]s against a
//! [`SummaryConfig`] and collects every diagnostic into a
//! [`ValidationReport`]. It never short-circuits on the first error, so users
//! see all problems at once.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use transcript_rank::pipeline::validation::ValidationEngine;
//!
//! let engine = ValidationEngine::with_defaults();
//! let report = engine.validate(&config);
//! if report.has_errors() {
//!     for err in report.errors() {
//!         eprintln!("{err}");
//!     }
//! }
//! ```

use std::collections::HashMap;

use regex::Regex;
use serde::Serialize;

use super::error_code::ErrorCode;
use super::errors::ConfigDiagnostic;
use crate::types::SummaryConfig;

// ─── Findings ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The config cannot be used as is.
    Error,
    /// Accepted, but probably not what the user meant.
    Warning,
}

/// One finding: a [`ConfigDiagnostic`] tagged with its severity. Serializes
/// flat, as `{"severity": ..., "code": ..., "path": ..., ...}`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: Severity,
    #[serde(flatten)]
    pub diagnostic: ConfigDiagnostic,
}

impl ValidationDiagnostic {
    pub fn new(severity: Severity, diagnostic: ConfigDiagnostic) -> Self {
        Self { severity, diagnostic }
    }

    pub fn error(diagnostic: ConfigDiagnostic) -> Self {
        Self::new(Severity::Error, diagnostic)
    }

    pub fn warning(diagnostic: ConfigDiagnostic) -> Self {
        Self::new(Severity::Warning, diagnostic)
    }
}

/// Everything the rules found, in rule registration order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &ConfigDiagnostic> {
        self.diagnostics
            .iter()
            .filter(move |d| d.severity == severity)
            .map(|d| &d.diagnostic)
    }

    pub fn errors(&self) -> impl Iterator<Item = &ConfigDiagnostic> {
        self.with_severity(Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ConfigDiagnostic> {
        self.with_severity(Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Usable config: warnings allowed, errors not.
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

// ─── Rule trait ─────────────────────────────────────────────────────────────

/// A single validation rule that inspects a [`SummaryConfig`] and returns
/// zero or more diagnostics.
///
/// Rules are stateless and must be `Send + Sync` so they can be shared
/// across threads.
pub trait ValidationRule: Send + Sync {
    /// Short, stable identifier for this rule (e.g., `"selection_ratio"`).
    fn name(&self) -> &str;

    /// Inspect `config` and return any findings.
    fn validate(&self, config: &SummaryConfig) -> Vec<ValidationDiagnostic>;
}

// ─── Engine ─────────────────────────────────────────────────────────────────

/// Runs a set of [`ValidationRule`]s against a [`SummaryConfig`] and collects
/// all diagnostics into a [`ValidationReport`].
pub struct ValidationEngine {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl ValidationEngine {
    /// Create an empty engine with no rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create an engine pre-loaded with the default rule set.
    pub fn with_defaults() -> Self {
        let mut engine = Self::new();
        engine.add_rule(Box::new(SelectionRatioRule));
        engine.add_rule(Box::new(SentenceBoundsRule));
        engine.add_rule(Box::new(UnitIntervalRule));
        engine.add_rule(Box::new(PageRankParamsRule));
        engine.add_rule(Box::new(ClosingPatternsRule));
        engine.add_rule(Box::new(UnknownFieldsRule));
        engine
    }

    /// Register an additional rule.
    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    /// Run all rules against `config` and return the collected report.
    pub fn validate(&self, config: &SummaryConfig) -> ValidationReport {
        let mut report = ValidationReport::default();
        for rule in &self.rules {
            report.diagnostics.extend(rule.validate(config));
        }
        report
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Concrete rules
// ═══════════════════════════════════════════════════════════════════════════

// ─── 1. selection_ratio in (0, 1] ───────────────────────────────────────────

struct SelectionRatioRule;

impl ValidationRule for SelectionRatioRule {
    fn name(&self) -> &str {
        "selection_ratio"
    }

    fn validate(&self, config: &SummaryConfig) -> Vec<ValidationDiagnostic> {
        let ratio = config.selection_ratio;
        if ratio.is_finite() && ratio > 0.0 && ratio <= 1.0 {
            return vec![];
        }
        vec![ValidationDiagnostic::error(
            ConfigDiagnostic::new(
                ErrorCode::OutOfRange,
                "/selection_ratio",
                format!("selection_ratio must be in (0, 1], got {ratio}"),
            )
            .with_hint("A typical lecture summary uses 0.2"),
        )]
    }
}

// ─── 2. min_sentences <= max_sentences, max_sentences > 0 ──────────────────

struct SentenceBoundsRule;

impl ValidationRule for SentenceBoundsRule {
    fn name(&self) -> &str {
        "sentence_bounds"
    }

    fn validate(&self, config: &SummaryConfig) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();

        if config.max_sentences == 0 {
            out.push(ValidationDiagnostic::error(
                ConfigDiagnostic::new(
                    ErrorCode::OutOfRange,
                    "/max_sentences",
                    "max_sentences must be greater than 0",
                )
                .with_hint("A summary needs room for at least one sentence"),
            ));
        }

        if config.min_sentences > config.max_sentences {
            out.push(ValidationDiagnostic::error(
                ConfigDiagnostic::new(
                    ErrorCode::InvalidCombo,
                    "/min_sentences",
                    format!(
                        "min_sentences ({}) exceeds max_sentences ({})",
                        config.min_sentences, config.max_sentences
                    ),
                )
                .with_hint("Lower min_sentences or raise max_sentences"),
            ));
        }

        out
    }
}

// ─── 3. threshold in [-1, 1], lambda in [0, 1] ──────────────────────────────

struct UnitIntervalRule;

impl ValidationRule for UnitIntervalRule {
    fn name(&self) -> &str {
        "unit_interval"
    }

    fn validate(&self, config: &SummaryConfig) -> Vec<ValidationDiagnostic> {
        let checks: &[(&str, f64, f64, f64)] = &[
            ("similarity_threshold", config.similarity_threshold, -1.0, 1.0),
            ("mmr_lambda", config.mmr_lambda, 0.0, 1.0),
        ];

        checks
            .iter()
            .filter(|&&(_, value, lo, hi)| !(value.is_finite() && value >= lo && value <= hi))
            .map(|&(field, value, lo, hi)| {
                ValidationDiagnostic::error(
                    ConfigDiagnostic::new(
                        ErrorCode::OutOfRange,
                        format!("/{field}"),
                        format!("{field} must be in [{lo}, {hi}], got {value}"),
                    )
                    .with_hint(format!("Set {field} to a value between {lo} and {hi}")),
                )
            })
            .collect()
    }
}

// ─── 4. PageRank parameters ─────────────────────────────────────────────────

struct PageRankParamsRule;

impl ValidationRule for PageRankParamsRule {
    fn name(&self) -> &str {
        "pagerank_params"
    }

    fn validate(&self, config: &SummaryConfig) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();

        if !(config.damping > 0.0 && config.damping < 1.0) {
            out.push(ValidationDiagnostic::error(
                ConfigDiagnostic::new(
                    ErrorCode::OutOfRange,
                    "/damping",
                    format!("damping must be in (0, 1), got {}", config.damping),
                )
                .with_hint("The conventional value is 0.85"),
            ));
        }

        if config.max_iterations == 0 {
            out.push(ValidationDiagnostic::error(ConfigDiagnostic::new(
                ErrorCode::OutOfRange,
                "/max_iterations",
                "max_iterations must be greater than 0",
            )));
        }

        if !(config.tolerance.is_finite() && config.tolerance > 0.0) {
            out.push(ValidationDiagnostic::error(ConfigDiagnostic::new(
                ErrorCode::OutOfRange,
                "/tolerance",
                format!("tolerance must be a positive number, got {}", config.tolerance),
            )));
        }

        out
    }
}

// ─── 5. Closing patterns must compile ───────────────────────────────────────

struct ClosingPatternsRule;

impl ValidationRule for ClosingPatternsRule {
    fn name(&self) -> &str {
        "closing_patterns"
    }

    fn validate(&self, config: &SummaryConfig) -> Vec<ValidationDiagnostic> {
        config
            .closing_patterns
            .iter()
            .enumerate()
            .filter_map(|(i, pattern)| {
                Regex::new(pattern).err().map(|err| {
                    ValidationDiagnostic::error(
                        ConfigDiagnostic::new(
                            ErrorCode::InvalidPattern,
                            format!("/closing_patterns/{i}"),
                            format!("pattern {pattern:?} does not compile: {err}"),
                        )
                        .with_hint("Escape regex metacharacters or fix the pattern"),
                    )
                })
            })
            .collect()
    }
}

// ─── 6. Unknown fields (strict → error, non-strict → warning) ──────────────

struct UnknownFieldsRule;

impl UnknownFieldsRule {
    /// One diagnostic per key captured by `#[serde(flatten)]` under `path`,
    /// sorted so output is stable across runs.
    fn check_unknowns(
        path: &str,
        unknowns: &HashMap<String, serde_json::Value>,
        strict: bool,
    ) -> Vec<ValidationDiagnostic> {
        let severity = if strict { Severity::Error } else { Severity::Warning };
        let mut keys: Vec<&String> = unknowns.keys().collect();
        keys.sort();
        keys.into_iter()
            .map(|key| {
                ValidationDiagnostic::new(
                    severity,
                    ConfigDiagnostic::new(
                        ErrorCode::UnknownField,
                        format!("{path}/{key}"),
                        format!("{key:?} is not a summary config field"),
                    )
                    .with_hint("Check the spelling, or set \"strict\": false to allow it"),
                )
            })
            .collect()
    }
}

impl ValidationRule for UnknownFieldsRule {
    fn name(&self) -> &str {
        "unknown_fields"
    }

    fn validate(&self, config: &SummaryConfig) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();
        out.extend(Self::check_unknowns("", &config.unknown_fields, config.strict));
        out.extend(Self::check_unknowns(
            "/preprocess",
            &config.preprocess.unknown_fields,
            config.strict,
        ));
        out
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: build a SummaryConfig from JSON.
    fn config(json: &str) -> SummaryConfig {
        serde_json::from_str(json).unwrap()
    }

    fn engine() -> ValidationEngine {
        ValidationEngine::with_defaults()
    }

    // ─── Valid configs ──────────────────────────────────────────────────

    #[test]
    fn test_default_config_is_valid() {
        let report = engine().validate(&SummaryConfig::default());
        assert!(report.is_valid());
        assert!(report.is_empty());
    }

    #[test]
    fn test_empty_json_is_valid() {
        let report = engine().validate(&config("{}"));
        assert!(report.is_empty());
    }

    // ─── Rule: selection_ratio ──────────────────────────────────────────

    #[test]
    fn test_zero_ratio_fails() {
        let report = engine().validate(&config(r#"{ "selection_ratio": 0.0 }"#));
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].code, ErrorCode::OutOfRange);
        assert_eq!(errs[0].path, "/selection_ratio");
    }

    #[test]
    fn test_ratio_of_one_is_valid() {
        let report = engine().validate(&config(r#"{ "selection_ratio": 1.0 }"#));
        assert!(report.is_valid());
    }

    // ─── Rule: sentence_bounds ──────────────────────────────────────────

    #[test]
    fn test_min_above_max_fails() {
        let report = engine().validate(&config(
            r#"{ "min_sentences": 10, "max_sentences": 3 }"#,
        ));
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].code, ErrorCode::InvalidCombo);
    }

    #[test]
    fn test_zero_max_reports_two_errors() {
        // max = 0 is out of range and also below the default min of 5
        let report = engine().validate(&config(r#"{ "max_sentences": 0 }"#));
        assert_eq!(report.errors().count(), 2);
    }

    // ─── Rule: unit_interval ────────────────────────────────────────────

    #[test]
    fn test_lambda_out_of_range_fails() {
        let report = engine().validate(&config(r#"{ "mmr_lambda": 1.5 }"#));
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].path, "/mmr_lambda");
    }

    #[test]
    fn test_negative_threshold_within_range_is_valid() {
        let report = engine().validate(&config(r#"{ "similarity_threshold": -0.5 }"#));
        assert!(report.is_valid());
    }

    #[test]
    fn test_threshold_and_lambda_both_bad() {
        let report = engine().validate(&config(
            r#"{ "similarity_threshold": 2.0, "mmr_lambda": -0.1 }"#,
        ));
        assert_eq!(report.errors().count(), 2);
    }

    // ─── Rule: pagerank_params ──────────────────────────────────────────

    #[test]
    fn test_damping_of_one_fails() {
        let report = engine().validate(&config(r#"{ "damping": 1.0 }"#));
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].path, "/damping");
    }

    #[test]
    fn test_zero_iterations_and_tolerance_fail() {
        let report = engine().validate(&config(
            r#"{ "max_iterations": 0, "tolerance": 0.0 }"#,
        ));
        assert_eq!(report.errors().count(), 2);
    }

    // ─── Rule: closing_patterns ─────────────────────────────────────────

    #[test]
    fn test_bad_closing_pattern_fails() {
        let report = engine().validate(&config(
            r#"{ "closing_patterns": ["감사합니다", "(unclosed"] }"#,
        ));
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].code, ErrorCode::InvalidPattern);
        assert_eq!(errs[0].path, "/closing_patterns/1");
    }

    // ─── Rule: unknown_fields (strict mode) ─────────────────────────────

    #[test]
    fn test_unknown_fields_non_strict_are_warnings() {
        let report = engine().validate(&config(r#"{ "strict": false, "bogus": 42 }"#));
        assert!(report.is_valid());
        let warns: Vec<_> = report.warnings().collect();
        assert_eq!(warns.len(), 1);
        assert_eq!(warns[0].code, ErrorCode::UnknownField);
        assert!(warns[0].path.contains("bogus"));
    }

    #[test]
    fn test_unknown_fields_strict_are_errors() {
        let report = engine().validate(&config(r#"{ "strict": true, "bogus": 42 }"#));
        assert!(report.has_errors());
        assert_eq!(report.errors().count(), 1);
    }

    #[test]
    fn test_unknown_preprocess_field_strict() {
        let report = engine().validate(&config(
            r#"{ "strict": true, "preprocess": { "max_fillers": 3 } }"#,
        ));
        let errs: Vec<_> = report.errors().collect();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].path, "/preprocess/max_fillers");
    }

    // ─── Engine ─────────────────────────────────────────────────────────

    #[test]
    fn test_multiple_rules_fire_independently() {
        let report = engine().validate(&config(
            r#"{
                "strict": true,
                "bogus": true,
                "selection_ratio": 2.0,
                "mmr_lambda": 3.0
            }"#,
        ));
        assert_eq!(report.errors().count(), 3);
    }

    #[test]
    fn test_custom_rule() {
        struct AlwaysWarnRule;
        impl ValidationRule for AlwaysWarnRule {
            fn name(&self) -> &str {
                "always_warn"
            }
            fn validate(&self, _config: &SummaryConfig) -> Vec<ValidationDiagnostic> {
                vec![ValidationDiagnostic::warning(ConfigDiagnostic::new(
                    ErrorCode::InvalidCombo,
                    "",
                    "custom warning",
                ))]
            }
        }

        let mut eng = ValidationEngine::new();
        eng.add_rule(Box::new(AlwaysWarnRule));
        let report = eng.validate(&SummaryConfig::default());
        assert!(report.is_valid());
        assert_eq!(report.warnings().count(), 1);
    }

    #[test]
    fn test_report_serializes_to_json() {
        let report = engine().validate(&config(r#"{ "mmr_lambda": 9.0 }"#));
        let json = serde_json::to_value(&report).unwrap();
        let diags = json["diagnostics"].as_array().unwrap();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0]["severity"], "error");
        assert_eq!(diags[0]["code"], "out_of_range");
    }
}
