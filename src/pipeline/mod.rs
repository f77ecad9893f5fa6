//! Summarization pipeline
//!
//! Typed artifacts, stage traits, the runner that threads artifacts between
//! stages, observer hooks, the error taxonomy, and configuration validation.

pub mod artifacts;
pub mod error_code;
pub mod errors;
pub mod observer;
pub mod runner;
pub mod traits;
pub mod validation;
