//! Summarization components
//!
//! Extractive summarization: cosine similarity between sentence embeddings,
//! PageRank centrality over the thresholded similarity graph, MMR
//! (Maximal Marginal Relevance) selection, then closing-remark filtering and
//! noise cleanup.

pub mod cleaner;
pub mod filter;
pub mod ranker;
pub mod selector;
pub mod similarity;
