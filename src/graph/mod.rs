//! Sentence-similarity graph
//!
//! The weighted, undirected graph PageRank runs over, stored in CSR form.

pub mod csr;
