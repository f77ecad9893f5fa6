//! Natural Language Processing components
//!
//! Sentence segmentation, transcript normalization, tokenization and
//! stopword filtering.

pub mod preprocess;
pub mod segmenter;
pub mod stopwords;
pub mod tokenizer;
