//! Punctuation-based sentence segmentation
//!
//! A boundary is a sentence-ending mark (`.`, `?`, `!`) followed by at least
//! one whitespace character and then a character that can open a sentence
//! (ASCII uppercase or a Hangul syllable). Decimal points, abbreviations
//! followed by lowercase text, and punctuation without trailing whitespace
//! never split.

use crate::pipeline::artifacts::Sentence;
use crate::pipeline::traits::SentenceSplitter;

/// Default [`SentenceSplitter`] for transcripts.
#[derive(Debug, Clone, Copy, Default)]
pub struct PunctuationSegmenter;

impl PunctuationSegmenter {
    pub fn new() -> Self {
        Self
    }
}

fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '?' | '!')
}

fn opens_sentence(c: char) -> bool {
    c.is_ascii_uppercase() || ('\u{AC00}'..='\u{D7A3}').contains(&c)
}

fn push_fragment(out: &mut Vec<Sentence>, fragment: &str) {
    let fragment = fragment.trim();
    if !fragment.is_empty() {
        out.push(Sentence::new(out.len(), fragment));
    }
}

impl SentenceSplitter for PunctuationSegmenter {
    fn split(&self, text: &str) -> Vec<Sentence> {
        let text = text.trim();
        let mut sentences = Vec::new();
        if text.is_empty() {
            return sentences;
        }

        let mut start = 0;
        let mut chars = text.char_indices().peekable();

        while let Some((i, c)) = chars.next() {
            if !is_terminal(c) {
                continue;
            }
            let end = i + c.len_utf8();

            let mut saw_whitespace = false;
            while let Some(&(_, d)) = chars.peek() {
                if !d.is_whitespace() {
                    break;
                }
                saw_whitespace = true;
                chars.next();
            }
            if !saw_whitespace {
                continue;
            }

            if let Some(&(j, d)) = chars.peek() {
                if opens_sentence(d) {
                    push_fragment(&mut sentences, &text[start..end]);
                    start = j;
                }
            }
        }

        push_fragment(&mut sentences, &text[start..]);
        sentences
    }
}
