//! Twitter-aware tokenization.
//!
//! Converts a raw text string into an ordered sequence of tokens:
//! - HTML character entities are normalized to literal Unicode first
//! - A single ordered alternation of lexical patterns scans the text
//! - Special token classes (URLs, emoticons, mentions, hashtags) collapse
//!   into canonical lowercase placeholder tokens unless case is preserved

/// The tokenizer itself.
///
/// Exposes `TweetTokenizer` with `tokenize` and a best-effort
/// byte-input variant for malformed encodings.
pub mod tweet_tokenizer;

/// HTML character entity normalization.
///
/// Numeric and named entities are resolved to Unicode characters;
/// unresolvable entities pass through untouched. Not exposed publicly.
mod entities;

/// Compiled lexical pattern tables.
///
/// One master alternation regex plus per-class regexes used to tag
/// special tokens. Not exposed publicly.
mod patterns;

pub use tweet_tokenizer::TweetTokenizer;
