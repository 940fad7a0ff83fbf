//! Twitter-aware tokenization and n-gram sentence scoring library.
//!
//! This crate provides a batch-oriented statistical language model including:
//! - A Twitter-aware lexical tokenizer (URLs, mentions, hashtags, emoticons)
//! - Unigram/bigram/trigram frequency tables built from a training corpus
//! - Interpolated smoothing for scoring novel sentences
//! - JSON persistence of frequency tables plus a binary snapshot cache
//!
//! Only the high-level API is exposed publicly. Low-level components
//! are kept internal to ensure consistency and prevent misuse.

/// Tokenization of raw text into token sequences.
///
/// Normalizes HTML entities, scans with an ordered alternation of
/// lexical patterns, and canonicalizes special token classes.
pub mod tokenizer;

/// Frequency tables, smoothing, and the top-level corpus model.
///
/// This module exposes training, persistence, and sentence scoring while
/// keeping internal table representations private.
pub mod model;

/// I/O utilities (file loading, path helpers).
///
/// Not exposed
pub(crate) mod io;
