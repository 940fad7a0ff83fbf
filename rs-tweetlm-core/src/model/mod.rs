//! Top-level module for the n-gram scoring system.
//!
//! This crate trains unigram/bigram/trigram frequency tables from a
//! corpus of token sequences and scores novel sentences with
//! interpolated smoothing. It includes:
//! - Per-order frequency tables (`NGramCounts`)
//! - Segmentation strategies for turning samples into tokens (`Segmentation`)
//! - Interpolation weights and the smoothing formula (`smoothing`)
//! - The top-level trained model (`CorpusModel`)

/// The top-level corpus model holding the three frequency tables.
///
/// Supports sequential and sharded training, JSON persistence with a
/// binary snapshot cache, merging, and batch sentence scoring.
pub mod corpus_model;

/// Fixed-order n-gram frequency table (order >= 1).
///
/// Handles sentence bracketing, window counting, and table merging.
pub mod ngram_counts;

/// Segmentation strategies turning a raw sample into a token sequence.
///
/// Each strategy is an explicit variant selected by the caller.
pub mod segmentation;

/// Interpolation weights and the smoothed sentence probability formula.
pub mod smoothing;
