use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Start-of-sentence marker prepended `order - 1` times before windowing.
pub const START_MARKER: &str = "*";

/// Stop marker appended exactly once to every bracketed sequence.
pub const STOP_MARKER: &str = "~STOP~";

/// Delimiter joining the tokens of one window into an n-gram key.
pub const KEY_DELIMITER: &str = "_";

/// A frequency table for n-grams of a fixed order.
///
/// Every token sequence is bracketed with `(order - 1)` start markers
/// and one stop marker, then a window of width `order` slides across it
/// and each window's joined key is counted.
///
/// # Responsibilities
/// - Bracket token sequences consistently across orders
/// - Accumulate window counts over an entire training corpus
/// - Merge with another table of the same order (sharded training)
///
/// # Invariants
/// - `order` is always >= 1
/// - The count of a key is the number of times that exact token window
///   occurred anywhere in training
/// - Tables of different orders are built independently, never derived
///   from one another
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NGramCounts {
	/// The order of the table (window width).
	order: usize, // must be >= 1

	/// Mapping from joined n-gram key to occurrence count.
	counts: HashMap<String, u64>,
}

impl NGramCounts {
	/// Creates an empty frequency table of the given order.
	///
	/// # Errors
	/// Returns an error if `order` is 0.
	pub fn new(order: usize) -> Result<Self, String> {
		if order == 0 {
			return Err("order must be >= 1".to_owned());
		}
		Ok(Self { order, counts: HashMap::new() })
	}

	/// Rebuilds a table from a persisted flat key → count mapping.
	pub(crate) fn from_map(order: usize, counts: HashMap<String, u64>) -> Result<Self, String> {
		if order == 0 {
			return Err("order must be >= 1".to_owned());
		}
		Ok(Self { order, counts })
	}

	/// Returns the order of this table.
	pub fn order(&self) -> usize {
		self.order
	}

	/// Read-only view of the underlying key → count mapping,
	/// used for JSON persistence.
	pub(crate) fn as_map(&self) -> &HashMap<String, u64> {
		&self.counts
	}

	/// Brackets a token sequence for the given order: `(order - 1)`
	/// start markers in front, one stop marker at the end.
	pub fn bracket(tokens: &[String], order: usize) -> Vec<String> {
		let mut bracketed = Vec::with_capacity(tokens.len() + order);
		for _ in 1..order {
			bracketed.push(START_MARKER.to_owned());
		}
		bracketed.extend(tokens.iter().cloned());
		bracketed.push(STOP_MARKER.to_owned());
		bracketed
	}

	/// Joins every sliding window of the given width over an
	/// already-bracketed sequence into n-gram keys, in order.
	pub fn window_keys(bracketed: &[String], width: usize) -> Vec<String> {
		if width == 0 || bracketed.len() < width {
			return Vec::new();
		}
		bracketed
			.windows(width)
			.map(|window| window.join(KEY_DELIMITER))
			.collect()
	}

	/// Adds one token sequence to the table.
	///
	/// Brackets the sequence for this table's order and increments the
	/// count of every window key.
	pub fn add_sample(&mut self, tokens: &[String]) {
		let bracketed = Self::bracket(tokens, self.order);
		for key in Self::window_keys(&bracketed, self.order) {
			*self.counts.entry(key).or_insert(0) += 1;
		}
	}

	/// Returns the count for a key; an absent key is count 0, not an error.
	pub fn get(&self, key: &str) -> u64 {
		self.counts.get(key).copied().unwrap_or(0)
	}

	/// Total number of counted windows (for a unigram table this is the
	/// total word count used by the smoothing formula).
	pub fn total(&self) -> u64 {
		self.counts.values().sum()
	}

	/// Number of distinct keys in the table.
	pub fn len(&self) -> usize {
		self.counts.len()
	}

	/// Returns true if the table holds no keys.
	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}

	/// Merges another table into this one by summing counts per key.
	///
	/// Count aggregation is commutative and associative, so per-shard
	/// tables from parallel training can be merged in any order.
	///
	/// # Errors
	/// Returns an error if the table orders do not match.
	pub fn merge(&mut self, other: &Self) -> Result<(), String> {
		if self.order != other.order {
			return Err("Order mismatch".to_owned());
		}

		for (key, count) in &other.counts {
			*self.counts.entry(key.clone()).or_insert(0) += *count;
		}

		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn toks(words: &[&str]) -> Vec<String> {
		words.iter().map(|w| w.to_string()).collect()
	}

	#[test]
	fn bigram_counts_accumulate_across_samples() {
		let mut table = NGramCounts::new(2).unwrap();
		table.add_sample(&toks(&["the", "cat", "sat"]));
		table.add_sample(&toks(&["the", "dog", "sat"]));

		assert_eq!(table.get("*_the"), 2);
		assert_eq!(table.get("the_cat"), 1);
		assert_eq!(table.get("the_dog"), 1);
		assert_eq!(table.get("sat_~STOP~"), 2);
		assert_eq!(table.get("never_seen"), 0);
	}

	#[test]
	fn unigram_bracketing_has_no_start_markers() {
		let mut table = NGramCounts::new(1).unwrap();
		table.add_sample(&toks(&["a", "b"]));

		assert_eq!(table.get("a"), 1);
		assert_eq!(table.get("~STOP~"), 1);
		assert_eq!(table.get("*"), 0);
		assert_eq!(table.total(), 3);
	}

	#[test]
	fn trigram_bracketing_prepends_two_starts() {
		let bracketed = NGramCounts::bracket(&toks(&["hi"]), 3);
		assert_eq!(bracketed, toks(&["*", "*", "hi", "~STOP~"]));

		let keys = NGramCounts::window_keys(&bracketed, 3);
		assert_eq!(keys, vec!["*_*_hi", "*_hi_~STOP~"]);
	}

	#[test]
	fn merge_sums_counts_per_key() {
		let mut a = NGramCounts::new(2).unwrap();
		let mut b = NGramCounts::new(2).unwrap();
		a.add_sample(&toks(&["x", "y"]));
		b.add_sample(&toks(&["x", "y"]));
		b.add_sample(&toks(&["x", "z"]));

		a.merge(&b).unwrap();
		assert_eq!(a.get("x_y"), 2);
		assert_eq!(a.get("x_z"), 1);
	}

	#[test]
	fn merge_rejects_order_mismatch() {
		let mut a = NGramCounts::new(2).unwrap();
		let b = NGramCounts::new(3).unwrap();
		assert!(a.merge(&b).is_err());
	}

	#[test]
	fn zero_order_is_rejected() {
		assert!(NGramCounts::new(0).is_err());
	}
}
