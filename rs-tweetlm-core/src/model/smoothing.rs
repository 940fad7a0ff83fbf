use serde::{Deserialize, Serialize};

use super::ngram_counts::{NGramCounts, START_MARKER};

/// The λ-weights of the 4-term interpolation formula.
///
/// The weights must form a convex combination (non-negative, summing
/// to 1) for the computed probabilities to stay well-formed:
/// - `l1` weights the trigram/bigram ratio
/// - `l2` weights the bigram/unigram ratio
/// - `l3` weights the unigram/total ratio
/// - `l4` weights the smoothing floor `1 / (2 · total)`
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct InterpolationWeights {
	l1: f64,
	l2: f64,
	l3: f64,
	l4: f64,
}

impl Default for InterpolationWeights {
	/// The recommended defaults: 0.85 / 0.10 / 0.04 / 0.01.
	fn default() -> Self {
		Self { l1: 0.85, l2: 0.10, l3: 0.04, l4: 0.01 }
	}
}

impl InterpolationWeights {
	/// Creates a validated set of weights.
	///
	/// # Errors
	/// Returns an error if any weight is negative or not finite, or if
	/// the four weights do not sum to 1 (within a small tolerance).
	pub fn new(l1: f64, l2: f64, l3: f64, l4: f64) -> Result<Self, String> {
		for weight in [l1, l2, l3, l4] {
			if !weight.is_finite() || weight < 0.0 {
				return Err(format!("Weights must be finite and non-negative, got {}", weight));
			}
		}
		let sum = l1 + l2 + l3 + l4;
		if (sum - 1.0).abs() > 1e-9 {
			return Err(format!("Weights must sum to 1.0, got {}", sum));
		}
		Ok(Self { l1, l2, l3, l4 })
	}
}

/// Computes the smoothed probability of a token sequence given the
/// three frequency tables.
///
/// # Behavior
/// - The sequence is bracketed for order 3 and scanned with aligned
///   trigram/bigram/unigram windows: for window `i` the trigram key is
///   `w[i..i+3]`, the bigram key `w[i..i+2]`, the unigram key `w[i]`.
/// - Windows whose trigram key still contains a start marker form the
///   start-context group, scored with the 2-term formula
///   `l1·(x/y) + l4/(2·total)`; the rest form the interior group with
///   the full 4-term interpolation.
/// - Each group's probability is the product over its windows, with a
///   default of `l4/(2·total)` when the group is empty.
/// - If either group's product is exactly 0.0 the zero factor is
///   dropped and the other factor alone is returned, so one missing
///   n-gram class does not collapse the whole score.
///
/// An n-gram key absent from its table contributes count 0; every
/// division is guarded so a zero denominator yields a zero term.
///
/// `total_words` must be strictly positive (caller-checked).
pub(crate) fn sentence_probability(
	tokens: &[String],
	unigrams: &NGramCounts,
	bigrams: &NGramCounts,
	trigrams: &NGramCounts,
	weights: &InterpolationWeights,
	total_words: u64,
) -> f64 {
	let total = total_words as f64;
	let floor = weights.l4 / (2.0 * total);

	let bracketed = NGramCounts::bracket(tokens, 3);
	let tri_keys = NGramCounts::window_keys(&bracketed, 3);
	let bi_keys = NGramCounts::window_keys(&bracketed, 2);
	let uni_keys = NGramCounts::window_keys(&bracketed, 1);

	let mut start_context: Option<f64> = None;
	let mut interior: Option<f64> = None;

	for (i, tri_key) in tri_keys.iter().enumerate() {
		let x = trigrams.get(tri_key) as f64;
		let y = bigrams.get(&bi_keys[i]) as f64;
		let p3 = if y != 0.0 { x / y } else { 0.0 };

		if tri_key.contains(START_MARKER) {
			let p = weights.l1 * p3 + floor;
			start_context = Some(start_context.unwrap_or(1.0) * p);
		} else {
			let z = unigrams.get(&uni_keys[i]) as f64;
			let (p2, p1) = if z != 0.0 { (y / z, z / total) } else { (0.0, 0.0) };
			let p = weights.l1 * p3 + weights.l2 * p2 + weights.l3 * p1 + floor;
			interior = Some(interior.unwrap_or(1.0) * p);
		}
	}

	let start_context = start_context.unwrap_or(floor);
	let interior = interior.unwrap_or(floor);

	// Tolerate sparse start-of-sentence data: a factor that underflowed
	// or collapsed to zero is dropped instead of zeroing the score.
	if interior == 0.0 {
		start_context
	} else if start_context == 0.0 {
		interior
	} else {
		interior * start_context
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn toks(words: &[&str]) -> Vec<String> {
		words.iter().map(|w| w.to_string()).collect()
	}

	fn tables(samples: &[&[&str]]) -> (NGramCounts, NGramCounts, NGramCounts) {
		let mut unigrams = NGramCounts::new(1).unwrap();
		let mut bigrams = NGramCounts::new(2).unwrap();
		let mut trigrams = NGramCounts::new(3).unwrap();
		for sample in samples {
			let tokens = toks(sample);
			unigrams.add_sample(&tokens);
			bigrams.add_sample(&tokens);
			trigrams.add_sample(&tokens);
		}
		(unigrams, bigrams, trigrams)
	}

	fn score(
		sentence: &[&str],
		tables: &(NGramCounts, NGramCounts, NGramCounts),
		weights: &InterpolationWeights,
	) -> f64 {
		let (unigrams, bigrams, trigrams) = tables;
		sentence_probability(&toks(sentence), unigrams, bigrams, trigrams, weights, unigrams.total())
	}

	#[test]
	fn weights_must_sum_to_one() {
		assert!(InterpolationWeights::new(0.85, 0.10, 0.04, 0.01).is_ok());
		assert!(InterpolationWeights::new(0.9, 0.2, 0.04, 0.01).is_err());
		assert!(InterpolationWeights::new(1.2, -0.24, 0.03, 0.01).is_err());
		assert!(InterpolationWeights::new(f64::NAN, 0.5, 0.3, 0.2).is_err());
	}

	#[test]
	fn unseen_sentence_is_strictly_positive() {
		let t = tables(&[&["the", "cat", "sat"], &["the", "dog", "sat"]]);
		let p = score(&["zebra", "quantum", "flux"], &t, &InterpolationWeights::default());
		assert!(p > 0.0);
	}

	#[test]
	fn seen_sentence_outscores_scrambled_version() {
		let t = tables(&[&["the", "cat", "sat"], &["the", "dog", "sat"]]);
		let weights = InterpolationWeights::default();
		let seen = score(&["the", "cat", "sat"], &t, &weights);
		let scrambled = score(&["cat", "the", "sat"], &t, &weights);
		assert!(seen > scrambled);
	}

	#[test]
	fn empty_sentence_yields_the_smoothing_floor_for_the_interior_group() {
		let t = tables(&[&["a", "b"]]);
		// Bracketed form is [*, *, ~STOP~]: one start-context window,
		// no interior windows, so the interior factor is the floor.
		let p = score(&[], &t, &InterpolationWeights::default());
		assert!(p > 0.0);
	}

	#[test]
	fn raising_the_trigram_weight_does_not_lower_an_observed_sentence() {
		let t = tables(&[&["the", "cat", "sat"], &["the", "dog", "sat"]]);
		let low = score(&["the", "cat", "sat"], &t, &InterpolationWeights::default());
		let bumped = InterpolationWeights::new(0.90, 0.05, 0.04, 0.01).unwrap();
		let high = score(&["the", "cat", "sat"], &t, &bumped);
		assert!(high >= low);
	}

	#[test]
	fn probabilities_stay_in_the_unit_interval_for_trained_data() {
		let t = tables(&[&["the", "cat", "sat"], &["the", "dog", "sat"]]);
		let p = score(&["the", "cat", "sat"], &t, &InterpolationWeights::default());
		assert!(p > 0.0 && p <= 1.0);
	}
}
