use std::path::Path;
use std::sync::mpsc;
use std::thread;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::io;
use super::ngram_counts::NGramCounts;
use super::segmentation::Segmentation;
use super::smoothing::{self, InterpolationWeights};

/// File names of the three persisted frequency tables.
const UNIGRAM_FILE: &str = "unigram.json";
const BIGRAM_FILE: &str = "bigram.json";
const TRIGRAM_FILE: &str = "trigram.json";

/// The top-level trained model: one frequency table per order plus
/// provenance metadata.
///
/// This struct manages:
/// - `unigrams`, `bigrams`, `trigrams`: the three independently built
///   frequency tables, accumulated across the entire training corpus.
/// - `sources`: names of the corpora or table directories this model
///   was built or loaded from.
///
/// # Lifecycle
/// Tables are created fresh per training run, persisted as JSON keyed
/// by order, and reloaded verbatim for inference. Once loaded for
/// inference they are never mutated; there is no online update.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CorpusModel {
	unigrams: NGramCounts,
	bigrams: NGramCounts,
	trigrams: NGramCounts,
	sources: Vec<String>,
}

impl Default for CorpusModel {
	/// Returns an empty model with fresh tables of order 1, 2, and 3.
	fn default() -> Self {
		// Orders are fixed constants >= 1, construction cannot fail
		Self {
			unigrams: NGramCounts::new(1).unwrap(),
			bigrams: NGramCounts::new(2).unwrap(),
			trigrams: NGramCounts::new(3).unwrap(),
			sources: Vec::new(),
		}
	}
}

impl CorpusModel {
	/// Trains a model over an ordered sequence of samples.
	///
	/// Each sample is segmented with the given strategy and every table
	/// accumulates its bracketed window counts. All three tables use
	/// the same bracketing convention, so cross-order comparisons
	/// during scoring share prefixes.
	pub fn train(samples: &[String], segmentation: Segmentation) -> Self {
		let mut model = Self::default();
		for sample in samples {
			model.add_sample(sample, segmentation);
		}
		model
	}

	/// Trains a model by sharding the samples across threads and
	/// merging the per-shard tables.
	///
	/// # Behavior
	/// - Splits samples into chunks (based on CPU cores * factor).
	/// - Spawns threads training a partial model per chunk.
	/// - Merges all partial models by summing counts per key, which is
	///   commutative and associative, so the result is identical to
	///   sequential training.
	///
	/// # Errors
	/// Returns an error if merging fails (cannot happen for models
	/// built here, all tables share the fixed orders).
	pub fn train_parallel(samples: &[String], segmentation: Segmentation) -> Result<Self, String> {
		if samples.is_empty() {
			return Ok(Self::default());
		}

		let cpus = num_cpus::get();
		let factor = 8;
		let chunks = cpus * factor;
		let chunk_size = (samples.len() + chunks - 1) / chunks;
		debug!("training on {} samples in chunks of {}", samples.len(), chunk_size);

		let (tx, rx) = mpsc::channel();
		for chunk in samples.chunks(chunk_size) {
			let tx = tx.clone();
			let chunk: Vec<String> = chunk.to_vec();

			thread::spawn(move || {
				let shard = CorpusModel::train(&chunk, segmentation);
				tx.send(shard).expect("Failed to send from thread");
			});
		}
		drop(tx);

		let mut merged = Self::default();
		for shard in rx.iter() {
			merged.merge(&shard)?;
		}

		Ok(merged)
	}

	/// Trains from a raw corpus file (one sample per line), with a
	/// compact binary snapshot cached next to it.
	///
	/// # Behavior
	/// - If a `.bin` snapshot exists for the file, it is loaded
	///   directly via `postcard` instead of retraining.
	/// - Otherwise the file is read, trained in parallel, and the
	///   snapshot is written for future fast loading.
	pub fn from_corpus_file<P: AsRef<Path>>(
		filepath: P,
		segmentation: Segmentation,
	) -> Result<Self, Box<dyn std::error::Error>> {
		let snapshot_path = io::sibling_with_extension(&filepath, "bin")?;

		let mut model: Self;
		if snapshot_path.exists() {
			info!("loading snapshot {}", snapshot_path.display());
			let bytes = std::fs::read(&snapshot_path)?;
			model = postcard::from_bytes(&bytes)?;
		} else {
			let lines = io::read_lines(&filepath)?;
			model = Self::train_parallel(&lines, segmentation)?;
			let bytes = postcard::to_stdvec(&model)?;
			std::fs::write(&snapshot_path, bytes)?;
			info!("wrote snapshot {}", snapshot_path.display());
		}
		model.sources.push(io::source_name(&filepath)?);
		Ok(model)
	}

	/// Adds one sample to all three tables.
	pub fn add_sample(&mut self, sample: &str, segmentation: Segmentation) {
		let tokens = segmentation.segment(sample);
		self.unigrams.add_sample(&tokens);
		self.bigrams.add_sample(&tokens);
		self.trigrams.add_sample(&tokens);
	}

	/// Merges another model into this one.
	///
	/// Per-order tables are merged by summing counts per key; source
	/// names are appended.
	///
	/// # Errors
	/// Returns an error if any table orders do not match (cannot
	/// happen for models built by this type).
	pub fn merge(&mut self, other: &Self) -> Result<(), String> {
		self.unigrams.merge(&other.unigrams)?;
		self.bigrams.merge(&other.bigrams)?;
		self.trigrams.merge(&other.trigrams)?;
		self.sources.extend(other.sources.iter().cloned());
		Ok(())
	}

	/// Returns the list of corpus or table sources this model came from.
	pub fn sources(&self) -> &[String] {
		&self.sources
	}

	/// Total word count of the training corpus (the sum of all unigram
	/// counts, stop markers included).
	pub fn total_words(&self) -> u64 {
		self.unigrams.total()
	}

	/// Read-only access to the unigram table.
	pub fn unigrams(&self) -> &NGramCounts {
		&self.unigrams
	}

	/// Read-only access to the bigram table.
	pub fn bigrams(&self) -> &NGramCounts {
		&self.bigrams
	}

	/// Read-only access to the trigram table.
	pub fn trigrams(&self) -> &NGramCounts {
		&self.trigrams
	}

	/// Computes the smoothed probability of a token sequence.
	///
	/// # Errors
	/// Returns an error if the model has no training data (the total
	/// word count would be a zero denominator).
	pub fn sentence_probability(
		&self,
		tokens: &[String],
		weights: &InterpolationWeights,
	) -> Result<f64, String> {
		let total_words = self.total_words();
		if total_words == 0 {
			return Err("Model has no training data".to_owned());
		}
		Ok(smoothing::sentence_probability(
			tokens,
			&self.unigrams,
			&self.bigrams,
			&self.trigrams,
			weights,
			total_words,
		))
	}

	/// Scores an ordered sequence of samples, returning ordered
	/// `(sample, probability)` pairs suitable for tabular export.
	pub fn score_samples(
		&self,
		samples: &[String],
		segmentation: Segmentation,
		weights: &InterpolationWeights,
	) -> Result<Vec<(String, f64)>, String> {
		samples
			.iter()
			.map(|sample| {
				let tokens = segmentation.segment(sample);
				let probability = self.sentence_probability(&tokens, weights)?;
				Ok((sample.clone(), probability))
			})
			.collect()
	}

	/// Persists the three frequency tables as flat JSON objects
	/// (key → count) under `dir`, one file per order.
	pub fn save_tables<P: AsRef<Path>>(&self, dir: P) -> Result<(), Box<dyn std::error::Error>> {
		let dir = dir.as_ref();
		std::fs::create_dir_all(dir)?;

		for (file, table) in [
			(UNIGRAM_FILE, &self.unigrams),
			(BIGRAM_FILE, &self.bigrams),
			(TRIGRAM_FILE, &self.trigrams),
		] {
			let writer = std::io::BufWriter::new(std::fs::File::create(dir.join(file))?);
			serde_json::to_writer(writer, table.as_map())?;
		}
		info!("persisted tables to {}", dir.display());
		Ok(())
	}

	/// Reloads frequency tables persisted by `save_tables`.
	///
	/// # Errors
	/// A missing or corrupt table file is fatal to the inference run
	/// and is propagated; the caller must retrain before scoring.
	pub fn load_tables<P: AsRef<Path>>(dir: P) -> Result<Self, Box<dyn std::error::Error>> {
		let dir = dir.as_ref();

		let mut tables = Vec::with_capacity(3);
		for (order, file) in [(1, UNIGRAM_FILE), (2, BIGRAM_FILE), (3, TRIGRAM_FILE)] {
			let reader = std::io::BufReader::new(std::fs::File::open(dir.join(file))?);
			let counts: std::collections::HashMap<String, u64> = serde_json::from_reader(reader)?;
			tables.push(NGramCounts::from_map(order, counts)?);
		}

		let trigrams = tables.pop().unwrap();
		let bigrams = tables.pop().unwrap();
		let unigrams = tables.pop().unwrap();

		info!("loaded tables from {}", dir.display());
		Ok(Self {
			unigrams,
			bigrams,
			trigrams,
			sources: vec![io::source_name(dir)?],
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn samples(lines: &[&str]) -> Vec<String> {
		lines.iter().map(|l| l.to_string()).collect()
	}

	#[test]
	fn parallel_training_matches_sequential_training() {
		let corpus = samples(&[
			"the cat sat",
			"the dog sat",
			"a bird flew",
			"the cat slept",
			"another dog barked",
		]);
		let sequential = CorpusModel::train(&corpus, Segmentation::Whitespace);
		let parallel = CorpusModel::train_parallel(&corpus, Segmentation::Whitespace).unwrap();

		assert_eq!(sequential.unigrams(), parallel.unigrams());
		assert_eq!(sequential.bigrams(), parallel.bigrams());
		assert_eq!(sequential.trigrams(), parallel.trigrams());
	}

	#[test]
	fn tables_round_trip_through_json() {
		let corpus = samples(&["the cat sat", "the dog sat"]);
		let model = CorpusModel::train(&corpus, Segmentation::Whitespace);

		let dir = tempfile::tempdir().unwrap();
		model.save_tables(dir.path()).unwrap();
		let reloaded = CorpusModel::load_tables(dir.path()).unwrap();

		assert_eq!(model.unigrams(), reloaded.unigrams());
		assert_eq!(model.bigrams(), reloaded.bigrams());
		assert_eq!(model.trigrams(), reloaded.trigrams());
		assert_eq!(reloaded.bigrams().get("*_the"), 2);

		// Idempotence: re-persisting an unmodified load must preserve
		// the exact key/count content.
		let dir2 = tempfile::tempdir().unwrap();
		reloaded.save_tables(dir2.path()).unwrap();
		let reloaded_again = CorpusModel::load_tables(dir2.path()).unwrap();
		assert_eq!(reloaded.unigrams(), reloaded_again.unigrams());
		assert_eq!(reloaded.bigrams(), reloaded_again.bigrams());
		assert_eq!(reloaded.trigrams(), reloaded_again.trigrams());
	}

	#[test]
	fn loading_missing_tables_is_fatal() {
		let dir = tempfile::tempdir().unwrap();
		assert!(CorpusModel::load_tables(dir.path().join("nothing_here")).is_err());
	}

	#[test]
	fn loading_corrupt_tables_is_fatal() {
		let dir = tempfile::tempdir().unwrap();
		for file in [UNIGRAM_FILE, BIGRAM_FILE, TRIGRAM_FILE] {
			std::fs::write(dir.path().join(file), b"not json at all").unwrap();
		}
		assert!(CorpusModel::load_tables(dir.path()).is_err());
	}

	#[test]
	fn corpus_file_training_caches_a_snapshot() {
		let dir = tempfile::tempdir().unwrap();
		let corpus_path = dir.path().join("tiny.txt");
		std::fs::write(&corpus_path, "the cat sat\nthe dog sat\n").unwrap();

		let trained = CorpusModel::from_corpus_file(&corpus_path, Segmentation::Whitespace).unwrap();
		assert!(dir.path().join("tiny.bin").exists());
		assert_eq!(trained.sources(), &["tiny".to_string()]);

		let cached = CorpusModel::from_corpus_file(&corpus_path, Segmentation::Whitespace).unwrap();
		assert_eq!(trained.unigrams(), cached.unigrams());
		assert_eq!(trained.trigrams(), cached.trigrams());
	}

	#[test]
	fn scoring_an_empty_model_is_an_error() {
		let model = CorpusModel::default();
		let tokens = vec!["anything".to_string()];
		assert!(model
			.sentence_probability(&tokens, &InterpolationWeights::default())
			.is_err());
	}

	#[test]
	fn score_samples_preserves_order_and_stays_positive() {
		let corpus = samples(&["good morning @alice :)", "good night @bob"]);
		let seg = Segmentation::Tokenize { preserve_case: false };
		let model = CorpusModel::train(&corpus, seg);

		let test_set = samples(&["good morning @carol", "completely unrelated gibberish"]);
		let scored = model
			.score_samples(&test_set, seg, &InterpolationWeights::default())
			.unwrap();

		assert_eq!(scored.len(), 2);
		assert_eq!(scored[0].0, test_set[0]);
		assert_eq!(scored[1].0, test_set[1]);
		for (_, p) in &scored {
			assert!(*p > 0.0);
		}
	}
}
