use crate::tokenizer::TweetTokenizer;

/// Strategy used to turn a raw sample into a flat token sequence
/// before n-gram counting.
///
/// # Variants
/// - `Tokenize`: run the Twitter-aware tokenizer over the sample.
/// - `Whitespace`: split the sample on whitespace, no normalization.
/// - `Lines`: treat the sample as multiple lines and split each line
///   on whitespace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segmentation {
	Tokenize { preserve_case: bool },
	Whitespace,
	Lines,
}

impl Segmentation {
	/// Segments one sample into tokens according to the strategy.
	pub fn segment(&self, sample: &str) -> Vec<String> {
		match self {
			Segmentation::Tokenize { preserve_case } => {
				TweetTokenizer::new(*preserve_case).tokenize(sample)
			}
			Segmentation::Whitespace => {
				sample.split_whitespace().map(str::to_owned).collect()
			}
			Segmentation::Lines => sample
				.lines()
				.flat_map(str::split_whitespace)
				.map(str::to_owned)
				.collect(),
		}
	}
}
