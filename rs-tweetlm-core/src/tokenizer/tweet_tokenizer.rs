use super::entities::decode_entities;
use super::patterns::{EMOTICON_RE, HASHTAG_RE, URL_RE, USERNAME_RE, WORD_RE};

/// A Twitter-aware tokenizer.
///
/// Splits a string of text into an ordered sequence of word tokens,
/// collapsing classes of special tokens (URLs, mentions, hashtags,
/// emoticons) into canonical placeholder tokens.
///
/// # Responsibilities
/// - Normalize HTML character entities before scanning
/// - Scan with a single ordered alternation of lexical patterns
/// - Canonicalize special token classes and lowercase everything,
///   unless `preserve_case` is set
///
/// # Invariants
/// - Pure: no internal state changes across calls
/// - Unmatched characters never produce a token
/// - With `preserve_case` set, no transformation occurs at all
#[derive(Clone, Copy, Debug)]
pub struct TweetTokenizer {
	preserve_case: bool,
}

/// Canonical placeholder for tokens matching the URL pattern.
pub const URL_TOKEN: &str = "url";
/// Canonical placeholder for tokens matching the emoticon pattern.
pub const EMOTICON_TOKEN: &str = "emoticon";
/// Canonical placeholder for tokens matching the @-mention pattern.
pub const USERNAME_TOKEN: &str = "username";
/// Canonical placeholder for tokens matching the hashtag pattern.
pub const HASHTAG_TOKEN: &str = "hashtag";

impl TweetTokenizer {
	/// Creates a tokenizer.
	///
	/// With `preserve_case` set, matched tokens are returned verbatim;
	/// otherwise special tokens collapse to placeholders and everything
	/// is lowercased.
	pub fn new(preserve_case: bool) -> Self {
		Self { preserve_case }
	}

	/// Tokenizes `text` into an ordered sequence of tokens.
	///
	/// # Behavior
	/// - HTML entities are normalized first (`&#NNN;`, named entities,
	///   `&amp;` → `and`); unresolvable entities are silently kept.
	/// - The master alternation scans left to right; whitespace and
	///   unmatched single characters are dropped.
	/// - Unless case is preserved, each token is classified against the
	///   URL, emoticon, mention, and hashtag patterns in that order
	///   (first match wins), replaced by its placeholder where matched,
	///   then stripped of commas and lowercased.
	pub fn tokenize(&self, text: &str) -> Vec<String> {
		let normalized = decode_entities(text);

		let words = WORD_RE.find_iter(&normalized).map(|m| m.as_str());
		if self.preserve_case {
			words.map(str::to_owned).collect()
		} else {
			words.map(Self::replace_special).collect()
		}
	}

	/// Tokenizes raw bytes that may not be valid UTF-8.
	///
	/// Undecodable bytes are replaced rather than propagated as an
	/// error; malformed encoding is a recoverable condition here.
	pub fn tokenize_bytes(&self, raw: &[u8]) -> Vec<String> {
		self.tokenize(&String::from_utf8_lossy(raw))
	}

	/// Collapses a matched token to its canonical placeholder when it
	/// belongs to a special class, then strips commas and lowercases.
	///
	/// A token is reclassified at most once: the first matching class
	/// in the checked order wins even if others would also match.
	fn replace_special(word: &str) -> String {
		let tagged = if URL_RE.is_match(word) {
			URL_TOKEN
		} else if EMOTICON_RE.is_match(word) {
			EMOTICON_TOKEN
		} else if USERNAME_RE.is_match(word) {
			USERNAME_TOKEN
		} else if HASHTAG_RE.is_match(word) {
			HASHTAG_TOKEN
		} else {
			word
		};
		tagged.replace(',', "").to_lowercase()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn tokens(text: &str) -> Vec<String> {
		TweetTokenizer::new(false).tokenize(text)
	}

	#[test]
	fn urls_and_emoticons_collapse_to_placeholders() {
		assert_eq!(
			tokens("Visit http://example.com now :)"),
			vec!["visit", "url", "now", "emoticon"]
		);
	}

	#[test]
	fn mentions_and_hashtags_collapse_to_placeholders() {
		assert_eq!(tokens("RT @alice #ff"), vec!["rt", "username", "hashtag"]);
	}

	#[test]
	fn plain_words_are_lowercased() {
		assert_eq!(tokens("The Quick BROWN fox"), vec!["the", "quick", "brown", "fox"]);
	}

	#[test]
	fn commas_are_stripped_from_tokens() {
		assert_eq!(tokens("1,5 works"), vec!["15", "works"]);
	}

	#[test]
	fn preserve_case_returns_raw_matches() {
		let raw = TweetTokenizer::new(true).tokenize("RT @Alice :D http://x.io");
		assert_eq!(raw, vec!["RT", "@Alice", ":D", "http://x.io"]);
	}

	#[test]
	fn html_entities_are_normalized_before_scanning() {
		assert_eq!(tokens("fish &amp; chips &#64;"), vec!["fish", "and", "chips"]);
	}

	#[test]
	fn unmatched_punctuation_produces_no_token() {
		assert_eq!(tokens("!!! ??? ..."), Vec::<String>::new());
	}

	#[test]
	fn tokenize_bytes_recovers_from_bad_utf8() {
		let toks = TweetTokenizer::new(false).tokenize_bytes(b"good \xff\xfe text");
		assert_eq!(toks, vec!["good", "text"]);
	}

	#[test]
	fn tokens_partition_the_normalized_input() {
		// Every non-placeholder token must be a substring of the
		// lowercased, entity-normalized input.
		let text = "Hello there, this is plain text with numbers 12.5";
		let lowered = text.to_lowercase();
		for tok in tokens(text) {
			assert!(lowered.contains(&tok), "{tok}");
		}
	}
}
