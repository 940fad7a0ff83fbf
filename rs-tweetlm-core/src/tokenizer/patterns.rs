use lazy_static::lazy_static;
use regex::Regex;

// The components of the master tokenizing alternation. Order matters:
// the scanner relies on the regex crate's leftmost-first semantics, so
// earlier components win on overlapping matches at the same position.
// Phone numbers must come first (they may span separators), and the
// plain word component must stay last as the catch-all.

/// Phone numbers: optional country code, optional area code,
/// exchange and base separated by dashes, dots, or spaces.
const PHONE: &str = r"(?:\+?[01][\-\s.]*)?(?:\(?\d{3}[\-\s.)]*)?\d{3}[\-\s.]*\d{4}";

/// Emoticons: eyes, optional nose, mouth, plus the mirrored
/// right-to-left form, optionally bounded by `<`/`>`.
const EMOTICON: &str =
	r"[<>]?[:;=8][\-o*']?[\)\]\(\[dDpP/:\}\{@\|\\]|[\)\]\(\[dDpP/:\}\{@\|\\][\-o*']?[:;=8][<>]?";

/// HTML tags.
const HTML_TAG: &str = r"<[^>]+>";

/// Twitter @-mentions.
const USERNAME: &str = r"@[\w_]+";

/// Twitter hashtags.
const HASHTAG: &str = r"\#+[\w_]+[\w'_\-]*[\w_]+";

/// URLs, tolerant of partial or garbled scheme prefixes.
const URL: &str = r"[htp]+s?[:/]+[a-z0-9]+[\w.a-z/?=&%\-]*";

/// Words joined by apostrophes or dashes.
const APO_DASH: &str = r"[a-z][a-z'\-_]+[a-z]";

/// Numbers, including signs, fractions, decimals, and ranges.
const NUMBER: &str = r"[+\-]?\d+[,/.:\-]\d+[+\-]?";

/// Catch-all word token.
const WORD: &str = r"[\w_]+";

lazy_static! {
	/// The core tokenizing regex: all components joined into one
	/// case-insensitive alternation, tried in priority order.
	pub(crate) static ref WORD_RE: Regex = Regex::new(&format!(
		"(?i)(?:{PHONE})|(?:{EMOTICON})|(?:{HTML_TAG})|(?:{USERNAME})|(?:{HASHTAG})|(?:{URL})|(?:{APO_DASH})|(?:{NUMBER})|(?:{WORD})"
	))
	.unwrap();

	// The special classes get their own regexes so matched tokens can be
	// tagged after the scan.
	pub(crate) static ref EMOTICON_RE: Regex =
		Regex::new(&format!("(?i){EMOTICON}")).unwrap();
	pub(crate) static ref USERNAME_RE: Regex =
		Regex::new(&format!("(?i){USERNAME}")).unwrap();
	pub(crate) static ref HASHTAG_RE: Regex =
		Regex::new(&format!("(?i){HASHTAG}")).unwrap();
	pub(crate) static ref URL_RE: Regex = Regex::new(&format!("(?i){URL}")).unwrap();
}
