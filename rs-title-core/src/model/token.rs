use std::fmt;

/// Leading marker used by the legacy inline token format.
pub const START_MARKER: char = '^';

/// Trailing marker used by the legacy inline token format.
pub const END_MARKER: char = '*';

/// A single whitespace-delimited unit of a title.
///
/// Boundary information is carried by explicit flags rather than by marker
/// characters inside the text, so a token whose text legitimately starts with
/// `^` or ends with `*` is not mistaken for a boundary.
///
/// The flags take part in equality and hashing: `^w1` and `w1` are two
/// different chain states.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token {
	/// Raw token text, without any marker.
	pub text: String,
	/// First token of an original title.
	pub is_title_start: bool,
	/// Last token of an original title.
	pub is_title_end: bool,
}

impl Token {
	/// Creates an interior token (no boundary flags).
	pub fn new(text: &str) -> Self {
		Self {
			text: text.to_owned(),
			is_title_start: false,
			is_title_end: false,
		}
	}

	/// Creates a token with explicit boundary flags.
	pub fn with_flags(text: &str, is_title_start: bool, is_title_end: bool) -> Self {
		Self {
			text: text.to_owned(),
			is_title_start,
			is_title_end,
		}
	}

	/// Parses the legacy inline format (`^first`, `last*`, `^only*`).
	///
	/// Exactly one leading `^` and one trailing `*` are consumed as flags;
	/// any further marker characters stay in the text.
	///
	/// Examples:
	/// - `"^word"` → start token `word`
	/// - `"word*"` → end token `word`
	/// - `"^^^word1"` → start token `^^word1`
	/// - `"word^2"` → interior token `word^2`
	pub fn from_marked(marked: &str) -> Self {
		let (is_title_start, rest) = match marked.strip_prefix(START_MARKER) {
			Some(rest) => (true, rest),
			None => (false, marked),
		};
		let (is_title_end, text) = match rest.strip_suffix(END_MARKER) {
			Some(text) => (true, text),
			None => (false, rest),
		};
		Self::with_flags(text, is_title_start, is_title_end)
	}

	/// Renders the token in the legacy inline format.
	pub fn to_marked(&self) -> String {
		let mut marked = String::with_capacity(self.text.len() + 2);
		if self.is_title_start {
			marked.push(START_MARKER);
		}
		marked.push_str(&self.text);
		if self.is_title_end {
			marked.push(END_MARKER);
		}
		marked
	}
}

impl fmt::Display for Token {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_marked())
	}
}

/// Parses a whole stream written in the legacy inline format.
pub fn parse_marked_stream<S: AsRef<str>>(marked: &[S]) -> Vec<Token> {
	marked.iter().map(|m| Token::from_marked(m.as_ref())).collect()
}
