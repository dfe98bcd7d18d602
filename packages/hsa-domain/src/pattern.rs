//! Substring patterns for LIKE clauses.
//!
//! A pattern is a list of literal segments with an implicit wildcard between each pair. A leading
//! or trailing empty segment stands for a leading or trailing wildcard, so `*abc*` is stored as
//! `["", "abc", ""]`. Consecutive wildcards are collapsed.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikePattern {
	segments: Vec<String>,
}
impl LikePattern {
	/// Turns free text into a "contains all tokens in order" pattern: spaces and hyphens become
	/// wildcards and the value is wrapped in wildcards. A typed `*` stays a wildcard.
	pub fn contains_tokens(value: &str) -> Self {
		let mut builder = LikePatternBuilder::default();

		builder.wildcard();

		for ch in value.chars() {
			if ch.is_whitespace() || ch == '-' || ch == '*' {
				builder.wildcard();
			} else {
				builder.literal_char(ch);
			}
		}

		builder.wildcard();
		builder.finish()
	}

	/// Parses a raw pattern where every `*` is a wildcard.
	pub fn from_wildcards(raw: &str) -> Self {
		let mut builder = LikePatternBuilder::default();

		for (idx, part) in raw.split('*').enumerate() {
			if idx > 0 {
				builder.wildcard();
			}

			builder.literal(part);
		}

		builder.finish()
	}

	pub fn segments(&self) -> &[String] {
		&self.segments
	}

	/// True when the pattern matches every value, i.e. it is a presence test.
	pub fn is_any(&self) -> bool {
		self.segments.iter().all(String::is_empty)
	}

	/// Case-insensitive match of a whole value.
	pub fn matches(&self, value: &str) -> bool {
		let value = value.to_lowercase();
		let segments: Vec<String> = self.segments.iter().map(|s| s.to_lowercase()).collect();

		let [first, middle @ .., last] = segments.as_slice() else {
			return segments.first().map(|only| *only == value).unwrap_or(value.is_empty());
		};
		let Some(mut remaining) = value.strip_prefix(first.as_str()) else {
			return false;
		};

		for segment in middle {
			match remaining.find(segment.as_str()) {
				Some(idx) => remaining = &remaining[idx + segment.len()..],
				None => return false,
			}
		}

		remaining.ends_with(last.as_str())
	}
}

/// Incremental construction of a [`LikePattern`] from literal text and wildcards.
#[derive(Debug, Default)]
pub struct LikePatternBuilder {
	segments: Vec<String>,
	current: String,
	after_wildcard: bool,
}
impl LikePatternBuilder {
	pub fn wildcard(&mut self) -> &mut Self {
		if !self.after_wildcard {
			self.segments.push(std::mem::take(&mut self.current));
			self.after_wildcard = true;
		}

		self
	}

	pub fn literal(&mut self, text: &str) -> &mut Self {
		if !text.is_empty() {
			self.current.push_str(text);
			self.after_wildcard = false;
		}

		self
	}

	pub fn literal_char(&mut self, ch: char) -> &mut Self {
		self.current.push(ch);
		self.after_wildcard = false;

		self
	}

	/// Appends another pattern, keeping its wildcards.
	pub fn pattern(&mut self, pattern: &LikePattern) -> &mut Self {
		for (idx, segment) in pattern.segments.iter().enumerate() {
			if idx > 0 {
				self.wildcard();
			}

			self.literal(segment);
		}

		self
	}

	pub fn finish(mut self) -> LikePattern {
		self.segments.push(self.current);

		LikePattern { segments: self.segments }
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn contains_tokens_collapses_separators() {
		let pattern = LikePattern::contains_tokens("Kvalitet- och säkerhetsavdelningen");

		assert_eq!(pattern.segments(), ["", "Kvalitet", "och", "säkerhetsavdelningen", ""]);
	}

	#[test]
	fn wildcards_only_is_presence() {
		assert!(LikePattern::contains_tokens(" - ").is_any());
		assert!(LikePattern::from_wildcards("**").is_any());
		assert!(!LikePattern::from_wildcards("*a*").is_any());
	}

	#[test]
	fn matches_tokens_in_order() {
		let pattern = LikePattern::contains_tokens("vård central");

		assert!(pattern.matches("Angereds Vårdcentral"));
		assert!(pattern.matches("VÅRDCENTRALEN"));
		assert!(!pattern.matches("Centralvård"));
	}

	#[test]
	fn anchored_segments() {
		let pattern = LikePattern::from_wildcards("Stor*1");

		assert!(pattern.matches("Storgatan 1"));
		assert!(!pattern.matches("Lillgatan 1"));
		assert!(!pattern.matches("Storgatan 12"));
	}

	#[test]
	fn prefix_and_suffix_do_not_overlap() {
		let pattern = LikePattern::from_wildcards("ab*ba");

		assert!(!pattern.matches("aba"));
		assert!(pattern.matches("abba"));
	}

	#[test]
	fn builder_appends_patterns() {
		let mut builder = LikePatternBuilder::default();

		builder.wildcard().literal("$").pattern(&LikePattern::contains_tokens("x")).literal("$");

		assert_eq!(builder.finish().segments(), ["", "$", "x", "$"]);
	}
}
