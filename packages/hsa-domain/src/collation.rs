//! Swedish alphabetical order for display names.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;

/// Case-insensitive; `å`, `ä` and `ö` sort after `z`, accented letters with their base letter.
/// Equal keys fall back to plain string order so the result is total.
pub fn compare(a: &str, b: &str) -> Ordering {
	sort_key(a).cmp(&sort_key(b)).then_with(|| a.cmp(b))
}

fn sort_key(value: &str) -> Vec<u32> {
	value.nfc().flat_map(char::to_lowercase).map(weight).collect()
}

fn weight(ch: char) -> u32 {
	const LETTERS: u32 = 1_000;
	const OTHER: u32 = 10_000;

	let base = match ch {
		'à' | 'á' | 'â' | 'ã' => 'a',
		'ç' => 'c',
		'è' | 'é' | 'ê' | 'ë' => 'e',
		'ì' | 'í' | 'î' | 'ï' => 'i',
		'ñ' => 'n',
		'ò' | 'ó' | 'ô' | 'õ' => 'o',
		'ù' | 'ú' | 'û' => 'u',
		'ü' | 'ý' | 'ÿ' => 'y',
		'æ' => 'ä',
		'ø' => 'ö',
		other => other,
	};

	match base {
		'a'..='z' => LETTERS + (base as u32 - 'a' as u32),
		'å' => LETTERS + 26,
		'ä' => LETTERS + 27,
		'ö' => LETTERS + 28,
		other if other.is_whitespace() => 0,
		other if other.is_ascii() => other as u32,
		other => OTHER + other as u32,
	}
}
