use std::collections::BTreeMap;

use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntryError {
	#[error("Entry {dn} has no value for required attribute {attribute}.")]
	MissingAttribute { dn: String, attribute: &'static str },
	#[error("Entry {dn} has malformed {attribute} value '{value}'.")]
	MalformedDate { dn: String, attribute: &'static str, value: String },
}

/// A raw search result entry as returned by the directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryEntry {
	pub dn: String,
	pub attributes: BTreeMap<String, Vec<String>>,
}
impl DirectoryEntry {
	pub fn new(dn: impl Into<String>) -> Self {
		Self { dn: dn.into(), attributes: BTreeMap::new() }
	}

	pub fn with<I, V>(mut self, attribute: &str, values: I) -> Self
	where
		I: IntoIterator<Item = V>,
		V: Into<String>,
	{
		self.attributes
			.entry(attribute.to_string())
			.or_default()
			.extend(values.into_iter().map(Into::into));

		self
	}

	/// Attribute names are matched case-insensitively.
	pub fn values(&self, attribute: &str) -> &[String] {
		self.attributes
			.iter()
			.find(|(name, _)| name.eq_ignore_ascii_case(attribute))
			.map(|(_, values)| values.as_slice())
			.unwrap_or(&[])
	}

	/// First non-blank value, trimmed.
	pub fn first(&self, attribute: &str) -> Option<&str> {
		self.values(attribute).iter().map(|value| value.trim()).find(|value| !value.is_empty())
	}

	pub fn required(&self, attribute: &'static str) -> Result<&str, EntryError> {
		self.first(attribute)
			.ok_or_else(|| EntryError::MissingAttribute { dn: self.dn.clone(), attribute })
	}

	/// Non-blank values, trimmed.
	pub fn all(&self, attribute: &str) -> Vec<String> {
		self.values(attribute)
			.iter()
			.map(|value| value.trim())
			.filter(|value| !value.is_empty())
			.map(str::to_string)
			.collect()
	}

	pub fn has_value(&self, attribute: &str, expected: &str) -> bool {
		self.values(attribute).iter().any(|value| value.trim().eq_ignore_ascii_case(expected))
	}

	pub fn date(&self, attribute: &'static str) -> Result<Option<OffsetDateTime>, EntryError> {
		let Some(raw) = self.first(attribute) else {
			return Ok(None);
		};

		parse_generalized_time(raw).map(Some).ok_or_else(|| EntryError::MalformedDate {
			dn: self.dn.clone(),
			attribute,
			value: raw.to_string(),
		})
	}
}

/// Parses directory GeneralizedTime in UTC: `YYYYMMDD[HH[MM[SS]]][.fraction]Z`.
pub fn parse_generalized_time(raw: &str) -> Option<OffsetDateTime> {
	let raw = raw.trim();
	let raw = raw.strip_suffix('Z').unwrap_or(raw);
	let digits = raw.split(['.', ',']).next().unwrap_or(raw);

	if !digits.bytes().all(|byte| byte.is_ascii_digit()) || !matches!(digits.len(), 8 | 10 | 12 | 14)
	{
		return None;
	}

	let field = |start: usize, len: usize| -> Option<u32> {
		digits.get(start..start + len).map(|part| part.parse().ok()).unwrap_or(Some(0))
	};
	let year = i32::try_from(field(0, 4)?).ok()?;
	let month = Month::try_from(u8::try_from(field(4, 2)?).ok()?).ok()?;
	let day = u8::try_from(field(6, 2)?).ok()?;
	let hour = u8::try_from(field(8, 2)?).ok()?;
	let minute = u8::try_from(field(10, 2)?).ok()?;
	let second = u8::try_from(field(12, 2)?).ok()?;
	let date = Date::from_calendar_date(year, month, day).ok()?;
	let time = Time::from_hms(hour, minute, second).ok()?;

	Some(PrimitiveDateTime::new(date, time).assume_utc())
}
