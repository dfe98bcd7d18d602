use serde::Deserialize;

use crate::pattern::LikePattern;

/// How a single free-text search field is matched against the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
	/// The value is matched as typed, quotes removed and trimmed.
	Exact(String),
	/// Spaces and hyphens became wildcards and the value is wrapped in wildcards.
	Wildcard(LikePattern),
}
impl Criterion {
	/// Returns `None` for blank input, quoted or not.
	pub fn parse(raw: &str) -> Option<Self> {
		let value = raw.trim();

		if value.is_empty() {
			return None;
		}
		if is_exact_match(value) {
			let exact = value.replace('"', "");
			let exact = exact.trim();

			return (!exact.is_empty()).then(|| Self::Exact(exact.to_string()));
		}

		Some(Self::Wildcard(LikePattern::contains_tokens(value)))
	}

	pub fn parse_opt(raw: Option<&str>) -> Option<Self> {
		raw.and_then(Self::parse)
	}

	/// Case-insensitive match, the way the directory compares string attributes.
	pub fn matches(&self, value: &str) -> bool {
		match self {
			Self::Exact(expected) => expected.to_lowercase() == value.to_lowercase(),
			Self::Wildcard(pattern) => pattern.matches(value),
		}
	}
}

/// Free-text criteria for a unit search. Blank fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UnitCriteria {
	pub name: Option<String>,
	pub hsa_identity: Option<String>,
	pub location: Option<String>,
	pub liable_code: Option<String>,
	pub administration_name: Option<String>,
	pub business_classification_name: Option<String>,
	pub care_type_name: Option<String>,
	pub municipality_code: Option<String>,
	pub healthcare_types: Vec<String>,
}
impl UnitCriteria {
	pub fn is_empty(&self) -> bool {
		[
			&self.name,
			&self.hsa_identity,
			&self.location,
			&self.liable_code,
			&self.administration_name,
			&self.business_classification_name,
			&self.care_type_name,
			&self.municipality_code,
		]
		.into_iter()
		.all(|field| Criterion::parse_opt(field.as_deref()).is_none())
			&& self.healthcare_types.iter().all(|name| name.trim().is_empty())
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PersonCriteria {
	pub given_name: Option<String>,
	pub surname: Option<String>,
	pub hsa_identity: Option<String>,
	pub title: Option<String>,
}
impl PersonCriteria {
	pub fn is_empty(&self) -> bool {
		[&self.given_name, &self.surname, &self.hsa_identity, &self.title]
			.into_iter()
			.all(|field| Criterion::parse_opt(field.as_deref()).is_none())
	}
}

fn is_exact_match(value: &str) -> bool {
	value.chars().count() > 2 && value.starts_with('"') && value.ends_with('"')
}
