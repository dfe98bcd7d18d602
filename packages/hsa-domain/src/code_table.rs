use crate::criteria::Criterion;

/// Directory names of the code table entries, matched against `cn`.
pub const ADMINISTRATIONS: &str = "VGR_AO3_CODE";
pub const BUSINESS_CLASSIFICATIONS: &str = "HSA_BUSINESSCLASSIFICATION_CODE";
pub const CARE_TYPES: &str = "VGR_CARE_TYPE";

/// Code values with their display texts, e.g. care types.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
	entries: Vec<(String, String)>,
}
impl CodeTable {
	pub fn new<I, C, T>(entries: I) -> Self
	where
		I: IntoIterator<Item = (C, T)>,
		C: Into<String>,
		T: Into<String>,
	{
		Self {
			entries: entries.into_iter().map(|(code, text)| (code.into(), text.into())).collect(),
		}
	}

	/// Codes whose display text matches the criterion, in table order without duplicates.
	pub fn lookup(&self, criterion: &Criterion) -> Vec<&str> {
		let mut codes: Vec<&str> = Vec::new();

		for (code, text) in &self.entries {
			if criterion.matches(text) && !codes.contains(&code.as_str()) {
				codes.push(code.as_str());
			}
		}

		codes
	}

	pub fn text(&self, code: &str) -> Option<&str> {
		self.entries.iter().find(|(candidate, _)| candidate == code).map(|(_, text)| text.as_str())
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
/// Splits a `code;text` value at its first `;`. `None` when either side is blank.
pub fn parse_description(value: &str) -> Option<(&str, &str)> {
	let (code, text) = value.split_once(';')?;
	let (code, text) = (code.trim(), text.trim());

	if code.is_empty() || text.is_empty() { None } else { Some((code, text)) }
}

impl From<&[hsa_config::CodeEntry]> for CodeTable {
	fn from(entries: &[hsa_config::CodeEntry]) -> Self {
		Self::new(entries.iter().map(|entry| (entry.code.trim(), entry.text.trim())))
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTables {
	pub administrations: CodeTable,
	pub business_classifications: CodeTable,
	pub care_types: CodeTable,
}
impl CodeTables {
	/// Replaces each table that is non-empty in `cfg`.
	pub fn overridden_by(self, cfg: &hsa_config::CodeTables) -> Self {
		let pick = |loaded: CodeTable, configured: &[hsa_config::CodeEntry]| {
			if configured.is_empty() { loaded } else { CodeTable::from(configured) }
		};

		Self {
			administrations: pick(self.administrations, &cfg.administrations),
			business_classifications: pick(
				self.business_classifications,
				&cfg.business_classifications,
			),
			care_types: pick(self.care_types, &cfg.care_types),
		}
	}
}
impl From<&hsa_config::CodeTables> for CodeTables {
	fn from(cfg: &hsa_config::CodeTables) -> Self {
		Self {
			administrations: CodeTable::from(cfg.administrations.as_slice()),
			business_classifications: CodeTable::from(cfg.business_classifications.as_slice()),
			care_types: CodeTable::from(cfg.care_types.as_slice()),
		}
	}
}
