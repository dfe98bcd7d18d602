//! Autocomplete helpers. Each call searches the directory; nothing is cached between calls.

use std::collections::HashSet;

use hsa_directory::SearchRequest;
use hsa_domain::{Filter, collation, schema};

use crate::{Error, HsaService, Result};

impl HsaService {
	/// Distinct names of eligible units and functions containing `text`, ignoring case.
	pub async fn unit_names_matching(&self, text: &str) -> Result<Vec<String>> {
		let needle = needle(text)?;
		let units = self.find_units(self.unit_filters().all()).await?;

		Ok(matching(units.iter().map(|unit| unit.name.replace("\\,", ",")), &needle))
	}

	/// Distinct person titles containing `text`, ignoring case.
	pub async fn titles_matching(&self, text: &str) -> Result<Vec<String>> {
		let needle = needle(text)?;
		let request = SearchRequest::new(
			&self.cfg.directory.person_base_dn,
			Filter::equals(schema::OBJECT_CLASS, &self.cfg.search.person_object_class),
			&[schema::TITLE],
		);
		let entries = self.directory.search(&request).await?;
		let titles = entries
			.iter()
			.flat_map(|entry| entry.values(schema::TITLE))
			.map(|title| title.trim().to_string());

		Ok(matching(titles, &needle))
	}
}

fn needle(text: &str) -> Result<String> {
	let text = text.trim();

	if text.is_empty() {
		return Err(Error::InvalidRequest { message: "text must be non-empty.".to_string() });
	}

	Ok(text.to_lowercase())
}

fn matching<I>(candidates: I, needle: &str) -> Vec<String>
where
	I: IntoIterator<Item = String>,
{
	let distinct: HashSet<String> = candidates
		.into_iter()
		.filter(|candidate| !candidate.is_empty() && candidate.to_lowercase().contains(needle))
		.collect();
	let mut matches: Vec<String> = distinct.into_iter().collect();

	matches.sort_by(|a, b| collation::compare(a, b));

	matches
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn matching_is_distinct_sorted_and_case_insensitive() {
		let names = ["Vårdcentralen Hylte", "Akuten Lerum", "Ögonkliniken", "Vårdcentralen Hylte"]
			.map(str::to_string);

		assert_eq!(matching(names, "le"), ["Akuten Lerum", "Vårdcentralen Hylte"]);
	}

	#[test]
	fn blank_text_is_rejected() {
		assert!(matches!(needle("  "), Err(Error::InvalidRequest { .. })));
		assert_eq!(needle(" LE ").expect("needle"), "le");
	}
}
