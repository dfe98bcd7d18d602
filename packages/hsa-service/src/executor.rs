//! Runs one directory search and reconciles the raw entries into a result page.

use std::{cmp::Ordering, collections::HashSet};

use serde::Serialize;

use hsa_directory::{Directory, SearchRequest};
use hsa_domain::{DirectoryEntry, EntryError, Person, Unit};

use crate::Result;

/// Sorted, truncated results. `total_count` is the number of results before truncation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchPage<T> {
	pub items: Vec<T>,
	pub total_count: usize,
}
impl<T> SearchPage<T> {
	pub fn empty() -> Self {
		Self { items: Vec::new(), total_count: 0 }
	}
}

/// Results are deduplicated on this key.
pub trait Identified {
	fn identity(&self) -> &str;
}
impl Identified for Unit {
	fn identity(&self) -> &str {
		&self.hsa_identity
	}
}
impl Identified for Person {
	fn identity(&self) -> &str {
		&self.hsa_identity
	}
}

/// Searches and converts entries. Entries that fail to convert are logged and skipped, and only
/// the first entry seen for each identity is kept.
pub async fn fetch<T, F>(
	directory: &dyn Directory,
	request: &SearchRequest,
	convert: F,
) -> Result<Vec<T>>
where
	T: Identified,
	F: Fn(&DirectoryEntry) -> Result<T, EntryError>,
{
	let entries = directory.search(request).await?;
	let mut seen = HashSet::with_capacity(entries.len());
	let mut items = Vec::with_capacity(entries.len());
	let mut skipped = 0_usize;

	for entry in &entries {
		let item = match convert(entry) {
			Ok(item) => item,
			Err(err) => {
				tracing::warn!(dn = %entry.dn, error = %err, "Skipping malformed directory entry.");

				skipped += 1;

				continue;
			},
		};

		if seen.insert(item.identity().to_string()) {
			items.push(item);
		}
	}

	tracing::debug!(
		received = entries.len(),
		kept = items.len(),
		skipped,
		"Converted directory entries."
	);

	Ok(items)
}

pub fn paginate<T, C>(mut items: Vec<T>, max: usize, compare: C) -> SearchPage<T>
where
	C: FnMut(&T, &T) -> Ordering,
{
	items.sort_by(compare);

	let total_count = items.len();

	items.truncate(max);

	SearchPage { items, total_count }
}
