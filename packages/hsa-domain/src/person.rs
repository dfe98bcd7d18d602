use std::cmp::Ordering;

use serde::Serialize;

use crate::{
	collation,
	entry::{DirectoryEntry, EntryError},
	schema,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Person {
	pub dn: String,
	pub hsa_identity: String,
	pub given_name: Option<String>,
	pub surname: Option<String>,
	pub full_name: String,
	pub title: Option<String>,
	pub mail: Option<String>,
	pub telephone_numbers: Vec<String>,
}
impl Person {
	pub fn from_entry(entry: &DirectoryEntry) -> Result<Self, EntryError> {
		let given_name = entry.first(schema::GIVEN_NAME).map(str::to_string);
		let surname = entry.first(schema::SURNAME).map(str::to_string);
		let full_name = match entry.first(schema::FULL_NAME) {
			Some(cn) => cn.to_string(),
			None => [given_name.as_deref(), surname.as_deref()]
				.into_iter()
				.flatten()
				.collect::<Vec<_>>()
				.join(" "),
		};

		if full_name.is_empty() {
			return Err(EntryError::MissingAttribute {
				dn: entry.dn.clone(),
				attribute: schema::FULL_NAME,
			});
		}

		Ok(Self {
			dn: entry.dn.clone(),
			hsa_identity: entry.required(schema::HSA_IDENTITY)?.to_string(),
			given_name,
			surname,
			full_name,
			title: entry.first(schema::TITLE).map(str::to_string),
			mail: entry.first(schema::MAIL).map(str::to_string),
			telephone_numbers: entry.all(schema::TELEPHONE_NUMBER),
		})
	}

	/// Surname, then given name, then identity.
	pub fn compare_by_name(a: &Self, b: &Self) -> Ordering {
		let surname = |person: &Self| person.surname.clone().unwrap_or_default();
		let given_name = |person: &Self| person.given_name.clone().unwrap_or_default();

		collation::compare(&surname(a), &surname(b))
			.then_with(|| collation::compare(&given_name(a), &given_name(b)))
			.then_with(|| a.hsa_identity.cmp(&b.hsa_identity))
	}
}
