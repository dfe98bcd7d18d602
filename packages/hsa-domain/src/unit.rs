use std::cmp::Ordering;

use serde::Serialize;
use time::OffsetDateTime;

use crate::{
	collation,
	entry::{DirectoryEntry, EntryError},
	schema,
};

/// Units are named by `ou`, functions by `cn`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
	Unit,
	Function,
}

/// An address stored as `$`-separated lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Address {
	pub lines: Vec<String>,
}
impl Address {
	/// Blank lines are dropped; `None` when nothing remains.
	pub fn parse(raw: &str) -> Option<Self> {
		let lines: Vec<String> = raw
			.split(schema::ADDRESS_LINE_SEPARATOR)
			.map(str::trim)
			.filter(|line| !line.is_empty())
			.map(str::to_string)
			.collect();

		if lines.is_empty() { None } else { Some(Self { lines }) }
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unit {
	pub dn: String,
	pub kind: UnitKind,
	pub hsa_identity: String,
	pub name: String,
	pub municipality_name: Option<String>,
	pub municipality_code: Option<String>,
	pub street_address: Option<Address>,
	pub postal_address: Option<Address>,
	pub business_classification_codes: Vec<String>,
	pub care_type: Option<String>,
	pub administration_code: Option<String>,
	pub liable_codes: Vec<String>,
	pub telephone_numbers: Vec<String>,
	pub mail: Option<String>,
	pub web_address: Option<String>,
	#[serde(with = "time::serde::rfc3339::option")]
	pub end_date: Option<OffsetDateTime>,
}
impl Unit {
	pub fn from_entry(entry: &DirectoryEntry, function_object_class: &str) -> Result<Self, EntryError> {
		let kind = if entry.has_value(schema::OBJECT_CLASS, function_object_class) {
			UnitKind::Function
		} else {
			UnitKind::Unit
		};
		let name_attribute = match kind {
			UnitKind::Unit => schema::UNIT_NAME,
			UnitKind::Function => schema::FUNCTION_NAME,
		};
		let first = |attribute: &str| entry.first(attribute).map(str::to_string);

		Ok(Self {
			dn: entry.dn.clone(),
			kind,
			hsa_identity: entry.required(schema::HSA_IDENTITY)?.to_string(),
			name: entry.required(name_attribute)?.to_string(),
			municipality_name: first(schema::MUNICIPALITY_NAME),
			municipality_code: first(schema::MUNICIPALITY_CODE),
			street_address: entry.first(schema::STREET_ADDRESS).and_then(Address::parse),
			postal_address: entry.first(schema::POSTAL_ADDRESS).and_then(Address::parse),
			business_classification_codes: entry.all(schema::BUSINESS_CLASSIFICATION_CODE),
			care_type: first(schema::CARE_TYPE),
			administration_code: first(schema::ADMINISTRATION_CODE),
			liable_codes: entry.all(schema::LIABLE_CODE),
			telephone_numbers: entry.all(schema::TELEPHONE_NUMBER),
			mail: first(schema::MAIL),
			web_address: first(schema::LABELED_URI),
			end_date: entry.date(schema::END_DATE)?,
		})
	}

	/// False once the end date has passed.
	pub fn is_active(&self, now: OffsetDateTime) -> bool {
		self.end_date.map(|end| end >= now).unwrap_or(true)
	}

	/// Default result order: Swedish alphabetical by name, then identity.
	pub fn compare_by_name(a: &Self, b: &Self) -> Ordering {
		collation::compare(&a.name, &b.name).then_with(|| a.hsa_identity.cmp(&b.hsa_identity))
	}
}

#[cfg(test)]
mod tests {
	use time::macros::datetime;

	use super::*;

	fn entry() -> DirectoryEntry {
		DirectoryEntry::new("ou=Vårdcentralen Angered,ou=Org,o=VGR")
			.with("objectClass", ["vgrOrganizationalUnit"])
			.with("hsaIdentity", ["SE2321000131-E000000000001"])
			.with("ou", ["Vårdcentralen Angered"])
			.with("hsaPostalAddress", ["Box 1$424 22 Angered$$$$"])
			.with("hsaBusinessClassificationCode", ["1500", "1504"])
			.with("hsaEndDate", ["20301231000000Z"])
	}

	#[test]
	fn converts_unit_entries() {
		let unit = Unit::from_entry(&entry(), "vgrOrganizationalRole").expect("unit");

		assert_eq!(unit.kind, UnitKind::Unit);
		assert_eq!(unit.name, "Vårdcentralen Angered");
		assert_eq!(
			unit.postal_address,
			Some(Address { lines: vec!["Box 1".to_string(), "424 22 Angered".to_string()] })
		);
		assert_eq!(unit.business_classification_codes, ["1500", "1504"]);
		assert_eq!(unit.end_date, Some(datetime!(2030-12-31 0:00 UTC)));
	}

	#[test]
	fn functions_are_named_by_cn() {
		let entry = DirectoryEntry::new("cn=Röntgen,ou=Org,o=VGR")
			.with("objectClass", ["vgrOrganizationalRole"])
			.with("hsaIdentity", ["SE2321000131-F000000000002"])
			.with("cn", ["Röntgen"]);
		let unit = Unit::from_entry(&entry, "vgrOrganizationalRole").expect("function");

		assert_eq!(unit.kind, UnitKind::Function);
		assert_eq!(unit.name, "Röntgen");
	}

	#[test]
	fn missing_identity_is_an_error() {
		let mut entry = entry();

		entry.attributes.remove("hsaIdentity");

		assert!(matches!(
			Unit::from_entry(&entry, "vgrOrganizationalRole"),
			Err(EntryError::MissingAttribute { attribute: "hsaIdentity", .. })
		));
	}

	#[test]
	fn end_date_boundary_is_still_active() {
		let unit = Unit::from_entry(&entry(), "vgrOrganizationalRole").expect("unit");

		assert!(unit.is_active(datetime!(2030-12-31 0:00 UTC)));
		assert!(!unit.is_active(datetime!(2030-12-31 0:00:01 UTC)));
	}
}
