use hsa_domain::{DirectoryEntry, schema};

pub const UNIT_BASE_DN: &str = "ou=Org,o=VGR";
pub const PERSON_BASE_DN: &str = "ou=Personal,o=VGR";
pub const CODE_TABLE_BASE_DN: &str = "ou=listor,ou=System,o=VGR";

/// A unit under [`UNIT_BASE_DN`] with the object class of the sample configuration.
pub fn unit_entry(hsa_identity: &str, name: &str) -> DirectoryEntry {
	DirectoryEntry::new(format!("ou={name},{UNIT_BASE_DN}"))
		.with(schema::OBJECT_CLASS, ["top", "vgrOrganizationalUnit"])
		.with(schema::HSA_IDENTITY, [hsa_identity])
		.with(schema::UNIT_NAME, [name])
}

/// A unit placed directly below `parent`.
pub fn unit_entry_below(parent: &DirectoryEntry, hsa_identity: &str, name: &str) -> DirectoryEntry {
	DirectoryEntry::new(format!("ou={name},{}", parent.dn))
		.with(schema::OBJECT_CLASS, ["top", "vgrOrganizationalUnit"])
		.with(schema::HSA_IDENTITY, [hsa_identity])
		.with(schema::UNIT_NAME, [name])
}

/// A function, named by `cn`, placed below `parent_name`.
pub fn function_entry(hsa_identity: &str, name: &str, parent_name: &str) -> DirectoryEntry {
	DirectoryEntry::new(format!("cn={name},ou={parent_name},{UNIT_BASE_DN}"))
		.with(schema::OBJECT_CLASS, ["top", "vgrOrganizationalRole"])
		.with(schema::HSA_IDENTITY, [hsa_identity])
		.with(schema::FUNCTION_NAME, [name])
}

pub fn person_entry(hsa_identity: &str, given_name: &str, surname: &str) -> DirectoryEntry {
	DirectoryEntry::new(format!("cn={given_name} {surname},{PERSON_BASE_DN}"))
		.with(schema::OBJECT_CLASS, ["top", "person", "vgrUser"])
		.with(schema::HSA_IDENTITY, [hsa_identity])
		.with(schema::GIVEN_NAME, [given_name])
		.with(schema::SURNAME, [surname])
		.with(schema::FULL_NAME, [format!("{given_name} {surname}")])
}

/// A code table under [`CODE_TABLE_BASE_DN`] holding `code;text` descriptions.
pub fn code_table_entry(name: &str, codes: &[(&str, &str)]) -> DirectoryEntry {
	DirectoryEntry::new(format!("cn={name},{CODE_TABLE_BASE_DN}"))
		.with(schema::OBJECT_CLASS, ["top", "vgrCodeTable"])
		.with(schema::CODE_TABLE_NAME, [name])
		.with(schema::DESCRIPTION, codes.iter().map(|(code, text)| format!("{code};{text}")))
}
