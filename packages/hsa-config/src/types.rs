use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
	pub service: Service,
	pub directory: Directory,
	pub search: Search,
	#[serde(default)]
	pub healthcare_types: Vec<HealthcareType>,
	#[serde(default)]
	pub code_tables: CodeTables,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Service {
	pub log_level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Directory {
	/// `ldap://` or `ldaps://` URL of the HSA directory.
	pub url: String,
	/// Optional. Anonymous bind when absent or blank.
	pub bind_dn: Option<String>,
	pub bind_password: Option<String>,
	pub unit_base_dn: String,
	pub person_base_dn: String,
	/// Entry whose children hold the code tables as `code;text` descriptions. When absent or
	/// blank, only `[code_tables]` is used.
	#[serde(default)]
	pub code_table_base_dn: Option<String>,
	pub pool_max_conns: usize,
	/// How long a search waits for a free pooled connection before failing.
	pub pool_wait_timeout_ms: u64,
	pub connect_timeout_ms: u64,
	pub search_timeout_ms: u64,
	pub page_size: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Search {
	pub max_results: usize,
	#[serde(default = "default_unit_object_class")]
	pub unit_object_class: String,
	#[serde(default = "default_function_object_class")]
	pub function_object_class: String,
	#[serde(default = "default_person_object_class")]
	pub person_object_class: String,
	/// Business classification codes a unit must carry to be shown. Empty disables the check.
	#[serde(default)]
	pub business_classification_allow_list: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthcareType {
	pub name: String,
	/// Unfiltered types bypass the business classification allow-list.
	#[serde(default)]
	pub unfiltered: bool,
	/// Directory attribute name to comma separated accepted values.
	pub conditions: BTreeMap<String, String>,
}

/// Configured tables override the tables read from the directory, one table at a time.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CodeTables {
	#[serde(default)]
	pub administrations: Vec<CodeEntry>,
	#[serde(default)]
	pub business_classifications: Vec<CodeEntry>,
	#[serde(default)]
	pub care_types: Vec<CodeEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CodeEntry {
	pub code: String,
	pub text: String,
}

fn default_unit_object_class() -> String {
	"vgrOrganizationalUnit".to_string()
}

fn default_function_object_class() -> String {
	"vgrOrganizationalRole".to_string()
}

fn default_person_object_class() -> String {
	"vgrUser".to_string()
}
