//! Test doubles for code that talks to the directory.
//!
//! [`InMemoryDirectory`] evaluates filter trees against a fixed set of entries the way an LDAP
//! server would for the attributes this workspace uses: case-insensitive equality, substring
//! patterns, and subtree scoping by base DN.

mod entries;

pub use entries::{
	CODE_TABLE_BASE_DN, PERSON_BASE_DN, UNIT_BASE_DN, code_table_entry, function_entry,
	person_entry, unit_entry, unit_entry_below,
};

use std::sync::{
	Mutex,
	atomic::{AtomicUsize, Ordering},
};

use hsa_directory::{BoxFuture, Directory, Error, Result, SearchRequest, SearchScope};
use hsa_domain::{DirectoryEntry, Filter};

pub const SAMPLE_CONFIG: &str = r#"
[service]
log_level = "debug"

[directory]
url                  = "ldap://localhost:389"
unit_base_dn         = "ou=Org,o=VGR"
person_base_dn       = "ou=Personal,o=VGR"
pool_max_conns       = 2
pool_wait_timeout_ms = 500
connect_timeout_ms   = 500
search_timeout_ms    = 1000
page_size            = 100

[search]
max_results                        = 50
business_classification_allow_list = ["1500", "1504"]

[[healthcare_types]]
name = "Vårdcentral"

[healthcare_types.conditions]
hsaBusinessClassificationCode = "1500"

[[healthcare_types]]
name       = "Tandvård"
unfiltered = true

[healthcare_types.conditions]
hsaBusinessClassificationCode = "1300,1301"

[code_tables]
administrations = [
	{ code = "ao3-1", text = "Primärvården Göteborg" },
	{ code = "ao3-2", text = "Primärvården Fyrbodal" },
]
business_classifications = [
	{ code = "1500", text = "Allmänmedicin" },
	{ code = "1504", text = "Barnmedicin" },
	{ code = "1300", text = "Allmäntandvård" },
]
care_types = [
	{ code = "01", text = "Öppen vård" },
	{ code = "02", text = "Sluten vård" },
]
"#;

/// Parses [`SAMPLE_CONFIG`].
pub fn sample_config() -> hsa_config::Result<hsa_config::Config> {
	hsa_config::parse(SAMPLE_CONFIG)
}

/// Serves searches from a fixed list of entries.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
	entries: Vec<DirectoryEntry>,
	requests: Mutex<Vec<SearchRequest>>,
}
impl InMemoryDirectory {
	pub fn new(entries: Vec<DirectoryEntry>) -> Self {
		Self { entries, requests: Mutex::new(Vec::new()) }
	}

	pub fn search_count(&self) -> usize {
		self.lock_requests().len()
	}

	/// Requests seen so far, oldest first.
	pub fn requests(&self) -> Vec<SearchRequest> {
		self.lock_requests().clone()
	}

	fn lock_requests(&self) -> std::sync::MutexGuard<'_, Vec<SearchRequest>> {
		self.requests.lock().unwrap_or_else(|err| err.into_inner())
	}
}
impl Directory for InMemoryDirectory {
	fn search<'a>(
		&'a self,
		request: &'a SearchRequest,
	) -> BoxFuture<'a, Result<Vec<DirectoryEntry>>> {
		Box::pin(async move {
			self.lock_requests().push(request.clone());

			Ok(self
				.entries
				.iter()
				.filter(|entry| in_scope(&entry.dn, &request.base, request.scope))
				.filter(|entry| evaluate(&request.filter, entry))
				.cloned()
				.collect())
		})
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
	NoConnection,
	Query,
}

/// Fails every search the same way.
#[derive(Debug)]
pub struct FailingDirectory {
	failure: Failure,
	attempts: AtomicUsize,
}
impl FailingDirectory {
	pub fn new(failure: Failure) -> Self {
		Self { failure, attempts: AtomicUsize::new(0) }
	}

	pub fn attempts(&self) -> usize {
		self.attempts.load(Ordering::Relaxed)
	}
}
impl Directory for FailingDirectory {
	fn search<'a>(
		&'a self,
		_: &'a SearchRequest,
	) -> BoxFuture<'a, Result<Vec<DirectoryEntry>>> {
		Box::pin(async move {
			self.attempts.fetch_add(1, Ordering::Relaxed);

			Err(match self.failure {
				Failure::NoConnection =>
					Error::NoConnection { message: "Timed out waiting for a connection.".to_string() },
				Failure::Query => Error::Query { message: "Operations error.".to_string() },
			})
		})
	}
}

/// True when `filter` matches `entry`.
pub fn evaluate(filter: &Filter, entry: &DirectoryEntry) -> bool {
	match filter {
		Filter::And(clauses) => clauses.iter().all(|clause| evaluate(clause, entry)),
		Filter::Or(clauses) => clauses.iter().any(|clause| evaluate(clause, entry)),
		Filter::Equals { attribute, value } => {
			let expected = value.to_lowercase();

			entry.values(attribute).iter().any(|actual| actual.to_lowercase() == expected)
		},
		Filter::Like { attribute, pattern } =>
			entry.values(attribute).iter().any(|actual| pattern.matches(actual)),
	}
}

fn in_scope(dn: &str, base: &str, scope: SearchScope) -> bool {
	let dn = dn.to_lowercase();
	let base = base.to_lowercase();

	if dn == base {
		return scope != SearchScope::OneLevel;
	}

	let Some(relative) = dn.strip_suffix(&format!(",{base}")) else {
		return false;
	};

	match scope {
		SearchScope::Base => false,
		SearchScope::OneLevel => !has_unescaped_comma(relative),
		SearchScope::Subtree => true,
	}
}

fn has_unescaped_comma(rdns: &str) -> bool {
	let mut escaped = false;

	for ch in rdns.chars() {
		match ch {
			'\\' if !escaped => escaped = true,
			',' if !escaped => return true,
			_ => escaped = false,
		}
	}

	false
}
