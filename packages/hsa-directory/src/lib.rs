pub mod ldap;

mod error;

pub use error::{Error, is_unavailable};
pub use ldap::LdapDirectory;

use std::{future::Future, pin::Pin};

use hsa_domain::{DirectoryEntry, Filter};

pub type Result<T, E = Error> = std::result::Result<T, E>;
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// How far below the base a search reaches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchScope {
	/// The base entry only.
	Base,
	/// Direct children of the base.
	OneLevel,
	/// The base and everything below it.
	#[default]
	Subtree,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
	pub base: String,
	pub scope: SearchScope,
	pub filter: Filter,
	pub attributes: Vec<&'static str>,
}
impl SearchRequest {
	/// A subtree search.
	pub fn new(base: impl Into<String>, filter: Filter, attributes: &[&'static str]) -> Self {
		Self { base: base.into(), scope: SearchScope::Subtree, filter, attributes: attributes.to_vec() }
	}

	pub fn with_scope(mut self, scope: SearchScope) -> Self {
		self.scope = scope;

		self
	}
}

/// Read access to the directory. Entries are returned in server order, unconverted.
pub trait Directory
where
	Self: Send + Sync,
{
	fn search<'a>(&'a self, request: &'a SearchRequest)
	-> BoxFuture<'a, Result<Vec<DirectoryEntry>>>;
}
