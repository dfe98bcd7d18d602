pub mod code_tables;
pub mod executor;
pub mod persons;
pub mod suggest;
pub mod units;

mod error;

pub use error::{Error, Result};
pub use executor::SearchPage;

use std::sync::Arc;

use hsa_config::Config;
use hsa_directory::{Directory, LdapDirectory};
use hsa_domain::{CodeTables, Eligibility, HealthcareType, HealthcareTypes};

pub struct HsaService {
	pub cfg: Config,
	pub directory: Arc<dyn Directory>,
	code_tables: CodeTables,
	healthcare_types: HealthcareTypes,
}
impl HsaService {
	/// Uses only the configured code tables. Fails when a health-care type refers to an
	/// attribute units do not have.
	pub fn new(cfg: Config, directory: Arc<dyn Directory>) -> Result<Self> {
		let code_tables = CodeTables::from(&cfg.code_tables);

		Self::with_code_tables(cfg, directory, code_tables)
	}

	/// Like [`HsaService::new`], but first reads the code tables under
	/// `directory.code_table_base_dn` when one is configured. Configured tables take precedence.
	pub async fn load(cfg: Config, directory: Arc<dyn Directory>) -> Result<Self> {
		let code_tables = match cfg.directory.code_table_base_dn.as_deref() {
			Some(base_dn) =>
				code_tables::load(directory.as_ref(), base_dn).await?.overridden_by(&cfg.code_tables),
			None => CodeTables::from(&cfg.code_tables),
		};

		Self::with_code_tables(cfg, directory, code_tables)
	}

	/// Uses the LDAP server named in `cfg.directory`.
	pub async fn connect(cfg: Config) -> Result<Self> {
		let directory = LdapDirectory::connect(&cfg.directory)?;

		Self::load(cfg, Arc::new(directory)).await
	}

	fn with_code_tables(
		cfg: Config,
		directory: Arc<dyn Directory>,
		code_tables: CodeTables,
	) -> Result<Self> {
		let healthcare_types = HealthcareTypes::from_config(&cfg.healthcare_types)?;

		tracing::info!(
			administrations = code_tables.administrations.len(),
			business_classifications = code_tables.business_classifications.len(),
			care_types = code_tables.care_types.len(),
			healthcare_types = healthcare_types.iter().count(),
			"Search service ready."
		);

		Ok(Self { cfg, directory, code_tables, healthcare_types })
	}

	/// Configured health-care types, in configuration order.
	pub fn healthcare_types(&self) -> Vec<&HealthcareType> {
		self.healthcare_types.iter().collect()
	}

	fn eligibility(&self) -> Eligibility<'_> {
		Eligibility::new(&self.cfg.search.business_classification_allow_list, &self.healthcare_types)
	}

	/// Caps a requested page size at `search.max_results`.
	fn effective_max(&self, max: usize) -> Result<usize> {
		if max == 0 {
			return Err(Error::InvalidRequest { message: "max must be greater than zero.".to_string() });
		}

		Ok(max.min(self.cfg.search.max_results))
	}
}
