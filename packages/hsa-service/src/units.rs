use std::cmp::Ordering;

use time::OffsetDateTime;

use hsa_directory::{SearchRequest, SearchScope};
use hsa_domain::{Filter, Unit, UnitCriteria, UnitFilterBuilder, schema};

use crate::{
	Error, HsaService, Result,
	executor::{self, SearchPage},
};

impl HsaService {
	/// Searches units and functions, ordered by name.
	pub async fn search_units(&self, criteria: &UnitCriteria, max: usize) -> Result<SearchPage<Unit>> {
		self.search_units_by(criteria, max, Unit::compare_by_name).await
	}

	pub async fn search_units_by<C>(
		&self,
		criteria: &UnitCriteria,
		max: usize,
		compare: C,
	) -> Result<SearchPage<Unit>>
	where
		C: FnMut(&Unit, &Unit) -> Ordering,
	{
		if criteria.is_empty() {
			return Err(Error::InvalidRequest {
				message: "At least one search criterion is required.".to_string(),
			});
		}

		let max = self.effective_max(max)?;
		let filter = self.unit_filters().build(criteria)?;

		if filter.is_unsatisfiable() {
			tracing::debug!("Unit criteria resolved no codes. Skipping directory search.");

			return Ok(SearchPage::empty());
		}

		let units = self.find_units(filter).await?;
		let page = executor::paginate(units, max, compare);

		tracing::info!(
			total_count = page.total_count,
			returned = page.items.len(),
			"Unit search finished."
		);

		Ok(page)
	}

	/// Looks up one eligible unit or function by identity.
	pub async fn get_unit(&self, hsa_identity: &str) -> Result<Option<Unit>> {
		if hsa_identity.trim().is_empty() {
			return Err(Error::InvalidRequest { message: "hsa_identity must be non-empty.".to_string() });
		}

		let filter = self.unit_filters().identity(hsa_identity);

		Ok(self.find_units(filter).await?.into_iter().next())
	}

	/// Reads one eligible unit or function by its distinguished name.
	pub async fn get_unit_by_dn(&self, dn: &str) -> Result<Option<Unit>> {
		if dn.trim().is_empty() {
			return Err(Error::InvalidRequest { message: "dn must be non-empty.".to_string() });
		}

		let request =
			SearchRequest::new(dn.trim(), self.unit_filters().all(), schema::UNIT_ATTRIBUTES)
				.with_scope(SearchScope::Base);

		Ok(self.find_units_with(&request).await?.into_iter().next())
	}

	/// Eligible units anywhere below `parent`, ordered by name. Functions are not included.
	pub async fn sub_units(&self, parent: &Unit, max: usize) -> Result<SearchPage<Unit>> {
		let max = self.effective_max(max)?;
		let request = SearchRequest::new(
			&parent.dn,
			Filter::equals(schema::OBJECT_CLASS, &self.cfg.search.unit_object_class),
			schema::UNIT_ATTRIBUTES,
		);
		let mut units = self.find_units_with(&request).await?;

		units.retain(|unit| unit.hsa_identity != parent.hsa_identity);

		let page = executor::paginate(units, max, Unit::compare_by_name);

		tracing::info!(
			parent = %parent.hsa_identity,
			total_count = page.total_count,
			returned = page.items.len(),
			"Sub-unit search finished."
		);

		Ok(page)
	}

	/// Identities of every eligible unit and function, sorted.
	pub async fn unit_identities(&self) -> Result<Vec<String>> {
		let units = self.find_units(self.unit_filters().all()).await?;
		let mut identities: Vec<String> = units.into_iter().map(|unit| unit.hsa_identity).collect();

		identities.sort();

		Ok(identities)
	}

	/// Searches the whole unit tree.
	pub(crate) async fn find_units(&self, filter: Filter) -> Result<Vec<Unit>> {
		let request =
			SearchRequest::new(&self.cfg.directory.unit_base_dn, filter, schema::UNIT_ATTRIBUTES);

		self.find_units_with(&request).await
	}

	async fn find_units_with(&self, request: &SearchRequest) -> Result<Vec<Unit>> {
		let function_object_class = self.cfg.search.function_object_class.as_str();
		let mut units = executor::fetch(self.directory.as_ref(), request, |entry| {
			Unit::from_entry(entry, function_object_class)
		})
		.await?;
		let found = units.len();

		self.eligibility().retain(&mut units, OffsetDateTime::now_utc());

		tracing::debug!(found, eligible = units.len(), "Applied unit eligibility rules.");

		Ok(units)
	}

	pub(crate) fn unit_filters(&self) -> UnitFilterBuilder<'_> {
		UnitFilterBuilder::new(&self.cfg.search, &self.code_tables, &self.healthcare_types)
	}
}
