use std::cmp::Ordering;

use hsa_directory::SearchRequest;
use hsa_domain::{Person, PersonCriteria, filter, schema};

use crate::{
	Error, HsaService, Result,
	executor::{self, SearchPage},
};

impl HsaService {
	/// Searches persons, ordered by surname and given name.
	pub async fn search_persons(
		&self,
		criteria: &PersonCriteria,
		max: usize,
	) -> Result<SearchPage<Person>> {
		self.search_persons_by(criteria, max, Person::compare_by_name).await
	}

	pub async fn search_persons_by<C>(
		&self,
		criteria: &PersonCriteria,
		max: usize,
		compare: C,
	) -> Result<SearchPage<Person>>
	where
		C: FnMut(&Person, &Person) -> Ordering,
	{
		if criteria.is_empty() {
			return Err(Error::InvalidRequest {
				message: "At least one search criterion is required.".to_string(),
			});
		}

		let max = self.effective_max(max)?;
		let request = SearchRequest::new(
			&self.cfg.directory.person_base_dn,
			filter::person_filter(&self.cfg.search.person_object_class, criteria),
			schema::PERSON_ATTRIBUTES,
		);
		let persons = executor::fetch(self.directory.as_ref(), &request, Person::from_entry).await?;
		let page = executor::paginate(persons, max, compare);

		tracing::info!(
			total_count = page.total_count,
			returned = page.items.len(),
			"Person search finished."
		);

		Ok(page)
	}
}
