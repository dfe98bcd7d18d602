//! Reads the code tables kept in the directory as `code;text` descriptions.

use hsa_directory::{Directory, SearchRequest, SearchScope};
use hsa_domain::{CodeTable, CodeTables, Filter, code_table, schema};

use crate::Result;

/// Searches the children of `base_dn` for each table. A table the directory lacks is empty.
pub async fn load(directory: &dyn Directory, base_dn: &str) -> Result<CodeTables> {
	Ok(CodeTables {
		administrations: load_table(directory, base_dn, code_table::ADMINISTRATIONS).await?,
		business_classifications: load_table(
			directory,
			base_dn,
			code_table::BUSINESS_CLASSIFICATIONS,
		)
		.await?,
		care_types: load_table(directory, base_dn, code_table::CARE_TYPES).await?,
	})
}

async fn load_table(directory: &dyn Directory, base_dn: &str, name: &str) -> Result<CodeTable> {
	let request = SearchRequest::new(
		base_dn,
		Filter::equals(schema::CODE_TABLE_NAME, name),
		&[schema::DESCRIPTION],
	)
	.with_scope(SearchScope::OneLevel);
	let entries = directory.search(&request).await?;
	let Some(entry) = entries.first() else {
		tracing::warn!(table = name, base_dn, "Code table is missing from the directory.");

		return Ok(CodeTable::default());
	};
	let mut codes = Vec::new();

	for value in entry.values(schema::DESCRIPTION) {
		match code_table::parse_description(value) {
			Some(code) => codes.push(code),
			None => tracing::warn!(table = name, value = %value, "Skipping malformed code table value."),
		}
	}

	let table = CodeTable::new(codes);

	tracing::debug!(table = name, codes = table.len(), "Loaded code table.");

	Ok(table)
}
