use std::fmt::{Display, Formatter, Write};

use crate::{
	code_table::{CodeTable, CodeTables},
	criteria::{Criterion, PersonCriteria, UnitCriteria},
	healthcare::{HealthcareType, HealthcareTypes},
	pattern::{LikePattern, LikePatternBuilder},
	schema,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
	#[error("Unknown health-care type '{name}'.")]
	UnknownHealthcareType { name: String },
}

/// Directory search filter. Encodes to RFC 4515 text through [`Display`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
	And(Vec<Filter>),
	Or(Vec<Filter>),
	Equals { attribute: &'static str, value: String },
	Like { attribute: &'static str, pattern: LikePattern },
}
impl Filter {
	pub fn equals(attribute: &'static str, value: impl Into<String>) -> Self {
		Self::Equals { attribute, value: value.into() }
	}

	pub fn like(attribute: &'static str, pattern: LikePattern) -> Self {
		Self::Like { attribute, pattern }
	}

	pub fn criterion(attribute: &'static str, criterion: &Criterion) -> Self {
		match criterion {
			Criterion::Exact(value) => Self::equals(attribute, value.as_str()),
			Criterion::Wildcard(pattern) => Self::like(attribute, pattern.clone()),
		}
	}

	/// A single clause is returned as is.
	pub fn and(mut clauses: Vec<Filter>) -> Self {
		if clauses.len() == 1 { clauses.remove(0) } else { Self::And(clauses) }
	}

	/// A single clause is returned as is. No clauses yields a filter that matches nothing.
	pub fn or(mut clauses: Vec<Filter>) -> Self {
		if clauses.len() == 1 { clauses.remove(0) } else { Self::Or(clauses) }
	}

	/// True when no entry can match, so the directory need not be asked.
	pub fn is_unsatisfiable(&self) -> bool {
		match self {
			Self::And(clauses) => clauses.iter().any(Self::is_unsatisfiable),
			Self::Or(clauses) => clauses.iter().all(Self::is_unsatisfiable),
			Self::Equals { .. } | Self::Like { .. } => false,
		}
	}
}
impl Display for Filter {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::And(clauses) => write_group(f, '&', clauses),
			Self::Or(clauses) => write_group(f, '|', clauses),
			Self::Equals { attribute, value } => {
				write!(f, "({attribute}=")?;
				write_escaped(f, value)?;
				f.write_char(')')
			},
			Self::Like { attribute, pattern } => {
				write!(f, "({attribute}=")?;

				for (idx, segment) in pattern.segments().iter().enumerate() {
					if idx > 0 {
						f.write_char('*')?;
					}

					write_escaped(f, segment)?;
				}

				f.write_char(')')
			},
		}
	}
}

/// The object class and naming attribute of one kind of unit-like entry.
#[derive(Debug, Clone, Copy)]
struct Branch<'a> {
	object_class: &'a str,
	name_attribute: &'static str,
}

/// Builds unit search filters. Units and functions share every clause except the object class
/// and the naming attribute, so each search is the OR of the two branches.
pub struct UnitFilterBuilder<'a> {
	unit: Branch<'a>,
	function: Branch<'a>,
	code_tables: &'a CodeTables,
	healthcare_types: &'a HealthcareTypes,
}
impl<'a> UnitFilterBuilder<'a> {
	pub fn new(
		search: &'a hsa_config::Search,
		code_tables: &'a CodeTables,
		healthcare_types: &'a HealthcareTypes,
	) -> Self {
		Self {
			unit: Branch { object_class: &search.unit_object_class, name_attribute: schema::UNIT_NAME },
			function: Branch {
				object_class: &search.function_object_class,
				name_attribute: schema::FUNCTION_NAME,
			},
			code_tables,
			healthcare_types,
		}
	}

	pub fn build(&self, criteria: &UnitCriteria) -> Result<Filter, FilterError> {
		let name = Criterion::parse_opt(criteria.name.as_deref());
		let shared = self.shared_clauses(criteria);
		let healthcare_types = self.selected_healthcare_types(criteria)?;
		let branch = |branch: Branch<'_>| {
			let mut clauses = vec![Filter::equals(schema::OBJECT_CLASS, branch.object_class)];

			if let Some(name) = name.as_ref() {
				clauses.push(Filter::criterion(branch.name_attribute, name));
			}

			clauses.extend(shared.iter().cloned());

			if !healthcare_types.is_empty() {
				clauses.push(Filter::or(
					healthcare_types
						.iter()
						.map(|healthcare_type| healthcare_type.to_filter(branch.name_attribute))
						.collect(),
				));
			}

			Filter::and(clauses)
		};

		Ok(Filter::Or(vec![branch(self.unit), branch(self.function)]))
	}

	/// Matches one unit or function by its identity.
	pub fn identity(&self, hsa_identity: &str) -> Filter {
		let branch = |branch: Branch<'_>| {
			Filter::And(vec![
				Filter::equals(schema::OBJECT_CLASS, branch.object_class),
				Filter::equals(schema::HSA_IDENTITY, hsa_identity.trim()),
			])
		};

		Filter::Or(vec![branch(self.unit), branch(self.function)])
	}

	/// Matches every unit and function.
	pub fn all(&self) -> Filter {
		Filter::Or(vec![
			Filter::equals(schema::OBJECT_CLASS, self.unit.object_class),
			Filter::equals(schema::OBJECT_CLASS, self.function.object_class),
		])
	}

	fn shared_clauses(&self, criteria: &UnitCriteria) -> Vec<Filter> {
		let mut clauses = Vec::new();

		if let Some(id) = Criterion::parse_opt(criteria.hsa_identity.as_deref()) {
			clauses.push(Filter::criterion(schema::HSA_IDENTITY, &id));
		}
		if let Some(location) = Criterion::parse_opt(criteria.location.as_deref()) {
			clauses.push(location_filter(&location));
		}
		if let Some(liable_code) = Criterion::parse_opt(criteria.liable_code.as_deref()) {
			clauses.push(Filter::criterion(schema::LIABLE_CODE, &liable_code));
		}
		if let Some(municipality_code) =
			Criterion::parse_opt(criteria.municipality_code.as_deref())
		{
			clauses.push(Filter::criterion(schema::MUNICIPALITY_CODE, &municipality_code));
		}

		for (raw, table, attribute) in [
			(
				&criteria.administration_name,
				&self.code_tables.administrations,
				schema::ADMINISTRATION_CODE,
			),
			(
				&criteria.business_classification_name,
				&self.code_tables.business_classifications,
				schema::BUSINESS_CLASSIFICATION_CODE,
			),
			(&criteria.care_type_name, &self.code_tables.care_types, schema::CARE_TYPE),
		] {
			if let Some(criterion) = Criterion::parse_opt(raw.as_deref()) {
				clauses.push(code_filter(table, &criterion, attribute));
			}
		}

		clauses
	}

	fn selected_healthcare_types(
		&self,
		criteria: &UnitCriteria,
	) -> Result<Vec<&'a HealthcareType>, FilterError> {
		let registry = self.healthcare_types;

		criteria
			.healthcare_types
			.iter()
			.map(|name| name.trim())
			.filter(|name| !name.is_empty())
			.map(|name| {
				registry
					.get(name)
					.ok_or_else(|| FilterError::UnknownHealthcareType { name: name.to_string() })
			})
			.collect()
	}
}

/// Builds the person search filter.
pub fn person_filter(object_class: &str, criteria: &PersonCriteria) -> Filter {
	let mut clauses = vec![Filter::equals(schema::OBJECT_CLASS, object_class)];

	for (raw, attribute) in [
		(&criteria.given_name, schema::GIVEN_NAME),
		(&criteria.surname, schema::SURNAME),
		(&criteria.hsa_identity, schema::HSA_IDENTITY),
		(&criteria.title, schema::TITLE),
	] {
		if let Some(criterion) = Criterion::parse_opt(raw.as_deref()) {
			clauses.push(Filter::criterion(attribute, &criterion));
		}
	}

	Filter::and(clauses)
}

/// Searches the value in each line slot of an encoded address.
pub fn address_filter(attribute: &'static str, criterion: &Criterion) -> Filter {
	let slots = (0..schema::ADDRESS_LINES)
		.map(|slot| {
			let mut builder = LikePatternBuilder::default();

			for idx in 0..schema::ADDRESS_LINES {
				if idx > 0 {
					builder.literal(schema::ADDRESS_LINE_SEPARATOR);
				}
				if idx != slot {
					builder.wildcard();

					continue;
				}

				match criterion {
					Criterion::Exact(value) => builder.literal(value),
					Criterion::Wildcard(pattern) => builder.pattern(pattern),
				};
			}

			Filter::like(attribute, builder.finish())
		})
		.collect();

	Filter::Or(slots)
}

fn location_filter(criterion: &Criterion) -> Filter {
	Filter::Or(vec![
		Filter::criterion(schema::MUNICIPALITY_NAME, criterion),
		address_filter(schema::STREET_ADDRESS, criterion),
		address_filter(schema::POSTAL_ADDRESS, criterion),
	])
}

fn code_filter(table: &CodeTable, criterion: &Criterion, attribute: &'static str) -> Filter {
	let codes = table.lookup(criterion);

	Filter::or(codes.into_iter().map(|code| Filter::equals(attribute, code)).collect())
}

fn write_group(f: &mut Formatter<'_>, op: char, clauses: &[Filter]) -> std::fmt::Result {
	f.write_char('(')?;
	f.write_char(op)?;

	for clause in clauses {
		write!(f, "{clause}")?;
	}

	f.write_char(')')
}

fn write_escaped(f: &mut Formatter<'_>, value: &str) -> std::fmt::Result {
	for ch in value.chars() {
		match ch {
			'\\' => f.write_str("\\5c")?,
			'*' => f.write_str("\\2a")?,
			'(' => f.write_str("\\28")?,
			')' => f.write_str("\\29")?,
			'\0' => f.write_str("\\00")?,
			other => f.write_char(other)?,
		}
	}

	Ok(())
}
