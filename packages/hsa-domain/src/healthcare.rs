use serde::Serialize;

use crate::{attribute::UnitAttribute, filter::Filter, unit::Unit};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
	#[error("Health-care type '{healthcare_type}' refers to unknown attribute '{attribute}'.")]
	UnknownAttribute { healthcare_type: String, attribute: String },
	#[error("Health-care type '{name}' is defined more than once.")]
	DuplicateName { name: String },
}

/// One attribute test: the unit must hold at least one of `values`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Condition {
	pub attribute: UnitAttribute,
	pub values: Vec<String>,
}
impl Condition {
	pub fn matches(&self, unit: &Unit) -> bool {
		self.attribute.values(unit).contains_any(&self.values)
	}

	/// `name_attribute` stands in for [`UnitAttribute::Name`], since units and functions are
	/// named by different attributes.
	fn to_filter(&self, name_attribute: &'static str) -> Filter {
		let attribute = match self.attribute {
			UnitAttribute::Name => name_attribute,
			other => other.ldap_name(),
		};

		Filter::or(self.values.iter().map(|value| Filter::equals(attribute, value)).collect())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthcareType {
	pub name: String,
	pub unfiltered: bool,
	pub conditions: Vec<Condition>,
}
impl HealthcareType {
	/// A unit is of this type when every condition holds.
	pub fn matches(&self, unit: &Unit) -> bool {
		self.conditions.iter().all(|condition| condition.matches(unit))
	}

	pub fn to_filter(&self, name_attribute: &'static str) -> Filter {
		Filter::and(
			self.conditions.iter().map(|condition| condition.to_filter(name_attribute)).collect(),
		)
	}
}

/// Configured health-care types, in configuration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HealthcareTypes {
	types: Vec<HealthcareType>,
}
impl HealthcareTypes {
	pub fn from_config(cfg: &[hsa_config::HealthcareType]) -> Result<Self, RegistryError> {
		let mut types: Vec<HealthcareType> = Vec::with_capacity(cfg.len());

		for entry in cfg {
			let name = entry.name.trim();

			if types.iter().any(|existing| same_name(&existing.name, name)) {
				return Err(RegistryError::DuplicateName { name: name.to_string() });
			}

			let mut conditions = Vec::with_capacity(entry.conditions.len());

			for (attribute_name, raw_values) in &entry.conditions {
				let attribute = UnitAttribute::from_ldap_name(attribute_name).ok_or_else(|| {
					RegistryError::UnknownAttribute {
						healthcare_type: name.to_string(),
						attribute: attribute_name.clone(),
					}
				})?;
				let values = raw_values
					.split(',')
					.map(str::trim)
					.filter(|value| !value.is_empty())
					.map(str::to_string)
					.collect();

				conditions.push(Condition { attribute, values });
			}

			types.push(HealthcareType {
				name: name.to_string(),
				unfiltered: entry.unfiltered,
				conditions,
			});
		}

		Ok(Self { types })
	}

	pub fn get(&self, name: &str) -> Option<&HealthcareType> {
		let name = name.trim();

		self.types.iter().find(|healthcare_type| same_name(&healthcare_type.name, name))
	}

	pub fn iter(&self) -> impl Iterator<Item = &HealthcareType> {
		self.types.iter()
	}

	pub fn unfiltered(&self) -> impl Iterator<Item = &HealthcareType> {
		self.types.iter().filter(|healthcare_type| healthcare_type.unfiltered)
	}
}

fn same_name(a: &str, b: &str) -> bool {
	a.to_lowercase() == b.to_lowercase()
}

#[cfg(test)]
mod tests {
	use std::collections::BTreeMap;

	use super::*;
	use crate::schema;

	fn config(name: &str, conditions: &[(&str, &str)]) -> hsa_config::HealthcareType {
		hsa_config::HealthcareType {
			name: name.to_string(),
			unfiltered: false,
			conditions: conditions
				.iter()
				.map(|(attribute, values)| (attribute.to_string(), values.to_string()))
				.collect::<BTreeMap<_, _>>(),
		}
	}

	#[test]
	fn builds_conditions_from_comma_lists() {
		let types = HealthcareTypes::from_config(&[config(
			"Tandvård",
			&[("hsaBusinessClassificationCode", "1300, 1301,,1302")],
		)])
		.expect("registry");
		let dental = types.get("tandvård").expect("type");

		assert_eq!(dental.conditions[0].attribute, UnitAttribute::BusinessClassificationCode);
		assert_eq!(dental.conditions[0].values, ["1300", "1301", "1302"]);
	}

	#[test]
	fn unknown_attribute_is_rejected() {
		let err = HealthcareTypes::from_config(&[config("X", &[("vgrNoSuchThing", "1")])])
			.expect_err("unknown attribute must fail");

		assert_eq!(
			err,
			RegistryError::UnknownAttribute {
				healthcare_type: "X".to_string(),
				attribute: "vgrNoSuchThing".to_string(),
			}
		);
	}

	#[test]
	fn duplicate_names_are_rejected() {
		let err = HealthcareTypes::from_config(&[
			config("BVC", &[("vgrCareType", "01")]),
			config("bvc", &[("vgrCareType", "02")]),
		])
		.expect_err("duplicate must fail");

		assert!(matches!(err, RegistryError::DuplicateName { .. }));
	}

	#[test]
	fn filter_ands_conditions_and_ors_values() {
		let types = HealthcareTypes::from_config(&[config(
			"Vårdcentral",
			&[("hsaBusinessClassificationCode", "1500,1501"), ("vgrCareType", "01")],
		)])
		.expect("registry");
		let filter = types.get("Vårdcentral").expect("type").to_filter(schema::UNIT_NAME);

		assert_eq!(
			filter.to_string(),
			"(&(|(hsaBusinessClassificationCode=1500)(hsaBusinessClassificationCode=1501))(vgrCareType=01))"
		);
	}

	#[test]
	fn name_conditions_follow_the_naming_attribute() {
		let types = HealthcareTypes::from_config(&[config("Jour", &[("cn", "Jourmottagning")])])
			.expect("registry");
		let jour = types.get("Jour").expect("type");

		assert_eq!(jour.to_filter(schema::UNIT_NAME).to_string(), "(ou=Jourmottagning)");
		assert_eq!(jour.to_filter(schema::FUNCTION_NAME).to_string(), "(cn=Jourmottagning)");
	}
}
