use serde::{Serialize, Serializer};

use crate::{schema, unit::Unit};

/// Unit attributes that health-care-type conditions may test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitAttribute {
	HsaIdentity,
	Name,
	MunicipalityName,
	MunicipalityCode,
	BusinessClassificationCode,
	CareType,
	AdministrationCode,
	LiableCode,
	Mail,
}
impl UnitAttribute {
	pub const ALL: [Self; 9] = [
		Self::HsaIdentity,
		Self::Name,
		Self::MunicipalityName,
		Self::MunicipalityCode,
		Self::BusinessClassificationCode,
		Self::CareType,
		Self::AdministrationCode,
		Self::LiableCode,
		Self::Mail,
	];

	/// Directory attribute name. Functions store their name in `cn`, units in `ou`.
	pub fn ldap_name(self) -> &'static str {
		match self {
			Self::HsaIdentity => schema::HSA_IDENTITY,
			Self::Name => schema::UNIT_NAME,
			Self::MunicipalityName => schema::MUNICIPALITY_NAME,
			Self::MunicipalityCode => schema::MUNICIPALITY_CODE,
			Self::BusinessClassificationCode => schema::BUSINESS_CLASSIFICATION_CODE,
			Self::CareType => schema::CARE_TYPE,
			Self::AdministrationCode => schema::ADMINISTRATION_CODE,
			Self::LiableCode => schema::LIABLE_CODE,
			Self::Mail => schema::MAIL,
		}
	}

	/// Case-insensitive, like directory attribute names.
	pub fn from_ldap_name(name: &str) -> Option<Self> {
		let name = name.trim();

		if name.eq_ignore_ascii_case(schema::FUNCTION_NAME) {
			return Some(Self::Name);
		}

		Self::ALL.into_iter().find(|attribute| attribute.ldap_name().eq_ignore_ascii_case(name))
	}

	pub fn values(self, unit: &Unit) -> AttributeValues<'_> {
		match self {
			Self::HsaIdentity => AttributeValues::Single(Some(&unit.hsa_identity)),
			Self::Name => AttributeValues::Single(Some(&unit.name)),
			Self::MunicipalityName => AttributeValues::Single(unit.municipality_name.as_deref()),
			Self::MunicipalityCode => AttributeValues::Single(unit.municipality_code.as_deref()),
			Self::BusinessClassificationCode =>
				AttributeValues::Multi(&unit.business_classification_codes),
			Self::CareType => AttributeValues::Single(unit.care_type.as_deref()),
			Self::AdministrationCode => AttributeValues::Single(unit.administration_code.as_deref()),
			Self::LiableCode => AttributeValues::Multi(&unit.liable_codes),
			Self::Mail => AttributeValues::Single(unit.mail.as_deref()),
		}
	}
}
impl Serialize for UnitAttribute {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(self.ldap_name())
	}
}

/// The value or values a unit holds for one attribute.
#[derive(Debug, Clone, Copy)]
pub enum AttributeValues<'a> {
	Single(Option<&'a str>),
	Multi(&'a [String]),
}
impl AttributeValues<'_> {
	/// True when any held value equals any of `accepted`.
	pub fn contains_any(&self, accepted: &[String]) -> bool {
		match self {
			Self::Single(value) => value.map(|value| accepted.iter().any(|a| a == value)).unwrap_or(false),
			Self::Multi(values) => values.iter().any(|value| accepted.contains(value)),
		}
	}
}
