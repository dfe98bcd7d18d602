use time::OffsetDateTime;

use crate::{healthcare::HealthcareTypes, unit::Unit};

/// Post-search rules deciding which units may be shown.
#[derive(Debug, Clone, Copy)]
pub struct Eligibility<'a> {
	allow_list: &'a [String],
	healthcare_types: &'a HealthcareTypes,
}
impl<'a> Eligibility<'a> {
	/// An empty allow-list disables the business classification check.
	pub fn new(allow_list: &'a [String], healthcare_types: &'a HealthcareTypes) -> Self {
		Self { allow_list, healthcare_types }
	}

	pub fn is_eligible(&self, unit: &Unit, now: OffsetDateTime) -> bool {
		unit.is_active(now) && self.passes_allow_list(unit)
	}

	pub fn retain(&self, units: &mut Vec<Unit>, now: OffsetDateTime) {
		units.retain(|unit| self.is_eligible(unit, now));
	}

	fn passes_allow_list(&self, unit: &Unit) -> bool {
		if self.allow_list.is_empty() {
			return true;
		}
		if unit
			.business_classification_codes
			.iter()
			.any(|code| self.allow_list.iter().any(|allowed| same_code(allowed, code)))
		{
			return true;
		}

		self.healthcare_types.unfiltered().any(|healthcare_type| healthcare_type.matches(unit))
	}
}

/// Numeric codes compare by value, so `01500` and `1500` are the same code.
fn same_code(a: &str, b: &str) -> bool {
	let (a, b) = (a.trim(), b.trim());

	match (a.parse::<u64>(), b.parse::<u64>()) {
		(Ok(a), Ok(b)) => a == b,
		_ => a == b,
	}
}
