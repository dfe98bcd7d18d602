use std::collections::BTreeMap;

use time::{Duration, OffsetDateTime, macros::datetime};

use hsa_config::{CodeEntry, Search};
use hsa_domain::{
	CodeTables, DirectoryEntry, Eligibility, Filter, FilterError, HealthcareTypes, Unit,
	UnitCriteria, UnitFilterBuilder,
};

const NOW: OffsetDateTime = datetime!(2026-06-01 12:00 UTC);

fn search() -> Search {
	Search {
		max_results: 100,
		unit_object_class: "vgrOrganizationalUnit".to_string(),
		function_object_class: "vgrOrganizationalRole".to_string(),
		person_object_class: "vgrUser".to_string(),
		business_classification_allow_list: vec!["1500".to_string(), "1504".to_string()],
	}
}

fn code_entry(code: &str, text: &str) -> CodeEntry {
	CodeEntry { code: code.to_string(), text: text.to_string() }
}

fn code_tables() -> CodeTables {
	CodeTables::from(&hsa_config::CodeTables {
		administrations: vec![
			code_entry("ao3-1", "Primärvården Göteborg"),
			code_entry("ao3-2", "Primärvården Fyrbodal"),
		],
		business_classifications: vec![code_entry("1500", "Allmänmedicin")],
		care_types: vec![code_entry("01", "Öppen vård"), code_entry("02", "Sluten vård")],
	})
}

fn healthcare_type(
	name: &str,
	unfiltered: bool,
	conditions: &[(&str, &str)],
) -> hsa_config::HealthcareType {
	hsa_config::HealthcareType {
		name: name.to_string(),
		unfiltered,
		conditions: conditions
			.iter()
			.map(|(attribute, values)| (attribute.to_string(), values.to_string()))
			.collect::<BTreeMap<_, _>>(),
	}
}

fn healthcare_types() -> HealthcareTypes {
	HealthcareTypes::from_config(&[
		healthcare_type("Vårdcentral", false, &[("hsaBusinessClassificationCode", "1500")]),
		healthcare_type(
			"Tandvård",
			true,
			&[("hsaBusinessClassificationCode", "1300,1301"), ("vgrCareType", "01")],
		),
	])
	.expect("Health-care types must build.")
}

fn build(criteria: &UnitCriteria) -> Result<Filter, FilterError> {
	let search = search();
	let code_tables = code_tables();
	let healthcare_types = healthcare_types();

	UnitFilterBuilder::new(&search, &code_tables, &healthcare_types).build(criteria)
}

fn unit(id: &str, codes: &[&str], care_type: Option<&str>, end: Option<&str>) -> Unit {
	let mut entry = DirectoryEntry::new(format!("ou={id},ou=Org,o=VGR"))
		.with("objectClass", ["vgrOrganizationalUnit"])
		.with("hsaIdentity", [id])
		.with("ou", [format!("Enhet {id}")])
		.with("hsaBusinessClassificationCode", codes.iter().copied());

	if let Some(care_type) = care_type {
		entry = entry.with("vgrCareType", [care_type]);
	}
	if let Some(end) = end {
		entry = entry.with("hsaEndDate", [end]);
	}

	Unit::from_entry(&entry, "vgrOrganizationalRole").expect("Unit entry must convert.")
}

#[test]
fn plain_name_becomes_wildcard_token_search() {
	let criteria = UnitCriteria {
		name: Some("Kvalitet- och säkerhetsavdelningen".to_string()),
		..Default::default()
	};

	assert_eq!(
		build(&criteria).expect("filter").to_string(),
		"(|(&(objectClass=vgrOrganizationalUnit)(ou=*Kvalitet*och*säkerhetsavdelningen*))\
		(&(objectClass=vgrOrganizationalRole)(cn=*Kvalitet*och*säkerhetsavdelningen*)))"
	);
}

#[test]
fn quoted_name_is_exact_in_both_branches() {
	let criteria =
		UnitCriteria { name: Some("\"Vårdcentralen Angered\"".to_string()), ..Default::default() };

	assert_eq!(
		build(&criteria).expect("filter").to_string(),
		"(|(&(objectClass=vgrOrganizationalUnit)(ou=Vårdcentralen Angered))\
		(&(objectClass=vgrOrganizationalRole)(cn=Vårdcentralen Angered)))"
	);
}

#[test]
fn two_character_quotes_are_not_exact() {
	let criteria = UnitCriteria { name: Some("\"\"".to_string()), ..Default::default() };
	let encoded = build(&criteria).expect("filter").to_string();

	assert!(encoded.contains("(ou=*\"\"*)"), "{encoded}");
}

#[test]
fn clauses_are_anded_within_each_branch() {
	let criteria = UnitCriteria {
		name: Some("akut".to_string()),
		hsa_identity: Some("\"SE2321000131-E000000000001\"".to_string()),
		liable_code: Some("12".to_string()),
		..Default::default()
	};
	let Filter::Or(branches) = build(&criteria).expect("filter") else {
		panic!("Unit filter must be an OR of branches.");
	};

	assert_eq!(branches.len(), 2);
	assert_eq!(
		branches[1].to_string(),
		"(&(objectClass=vgrOrganizationalRole)(cn=*akut*)\
		(hsaIdentity=SE2321000131-E000000000001)(vgrAnsvarsnummer=*12*))"
	);
}

#[test]
fn location_searches_municipality_and_both_addresses() {
	let criteria = UnitCriteria { location: Some("Mölndal".to_string()), ..Default::default() };
	let encoded = build(&criteria).expect("filter").to_string();

	assert!(encoded.contains("(hsaMunicipalityName=*Mölndal*)"));
	assert_eq!(encoded.matches("(hsaStreetAddress=").count(), 12);
	assert_eq!(encoded.matches("(hsaPostalAddress=").count(), 12);
	assert!(encoded.contains("(hsaPostalAddress=*$*$*$*Mölndal*$*$*)"));
}

#[test]
fn code_lookups_or_every_resolved_code() {
	let criteria = UnitCriteria {
		administration_name: Some("primärvården".to_string()),
		care_type_name: Some("\"Sluten vård\"".to_string()),
		..Default::default()
	};
	let encoded = build(&criteria).expect("filter").to_string();

	assert!(encoded.contains("(|(vgrAO3kod=ao3-1)(vgrAO3kod=ao3-2))"), "{encoded}");
	assert!(encoded.contains("(vgrCareType=02)"), "{encoded}");
	assert!(!encoded.contains("(vgrCareType=01)"), "{encoded}");
}

#[test]
fn unresolved_code_text_makes_the_filter_unsatisfiable() {
	let criteria = UnitCriteria {
		name: Some("akut".to_string()),
		business_classification_name: Some("Ortopedi".to_string()),
		..Default::default()
	};

	assert!(build(&criteria).expect("filter").is_unsatisfiable());
}

#[test]
fn healthcare_types_become_condition_trees() {
	let criteria = UnitCriteria {
		healthcare_types: vec!["Vårdcentral".to_string(), "tandvård".to_string()],
		..Default::default()
	};
	let encoded = build(&criteria).expect("filter").to_string();

	assert!(
		encoded.contains(
			"(|(hsaBusinessClassificationCode=1500)\
			(&(|(hsaBusinessClassificationCode=1300)(hsaBusinessClassificationCode=1301))\
			(vgrCareType=01)))"
		),
		"{encoded}"
	);
}

#[test]
fn name_conditions_use_each_branch_naming_attribute() {
	let search = search();
	let code_tables = code_tables();
	let healthcare_types = HealthcareTypes::from_config(&[healthcare_type(
		"Jour",
		false,
		&[("cn", "Jourmottagning")],
	)])
	.expect("Health-care types must build.");
	let criteria = UnitCriteria { healthcare_types: vec!["Jour".to_string()], ..Default::default() };
	let filter = UnitFilterBuilder::new(&search, &code_tables, &healthcare_types)
		.build(&criteria)
		.expect("filter");

	assert_eq!(
		filter.to_string(),
		"(|(&(objectClass=vgrOrganizationalUnit)(ou=Jourmottagning))\
		(&(objectClass=vgrOrganizationalRole)(cn=Jourmottagning)))"
	);
}

#[test]
fn municipality_code_is_matched_in_both_branches() {
	let criteria =
		UnitCriteria { municipality_code: Some("\"1480\"".to_string()), ..Default::default() };

	assert_eq!(
		build(&criteria).expect("filter").to_string(),
		"(|(&(objectClass=vgrOrganizationalUnit)(hsaMunicipalityCode=1480))\
		(&(objectClass=vgrOrganizationalRole)(hsaMunicipalityCode=1480)))"
	);
}

#[test]
fn unknown_healthcare_type_is_an_error() {
	let criteria =
		UnitCriteria { healthcare_types: vec!["Fotvård".to_string()], ..Default::default() };

	assert_eq!(
		build(&criteria),
		Err(FilterError::UnknownHealthcareType { name: "Fotvård".to_string() })
	);
}

#[test]
fn identity_filter_checks_both_object_classes() {
	let search = search();
	let code_tables = code_tables();
	let healthcare_types = healthcare_types();
	let builder = UnitFilterBuilder::new(&search, &code_tables, &healthcare_types);

	assert_eq!(
		builder.identity(" SE1 ").to_string(),
		"(|(&(objectClass=vgrOrganizationalUnit)(hsaIdentity=SE1))\
		(&(objectClass=vgrOrganizationalRole)(hsaIdentity=SE1)))"
	);
	assert_eq!(
		builder.all().to_string(),
		"(|(objectClass=vgrOrganizationalUnit)(objectClass=vgrOrganizationalRole))"
	);
}

#[test]
fn ended_units_are_not_eligible() {
	let healthcare_types = healthcare_types();
	let eligibility = Eligibility::new(&[], &healthcare_types);
	let ended = unit("SE1", &["1500"], None, Some("20200101000000Z"));
	let open = unit("SE2", &["1500"], None, None);
	let future = unit("SE3", &["1500"], None, Some("20991231000000Z"));

	assert!(!eligibility.is_eligible(&ended, NOW));
	assert!(eligibility.is_eligible(&open, NOW));
	assert!(eligibility.is_eligible(&future, NOW));
	assert!(!eligibility.is_eligible(&future, NOW + Duration::days(365 * 100)));
}

#[test]
fn allow_list_drops_units_without_allowed_codes() {
	let search = search();
	let healthcare_types = healthcare_types();
	let eligibility = Eligibility::new(&search.business_classification_allow_list, &healthcare_types);
	let mut units = vec![
		unit("SE1", &["1500"], None, None),
		unit("SE2", &["1100"], None, None),
		unit("SE3", &[], None, None),
		unit("SE4", &["1100", "1504"], None, None),
	];

	eligibility.retain(&mut units, NOW);

	let ids: Vec<&str> = units.iter().map(|unit| unit.hsa_identity.as_str()).collect();

	assert_eq!(ids, ["SE1", "SE4"]);
}

#[test]
fn allow_list_compares_numeric_codes_by_value() {
	let search = search();
	let healthcare_types = healthcare_types();
	let eligibility = Eligibility::new(&search.business_classification_allow_list, &healthcare_types);

	assert!(eligibility.is_eligible(&unit("SE1", &["01500"], None, None), NOW));
	assert!(!eligibility.is_eligible(&unit("SE2", &["15000"], None, None), NOW));
}

#[test]
fn unfiltered_healthcare_type_bypasses_allow_list() {
	let search = search();
	let healthcare_types = healthcare_types();
	let eligibility = Eligibility::new(&search.business_classification_allow_list, &healthcare_types);
	let dental = unit("SE1", &["1301"], Some("01"), None);
	let dental_wrong_care_type = unit("SE2", &["1301"], Some("02"), None);
	let dental_ended = unit("SE3", &["1301"], Some("01"), Some("20200101000000Z"));

	assert!(eligibility.is_eligible(&dental, NOW));
	assert!(!eligibility.is_eligible(&dental_wrong_care_type, NOW));
	assert!(!eligibility.is_eligible(&dental_ended, NOW));
}
