//! Attribute names of the HSA directory schema.

pub const OBJECT_CLASS: &str = "objectClass";
pub const HSA_IDENTITY: &str = "hsaIdentity";

pub const UNIT_NAME: &str = "ou";
pub const FUNCTION_NAME: &str = "cn";

pub const MUNICIPALITY_NAME: &str = "hsaMunicipalityName";
pub const MUNICIPALITY_CODE: &str = "hsaMunicipalityCode";
pub const STREET_ADDRESS: &str = "hsaStreetAddress";
pub const POSTAL_ADDRESS: &str = "hsaPostalAddress";
pub const BUSINESS_CLASSIFICATION_CODE: &str = "hsaBusinessClassificationCode";
pub const CARE_TYPE: &str = "vgrCareType";
pub const ADMINISTRATION_CODE: &str = "vgrAO3kod";
pub const LIABLE_CODE: &str = "vgrAnsvarsnummer";
pub const END_DATE: &str = "hsaEndDate";
pub const TELEPHONE_NUMBER: &str = "hsaTelephoneNumber";
pub const MAIL: &str = "mail";
pub const LABELED_URI: &str = "labeledURI";

pub const GIVEN_NAME: &str = "givenName";
pub const SURNAME: &str = "sn";
pub const FULL_NAME: &str = "cn";
pub const TITLE: &str = "title";

pub const CODE_TABLE_NAME: &str = "cn";
pub const DESCRIPTION: &str = "description";

/// Separator between the lines of an encoded address value.
pub const ADDRESS_LINE_SEPARATOR: &str = "$";
/// Number of lines an encoded address value holds.
pub const ADDRESS_LINES: usize = 6;

pub const UNIT_ATTRIBUTES: &[&str] = &[
	OBJECT_CLASS,
	HSA_IDENTITY,
	UNIT_NAME,
	FUNCTION_NAME,
	MUNICIPALITY_NAME,
	MUNICIPALITY_CODE,
	STREET_ADDRESS,
	POSTAL_ADDRESS,
	BUSINESS_CLASSIFICATION_CODE,
	CARE_TYPE,
	ADMINISTRATION_CODE,
	LIABLE_CODE,
	END_DATE,
	TELEPHONE_NUMBER,
	MAIL,
	LABELED_URI,
];

pub const PERSON_ATTRIBUTES: &[&str] =
	&[HSA_IDENTITY, GIVEN_NAME, SURNAME, FULL_NAME, TITLE, MAIL, TELEPHONE_NUMBER];
