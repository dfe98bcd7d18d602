pub mod attribute;
pub mod code_table;
pub mod collation;
pub mod criteria;
pub mod eligibility;
pub mod entry;
pub mod filter;
pub mod healthcare;
pub mod pattern;
pub mod person;
pub mod schema;
pub mod unit;

pub use attribute::{AttributeValues, UnitAttribute};
pub use code_table::{CodeTable, CodeTables, parse_description};
pub use criteria::{Criterion, PersonCriteria, UnitCriteria};
pub use eligibility::Eligibility;
pub use entry::{DirectoryEntry, EntryError};
pub use filter::{Filter, FilterError, UnitFilterBuilder};
pub use healthcare::{Condition, HealthcareType, HealthcareTypes, RegistryError};
pub use pattern::LikePattern;
pub use person::Person;
pub use unit::{Address, Unit, UnitKind};
