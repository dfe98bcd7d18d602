mod error;
mod types;

pub use error::{Error, Result};
pub use types::{CodeEntry, CodeTables, Config, Directory, HealthcareType, Search, Service};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	parse(&raw).map_err(|err| match err {
		Error::ParseConfig { source, .. } => Error::ParseConfig { path: path.to_path_buf(), source },
		other => other,
	})
}

pub fn parse(raw: &str) -> Result<Config> {
	let mut cfg: Config = toml::from_str(raw)
		.map_err(|err| Error::ParseConfig { path: Default::default(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	for (field, value) in [
		("directory.url", &cfg.directory.url),
		("directory.unit_base_dn", &cfg.directory.unit_base_dn),
		("directory.person_base_dn", &cfg.directory.person_base_dn),
		("search.unit_object_class", &cfg.search.unit_object_class),
		("search.function_object_class", &cfg.search.function_object_class),
		("search.person_object_class", &cfg.search.person_object_class),
	] {
		if value.trim().is_empty() {
			return Err(Error::validation(field, "must be non-empty."));
		}
	}

	if !cfg.directory.url.starts_with("ldap://") && !cfg.directory.url.starts_with("ldaps://") {
		return Err(Error::validation("directory.url", "must use the ldap:// or ldaps:// scheme."));
	}
	if cfg.directory.bind_dn.is_some() != cfg.directory.bind_password.is_some() {
		return Err(Error::validation(
			"directory.bind_password",
			"must be set together with directory.bind_dn.",
		));
	}
	if cfg.directory.pool_max_conns == 0 {
		return Err(Error::validation("directory.pool_max_conns", "must be greater than zero."));
	}

	for (field, value) in [
		("directory.pool_wait_timeout_ms", cfg.directory.pool_wait_timeout_ms),
		("directory.connect_timeout_ms", cfg.directory.connect_timeout_ms),
		("directory.search_timeout_ms", cfg.directory.search_timeout_ms),
	] {
		if value == 0 {
			return Err(Error::validation(field, "must be greater than zero."));
		}
	}

	if cfg.directory.page_size <= 0 {
		return Err(Error::validation("directory.page_size", "must be greater than zero."));
	}
	if cfg.search.max_results == 0 {
		return Err(Error::validation("search.max_results", "must be greater than zero."));
	}
	if cfg.search.business_classification_allow_list.iter().any(|code| code.trim().is_empty()) {
		return Err(Error::validation(
			"search.business_classification_allow_list",
			"must not contain blank codes.",
		));
	}

	for (idx, healthcare_type) in cfg.healthcare_types.iter().enumerate() {
		if healthcare_type.name.trim().is_empty() {
			return Err(Error::validation(format!("healthcare_types[{idx}].name"), "must be non-empty."));
		}
		if healthcare_type.conditions.is_empty() {
			return Err(Error::validation(
				format!("healthcare_types[{idx}].conditions"),
				"must contain at least one condition.",
			));
		}

		for (attribute, values) in &healthcare_type.conditions {
			if values.split(',').all(|value| value.trim().is_empty()) {
				return Err(Error::validation(
					format!("healthcare_types[{idx}].conditions.{attribute}"),
					"must list at least one value.",
				));
			}
		}
	}

	for (table, entries) in [
		("code_tables.administrations", &cfg.code_tables.administrations),
		("code_tables.business_classifications", &cfg.code_tables.business_classifications),
		("code_tables.care_types", &cfg.code_tables.care_types),
	] {
		if entries.iter().any(|entry| entry.code.trim().is_empty()) {
			return Err(Error::validation(table, "must not contain blank codes."));
		}
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	if cfg.directory.bind_dn.as_deref().map(|dn| dn.trim().is_empty()).unwrap_or(false) {
		cfg.directory.bind_dn = None;
	}
	if cfg.directory.bind_password.as_deref().map(|pw| pw.is_empty()).unwrap_or(false) {
		cfg.directory.bind_password = None;
	}
	if cfg.directory.code_table_base_dn.as_deref().map(|dn| dn.trim().is_empty()).unwrap_or(false)
	{
		cfg.directory.code_table_base_dn = None;
	}

	for code in &mut cfg.search.business_classification_allow_list {
		*code = code.trim().to_string();
	}
}
