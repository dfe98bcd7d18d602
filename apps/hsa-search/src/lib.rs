use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre;

use hsa_cli::print_json;
use hsa_domain::{PersonCriteria, UnitCriteria};
use hsa_service::HsaService;

#[derive(Debug, Parser)]
#[command(
	version = hsa_cli::VERSION,
	rename_all = "kebab",
	styles = hsa_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	#[command(subcommand)]
	pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
	/// Search units and functions. Quote a value to match it exactly.
	Units(UnitArgs),
	/// Show one unit or function.
	Unit { hsa_identity: String },
	/// Show the unit or function stored at a distinguished name.
	UnitByDn { dn: String },
	/// List the units below a unit, ordered by name.
	SubUnits {
		hsa_identity: String,
		#[arg(long, default_value_t = 25)]
		max: usize,
	},
	/// Suggest unit and function names containing the text.
	UnitNames { text: String },
	/// Suggest person titles containing the text.
	Titles { text: String },
	/// Search persons. Quote a value to match it exactly.
	Persons(PersonArgs),
	/// List the identity of every eligible unit and function.
	UnitIds,
	/// List the configured health-care types.
	HealthcareTypes,
}

#[derive(Debug, clap::Args)]
pub struct UnitArgs {
	#[arg(long)]
	pub name: Option<String>,
	#[arg(long)]
	pub hsa_identity: Option<String>,
	/// Municipality, street address or postal address.
	#[arg(long)]
	pub location: Option<String>,
	#[arg(long)]
	pub liable_code: Option<String>,
	#[arg(long)]
	pub administration: Option<String>,
	#[arg(long)]
	pub business_classification: Option<String>,
	#[arg(long)]
	pub care_type: Option<String>,
	#[arg(long)]
	pub municipality_code: Option<String>,
	/// May be repeated.
	#[arg(long = "healthcare-type", value_name = "NAME")]
	pub healthcare_types: Vec<String>,
	#[arg(long, default_value_t = 25)]
	pub max: usize,
}
impl UnitArgs {
	fn criteria(&self) -> UnitCriteria {
		UnitCriteria {
			name: self.name.clone(),
			hsa_identity: self.hsa_identity.clone(),
			location: self.location.clone(),
			liable_code: self.liable_code.clone(),
			administration_name: self.administration.clone(),
			business_classification_name: self.business_classification.clone(),
			care_type_name: self.care_type.clone(),
			municipality_code: self.municipality_code.clone(),
			healthcare_types: self.healthcare_types.clone(),
		}
	}
}

#[derive(Debug, clap::Args)]
pub struct PersonArgs {
	#[arg(long)]
	pub given_name: Option<String>,
	#[arg(long)]
	pub surname: Option<String>,
	#[arg(long)]
	pub hsa_identity: Option<String>,
	#[arg(long)]
	pub title: Option<String>,
	#[arg(long, default_value_t = 25)]
	pub max: usize,
}
impl PersonArgs {
	fn criteria(&self) -> PersonCriteria {
		PersonCriteria {
			given_name: self.given_name.clone(),
			surname: self.surname.clone(),
			hsa_identity: self.hsa_identity.clone(),
			title: self.title.clone(),
		}
	}
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = hsa_config::load(&args.config)?;

	hsa_cli::init_tracing(&config.service.log_level)?;

	let service = HsaService::connect(config).await?;

	tracing::debug!(url = %service.cfg.directory.url, "Directory pool ready.");

	match &args.command {
		Command::Units(unit_args) => {
			let page = service.search_units(&unit_args.criteria(), unit_args.max).await?;
			print_json(&page)
		},
		Command::Unit { hsa_identity } => {
			let unit = service.get_unit(hsa_identity).await?.ok_or_else(|| {
				eyre::eyre!("No eligible unit or function has identity {hsa_identity}.")
			})?;
			print_json(&unit)
		},
		Command::UnitByDn { dn } => {
			let unit = service
				.get_unit_by_dn(dn)
				.await?
				.ok_or_else(|| eyre::eyre!("No eligible unit or function is stored at {dn}."))?;
			print_json(&unit)
		},
		Command::SubUnits { hsa_identity, max } => {
			let parent = service.get_unit(hsa_identity).await?.ok_or_else(|| {
				eyre::eyre!("No eligible unit or function has identity {hsa_identity}.")
			})?;
			print_json(&service.sub_units(&parent, *max).await?)
		},
		Command::UnitNames { text } => print_json(&service.unit_names_matching(text).await?),
		Command::Titles { text } => print_json(&service.titles_matching(text).await?),
		Command::Persons(person_args) => {
			let page = service.search_persons(&person_args.criteria(), person_args.max).await?;
			print_json(&page)
		},
		Command::UnitIds => print_json(&service.unit_identities().await?),
		Command::HealthcareTypes => print_json(&service.healthcare_types()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_unit_search() {
		let args = Args::try_parse_from([
			"hsa-search",
			"-c",
			"hsa.toml",
			"units",
			"--name",
			"\"Vårdcentralen Angered\"",
			"--healthcare-type",
			"Vårdcentral",
			"--healthcare-type",
			"Tandvård",
			"--max",
			"10",
		])
		.expect("arguments must parse");
		let Command::Units(unit_args) = args.command else {
			panic!("Expected the units subcommand.");
		};
		let criteria = unit_args.criteria();

		assert_eq!(criteria.name.as_deref(), Some("\"Vårdcentralen Angered\""));
		assert_eq!(criteria.healthcare_types, ["Vårdcentral", "Tandvård"]);
		assert_eq!(unit_args.max, 10);
	}

	#[test]
	fn parses_lookup_subcommands() {
		let args = Args::try_parse_from(["hsa-search", "-c", "hsa.toml", "unit", "SE1"])
			.expect("arguments must parse");

		assert!(matches!(args.command, Command::Unit { hsa_identity } if hsa_identity == "SE1"));

		let args = Args::try_parse_from(["hsa-search", "--config", "hsa.toml", "unit-ids"])
			.expect("arguments must parse");

		assert!(matches!(args.command, Command::UnitIds));
	}

	#[test]
	fn parses_sub_unit_and_suggestion_subcommands() {
		let args = Args::try_parse_from([
			"hsa-search",
			"-c",
			"hsa.toml",
			"sub-units",
			"SE1",
			"--max",
			"5",
		])
		.expect("arguments must parse");

		assert!(matches!(
			args.command,
			Command::SubUnits { hsa_identity, max: 5 } if hsa_identity == "SE1"
		));

		let args = Args::try_parse_from(["hsa-search", "-c", "hsa.toml", "unit-names", "le"])
			.expect("arguments must parse");

		assert!(matches!(args.command, Command::UnitNames { text } if text == "le"));

		let args = Args::try_parse_from([
			"hsa-search",
			"-c",
			"hsa.toml",
			"units",
			"--municipality-code",
			"1480",
		])
		.expect("arguments must parse");
		let Command::Units(unit_args) = args.command else {
			panic!("Expected the units subcommand.");
		};

		assert_eq!(unit_args.criteria().municipality_code.as_deref(), Some("1480"));
	}

	#[test]
	fn config_is_required() {
		assert!(Args::try_parse_from(["hsa-search", "unit-ids"]).is_err());
	}
}
