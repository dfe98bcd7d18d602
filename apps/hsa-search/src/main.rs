use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	hsa_search::run(hsa_search::Args::parse()).await
}
