use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = cineseek_api::Args::parse();

	cineseek_api::run(args).await
}
