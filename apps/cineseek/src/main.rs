use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = cineseek::Args::parse();

	cineseek::run(args).await
}
