pub mod table;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cineseek_domain::{MovieResultExtended, ProjectedResult, RankPolicy};
use cineseek_service::{CineSeekService, SearchRequest};

#[derive(Debug, Parser)]
#[command(
	version = cineseek_cli::VERSION,
	rename_all = "kebab",
	styles = cineseek_cli::styles(),
)]
pub struct Args {
	/// TOML config; built-in defaults apply when omitted.
	#[arg(long, short = 'c', value_name = "FILE", global = true)]
	pub config: Option<PathBuf>,
	#[command(subcommand)]
	pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
	/// Resolve a noisy title or release name and print matching films.
	Search(SearchArgs),
}

#[derive(Debug, clap::Args)]
pub struct SearchArgs {
	/// Free text or a release file name.
	pub query: String,
	#[arg(long, value_name = "N")]
	pub limit: Option<u32>,
	/// `soft` reorders by year distance; `hard` also drops distant years.
	#[arg(long, value_name = "POLICY")]
	pub rank_policy: Option<RankPolicy>,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = cineseek_config::load_or_default(args.config.as_deref())?;

	init_tracing(&config)?;

	let service = CineSeekService::new(config)?;

	match args.command {
		Command::Search(search) => {
			let output = search_table(&service, search).await?;

			println!("{output}");
		},
	}

	Ok(())
}

/// Runs an extended search and renders it for the terminal.
pub async fn search_table(
	service: &CineSeekService,
	args: SearchArgs,
) -> color_eyre::Result<String> {
	let req = SearchRequest {
		query: args.query,
		extended: true,
		limit: args.limit,
		rank_policy: args.rank_policy,
	};
	let response = service.search(req).await?;
	let rows = response
		.results
		.into_iter()
		.filter_map(|result| match result {
			ProjectedResult::Extended(movie) => Some(movie),
			ProjectedResult::Compact(_) => None,
		})
		.collect::<Vec<MovieResultExtended>>();

	Ok(table::render(&response.query, &rows))
}

// Logs go to stderr so the table stays clean on stdout.
fn init_tracing(config: &cineseek_config::Config) -> color_eyre::Result<()> {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

	Ok(())
}
