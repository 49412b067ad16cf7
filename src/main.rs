mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use mangaproxy::{chapter, config::Config, observability, upstream::HttpClient};

type AnyError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), AnyError> {
    observability::init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Server(args) => mangaproxy::api::run(args.address).await?,
        Commands::Extract(args) => extract(&args.url).await?,
    }

    Ok(())
}

async fn extract(url: &str) -> Result<(), AnyError> {
    let config = Config::load()?;
    let fetcher = HttpClient::new()?;

    let outcome = chapter::fetch_chapter(&fetcher, &config, url).await?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    Ok(())
}
