use clap::{Parser, Subcommand};
use std::net::SocketAddr;

#[derive(Parser, Debug)]
#[command(name = "mangaproxy")]
#[command(about = "Manga chapter scraper and image proxy", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    Server(ServerArgs),
    /// Fetch one chapter and print the extracted result as JSON
    Extract(ExtractArgs),
}

#[derive(clap::Args, Debug)]
pub struct ServerArgs {
    /// Address to bind the HTTP server to (defaults to server.bind_addr)
    #[arg(long)]
    pub address: Option<SocketAddr>,
}

#[derive(clap::Args, Debug)]
pub struct ExtractArgs {
    /// Chapter page URL
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_server_address() {
        let cli = Cli::try_parse_from(["mangaproxy", "server", "--address", "127.0.0.1:4000"]).unwrap();
        match cli.command {
            Commands::Server(args) => {
                assert_eq!(args.address, Some("127.0.0.1:4000".parse().unwrap()))
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_extract() {
        let cli = Cli::try_parse_from(["mangaproxy", "extract", "https://mangatoon.mobi/en/watch/1/2"]).unwrap();
        assert!(matches!(cli.command, Commands::Extract(ExtractArgs { ref url }) if url.ends_with("/2")));
    }
}
