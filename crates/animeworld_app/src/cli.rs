use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command line scraper for watchanimeworld.in
#[derive(Debug, Parser)]
#[command(name = "animeworld")]
#[command(about = "Scrape listings, details, episodes and players from the anime site", long_about = None)]
pub struct Cli {
    /// RON configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the site base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Override the log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Landing page sections
    Home,
    /// Details of a series or movie
    Info {
        /// Series or movie slug, e.g. `naruto-shippuden`
        id: String,
    },
    /// Episodes of one season
    Episodes {
        /// Series or movie slug
        id: String,
        /// Season number as shown on the site
        season: String,
    },
    /// Player servers of an episode
    Embed {
        /// Episode slug, e.g. `naruto-shippuden-1x1`
        id: String,
    },
    /// Search by title
    Search {
        /// Search term
        term: String,
        /// Use the full results page instead of live suggestions
        #[arg(long)]
        full: bool,
    },
    /// One page of a category archive
    Category {
        /// Category path, e.g. `type/anime`
        path: String,
        #[arg(short, long, default_value_t = 1)]
        page: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_search_with_global_flags() {
        let cli = Cli::parse_from([
            "animeworld",
            "search",
            "one piece",
            "--full",
            "--base-url",
            "http://localhost:8080",
        ]);
        assert_eq!(cli.base_url.as_deref(), Some("http://localhost:8080"));
        match cli.command {
            Commands::Search { term, full } => {
                assert_eq!(term, "one piece");
                assert!(full);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn category_page_defaults_to_first() {
        let cli = Cli::parse_from(["animeworld", "category", "type/anime"]);
        assert!(matches!(cli.command, Commands::Category { page: 1, .. }));
    }
}
