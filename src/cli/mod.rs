pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::RecipeId;

#[derive(Parser)]
#[command(name = "pantry")]
#[command(about = "Browse a recipe catalog and keep favorites", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/pantry/config.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every recipe in the catalog
    List,
    /// Search the catalog
    Search {
        /// Text to search for, sent to the catalog as given
        query: String,
    },
    /// Show a recipe in full
    Show {
        /// Catalog id of the recipe
        id: RecipeId,
    },
    /// List saved favorites
    Favorites,
    /// Add or remove favorites
    Favorite {
        #[command(subcommand)]
        action: FavoriteAction,
    },
}

#[derive(Subcommand)]
pub enum FavoriteAction {
    /// Fetch recipes from the catalog and save them as favorites
    Add {
        #[arg(required = true)]
        ids: Vec<RecipeId>,
    },
    /// Remove favorites
    Remove {
        #[arg(required = true)]
        ids: Vec<RecipeId>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_favorite_add_many() {
        let cli = Cli::parse_from(["pantry", "favorite", "add", "1", "2", "3"]);
        match cli.command {
            Commands::Favorite {
                action: FavoriteAction::Add { ids },
            } => assert_eq!(ids, vec![1, 2, 3]),
            _ => panic!("expected favorite add"),
        }
    }

    #[test]
    fn test_parse_global_config() {
        let cli = Cli::parse_from(["pantry", "search", "curry", "--config", "/tmp/p.toml"]);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/p.toml")));
        assert!(matches!(cli.command, Commands::Search { query } if query == "curry"));
    }

    #[test]
    fn test_favorite_add_requires_ids() {
        assert!(Cli::try_parse_from(["pantry", "favorite", "add"]).is_err());
    }

    #[test]
    fn test_show_rejects_non_numeric_id() {
        assert!(Cli::try_parse_from(["pantry", "show", "pizza"]).is_err());
    }
}
