use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pantry::app::AppContext;
use pantry::cli::{commands, Cli, Commands, FavoriteAction};
use pantry::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let ctx = AppContext::new(&config)?;

    match cli.command {
        Commands::List => {
            commands::list_recipes(&ctx).await?;
        }
        Commands::Search { query } => {
            commands::search_recipes(&ctx, &query).await?;
        }
        Commands::Show { id } => {
            commands::show_recipe(&ctx, id).await?;
        }
        Commands::Favorites => {
            commands::list_favorites(&ctx).await?;
        }
        Commands::Favorite { action } => match action {
            FavoriteAction::Add { ids } => {
                commands::add_favorites(&ctx, &ids).await?;
            }
            FavoriteAction::Remove { ids } => {
                commands::remove_favorites(&ctx, &ids).await?;
            }
        },
    }

    Ok(())
}
