use std::collections::HashSet;

use futures::future::join_all;

use crate::app::{AppContext, Result};
use crate::domain::{Recipe, RecipeId};

/// What happened to one id in `favorite add` / `favorite remove`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoriteOutcome {
    Added(String),
    AlreadyFavorite(String),
    NotSaved(String),
    NotFound,
    LookupFailed(String),
    Removed,
    NotFavorite,
    NotRemoved,
}

pub async fn list_recipes(ctx: &AppContext) -> Result<()> {
    let recipes = ctx.session.start().await?;
    print_listing(ctx, &recipes);
    Ok(())
}

pub async fn search_recipes(ctx: &AppContext, query: &str) -> Result<()> {
    ctx.session.get_favorites().await;
    let recipes = ctx.session.search_recipes(query).await?;

    if recipes.is_empty() {
        println!("No recipes match \"{}\"", query);
        return Ok(());
    }

    print_listing(ctx, &recipes);
    Ok(())
}

pub async fn show_recipe(ctx: &AppContext, id: RecipeId) -> Result<()> {
    ctx.session.get_favorites().await;
    let Some(recipe) = ctx.session.get_recipe_by_id(id).await? else {
        println!("Recipe not found: {}", id);
        return Ok(());
    };

    let marker = if ctx.session.is_favorite(recipe.id) {
        " *"
    } else {
        ""
    };
    println!("{}{}", recipe.name, marker);
    if !recipe.display_description().is_empty() {
        println!("{}", recipe.display_description());
    }
    println!(
        "Difficulty: {} | Prep: {} min",
        recipe.difficulty, recipe.prep_time_minutes
    );
    println!("Image: {}", recipe.image);

    println!();
    println!("Ingredients:");
    for ingredient in &recipe.ingredients {
        println!("  - {}", ingredient);
    }

    println!();
    println!("Instructions:");
    for (i, step) in recipe.instructions.steps().iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }

    Ok(())
}

pub async fn list_favorites(ctx: &AppContext) -> Result<()> {
    let favorites = ctx.session.get_favorites().await;

    if favorites.is_empty() {
        println!("No favorites yet");
        return Ok(());
    }

    println!("{} favorite recipes", favorites.len());
    for recipe in &favorites {
        println!("{}", format_recipe_line(recipe, false));
    }
    Ok(())
}

pub async fn add_favorites(ctx: &AppContext, ids: &[RecipeId]) -> Result<()> {
    for (id, outcome) in save_favorites(ctx, ids).await {
        match outcome {
            FavoriteOutcome::Added(name) => println!("Added favorite: {}", name),
            FavoriteOutcome::AlreadyFavorite(name) => println!("Already a favorite: {}", name),
            FavoriteOutcome::NotSaved(name) => println!("Could not save favorite: {}", name),
            FavoriteOutcome::NotFound => println!("Recipe not found: {}", id),
            FavoriteOutcome::LookupFailed(e) => println!("Could not look up {}: {}", id, e),
            _ => {}
        }
    }
    Ok(())
}

pub async fn remove_favorites(ctx: &AppContext, ids: &[RecipeId]) -> Result<()> {
    for (id, outcome) in drop_favorites(ctx, ids).await {
        match outcome {
            FavoriteOutcome::Removed => println!("Removed favorite: {}", id),
            FavoriteOutcome::NotFavorite => println!("Not a favorite: {}", id),
            FavoriteOutcome::NotRemoved => println!("Could not remove favorite: {}", id),
            _ => {}
        }
    }
    Ok(())
}

/// Looks every distinct id up concurrently, then saves the ones found
/// concurrently. A failed lookup is reported for that id only.
pub async fn save_favorites(
    ctx: &AppContext,
    ids: &[RecipeId],
) -> Vec<(RecipeId, FavoriteOutcome)> {
    ctx.session.get_favorites().await;
    let ids = distinct(ids);

    let lookups = join_all(
        ids.iter()
            .map(|&id| async move { (id, ctx.session.get_recipe_by_id(id).await) }),
    )
    .await;

    let mut outcomes = Vec::with_capacity(lookups.len());
    let mut pending = Vec::new();
    for (id, lookup) in lookups {
        let outcome = match lookup {
            Ok(Some(recipe)) if ctx.session.is_favorite(recipe.id) => {
                FavoriteOutcome::AlreadyFavorite(recipe.name)
            }
            Ok(Some(recipe)) => {
                pending.push(recipe);
                continue;
            }
            Ok(None) => FavoriteOutcome::NotFound,
            Err(e) => {
                tracing::warn!("Lookup of recipe {} failed: {}", id, e);
                FavoriteOutcome::LookupFailed(e.to_string())
            }
        };
        outcomes.push((id, outcome));
    }

    let saved: Vec<(RecipeId, String)> = pending.iter().map(|r| (r.id, r.name.clone())).collect();
    join_all(pending.into_iter().map(|recipe| ctx.session.save_favorite(recipe))).await;

    for (id, name) in saved {
        let outcome = if ctx.session.is_favorite(id) {
            FavoriteOutcome::Added(name)
        } else {
            FavoriteOutcome::NotSaved(name)
        };
        outcomes.push((id, outcome));
    }

    outcomes.sort_by_key(|(id, _)| ids.iter().position(|i| i == id));
    outcomes
}

pub async fn drop_favorites(
    ctx: &AppContext,
    ids: &[RecipeId],
) -> Vec<(RecipeId, FavoriteOutcome)> {
    ctx.session.get_favorites().await;

    let mut outcomes = Vec::new();
    for id in distinct(ids) {
        if !ctx.session.is_favorite(id) {
            outcomes.push((id, FavoriteOutcome::NotFavorite));
            continue;
        }
        ctx.session.remove_favorite(id).await;
        let outcome = if ctx.session.is_favorite(id) {
            FavoriteOutcome::NotRemoved
        } else {
            FavoriteOutcome::Removed
        };
        outcomes.push((id, outcome));
    }
    outcomes
}

fn distinct(ids: &[RecipeId]) -> Vec<RecipeId> {
    let mut seen = HashSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

fn print_listing(ctx: &AppContext, recipes: &[Recipe]) {
    println!("{} recipes", recipes.len());
    for recipe in recipes {
        println!(
            "{}",
            format_recipe_line(recipe, ctx.session.is_favorite(recipe.id))
        );
    }
}

fn format_recipe_line(recipe: &Recipe, favorite: bool) -> String {
    let marker = if favorite { '*' } else { ' ' };
    format!(
        "{} {:>4}  {}  [{}, {} min]",
        marker, recipe.id, recipe.name, recipe.difficulty, recipe.prep_time_minutes
    )
}
