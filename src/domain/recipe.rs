use serde::{Deserialize, Serialize};

pub type RecipeId = i64;

/// A catalog entry. Field names on the wire and in storage follow the
/// catalog's camelCase JSON; fields the catalog sends that are not listed
/// here are dropped on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub image: String,
    pub ingredients: Vec<String>,
    pub instructions: Instructions,
    pub prep_time_minutes: u32,
    pub difficulty: String,
}

/// Preparation instructions, kept in whichever shape the catalog sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Instructions {
    Text(String),
    Steps(Vec<String>),
}

impl Instructions {
    /// Steps for display. A text block is a single step.
    pub fn steps(&self) -> Vec<&str> {
        match self {
            Instructions::Text(text) => vec![text.as_str()],
            Instructions::Steps(steps) => steps.iter().map(String::as_str).collect(),
        }
    }
}

impl Recipe {
    pub fn display_description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

/// Envelope returned by the catalog's list and search endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipeListing {
    pub recipes: Vec<Recipe>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG_RECIPE: &str = r#"{
        "id": 1,
        "name": "Classic Margherita Pizza",
        "ingredients": ["Pizza dough", "Tomato sauce", "Fresh mozzarella"],
        "instructions": ["Preheat the oven.", "Roll out the dough.", "Bake."],
        "prepTimeMinutes": 20,
        "cookTimeMinutes": 15,
        "servings": 4,
        "difficulty": "Easy",
        "cuisine": "Italian",
        "tags": ["Pizza", "Italian"],
        "image": "https://cdn.dummyjson.com/recipe-images/1.webp",
        "rating": 4.6
    }"#;

    #[test]
    fn test_deserialize_catalog_recipe_ignores_extra_fields() {
        let recipe: Recipe = serde_json::from_str(CATALOG_RECIPE).unwrap();
        assert_eq!(recipe.id, 1);
        assert_eq!(recipe.name, "Classic Margherita Pizza");
        assert_eq!(recipe.prep_time_minutes, 20);
        assert_eq!(recipe.difficulty, "Easy");
        assert_eq!(recipe.ingredients.len(), 3);
        assert!(recipe.description.is_none());
        assert_eq!(
            recipe.instructions,
            Instructions::Steps(vec![
                "Preheat the oven.".into(),
                "Roll out the dough.".into(),
                "Bake.".into(),
            ])
        );
    }

    #[test]
    fn test_text_instructions_preserved() {
        let json = r#"{
            "id": 7,
            "name": "Toast",
            "description": "Bread, but warmer",
            "image": "https://example.com/toast.png",
            "ingredients": ["Bread"],
            "instructions": "Put the bread in the toaster.",
            "prepTimeMinutes": 2,
            "difficulty": "Easy"
        }"#;
        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(
            recipe.instructions,
            Instructions::Text("Put the bread in the toaster.".into())
        );
        assert_eq!(recipe.display_description(), "Bread, but warmer");

        let value = serde_json::to_value(&recipe).unwrap();
        assert_eq!(value["instructions"], "Put the bread in the toaster.");
        assert_eq!(value["prepTimeMinutes"], 2);
    }

    #[test]
    fn test_missing_description_not_serialized() {
        let recipe: Recipe = serde_json::from_str(CATALOG_RECIPE).unwrap();
        let value = serde_json::to_value(&recipe).unwrap();
        assert!(value.get("description").is_none());
        assert!(value["instructions"].is_array());
    }

    #[test]
    fn test_steps_for_text_block_is_single_step() {
        let instructions = Instructions::Text("Mix everything.".into());
        assert_eq!(instructions.steps(), vec!["Mix everything."]);
    }

    #[test]
    fn test_negative_prep_time_rejected() {
        let json = CATALOG_RECIPE.replace("\"prepTimeMinutes\": 20", "\"prepTimeMinutes\": -5");
        assert!(serde_json::from_str::<Recipe>(&json).is_err());
    }

    #[test]
    fn test_listing_envelope() {
        let json = format!(r#"{{"recipes": [{}], "total": 1, "skip": 0, "limit": 30}}"#, CATALOG_RECIPE);
        let listing: RecipeListing = serde_json::from_str(&json).unwrap();
        assert_eq!(listing.recipes.len(), 1);
        assert_eq!(listing.recipes[0].id, 1);
    }

    #[test]
    fn test_listing_without_recipes_rejected() {
        let result = serde_json::from_str::<RecipeListing>(r#"{"message": "rate limited"}"#);
        assert!(result.is_err());
    }
}
