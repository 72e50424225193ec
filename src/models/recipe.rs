use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    pub instructions: Option<String>,
}

/// Request body for creating or replacing a recipe.
///
/// `title` stays optional here so a missing title reaches validation
/// instead of failing deserialization. Absent or `null` ingredients mean
/// an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipePayload {
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// A payload that passed validation and can be written to storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipe {
    pub title: String,
    pub description: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: Option<String>,
}

impl RecipePayload {
    pub fn validate(self) -> std::result::Result<NewRecipe, &'static str> {
        let title = match self.title {
            Some(title) if !title.trim().is_empty() => title,
            _ => return Err("Recipe title is required."),
        };

        Ok(NewRecipe {
            title,
            description: self.description,
            ingredients: self.ingredients.unwrap_or_default(),
            instructions: self.instructions,
        })
    }
}

/// Split a comma separated ingredient list, trimming entries and dropping
/// empty ones.
pub fn split_ingredients(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

pub fn join_ingredients(ingredients: &[String]) -> String {
    ingredients.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_trims_and_drops_empty_entries() {
        assert_eq!(split_ingredients(" Flour ,, Eggs "), vec!["Flour", "Eggs"]);
        assert_eq!(split_ingredients("Flour, Eggs"), vec!["Flour", "Eggs"]);
        assert!(split_ingredients("  , ,").is_empty());
        assert!(split_ingredients("").is_empty());
    }

    #[test]
    fn join_then_split_keeps_entries() {
        let ingredients = vec!["Flour".to_string(), "Sugar".to_string(), "Eggs".to_string()];
        let joined = join_ingredients(&ingredients);
        assert_eq!(joined, "Flour, Sugar, Eggs");
        assert_eq!(split_ingredients(&joined), ingredients);
    }

    #[test]
    fn payload_without_title_is_rejected() {
        let payload: RecipePayload =
            serde_json::from_str(r#"{"description": "no title"}"#).unwrap();
        assert!(payload.validate().is_err());

        let blank = RecipePayload {
            title: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(blank.validate().is_err());
    }

    #[test]
    fn payload_defaults_missing_ingredients_to_empty() {
        let payload: RecipePayload = serde_json::from_str(r#"{"title": "Toast"}"#).unwrap();
        let recipe = payload.validate().unwrap();
        assert_eq!(recipe.title, "Toast");
        assert!(recipe.ingredients.is_empty());
        assert_eq!(recipe.description, None);
    }

    #[test]
    fn null_ingredients_are_empty() {
        let payload: RecipePayload =
            serde_json::from_str(r#"{"title": "Toast", "ingredients": null}"#).unwrap();
        assert_eq!(payload.validate().unwrap().ingredients, Vec::<String>::new());
    }
}
