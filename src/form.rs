use crate::models::{join_ingredients, split_ingredients, Recipe, RecipePayload};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Title,
    Description,
    Ingredients,
    Instructions,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Title,
        FormField::Description,
        FormField::Ingredients,
        FormField::Instructions,
    ];

    pub fn next(self) -> Self {
        match self {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::Ingredients,
            FormField::Ingredients => FormField::Instructions,
            FormField::Instructions => FormField::Title,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            FormField::Title => FormField::Instructions,
            FormField::Description => FormField::Title,
            FormField::Ingredients => FormField::Description,
            FormField::Instructions => FormField::Ingredients,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Description => "Description",
            FormField::Ingredients => "Ingredients (comma separated, e.g. Flour, Sugar, Eggs)",
            FormField::Instructions => "Instructions",
        }
    }

    pub fn is_multiline(self) -> bool {
        matches!(self, FormField::Description | FormField::Instructions)
    }
}

/// Draft values of the create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeForm {
    pub title: String,
    pub description: String,
    /// Authored as a comma separated string, split on submit.
    pub ingredients: String,
    pub instructions: String,
    pub focused: FormField,
    pub error: Option<String>,
}

impl RecipeForm {
    pub fn from_recipe(recipe: &Recipe) -> Self {
        Self {
            title: recipe.title.clone(),
            description: recipe.description.clone().unwrap_or_default(),
            ingredients: join_ingredients(&recipe.ingredients),
            instructions: recipe.instructions.clone().unwrap_or_default(),
            focused: FormField::Title,
            error: None,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Description => &self.description,
            FormField::Ingredients => &self.ingredients,
            FormField::Instructions => &self.instructions,
        }
    }

    fn focused_value_mut(&mut self) -> &mut String {
        match self.focused {
            FormField::Title => &mut self.title,
            FormField::Description => &mut self.description,
            FormField::Ingredients => &mut self.ingredients,
            FormField::Instructions => &mut self.instructions,
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.focused_value_mut().push(c);
    }

    pub fn backspace(&mut self) {
        self.focused_value_mut().pop();
    }

    /// Newline in multi-line fields, otherwise move to the next field.
    pub fn newline(&mut self) {
        if self.focused.is_multiline() {
            self.focused_value_mut().push('\n');
        } else {
            self.focused = self.focused.next();
        }
    }

    pub fn focus_next(&mut self) {
        self.focused = self.focused.next();
    }

    pub fn focus_previous(&mut self) {
        self.focused = self.focused.previous();
    }

    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }

    pub fn to_payload(&self) -> RecipePayload {
        RecipePayload {
            title: Some(self.title.clone()),
            description: non_blank(&self.description),
            ingredients: Some(split_ingredients(&self.ingredients)),
            instructions: non_blank(&self.instructions),
        }
    }
}

fn non_blank(text: &str) -> Option<String> {
    (!text.trim().is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe() -> Recipe {
        Recipe {
            id: 3,
            title: "Pancakes".to_string(),
            description: None,
            ingredients: vec!["Flour".to_string(), "Milk".to_string(), "Eggs".to_string()],
            instructions: Some("Mix\nFry".to_string()),
        }
    }

    #[test]
    fn edit_form_joins_ingredients() {
        let form = RecipeForm::from_recipe(&recipe());
        assert_eq!(form.ingredients, "Flour, Milk, Eggs");
        assert_eq!(form.description, "");
        assert_eq!(form.instructions, "Mix\nFry");
    }

    #[test]
    fn payload_splits_ingredients() {
        let form = RecipeForm {
            title: "Pasta".to_string(),
            ingredients: " Flour ,, Eggs ".to_string(),
            ..Default::default()
        };
        let payload = form.to_payload();
        assert_eq!(payload.title.as_deref(), Some("Pasta"));
        assert_eq!(payload.ingredients, Some(vec!["Flour".to_string(), "Eggs".to_string()]));
        assert_eq!(payload.description, None);
        assert_eq!(payload.instructions, None);
    }

    #[test]
    fn typing_goes_to_focused_field() {
        let mut form = RecipeForm::default();
        for c in "Soup".chars() {
            form.push_char(c);
        }
        form.newline();
        assert_eq!(form.focused, FormField::Description);
        form.push_char('a');
        form.newline();
        form.push_char('b');
        form.backspace();
        form.backspace();

        assert_eq!(form.title, "Soup");
        assert_eq!(form.description, "a");
        assert!(form.has_title());
    }

    #[test]
    fn focus_cycles_through_all_fields() {
        let mut form = RecipeForm::default();
        for expected in FormField::ALL.iter().cycle().skip(1).take(4) {
            form.focus_next();
            assert_eq!(form.focused, *expected);
        }
        form.focus_previous();
        assert_eq!(form.focused, FormField::Instructions);
    }

    #[test]
    fn clear_resets_draft_and_error() {
        let mut form = RecipeForm::from_recipe(&recipe());
        form.error = Some("boom".to_string());
        form.clear();
        assert_eq!(form, RecipeForm::default());
    }
}
