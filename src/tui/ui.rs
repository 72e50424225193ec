use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, ListStatus, Mode};
use crate::form::{FormField, RecipeForm};
use crate::models::Recipe;

pub const EMPTY_LIST: &str = "No recipes yet. Add one!";
pub const NO_INGREDIENTS: &str = "No ingredients specified.";

pub fn draw(frame: &mut Frame, app: &App) {
    // Main horizontal split: 1/3 left, 2/3 right
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3), // Left pane: recipe list
            Constraint::Ratio(2, 3), // Right pane: recipe card
        ])
        .split(frame.area());

    let left_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(0),    // Recipe list
            Constraint::Length(1), // Status line
        ])
        .split(main_chunks[0]);

    let right_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Card
            Constraint::Length(1), // Notice / card error
        ])
        .split(main_chunks[1]);

    render_header(frame, app, left_chunks[0]);
    render_recipe_list(frame, app, left_chunks[1]);
    render_left_status(frame, left_chunks[2]);

    render_card(frame, app, right_chunks[0]);
    render_right_status(frame, app, right_chunks[1]);

    match app.mode {
        Mode::Create => render_form(frame, &app.create_form, app.busy, " New recipe "),
        Mode::Edit(id) => render_form(
            frame,
            &app.edit_form,
            app.busy,
            &format!(" Edit recipe (ID: {id}) "),
        ),
        Mode::ConfirmDelete(id) => render_confirm_delete(frame, app, id),
        Mode::Browse => {}
    }

    if app.show_help {
        render_help(frame);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(" Recipe Book ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let stats = match &app.last_loaded {
        Some(at) => format!(" {} Recipes | loaded {}", app.recipes.len(), at.format("%H:%M:%S")),
        None => format!(" {} Recipes", app.recipes.len()),
    };
    let paragraph = Paragraph::new(stats).style(Style::default().fg(Color::White));
    frame.render_widget(paragraph, inner);
}

fn render_recipe_list(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL);

    let message = match &app.list_status {
        ListStatus::Loading => Some(("Loading recipes...", Color::Yellow)),
        ListStatus::Failed(error) => Some((error.as_str(), Color::Red)),
        ListStatus::Loaded if app.recipes.is_empty() => Some((EMPTY_LIST, Color::DarkGray)),
        ListStatus::Loaded => None,
    };

    if let Some((text, color)) = message {
        let paragraph = Paragraph::new(text)
            .block(block)
            .style(Style::default().fg(color))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = app
        .recipes
        .iter()
        .map(|recipe| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("#{} ", recipe.id), Style::default().fg(Color::Blue)),
                Span::styled(recipe.title.as_str(), Style::default().fg(Color::White)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.selected_index));

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_left_status(frame: &mut Frame, area: Rect) {
    let status = "j/k:nav  n:new  e:edit  d:delete  r:reload  ?:help  q:quit";
    let paragraph = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

/// One line per line of source text, like paragraphs in the card.
fn text_lines(text: Option<&str>) -> Vec<Line<'_>> {
    text.map(|t| t.lines().map(Line::from).collect())
        .unwrap_or_default()
}

pub fn card_lines(recipe: &Recipe) -> Vec<Line<'_>> {
    let heading = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![Line::from(Span::styled("Description:", heading))];
    lines.extend(text_lines(recipe.description.as_deref()));
    lines.push(Line::default());

    lines.push(Line::from(Span::styled("Ingredients:", heading)));
    if recipe.ingredients.is_empty() {
        lines.push(Line::from(NO_INGREDIENTS));
    } else {
        lines.extend(
            recipe
                .ingredients
                .iter()
                .map(|item| Line::from(format!("  • {item}"))),
        );
    }
    lines.push(Line::default());

    lines.push(Line::from(Span::styled("Instructions:", heading)));
    lines.extend(text_lines(recipe.instructions.as_deref()));
    lines
}

fn render_card(frame: &mut Frame, app: &App, area: Rect) {
    let Some(recipe) = app.selected_recipe() else {
        let block = Block::default()
            .title(" Recipe ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green));
        let paragraph = Paragraph::new("No recipe selected").block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    let block = Block::default()
        .title(format!(" {} (ID: {}) ", recipe.title, recipe.id))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let paragraph = Paragraph::new(card_lines(recipe))
        .block(block)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn render_right_status(frame: &mut Frame, app: &App, area: Rect) {
    let (text, color) = match (app.busy, &app.card_error, &app.notice) {
        (Some(busy), _, _) => (busy, Color::Yellow),
        (None, Some(error), _) => (error.as_str(), Color::Red),
        (None, None, Some(notice)) => (notice.as_str(), Color::Green),
        (None, None, None) => ("", Color::DarkGray),
    };

    let paragraph = Paragraph::new(text).style(Style::default().fg(color));
    frame.render_widget(paragraph, area);
}

fn render_form(frame: &mut Frame, form: &RecipeForm, busy: Option<&str>, title: &str) {
    let area = centered_rect(70, 80, frame.area());

    let block = Block::default()
        .title(title.to_string())
        .title_bottom(" Tab:next field  Ctrl+S:save  Esc:cancel ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),      // Title
            Constraint::Percentage(30), // Description
            Constraint::Length(3),      // Ingredients
            Constraint::Min(3),         // Instructions
            Constraint::Length(1),      // Error
        ])
        .split(inner);

    for (field, chunk) in FormField::ALL.into_iter().zip(chunks.iter()) {
        let focused = form.focused == field;
        let border = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let value = if focused {
            format!("{}_", form.value(field))
        } else {
            form.value(field).to_string()
        };

        let paragraph = Paragraph::new(value)
            .block(
                Block::default()
                    .title(format!(" {} ", field.label()))
                    .borders(Borders::ALL)
                    .border_style(border),
            )
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, *chunk);
    }

    let footer = match (busy, &form.error) {
        (Some(busy), _) => Some((busy, Color::Yellow)),
        (None, Some(error)) => Some((error.as_str(), Color::Red)),
        (None, None) => None,
    };
    if let Some((text, color)) = footer {
        let paragraph = Paragraph::new(text).style(Style::default().fg(color));
        frame.render_widget(paragraph, chunks[4]);
    }
}

fn render_confirm_delete(frame: &mut Frame, app: &App, id: i64) {
    let area = centered_rect(50, 20, frame.area());

    let title = app
        .recipes
        .iter()
        .find(|r| r.id == id)
        .map(|r| r.title.as_str())
        .unwrap_or("this recipe");

    let block = Block::default()
        .title(" Delete recipe ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let paragraph = Paragraph::new(format!(
        "Really delete the recipe \"{title}\"?\n\n y: delete   n/Esc: cancel"
    ))
    .block(block)
    .wrap(Wrap { trim: true });

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

fn render_help(frame: &mut Frame) {
    let area = centered_rect(50, 60, frame.area());

    let help_text = [
        "",
        " Navigation:",
        "   j / ↓    Move down",
        "   k / ↑    Move up",
        "   < / >    First / last recipe",
        "",
        " Actions:",
        "   n        New recipe",
        "   e        Edit recipe",
        "   d        Delete recipe",
        "   r        Reload list",
        "",
        " Form:",
        "   Tab      Next field",
        "   Ctrl+S   Save",
        "   Esc      Cancel",
        "",
        " General:",
        "   ?        Toggle this help",
        "   q        Quit",
        "",
        " Press any key to close",
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let paragraph = Paragraph::new(help_text.join("\n"))
        .block(block)
        .style(Style::default().fg(Color::White));

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(lines: &[Line]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn card_lists_ingredients_and_splits_paragraphs() {
        let recipe = Recipe {
            id: 1,
            title: "Pasta".to_string(),
            description: Some("Fresh\nHomemade".to_string()),
            ingredients: vec!["Flour".to_string(), "Eggs".to_string()],
            instructions: Some("Knead".to_string()),
        };

        let lines = plain(&card_lines(&recipe));
        assert_eq!(
            lines,
            vec![
                "Description:",
                "Fresh",
                "Homemade",
                "",
                "Ingredients:",
                "  • Flour",
                "  • Eggs",
                "",
                "Instructions:",
                "Knead",
            ]
        );
    }

    #[test]
    fn card_without_ingredients_says_so() {
        let recipe = Recipe {
            id: 2,
            title: "Water".to_string(),
            description: None,
            ingredients: Vec::new(),
            instructions: None,
        };

        let lines = plain(&card_lines(&recipe));
        assert!(lines.contains(&NO_INGREDIENTS.to_string()));
    }
}
