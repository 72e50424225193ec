mod handler;
mod ui;

pub use handler::{handle_key_event, AppAction};
pub use ui::{card_lines, draw, EMPTY_LIST, NO_INGREDIENTS};
