pub const SCHEMA: &str = r#"
-- recipes table
-- ingredients holds a JSON array of strings
CREATE TABLE IF NOT EXISTS recipes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT,
    ingredients TEXT NOT NULL DEFAULT '[]',
    instructions TEXT
);
"#;
