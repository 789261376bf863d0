use std::env;
use std::path::PathBuf;

/// File holding the projects collection (JSON array)
pub const PROJECTS_FILE: &str = "projects.json";

/// File holding the category collection (JSON array of names)
pub const CATEGORIES_FILE: &str = "categories.json";

/// File holding the tag collection (JSON array of names)
pub const TAGS_FILE: &str = "tags.json";

/// SQLite database file name
pub const DATABASE_FILE: &str = "folio.db";

/// Get the path to the Folio directory (~/.folio)
pub fn folio_dir() -> PathBuf {
    // First try HOME environment variable (useful for tests)
    if let Ok(home) = env::var(folio_config::constants::HOME) {
        PathBuf::from(home).join(".folio")
    } else {
        dirs::home_dir()
            .unwrap_or_else(env::temp_dir)
            .join(".folio")
    }
}

/// Get the path to the SQLite database (~/.folio/folio.db)
pub fn database_file() -> PathBuf {
    folio_dir().join(DATABASE_FILE)
}
