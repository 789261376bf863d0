// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names used across Folio

// Port Configuration
pub const PORT: &str = "PORT";

// CORS Configuration
pub const CORS_ORIGIN: &str = "CORS_ORIGIN";

// Storage Configuration
pub const FOLIO_STORAGE: &str = "FOLIO_STORAGE";
pub const FOLIO_DATA_DIR: &str = "FOLIO_DATA_DIR";

// Showcase Configuration
pub const FOLIO_PAGE_SIZE: &str = "FOLIO_PAGE_SIZE";

// Logging
pub const RUST_LOG: &str = "RUST_LOG";

// System Environment Variables
pub const HOME: &str = "HOME";
