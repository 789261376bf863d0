// ABOUTME: Configuration names shared across Folio packages
// ABOUTME: Keeps every environment variable name in one place

pub mod constants;
