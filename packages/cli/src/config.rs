// ABOUTME: Server configuration read from the environment
// ABOUTME: Port, CORS origin, storage backend selection, and showcase page size

use folio_config::constants;
use folio_projects::pagination::MAX_PAGE_SIZE;
use folio_projects::{StorageConfig, StorageProvider, DEFAULT_PAGE_SIZE};
use std::env;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid port number: {0}")]
    InvalidPort(#[from] ParseIntError),
    #[error("Port {0} is out of valid range (1-65535)")]
    PortOutOfRange(u16),
    #[error("Invalid storage backend: {0} (expected memory, json, or sqlite)")]
    InvalidStorage(String),
    #[error("Invalid page size: {0} (expected 1-{max})", max = MAX_PAGE_SIZE)]
    InvalidPageSize(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Json,
    Sqlite,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(StorageBackend::Memory),
            "json" => Ok(StorageBackend::Json),
            "sqlite" => Ok(StorageBackend::Sqlite),
            _ => Err(ConfigError::InvalidStorage(s.to_string())),
        }
    }
}

impl StorageBackend {
    /// Storage configuration rooted at `data_dir`
    pub fn to_storage_config(self, data_dir: &Path) -> StorageConfig {
        let provider = match self {
            StorageBackend::Memory => StorageProvider::Memory,
            StorageBackend::Json => StorageProvider::JsonFiles {
                dir: data_dir.to_path_buf(),
            },
            StorageBackend::Sqlite => StorageProvider::Sqlite {
                path: data_dir.join(folio_core::DATABASE_FILE),
            },
        };
        StorageConfig::with_provider(provider)
    }
}

#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub cors_origin: String,
    pub storage: StorageBackend,
    pub data_dir: PathBuf,
    pub page_size: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port_str = env::var(constants::PORT).unwrap_or_else(|_| "4001".to_string());

        let port = port_str.parse::<u16>()?;

        // Validate port is in valid range
        if port == 0 {
            return Err(ConfigError::PortOutOfRange(port));
        }

        let cors_origin = env::var(constants::CORS_ORIGIN)
            .unwrap_or_else(|_| "http://localhost:5173".to_string());

        let storage = env::var(constants::FOLIO_STORAGE)
            .unwrap_or_else(|_| "sqlite".to_string())
            .parse::<StorageBackend>()?;

        let data_dir = env::var(constants::FOLIO_DATA_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| folio_core::folio_dir());

        let page_size = match env::var(constants::FOLIO_PAGE_SIZE) {
            Ok(raw) => parse_page_size(&raw)?,
            Err(_) => DEFAULT_PAGE_SIZE,
        };

        Ok(Config {
            port,
            cors_origin,
            storage,
            data_dir,
            page_size,
        })
    }

    pub fn storage_config(&self) -> StorageConfig {
        self.storage.to_storage_config(&self.data_dir)
    }
}

fn parse_page_size(raw: &str) -> Result<usize, ConfigError> {
    match raw.trim().parse::<usize>() {
        Ok(size) if (1..=MAX_PAGE_SIZE).contains(&size) => Ok(size),
        _ => Err(ConfigError::InvalidPageSize(raw.to_string())),
    }
}
