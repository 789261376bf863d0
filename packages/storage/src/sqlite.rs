// ABOUTME: SQLite catalog storage
// ABOUTME: Every changeset is applied inside a single transaction

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use folio_core::{LabelKind, Project};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::{migrate::MigrateDatabase, Row};
use std::collections::BTreeSet;
use tracing::{debug, info};

use super::{
    CatalogSnapshot, CatalogStorage, Changeset, StorageConfig, StorageError, StorageInfo,
    StorageProvider, StorageResult,
};

/// SQLite implementation of CatalogStorage
pub struct SqliteStorage {
    pool: SqlitePool,
    location: String,
}

impl SqliteStorage {
    /// Create a new SqliteStorage instance
    pub async fn new(config: StorageConfig) -> StorageResult<Self> {
        let database_path = match &config.provider {
            StorageProvider::Sqlite { path } => path,
            _ => return Err(StorageError::InvalidFormat),
        };

        let in_memory = database_path.as_os_str() == ":memory:";

        if !in_memory {
            if let Some(parent) = database_path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(StorageError::Io)?;
                }
            }
        }

        let database_url = format!("sqlite:{}", database_path.display());

        if !sqlx::Sqlite::database_exists(&database_url)
            .await
            .map_err(StorageError::Sqlx)?
        {
            debug!("Creating database at: {}", database_url);
            sqlx::Sqlite::create_database(&database_url)
                .await
                .map_err(StorageError::Sqlx)?;
        }

        // Each connection to :memory: is its own database
        let max_connections = if in_memory { 1 } else { config.max_connections };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(std::time::Duration::from_secs(config.busy_timeout_seconds))
            .connect(&database_url)
            .await
            .map_err(StorageError::Sqlx)?;

        if config.enable_wal && !in_memory {
            sqlx::query("PRAGMA journal_mode = WAL")
                .execute(&pool)
                .await
                .map_err(StorageError::Sqlx)?;
        }

        sqlx::query("PRAGMA foreign_keys = ON")
            .execute(&pool)
            .await
            .map_err(StorageError::Sqlx)?;

        sqlx::query("PRAGMA synchronous = NORMAL")
            .execute(&pool)
            .await
            .map_err(StorageError::Sqlx)?;

        Ok(Self {
            pool,
            location: database_path.display().to_string(),
        })
    }

    fn row_to_project(row: &SqliteRow) -> StorageResult<Project> {
        let embed_json: String = row.try_get("embed")?;
        let categories_json: String = row.try_get("categories")?;
        let tags_json: String = row.try_get("tags")?;
        let featured: i64 = row.try_get("featured")?;

        let created_at_str: String = row.try_get("created_at")?;
        let updated_at_str: String = row.try_get("updated_at")?;

        let created_at = DateTime::parse_from_rfc3339(&created_at_str)
            .map_err(|_| StorageError::Database("Invalid created_at timestamp".to_string()))?
            .with_timezone(&Utc);

        let updated_at = DateTime::parse_from_rfc3339(&updated_at_str)
            .map_err(|_| StorageError::Database("Invalid updated_at timestamp".to_string()))?
            .with_timezone(&Utc);

        Ok(Project {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            image: row.try_get("image")?,
            demo_url: row.try_get("demo_url")?,
            repo_url: row.try_get("repo_url")?,
            embed: serde_json::from_str(&embed_json)?,
            featured: featured != 0,
            categories: serde_json::from_str(&categories_json)?,
            tags: serde_json::from_str(&tags_json)?,
            created_at,
            updated_at,
        })
    }

    fn kind_to_string(kind: LabelKind) -> &'static str {
        match kind {
            LabelKind::Category => "category",
            LabelKind::Tag => "tag",
        }
    }

    async fn load_labels(&self, kind: LabelKind) -> StorageResult<BTreeSet<String>> {
        let rows = sqlx::query("SELECT name FROM labels WHERE kind = ?")
            .bind(Self::kind_to_string(kind))
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|row| row.try_get::<String, _>("name").map_err(StorageError::from))
            .collect()
    }

    async fn count(&self, sql: &str) -> StorageResult<usize> {
        let count: i64 = sqlx::query_scalar(sql).fetch_one(&self.pool).await?;
        Ok(count as usize)
    }
}

#[async_trait]
impl CatalogStorage for SqliteStorage {
    async fn initialize(&self) -> StorageResult<()> {
        info!("Initializing SQLite storage with migrations");

        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(StorageError::Migration)?;

        info!("SQLite storage initialized successfully");
        Ok(())
    }

    async fn load(&self) -> StorageResult<CatalogSnapshot> {
        let rows = sqlx::query("SELECT * FROM projects ORDER BY rowid")
            .fetch_all(&self.pool)
            .await?;

        let projects = rows
            .iter()
            .map(Self::row_to_project)
            .collect::<StorageResult<Vec<_>>>()?;

        Ok(CatalogSnapshot {
            projects,
            categories: self.load_labels(LabelKind::Category).await?,
            tags: self.load_labels(LabelKind::Tag).await?,
        })
    }

    async fn commit(&self, changes: Changeset) -> StorageResult<()> {
        let mut tx = self.pool.begin().await?;

        for id in &changes.removed_projects {
            sqlx::query("DELETE FROM projects WHERE id = ?")
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        for project in &changes.upserted_projects {
            sqlx::query(
                r#"
                INSERT INTO projects (
                    id, title, description, image, demo_url, repo_url,
                    embed, featured, categories, tags, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT(id) DO UPDATE SET
                    title = excluded.title,
                    description = excluded.description,
                    image = excluded.image,
                    demo_url = excluded.demo_url,
                    repo_url = excluded.repo_url,
                    embed = excluded.embed,
                    featured = excluded.featured,
                    categories = excluded.categories,
                    tags = excluded.tags,
                    updated_at = excluded.updated_at
                "#,
            )
            .bind(&project.id)
            .bind(&project.title)
            .bind(&project.description)
            .bind(&project.image)
            .bind(&project.demo_url)
            .bind(&project.repo_url)
            .bind(serde_json::to_string(&project.embed)?)
            .bind(project.featured as i64)
            .bind(serde_json::to_string(&project.categories)?)
            .bind(serde_json::to_string(&project.tags)?)
            .bind(project.created_at.to_rfc3339())
            .bind(project.updated_at.to_rfc3339())
            .execute(&mut *tx)
            .await?;
        }

        for kind in [LabelKind::Category, LabelKind::Tag] {
            let Some(labels) = changes.labels(kind) else {
                continue;
            };

            sqlx::query("DELETE FROM labels WHERE kind = ?")
                .bind(Self::kind_to_string(kind))
                .execute(&mut *tx)
                .await?;

            for name in labels {
                sqlx::query("INSERT INTO labels (kind, name) VALUES (?, ?)")
                    .bind(Self::kind_to_string(kind))
                    .bind(name)
                    .execute(&mut *tx)
                    .await?;
            }
        }

        tx.commit().await?;
        debug!(
            "Committed {} upserts and {} removals",
            changes.upserted_projects.len(),
            changes.removed_projects.len()
        );
        Ok(())
    }

    async fn get_storage_info(&self) -> StorageResult<StorageInfo> {
        Ok(StorageInfo {
            provider: "sqlite".to_string(),
            location: Some(self.location.clone()),
            total_projects: self.count("SELECT COUNT(*) FROM projects").await?,
            total_categories: self
                .count("SELECT COUNT(*) FROM labels WHERE kind = 'category'")
                .await?,
            total_tags: self
                .count("SELECT COUNT(*) FROM labels WHERE kind = 'tag'")
                .await?,
        })
    }
}
