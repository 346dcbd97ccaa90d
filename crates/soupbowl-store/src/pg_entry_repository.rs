//! `PostgreSQL` implementation of `Repository<Entry>`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::debug;
use uuid::Uuid;

use soupbowl_core::error::DomainError;
use soupbowl_core::repository::Repository;
use soupbowl_entry::domain::aggregates::{
    Entry, EntryStatus, EntryTimestamps, ExampleFields, ExplanationFields,
};

use crate::{infrastructure, parse_column};

const SELECT_ENTRIES: &str = r"
SELECT id, slug, title, description, status,
       example_description, starter_code, tests_code, simulation_code,
       assumption, invariant, machine_behavior, article_content,
       created_at, updated_at, published_at
FROM soup_entries
";

const UPSERT_ENTRY: &str = r"
INSERT INTO soup_entries (
    id, slug, title, description, status,
    example_description, starter_code, tests_code, simulation_code,
    assumption, invariant, machine_behavior, article_content,
    created_at, updated_at, published_at
)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
ON CONFLICT (id) DO UPDATE SET
    slug                = EXCLUDED.slug,
    title               = EXCLUDED.title,
    description         = EXCLUDED.description,
    status              = EXCLUDED.status,
    example_description = EXCLUDED.example_description,
    starter_code        = EXCLUDED.starter_code,
    tests_code          = EXCLUDED.tests_code,
    simulation_code     = EXCLUDED.simulation_code,
    assumption          = EXCLUDED.assumption,
    invariant           = EXCLUDED.invariant,
    machine_behavior    = EXCLUDED.machine_behavior,
    article_content     = EXCLUDED.article_content,
    updated_at          = EXCLUDED.updated_at,
    published_at        = EXCLUDED.published_at
";

#[derive(Debug, FromRow)]
struct EntryRow {
    id: Uuid,
    slug: String,
    title: String,
    description: Option<String>,
    status: String,
    example_description: Option<String>,
    starter_code: Option<String>,
    tests_code: Option<String>,
    simulation_code: Option<String>,
    assumption: Option<String>,
    invariant: Option<String>,
    machine_behavior: Option<String>,
    article_content: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    published_at: Option<DateTime<Utc>>,
}

impl TryFrom<EntryRow> for Entry {
    type Error = DomainError;

    fn try_from(row: EntryRow) -> Result<Self, Self::Error> {
        let status: EntryStatus = parse_column("status", &row.status)?;
        Ok(Entry::restore(
            row.id,
            row.slug,
            row.title,
            row.description,
            status,
            ExampleFields {
                description: row.example_description,
                starter_code: row.starter_code,
                tests_code: row.tests_code,
                simulation_code: row.simulation_code,
            },
            ExplanationFields {
                assumption: row.assumption,
                invariant: row.invariant,
                machine_behavior: row.machine_behavior,
            },
            row.article_content,
            EntryTimestamps {
                created_at: row.created_at,
                updated_at: row.updated_at,
                published_at: row.published_at,
            },
        ))
    }
}

/// PostgreSQL-backed entry repository. Slugs are unique at the schema
/// level as well as in the create handler.
#[derive(Debug, Clone)]
pub struct PgEntryRepository {
    pool: PgPool,
}

impl PgEntryRepository {
    /// Creates a new `PgEntryRepository`.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Entry> for PgEntryRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Entry>, DomainError> {
        let row: Option<EntryRow> = sqlx::query_as(&format!("{SELECT_ENTRIES} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(infrastructure)?;
        row.map(Entry::try_from).transpose()
    }

    async fn find_by_natural_key(&self, key: &str) -> Result<Option<Entry>, DomainError> {
        let row: Option<EntryRow> = sqlx::query_as(&format!("{SELECT_ENTRIES} WHERE slug = $1"))
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(infrastructure)?;
        row.map(Entry::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Entry>, DomainError> {
        let rows: Vec<EntryRow> =
            sqlx::query_as(&format!("{SELECT_ENTRIES} ORDER BY created_at DESC"))
                .fetch_all(&self.pool)
                .await
                .map_err(infrastructure)?;
        rows.into_iter().map(Entry::try_from).collect()
    }

    async fn save(&self, entry: &Entry) -> Result<(), DomainError> {
        let example = entry.example();
        let explanation = entry.explanation();
        let t = entry.timestamps();
        sqlx::query(UPSERT_ENTRY)
            .bind(entry.id())
            .bind(entry.slug())
            .bind(entry.title())
            .bind(entry.description())
            .bind(entry.status().as_str())
            .bind(example.description.as_deref())
            .bind(example.starter_code.as_deref())
            .bind(example.tests_code.as_deref())
            .bind(example.simulation_code.as_deref())
            .bind(explanation.assumption.as_deref())
            .bind(explanation.invariant.as_deref())
            .bind(explanation.machine_behavior.as_deref())
            .bind(entry.article_content())
            .bind(t.created_at)
            .bind(t.updated_at)
            .bind(t.published_at)
            .execute(&self.pool)
            .await
            .map_err(|err| {
                let duplicate = err
                    .as_database_error()
                    .is_some_and(|db| db.is_unique_violation());
                if duplicate {
                    DomainError::DuplicateSlug(entry.slug().to_owned())
                } else {
                    infrastructure(err)
                }
            })?;
        debug!(entry_id = %entry.id(), status = %entry.status(), "saved entry");
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM soup_entries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(infrastructure)?;
        Ok(())
    }
}
