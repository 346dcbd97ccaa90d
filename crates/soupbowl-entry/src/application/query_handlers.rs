//! Query handlers for the Entry Authoring context.
//!
//! Admin queries return the full [`EntryView`]; the public catalog only
//! ever sees published entries, as [`EntrySummary`] or [`EntryView`].

use chrono::{DateTime, Utc};
use serde::Serialize;
use soupbowl_core::error::DomainError;
use soupbowl_core::repository::Repository;
use uuid::Uuid;

use crate::application::command_handlers::load_entry;
use crate::domain::aggregates::{Entry, EntryStatus};

/// Read-only view of every entry field. Content fields carry their
/// authoring phase as a prefix on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryView {
    pub id: Uuid,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub status: EntryStatus,
    pub example_description: Option<String>,
    pub example_starter_code: Option<String>,
    pub example_tests_code: Option<String>,
    pub example_simulation_code: Option<String>,
    pub explanation_assumption: Option<String>,
    pub explanation_invariant: Option<String>,
    pub explanation_machine_behavior: Option<String>,
    pub article_content: Option<String>,
    pub has_article: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

impl From<&Entry> for EntryView {
    fn from(entry: &Entry) -> Self {
        let example = entry.example();
        let explanation = entry.explanation();
        let t = entry.timestamps();
        Self {
            id: entry.id(),
            slug: entry.slug().to_owned(),
            title: entry.title().to_owned(),
            description: entry.description().map(str::to_owned),
            status: entry.status(),
            example_description: example.description.clone(),
            example_starter_code: example.starter_code.clone(),
            example_tests_code: example.tests_code.clone(),
            example_simulation_code: example.simulation_code.clone(),
            explanation_assumption: explanation.assumption.clone(),
            explanation_invariant: explanation.invariant.clone(),
            explanation_machine_behavior: explanation.machine_behavior.clone(),
            article_content: entry.article_content().map(str::to_owned),
            has_article: entry.has_article(),
            created_at: t.created_at,
            updated_at: t.updated_at,
            published_at: t.published_at,
        }
    }
}

/// Catalog listing row for a published entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntrySummary {
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub has_article: bool,
    pub published_at: Option<DateTime<Utc>>,
}

impl From<&Entry> for EntrySummary {
    fn from(entry: &Entry) -> Self {
        Self {
            slug: entry.slug().to_owned(),
            title: entry.title().to_owned(),
            description: entry.description().map(str::to_owned),
            has_article: entry.has_article(),
            published_at: entry.timestamps().published_at,
        }
    }
}

/// Retrieves any entry by its ID.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if no entry has the ID.
pub async fn get_entry_by_id(
    entry_id: Uuid,
    repo: &dyn Repository<Entry>,
) -> Result<EntryView, DomainError> {
    let entry = load_entry(entry_id, repo).await?;
    Ok(EntryView::from(&entry))
}

/// Lists every entry, newest first, regardless of status.
///
/// # Errors
///
/// Returns the repository's error if loading fails.
pub async fn list_entries(repo: &dyn Repository<Entry>) -> Result<Vec<EntryView>, DomainError> {
    let mut entries = repo.find_all().await?;
    sort_newest_first(&mut entries);
    Ok(entries.iter().map(EntryView::from).collect())
}

/// Lists published entries for the public catalog, newest first.
///
/// # Errors
///
/// Returns the repository's error if loading fails.
pub async fn list_published_entries(
    repo: &dyn Repository<Entry>,
) -> Result<Vec<EntrySummary>, DomainError> {
    let mut entries: Vec<Entry> = repo
        .find_all()
        .await?
        .into_iter()
        .filter(Entry::is_published)
        .collect();
    sort_newest_first(&mut entries);
    Ok(entries.iter().map(EntrySummary::from).collect())
}

/// Retrieves a published entry by slug. Unpublished entries are reported as
/// not found.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if the slug is unknown or the entry is
/// not published.
pub async fn get_published_entry_by_slug(
    slug: &str,
    repo: &dyn Repository<Entry>,
) -> Result<EntryView, DomainError> {
    repo.find_by_natural_key(slug)
        .await?
        .filter(Entry::is_published)
        .map(|entry| EntryView::from(&entry))
        .ok_or_else(|| DomainError::NotFound {
            entity: "entry",
            key: slug.to_owned(),
        })
}

fn sort_newest_first(entries: &mut [Entry]) {
    entries.sort_by(|a, b| b.timestamps().created_at.cmp(&a.timestamps().created_at));
}
