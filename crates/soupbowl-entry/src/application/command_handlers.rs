//! Command handlers for the Entry Authoring context.
//!
//! This module contains application-level command handler functions that
//! orchestrate domain logic: load entry, run one operation, save.

use soupbowl_core::clock::Clock;
use soupbowl_core::error::DomainError;
use soupbowl_core::id::IdGenerator;
use soupbowl_core::repository::Repository;
use uuid::Uuid;

use crate::domain::aggregates::Entry;
use crate::domain::commands::{
    AdvanceEntry, CreateEntry, DeleteEntry, PublishEntry, UnpublishEntry, UpdateArticle,
    UpdateExample, UpdateExplanation,
};

/// Loads an entry or fails with `NotFound`.
///
/// # Errors
///
/// Returns `DomainError::NotFound` if no entry has the ID, or the
/// repository's error if loading fails.
pub(crate) async fn load_entry(
    entry_id: Uuid,
    repo: &dyn Repository<Entry>,
) -> Result<Entry, DomainError> {
    repo.find_by_id(entry_id)
        .await?
        .ok_or_else(|| DomainError::not_found("entry", entry_id))
}

/// Loads an entry, applies `operation`, and saves the result. Nothing is
/// saved when the operation fails.
async fn load_apply_save<F>(
    entry_id: Uuid,
    repo: &dyn Repository<Entry>,
    operation: F,
) -> Result<Entry, DomainError>
where
    F: FnOnce(&mut Entry) -> Result<(), DomainError> + Send,
{
    let mut entry = load_entry(entry_id, repo).await?;
    operation(&mut entry)?;
    repo.save(&entry).await?;
    Ok(entry)
}

/// Handles the `CreateEntry` command: checks slug uniqueness, creates the
/// entry at `DraftExample`, and saves it.
///
/// This is a CREATION command: the handler generates the entry ID.
///
/// # Errors
///
/// Returns `DomainError::DuplicateSlug` if the slug is taken,
/// `DomainError::Validation` for a blank title or slug, or the repository's
/// error.
pub async fn handle_create_entry(
    command: &CreateEntry,
    clock: &dyn Clock,
    ids: &dyn IdGenerator,
    repo: &dyn Repository<Entry>,
) -> Result<Entry, DomainError> {
    if repo.find_by_natural_key(&command.slug).await?.is_some() {
        return Err(DomainError::DuplicateSlug(command.slug.clone()));
    }
    let entry = Entry::create(
        ids.next_id(),
        command.title.clone(),
        command.slug.clone(),
        command.description.clone(),
        clock,
    )?;
    repo.save(&entry).await?;
    Ok(entry)
}

/// Handles the `UpdateExample` command.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown entry, or the repository's
/// error.
pub async fn handle_update_example(
    command: &UpdateExample,
    clock: &dyn Clock,
    repo: &dyn Repository<Entry>,
) -> Result<Entry, DomainError> {
    load_apply_save(command.entry_id, repo, |entry| {
        entry.update_example(command.fields.clone(), clock);
        Ok(())
    })
    .await
}

/// Handles the `UpdateExplanation` command.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown entry,
/// `DomainError::PhaseTooEarly` before `DraftExplanation`, or the
/// repository's error.
pub async fn handle_update_explanation(
    command: &UpdateExplanation,
    clock: &dyn Clock,
    repo: &dyn Repository<Entry>,
) -> Result<Entry, DomainError> {
    load_apply_save(command.entry_id, repo, |entry| {
        entry.update_explanation(command.fields.clone(), clock)
    })
    .await
}

/// Handles the `UpdateArticle` command.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown entry,
/// `DomainError::PhaseTooEarly` before `DraftArticle`, or the repository's
/// error.
pub async fn handle_update_article(
    command: &UpdateArticle,
    clock: &dyn Clock,
    repo: &dyn Repository<Entry>,
) -> Result<Entry, DomainError> {
    load_apply_save(command.entry_id, repo, |entry| {
        entry.update_article(command.article_content.clone(), clock)
    })
    .await
}

/// Handles the `AdvanceEntry` command.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown entry,
/// `DomainError::IncompleteFields` or `DomainError::InvalidTransition` from
/// the workflow, or the repository's error.
pub async fn handle_advance_entry(
    command: &AdvanceEntry,
    clock: &dyn Clock,
    repo: &dyn Repository<Entry>,
) -> Result<Entry, DomainError> {
    load_apply_save(command.entry_id, repo, |entry| {
        entry.advance(clock).map(|_| ())
    })
    .await
}

/// Handles the `PublishEntry` command.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown entry,
/// `DomainError::WrongStatus` or `DomainError::IncompleteFields` from the
/// workflow, or the repository's error.
pub async fn handle_publish_entry(
    command: &PublishEntry,
    clock: &dyn Clock,
    repo: &dyn Repository<Entry>,
) -> Result<Entry, DomainError> {
    load_apply_save(command.entry_id, repo, |entry| entry.publish(clock)).await
}

/// Handles the `UnpublishEntry` command.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown entry,
/// `DomainError::WrongStatus` unless published, or the repository's error.
pub async fn handle_unpublish_entry(
    command: &UnpublishEntry,
    clock: &dyn Clock,
    repo: &dyn Repository<Entry>,
) -> Result<Entry, DomainError> {
    load_apply_save(command.entry_id, repo, |entry| entry.unpublish(clock)).await
}

/// Handles the `DeleteEntry` command: refuses published entries, otherwise
/// removes the entry from the store.
///
/// # Errors
///
/// Returns `DomainError::NotFound` for an unknown entry,
/// `DomainError::PublishedEntry` while published, or the repository's error.
pub async fn handle_delete_entry(
    command: &DeleteEntry,
    repo: &dyn Repository<Entry>,
) -> Result<(), DomainError> {
    let entry = load_entry(command.entry_id, repo).await?;
    entry.ensure_deletable()?;
    repo.delete(entry.id()).await
}
