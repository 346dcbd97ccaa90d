//! Aggregate roots for the Entry Authoring context.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use soupbowl_core::aggregate::AggregateRoot;
use soupbowl_core::clock::Clock;
use soupbowl_core::error::DomainError;
use uuid::Uuid;

/// Authoring status state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryStatus {
    DraftExample,
    DraftExplanation,
    DraftArticle,
    Published,
}

impl EntryStatus {
    /// Every status, in authoring order.
    pub const ALL: [EntryStatus; 4] = [
        EntryStatus::DraftExample,
        EntryStatus::DraftExplanation,
        EntryStatus::DraftArticle,
        EntryStatus::Published,
    ];

    /// Explicit position in the authoring order.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            EntryStatus::DraftExample => 0,
            EntryStatus::DraftExplanation => 1,
            EntryStatus::DraftArticle => 2,
            EntryStatus::Published => 3,
        }
    }

    /// The status one step forward. `Published` maps to itself.
    #[must_use]
    pub const fn successor(self) -> EntryStatus {
        match self {
            EntryStatus::DraftExample => EntryStatus::DraftExplanation,
            EntryStatus::DraftExplanation => EntryStatus::DraftArticle,
            EntryStatus::DraftArticle | EntryStatus::Published => EntryStatus::Published,
        }
    }

    /// Whether this status comes strictly before `other`.
    #[must_use]
    pub const fn precedes(self, other: EntryStatus) -> bool {
        self.rank() < other.rank()
    }

    /// The persisted and wire name of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            EntryStatus::DraftExample => "DRAFT_EXAMPLE",
            EntryStatus::DraftExplanation => "DRAFT_EXPLANATION",
            EntryStatus::DraftArticle => "DRAFT_ARTICLE",
            EntryStatus::Published => "PUBLISHED",
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntryStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::Validation(format!("unknown entry status: {s}")))
    }
}

/// `None` and whitespace-only text both count as not filled in.
fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

fn blank_names(fields: &[(&'static str, &Option<String>)]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|(_, value)| is_blank(value.as_deref()))
        .map(|(name, _)| *name)
        .collect()
}

/// Content written during the example phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExampleFields {
    /// What the example demonstrates.
    pub description: Option<String>,
    /// Code handed to the reader.
    pub starter_code: Option<String>,
    /// Tests run against the reader's code.
    pub tests_code: Option<String>,
    /// Simulation that exposes the hidden failure.
    pub simulation_code: Option<String>,
}

impl ExampleFields {
    fn blank_fields(&self) -> Vec<&'static str> {
        blank_names(&[
            ("description", &self.description),
            ("starter code", &self.starter_code),
            ("tests code", &self.tests_code),
            ("simulation code", &self.simulation_code),
        ])
    }
}

/// Content written during the explanation phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExplanationFields {
    /// The assumption the example relies on.
    pub assumption: Option<String>,
    /// The invariant that is broken.
    pub invariant: Option<String>,
    /// What the machine actually does.
    pub machine_behavior: Option<String>,
}

impl ExplanationFields {
    fn blank_fields(&self) -> Vec<&'static str> {
        blank_names(&[
            ("assumption", &self.assumption),
            ("invariant", &self.invariant),
            ("machine behavior", &self.machine_behavior),
        ])
    }
}

/// Creation, modification and publication instants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryTimestamps {
    /// When the entry was created.
    pub created_at: DateTime<Utc>,
    /// Bumped on every field or status change.
    pub updated_at: DateTime<Utc>,
    /// Set while the entry is published.
    pub published_at: Option<DateTime<Utc>>,
}

/// Longest title or slug the store accepts, in characters.
pub const MAX_HEADING_CHARS: usize = 255;

/// The aggregate root for a soup entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    id: Uuid,
    slug: String,
    title: String,
    description: Option<String>,
    status: EntryStatus,
    example: ExampleFields,
    explanation: ExplanationFields,
    article_content: Option<String>,
    timestamps: EntryTimestamps,
}

impl Entry {
    /// Creates a new entry at `DraftExample`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the title or slug is blank or
    /// longer than [`MAX_HEADING_CHARS`].
    pub fn create(
        id: Uuid,
        title: String,
        slug: String,
        description: Option<String>,
        clock: &dyn Clock,
    ) -> Result<Self, DomainError> {
        if title.trim().is_empty() || slug.trim().is_empty() {
            return Err(DomainError::Validation(
                "title and slug are required".to_owned(),
            ));
        }
        let too_long = |value: &str| value.chars().count() > MAX_HEADING_CHARS;
        if too_long(&title) || too_long(&slug) {
            return Err(DomainError::Validation(format!(
                "title and slug must be at most {MAX_HEADING_CHARS} characters"
            )));
        }
        let now = clock.now();
        Ok(Self {
            id,
            slug,
            title,
            description,
            status: EntryStatus::DraftExample,
            example: ExampleFields::default(),
            explanation: ExplanationFields::default(),
            article_content: None,
            timestamps: EntryTimestamps {
                created_at: now,
                updated_at: now,
                published_at: None,
            },
        })
    }

    /// Rebuilds an entry from persisted state without re-running any gate.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn restore(
        id: Uuid,
        slug: String,
        title: String,
        description: Option<String>,
        status: EntryStatus,
        example: ExampleFields,
        explanation: ExplanationFields,
        article_content: Option<String>,
        timestamps: EntryTimestamps,
    ) -> Self {
        Self {
            id,
            slug,
            title,
            description,
            status,
            example,
            explanation,
            article_content,
            timestamps,
        }
    }

    /// Entry identifier.
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Unique, externally visible key.
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Catalog summary.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Current authoring status.
    #[must_use]
    pub fn status(&self) -> EntryStatus {
        self.status
    }

    /// Example phase content.
    #[must_use]
    pub fn example(&self) -> &ExampleFields {
        &self.example
    }

    /// Explanation phase content.
    #[must_use]
    pub fn explanation(&self) -> &ExplanationFields {
        &self.explanation
    }

    /// Article text, if any.
    #[must_use]
    pub fn article_content(&self) -> Option<&str> {
        self.article_content.as_deref()
    }

    /// Creation, modification and publication instants.
    #[must_use]
    pub fn timestamps(&self) -> &EntryTimestamps {
        &self.timestamps
    }

    /// Whether the article has any non-blank text.
    #[must_use]
    pub fn has_article(&self) -> bool {
        !is_blank(self.article_content.as_deref())
    }

    /// Whether the entry is visible in the public catalog.
    #[must_use]
    pub fn is_published(&self) -> bool {
        self.status == EntryStatus::Published
    }

    /// Replaces the example fields. Always allowed.
    pub fn update_example(&mut self, fields: ExampleFields, clock: &dyn Clock) {
        self.example = fields;
        self.touch(clock);
    }

    /// Replaces the explanation fields.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::PhaseTooEarly` while still at `DraftExample`.
    pub fn update_explanation(
        &mut self,
        fields: ExplanationFields,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        self.require_reached(EntryStatus::DraftExplanation)?;
        self.explanation = fields;
        self.touch(clock);
        Ok(())
    }

    /// Replaces the article text.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::PhaseTooEarly` before `DraftArticle`.
    pub fn update_article(
        &mut self,
        article_content: Option<String>,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        self.require_reached(EntryStatus::DraftArticle)?;
        self.article_content = article_content;
        self.touch(clock);
        Ok(())
    }

    /// Moves to the next drafting status once the current phase's fields
    /// are complete. Returns the new status.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IncompleteFields` naming the blank fields, or
    /// `DomainError::InvalidTransition` from `DraftArticle` and `Published`
    /// (publication goes through [`Entry::publish`]).
    pub fn advance(&mut self, clock: &dyn Clock) -> Result<EntryStatus, DomainError> {
        let (phase, missing) = match self.status {
            EntryStatus::DraftExample => ("example", self.example.blank_fields()),
            EntryStatus::DraftExplanation => ("explanation", self.explanation.blank_fields()),
            EntryStatus::DraftArticle | EntryStatus::Published => {
                return Err(DomainError::InvalidTransition(self.status.to_string()));
            }
        };
        if !missing.is_empty() {
            return Err(DomainError::IncompleteFields {
                phase,
                fields: missing,
            });
        }

        self.status = self.status.successor();
        self.touch(clock);
        Ok(self.status)
    }

    /// Publishes an entry whose drafting is finished. The article may be
    /// empty.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::WrongStatus` unless at `DraftArticle`, or
    /// `DomainError::IncompleteFields` if the example description or the
    /// explanation assumption is blank.
    pub fn publish(&mut self, clock: &dyn Clock) -> Result<(), DomainError> {
        self.require_status(EntryStatus::DraftArticle)?;
        let missing = blank_names(&[
            ("example description", &self.example.description),
            ("explanation assumption", &self.explanation.assumption),
        ]);
        if !missing.is_empty() {
            return Err(DomainError::IncompleteFields {
                phase: "publish",
                fields: missing,
            });
        }

        let now = clock.now();
        self.status = EntryStatus::Published;
        self.timestamps.published_at = Some(now);
        self.timestamps.updated_at = now;
        Ok(())
    }

    /// Takes a published entry back to `DraftArticle`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::WrongStatus` unless published.
    pub fn unpublish(&mut self, clock: &dyn Clock) -> Result<(), DomainError> {
        self.require_status(EntryStatus::Published)?;
        self.status = EntryStatus::DraftArticle;
        self.timestamps.published_at = None;
        self.touch(clock);
        Ok(())
    }

    /// Checks that the entry may be removed from the store.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::PublishedEntry` while published.
    pub fn ensure_deletable(&self) -> Result<(), DomainError> {
        if self.is_published() {
            return Err(DomainError::PublishedEntry(self.id));
        }
        Ok(())
    }

    fn require_reached(&self, required: EntryStatus) -> Result<(), DomainError> {
        if self.status.precedes(required) {
            return Err(DomainError::PhaseTooEarly {
                required: required.to_string(),
                actual: self.status.to_string(),
            });
        }
        Ok(())
    }

    fn require_status(&self, expected: EntryStatus) -> Result<(), DomainError> {
        if self.status != expected {
            return Err(DomainError::WrongStatus {
                expected: expected.to_string(),
                actual: self.status.to_string(),
            });
        }
        Ok(())
    }

    fn touch(&mut self, clock: &dyn Clock) {
        self.timestamps.updated_at = clock.now();
    }
}

impl AggregateRoot for Entry {
    fn aggregate_id(&self) -> Uuid {
        self.id
    }

    fn natural_key(&self) -> Option<&str> {
        Some(&self.slug)
    }
}
