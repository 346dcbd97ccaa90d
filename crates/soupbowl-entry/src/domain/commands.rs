//! Commands for the Entry Authoring context.

use soupbowl_core::command::Command;
use uuid::Uuid;

use super::aggregates::{ExampleFields, ExplanationFields};

/// Command to create a new soup entry.
#[derive(Debug, Clone)]
pub struct CreateEntry {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Display title.
    pub title: String,
    /// Unique, externally visible key.
    pub slug: String,
    /// Optional catalog summary.
    pub description: Option<String>,
}

impl Command for CreateEntry {
    fn command_type(&self) -> &'static str {
        "entry.create_entry"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to replace an entry's example fields.
#[derive(Debug, Clone)]
pub struct UpdateExample {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The entry identifier.
    pub entry_id: Uuid,
    /// The new example content.
    pub fields: ExampleFields,
}

impl Command for UpdateExample {
    fn command_type(&self) -> &'static str {
        "entry.update_example"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to replace an entry's explanation fields.
#[derive(Debug, Clone)]
pub struct UpdateExplanation {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The entry identifier.
    pub entry_id: Uuid,
    /// The new explanation content.
    pub fields: ExplanationFields,
}

impl Command for UpdateExplanation {
    fn command_type(&self) -> &'static str {
        "entry.update_explanation"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to replace an entry's article text.
#[derive(Debug, Clone)]
pub struct UpdateArticle {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The entry identifier.
    pub entry_id: Uuid,
    /// The new article text.
    pub article_content: Option<String>,
}

impl Command for UpdateArticle {
    fn command_type(&self) -> &'static str {
        "entry.update_article"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to move an entry to its next drafting status.
#[derive(Debug, Clone)]
pub struct AdvanceEntry {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The entry identifier.
    pub entry_id: Uuid,
}

impl Command for AdvanceEntry {
    fn command_type(&self) -> &'static str {
        "entry.advance_entry"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to publish an entry.
#[derive(Debug, Clone)]
pub struct PublishEntry {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The entry identifier.
    pub entry_id: Uuid,
}

impl Command for PublishEntry {
    fn command_type(&self) -> &'static str {
        "entry.publish_entry"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to take an entry out of the public catalog.
#[derive(Debug, Clone)]
pub struct UnpublishEntry {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The entry identifier.
    pub entry_id: Uuid,
}

impl Command for UnpublishEntry {
    fn command_type(&self) -> &'static str {
        "entry.unpublish_entry"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to delete an unpublished entry.
#[derive(Debug, Clone)]
pub struct DeleteEntry {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The entry identifier.
    pub entry_id: Uuid,
}

impl Command for DeleteEntry {
    fn command_type(&self) -> &'static str {
        "entry.delete_entry"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
