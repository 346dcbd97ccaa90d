//! Background readings unlocked once a visitor reaches the fork.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LibraryError;
use crate::markdown::{self, MarkdownDocument};

/// A reading: front matter metadata plus raw markdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub markdown_content: String,
    pub category: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ReadingFrontMatter {
    title: String,
    summary: String,
    category: String,
}

impl Reading {
    fn from_document(document: MarkdownDocument) -> Result<Self, LibraryError> {
        let front: ReadingFrontMatter = document.front_matter()?;
        Ok(Self {
            id: document.id,
            title: front.title,
            summary: front.summary,
            markdown_content: document.body,
            category: front.category,
        })
    }
}

/// Immutable, file-name ordered set of readings.
#[derive(Debug, Clone, Default)]
pub struct ReadingLibrary {
    readings: Vec<Reading>,
}

impl ReadingLibrary {
    /// Loads every `*.md` file directly under `dir`.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError` if a file cannot be read or its front matter
    /// is malformed.
    pub fn load(dir: &Path) -> Result<Self, LibraryError> {
        let readings = markdown::load_dir(dir)?
            .into_iter()
            .map(Reading::from_document)
            .collect::<Result<Vec<_>, _>>()?;
        tracing::info!(count = readings.len(), path = %dir.display(), "loaded readings");
        Ok(Self { readings })
    }

    #[must_use]
    pub fn from_readings(readings: Vec<Reading>) -> Self {
        Self { readings }
    }

    #[must_use]
    pub fn all(&self) -> &[Reading] {
        &self.readings
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Reading> {
        self.readings.iter().find(|reading| reading.id == id)
    }
}
