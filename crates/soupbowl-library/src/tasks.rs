//! Coding tasks offered to visitors.
//!
//! A task file's body is split at its first ```` ```js ```` or
//! ```` ```javascript ```` fence: prose before the fence is the description,
//! the fenced code is the starter code.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LibraryError;
use crate::markdown::{self, MarkdownDocument};

const FENCES: [&str; 2] = ["```js", "```javascript"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub starter_code: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TaskFrontMatter {
    title: String,
}

impl Task {
    fn from_document(document: MarkdownDocument) -> Result<Self, LibraryError> {
        let front: TaskFrontMatter = document.front_matter()?;
        let (description, starter_code) = split_starter_code(&document.body);
        Ok(Self {
            id: document.id,
            title: front.title,
            description,
            starter_code,
        })
    }
}

/// Splits a task body into description and starter code. A body with no
/// JavaScript fence is all description.
fn split_starter_code(body: &str) -> (String, String) {
    let Some(fence_start) = FENCES.iter().find_map(|fence| body.find(fence)) else {
        return (body.trim().to_owned(), String::new());
    };

    let description = body[..fence_start].trim().to_owned();
    let after_fence = &body[fence_start..];
    let starter_code = after_fence
        .find('\n')
        .map(|newline| &after_fence[newline + 1..])
        .and_then(|code| code.find("```").map(|end| code[..end].trim().to_owned()))
        .unwrap_or_default();
    (description, starter_code)
}

/// Immutable, file-name ordered set of tasks.
#[derive(Debug, Clone, Default)]
pub struct TaskLibrary {
    tasks: Vec<Task>,
}

impl TaskLibrary {
    /// Loads every `*.md` file directly under `dir`.
    ///
    /// # Errors
    ///
    /// Returns `LibraryError` if a file cannot be read or its front matter
    /// is malformed.
    pub fn load(dir: &Path) -> Result<Self, LibraryError> {
        let tasks = markdown::load_dir(dir)?
            .into_iter()
            .map(Task::from_document)
            .collect::<Result<Vec<_>, _>>()?;
        tracing::info!(count = tasks.len(), path = %dir.display(), "loaded tasks");
        Ok(Self { tasks })
    }

    #[must_use]
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    #[must_use]
    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }
}
