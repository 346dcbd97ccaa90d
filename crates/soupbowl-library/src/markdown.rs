//! Markdown files with an optional `---` delimited YAML front matter block.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::LibraryError;

/// One `*.md` file, split into front matter and body.
#[derive(Debug, Clone)]
pub(crate) struct MarkdownDocument {
    /// File stem, used as the public identifier.
    pub id: String,
    pub path: PathBuf,
    front_matter: Option<String>,
    /// Everything after the front matter, trimmed.
    pub body: String,
}

impl MarkdownDocument {
    pub(crate) fn parse(id: String, path: PathBuf, content: &str) -> Self {
        let (front_matter, body) = split_front_matter(content);
        Self {
            id,
            path,
            front_matter,
            body,
        }
    }

    /// Deserializes the front matter. A missing or empty block yields the
    /// default value.
    pub(crate) fn front_matter<T: DeserializeOwned + Default>(&self) -> Result<T, LibraryError> {
        match self.front_matter.as_deref() {
            Some(raw) if !raw.trim().is_empty() => {
                serde_yaml::from_str(raw).map_err(|source| LibraryError::FrontMatter {
                    path: self.path.clone(),
                    source,
                })
            }
            _ => Ok(T::default()),
        }
    }
}

/// Splits `content` at its leading `---` block. Content that does not open
/// with a closed block is all body.
pub(crate) fn split_front_matter(content: &str) -> (Option<String>, String) {
    let mut lines = content.lines();
    if lines.next().map(str::trim_end) != Some("---") {
        return (None, content.trim().to_owned());
    }

    let mut front = Vec::new();
    let mut closed = false;
    for line in lines.by_ref() {
        if line.trim_end() == "---" {
            closed = true;
            break;
        }
        front.push(line);
    }
    if !closed {
        return (None, content.trim().to_owned());
    }

    let body = lines.collect::<Vec<_>>().join("\n");
    (Some(front.join("\n")), body.trim().to_owned())
}

/// Reads every `*.md` file directly under `dir`, sorted by file name.
///
/// A missing directory is logged and treated as empty.
///
/// # Errors
///
/// Returns `LibraryError::Io` if the directory exists but a listing or file
/// read fails.
pub(crate) fn load_dir(dir: &Path) -> Result<Vec<MarkdownDocument>, LibraryError> {
    if !dir.is_dir() {
        warn!(path = %dir.display(), "content directory not found, library is empty");
        return Ok(Vec::new());
    }

    let mut paths = Vec::new();
    for dir_entry in fs::read_dir(dir).map_err(io_error(dir))? {
        let path = dir_entry.map_err(io_error(dir))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "md") {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let mut documents = Vec::with_capacity(paths.len());
    for path in paths {
        let content = fs::read_to_string(&path).map_err(io_error(&path))?;
        let id = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        debug!(id = %id, path = %path.display(), "loaded markdown document");
        documents.push(MarkdownDocument::parse(id, path, &content));
    }
    Ok(documents)
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> LibraryError {
    let path = path.to_path_buf();
    move |source| LibraryError::Io { path, source }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_front_matter_separates_block_and_trims_body() {
        let (front, body) = split_front_matter("---\ntitle: Hi\n---\n\n# Body\n\n");

        assert_eq!(front.as_deref(), Some("title: Hi"));
        assert_eq!(body, "# Body");
    }

    #[test]
    fn test_split_front_matter_without_block_is_all_body() {
        let (front, body) = split_front_matter("# Just markdown\n");

        assert_eq!(front, None);
        assert_eq!(body, "# Just markdown");
    }

    #[test]
    fn test_split_front_matter_unclosed_block_is_all_body() {
        let (front, body) = split_front_matter("---\ntitle: Hi\n");

        assert_eq!(front, None);
        assert_eq!(body, "---\ntitle: Hi");
    }

    #[test]
    fn test_split_front_matter_handles_crlf() {
        let (front, body) = split_front_matter("---\r\ntitle: Hi\r\n---\r\nbody\r\n");

        assert_eq!(front.as_deref(), Some("title: Hi"));
        assert_eq!(body, "body");
    }

    #[test]
    fn test_load_dir_missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();

        let documents = load_dir(&dir.path().join("absent")).unwrap();

        assert!(documents.is_empty());
    }

    #[test]
    fn test_load_dir_sorts_by_file_name_and_skips_other_files() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("02-second.md"), "two").unwrap();
        fs::write(dir.path().join("01-first.md"), "one").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        // Act
        let documents = load_dir(dir.path()).unwrap();

        // Assert
        let ids: Vec<&str> = documents.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["01-first", "02-second"]);
        assert_eq!(documents[0].body, "one");
    }
}
