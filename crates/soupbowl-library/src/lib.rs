//! SoupBowl — static content library.
//!
//! Readings and tasks are markdown files with a YAML front matter block.
//! They are loaded once at startup and served read-only.

pub mod error;
mod markdown;
pub mod readings;
pub mod tasks;

pub use error::LibraryError;
pub use readings::{Reading, ReadingLibrary};
pub use tasks::{Task, TaskLibrary};
