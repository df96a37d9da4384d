//! Content module - loads blog posts, books and projects from markdown files

mod entry;
mod error;
pub mod frontmatter;
pub mod loader;
mod markdown;
mod record;

pub use entry::{BlogPost, Book, Entry, Project};
pub use error::ContentError;
pub use loader::ContentLoader;
pub use markdown::MarkdownRenderer;
pub use record::{Category, ContentRecord, Metadata};
