//! Content loader - reads category directories of markdown files

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{frontmatter, Category, ContentError, ContentRecord, Entry};
use crate::Folio;

const EXTENSIONS: [&str; 2] = ["md", "markdown"];

/// Loads content records from `<content_dir>/<category>/`
///
/// Every call reads the files again; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct ContentLoader {
    content_dir: PathBuf,
}

impl ContentLoader {
    /// Create a loader rooted at the site's content directory
    pub fn new(folio: &Folio) -> Self {
        Self::with_root(&folio.content_dir)
    }

    /// Create a loader over an arbitrary content root
    pub fn with_root<P: AsRef<Path>>(content_dir: P) -> Self {
        Self {
            content_dir: content_dir.as_ref().to_path_buf(),
        }
    }

    /// Directory holding a category's files
    pub fn category_dir(&self, category: Category) -> PathBuf {
        self.content_dir.join(category.dir_name())
    }

    /// Load metadata for every record in a category, without bodies
    ///
    /// Records come back in file-name order. The first file that fails to
    /// parse aborts the whole listing.
    pub fn list(&self, category: Category) -> Result<Vec<ContentRecord>, ContentError> {
        let dir = self.category_dir(category);
        ensure_dir(&dir)?;

        let mut records = Vec::new();
        let mut seen = HashSet::new();

        let walker = WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(|e| storage_error(&dir, e))?;
            let path = entry.path();
            if !entry.file_type().is_file() || is_hidden(path) {
                continue;
            }
            let Some(slug) = slug_for(path) else {
                continue;
            };

            if !seen.insert(slug.clone()) {
                return Err(ContentError::malformed(
                    path,
                    format!("duplicate slug '{}' in {}", slug, category),
                ));
            }

            let (record, _) = read_record(path, slug)?;
            records.push(record);
        }

        tracing::debug!("Listed {} {} records", records.len(), category);
        Ok(records)
    }

    /// Load one record with its body
    pub fn get(&self, category: Category, slug: &str) -> Result<ContentRecord, ContentError> {
        let dir = self.category_dir(category);
        ensure_dir(&dir)?;

        let not_found = || ContentError::NotFound {
            category,
            slug: slug.to_string(),
        };

        if !is_valid_slug(slug) {
            return Err(not_found());
        }

        let path = EXTENSIONS
            .iter()
            .map(|ext| dir.join(format!("{}.{}", slug, ext)))
            .find(|p| p.is_file())
            .ok_or_else(not_found)?;

        let (record, body) = read_record(&path, slug.to_string())?;
        Ok(record.with_body(body))
    }

    /// Load a whole category as typed entries
    pub fn list_entries(&self, category: Category) -> Result<Vec<Entry>, ContentError> {
        self.list(category)?
            .into_iter()
            .map(|record| Entry::from_record(category, record))
            .collect()
    }

    /// Load one typed entry with its body
    pub fn get_entry(&self, category: Category, slug: &str) -> Result<Entry, ContentError> {
        Entry::from_record(category, self.get(category, slug)?)
    }

    /// Load a category straight into one entry type
    pub fn list_as<T>(&self, category: Category) -> Result<Vec<T>, ContentError>
    where
        T: TryFrom<ContentRecord, Error = ContentError>,
    {
        self.list(category)?.into_iter().map(T::try_from).collect()
    }

    /// Load one record straight into an entry type
    pub fn get_as<T>(&self, category: Category, slug: &str) -> Result<T, ContentError>
    where
        T: TryFrom<ContentRecord, Error = ContentError>,
    {
        T::try_from(self.get(category, slug)?)
    }
}

/// Read and split a single file; returns the metadata-only record and the body
fn read_record(path: &Path, slug: String) -> Result<(ContentRecord, String), ContentError> {
    tracing::debug!("Reading {:?}", path);
    let content = fs::read_to_string(path).map_err(|e| ContentError::from_read(path, e))?;
    let (metadata, body) =
        frontmatter::parse(&content).map_err(|reason| ContentError::malformed(path, reason))?;
    let body = body.to_string();
    Ok((ContentRecord::new(slug, metadata).with_source(path), body))
}

fn ensure_dir(dir: &Path) -> Result<(), ContentError> {
    let metadata = fs::metadata(dir).map_err(|source| ContentError::StorageUnavailable {
        path: dir.to_path_buf(),
        source,
    })?;
    if metadata.is_dir() {
        Ok(())
    } else {
        Err(ContentError::StorageUnavailable {
            path: dir.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::Other, "not a directory"),
        })
    }
}

fn storage_error(dir: &Path, err: walkdir::Error) -> ContentError {
    let path = err.path().unwrap_or(dir).to_path_buf();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, "filesystem loop"));
    ContentError::StorageUnavailable { path, source }
}

/// Slug of a content file: its name without the markdown extension
fn slug_for(path: &Path) -> Option<String> {
    let ext = path.extension().and_then(|e| e.to_str())?;
    if !EXTENSIONS.contains(&ext) {
        return None;
    }
    let stem = path.file_stem().and_then(|s| s.to_str())?;
    (!stem.is_empty()).then(|| stem.to_string())
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.'))
        .unwrap_or(false)
}

/// Slugs name files directly inside the category directory
fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('.')
        && !slug.contains(['/', '\\'])
        && !slug.contains("..")
}
