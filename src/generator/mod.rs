//! Generator module - writes page data for every page as JSON

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::content::BlogPost;
use crate::pages::{post_path, PageBuilder, PageState};
use crate::Folio;

/// Summary of one generation run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    /// Files written, relative to the public directory
    pub written: Vec<PathBuf>,
    /// Pages that ended up in an error state
    pub failed_pages: usize,
}

/// Page data generator
pub struct Generator {
    folio: Folio,
    pages: PageBuilder,
}

impl Generator {
    /// Create a new generator
    pub fn new(folio: &Folio) -> Self {
        Self {
            folio: folio.clone(),
            pages: PageBuilder::new(folio),
        }
    }

    /// Generate the entire site
    pub fn generate(&self) -> Result<GenerateReport> {
        fs::create_dir_all(&self.folio.public_dir).with_context(|| {
            format!("Failed to create public dir {:?}", self.folio.public_dir)
        })?;

        let mut report = GenerateReport::default();

        let home = self.pages.home();
        self.write_page(Path::new("index.json"), &home, &mut report)?;

        let blog = self.pages.blog_index();
        self.write_state(Path::new("blog/index.json"), &blog, &mut report)?;
        if let Some(index) = blog.data() {
            self.generate_post_pages(&index.posts, &mut report)?;
        }

        let books = self.pages.books();
        self.write_state(Path::new("books/index.json"), &books, &mut report)?;

        let projects = self.pages.projects();
        self.write_state(Path::new("projects/index.json"), &projects, &mut report)?;

        tracing::info!(
            "Generated {} files ({} pages in error state)",
            report.written.len(),
            report.failed_pages
        );
        Ok(report)
    }

    /// Generate individual post pages
    fn generate_post_pages(&self, posts: &[BlogPost], report: &mut GenerateReport) -> Result<()> {
        for post in posts {
            let page = self.pages.blog_post(&post.slug);
            let output = PathBuf::from(post_path(&post.slug)).join("index.json");
            self.write_state(&output, &page, report)?;
        }
        Ok(())
    }

    fn write_state<T: Serialize>(
        &self,
        relative: &Path,
        state: &PageState<T>,
        report: &mut GenerateReport,
    ) -> Result<()> {
        if matches!(state, PageState::Error { .. }) {
            report.failed_pages += 1;
        }
        self.write_page(relative, state, report)
    }

    fn write_page<T: Serialize>(
        &self,
        relative: &Path,
        data: &T,
        report: &mut GenerateReport,
    ) -> Result<()> {
        let output_path = self.folio.public_dir.join(relative);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| anyhow::anyhow!("Failed to create dir {:?}: {}", parent, e))?;
        }

        let json = serde_json::to_string_pretty(data)?;
        fs::write(&output_path, json)
            .map_err(|e| anyhow::anyhow!("Failed to write {:?}: {}", output_path, e))?;
        tracing::debug!("Generated: {:?}", output_path);

        report.written.push(relative.to_path_buf());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(base: &Path, category: &str, name: &str, content: &str) {
        let dir = base.join("content").join(category);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_generate_writes_every_page() {
        let dir = TempDir::new().unwrap();
        let base = dir.path();
        write(base, "blog", "hello.md", "---\ntitle: Hello\ndate: 2024-01-01\n---\nHi there");
        write(base, "books", "sicp.md", "---\ntitle: SICP\nrating: 5\n---\n");
        write(base, "projects", "site.md", "---\ntitle: Site\nfeatured: true\n---\n");

        let folio = Folio::new(base).unwrap();
        let report = Generator::new(&folio).generate().unwrap();

        assert_eq!(report.failed_pages, 0);
        for file in [
            "index.json",
            "blog/index.json",
            "blog/hello/index.json",
            "books/index.json",
            "projects/index.json",
        ] {
            assert!(folio.public_dir.join(file).is_file(), "missing {}", file);
        }

        let post: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(folio.public_dir.join("blog/hello/index.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(post["state"], "ready");
        assert_eq!(post["data"]["post"]["title"], "Hello");
        assert_eq!(post["data"]["reading_time"], 1);
    }

    #[test]
    fn test_generate_writes_error_states() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        let report = Generator::new(&folio).generate().unwrap();

        // blog, books and projects directories are all missing
        assert_eq!(report.failed_pages, 3);
        let books: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(folio.public_dir.join("books/index.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(books["state"], "error");
    }
}
