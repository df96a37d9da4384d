//! List site content

use anyhow::Result;

use crate::content::{BlogPost, Book, Category, Project};
use crate::helpers::format_date;
use crate::views::{
    sort_by_date_desc, sort_by_featured_then_date, sort_by_rating_then_date_added, Listing,
};
use crate::Folio;

/// Lines describing a category, in the order its page shows them
pub fn lines(folio: &Folio, category: Category) -> Result<Vec<String>> {
    let loader = folio.loader();
    let date_format = &folio.config.date_format;

    let date_of = |entry: &dyn Listing| {
        entry
            .date()
            .map(|d| format_date(&d, date_format))
            .unwrap_or_else(|| "----------".to_string())
    };

    let lines = match category {
        Category::Blog => {
            let mut posts: Vec<BlogPost> = loader.list_as(category)?;
            sort_by_date_desc(&mut posts);
            posts
                .iter()
                .map(|p| {
                    let title = title_or_slug(&p.title, &p.slug);
                    format!("{} - {} [{}]", date_of(p), title, p.slug)
                })
                .collect()
        }
        Category::Books => {
            let mut books: Vec<Book> = loader.list_as(category)?;
            sort_by_rating_then_date_added(&mut books);
            books
                .iter()
                .map(|b| {
                    let rating = b
                        .rating
                        .map(|r| format!("{:.1}", r))
                        .unwrap_or_else(|| "-".to_string());
                    let author = b
                        .author
                        .as_deref()
                        .map(|a| format!(" by {}", a))
                        .unwrap_or_default();
                    let title = title_or_slug(&b.title, &b.slug);
                    format!("{} - {}{} [{}]", rating, title, author, b.slug)
                })
                .collect()
        }
        Category::Projects => {
            let mut projects: Vec<Project> = loader.list_as(category)?;
            sort_by_featured_then_date(&mut projects);
            projects
                .iter()
                .map(|p| {
                    let marker = if p.featured { "*" } else { " " };
                    let title = title_or_slug(&p.title, &p.slug);
                    format!("{} {} - {} [{}]", marker, date_of(p), title, p.slug)
                })
                .collect()
        }
    };

    Ok(lines)
}

/// List a category
pub fn run(folio: &Folio, category: Category) -> Result<()> {
    let lines = lines(folio, category)?;
    println!("{} ({}):", category, lines.len());
    for line in lines {
        println!("  {}", line);
    }
    Ok(())
}

fn title_or_slug<'a>(title: &'a Option<String>, slug: &'a str) -> &'a str {
    title.as_deref().unwrap_or(slug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(base: &std::path::Path, category: &str, name: &str, content: &str) {
        let dir = base.join("content").join(category);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_blog_lines_newest_first() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "blog", "old.md", "---\ntitle: Old\ndate: 2020-01-02\n---\n");
        write(dir.path(), "blog", "new.md", "---\ntitle: New\ndate: 2024-03-04\n---\n");
        write(dir.path(), "blog", "undated.md", "");

        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(
            lines(&folio, Category::Blog).unwrap(),
            vec![
                "2024-03-04 - New [new]",
                "2020-01-02 - Old [old]",
                "---------- - undated [undated]",
            ]
        );
    }

    #[test]
    fn test_book_lines() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "books", "a.md", "---\ntitle: A\nauthor: Ann\nrating: 4\n---\n");
        write(dir.path(), "books", "b.md", "---\ntitle: B\nrating: 4.5\n---\n");

        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(
            lines(&folio, Category::Books).unwrap(),
            vec!["4.5 - B [b]", "4.0 - A by Ann [a]"]
        );
    }

    #[test]
    fn test_missing_category_is_an_error() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        assert!(lines(&folio, Category::Projects).is_err());
    }
}
