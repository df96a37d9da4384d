//! End-to-end checks of loading and ordering over a temporary site

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use folio_rs::content::{BlogPost, Category, ContentError, ContentLoader, Project};
use folio_rs::views::{filter_featured, related_by_tag_overlap, sort_by_date_desc};
use tempfile::TempDir;

fn write(root: &Path, category: Category, name: &str, content: &str) {
    let dir = root.join(category.dir_name());
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(name), content).unwrap();
}

fn blog_site() -> (TempDir, ContentLoader) {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, Category::Blog, "new-year.md", "---\ntitle: New Year\ndate: 2024-01-01\ntags: [a, b]\n---\nHappy new year");
    write(root, Category::Blog, "summer-23.md", "---\ntitle: Summer\ndate: 2023-06-01\ntags: [a, b, c]\n---\nSun");
    write(root, Category::Blog, "summer-24.md", "---\ntitle: Summer again\ndate: 2024-06-01\ntags: [a]\n---\n");
    write(root, Category::Blog, "unrelated.md", "---\ntitle: Elsewhere\ndate: 2022-01-01\ntags: [d]\n---\nElse");
    let loader = ContentLoader::with_root(root);
    (dir, loader)
}

#[test]
fn list_returns_one_record_per_file_without_bodies() {
    let (_dir, loader) = blog_site();
    let records = loader.list(Category::Blog).unwrap();

    assert_eq!(records.len(), 4);
    let slugs: HashSet<_> = records.iter().map(|r| r.slug.as_str()).collect();
    assert_eq!(slugs.len(), 4);
    assert!(records.iter().all(|r| !r.slug.is_empty() && r.body.is_none()));
}

#[test]
fn get_returns_requested_slug_with_body() {
    let (_dir, loader) = blog_site();

    let record = loader.get(Category::Blog, "new-year").unwrap();
    assert_eq!(record.slug, "new-year");
    assert_eq!(record.body.as_deref(), Some("Happy new year"));

    let no_content = loader.get(Category::Blog, "summer-24").unwrap();
    assert_eq!(no_content.body.as_deref(), Some(""));
}

#[test]
fn get_absent_slug_is_not_found() {
    let (_dir, loader) = blog_site();
    let err = loader.get(Category::Blog, "missing").unwrap_err();
    assert!(matches!(
        err,
        ContentError::NotFound { category: Category::Blog, ref slug } if slug == "missing"
    ));
}

#[test]
fn blog_posts_sort_newest_first() {
    let (_dir, loader) = blog_site();
    let mut posts: Vec<BlogPost> = loader.list_as(Category::Blog).unwrap();
    sort_by_date_desc(&mut posts);

    let dates: Vec<_> = posts.iter().map(|p| p.date.as_deref().unwrap()).collect();
    assert_eq!(dates, vec!["2024-06-01", "2024-01-01", "2023-06-01", "2022-01-01"]);
}

#[test]
fn related_posts_rank_by_shared_tags() {
    let (_dir, loader) = blog_site();
    let current: BlogPost = loader.get_as(Category::Blog, "new-year").unwrap();
    let all: Vec<BlogPost> = loader.list_as(Category::Blog).unwrap();

    let related: Vec<_> = related_by_tag_overlap(&current, &all, 2)
        .into_iter()
        .map(|p| p.slug.as_str())
        .collect();
    assert_eq!(related, vec!["summer-23", "summer-24"]);
}

#[test]
fn featured_projects_keep_listing_order() {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    write(root, Category::Projects, "1-alpha.md", "---\nfeatured: true\n---\n");
    write(root, Category::Projects, "2-beta.md", "---\nfeatured: false\n---\n");
    write(root, Category::Projects, "3-gamma.md", "---\nfeatured: true\n---\n");
    write(root, Category::Projects, "4-delta.md", "---\nfeatured: true\n---\n");

    let loader = ContentLoader::with_root(root);
    let projects: Vec<Project> = loader.list_as(Category::Projects).unwrap();
    let featured: Vec<_> = filter_featured(&projects, 2)
        .into_iter()
        .map(|p| p.slug.as_str())
        .collect();
    assert_eq!(featured, vec!["1-alpha", "3-gamma"]);
}

#[test]
fn listing_is_repeatable() {
    let (_dir, loader) = blog_site();
    assert_eq!(
        loader.list(Category::Blog).unwrap(),
        loader.list(Category::Blog).unwrap()
    );
}

#[test]
fn records_reflect_files_at_call_time() {
    let (dir, loader) = blog_site();
    assert_eq!(loader.list(Category::Blog).unwrap().len(), 4);

    write(dir.path(), Category::Blog, "fresh.md", "---\ntitle: Fresh\n---\n");
    assert_eq!(loader.list(Category::Blog).unwrap().len(), 5);
}
