//! Create a new content file

use anyhow::Result;
use indexmap::IndexMap;
use serde_yaml::Value;
use std::fs;
use std::path::PathBuf;

use crate::content::Category;
use crate::Folio;

/// Scaffold `<content>/<category>/<slugified-title>.md` with the front-matter
/// keys the category's pages read
pub fn create_entry(folio: &Folio, category: Category, title: &str) -> Result<PathBuf> {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a file name from title: {:?}", title);
    }

    let target_dir = folio.content_dir.join(category.dir_name());
    fs::create_dir_all(&target_dir)?;

    let file_path = target_dir.join(format!("{}.md", slug));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    let front_matter = serde_yaml::to_string(&scaffold(category, title, &today))?;
    let content = format!("---\n{}---\n\n", front_matter);

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

fn scaffold(category: Category, title: &str, today: &str) -> IndexMap<&'static str, Value> {
    let text = |s: &str| Value::String(s.to_string());
    let empty = || Value::String(String::new());
    let no_tags = || Value::Sequence(Vec::new());

    let mut fm = IndexMap::new();
    fm.insert("title", text(title));

    match category {
        Category::Blog => {
            fm.insert("date", text(today));
            fm.insert("description", empty());
            fm.insert("tags", no_tags());
            fm.insert("image", empty());
        }
        Category::Books => {
            fm.insert("author", empty());
            fm.insert("description", empty());
            fm.insert("cover", empty());
            fm.insert("rating", Value::Null);
            fm.insert("dateAdded", text(today));
            fm.insert("amazonLink", empty());
            fm.insert("review", empty());
        }
        Category::Projects => {
            fm.insert("description", empty());
            fm.insert("image", empty());
            fm.insert("github", empty());
            fm.insert("demo", empty());
            fm.insert("tags", no_tags());
            fm.insert("featured", Value::Bool(false));
            fm.insert("date", text(today));
        }
    }

    fm
}
