//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::Folio;

const CONFIG: &str = r#"# Site
title: My Portfolio
author: Your Name
description: ''

# URL
url: http://example.com
root: /

# Directory
content_dir: content
public_dir: public

# Pages
home:
  latest_posts: 3
  featured_projects: 2
related_posts: 2
words_per_minute: 200

# Date / Time format
date_format: YYYY-MM-DD

# Code blocks
highlight:
  theme: base16-ocean.dark
  line_number: false
"#;

const SAMPLE_POST: &str = r#"---
title: Hello World
date: {date}
description: The first post on this site.
tags:
  - meta
---

Welcome! Posts live in `content/blog/` as markdown files. The file name is the
post's slug.

```bash
$ folio-rs new blog "My Next Post"
$ folio-rs generate
```
"#;

const SAMPLE_BOOK: &str = r#"---
title: The Pragmatic Programmer
author: David Thomas, Andrew Hunt
description: Timeless advice on the craft of software development.
rating: 5
dateAdded: {date}
---
"#;

const SAMPLE_PROJECT: &str = r#"---
title: Portfolio Site
description: This site, generated from markdown files.
tags:
  - rust
featured: true
date: {date}
---
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("A site already exists in {:?}", target_dir);
    }

    let content_dir = target_dir.join("content");
    for dir in ["blog", "books", "projects"] {
        fs::create_dir_all(content_dir.join(dir))?;
    }

    fs::write(&config_path, CONFIG)?;

    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    let samples = [
        ("blog/hello-world.md", SAMPLE_POST),
        ("books/the-pragmatic-programmer.md", SAMPLE_BOOK),
        ("projects/portfolio-site.md", SAMPLE_PROJECT),
    ];
    for (path, template) in samples {
        fs::write(content_dir.join(path), template.replace("{date}", &today))?;
        tracing::debug!("Wrote sample {}", path);
    }

    Ok(())
}

/// Run the init command with an existing instance
pub fn run(folio: &Folio) -> Result<()> {
    init_site(&folio.base_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Category;
    use crate::pages::PageBuilder;

    #[test]
    fn test_init_site_is_loadable() {
        let dir = tempfile::TempDir::new().unwrap();
        init_site(dir.path()).unwrap();

        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(folio.config.title, "My Portfolio");

        let loader = folio.loader();
        for category in Category::ALL {
            assert_eq!(loader.list(category).unwrap().len(), 1);
        }

        let pages = PageBuilder::new(&folio);
        let home = pages.home();
        assert_eq!(home.latest_posts.len(), 1);
        assert_eq!(home.featured_projects.len(), 1);
        assert!(pages.blog_post("hello-world").is_ready());
    }

    #[test]
    fn test_init_refuses_existing_site() {
        let dir = tempfile::TempDir::new().unwrap();
        init_site(dir.path()).unwrap();
        assert!(init_site(dir.path()).is_err());
    }
}
