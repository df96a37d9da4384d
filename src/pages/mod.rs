//! Page data - what each page of the site shows
//!
//! Each builder loads what its page needs, applies the view orderings, and
//! turns load errors into a page-level state instead of failing the build.

use serde::Serialize;

use crate::config::SiteConfig;
use crate::content::{
    BlogPost, Book, Category, ContentError, ContentLoader, MarkdownRenderer, Project,
};
use crate::helpers::{full_url_for, ShareLinks};
use crate::views::{
    filter_featured, latest, related_by_tag_overlap, sort_by_date_desc,
    sort_by_featured_then_date, sort_by_rating_then_date_added,
};
use crate::Folio;

/// Outcome of building a page
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PageState<T> {
    Ready { data: T },
    Empty { message: String },
    NotFound { slug: String },
    Error { message: String },
}

impl<T> PageState<T> {
    pub fn ready(data: T) -> Self {
        PageState::Ready { data }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            PageState::Ready { data } => Some(data),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, PageState::Ready { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HomePage {
    pub latest_posts: Vec<BlogPost>,
    pub featured_projects: Vec<Project>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogIndex {
    pub posts: Vec<BlogPost>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogPostPage {
    pub post: BlogPost,
    pub html: String,
    pub reading_time: usize,
    pub related: Vec<BlogPost>,
    pub share: ShareLinks,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BooksPage {
    pub books: Vec<Book>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectsPage {
    pub projects: Vec<Project>,
}

/// Builds page data for one site
pub struct PageBuilder {
    config: SiteConfig,
    loader: ContentLoader,
    renderer: MarkdownRenderer,
}

impl PageBuilder {
    pub fn new(folio: &Folio) -> Self {
        Self {
            config: folio.config.clone(),
            loader: folio.loader(),
            renderer: MarkdownRenderer::from_config(&folio.config.highlight),
        }
    }

    pub fn loader(&self) -> &ContentLoader {
        &self.loader
    }

    /// Latest posts and featured projects; a failing section is left empty
    pub fn home(&self) -> HomePage {
        let latest_posts = match self.loader.list_as::<BlogPost>(Category::Blog) {
            Ok(posts) => latest(posts, self.config.home.latest_posts),
            Err(e) => {
                tracing::warn!("Home page: skipping latest posts: {}", e);
                Vec::new()
            }
        };

        let featured_projects = match self.loader.list_as::<Project>(Category::Projects) {
            Ok(projects) => filter_featured(&projects, self.config.home.featured_projects)
                .into_iter()
                .cloned()
                .collect(),
            Err(e) => {
                tracing::warn!("Home page: skipping featured projects: {}", e);
                Vec::new()
            }
        };

        HomePage {
            latest_posts,
            featured_projects,
        }
    }

    /// Every post, newest first
    pub fn blog_index(&self) -> PageState<BlogIndex> {
        match self.loader.list_as::<BlogPost>(Category::Blog) {
            Ok(mut posts) => {
                sort_by_date_desc(&mut posts);
                PageState::ready(BlogIndex { posts })
            }
            Err(e) => load_error(Category::Blog, e),
        }
    }

    /// One post with its rendered body and related posts
    pub fn blog_post(&self, slug: &str) -> PageState<BlogPostPage> {
        let post = match self.loader.get_as::<BlogPost>(Category::Blog, slug) {
            Ok(post) => post,
            Err(ContentError::NotFound { slug, .. }) => return PageState::NotFound { slug },
            Err(e) => return load_error(Category::Blog, e),
        };

        let body = post.body.as_deref().unwrap_or_default();
        let html = match self.renderer.render(body) {
            Ok(html) => html,
            Err(e) => {
                tracing::error!("Failed to render post {}: {}", slug, e);
                return PageState::Error {
                    message: "Error rendering this post.".to_string(),
                };
            }
        };
        let reading_time = MarkdownRenderer::reading_time(body, self.config.words_per_minute);

        let related = match self.loader.list_as::<BlogPost>(Category::Blog) {
            Ok(all) => related_by_tag_overlap(&post, &all, self.config.related_posts)
                .into_iter()
                .cloned()
                .collect(),
            Err(e) => {
                tracing::warn!("Post {}: skipping related posts: {}", slug, e);
                Vec::new()
            }
        };

        let url = full_url_for(&self.config, &post_path(&post.slug));
        let title = post.title.as_deref().unwrap_or(&post.slug);
        let share = ShareLinks::new(title, &url);

        PageState::ready(BlogPostPage {
            post,
            html,
            reading_time,
            related,
            share,
        })
    }

    /// Books by rating, then most recently added
    pub fn books(&self) -> PageState<BooksPage> {
        match self.loader.list_as::<Book>(Category::Books) {
            Ok(mut books) => {
                sort_by_rating_then_date_added(&mut books);
                PageState::ready(BooksPage { books })
            }
            Err(e) => load_error(Category::Books, e),
        }
    }

    /// Featured projects first, then newest
    pub fn projects(&self) -> PageState<ProjectsPage> {
        match self.loader.list_as::<Project>(Category::Projects) {
            Ok(projects) if projects.is_empty() => PageState::Empty {
                message: "No projects found.".to_string(),
            },
            Ok(mut projects) => {
                sort_by_featured_then_date(&mut projects);
                PageState::ready(ProjectsPage { projects })
            }
            Err(e) => load_error(Category::Projects, e),
        }
    }
}

/// Site path of a blog post
pub fn post_path(slug: &str) -> String {
    format!("blog/{}/", slug)
}

fn load_error<T>(category: Category, err: ContentError) -> PageState<T> {
    tracing::error!("Error loading {}: {}", category, err);
    PageState::Error {
        message: format!("Error loading {}. Please try again later.", category),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn write(base: &Path, category: &str, name: &str, content: &str) {
        let dir = base.join("content").join(category);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), content).unwrap();
    }

    fn builder(dir: &TempDir) -> PageBuilder {
        let folio = Folio::new(dir.path()).unwrap();
        PageBuilder::new(&folio)
    }

    fn blog_fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        let base = dir.path();
        write(base, "blog", "one.md", "---\ntitle: One\ndate: 2023-01-01\ntags: [rust, web]\n---\nFirst post body");
        write(base, "blog", "two.md", "---\ntitle: Two\ndate: 2024-01-01\ntags: [rust]\n---\nSecond");
        write(base, "blog", "three.md", "---\ntitle: Three\ndate: 2022-01-01\ntags: [cooking]\n---\nThird");
        write(base, "blog", "four.md", "---\ntitle: Four\ndate: 2024-06-01\ntags: [web, rust, css]\n---\nFourth");
        dir
    }

    #[test]
    fn test_blog_index_sorted_newest_first() {
        let dir = blog_fixture();
        let page = builder(&dir).blog_index();
        let slugs: Vec<_> = page.data().unwrap().posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["four", "two", "one", "three"]);
    }

    #[test]
    fn test_blog_post_page() {
        let dir = blog_fixture();
        let page = builder(&dir).blog_post("one");
        let data = page.data().unwrap();

        assert_eq!(data.post.title.as_deref(), Some("One"));
        assert_eq!(data.post.body.as_deref(), Some("First post body"));
        assert!(data.html.contains("<p>First post body</p>"));
        assert_eq!(data.reading_time, 1);

        let related: Vec<_> = data.related.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(related, vec!["four", "two"]);
        assert_eq!(data.share.url, "http://example.com/blog/one/");
    }

    #[test]
    fn test_blog_post_not_found() {
        let dir = blog_fixture();
        assert_eq!(
            builder(&dir).blog_post("missing"),
            PageState::NotFound {
                slug: "missing".to_string()
            }
        );
    }

    #[test]
    fn test_home_page() {
        let dir = blog_fixture();
        let base = dir.path();
        write(base, "projects", "a.md", "---\ntitle: A\nfeatured: true\n---\n");
        write(base, "projects", "b.md", "---\ntitle: B\n---\n");
        write(base, "projects", "c.md", "---\ntitle: C\nfeatured: true\n---\n");
        write(base, "projects", "d.md", "---\ntitle: D\nfeatured: true\n---\n");

        let home = builder(&dir).home();
        let posts: Vec<_> = home.latest_posts.iter().map(|p| p.slug.as_str()).collect();
        let projects: Vec<_> = home.featured_projects.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(posts, vec!["four", "two", "one"]);
        assert_eq!(projects, vec!["a", "c"]);
    }

    #[test]
    fn test_home_page_degrades_missing_sections() {
        let dir = TempDir::new().unwrap();
        let home = builder(&dir).home();
        assert!(home.latest_posts.is_empty());
        assert!(home.featured_projects.is_empty());
    }

    #[test]
    fn test_books_sorted_by_rating() {
        let dir = TempDir::new().unwrap();
        let base = dir.path();
        write(base, "books", "ok.md", "---\ntitle: Ok\nrating: 3\n---\n");
        write(base, "books", "great.md", "---\ntitle: Great\nrating: 5\n---\n");

        let page = builder(&dir).books();
        let slugs: Vec<_> = page.data().unwrap().books.iter().map(|b| b.slug.as_str()).collect();
        assert_eq!(slugs, vec!["great", "ok"]);
    }

    #[test]
    fn test_serialized_slug_comes_from_file_name() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "blog", "real.md", "---\ntitle: Real\nslug: fake\n---\n");

        let json = serde_json::to_string(&builder(&dir).blog_index()).unwrap();
        let page: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(page["state"], "ready");
        assert_eq!(page["data"]["posts"][0]["slug"], "real");
    }

    #[test]
    fn test_unusable_optional_metadata_keeps_pages_ready() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "projects", "a.md", "---\ntitle: A\nfeatured:\n---\n");
        write(dir.path(), "blog", "a.md", "---\ntitle: A\ntags: 2024\n---\n");

        let pages = builder(&dir);
        let projects = pages.projects();
        assert!(!projects.data().unwrap().projects[0].featured);
        assert_eq!(pages.blog_index().data().unwrap().posts[0].tags, vec!["2024"]);
    }

    #[test]
    fn test_projects_states() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(builder(&dir).projects(), PageState::Error { .. }));

        fs::create_dir_all(dir.path().join("content/projects")).unwrap();
        assert!(matches!(builder(&dir).projects(), PageState::Empty { .. }));

        write(dir.path(), "projects", "old.md", "---\ndate: 2020-01-01\n---\n");
        write(dir.path(), "projects", "star.md", "---\nfeatured: true\ndate: 2019-01-01\n---\n");
        let page = builder(&dir).projects();
        let slugs: Vec<_> = page.data().unwrap().projects.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["star", "old"]);
    }

    #[test]
    fn test_malformed_file_fails_whole_listing() {
        let dir = blog_fixture();
        write(dir.path(), "blog", "broken.md", "---\ntitle: broken\n");
        assert!(matches!(builder(&dir).blog_index(), PageState::Error { .. }));
    }

    #[test]
    fn test_page_state_serialization() {
        let state: PageState<BlogIndex> = PageState::Empty {
            message: "nothing".to_string(),
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["state"], "empty");
        assert_eq!(json["message"], "nothing");
    }
}
