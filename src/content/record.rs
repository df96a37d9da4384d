//! Content categories and the records loaded from them

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::helpers::parse_date;

/// A content category; each one is a directory of markdown files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Blog,
    Books,
    Projects,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Blog, Category::Books, Category::Projects];

    /// Directory name under the content root
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Blog => "blog",
            Category::Books => "books",
            Category::Projects => "projects",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "blog" | "post" | "posts" => Ok(Category::Blog),
            "books" | "book" => Ok(Category::Books),
            "projects" | "project" => Ok(Category::Projects),
            _ => anyhow::bail!("Unknown category: {}. Available: blog, books, projects", s),
        }
    }
}

/// Open front-matter mapping, in file order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Metadata(IndexMap<String, Value>);

impl Metadata {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// A string value; other scalar types are not coerced
    pub fn str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.str("title")
    }

    pub fn description(&self) -> Option<&str> {
        self.str("description")
    }

    pub fn image(&self) -> Option<&str> {
        self.str("image")
    }

    /// Tags as a list; a single string counts as one tag, anything else as none
    pub fn tags(&self) -> Vec<String> {
        self.get("tags").map(tag_list).unwrap_or_default()
    }

    /// Only a literal `true` marks an entry as featured
    pub fn featured(&self) -> bool {
        matches!(self.get("featured"), Some(Value::Bool(true)))
    }

    pub fn rating(&self) -> Option<f64> {
        self.get("rating").and_then(Value::as_f64)
    }

    pub fn date(&self) -> Option<NaiveDateTime> {
        self.str("date").and_then(parse_date)
    }

    pub fn date_added(&self) -> Option<NaiveDateTime> {
        self.str("dateAdded").and_then(parse_date)
    }

    pub(crate) fn into_value(self) -> Value {
        Value::Mapping(
            self.0
                .into_iter()
                .map(|(k, v)| (Value::String(k), v))
                .collect(),
        )
    }
}

/// A `tags` value as a list: one scalar is one tag, a sequence keeps its
/// scalar items, anything else is no tags
pub(crate) fn tag_list(value: &Value) -> Vec<String> {
    match value {
        Value::Sequence(items) => items.iter().filter_map(scalar_to_string).collect(),
        other => scalar_to_string(other).into_iter().collect(),
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// One content file: slug from the file name, metadata from its front-matter,
/// and the markdown body when loaded individually
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentRecord {
    pub slug: String,
    pub metadata: Metadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// File the record was read from
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl ContentRecord {
    pub fn new(slug: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            slug: slug.into(),
            metadata,
            body: None,
            source: None,
        }
    }

    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}
