//! Typed entries per category

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;
use std::path::PathBuf;

use super::record::tag_list;
use super::{Category, ContentError, ContentRecord};

/// Deserialize a scalar (string, number or bool) as a string
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Scalar>::deserialize(deserializer).map(|s| s.and_then(|s| s.0))
}

/// Tags from a single scalar or a list; any other shape means no tags
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| tag_list(&value))
}

/// Only a literal `true` counts; a blank or other value is `false`
fn literal_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| matches!(value, Value::Bool(true)))
}

/// A numeric value; anything else is absent
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| value.as_f64())
}

/// A scalar front-matter value rendered as text; null becomes `None`
struct Scalar(Option<String>);

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::{self, Visitor};
        use std::fmt;

        struct ScalarVisitor;

        impl<'de> Visitor<'de> for ScalarVisitor {
            type Value = Scalar;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string, number or boolean")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Scalar, E> {
                Ok(Scalar(Some(v.to_string())))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Scalar, E> {
                Ok(Scalar(Some(v)))
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Scalar, E> {
                Ok(Scalar(Some(v.to_string())))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Scalar, E> {
                Ok(Scalar(Some(v.to_string())))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Scalar, E> {
                Ok(Scalar(Some(v.to_string())))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Scalar, E> {
                Ok(Scalar(Some(v.to_string())))
            }

            fn visit_none<E: de::Error>(self) -> Result<Scalar, E> {
                Ok(Scalar(None))
            }

            fn visit_unit<E: de::Error>(self) -> Result<Scalar, E> {
                Ok(Scalar(None))
            }

            fn visit_some<D2: Deserializer<'de>>(self, d: D2) -> Result<Scalar, D2::Error> {
                d.deserialize_any(self)
            }
        }

        deserializer.deserialize_any(ScalarVisitor)
    }
}

/// A blog post
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlogPost {
    #[serde(skip_deserializing)]
    pub slug: String,
    #[serde(deserialize_with = "scalar_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub date: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub image: Option<String>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// A book on the shelf
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Book {
    #[serde(skip_deserializing)]
    pub slug: String,
    #[serde(deserialize_with = "scalar_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub author: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub cover: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub rating: Option<f64>,
    #[serde(deserialize_with = "scalar_string")]
    pub date_added: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub amazon_link: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub review: Option<String>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// A portfolio project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Project {
    #[serde(skip_deserializing)]
    pub slug: String,
    #[serde(deserialize_with = "scalar_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub description: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub image: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub github: Option<String>,
    #[serde(deserialize_with = "scalar_string")]
    pub demo: Option<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "literal_true")]
    pub featured: bool,
    #[serde(deserialize_with = "scalar_string")]
    pub date: Option<String>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

/// Typed view over a content record, one variant per category
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "category", rename_all = "lowercase")]
pub enum Entry {
    Blog(BlogPost),
    Book(Book),
    Project(Project),
}

impl Entry {
    /// Validate a record's metadata against the shape its category expects
    pub fn from_record(category: Category, record: ContentRecord) -> Result<Self, ContentError> {
        Ok(match category {
            Category::Blog => Entry::Blog(BlogPost::try_from(record)?),
            Category::Books => Entry::Book(Book::try_from(record)?),
            Category::Projects => Entry::Project(Project::try_from(record)?),
        })
    }

    pub fn category(&self) -> Category {
        match self {
            Entry::Blog(_) => Category::Blog,
            Entry::Book(_) => Category::Books,
            Entry::Project(_) => Category::Projects,
        }
    }

    pub fn slug(&self) -> &str {
        match self {
            Entry::Blog(p) => &p.slug,
            Entry::Book(b) => &b.slug,
            Entry::Project(p) => &p.slug,
        }
    }

    pub fn title(&self) -> Option<&str> {
        match self {
            Entry::Blog(p) => p.title.as_deref(),
            Entry::Book(b) => b.title.as_deref(),
            Entry::Project(p) => p.title.as_deref(),
        }
    }

    pub fn body(&self) -> Option<&str> {
        match self {
            Entry::Blog(p) => p.body.as_deref(),
            Entry::Book(b) => b.body.as_deref(),
            Entry::Project(p) => p.body.as_deref(),
        }
    }
}

/// Shared conversion: deserialize metadata, then attach slug and body
fn typed_from_record<T>(
    record: ContentRecord,
    attach: impl FnOnce(&mut T, String, Option<String>),
) -> Result<T, ContentError>
where
    T: DeserializeOwned,
{
    let ContentRecord {
        slug,
        mut metadata,
        body,
        source,
    } = record;

    // Slug and body come from the file itself, never from front-matter
    metadata.remove("slug");
    metadata.remove("body");

    let mut typed: T = serde_yaml::from_value(metadata.into_value()).map_err(|e| {
        let path = source.unwrap_or_else(|| PathBuf::from(&slug));
        ContentError::malformed(path, e)
    })?;
    attach(&mut typed, slug, body);
    Ok(typed)
}

impl TryFrom<ContentRecord> for BlogPost {
    type Error = ContentError;

    fn try_from(record: ContentRecord) -> Result<Self, Self::Error> {
        typed_from_record(record, |p: &mut BlogPost, slug, body| {
            p.slug = slug;
            p.body = body;
        })
    }
}

impl TryFrom<ContentRecord> for Book {
    type Error = ContentError;

    fn try_from(record: ContentRecord) -> Result<Self, Self::Error> {
        typed_from_record(record, |b: &mut Book, slug, body| {
            b.slug = slug;
            b.body = body;
        })
    }
}

impl TryFrom<ContentRecord> for Project {
    type Error = ContentError;

    fn try_from(record: ContentRecord) -> Result<Self, Self::Error> {
        typed_from_record(record, |p: &mut Project, slug, body| {
            p.slug = slug;
            p.body = body;
        })
    }
}
