//! Views - pure orderings and subsets over loaded content
//!
//! Nothing here touches the filesystem. Every function is total: absent or
//! unusable metadata counts as "no tags", "not featured", "oldest" or
//! "lowest rated".

mod related;
mod sort;

pub use related::{filter_featured, related_by_tag_overlap};
pub use sort::{
    latest, sort_by_date_desc, sort_by_featured_then_date, sort_by_rating_then_date_added,
};

use chrono::NaiveDateTime;
use std::borrow::Cow;

use crate::content::{BlogPost, Book, ContentRecord, Entry, Project};
use crate::helpers::parse_date;

/// Fields the views read from a record
pub trait Listing {
    fn slug(&self) -> &str;

    fn date(&self) -> Option<NaiveDateTime> {
        None
    }

    fn tags(&self) -> Cow<'_, [String]> {
        Cow::Borrowed(&[])
    }

    fn featured(&self) -> bool {
        false
    }

    fn rating(&self) -> Option<f64> {
        None
    }

    fn date_added(&self) -> Option<NaiveDateTime> {
        None
    }
}

impl Listing for ContentRecord {
    fn slug(&self) -> &str {
        &self.slug
    }

    fn date(&self) -> Option<NaiveDateTime> {
        self.metadata.date()
    }

    fn tags(&self) -> Cow<'_, [String]> {
        Cow::Owned(self.metadata.tags())
    }

    fn featured(&self) -> bool {
        self.metadata.featured()
    }

    fn rating(&self) -> Option<f64> {
        self.metadata.rating()
    }

    fn date_added(&self) -> Option<NaiveDateTime> {
        self.metadata.date_added()
    }
}

impl Listing for BlogPost {
    fn slug(&self) -> &str {
        &self.slug
    }

    fn date(&self) -> Option<NaiveDateTime> {
        self.date.as_deref().and_then(parse_date)
    }

    fn tags(&self) -> Cow<'_, [String]> {
        Cow::Borrowed(&self.tags)
    }
}

impl Listing for Book {
    fn slug(&self) -> &str {
        &self.slug
    }

    fn rating(&self) -> Option<f64> {
        self.rating
    }

    fn date_added(&self) -> Option<NaiveDateTime> {
        self.date_added.as_deref().and_then(parse_date)
    }
}

impl Listing for Project {
    fn slug(&self) -> &str {
        &self.slug
    }

    fn date(&self) -> Option<NaiveDateTime> {
        self.date.as_deref().and_then(parse_date)
    }

    fn tags(&self) -> Cow<'_, [String]> {
        Cow::Borrowed(&self.tags)
    }

    fn featured(&self) -> bool {
        self.featured
    }
}

impl Listing for Entry {
    fn slug(&self) -> &str {
        Entry::slug(self)
    }

    fn date(&self) -> Option<NaiveDateTime> {
        match self {
            Entry::Blog(p) => p.date(),
            Entry::Book(b) => b.date(),
            Entry::Project(p) => p.date(),
        }
    }

    fn tags(&self) -> Cow<'_, [String]> {
        match self {
            Entry::Blog(p) => p.tags(),
            Entry::Book(b) => b.tags(),
            Entry::Project(p) => p.tags(),
        }
    }

    fn featured(&self) -> bool {
        match self {
            Entry::Project(p) => p.featured,
            _ => false,
        }
    }

    fn rating(&self) -> Option<f64> {
        match self {
            Entry::Book(b) => b.rating,
            _ => None,
        }
    }

    fn date_added(&self) -> Option<NaiveDateTime> {
        match self {
            Entry::Book(b) => b.date_added(),
            _ => None,
        }
    }
}
