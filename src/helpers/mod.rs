//! Helper functions shared by pages and commands

mod date;
mod url;

pub use date::*;
pub use url::*;
