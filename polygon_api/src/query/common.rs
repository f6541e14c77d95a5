//! Shared query infrastructure: the [`Query`] trait and [`SortOrder`].

use std::str::FromStr;

use url::Url;

/// Trait implemented by all query builders. A query knows the resource path
/// it targets and how to serialize its parameters onto a URL.
pub trait Query {
    /// Path of the resource relative to the API base URL, starting with `/`.
    fn path(&self) -> String;

    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;
}

/// Sort order for bar results, by timestamp.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Oldest first. This is the default.
    #[default]
    Asc,
    /// Newest first.
    Desc,
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                SortOrder::Asc => "asc",
                SortOrder::Desc => "desc",
            }
        )
    }
}

impl FromStr for SortOrder {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(()),
        }
    }
}
