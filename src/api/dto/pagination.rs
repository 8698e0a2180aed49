//! List envelopes returned by collection endpoints.

use serde::{Deserialize, Serialize};

/// Paginated list of items with navigation metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    #[serde(alias = "data")]
    pub items: Vec<T>,
    pub meta: PageMeta,
    pub links: PageLinks,
}

/// Pagination metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    #[serde(alias = "total_count")]
    pub total: u64,
    #[serde(alias = "last_page")]
    pub page_count: u32,
    pub current_page: u32,
    pub per_page: u32,
}

/// Navigation links. `next` is absent on the last page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    #[serde(rename = "self")]
    pub current: String,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub last: Option<String>,
}

impl<T> Paginated<T> {
    pub fn has_next(&self) -> bool {
        self.links.next.is_some() && self.meta.current_page < self.meta.page_count
    }

    /// Number of the following page, if there is one.
    pub fn next_page(&self) -> Option<u32> {
        self.has_next().then(|| self.meta.current_page + 1)
    }
}

/// Collection body accepted by `list` calls: a bare array or an object with an
/// `items`/`data` array.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ListBody<T> {
    Bare(Vec<T>),
    Wrapped {
        #[serde(alias = "data")]
        items: Vec<T>,
    },
}

impl<T> ListBody<T> {
    pub(crate) fn into_items(self) -> Vec<T> {
        match self {
            Self::Bare(items) | Self::Wrapped { items } => items,
        }
    }
}
