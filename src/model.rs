// Catalog record types.
// Items as stored in the data file and sent over the wire, plus stats payloads.

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, INVALID_PAGINATION, INVALID_PAYLOAD, Result};

/// Default page size when a request omits `limit`.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// A catalog record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub name: String,
    pub category: String,
    pub price: f64,
}

/// A validated request to create an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub category: String,
    pub price: f64,
}

impl NewItem {
    /// Validate raw fields into a creation payload.
    ///
    /// Name and category must be non-empty; price must be a finite, non-negative number.
    pub fn new(name: impl Into<String>, category: impl Into<String>, price: f64) -> Result<Self> {
        let name = name.into();
        let category = category.into();
        if name.is_empty() || category.is_empty() || !price.is_finite() || price < 0.0 {
            return Err(CatalogError::invalid(INVALID_PAYLOAD));
        }
        Ok(Self {
            name,
            category,
            price,
        })
    }

    pub fn into_item(self, id: u64) -> Item {
        Item {
            id,
            name: self.name,
            category: self.category,
            price: self.price,
        }
    }
}

/// One-based page window over a filtered sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: u64,
    pub size: u64,
}

impl Page {
    /// Both values must be at least 1.
    pub fn new(number: u64, size: u64) -> Result<Self> {
        if number < 1 || size < 1 {
            return Err(CatalogError::invalid(INVALID_PAGINATION));
        }
        Ok(Self { number, size })
    }

    /// Number of records before this page, saturating at `usize::MAX`.
    pub fn offset(&self) -> usize {
        to_usize(self.number - 1).saturating_mul(to_usize(self.size))
    }

    /// Slice the page out of an already filtered sequence.
    pub fn slice<T: Clone>(&self, items: &[T]) -> Vec<T> {
        items
            .iter()
            .skip(self.offset())
            .take(to_usize(self.size))
            .cloned()
            .collect()
    }
}

fn to_usize(n: u64) -> usize {
    usize::try_from(n).unwrap_or(usize::MAX)
}

impl Default for Page {
    fn default() -> Self {
        Self {
            number: 1,
            size: u64::from(DEFAULT_PAGE_SIZE),
        }
    }
}

/// Case-insensitive substring match on the item name. Empty search matches all.
pub fn matches_search(item: &Item, search: &str) -> bool {
    search.is_empty() || item.name.to_lowercase().contains(&search.to_lowercase())
}

/// Client-side query: search text plus one-based page window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub search: String,
    pub page: u32,
    pub page_size: u32,
}

impl Query {
    pub fn new(page_size: u32) -> Self {
        Self {
            search: String::new(),
            page: 1,
            page_size: page_size.max(1),
        }
    }
}

impl Default for Query {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

/// Aggregate stats as exposed by `GET /api/stats`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total: usize,
    pub average_price: f64,
}

/// Body of `GET /api/items/count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCount {
    pub total: u64,
}
