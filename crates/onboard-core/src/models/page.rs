//! Pagination envelope used by the listing collaborators.

use serde::{Deserialize, Serialize};

/// One page of records plus json-server style pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    pub first: u32,
    pub last: u32,
    #[serde(default)]
    pub next: Option<u32>,
    #[serde(default)]
    pub prev: Option<u32>,
    pub pages: u32,
    /// Total number of records across all pages.
    pub items: u32,
    pub data: Vec<T>,
}

impl<T> Page<T> {
    /// Slices `records` into the requested 1-based page.
    pub fn paginate(records: Vec<T>, page: u32, limit: u32) -> Self {
        let limit = limit.max(1);
        let items = records.len() as u32;
        let pages = items.div_ceil(limit).max(1);
        let page = page.clamp(1, pages);
        let data = records
            .into_iter()
            .skip(((page - 1) * limit) as usize)
            .take(limit as usize)
            .collect();

        Self {
            first: 1,
            last: pages,
            next: (page < pages).then_some(page + 1),
            prev: (page > 1).then(|| page - 1),
            pages,
            items,
            data,
        }
    }

    /// Maps the records, keeping the pagination metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            first: self.first,
            last: self.last,
            next: self.next,
            prev: self.prev,
            pages: self.pages,
            items: self.items,
            data: self.data.into_iter().map(f).collect(),
        }
    }
}
