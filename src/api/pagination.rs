//! Page/pageSize query handling for list endpoints.

use serde::{Deserialize, Serialize};

const DEFAULT_PAGE_SIZE: u32 = 25;
const MAX_PAGE_SIZE: u32 = 100;

/// `?page=&pageSize=` as sent by the client; both optional and clamped.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl PageRequest {
    /// One-based page number.
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    /// Copy out the requested page of `items` along with its position.
    pub fn take<T: Clone>(&self, items: &[T]) -> (Vec<T>, PageInfo) {
        let (page, size) = (self.page(), self.page_size());
        let start = ((page - 1) as usize).saturating_mul(size as usize);

        let slice = items
            .iter()
            .skip(start)
            .take(size as usize)
            .cloned()
            .collect();

        let total_items = items.len() as u32;
        let total_pages = total_items.div_ceil(size);
        let info = PageInfo {
            page,
            page_size: size,
            total_items,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        };
        (slice, info)
    }
}

/// Where a returned page sits in the full list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: u32,
    pub page_size: u32,
    pub total_items: u32,
    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}
