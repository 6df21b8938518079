//! Page arithmetic and the compact page-token strip shown under transaction lists.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Number of pages needed for `total_items`; an empty list still has one page.
pub fn total_pages(total_items: u64, page_size: u64) -> u64 {
    if page_size == 0 {
        return 1;
    }
    total_items.div_ceil(page_size).max(1)
}

/// Clamps a 1-indexed page into `[1, total_pages]`.
pub fn clamp_page(page: u64, total_pages: u64) -> u64 {
    page.clamp(1, total_pages.max(1))
}

/// Half-open slice bounds of one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageBounds {
    pub start: usize,
    pub end_exclusive: usize,
}

impl PageBounds {
    pub fn len(&self) -> usize {
        self.end_exclusive - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end_exclusive
    }
}

/// Bounds of `page` after clamping it into range.
pub fn page_bounds(page: u64, page_size: u64, total_items: usize) -> PageBounds {
    let pages = total_pages(total_items as u64, page_size);
    let page = clamp_page(page, pages);
    let start = ((page - 1).saturating_mul(page_size) as usize).min(total_items);
    let end_exclusive = start.saturating_add(page_size as usize).min(total_items);
    PageBounds {
        start,
        end_exclusive,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "page", rename_all = "snake_case")]
pub enum PageToken {
    Page(u64),
    Ellipsis,
}

/// First page, last page and the pages adjacent to `current`, with an ellipsis
/// wherever more than one page is skipped. A single skipped page is shown.
pub fn build_page_tokens(current: u64, total_pages: u64) -> Vec<PageToken> {
    if total_pages == 0 {
        return Vec::new();
    }
    let current = clamp_page(current, total_pages);
    let mut pages = vec![1, current.saturating_sub(1), current, current + 1, total_pages];
    pages.retain(|page| (1..=total_pages).contains(page));
    pages.sort_unstable();
    pages.dedup();

    let mut tokens = Vec::with_capacity(pages.len() + 2);
    let mut previous: Option<u64> = None;
    for page in pages {
        if let Some(prev) = previous {
            match page - prev {
                1 => {}
                2 => tokens.push(PageToken::Page(prev + 1)),
                _ => tokens.push(PageToken::Ellipsis),
            }
        }
        tokens.push(PageToken::Page(page));
        previous = Some(page);
    }
    tokens
}
