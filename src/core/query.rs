//! Filtering, sorting, and pagination over the in-memory collections.
//!
//! The store has no query engine, so every list endpoint funnels through
//! these helpers: case-insensitive substring search, field sort, and
//! page/limit slicing. `limit = 0` is the "give me everything" escape hatch
//! and always reports a single page.

use crate::core::models::ContentItem;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Anything other than an explicit `asc` sorts descending, matching the
    /// admin panel's newest-first default.
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSortField {
    Title,
    Kind,
    Exam,
    Url,
    CreatedAt,
}

impl ContentSortField {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("title") => ContentSortField::Title,
            Some("type") => ContentSortField::Kind,
            Some("exam") => ContentSortField::Exam,
            Some("url") => ContentSortField::Url,
            _ => ContentSortField::CreatedAt,
        }
    }
}

/// Case-insensitive substring match against any of the given fields.
pub fn matches_search(fields: &[&str], search: &str) -> bool {
    let needle = search.to_lowercase();
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// Page count for a filtered total. `limit = 0` collapses everything into a
/// single page; otherwise it is a plain ceiling division, so an empty
/// collection reports zero pages.
pub fn total_pages(total: usize, limit: u32) -> u32 {
    if limit == 0 {
        1
    } else {
        total.div_ceil(limit as usize) as u32
    }
}

/// Slices one page out of an already filtered and sorted collection.
pub fn paginate<T>(items: Vec<T>, page: u32, limit: u32) -> Vec<T> {
    if limit == 0 {
        return items;
    }
    let skip = (page.max(1) - 1) as usize * limit as usize;
    items.into_iter().skip(skip).take(limit as usize).collect()
}

pub fn sort_content(items: &mut [ContentItem], field: ContentSortField, order: SortOrder) {
    items.sort_by(|a, b| {
        let ordering = match field {
            ContentSortField::Title => a.title.cmp(&b.title),
            ContentSortField::Kind => a.kind.as_str().cmp(b.kind.as_str()),
            ContentSortField::Exam => a.exam.cmp(&b.exam),
            ContentSortField::Url => a.url.cmp(&b.url),
            ContentSortField::CreatedAt => a.created_at.cmp(&b.created_at),
        };
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}
