//! Paging and sorting for list queries
//!
//! Query parameters follow the `page`/`size`/`sort=field,dir` convention:
//! `page` is 0-based, `sort` may repeat and lists one or more properties
//! optionally followed by `asc` or `desc`.

use serde::Serialize;

use crate::config::PaginationConfig;
use crate::errors::{AppError, Result};

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("asc") {
            Some(Direction::Asc)
        } else if value.eq_ignore_ascii_case("desc") {
            Some(Direction::Desc)
        } else {
            None
        }
    }
}

/// One sort key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortOrder {
    pub property: String,
    pub direction: Direction,
}

impl SortOrder {
    pub fn asc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Asc,
        }
    }

    pub fn desc(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            direction: Direction::Desc,
        }
    }
}

/// Requested page of a list query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// 0-based page index
    pub page: u64,
    /// Page size, always at least 1
    pub size: u64,
    /// Sort keys in priority order; empty means storage order
    pub sort: Vec<SortOrder>,
}

impl PageRequest {
    pub fn new(page: u64, size: u64) -> Self {
        Self {
            page,
            size: size.max(1),
            sort: Vec::new(),
        }
    }

    pub fn with_sort(mut self, order: SortOrder) -> Self {
        self.sort.push(order);
        self
    }

    /// Row offset of the first element of this page
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }

    /// Parse `page`, `size` and repeated `sort` query parameters.
    ///
    /// Unknown parameters are ignored. Sizes above the configured maximum are
    /// clamped. The row offset `page * size` must fit a signed 64-bit SQL
    /// `OFFSET`, otherwise the request is rejected.
    pub fn from_query(params: &[(String, String)], config: &PaginationConfig) -> Result<Self> {
        let mut page = 0;
        let mut size = config.default_size;
        let mut sort = Vec::new();

        for (key, value) in params {
            match key.as_str() {
                "page" => page = parse_number("page", value)?,
                "size" => {
                    size = parse_number("size", value)?;
                    if size == 0 {
                        return Err(paging_error("Page size must be at least 1"));
                    }
                }
                "sort" => sort.extend(parse_sort(value)?),
                _ => {}
            }
        }

        let size = size.min(config.max_size.max(1));
        match page.checked_mul(size) {
            Some(offset) if offset <= i64::MAX as u64 => {}
            _ => return Err(paging_error(&format!("Page {} is out of range", page))),
        }

        Ok(Self { page, size, sort })
    }
}

fn parse_number(name: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| paging_error(&format!("Invalid {} parameter: {}", name, value)))
}

fn parse_sort(value: &str) -> Result<Vec<SortOrder>> {
    let mut parts: Vec<&str> = value.split(',').map(str::trim).collect();

    let direction = match parts.last().and_then(|p| Direction::parse(p)) {
        Some(direction) if parts.len() > 1 => {
            parts.pop();
            direction
        }
        _ => Direction::Asc,
    };

    if parts.iter().any(|p| p.is_empty()) {
        return Err(paging_error(&format!("Invalid sort parameter: {}", value)));
    }

    Ok(parts
        .into_iter()
        .map(|property| SortOrder {
            property: property.to_string(),
            direction,
        })
        .collect())
}

fn paging_error(message: &str) -> AppError {
    AppError::bad_request(message, "pagination", "paging")
}

/// A page of results plus the metadata needed to navigate the full list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: u64,
    pub size: u64,
    pub total_elements: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, request: &PageRequest, total_elements: u64) -> Self {
        Self {
            content,
            page: request.page,
            size: request.size,
            total_elements,
        }
    }

    pub fn total_pages(&self) -> u64 {
        if self.size == 0 {
            return 0;
        }
        self.total_elements.div_ceil(self.size)
    }

    pub fn has_next(&self) -> bool {
        self.page.saturating_add(1) < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.page > 0
    }

    pub fn is_first(&self) -> bool {
        !self.has_previous()
    }

    pub fn is_last(&self) -> bool {
        !self.has_next()
    }

    /// Convert the content, keeping the paging metadata
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            page: self.page,
            size: self.size,
            total_elements: self.total_elements,
        }
    }
}
