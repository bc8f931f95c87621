//! Offset pagination with count elision.
//!
//! A page query always fetches its content. The total number of matching
//! rows is only counted when the fetched page cannot determine it: a short
//! page (fewer rows than the limit) that either starts at offset zero or
//! contains at least one row ends exactly at the end of the data, so its
//! total is `offset + content.len()`.

use thiserror::Error;

use crate::domain::sort::SortRequest;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageRequestError {
    #[error("offset must not be negative, got {0}")]
    NegativeOffset(i64),
    #[error("limit must be greater than zero, got {0}")]
    NonPositiveLimit(i64),
    #[error("page number must not be negative, got {0}")]
    NegativePage(i64),
    #[error("offset overflows for page {page} of size {size}")]
    OffsetOverflow { page: i64, size: i64 },
}

/// Window of rows to fetch plus the caller's requested ordering.
///
/// Only constructible through validating constructors, so holding a
/// `PageRequest` guarantees `offset >= 0` and `limit > 0`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    offset: usize,
    limit: usize,
    sort: SortRequest,
}

impl PageRequest {
    pub fn new(offset: i64, limit: i64) -> Result<Self, PageRequestError> {
        if offset < 0 {
            return Err(PageRequestError::NegativeOffset(offset));
        }
        if limit <= 0 {
            return Err(PageRequestError::NonPositiveLimit(limit));
        }
        Ok(Self {
            offset: offset as usize,
            limit: limit as usize,
            sort: SortRequest::unsorted(),
        })
    }

    /// Zero-based page number of `size` rows each.
    pub fn of_page(page: i64, size: i64) -> Result<Self, PageRequestError> {
        if page < 0 {
            return Err(PageRequestError::NegativePage(page));
        }
        if size <= 0 {
            return Err(PageRequestError::NonPositiveLimit(size));
        }
        let offset = page
            .checked_mul(size)
            .ok_or(PageRequestError::OffsetOverflow { page, size })?;
        Self::new(offset, size)
    }

    pub fn with_sort(mut self, sort: SortRequest) -> Self {
        self.sort = sort;
        self
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn sort(&self) -> &SortRequest {
        &self.sort
    }

    /// Total implied by a fetched page, or `None` when a count query is required.
    pub fn elided_total(&self, content_len: usize) -> Option<usize> {
        let short_page = content_len < self.limit;
        let reached_end = self.offset == 0 || content_len > 0;
        (short_page && reached_end).then(|| self.offset + content_len)
    }
}

/// A count query failed after the content was fetched.
///
/// The content is handed back so that the caller can decide whether a page
/// without a verified total is still useful.
#[derive(Debug)]
pub struct CountFailure<T, E> {
    pub content: Vec<T>,
    pub error: E,
}

/// One page of results with its exact total.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<T> {
    content: Vec<T>,
    offset: usize,
    limit: usize,
    total: usize,
}

impl<T> Page<T> {
    /// Assembles a page from fetched content, invoking `count` only when the
    /// content does not determine the total.
    pub fn from_content<E, C>(
        content: Vec<T>,
        request: &PageRequest,
        count: C,
    ) -> Result<Self, CountFailure<T, E>>
    where
        C: FnOnce() -> Result<usize, E>,
    {
        let total = match request.elided_total(content.len()) {
            Some(total) => {
                log::debug!(
                    "Count query elided: offset {} + {} rows",
                    request.offset,
                    content.len()
                );
                total
            }
            None => match count() {
                Ok(total) => total,
                Err(error) => return Err(CountFailure { content, error }),
            },
        };

        Ok(Self {
            content,
            offset: request.offset,
            limit: request.limit,
            total,
        })
    }

    pub fn content(&self) -> &[T] {
        &self.content
    }

    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    pub fn total_elements(&self) -> usize {
        self.total
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Requested page size, which may exceed the number of returned rows.
    pub fn size(&self) -> usize {
        self.limit
    }

    /// Zero-based page number the offset falls into.
    pub fn number(&self) -> usize {
        self.offset / self.limit
    }

    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.limit)
    }

    pub fn number_of_elements(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn is_first(&self) -> bool {
        self.offset == 0
    }

    pub fn is_last(&self) -> bool {
        self.offset + self.content.len() >= self.total
    }

    pub fn has_next(&self) -> bool {
        !self.is_last()
    }

    pub fn has_previous(&self) -> bool {
        !self.is_first()
    }

    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            offset: self.offset,
            limit: self.limit,
            total: self.total,
        }
    }
}
