use serde::Serialize;

use crate::pagination::Page;

/// Page envelope serialized by the paged endpoints.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDto<T> {
    pub content: Vec<T>,
    pub total_elements: usize,
    pub total_pages: usize,
    /// Zero-based page number derived from offset and size.
    pub number: usize,
    pub size: usize,
    pub offset: usize,
    pub number_of_elements: usize,
    pub first: bool,
    pub last: bool,
    pub empty: bool,
}

impl<T> From<Page<T>> for PageDto<T> {
    fn from(page: Page<T>) -> Self {
        let total_elements = page.total_elements();
        let total_pages = page.total_pages();
        let number = page.number();
        let size = page.size();
        let offset = page.offset();
        let number_of_elements = page.number_of_elements();
        let first = page.is_first();
        let last = page.is_last();
        let empty = page.is_empty();

        Self {
            content: page.into_content(),
            total_elements,
            total_pages,
            number,
            size,
            offset,
            number_of_elements,
            first,
            last,
            empty,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorDto {
    pub error: String,
}

impl ErrorDto {
    pub fn new(error: impl ToString) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}
