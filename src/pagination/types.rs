//! Pagination types
//!
//! Defines the page shape the aggregator works on, the page-count strategy,
//! and the (possibly partial) aggregate result.

use crate::error::{Error, Result};
use crate::types::{ResultInfo, User, UsersPage};
use serde::{Deserialize, Serialize};

/// One decoded page of records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Records on this page, in server order
    pub records: Vec<T>,
    /// Pagination metadata
    pub info: ResultInfo,
}

impl<T> Page<T> {
    /// Create a page
    pub fn new(records: Vec<T>, info: ResultInfo) -> Self {
        Self { records, info }
    }
}

impl From<UsersPage> for Page<User> {
    fn from(page: UsersPage) -> Self {
        Self {
            records: page.result,
            info: page.result_info,
        }
    }
}

/// How the number of pages is derived from page 1's metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageCount {
    /// `total_count / per_page`, truncating.
    ///
    /// A trailing partial page is not fetched when `total_count` is not a
    /// multiple of `per_page`. This matches the request counts existing
    /// callers observe.
    #[default]
    Truncate,
    /// `ceil(total_count / per_page)`; fetches the trailing partial page too
    Ceil,
}

impl PageCount {
    /// Last page number to fetch, or `None` when page 1 holds everything
    pub fn last_page(self, info: &ResultInfo) -> Result<Option<u32>> {
        if info.total_count == info.count {
            return Ok(None);
        }

        if info.per_page == 0 {
            return Err(Error::pagination(format!(
                "per_page is 0 but total_count ({}) != count ({})",
                info.total_count, info.count
            )));
        }

        let pages = match self {
            PageCount::Truncate => info.total_count / info.per_page,
            PageCount::Ceil => info.total_count.div_ceil(info.per_page),
        };
        Ok(Some(pages))
    }
}

/// Records collected across pages, plus the failure that stopped
/// collection, if any
///
/// Check [`Collected::is_complete`] (or use [`Collected::into_result`])
/// before trusting that every record is present.
#[derive(Debug)]
pub struct Collected<T> {
    records: Vec<T>,
    failure: Option<Error>,
}

impl<T> Collected<T> {
    /// All pages were fetched
    pub fn complete(records: Vec<T>) -> Self {
        Self {
            records,
            failure: None,
        }
    }

    /// Collection stopped early; `records` holds what arrived before
    pub fn partial(records: Vec<T>, failure: Error) -> Self {
        Self {
            records,
            failure: Some(failure),
        }
    }

    /// Nothing was collected
    pub fn failed(failure: Error) -> Self {
        Self::partial(Vec::new(), failure)
    }

    /// Collected records
    pub fn records(&self) -> &[T] {
        &self.records
    }

    /// The failure, if collection stopped early
    pub fn failure(&self) -> Option<&Error> {
        self.failure.as_ref()
    }

    /// Whether every page was fetched
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }

    /// Number of collected records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no records were collected
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Split into records and failure
    pub fn into_parts(self) -> (Vec<T>, Option<Error>) {
        (self.records, self.failure)
    }

    /// Records if complete, the failure otherwise (dropping partial records)
    pub fn into_result(self) -> Result<Vec<T>> {
        match self.failure {
            None => Ok(self.records),
            Some(e) => Err(e),
        }
    }
}
