//! Pagination module
//!
//! Turns a page-numbered listing endpoint into one in-memory collection.
//!
//! # Overview
//!
//! Page 1 is fetched first; its `result_info` tells how many pages exist.
//! The remaining pages are then fetched concurrently, one task per page,
//! and appended to a shared collection. The first failure cancels the
//! remaining work, and whatever was collected is handed back with the error.

mod aggregator;
mod types;

pub use aggregator::collect_pages;
pub use types::{Collected, Page, PageCount};
