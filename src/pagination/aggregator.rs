//! Fan-out page aggregation

use super::types::{Collected, Page, PageCount};
use crate::error::Error;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Fetch every page and merge the records
///
/// `fetch` is called with a page number and the token the fetch should
/// observe. Page 1 is awaited before anything else is started; a page-1
/// failure is reported as "cannot fetch users" and no other page is
/// requested. Pages `2..=last` then run as independent tasks with no
/// concurrency cap. The first failing page cancels a child of `cancel`
/// shared by its siblings; the caller's token itself is never cancelled.
///
/// Page 1's records always come first. The order of later pages depends on
/// completion order.
pub async fn collect_pages<T, F, Fut>(
    fetch: F,
    page_count: PageCount,
    cancel: &CancellationToken,
) -> Collected<T>
where
    T: Send + 'static,
    F: Fn(u32, CancellationToken) -> Fut,
    Fut: Future<Output = crate::Result<Page<T>>> + Send + 'static,
{
    let first = match fetch(1, cancel.clone()).await {
        Ok(page) => page,
        Err(e) => return Collected::failed(Error::fetch_users(e)),
    };

    let Page { records, info } = first;
    let last_page = match page_count.last_page(&info) {
        Ok(None) => {
            debug!("Single page with {} records", records.len());
            return Collected::complete(records);
        }
        Ok(Some(last)) => last,
        Err(e) => return Collected::partial(records, e),
    };

    debug!(
        "total_count={} per_page={}, fetching pages 2..={}",
        info.total_count, info.per_page, last_page
    );

    let collected = Arc::new(Mutex::new(records));
    let group = cancel.child_token();
    let mut tasks = JoinSet::new();

    for page in 2..=last_page {
        let request = fetch(page, group.clone());
        let collected = Arc::clone(&collected);
        tasks.spawn(async move {
            let page_data = request.await.map_err(|e| Error::page_fetch(page, e))?;
            // Lock only for the append, never across the request
            collected.lock().await.extend(page_data.records);
            Ok::<_, Error>(())
        });
    }

    let mut failure = None;
    while let Some(joined) = tasks.join_next().await {
        let result = joined.unwrap_or_else(|e| {
            Err(Error::TaskFailed {
                message: e.to_string(),
            })
        });

        if let Err(e) = result {
            group.cancel();
            if failure.is_none() {
                warn!("Page fetch failed, cancelling remaining pages: {e}");
                failure = Some(e);
            } else {
                debug!("Additional page failure after cancellation: {e}");
            }
        }
    }

    let records = match Arc::try_unwrap(collected) {
        Ok(mutex) => mutex.into_inner(),
        Err(shared) => std::mem::take(&mut *shared.lock().await),
    };

    match failure {
        None => Collected::complete(records),
        Some(e) => Collected::partial(records, e),
    }
}
