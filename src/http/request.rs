//! Request construction

use crate::auth::BearerToken;
use crate::error::{Error, Result};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Method, Request};
use tokio_util::sync::CancellationToken;
use url::Url;

/// Build an authenticated JSON request
///
/// Fails with a request-construction error when the token is already
/// cancelled or the URL does not parse, before any network call is made.
pub fn build_request(
    method: Method,
    url: &str,
    token: &BearerToken,
    query: &[(&str, String)],
    cancel: &CancellationToken,
) -> Result<Request> {
    if cancel.is_cancelled() {
        return Err(Error::cancelled_request());
    }

    let mut url = Url::parse(url).map_err(|e| Error::create_request(format!("{e}: {url}")))?;
    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
    }

    let mut request = Request::new(method, url);
    let headers = request.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    token.apply(headers)?;

    Ok(request)
}
