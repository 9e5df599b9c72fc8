//! Tests for the API client, driven by a scripted transport

use super::*;
use crate::http::HttpResponse;
use async_trait::async_trait;
use reqwest::header::{HeaderName, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Request;
use std::collections::HashSet;
use std::sync::Mutex;

const SUCCESS_ONE: &str = include_str!("../../tests/fixtures/success-one.json");
const SUCCESS_PAGE1: &str = include_str!("../../tests/fixtures/success-multiple-page1.json");
const SUCCESS_PAGE2: &str = include_str!("../../tests/fixtures/success-multiple-page2.json");

// ============================================================================
// Scripted transport
// ============================================================================

#[derive(Debug, Clone)]
struct Recorded {
    method: Method,
    url: String,
    page: Option<String>,
    authorization: Option<String>,
    content_type: Option<String>,
}

type Handler = Box<dyn Fn(&Request) -> Result<HttpResponse> + Send + Sync>;

struct ScriptedTransport {
    handler: Handler,
    requests: Mutex<Vec<Recorded>>,
}

impl ScriptedTransport {
    fn new<F>(handler: F) -> Arc<Self>
    where
        F: Fn(&Request) -> Result<HttpResponse> + Send + Sync + 'static,
    {
        Arc::new(Self {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Answer listing requests by `page` query parameter
    fn pages(pages: &'static [&'static str]) -> Arc<Self> {
        Self::new(move |request| {
            let page: usize = page_param(request)
                .and_then(|p| p.parse().ok())
                .unwrap_or(0);
            match pages.get(page.wrapping_sub(1)) {
                Some(body) => Ok(HttpResponse::ok(*body)),
                None => Ok(HttpResponse::new(StatusCode::NOT_FOUND, "{}")),
            }
        })
    }

    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

fn page_param(request: &Request) -> Option<String> {
    request
        .url()
        .query_pairs()
        .find(|(k, _)| k == "page")
        .map(|(_, v)| v.into_owned())
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: Request, _cancel: &CancellationToken) -> Result<HttpResponse> {
        let header = |name: HeaderName| {
            request
                .headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(String::from)
        };
        self.requests.lock().unwrap().push(Recorded {
            method: request.method().clone(),
            url: request.url().to_string(),
            page: page_param(&request),
            authorization: header(AUTHORIZATION),
            content_type: header(CONTENT_TYPE),
        });
        (self.handler)(&request)
    }
}

fn client_with(transport: Arc<ScriptedTransport>, base_url: &str) -> Client {
    let config = ClientConfig::builder()
        .token("token123")
        .base_url(base_url)
        .build()
        .unwrap();
    Client::with_transport(config, transport)
}

// ============================================================================
// Listing
// ============================================================================

#[tokio::test]
async fn test_list_users_one() {
    let transport = ScriptedTransport::pages(&[SUCCESS_ONE]);
    let client = client_with(Arc::clone(&transport), "https://example.com");

    let users = client
        .users("account456", &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].email, "john@doe.com");
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn test_list_users_multiple() {
    let transport = ScriptedTransport::pages(&[SUCCESS_PAGE1, SUCCESS_PAGE2]);
    let client = client_with(Arc::clone(&transport), "https://example.com");

    let users = client
        .users("account456", &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(users.len(), 2);
    assert_eq!(users[0].email, "john@doe.com");
    let emails: HashSet<&str> = users.iter().map(|u| u.email.as_str()).collect();
    assert!(emails.contains("john@doe.com"));
    assert!(emails.contains("jane@doe.com"));

    let mut pages: Vec<String> = transport
        .requests()
        .into_iter()
        .filter_map(|r| r.page)
        .collect();
    pages.sort();
    assert_eq!(pages, vec!["1", "2"]);
}

#[tokio::test]
async fn test_list_users_request_shape() {
    let transport = ScriptedTransport::pages(&[SUCCESS_ONE]);
    let client = client_with(Arc::clone(&transport), "https://example.com/client/v4/");

    client
        .users("account456", &CancellationToken::new())
        .await
        .unwrap();

    let requests = transport.requests();
    let request = &requests[0];
    assert_eq!(request.method, Method::GET);
    assert_eq!(
        request.url,
        "https://example.com/client/v4/accounts/account456/access/users?page=1"
    );
    assert_eq!(request.authorization.as_deref(), Some("Bearer token123"));
    assert_eq!(request.content_type.as_deref(), Some("application/json"));
}

#[tokio::test]
async fn test_first_page_transport_failure() {
    let transport = ScriptedTransport::new(|_| Err(Error::Cancelled));
    let client = client_with(Arc::clone(&transport), "https://example.com");

    let collected = client
        .list_users("account456", &CancellationToken::new())
        .await;

    assert!(collected.is_empty());
    let err = collected.into_result().unwrap_err();
    assert_eq!(
        err.to_string(),
        "cannot fetch users: cannot send request: operation cancelled"
    );
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn test_first_page_decode_failure() {
    let transport = ScriptedTransport::new(|_| {
        Ok(HttpResponse::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "<html>oops</html>",
        ))
    });
    let client = client_with(Arc::clone(&transport), "https://example.com");

    let err = client
        .users("account456", &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(err
        .to_string()
        .starts_with("cannot fetch users: failed to decode response"));
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn test_second_page_failure_keeps_first_page() {
    let transport = ScriptedTransport::new(|request| match page_param(request).as_deref() {
        Some("1") => Ok(HttpResponse::ok(SUCCESS_PAGE1)),
        _ => Ok(HttpResponse::ok("not json")),
    });
    let client = client_with(Arc::clone(&transport), "https://example.com");

    let collected = client
        .list_users("account456", &CancellationToken::new())
        .await;

    assert_eq!(collected.len(), 1);
    assert_eq!(collected.records()[0].email, "john@doe.com");

    let failure = collected.failure().unwrap();
    assert_eq!(failure.failed_page(), Some(2));
    assert!(failure.to_string().contains("failed to decode response"));
    assert_eq!(transport.requests().len(), 2);
}

#[tokio::test]
async fn test_cancelled_context_fails_before_sending() {
    let transport = ScriptedTransport::pages(&[SUCCESS_ONE]);
    let client = client_with(Arc::clone(&transport), "https://example.com");
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = client
        .fetch_users_page("account456", 1, &cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::CreateRequest { .. }));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_cancel_after_first_page_reports_cancellation() {
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    let transport = ScriptedTransport::new(move |request| match page_param(request).as_deref() {
        Some("1") => {
            trigger.cancel();
            Ok(HttpResponse::ok(SUCCESS_PAGE1))
        }
        _ => Ok(HttpResponse::ok(SUCCESS_PAGE2)),
    });
    let client = client_with(Arc::clone(&transport), "https://example.com");

    let collected = client.list_users("account456", &cancel).await;

    assert_eq!(collected.len(), 1);
    let err = collected.into_result().unwrap_err();
    assert_eq!(
        err.to_string(),
        "cannot fetch page 2: cannot create request: context cancelled"
    );
    assert!(err.is_cancelled());
    assert_eq!(transport.requests().len(), 1);
}

#[tokio::test]
async fn test_invalid_base_url_fails_before_sending() {
    let transport = ScriptedTransport::pages(&[SUCCESS_ONE]);
    let client = client_with(Arc::clone(&transport), "not a url");

    let err = client
        .users("account456", &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(err
        .to_string()
        .starts_with("cannot fetch users: cannot create request"));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_empty_account_id_rejected() {
    let transport = ScriptedTransport::pages(&[SUCCESS_ONE]);
    let client = client_with(Arc::clone(&transport), "https://example.com");

    let err = client
        .fetch_users_page("", 1, &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::CreateRequest { .. }));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_account_id_is_encoded_as_one_segment() {
    let transport = ScriptedTransport::pages(&[SUCCESS_ONE]);
    let client = client_with(Arc::clone(&transport), "https://example.com/client/v4");

    client
        .users("a/b?x=1#frag", &CancellationToken::new())
        .await
        .unwrap();

    let requests = transport.requests();
    assert_eq!(
        requests[0].url,
        "https://example.com/client/v4/accounts/a%2Fb%3Fx=1%23frag/access/users?page=1"
    );
    assert_eq!(requests[0].page.as_deref(), Some("1"));
}

// ============================================================================
// Purge
// ============================================================================

#[tokio::test]
async fn test_purge_cache_success() {
    let transport = ScriptedTransport::new(|_| Ok(HttpResponse::ok(r#"{"success": true}"#)));
    let client = client_with(Arc::clone(&transport), "https://example.com/");

    client
        .purge_cache("zone789", &CancellationToken::new())
        .await
        .unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::POST);
    assert_eq!(requests[0].url, "https://example.com/zones/zone789/purge_cache");
    assert_eq!(requests[0].authorization.as_deref(), Some("Bearer token123"));
}

#[tokio::test]
async fn test_purge_cache_zone_id_is_encoded() {
    let transport = ScriptedTransport::new(|_| Ok(HttpResponse::ok("{}")));
    let client = client_with(Arc::clone(&transport), "https://example.com");

    client
        .purge_cache("zone/../other", &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(
        transport.requests()[0].url,
        "https://example.com/zones/zone%2F..%2Fother/purge_cache"
    );
}

#[tokio::test]
async fn test_purge_cache_non_200() {
    for status in [StatusCode::CREATED, StatusCode::FORBIDDEN, StatusCode::BAD_GATEWAY] {
        let transport = ScriptedTransport::new(move |_| Ok(HttpResponse::new(status, "")));
        let client = client_with(transport, "https://example.com");

        let err = client
            .purge_cache("zone789", &CancellationToken::new())
            .await
            .unwrap_err();

        assert!(matches!(err, Error::UnexpectedStatus { .. }));
        assert!(err.to_string().contains(&status.as_u16().to_string()));
    }
}

#[tokio::test]
async fn test_purge_cache_transport_failure() {
    let transport = ScriptedTransport::new(|_| Err(Error::Cancelled));
    let client = client_with(transport, "https://example.com");

    let err = client
        .purge_cache("zone789", &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(err.to_string().starts_with("cannot send request"));
    assert!(err.is_cancelled());
}

#[test]
fn test_client_debug_redacts_token() {
    let client = client_with(ScriptedTransport::pages(&[]), "https://example.com");
    let debug = format!("{client:?}");
    assert!(debug.contains("https://example.com"));
    assert!(!debug.contains("token123"));
    assert_eq!(client.base_url(), "https://example.com");
    assert_eq!(client.page_count(), PageCount::Truncate);
}
