use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::RawQuery,
    http::{header, HeaderMap, StatusCode},
    Router,
};
use lookups::{
    http_client, lookup, EncyclopediaClient, FactCheckClient, LookupError, LookupOutcome,
    LookupProvider, NewsClient, USER_AGENT,
};

/// One request as the server saw it.
#[derive(Clone, Debug)]
struct Hit {
    query: String,
    user_agent: Option<String>,
}

type Seen = Arc<Mutex<Vec<Hit>>>;

/// Serve `body` with `status` on every path; record each request.
async fn serve(status: StatusCode, body: &'static str) -> (String, Seen) {
    serve_after(Duration::ZERO, status, body).await
}

/// Like `serve`, but each response is held back by `delay`.
async fn serve_after(delay: Duration, status: StatusCode, body: &'static str) -> (String, Seen) {
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new().fallback({
        let seen = seen.clone();
        move |headers: HeaderMap, RawQuery(q): RawQuery| {
            let seen = seen.clone();
            async move {
                seen.lock().unwrap().push(Hit {
                    query: q.unwrap_or_default(),
                    user_agent: headers
                        .get(header::USER_AGENT)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_string),
                });
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                (status, body)
            }
        }
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}/search"), seen)
}

fn http() -> reqwest::Client {
    http_client(Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_news_success_and_query_params() {
    let body = r#"{"status":"ok","articles":[{"source":{"name":"AP"},"title":"T","url":"https://a","publishedAt":"2024-01-01T00:00:00Z","description":"D"}]}"#;
    let (url, seen) = serve(StatusCode::OK, body).await;
    let client = NewsClient::new(http(), Some("k123".into())).with_base_url(url);

    let articles = client.search("moon landing").await.unwrap();
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].source_name.as_deref(), Some("AP"));

    let q = seen.lock().unwrap()[0].query.clone();
    assert!(q.contains("q=moon+landing") || q.contains("q=moon%20landing"));
    assert!(q.contains("apiKey=k123"));
    assert!(q.contains("language=en"));
    assert!(q.contains("sortBy=relevancy"));
    assert!(q.contains("pageSize=5"));
}

#[tokio::test]
async fn test_factcheck_not_found_is_api_error() {
    let (url, _) = serve(StatusCode::NOT_FOUND, "not here").await;
    let client = FactCheckClient::new(http(), Some("k".into())).with_base_url(url);

    match client.search("anything").await {
        Err(LookupError::Api { status, message }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "not here");
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_folds_into_failed_outcome() {
    let (url, _) = serve(StatusCode::INTERNAL_SERVER_ERROR, "boom").await;
    let client = EncyclopediaClient::new(http()).with_base_url(url);

    let out = lookup(&client, "mars").await;
    assert!(out.is_failed());
    assert!(out.records().is_empty());
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let (url, _) = serve(StatusCode::OK, "<html>not json</html>").await;
    let client = EncyclopediaClient::new(http()).with_base_url(url);

    let err = client.search("mars").await.unwrap_err();
    assert!(matches!(err, LookupError::Parse(_)), "got {err:?}");
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = NewsClient::new(http(), Some("k".into())).with_base_url(format!("http://{addr}/"));
    let err = client.search("x").await.unwrap_err();
    assert!(matches!(err, LookupError::Network(_)), "got {err:?}");
}

#[tokio::test]
async fn test_encyclopedia_strips_markup_and_builds_urls() {
    let body = r#"{"query":{"search":[{"title":"Mars rover","pageid":42,"snippet":"<span class=\"searchmatch\">Mars</span> rover"}]}}"#;
    let (url, seen) = serve(StatusCode::OK, body).await;
    let client = EncyclopediaClient::new(http()).with_base_url(url);

    let out = lookup(&client, "Mars").await;
    let hits = out.records();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].snippet, "Mars rover");
    assert_eq!(hits[0].url, "https://en.wikipedia.org/?curid=42");

    let q = seen.lock().unwrap()[0].query.clone();
    assert!(q.contains("list=search"));
    assert!(q.contains("srlimit=5"));
}

#[tokio::test]
async fn test_zero_matches_is_no_results() {
    let (url, _) = serve(StatusCode::OK, r#"{"claims":[]}"#).await;
    let client = FactCheckClient::new(http(), Some("k".into())).with_base_url(url);

    let out = lookup(&client, "obscure").await;
    assert_eq!(out, LookupOutcome::NoResults);
}

#[tokio::test]
async fn test_keyless_client_makes_no_request() {
    let (url, seen) = serve(StatusCode::OK, r#"{"articles":[]}"#).await;
    let client = NewsClient::new(http(), Some("   ".into())).with_base_url(url);
    assert!(!client.is_configured());

    let out = lookup(&client, "x").await;
    assert_eq!(out, LookupOutcome::NotConfigured);

    let err = client.search("x").await.unwrap_err();
    assert!(matches!(err, LookupError::MissingCredential("news")));
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_requests_carry_user_agent() {
    let body = r#"{"query":{"search":[]}}"#;
    let (url, seen) = serve(StatusCode::OK, body).await;
    let client = EncyclopediaClient::new(http()).with_base_url(url);

    client.search("mars").await.unwrap();

    let ua = seen.lock().unwrap()[0].user_agent.clone();
    assert_eq!(ua.as_deref(), Some(USER_AGENT));
    assert!(USER_AGENT.starts_with("lookups/"));
}

#[tokio::test]
async fn test_slow_provider_times_out_as_failed() {
    let (url, _) = serve_after(Duration::from_secs(5), StatusCode::OK, r#"{"articles":[]}"#).await;
    let client = NewsClient::new(http_client(Duration::from_millis(100)).unwrap(), Some("k".into()))
        .with_base_url(url);

    let err = client.search("x").await.unwrap_err();
    assert!(matches!(err, LookupError::Network(_)), "got {err:?}");

    let out = lookup(&client, "x").await;
    assert!(out.is_failed());
    assert!(out.records().is_empty());
}
