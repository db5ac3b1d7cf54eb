use std::time::Duration;

use linkcard_engine::{FailureKind, FetchSettings, PageFetcher};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn fetch_page_returns_html_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/doc"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<html>ok</html>", "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let fetcher = PageFetcher::new(FetchSettings::default());
    let url = format!("{}/doc", server.uri());

    let page = fetcher.fetch_page(&url).await.expect("fetch ok");
    assert_eq!(page.final_url, url);
    assert!(page.content_type.unwrap().starts_with("text/html"));
    assert_eq!(page.bytes, b"<html>ok</html>");
}

#[tokio::test]
async fn fetch_page_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = PageFetcher::new(FetchSettings::default());
    let url = format!("{}/missing", server.uri());

    let err = fetcher.fetch_page(&url).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
}

#[tokio::test]
async fn fetch_page_times_out_on_slow_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string("slow"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..FetchSettings::default()
    };
    let fetcher = PageFetcher::new(settings);
    let url = format!("{}/slow", server.uri());

    let err = fetcher.fetch_page(&url).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn fetch_page_follows_redirects_within_the_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/hop1"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/hop2"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/hop2"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/dest"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/dest"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>moved</html>", "text/html"))
        .mount(&server)
        .await;

    let fetcher = PageFetcher::new(FetchSettings::default());
    let url = format!("{}/hop1", server.uri());

    let page = fetcher.fetch_page(&url).await.expect("fetch ok");
    // The final URL is where the chain landed, not where it started.
    assert_eq!(page.final_url, format!("{}/dest", server.uri()));
    assert_eq!(page.bytes, b"<html>moved</html>");
}

#[tokio::test]
async fn fetch_page_fails_when_the_redirect_limit_is_exceeded() {
    let server = MockServer::start().await;
    for (from, to) in [("/hop1", "/hop2"), ("/hop2", "/hop3"), ("/hop3", "/dest")] {
        Mock::given(method("GET"))
            .and(path(from))
            .respond_with(ResponseTemplate::new(302).insert_header("Location", to))
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/dest"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<html>ok</html>", "text/html"))
        .mount(&server)
        .await;

    // Three hops against a limit of two.
    let settings = FetchSettings {
        redirect_limit: 2,
        ..FetchSettings::default()
    };
    let fetcher = PageFetcher::new(settings);
    let url = format!("{}/hop1", server.uri());

    let err = fetcher.fetch_page(&url).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::RedirectLimitExceeded);
}

#[tokio::test]
async fn fetch_page_rejects_too_large_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/large"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Length", "11")
                .set_body_raw("01234567890", "text/html"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_page_bytes: 10,
        ..FetchSettings::default()
    };
    let fetcher = PageFetcher::new(settings);
    let url = format!("{}/large", server.uri());

    let err = fetcher.fetch_page(&url).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(11)
        }
    );
}

#[tokio::test]
async fn fetch_page_rejects_non_html_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .mount(&server)
        .await;

    let fetcher = PageFetcher::new(FetchSettings::default());
    let url = format!("{}/data", server.uri());

    let err = fetcher.fetch_page(&url).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::UnsupportedContentType {
            content_type: "application/json".to_string()
        }
    );
}

#[tokio::test]
async fn fetch_image_ignores_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/img"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![1u8, 2, 3], "image/png"))
        .mount(&server)
        .await;

    let fetcher = PageFetcher::new(FetchSettings::default());
    let url = format!("{}/img", server.uri());

    let bytes = fetcher.fetch_image(&url).await.expect("image ok");
    assert_eq!(bytes, vec![1, 2, 3]);
}

#[tokio::test]
async fn invalid_url_is_reported_as_such() {
    let fetcher = PageFetcher::new(FetchSettings::default());
    let err = fetcher.fetch_page("not a url").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}
