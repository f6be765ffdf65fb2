use std::time::Duration;

use axum::{
    Router,
    http::{HeaderMap, StatusCode, header},
    routing::get,
};
use rstest::*;
use treeloader::net::{Headers, HttpClient, Net, NetError, NetOptions};
use treeloader_test_utils::TestHttpServer;
use url::Url;

async fn echo_user_agent(headers: HeaderMap) -> String {
    headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

async fn echo_accept(headers: HeaderMap) -> String {
    headers
        .get(header::ACCEPT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

#[fixture]
fn test_router() -> Router {
    Router::new()
        .route("/text", get(|| async { "Hello, Tree!" }))
        .route("/user-agent", get(echo_user_agent))
        .route("/accept", get(echo_accept))
        .route(
            "/not-found",
            get(|| async { (StatusCode::NOT_FOUND, r#"{"message":"Not Found"}"#) }),
        )
        .route(
            "/binary",
            get(|| async { vec![0xff_u8, 0xfe, 0xfd] }),
        )
}

#[fixture]
async fn test_server(test_router: Router) -> TestHttpServer {
    TestHttpServer::new(test_router).await
}

#[fixture]
fn http_client() -> HttpClient {
    HttpClient::new(&NetOptions::default()).unwrap()
}

#[rstest]
#[timeout(Duration::from_secs(5))]
#[tokio::test]
async fn get_text_reads_body(#[future] test_server: TestHttpServer, http_client: HttpClient) {
    let server = test_server.await;
    let text = http_client.get_text(server.url("/text"), None).await.unwrap();
    assert_eq!(text, "Hello, Tree!");
}

#[rstest]
#[timeout(Duration::from_secs(5))]
#[tokio::test]
async fn user_agent_is_sent(#[future] test_server: TestHttpServer) {
    let server = test_server.await;
    let client = HttpClient::new(&NetOptions {
        user_agent: "treeloader-tests".to_string(),
        ..NetOptions::default()
    })
    .unwrap();

    let agent = client.get_text(server.url("/user-agent"), None).await.unwrap();
    assert_eq!(agent, "treeloader-tests");
}

#[rstest]
#[timeout(Duration::from_secs(5))]
#[tokio::test]
async fn request_headers_are_sent(#[future] test_server: TestHttpServer, http_client: HttpClient) {
    let server = test_server.await;
    let headers = Headers::new().with("Accept", "application/vnd.github+json");
    let accept = http_client
        .get_text(server.url("/accept"), Some(headers))
        .await
        .unwrap();
    assert_eq!(accept, "application/vnd.github+json");
}

#[rstest]
#[case::not_found("/not-found", 404, Some(r#"{"message":"Not Found"}"#))]
#[case::unrouted("/nowhere", 404, Some(""))]
#[timeout(Duration::from_secs(5))]
#[tokio::test]
async fn status_errors_keep_the_body(
    #[future] test_server: TestHttpServer,
    http_client: HttpClient,
    #[case] path: &str,
    #[case] status: u16,
    #[case] body: Option<&str>,
) {
    let server = test_server.await;
    let error = http_client.get_bytes(server.url(path), None).await.unwrap_err();
    assert_eq!(error.status_code(), Some(status));
    assert_eq!(error.body(), body);
}

#[rstest]
#[timeout(Duration::from_secs(5))]
#[tokio::test]
async fn invalid_utf8_is_reported(#[future] test_server: TestHttpServer, http_client: HttpClient) {
    let server = test_server.await;
    let error = http_client.get_text(server.url("/binary"), None).await.unwrap_err();
    assert!(matches!(error, NetError::InvalidUtf8 { .. }));
}

#[rstest]
#[timeout(Duration::from_secs(5))]
#[tokio::test]
async fn refused_connection_is_transport_error(http_client: HttpClient) {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = Url::parse(&format!("http://{}/gone", listener.local_addr().unwrap())).unwrap();
    drop(listener);

    let error = http_client.get_bytes(url, None).await.unwrap_err();
    assert_eq!(error.status_code(), None);
}
