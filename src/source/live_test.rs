use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;

use super::*;

fn client(base: Option<&str>) -> LiveSource {
    LiveSource::new(base.map(str::to_owned), RequestTimeouts::default()).unwrap()
}

/// Serve `router` on an ephemeral local port and return its base URL.
async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

#[test]
fn endpoint_joins_trimmed_base() {
    let source = client(Some("http://localhost:8000/"));
    assert_eq!(source.endpoint(DASHBOARD_PATH).unwrap(), "http://localhost:8000/sales/dashboard");
}

#[tokio::test]
async fn missing_base_url_fails_at_call_time() {
    let source = client(None);
    let err = source.dashboard().await.unwrap_err();
    assert!(matches!(err, SourceError::MissingBaseUrl));
    let err = source.predict().await.unwrap_err();
    assert!(matches!(err, SourceError::MissingBaseUrl));
}

#[tokio::test]
async fn inventory_comes_from_fixture_without_backend() {
    let rows = client(None).inventory().await.unwrap();
    assert!(!rows.is_empty());
}

#[tokio::test]
async fn non_success_status_is_fetch_failed() {
    let router = Router::new().route(DASHBOARD_PATH, get(|| async { StatusCode::INTERNAL_SERVER_ERROR }));
    let base = spawn_backend(router).await;

    let err = client(Some(&base)).dashboard().await.unwrap_err();
    assert!(matches!(err, SourceError::FetchFailed { status: 500 }));
    assert_eq!(err.to_string(), "fetch failed: status 500");
}

#[tokio::test]
async fn success_body_is_decoded() {
    let router = Router::new().route(
        PREDICT_PATH,
        get(|| async { r#"[{"product_code": "P001", "models": {}}]"# }),
    );
    let base = spawn_backend(router).await;

    let payload = client(Some(&base)).predict().await.unwrap();
    assert_eq!(payload.len(), 1);
    assert_eq!(payload[0].product_code, "P001");
}

#[tokio::test]
async fn malformed_body_is_decode_error() {
    let router = Router::new().route(BUILD_MODELS_PATH, get(|| async { "not json" }));
    let base = spawn_backend(router).await;

    let err = client(Some(&base)).build_models().await.unwrap_err();
    assert!(matches!(err, SourceError::Decode(_)));
}

#[test]
fn parse_payload_rejects_wrong_shape() {
    let err = parse_payload::<PredictPayload>(r#"{"product_code": "P001"}"#).unwrap_err();
    assert!(matches!(err, SourceError::Decode(_)));
}
