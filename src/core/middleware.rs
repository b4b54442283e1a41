use axum::http::{header, HeaderName, HeaderValue, Method, Request};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::Span;
use uuid::Uuid;

/// Header carrying the request id, both inbound and on responses.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub fn request_id_header() -> HeaderName {
    HeaderName::from_static(REQUEST_ID_HEADER)
}

/// Assigns a UUID v7 to requests that arrive without an id.
#[derive(Clone, Copy)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::now_v7().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Request span tagged with method, path and request id.
///
/// Only the path is recorded: query strings are never part of a registration
/// and should not end up in logs.
#[derive(Clone, Debug)]
pub struct RequestSpan;

impl<B> tower_http::trace::MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let request_id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "request",
            method = %request.method(),
            path = %request.uri().path(),
            request_id = %request_id,
        )
    }
}

/// CORS for browser-hosted registration forms: `GET`/`POST` with a JSON body.
/// `"*"` anywhere in the list allows any origin.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, request_id_header()])
        .expose_headers([request_id_header()]);

    if allowed_origins.iter().any(|o| o == "*") {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {:?}", origin);
                None
            }
        })
        .collect();
    cors.allow_origin(AllowOrigin::list(origins))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::get, Router};
    use axum_test::TestServer;

    fn server(origins: &[&str]) -> TestServer {
        let origins: Vec<String> = origins.iter().map(|o| o.to_string()).collect();
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(cors_layer(&origins));
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_wildcard_allows_any_origin() {
        let response = server(&["*"])
            .get("/")
            .add_header("origin", "http://forms.example")
            .await;

        assert_eq!(response.header("access-control-allow-origin"), "*");
        assert_eq!(
            response.header("access-control-expose-headers"),
            REQUEST_ID_HEADER
        );
    }

    #[tokio::test]
    async fn test_listed_origin_is_echoed_and_others_are_not() {
        let server = server(&["http://forms.example", "not a header\nvalue"]);

        let allowed = server
            .get("/")
            .add_header("origin", "http://forms.example")
            .await;
        assert_eq!(
            allowed.header("access-control-allow-origin"),
            "http://forms.example"
        );

        let other = server
            .get("/")
            .add_header("origin", "http://elsewhere.example")
            .await;
        assert!(other.maybe_header("access-control-allow-origin").is_none());
    }

    #[tokio::test]
    async fn test_preflight_allows_json_posts() {
        let response = server(&["*"])
            .method(Method::OPTIONS, "/")
            .add_header("origin", "http://forms.example")
            .add_header("access-control-request-method", "POST")
            .add_header("access-control-request-headers", "content-type")
            .await;

        let methods = response.header("access-control-allow-methods");
        let methods = methods.to_str().unwrap();
        assert!(methods.contains("POST"));
        assert!(!methods.contains("DELETE"));

        let headers = response.header("access-control-allow-headers");
        assert!(headers.to_str().unwrap().contains("content-type"));
    }

    #[test]
    fn test_generated_request_id_is_uuid_v7() {
        let request = Request::new(());
        let id = MakeRequestUuid.make_request_id(&request).unwrap();
        let id = Uuid::parse_str(id.header_value().to_str().unwrap()).unwrap();
        assert_eq!(id.get_version_num(), 7);
    }
}
