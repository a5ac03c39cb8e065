// Static demo page exercising every stream from the browser

use std::sync::Arc;

use axum::{extract::State, response::Html, routing::get, Router};

const DEMO_PAGE: &str = include_str!("demo.html");
const PREFIX_PLACEHOLDER: &str = "__API_PREFIX__";

/// Create demo page routes; the page calls the streams under `api_prefix`
pub fn routes(api_prefix: &str) -> Router {
    let page: Arc<str> = DEMO_PAGE.replace(PREFIX_PLACEHOLDER, api_prefix).into();
    Router::new()
        .route("/demo", get(demo_page))
        .with_state(page)
}

/// GET /demo - HTML client for the streaming endpoints
#[utoipa::path(
    get,
    path = "/demo",
    responses(
        (status = 200, description = "Demo page", content_type = "text/html")
    ),
    tag = "service"
)]
pub async fn demo_page(State(page): State<Arc<str>>) -> Html<String> {
    Html(page.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn fetch_page(app: Router) -> String {
        let response = app
            .oneshot(Request::builder().uri("/demo").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        assert!(response.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/html"));

        let body = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_demo_page_served() {
        let html = fetch_page(routes("")).await;
        assert!(html.contains("const apiPrefix = '';"));
        for path in ["/stream`", "/stream/llm", "/stream/progress/", "/stream/post"] {
            assert!(html.contains(path), "demo page should reference {}", path);
        }
    }

    #[tokio::test]
    async fn test_demo_page_uses_prefix() {
        let html = fetch_page(routes("/api")).await;
        assert!(html.contains("const apiPrefix = '/api';"));
        assert!(!html.contains(PREFIX_PLACEHOLDER));
    }

    #[tokio::test]
    async fn test_post_stream_cleanup_keeps_newer_request() {
        let html = fetch_page(routes("")).await;
        assert!(html.contains("sources.post = handle;"));
        assert!(html.contains("if (sources.post === handle)"));
        assert!(!html.contains("} finally {\n                delete sources.post;"));
    }
}
