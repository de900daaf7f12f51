/// Cross-origin response headers middleware
///
/// The admin frontend calls this API from the browser, so every response
/// (success, error, and preflight alike) must carry the same fixed CORS
/// header set. tower-http's `CorsLayer` only attaches the method/header
/// allowances to preflight responses, so this layer stamps the full set on
/// everything instead.
///
/// # Headers Applied
///
/// - `Access-Control-Allow-Origin: *`
/// - `Access-Control-Allow-Methods: GET, POST, PUT, DELETE, OPTIONS`
/// - `Access-Control-Allow-Headers: Content-Type, Authorization, X-Client-Info, Apikey`
///
/// # Example
///
/// ```no_run
/// use axum::Router;
/// use carta_api::middleware::cors::CorsHeadersLayer;
///
/// let app: Router = Router::new().layer(CorsHeadersLayer::new());
/// ```
use axum::{
    extract::Request,
    http::HeaderValue,
    response::Response,
};
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// CORS headers middleware layer
#[derive(Clone, Copy, Default)]
pub struct CorsHeadersLayer;

impl CorsHeadersLayer {
    /// Creates a new CORS headers layer
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for CorsHeadersLayer {
    type Service = CorsHeadersMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CorsHeadersMiddleware { inner }
    }
}

/// CORS headers middleware service
#[derive(Clone)]
pub struct CorsHeadersMiddleware<S> {
    inner: S,
}

impl<S> Service<Request> for CorsHeadersMiddleware<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let future = self.inner.call(request);

        Box::pin(async move {
            let mut response = future.await?;

            let headers = response.headers_mut();
            headers.insert(
                "Access-Control-Allow-Origin",
                HeaderValue::from_static("*"),
            );
            headers.insert(
                "Access-Control-Allow-Methods",
                HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS"),
            );
            headers.insert(
                "Access-Control-Allow-Headers",
                HeaderValue::from_static("Content-Type, Authorization, X-Client-Info, Apikey"),
            );

            Ok(response)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::StatusCode,
        response::IntoResponse,
        routing::get,
        Router,
    };
    use tower::Service as _;

    #[tokio::test]
    async fn test_cors_headers_applied() {
        async fn handler() -> impl IntoResponse {
            (StatusCode::OK, "test")
        }

        let mut app = Router::new()
            .route("/test", get(handler))
            .layer(CorsHeadersLayer::new());

        let response = app
            .call(Request::builder().uri("/test").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let headers = response.headers();

        assert_eq!(headers.get("Access-Control-Allow-Origin").unwrap(), "*");
        assert_eq!(
            headers.get("Access-Control-Allow-Methods").unwrap(),
            "GET, POST, PUT, DELETE, OPTIONS"
        );
        assert_eq!(
            headers.get("Access-Control-Allow-Headers").unwrap(),
            "Content-Type, Authorization, X-Client-Info, Apikey"
        );
    }

    #[tokio::test]
    async fn test_cors_headers_applied_to_error_responses() {
        async fn handler() -> impl IntoResponse {
            (StatusCode::INTERNAL_SERVER_ERROR, "boom")
        }

        let mut app = Router::new()
            .route("/test", get(handler))
            .layer(CorsHeadersLayer::new());

        let response = app
            .call(Request::builder().uri("/test").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers().get("Access-Control-Allow-Origin").unwrap(),
            "*"
        );
    }
}
