//! CORS middleware — the catalog API is consumed by browser frontends served
//! from other origins, so cross-origin requests must be answered with the
//! appropriate `Access-Control-*` headers.

use std::future::Future;
use std::pin::Pin;

use crate::{
    Response,
    context::Context,
    middleware::{Middleware, Next},
};

/// CORS middleware — validates the `Origin` header, handles preflight
/// requests, and injects `Access-Control-*` headers on actual responses.
///
/// Constructed via [`CorsMiddleware::new`] and configured through the builder
/// methods [`allow_origin`](Self::allow_origin),
/// [`allow_method`](Self::allow_method), and [`allow_header`](Self::allow_header).
///
/// # Behavior
///
/// - If no `Origin` header is present the request passes through unmodified.
/// - If the origin is not in the allow-list the request passes through
///   unmodified (the browser then blocks the response on its side).
/// - `OPTIONS` preflight requests are short-circuited with `204 No Content`
///   and the `Access-Control-*` headers; the downstream handler is **not**
///   called.
/// - For all other requests the handler runs normally and the CORS headers
///   are appended to the response.
/// - When the wildcard origin `"*"` is allowed, a `Vary: Origin` header is
///   **not** added; for specific origins it is, so shared caches key on the
///   origin correctly.
///
/// # Examples
///
/// ```rust,no_run
/// use catalogd::security::CorsMiddleware;
///
/// let cors = CorsMiddleware::new()
///     .allow_origin("http://localhost:3000")
///     .allow_method("PATCH")
///     .allow_header("X-Request-Id");
/// ```
pub struct CorsMiddleware {
    allowed_origins: Vec<String>,
    allowed_methods: Vec<String>,
    allowed_headers: Vec<String>,
}

impl Default for CorsMiddleware {
    fn default() -> Self {
        Self::new()
    }
}

impl CorsMiddleware {
    /// Creates a new `CorsMiddleware` with an empty origin allow-list and the
    /// methods/headers the catalog API uses.
    ///
    /// With no allowed origins every request passes through untouched; add
    /// origins with [`allow_origin`](Self::allow_origin), or `"*"` to permit
    /// all of them.
    pub fn new() -> Self {
        Self {
            allowed_origins: Vec::new(),
            allowed_methods: vec![
                "GET".to_string(),
                "POST".to_string(),
                "DELETE".to_string(),
            ],
            allowed_headers: vec!["Content-Type".to_string()],
        }
    }

    /// Adds an allowed origin.
    ///
    /// Pass `"*"` to permit all origins; the response then carries
    /// `Access-Control-Allow-Origin: *`.
    #[must_use]
    pub fn allow_origin(mut self, origin: impl Into<String>) -> Self {
        self.allowed_origins.push(origin.into());
        self
    }

    /// Adds an allowed HTTP method, sent verbatim in
    /// `Access-Control-Allow-Methods`.
    #[must_use]
    pub fn allow_method(mut self, method: impl Into<String>) -> Self {
        self.allowed_methods.push(method.into());
        self
    }

    /// Adds an allowed request header, sent verbatim in
    /// `Access-Control-Allow-Headers`.
    #[must_use]
    pub fn allow_header(mut self, header: impl Into<String>) -> Self {
        self.allowed_headers.push(header.into());
        self
    }
}

impl Middleware for CorsMiddleware {
    fn handle(&self, ctx: Context, next: Next) -> Pin<Box<dyn Future<Output = Response> + Send>> {
        let allowed_origins = self.allowed_origins.clone();
        let allowed_methods = self.allowed_methods.clone();
        let allowed_headers = self.allowed_headers.clone();

        Box::pin(async move {
            let request_origin = ctx.request().headers().get("origin").map(str::to_owned);
            let is_preflight = ctx.request().method() == &crate::Method::Options;
            let Some(origin) = request_origin else {
                return next.run(ctx).await;
            };

            let allow_origin = if allowed_origins.iter().any(|o| o == "*") {
                "*".to_owned()
            } else if allowed_origins.contains(&origin) {
                origin.clone()
            } else {
                return next.run(ctx).await;
            };

            let methods_str = allowed_methods.join(", ");
            let headers_str = allowed_headers.join(", ");
            let is_wildcard = allow_origin == "*";

            if is_preflight {
                let mut resp = Response::new(crate::StatusCode::NoContent)
                    .header("Access-Control-Allow-Origin", &allow_origin)
                    .header("Access-Control-Allow-Methods", &methods_str)
                    .header("Access-Control-Allow-Headers", &headers_str)
                    .header("Access-Control-Max-Age", "3600");
                if !is_wildcard {
                    resp.add_header("Vary", "Origin");
                }
                return resp;
            }

            let mut resp = next.run(ctx).await;
            resp.add_header("Access-Control-Allow-Origin", &allow_origin);
            resp.add_header("Access-Control-Allow-Methods", &methods_str);
            resp.add_header("Access-Control-Allow-Headers", &headers_str);
            if !is_wildcard {
                resp.add_header("Vary", "Origin");
            }
            resp
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::Stack;
    use crate::{Request, Response, Router, StatusCode};

    fn make_request(method: &str, path: &str, origin: Option<&str>) -> Request {
        let origin_header = origin
            .map(|o| format!("Origin: {o}\r\n"))
            .unwrap_or_default();
        let raw = format!("{method} {path} HTTP/1.1\r\nHost: localhost\r\n{origin_header}\r\n");
        let (req, _) = Request::parse(raw.as_bytes()).unwrap();
        req
    }

    fn api_stack(cors: CorsMiddleware) -> Stack {
        let mut router = Router::new();
        router.get("/api/products", |_ctx| async {
            Response::new(StatusCode::Ok)
        });
        Stack::new(router).with(cors)
    }

    #[tokio::test]
    async fn no_origin_passes_through_untouched() {
        let stack = api_stack(CorsMiddleware::new().allow_origin("http://localhost:3000"));
        let res = stack
            .dispatch(make_request("GET", "/api/products", None))
            .await;
        assert_eq!(res.status(), StatusCode::Ok);
        let text = String::from_utf8(res.into_bytes().to_vec()).unwrap();
        assert!(!text.contains("Access-Control-Allow-Origin"));
    }

    #[tokio::test]
    async fn allowed_origin_is_echoed_with_vary() {
        let stack = api_stack(CorsMiddleware::new().allow_origin("http://localhost:3000"));
        let res = stack
            .dispatch(make_request(
                "GET",
                "/api/products",
                Some("http://localhost:3000"),
            ))
            .await;
        let text = String::from_utf8(res.into_bytes().to_vec()).unwrap();
        assert!(text.contains("Access-Control-Allow-Origin: http://localhost:3000\r\n"));
        assert!(text.contains("Vary: Origin\r\n"));
    }

    #[tokio::test]
    async fn unlisted_origin_gets_no_cors_headers() {
        let stack = api_stack(CorsMiddleware::new().allow_origin("http://localhost:3000"));
        let res = stack
            .dispatch(make_request(
                "GET",
                "/api/products",
                Some("http://evil.example"),
            ))
            .await;
        assert_eq!(res.status(), StatusCode::Ok);
        let text = String::from_utf8(res.into_bytes().to_vec()).unwrap();
        assert!(!text.contains("Access-Control-Allow-Origin"));
    }

    #[tokio::test]
    async fn preflight_short_circuits() {
        let stack = api_stack(CorsMiddleware::new().allow_origin("http://localhost:3000"));
        let res = stack
            .dispatch(make_request(
                "OPTIONS",
                "/api/products",
                Some("http://localhost:3000"),
            ))
            .await;
        assert_eq!(res.status(), StatusCode::NoContent);
        let text = String::from_utf8(res.into_bytes().to_vec()).unwrap();
        assert!(text.contains("Access-Control-Allow-Methods: GET, POST, DELETE\r\n"));
        assert!(text.contains("Access-Control-Max-Age: 3600\r\n"));
    }

    #[tokio::test]
    async fn wildcard_origin_no_vary() {
        let stack = api_stack(CorsMiddleware::new().allow_origin("*"));
        let res = stack
            .dispatch(make_request(
                "GET",
                "/api/products",
                Some("http://anywhere.example"),
            ))
            .await;
        let text = String::from_utf8(res.into_bytes().to_vec()).unwrap();
        assert!(text.contains("Access-Control-Allow-Origin: *\r\n"));
        assert!(!text.contains("Vary: Origin"));
    }
}
