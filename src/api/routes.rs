//! Catalog route handlers.
//!
//! Three operations, all returning [`Envelope`]-wrapped JSON:
//!
//! | Method   | Path                   | Behavior                                  |
//! |----------|------------------------|-------------------------------------------|
//! | `GET`    | `/api/products`        | Full ordered product list                 |
//! | `GET`    | `/api/products/:id`    | Single product, or 404 envelope           |
//! | `DELETE` | `/api/products/cache`  | Clear the cached snapshot, acknowledge    |
//!
//! Identifier validation happens here, before the cache layer is touched:
//! a non-numeric or non-positive `:id` is rejected with a 400 envelope.

use std::sync::Arc;

use crate::catalog::{CatalogError, CatalogService, Product};
use crate::context::Context;
use crate::{Response, Router, StatusCode};

use super::envelope::Envelope;

/// Builds the catalog API router around a shared service instance.
pub fn router(service: Arc<CatalogService>) -> Router {
    let mut router = Router::new();

    let svc = Arc::clone(&service);
    router.get("/api/products", move |_ctx| {
        let svc = Arc::clone(&svc);
        async move { list_products(&svc).await }
    });

    let svc = Arc::clone(&service);
    router.get("/api/products/:id", move |ctx| {
        let svc = Arc::clone(&svc);
        async move { get_product(&svc, ctx).await }
    });

    let svc = service;
    router.delete("/api/products/cache", move |_ctx| {
        let svc = Arc::clone(&svc);
        async move { clear_cache(&svc).await }
    });

    router
}

async fn list_products(service: &CatalogService) -> Response {
    match service.get_all().await {
        Ok(products) => Response::json(StatusCode::Ok, &Envelope::collection(products)),
        Err(e) => source_unavailable(&e),
    }
}

async fn get_product(service: &CatalogService, ctx: Context) -> Response {
    let raw = ctx.params().get("id").unwrap_or("");
    let Some(id) = parse_product_id(raw) else {
        return Response::json(
            StatusCode::BadRequest,
            &Envelope::<Product>::failure(format!("Invalid product id '{raw}'")),
        );
    };

    match service.get_by_id(id).await {
        Ok(Some(product)) => Response::json(StatusCode::Ok, &Envelope::item(product)),
        Ok(None) => Response::json(
            StatusCode::NotFound,
            &Envelope::<Product>::failure(format!("Product with id {id} not found")),
        ),
        Err(e) => source_unavailable(&e),
    }
}

async fn clear_cache(service: &CatalogService) -> Response {
    service.invalidate().await;
    Response::json(StatusCode::Ok, &Envelope::ack("Product cache cleared"))
}

// Identifiers are positive integers; zero and garbage never reach the service.
fn parse_product_id(raw: &str) -> Option<u32> {
    raw.parse::<u32>().ok().filter(|id| *id > 0)
}

fn source_unavailable(error: &CatalogError) -> Response {
    tracing::error!(error = %error, "catalog source unavailable");
    Response::json(
        StatusCode::ServiceUnavailable,
        &Envelope::<Product>::failure("Catalog source unavailable"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SampleCatalog;
    use crate::http::Request;

    fn catalog_router() -> Router {
        let service = Arc::new(CatalogService::new(Arc::new(SampleCatalog::new())));
        router(service)
    }

    fn make_request(method: &str, path: &str) -> Request {
        let raw = format!("{method} {path} HTTP/1.1\r\nHost: localhost\r\n\r\n");
        let (req, _) = Request::parse(raw.as_bytes()).unwrap();
        req
    }

    // Splits serialized response bytes into (status line, body JSON).
    fn parse_response(response: Response) -> (String, serde_json::Value) {
        let bytes = response.into_bytes();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        let (head, body) = text.split_once("\r\n\r\n").unwrap();
        let status_line = head.lines().next().unwrap().to_string();
        let json = serde_json::from_str(body).unwrap();
        (status_line, json)
    }

    #[tokio::test]
    async fn list_returns_enveloped_catalog() {
        let router = catalog_router();
        let res = router.route(make_request("GET", "/api/products")).await;
        let (status, body) = parse_response(res);

        assert!(status.starts_with("HTTP/1.1 200"));
        assert_eq!(body["success"], true);
        assert_eq!(body["totalCount"], 8);
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 8);
        assert_eq!(data[0]["name"], "Laptop");
        // Currency precision survives the wire: the cents are intact.
        assert_eq!(data[0]["price"].to_string(), "1200.50");
        assert_eq!(data[0]["category"]["name"], "Electronics");
    }

    #[tokio::test]
    async fn get_known_product_by_id() {
        let router = catalog_router();
        let res = router.route(make_request("GET", "/api/products/3")).await;
        let (status, body) = parse_response(res);

        assert!(status.starts_with("HTTP/1.1 200"));
        assert_eq!(body["totalCount"], 1);
        assert_eq!(body["data"]["name"], "Wireless Mouse");
        assert_eq!(body["data"]["stock"], 75);
    }

    #[tokio::test]
    async fn unknown_id_yields_404_envelope() {
        let router = catalog_router();
        let res = router.route(make_request("GET", "/api/products/999")).await;
        let (status, body) = parse_response(res);

        assert!(status.starts_with("HTTP/1.1 404"));
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Product with id 999 not found");
        assert!(body["data"].is_null());
        assert_eq!(body["totalCount"], 0);
    }

    #[tokio::test]
    async fn malformed_id_yields_400_envelope() {
        let router = catalog_router();
        for bad in ["abc", "0", "-1", "1.5"] {
            let res = router
                .route(make_request("GET", &format!("/api/products/{bad}")))
                .await;
            let (status, body) = parse_response(res);
            assert!(status.starts_with("HTTP/1.1 400"), "id {bad:?}: {status}");
            assert_eq!(body["success"], false);
        }
    }

    #[tokio::test]
    async fn cache_clear_acknowledged() {
        let router = catalog_router();
        let res = router
            .route(make_request("DELETE", "/api/products/cache"))
            .await;
        let (status, body) = parse_response(res);

        assert!(status.starts_with("HTTP/1.1 200"));
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Product cache cleared");
        assert!(body["data"].is_null());
        assert_eq!(body["totalCount"], 0);
    }

    #[tokio::test]
    async fn clear_then_list_still_serves_full_catalog() {
        let service = Arc::new(CatalogService::new(Arc::new(SampleCatalog::new())));
        let router = router(Arc::clone(&service));

        let first = router.route(make_request("GET", "/api/products")).await;
        let (_, first_body) = parse_response(first);

        router
            .route(make_request("DELETE", "/api/products/cache"))
            .await;

        let second = router.route(make_request("GET", "/api/products")).await;
        let (_, second_body) = parse_response(second);

        assert_eq!(first_body["totalCount"], 8);
        assert_eq!(second_body["totalCount"], 8);
        // Same ordering after repopulation.
        let names = |v: &serde_json::Value| -> Vec<String> {
            v["data"]
                .as_array()
                .unwrap()
                .iter()
                .map(|p| p["name"].as_str().unwrap().to_string())
                .collect()
        };
        assert_eq!(names(&first_body), names(&second_body));
    }
}
