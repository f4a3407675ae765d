//! Per-request context handed to route handlers.
//!
//! Bundles the parsed request with the path parameters captured by the
//! matched route, so handlers get one argument instead of two.

use std::collections::HashMap;

use crate::Request;

/// Path parameters extracted from the matched route pattern.
#[derive(Default, Debug, Clone)]
pub struct PathParams {
    map: HashMap<String, String>,
}

impl PathParams {
    /// Create a new empty parameters map
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Insert a captured value into the parameters map
    pub fn insert(&mut self, key: String, value: String) {
        self.map.insert(key, value);
    }

    /// Get a captured value by parameter name
    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(|value| value.as_str())
    }

    /// Remove a value from the parameters map
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.map.remove(key)
    }
}

/// Per-request context: the parsed request plus captured path parameters.
pub struct Context {
    request: Request,
    params: PathParams,
}

impl Context {
    /// Create a new context from a request, with no path parameters.
    pub fn new(request: Request) -> Self {
        Self {
            request,
            params: PathParams::new(),
        }
    }

    /// Create a context carrying parameters captured by the router.
    pub fn with_params(request: Request, params: PathParams) -> Self {
        Self { request, params }
    }

    pub fn request(&self) -> &Request {
        &self.request
    }

    pub fn params(&self) -> &PathParams {
        &self.params
    }

    /// Replace the captured path parameters. Called by the router after a
    /// pattern match, before the handler runs.
    pub fn set_params(&mut self, params: PathParams) {
        self.params = params;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_request(path: &str) -> Request {
        let raw = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\n\r\n");
        let (req, _) = Request::parse(raw.as_bytes()).unwrap();
        req
    }

    #[test]
    fn params_round_trip() {
        let mut params = PathParams::new();
        params.insert("id".to_string(), "3".to_string());
        assert_eq!(params.get("id"), Some("3"));
        assert_eq!(params.remove("id"), Some("3".to_string()));
        assert_eq!(params.get("id"), None);
    }

    #[test]
    fn context_exposes_request_and_params() {
        let mut params = PathParams::new();
        params.insert("id".to_string(), "42".to_string());
        let ctx = Context::with_params(make_request("/api/products/42"), params);
        assert_eq!(ctx.request().path(), "/api/products/42");
        assert_eq!(ctx.params().get("id"), Some("42"));
    }
}
