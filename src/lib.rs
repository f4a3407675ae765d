//! # catalogd
//!
//! A product catalog REST service with a read-through in-memory cache,
//! built on a from-scratch async HTTP/1.1 stack.
//!
//! The catalog is served from a single cached snapshot: reads hit the cache
//! while it is fresh, a miss pulls the full list from the backing
//! [`catalog::CatalogSource`] and publishes it atomically, and an explicit
//! invalidation (or the 15-minute expiration deadline) discards it.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use catalogd::catalog::{CatalogService, SampleCatalog};
//! use catalogd::middleware::{RequestLogger, Stack};
//! use catalogd::server::Server;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = Arc::new(CatalogService::new(Arc::new(SampleCatalog::new())));
//!     let stack = Arc::new(Stack::new(catalogd::api::router(service)).with(RequestLogger));
//!
//!     let server = Server::bind("127.0.0.1:8080").await?;
//!     server
//!         .run(move |req| {
//!             let stack = Arc::clone(&stack);
//!             async move { stack.dispatch(req).await }
//!         })
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod catalog;
pub mod config;
pub mod context;
pub mod http;
pub mod middleware;
pub mod router;
pub mod security;
pub mod server;

// ── Convenience re-exports ────────────────────────────────────────────────────
pub use catalog::{CatalogService, SampleCatalog};
pub use http::{Headers, Method, Request, Response, StatusCode};
pub use router::Router;
pub use server::{Server, ServerError};
