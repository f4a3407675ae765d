//! The REST surface of the catalog service: the uniform response envelope
//! and the route handlers that bind the cache service to the transport.

pub mod envelope;
pub mod routes;

pub use envelope::Envelope;
pub use routes::router;
