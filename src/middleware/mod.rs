//! Middleware pipeline — composable before/after request handler logic.
//!
//! The pipeline is an ordered stack of layers wrapped around the router. Each
//! layer receives the request [`Context`] and a [`Next`] cursor into the
//! remaining chain; it may pass through, short-circuit with its own response,
//! or decorate the downstream response.
//!
//! ## Core types
//!
//! - [`Middleware`] — trait implemented by all middleware.
//! - [`Next`] — cursor into the remaining middleware chain; call [`Next::run`]
//!   to advance to the next layer.
//! - [`Stack`] — the assembled pipeline: middleware in registration order with
//!   the [`Router`] as the terminal layer.
//! - [`RequestLogger`] — built-in request/response logger.

use std::{future::Future, pin::Pin, sync::Arc};
use tokio::time::Instant;

use crate::{Response, Router, context::Context};

/// A cursor into the remaining middleware chain for a single request.
///
/// `Next` is passed to each middleware's [`Middleware::handle`] implementation.
/// Calling [`Next::run`] advances the cursor by one position and invokes the
/// next layer (or returns a fallback `500` response when the chain is
/// exhausted without any layer generating a response).
///
/// `Next` is consumed on each call to [`run`](Self::run), so it cannot be
/// called more than once per middleware invocation.
pub struct Next {
    middlewares: Vec<MiddlewareHandler>,
    // Tracks which middleware to invoke on the next `run` call.
    index: usize,
}

/// A type-erased, reference-counted middleware function.
///
/// Every entry in the middleware stack is stored as a `MiddlewareHandler`.
/// The [`Arc`] wrapper makes handlers cheap to clone so that [`Next`] can
/// advance through the chain without copying closures.
pub type MiddlewareHandler = Arc<
    dyn Fn(Context, Next) -> Pin<Box<dyn Future<Output = Response> + Send>> + Send + Sync + 'static,
>;

/// Converts a [`Middleware`] implementation into a [`MiddlewareHandler`].
pub fn from_middleware<M>(middleware: Arc<M>) -> MiddlewareHandler
where
    M: Middleware + 'static,
{
    Arc::new(move |ctx: Context, next: Next| middleware.handle(ctx, next))
}

impl Next {
    /// Creates a new `Next` positioned at the start of the given middleware stack.
    pub fn new(middlewares: Vec<MiddlewareHandler>) -> Self {
        Self {
            middlewares,
            index: 0,
        }
    }

    /// Invokes the next middleware in the chain and returns its response.
    ///
    /// Advances the internal cursor by one, clones the handler at the current
    /// position, and awaits it. If no handler remains, a `500 Internal Server
    /// Error` response is returned as a safe fallback.
    pub async fn run(mut self, ctx: Context) -> Response {
        if self.index < self.middlewares.len() {
            let handler = self.middlewares[self.index].clone();
            self.index += 1;
            handler(ctx, self).await
        } else {
            Response::new(crate::StatusCode::InternalServerError)
                .body("No response generated by middleware pipeline")
        }
    }
}

/// The core trait for all catalogd middleware.
///
/// Implementors receive a [`Context`] and a [`Next`] cursor. They may:
///
/// - **Pass through** — call `next.run(ctx).await` without modification.
/// - **Short-circuit** — return a [`Response`] directly without calling `next`.
/// - **Decorate** — call `next.run(ctx).await`, inspect the response, and
///   return a modified copy.
///
/// Implementations must be `Send + Sync` because middleware is shared across
/// Tokio tasks, and `handle` must return a pinned `Send` future so it can be
/// awaited on multi-threaded runtimes.
pub trait Middleware: Send + Sync {
    /// Handle the request and optionally delegate to the next middleware.
    fn handle(&self, ctx: Context, next: Next) -> Pin<Box<dyn Future<Output = Response> + Send>>;
}

/// The assembled request pipeline: an ordered middleware chain terminated by
/// the router.
///
/// # Examples
///
/// ```rust,no_run
/// use catalogd::{Router, Response, StatusCode};
/// use catalogd::middleware::{RequestLogger, Stack};
///
/// let mut router = Router::new();
/// router.get("/ping", |_ctx| async { Response::new(StatusCode::Ok) });
///
/// let stack = Stack::new(router).with(RequestLogger);
/// ```
pub struct Stack {
    middlewares: Vec<MiddlewareHandler>,
    router: Arc<Router>,
}

impl Stack {
    /// Creates a pipeline with no middleware around the given router.
    pub fn new(router: Router) -> Self {
        Self {
            middlewares: Vec::new(),
            router: Arc::new(router),
        }
    }

    /// Appends a middleware layer. Layers run in registration order, each
    /// wrapping everything registered after it.
    #[must_use]
    pub fn with<M>(mut self, middleware: M) -> Self
    where
        M: Middleware + 'static,
    {
        self.middlewares.push(from_middleware(Arc::new(middleware)));
        self
    }

    /// Runs `request` through the middleware chain and the router, returning
    /// the final response.
    pub async fn dispatch(&self, request: crate::Request) -> Response {
        let mut chain = self.middlewares.clone();

        let router = Arc::clone(&self.router);
        chain.push(Arc::new(move |ctx: Context, _next: Next| {
            let router = Arc::clone(&router);
            Box::pin(async move { router.dispatch(ctx).await })
        }));

        Next::new(chain).run(Context::new(request)).await
    }
}

/// Built-in middleware that logs each request's method, path, status, and duration.
///
/// Emits a single `tracing::info!` line after the downstream handler completes:
///
/// ```text
/// METHOD /path - STATUS (duration)
/// ```
///
/// `RequestLogger` never short-circuits; it always delegates to the next layer
/// and records timing after the fact.
pub struct RequestLogger;

impl Middleware for RequestLogger {
    fn handle(&self, ctx: Context, next: Next) -> Pin<Box<dyn Future<Output = Response> + Send>> {
        Box::pin(async move {
            let start = Instant::now();
            let method = ctx.request().method().as_str().to_string();
            let path = ctx.request().path().to_string();

            let response = next.run(ctx).await;

            let duration = start.elapsed();
            let status = response.status().as_u16();

            tracing::info!("{} {} - {} ({:?})", method, path, status, duration);

            response
        })
    }
}
