//! Handler and middleware types.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::parser::HttpRequest;
use crate::server::{Error, HttpResponse, StatusCode};

/// Type alias for a boxed future that returns a Result<HttpResponse, Error>.
pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<HttpResponse, Error>> + Send>>;

/// Type alias for a handler function that takes an HttpRequest and returns a HandlerFuture.
pub type HandlerFn = Arc<dyn Fn(HttpRequest) -> HandlerFuture + Send + Sync>;

/// Type alias for a middleware: takes the inner handler, returns the handler that wraps it.
pub type Middleware = Arc<dyn Fn(HandlerFn) -> HandlerFn + Send + Sync>;

/// Wrap an async function into a [`HandlerFn`].
///
/// # Arguments
///
/// * `f` - An async function from request to response
///
/// # Returns
///
/// The function as a registerable handler value
pub fn handler_fn<F, Fut>(f: F) -> HandlerFn
where
    F: Fn(HttpRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<HttpResponse, Error>> + Send + 'static,
{
    Arc::new(move |req| Box::pin(f(req)))
}

/// Wrap a plain function into a [`Middleware`].
///
/// # Arguments
///
/// * `f` - A function from inner handler to wrapping handler
///
/// # Returns
///
/// The function as a registerable middleware value
pub fn middleware_fn<F>(f: F) -> Middleware
where
    F: Fn(HandlerFn) -> HandlerFn + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A stock handler that always answers 200 with a fixed welcome body.
pub fn default_handler() -> HandlerFn {
    handler_fn(|_req| async {
        Ok(HttpResponse::new(StatusCode::Ok)
            .with_content_type("text/plain")
            .with_body_string("Welcome to the go-fly route! This is the default handler."))
    })
}

/// A stock handler that always answers with a 404 response.
pub fn not_found_handler() -> HandlerFn {
    handler_fn(|_req| async {
        Ok(HttpResponse::new(StatusCode::NotFound)
            .with_content_type("text/plain")
            .with_body_string("404 page not found"))
    })
}
