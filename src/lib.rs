//! A minimal trie-based HTTP router library.
//!
//! This library routes incoming HTTP requests to registered handlers by
//! walking a segment trie keyed on method and path, with support for
//! dynamic `:param` segments and globally registered middleware.
//!
//! # Features
//!
//! - Method + path routing over a segment trie
//! - Dynamic path parameters (`/users/:id`) delivered on the request
//! - Static segments always win over dynamic segments at the same level
//! - Middleware composed onto handlers at registration time
//! - Stock default and not-found handlers
//! - A small tokio TCP server to host the router
//!
//! # Examples
//!
//! ## Registering routes and middleware
//!
//! ```
//! use flyroute::{handler_fn, middleware_fn, HttpResponse, Router, StatusCode};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let router = Router::new();
//!
//!     // Middleware registered before a route wraps that route.
//!     router.use_middleware(middleware_fn(|inner| {
//!         handler_fn(move |req| {
//!             let inner = inner.clone();
//!             async move { inner(req).await }
//!         })
//!     })).await;
//!
//!     router.get("/hello/:name", handler_fn(|req| async move {
//!         let name = req.get_path_param("name").cloned().unwrap_or_default();
//!         Ok(HttpResponse::new(StatusCode::Ok)
//!             .with_content_type("text/plain")
//!             .with_body_string(format!("Hello, {name}!")))
//!     })).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Dispatching a request
//!
//! ```
//! use flyroute::{handler_fn, parse_request, HttpResponse, Router, StatusCode};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let router = Router::new();
//!     router.get("/ping", handler_fn(|_req| async {
//!         Ok(HttpResponse::new(StatusCode::Ok).with_body_string("pong"))
//!     })).await?;
//!
//!     let request = parse_request(b"GET /ping HTTP/1.1\r\nHost: example.com\r\n\r\n")?;
//!     let response = router.dispatch(request).await?;
//!     assert_eq!(response.status, StatusCode::Ok);
//!
//!     // Unregistered paths produce a 404 response, not an error.
//!     let request = parse_request(b"GET /missing HTTP/1.1\r\nHost: example.com\r\n\r\n")?;
//!     let response = router.dispatch(request).await?;
//!     assert_eq!(response.status, StatusCode::NotFound);
//!
//!     Ok(())
//! }
//! ```
//!
//! See the `demos` directory for complete examples, including a full HTTP
//! server built around the router.

// Export the parser module
pub mod parser;

// Export the router module
pub mod router;

// Export the server module
pub mod server;

// Re-export commonly used items for convenience
pub use parser::{Error as ParserError, HttpRequest, HttpVersion, Method, parse_request};
pub use router::{
    Error as RouterError, HandlerFn, HandlerFuture, Middleware, Router, default_handler,
    handler_fn, middleware_fn, not_found_handler,
};
pub use server::{Error as ServerError, HttpResponse, HttpServer, ServerConfig, StatusCode};
