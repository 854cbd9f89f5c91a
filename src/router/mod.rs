//! Trie-based request routing.
//!
//! This module is the core of the crate: a segment trie mapping method and
//! path to handlers, a router that owns the trie together with the global
//! middleware list, and the stock default / not-found handlers.

mod error;
mod handler;
mod router;
mod trie;
mod tests;

// Re-export public items
pub use error::Error;
pub use handler::{
    HandlerFn, HandlerFuture, Middleware, default_handler, handler_fn, middleware_fn,
    not_found_handler,
};
pub use router::Router;
