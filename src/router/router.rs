//! The router: registration, middleware composition, and dispatch.

use std::collections::HashMap;

use log::debug;
use tokio::sync::RwLock;

use crate::parser::{HttpRequest, Method};
use crate::router::error::Error;
use crate::router::handler::{HandlerFn, Middleware, not_found_handler};
use crate::router::trie::{Node, split_path};
use crate::server::{Error as ServerError, HttpResponse};

/// A trie-backed HTTP router.
///
/// Routes are registered per method and path; a `:name` segment matches any
/// single segment and records the matched value as a path parameter on the
/// request. Middleware are composed onto a handler at registration time, so
/// middleware added later never affects already-registered routes.
///
/// The routing tree is guarded by a read-write lock: registration takes the
/// write lock, dispatch takes the read lock, so registering routes while
/// serving traffic is safe. No lock is held while a handler runs.
pub struct Router {
    /// The root of the routing tree.
    root: RwLock<Node>,
    /// Globally registered middleware, consulted once per registration.
    middlewares: RwLock<Vec<Middleware>>,
}

impl Router {
    /// Create a new router with an empty routing tree.
    pub fn new() -> Self {
        Self {
            root: RwLock::new(Node::default()),
            middlewares: RwLock::new(Vec::new()),
        }
    }

    /// Append a middleware to the router.
    ///
    /// Only routes registered after this call are wrapped by `middleware`;
    /// already-registered routes keep the stack they were composed with.
    pub async fn use_middleware(&self, middleware: Middleware) {
        self.middlewares.write().await.push(middleware);
    }

    /// Register `handler` for `method` at `path`.
    ///
    /// Every middleware registered so far is composed onto the handler,
    /// with the first-registered middleware as the outermost layer.
    /// Registering the same method and path again silently overwrites the
    /// previous handler (last registration wins). Registering a `:param`
    /// segment whose name differs from the one already present at the same
    /// position is rejected with [`Error::ConflictingParamName`].
    pub async fn handle(
        &self,
        method: Method,
        path: &str,
        handler: HandlerFn,
    ) -> Result<(), Error> {
        let handler = {
            let middlewares = self.middlewares.read().await;
            // Compose over the reversed list so the first-registered
            // middleware ends up outermost.
            middlewares
                .iter()
                .rev()
                .fold(handler, |inner, middleware| middleware(inner))
        };

        let segments = split_path(path);
        self.root.write().await.insert(method, &segments, handler)?;
        debug!("registered route: {method} {path}");
        Ok(())
    }

    /// Register a handler for GET requests at `path`.
    pub async fn get(&self, path: &str, handler: HandlerFn) -> Result<(), Error> {
        self.handle(Method::GET, path, handler).await
    }

    /// Register a handler for POST requests at `path`.
    pub async fn post(&self, path: &str, handler: HandlerFn) -> Result<(), Error> {
        self.handle(Method::POST, path, handler).await
    }

    /// Register a handler for PUT requests at `path`.
    pub async fn put(&self, path: &str, handler: HandlerFn) -> Result<(), Error> {
        self.handle(Method::PUT, path, handler).await
    }

    /// Register a handler for DELETE requests at `path`.
    pub async fn delete(&self, path: &str, handler: HandlerFn) -> Result<(), Error> {
        self.handle(Method::DELETE, path, handler).await
    }

    /// Register a handler for PATCH requests at `path`.
    pub async fn patch(&self, path: &str, handler: HandlerFn) -> Result<(), Error> {
        self.handle(Method::PATCH, path, handler).await
    }

    /// Register a handler for OPTIONS requests at `path`.
    pub async fn options(&self, path: &str, handler: HandlerFn) -> Result<(), Error> {
        self.handle(Method::OPTIONS, path, handler).await
    }

    /// Register a handler for HEAD requests at `path`.
    pub async fn head(&self, path: &str, handler: HandlerFn) -> Result<(), Error> {
        self.handle(Method::HEAD, path, handler).await
    }

    /// Register a handler for CONNECT requests at `path`.
    pub async fn connect(&self, path: &str, handler: HandlerFn) -> Result<(), Error> {
        self.handle(Method::CONNECT, path, handler).await
    }

    /// Register a handler for TRACE requests at `path`.
    pub async fn trace(&self, path: &str, handler: HandlerFn) -> Result<(), Error> {
        self.handle(Method::TRACE, path, handler).await
    }

    /// List every registered route as a (method, path) pair, sorted by
    /// path and then method.
    pub async fn routes(&self) -> Vec<(Method, String)> {
        let mut out = Vec::new();
        self.root
            .read()
            .await
            .collect_routes(&mut Vec::new(), &mut out);
        out.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)));
        out
    }

    /// Dispatch a request to the matching handler.
    ///
    /// Any query string is ignored for matching. The matched handler is
    /// invoked with the request carrying the path parameters captured by
    /// dynamic segments. When no route matches, the stock not-found handler
    /// produces a 404 response; an unsupported method on an existing path
    /// is not distinguished from an unknown path.
    pub async fn dispatch(&self, mut request: HttpRequest) -> Result<HttpResponse, ServerError> {
        let mut params = HashMap::new();
        let handler = {
            let root = self.root.read().await;
            let segments = split_path(request.route_path());
            root.search(request.method, &segments, &mut params)
        };

        match handler {
            Some(handler) => {
                request.path_params = params;
                handler(request).await
            }
            None => {
                debug!(
                    "no route for {method} {path}",
                    method = request.method,
                    path = request.path
                );
                not_found_handler()(request).await
            }
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
