//! The routing trie.
//!
//! Routes live in a tree of nodes keyed by path segment. Each node maps
//! literal segment text to an owned child and holds at most one dynamic
//! child for `:param` segments, stored in its own slot so literal segments
//! can never collide with it.

use std::collections::HashMap;

use crate::parser::Method;
use crate::router::error::Error;
use crate::router::handler::HandlerFn;

/// One path-segment boundary in the routing tree.
#[derive(Default)]
pub(crate) struct Node {
    /// Literal segment text to owned child node.
    children: HashMap<String, Node>,
    /// The child reserved for `:param` segments, if any.
    dynamic: Option<Box<Node>>,
    /// Parameter name recorded when the dynamic child is first created.
    /// Fixed for the lifetime of the node.
    param_name: Option<String>,
    /// Terminal handlers keyed by HTTP method. Empty on intermediate nodes.
    handlers: HashMap<Method, HandlerFn>,
}

impl Node {
    /// Insert a handler at the end of `segments`, creating nodes as needed.
    ///
    /// Re-registering the same method at the same path overwrites the
    /// previous handler (last registration wins). A `:param` segment whose
    /// name differs from the one already recorded at the same position is
    /// rejected.
    pub(crate) fn insert(
        &mut self,
        method: Method,
        segments: &[&str],
        handler: HandlerFn,
    ) -> Result<(), Error> {
        let Some((segment, rest)) = segments.split_first() else {
            // Last registration wins
            self.handlers.insert(method, handler);
            return Ok(());
        };

        if let Some(name) = segment.strip_prefix(':') {
            match self.param_name.as_deref() {
                Some(existing) if existing != name => {
                    return Err(Error::ConflictingParamName {
                        existing: existing.to_string(),
                        requested: name.to_string(),
                    });
                }
                Some(_) => {}
                None => self.param_name = Some(name.to_string()),
            }
            self.dynamic
                .get_or_insert_with(Box::default)
                .insert(method, rest, handler)
        } else {
            self.children
                .entry((*segment).to_string())
                .or_default()
                .insert(method, rest, handler)
        }
    }

    /// Look up the handler registered for `method` at the end of `segments`.
    ///
    /// At every level an exact literal child wins over the dynamic child,
    /// and once a literal child is taken there is no backtracking into the
    /// dynamic child. Captured parameter values are recorded into `params`.
    /// A method miss and a path miss both come back as `None`.
    pub(crate) fn search(
        &self,
        method: Method,
        segments: &[&str],
        params: &mut HashMap<String, String>,
    ) -> Option<HandlerFn> {
        let Some((segment, rest)) = segments.split_first() else {
            return self.handlers.get(&method).cloned();
        };

        if let Some(child) = self.children.get(*segment) {
            return child.search(method, rest, params);
        }

        match (&self.dynamic, &self.param_name) {
            (Some(child), Some(name)) => {
                params.insert(name.clone(), (*segment).to_string());
                child.search(method, rest, params)
            }
            _ => None,
        }
    }

    /// Collect every registered (method, path) pair under this node.
    pub(crate) fn collect_routes(
        &self,
        segments: &mut Vec<String>,
        out: &mut Vec<(Method, String)>,
    ) {
        for method in self.handlers.keys() {
            out.push((*method, segments.join("/")));
        }
        for (segment, child) in &self.children {
            segments.push(segment.clone());
            child.collect_routes(segments, out);
            segments.pop();
        }
        if let (Some(child), Some(name)) = (&self.dynamic, &self.param_name) {
            segments.push(format!(":{name}"));
            child.collect_routes(segments, out);
            segments.pop();
        }
    }
}

/// Split a path into the segment list both registration and lookup walk.
///
/// The empty path is treated as `/` and a missing leading slash gets one
/// prepended, so both sides always agree on the segment list. Empty
/// segments are real segments: `/a//b` and `/a/b` are distinct routes,
/// and a trailing slash is significant.
pub(crate) fn split_path(path: &str) -> Vec<&str> {
    let path = if path.is_empty() { "/" } else { path };
    let relative = path.strip_prefix('/').unwrap_or(path);
    std::iter::once("").chain(relative.split('/')).collect()
}
