//! Route table: registration and lookup per HTTP method.
//!
//! # Responsibilities
//! - Own one trie root per method string
//! - Validate and register `(method, pattern) → handler` bindings
//! - Resolve `(method, path)` to a handler plus bound parameters
//!
//! # Design Decisions
//! - Methods never share a trie
//! - Validation runs before any mutation, so a rejected call changes nothing
//! - `&mut self` for registration, `&self` for lookup: a built table can be
//!   shared through `Arc` and read in parallel without locks
//! - Unknown method and no match are the same outcome (`None`)

use std::collections::HashMap;

use crate::routing::error::RouteError;
use crate::routing::node::Node;
use crate::routing::params::{ParamBinder, Params};
use crate::routing::tokenizer::tokenize;

/// A resolved route: the selected handler and the parameters bound on the way.
#[derive(Debug)]
pub struct Match<'r, H> {
    pub handler: &'r H,
    pub params: Params,
}

/// Method-keyed routing table.
#[derive(Clone)]
pub struct Router<H> {
    roots: HashMap<String, Node<H>>,
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self {
            roots: HashMap::new(),
        }
    }
}

impl<H> Router<H> {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `method` and `pattern`.
    ///
    /// A pattern ending in `/` installs a wildcard handler that also serves
    /// any deeper unregistered path. Registering the same pattern again
    /// replaces the previous handler.
    ///
    /// ```
    /// use urlrouter::routing::Router;
    ///
    /// let mut router = Router::new();
    /// router.handle("GET", "/users/:id", "user").unwrap();
    ///
    /// let found = router.dispatch("GET", "/users/42").unwrap();
    /// assert_eq!(*found.handler, "user");
    /// assert_eq!(found.params.get("id"), Some("42"));
    /// ```
    pub fn handle(
        &mut self,
        method: &str,
        pattern: &str,
        handler: impl Into<Option<H>>,
    ) -> Result<(), RouteError> {
        if pattern.is_empty() {
            return Err(RouteError::InvalidPattern {
                method: method.to_string(),
            });
        }
        let Some(handler) = handler.into() else {
            return Err(RouteError::InvalidHandler {
                method: method.to_string(),
                pattern: pattern.to_string(),
            });
        };

        let tokens = tokenize(pattern);
        self.roots
            .entry(method.to_string())
            .or_default()
            .insert(&tokens, handler);

        tracing::debug!(
            method = %method,
            pattern = %pattern,
            wildcard = tokens.wildcard,
            "Route registered"
        );
        Ok(())
    }

    /// Resolve `path` for `method`, binding named parameters into `binder`.
    pub fn lookup<B>(&self, method: &str, path: &str, binder: &mut B) -> Option<&H>
    where
        B: ParamBinder + ?Sized,
    {
        let root = self.roots.get(method)?;
        root.lookup(&tokenize(path), binder)
    }

    /// Resolve `path` for `method` into a fresh parameter store.
    pub fn dispatch(&self, method: &str, path: &str) -> Option<Match<'_, H>> {
        let mut params = Params::new();
        let handler = self.lookup(method, path, &mut params)?;
        Some(Match { handler, params })
    }

    /// Methods that have at least one registered route.
    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.roots.keys().map(String::as_str)
    }

    /// Total number of installed handlers across all methods.
    pub fn len(&self) -> usize {
        self.roots.values().map(Node::handler_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.values().all(Node::is_empty)
    }
}

impl<H> std::fmt::Debug for Router<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.roots.iter()).finish()
    }
}
