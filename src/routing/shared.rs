//! Route table shared between dispatch and late registration.
//!
//! # Data Flow
//! ```text
//! handle()/replace()            snapshot()
//!     → lock writer mutex           → ArcSwap::load_full
//!     → clone current table         → read-only Router, no locking
//!     → insert
//!     → ArcSwap::store
//! ```
//!
//! # Design Decisions
//! - Copy-on-write: readers never observe a half-built trie
//! - Writers are serialized by a mutex; readers never take it
//! - A snapshot stays valid and unchanged for the whole request

use std::sync::{Arc, Mutex};

use arc_swap::ArcSwap;

use crate::routing::error::RouteError;
use crate::routing::params::ParamBinder;
use crate::routing::router::Router;

/// A [`Router`] that can be extended or replaced while requests are in flight.
pub struct SharedRouter<H> {
    current: ArcSwap<Router<H>>,
    writer: Mutex<()>,
}

impl<H: Clone> SharedRouter<H> {
    pub fn new(router: Router<H>) -> Self {
        Self {
            current: ArcSwap::from_pointee(router),
            writer: Mutex::new(()),
        }
    }

    /// Register a route and publish the updated table.
    ///
    /// On error the published table is left untouched.
    pub fn handle(
        &self,
        method: &str,
        pattern: &str,
        handler: impl Into<Option<H>>,
    ) -> Result<(), RouteError> {
        let _guard = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        let mut next = Router::clone(&self.current.load());
        next.handle(method, pattern, handler)?;
        self.current.store(Arc::new(next));
        Ok(())
    }

    /// Publish a completely new table, e.g. after a config reload.
    pub fn replace(&self, router: Router<H>) {
        let _guard = self.writer.lock().unwrap_or_else(|e| e.into_inner());
        self.current.store(Arc::new(router));
    }

    /// Current table. Later registrations are not visible through it.
    pub fn snapshot(&self) -> Arc<Router<H>> {
        self.current.load_full()
    }

    /// Resolve against the current table, returning an owned handler.
    pub fn lookup<B>(&self, method: &str, path: &str, binder: &mut B) -> Option<H>
    where
        B: ParamBinder + ?Sized,
    {
        self.current.load().lookup(method, path, binder).cloned()
    }
}

impl<H: Clone> Default for SharedRouter<H> {
    fn default() -> Self {
        Self::new(Router::new())
    }
}

impl<H: Clone> From<Router<H>> for SharedRouter<H> {
    fn from(router: Router<H>) -> Self {
        Self::new(router)
    }
}
