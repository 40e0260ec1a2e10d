//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration:
//!     (method, pattern, handler)
//!     → tokenizer.rs (split into "/" and segment tokens)
//!     → node.rs (walk/create trie nodes, install handler)
//!     → router.rs (one trie root per method)
//!
//! Dispatch:
//!     (method, path)
//!     → router.rs (pick method root)
//!     → tokenizer.rs
//!     → node.rs (single-pass descent, bind params)
//!     → Return: handler + Params, or None
//! ```
//!
//! # Design Decisions
//! - Literal segments beat named parameters at the same position
//! - Full exact match beats wildcards; deepest wildcard beats shallower ones
//! - No regex, no backtracking: matching is O(tokens)
//! - Built tables are immutable; late registration goes through `SharedRouter`

pub mod error;
pub mod node;
pub mod params;
pub mod router;
pub mod shared;
pub mod tokenizer;

pub use error::RouteError;
pub use params::{ParamBinder, Params};
pub use router::{Match, Router};
pub use shared::SharedRouter;
pub use tokenizer::{tokenize, Tokens};
