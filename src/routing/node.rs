//! Trie node: insertion and matching.
//!
//! # Responsibilities
//! - Store literal children keyed by exact token (separators included)
//! - Store at most one named-parameter child
//! - Hold the exact and wildcard handlers for this position
//! - Resolve a tokenized path to the best handler in one pass
//!
//! # Matching Precedence
//! ```text
//! literal child   >  named child          (same node, same token)
//! exact handler   >  any wildcard         (full traversal only)
//! deeper wildcard >  shallower wildcard   (along the walked path)
//! ```
//!
//! # Design Decisions
//! - Iterative descent with an explicit current node, no recursion
//! - No backtracking: a dead end falls back to the last wildcard seen
//! - Parameters are bound as a side effect of descent and are not rolled back

use std::collections::HashMap;
use std::fmt;

use crate::routing::params::ParamBinder;
use crate::routing::tokenizer::{self, Tokens};

/// A named-parameter child and the name it binds.
#[derive(Clone)]
struct NamedChild<H> {
    name: String,
    node: Node<H>,
}

/// One position in a method's routing trie.
#[derive(Clone)]
pub struct Node<H> {
    literal_children: HashMap<String, Node<H>>,
    named_child: Option<Box<NamedChild<H>>>,
    exact_handler: Option<H>,
    wildcard_handler: Option<H>,
}

impl<H> Default for Node<H> {
    fn default() -> Self {
        Self {
            literal_children: HashMap::new(),
            named_child: None,
            exact_handler: None,
            wildcard_handler: None,
        }
    }
}

impl<H> Node<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `handler` at the node reached by walking `tokens`, creating
    /// nodes as needed. Overwrites whatever handler occupied the same slot.
    pub fn insert(&mut self, tokens: &Tokens<'_>, handler: H) {
        let mut current = self;

        for token in tokens.iter() {
            current = match tokenizer::param_name(token) {
                Some(name) => {
                    let named = current.named_child.get_or_insert_with(|| {
                        Box::new(NamedChild {
                            name: String::new(),
                            node: Node::new(),
                        })
                    });
                    if named.name != name {
                        if !named.name.is_empty() {
                            tracing::debug!(
                                previous = %named.name,
                                name = %name,
                                "Named parameter renamed by later registration"
                            );
                        }
                        named.name = name.to_string();
                    }
                    &mut named.node
                }
                None => current
                    .literal_children
                    .entry(token.to_string())
                    .or_default(),
            };
        }

        if tokens.wildcard {
            current.wildcard_handler = Some(handler);
        } else {
            current.exact_handler = Some(handler);
        }
    }

    /// Resolve `tokens` against this subtree.
    ///
    /// Named parameters are written to `binder` while descending, including
    /// on walks that end up falling back to a shallower wildcard.
    pub fn lookup<'n, B>(&'n self, tokens: &Tokens<'_>, binder: &mut B) -> Option<&'n H>
    where
        B: ParamBinder + ?Sized,
    {
        let mut current = self;
        let mut last_wildcard = None;
        let mut consumed_all = true;

        for token in tokens.iter() {
            if let Some(child) = current.literal_children.get(token) {
                current = child;
            } else if let Some(named) = current
                .named_child
                .as_deref()
                .filter(|_| !tokenizer::is_separator(token))
            {
                binder.bind(&named.name, token);
                current = &named.node;
            } else {
                consumed_all = false;
                break;
            }

            if current.wildcard_handler.is_some() {
                last_wildcard = current.wildcard_handler.as_ref();
            }
        }

        if consumed_all {
            if let Some(handler) = current.exact_handler.as_ref() {
                return Some(handler);
            }
        }
        last_wildcard
    }

    /// True if no route terminates in this subtree.
    pub fn is_empty(&self) -> bool {
        self.exact_handler.is_none()
            && self.wildcard_handler.is_none()
            && self.named_child.is_none()
            && self.literal_children.is_empty()
    }

    /// Number of handlers installed in this subtree.
    pub fn handler_count(&self) -> usize {
        let own = usize::from(self.exact_handler.is_some())
            + usize::from(self.wildcard_handler.is_some());
        let literals: usize = self.literal_children.values().map(Node::handler_count).sum();
        let named = self
            .named_child
            .as_ref()
            .map_or(0, |named| named.node.handler_count());
        own + literals + named
    }
}

impl<H> fmt::Debug for Node<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut literals: Vec<_> = self.literal_children.iter().collect();
        literals.sort_by(|a, b| a.0.cmp(b.0));

        let mut s = f.debug_struct("Node");
        s.field("exact", &self.exact_handler.is_some())
            .field("wildcard", &self.wildcard_handler.is_some());
        if let Some(named) = &self.named_child {
            s.field("named", &format_args!(":{} {:?}", named.name, named.node));
        }
        if !literals.is_empty() {
            s.field("literals", &literals);
        }
        s.finish()
    }
}
