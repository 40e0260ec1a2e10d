//! Request-scoped named parameters.
//!
//! The matcher writes through [`ParamBinder`] as it descends into named
//! children. [`Params`] is the store used by the HTTP layer; one instance per
//! request, never shared between dispatches.

/// Sink for name/value pairs bound during matching.
pub trait ParamBinder {
    /// Bind `value` under `name`, replacing any previous value for `name`.
    fn bind(&mut self, name: &str, value: &str);
}

/// Named path parameters for one request, in bind order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value bound under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl ParamBinder for Params {
    fn bind(&mut self, name: &str, value: &str) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => {
                v.clear();
                v.push_str(value);
            }
            None => self.entries.push((name.to_string(), value.to_string())),
        }
    }
}

impl ParamBinder for std::collections::HashMap<String, String> {
    fn bind(&mut self, name: &str, value: &str) {
        self.insert(name.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_bind_and_get() {
        let mut params = Params::new();
        assert!(params.is_empty());

        params.bind("name", "alice");
        params.bind("id", "42");

        assert_eq!(params.get("name"), Some("alice"));
        assert_eq!(params.get("id"), Some("42"));
        assert_eq!(params.get("missing"), None);
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_rebind_overwrites() {
        let mut params = Params::new();
        params.bind("name", "alice");
        params.bind("name", "bob");

        assert_eq!(params.get("name"), Some("bob"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_iter_preserves_bind_order() {
        let mut params = Params::new();
        params.bind("b", "2");
        params.bind("a", "1");

        let collected: Vec<_> = params.iter().collect();
        assert_eq!(collected, vec![("b", "2"), ("a", "1")]);
    }

    #[test]
    fn test_hashmap_binder() {
        let mut map = HashMap::new();
        map.bind("name", "alice");
        assert_eq!(map.get("name").map(String::as_str), Some("alice"));
    }
}
