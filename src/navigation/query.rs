//! Query-string state: parsing, patching, and the page's URL-state binder.

use crate::navigation::{HistoryMode, Navigator, CURRENT_PATH};
use std::collections::BTreeMap;
use std::fmt;
use url::form_urlencoded;

pub const NAMESPACE_PARAM: &str = "namespace";
pub const NEW_PARAM: &str = "new";

/// Query edits: `Some` sets a parameter, `None` removes it.
pub type QueryPatch = BTreeMap<String, Option<String>>;

/// Ordered, form-urlencoded query parameters. Keys are unique; setting an
/// existing key keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// Parse `a=1&b=2`, with or without a leading `?`.
    pub fn parse(query: &str) -> Self {
        let mut params = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            params.set(&key, &value);
        }
        params
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn set(&mut self, key: &str, value: &str) {
        match self.0.iter_mut().find(|(k, _)| k == key) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.0.push((key.to_string(), value.to_string())),
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.0.retain(|(k, _)| k != key);
    }

    pub fn apply(&mut self, patch: &QueryPatch) {
        for (key, value) in patch {
            match value {
                Some(value) => self.set(key, value),
                None => self.remove(key),
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.0.iter())
            .finish();
        f.write_str(&encoded)
    }
}

/// A route plus its query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub query: QueryParams,
}

impl Location {
    /// Split `path?query`.
    pub fn parse(url: &str) -> Self {
        let (path, query) = url.split_once('?').unwrap_or((url, ""));
        Self {
            path: path.to_string(),
            query: QueryParams::parse(query),
        }
    }

    /// Resolve a navigation against this location.
    pub fn navigate(&self, path: &str, patch: &QueryPatch) -> Self {
        let mut next = if path == CURRENT_PATH {
            self.clone()
        } else {
            Location::parse(path)
        };
        next.query.apply(patch);
        next
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.query.is_empty() {
            write!(f, "{}", self.path)
        } else {
            write!(f, "{}?{}", self.path, self.query)
        }
    }
}

/// Reads and writes the `namespace` and `new` parameters. Every getter goes to
/// the navigator, so back/forward changes are always picked up.
pub struct UrlState<'a> {
    nav: &'a dyn Navigator,
}

impl<'a> UrlState<'a> {
    pub fn new(nav: &'a dyn Navigator) -> Self {
        Self { nav }
    }

    /// Namespace filter; empty means all namespaces.
    pub fn namespace(&self) -> String {
        self.nav
            .location()
            .query
            .get(NAMESPACE_PARAM)
            .unwrap_or_default()
            .to_string()
    }

    /// Replace the namespace filter without adding a history entry.
    pub fn set_namespace(&self, namespace: &str) {
        let value = (!namespace.is_empty()).then(|| namespace.to_string());
        self.nav
            .goto(CURRENT_PATH, &patch(NAMESPACE_PARAM, value), HistoryMode::Replace);
    }

    /// The create panel's seed document. `None` when `new` is missing, is not
    /// JSON, or is JSON `null`.
    pub fn draft_input(&self) -> Option<serde_json::Value> {
        let raw = self.nav.location().query.get(NEW_PARAM)?.to_string();
        match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(serde_json::Value::Null) => None,
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!("Ignoring unparseable draft parameter: {}", e);
                None
            }
        }
    }

    pub fn open_create_panel(&self) {
        self.nav.goto(
            CURRENT_PATH,
            &patch(NEW_PARAM, Some("{}".to_string())),
            HistoryMode::Push,
        );
    }

    pub fn close_create_panel(&self) {
        self.nav
            .goto(CURRENT_PATH, &patch(NEW_PARAM, None), HistoryMode::Push);
    }
}

fn patch(key: &str, value: Option<String>) -> QueryPatch {
    QueryPatch::from([(key.to_string(), value)])
}
