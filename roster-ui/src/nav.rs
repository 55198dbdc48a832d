//! Navigation values: fragments, navigation state, and per-view scopes.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A parsed location fragment: `route` or `route?key=value&...`.
///
/// The route name is everything before the first `?`; a leading `#` is
/// tolerated so raw `location.hash`-style strings parse unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Fragment {
    pub route: String,
    pub query: Vec<(String, String)>,
}

impl Fragment {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('#').unwrap_or(raw);
        let (route, query) = match raw.split_once('?') {
            Some((route, query)) => (route, Some(query)),
            None => (raw, None),
        };
        let query = query
            .map(|q| {
                q.split('&')
                    .filter(|pair| !pair.is_empty())
                    .map(|pair| match pair.split_once('=') {
                        Some((key, value)) => (key.to_string(), value.to_string()),
                        None => (pair.to_string(), String::new()),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self {
            route: route.to_string(),
            query,
        }
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// The record-selecting `id` parameter. An empty value counts as absent.
    pub fn id_param(&self) -> Option<&str> {
        self.param("id").filter(|v| !v.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.route.is_empty() && self.query.is_empty()
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.route)?;
        for (i, (key, value)) in self.query.iter().enumerate() {
            write!(f, "{}{key}={value}", if i == 0 { '?' } else { '&' })?;
        }
        Ok(())
    }
}

/// The current navigation position. The router is the sole writer; everyone
/// else reads.
#[derive(Debug, Clone, Default)]
pub struct NavigationState {
    current: Fragment,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &Fragment {
        &self.current
    }

    pub(crate) fn set(&mut self, fragment: Fragment) {
        self.current = fragment;
    }
}

/// Cancellation scope tied to one navigation lifetime.
///
/// The router cancels the previous scope on every transition. Async work
/// must re-check its scope after I/O, before applying results to shared
/// state: a completion that lands after navigation is inert.
#[derive(Debug, Clone, Default)]
pub struct NavScope {
    cancelled: Arc<AtomicBool>,
}

impl NavScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_route() {
        let fragment = Fragment::parse("list");
        assert_eq!(fragment.route, "list");
        assert!(fragment.query.is_empty());
    }

    #[test]
    fn strips_leading_hash() {
        assert_eq!(Fragment::parse("#form").route, "form");
    }

    #[test]
    fn splits_route_from_query_at_first_question_mark() {
        let fragment = Fragment::parse("#form?id=E1");
        assert_eq!(fragment.route, "form");
        assert_eq!(fragment.id_param(), Some("E1"));
    }

    #[test]
    fn empty_id_value_counts_as_absent() {
        let fragment = Fragment::parse("form?id=");
        assert_eq!(fragment.param("id"), Some(""));
        assert_eq!(fragment.id_param(), None);
    }

    #[test]
    fn keeps_extra_query_pairs() {
        let fragment = Fragment::parse("form?id=E1&from=list");
        assert_eq!(fragment.id_param(), Some("E1"));
        assert_eq!(fragment.param("from"), Some("list"));
    }

    #[test]
    fn empty_fragment_is_empty() {
        assert!(Fragment::parse("").is_empty());
        assert!(!Fragment::parse("list").is_empty());
    }

    #[test]
    fn display_round_trips() {
        for raw in ["list", "form?id=E1", "form?id=E1&from=list"] {
            assert_eq!(Fragment::parse(raw).to_string(), raw);
        }
    }

    #[test]
    fn nav_scope_cancel_is_visible_through_clones() {
        let scope = NavScope::new();
        let handle = scope.clone();
        assert!(!handle.is_cancelled());
        scope.cancel();
        assert!(handle.is_cancelled());
    }
}
