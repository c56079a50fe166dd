//! Incoming HTTP request type.

use std::collections::HashMap;

use http::{Extensions, Uri};

/// A routed request: its URI, matched path parameters and the router's state.
///
/// Every endpoint of the API is addressed by path and query string alone, so
/// request bodies and headers are not carried.
#[derive(Debug)]
pub struct Request {
    pub(crate) uri: Uri,
    pub(crate) params: HashMap<String, String>,
    pub(crate) state: Extensions,
}

impl Request {
    pub(crate) fn new(uri: Uri, params: HashMap<String, String>, state: Extensions) -> Self {
        Self { uri, params, state }
    }

    pub fn path(&self) -> &str { self.uri.path() }

    /// Returns a named path parameter, percent-decoded.
    ///
    /// For a route `/activities/{activity_name}/signup`,
    /// `req.param("activity_name")` on `/activities/Chess%20Club/signup`
    /// returns `Some("Chess Club")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Returns the first query parameter named `key`, form-decoded
    /// (`%40` → `@`, `+` → space).
    pub fn query(&self, key: &str) -> Option<String> {
        let query = self.uri.query()?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    /// Returns the shared state of type `T` attached with
    /// [`Router::with_state`](crate::Router::with_state).
    pub fn state<T: Send + Sync + 'static>(&self) -> Option<&T> {
        self.state.get::<T>()
    }
}
