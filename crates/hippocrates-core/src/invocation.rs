//! Outbound client invocation.
//!
//! An [`OutboundInvocation`] is the client-side mirror of an
//! [`IncomingRequest`](crate::IncomingRequest): a verb plus a relative
//! request target, ready to be handed to whatever transport performs I/O.

use http::Method;
use url::Url;

use crate::{HippocratesError, HippocratesResult};

/// A built client call.
///
/// # Example
///
/// ```
/// use hippocrates_core::{OutboundInvocation, Url};
/// use http::Method;
///
/// let invocation = OutboundInvocation::get("Patient/123/_history")
///     .with_query("_count", "10");
///
/// assert_eq!(invocation.method(), &Method::GET);
/// assert_eq!(invocation.path(), "Patient/123/_history");
/// assert_eq!(invocation.target().unwrap(), "Patient/123/_history?_count=10");
///
/// let base = Url::parse("http://fhir.example.com/base/").unwrap();
/// assert_eq!(
///     invocation.url(&base).unwrap().as_str(),
///     "http://fhir.example.com/base/Patient/123/_history?_count=10"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundInvocation {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
}

impl OutboundInvocation {
    /// Creates a safe, body-less GET invocation for `path`.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            query: Vec::new(),
        }
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Returns the HTTP verb.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the relative path, without query string.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the query parameters in emission order.
    #[must_use]
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Returns true if the invocation carries a request body.
    ///
    /// Every invocation built by this engine is a safe read.
    #[must_use]
    pub fn has_body(&self) -> bool {
        false
    }

    /// Returns the relative request target (path plus encoded query).
    ///
    /// # Errors
    ///
    /// Returns an internal error if the query cannot be encoded.
    pub fn target(&self) -> HippocratesResult<String> {
        if self.query.is_empty() {
            return Ok(self.path.clone());
        }
        let encoded = serde_urlencoded::to_string(&self.query)
            .map_err(|e| HippocratesError::internal_with_source("failed to encode query", e))?;
        Ok(format!("{}?{}", self.path, encoded))
    }

    /// Resolves this invocation against the server base URL.
    ///
    /// The base is treated as a directory whether or not its path ends in
    /// `/`, so `http://host/fhir` and `http://host/fhir/` resolve alike.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the query cannot be encoded or the target
    /// does not resolve against `base`.
    pub fn url(&self, base: &Url) -> HippocratesResult<Url> {
        let target = self.target()?;

        let mut base = base.clone();
        let directory = format!("{}/", base.path().trim_end_matches('/'));
        base.set_path(&directory);

        base.join(&target).map_err(|e| {
            HippocratesError::internal_with_source(format!("failed to resolve {target}"), e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_has_no_body() {
        let invocation = OutboundInvocation::get("_history");
        assert_eq!(invocation.method(), &Method::GET);
        assert!(!invocation.has_body());
        assert!(invocation.query().is_empty());
    }

    #[test]
    fn test_target_without_query() {
        let invocation = OutboundInvocation::get("Patient/_history");
        assert_eq!(invocation.target().unwrap(), "Patient/_history");
    }

    #[test]
    fn test_target_encodes_query() {
        let invocation =
            OutboundInvocation::get("_history").with_query("_since", "2014-01-01T00:00:00+01:00");
        assert_eq!(
            invocation.target().unwrap(),
            "_history?_since=2014-01-01T00%3A00%3A00%2B01%3A00"
        );
    }

    #[test]
    fn test_url_joins_base_as_directory() {
        let invocation = OutboundInvocation::get("Patient/1/_history");

        for base in [
            "http://localhost:8080/fhir",
            "http://localhost:8080/fhir/",
            "http://localhost:8080/fhir//",
        ] {
            let base = Url::parse(base).unwrap();
            assert_eq!(
                invocation.url(&base).unwrap().as_str(),
                "http://localhost:8080/fhir/Patient/1/_history"
            );
        }

        let root = Url::parse("https://fhir.example.org").unwrap();
        assert_eq!(
            invocation.url(&root).unwrap().as_str(),
            "https://fhir.example.org/Patient/1/_history"
        );
    }

    #[test]
    fn test_url_keeps_encoded_segments() {
        let invocation = OutboundInvocation::get("Patient/a%2Fb/_history").with_query("_count", "1");
        let base = Url::parse("http://localhost/fhir").unwrap();
        let url = invocation.url(&base).unwrap();

        assert_eq!(url.path(), "/fhir/Patient/a%2Fb/_history");
        assert_eq!(url.query(), Some("_count=1"));
    }
}
