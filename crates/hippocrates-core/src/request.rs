//! Incoming request representation.
//!
//! The transport layer hands the engine an [`IncomingRequest`]: the parsed
//! operation, resource coordinates and query parameters of one call. A
//! request is owned by exactly one dispatch and its parameter map is consumed
//! as parameter slots are extracted.

use indexmap::IndexMap;

use crate::wire;
use crate::{HippocratesError, HippocratesResult};

/// Query parameters of a request, in wire order.
///
/// Each name maps to the ordered list of values it was given. Extraction is
/// destructive: [`QueryParameters::remove`] takes a parameter out so that the
/// remaining, unrecognized parameters are left for other consumers.
///
/// # Example
///
/// ```
/// use hippocrates_core::QueryParameters;
///
/// let mut params = QueryParameters::parse("_count=10&_count=20&name=smith").unwrap();
/// assert_eq!(params.first("_count"), Some("10"));
///
/// let counts = params.remove("_count").unwrap();
/// assert_eq!(counts, vec!["10".to_string(), "20".to_string()]);
/// assert!(!params.contains("_count"));
/// assert_eq!(params.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParameters {
    inner: IndexMap<String, Vec<String>>,
}

impl QueryParameters {
    /// Creates an empty parameter map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a URL-encoded query string (without the leading `?`).
    ///
    /// # Errors
    ///
    /// Returns an invalid request error if the query string is not valid
    /// `application/x-www-form-urlencoded` data.
    pub fn parse(query: &str) -> HippocratesResult<Self> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query).map_err(|e| {
            HippocratesError::invalid_request(format!("malformed query string: {e}"))
        })?;
        Ok(pairs.into_iter().collect())
    }

    /// Appends a value for `name`.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.inner.entry(name.into()).or_default().push(value.into());
    }

    /// Returns all values for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.inner.get(name).map(Vec::as_slice)
    }

    /// Returns the first value for `name`.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(<[String]>::first).map(String::as_str)
    }

    /// Removes `name` and returns its values, preserving the order of the
    /// remaining parameters.
    pub fn remove(&mut self, name: &str) -> Option<Vec<String>> {
        self.inner.shift_remove(name)
    }

    /// Returns true if `name` is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.inner.contains_key(name)
    }

    /// Returns the number of distinct parameter names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns an iterator over names and their values.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl FromIterator<(String, String)> for QueryParameters {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.push(name, value);
        }
        params
    }
}

/// A request as seen by the matcher and extractor.
///
/// # Example
///
/// ```
/// use hippocrates_core::IncomingRequest;
///
/// let request = IncomingRequest::parse("Patient/123/_history?_count=5").unwrap();
/// assert_eq!(request.operation(), Some("_history"));
/// assert_eq!(request.resource_name(), Some("Patient"));
/// assert_eq!(request.resource_id(), Some("123"));
/// assert_eq!(request.resource_version(), None);
/// assert_eq!(request.parameters().first("_count"), Some("5"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncomingRequest {
    operation: Option<String>,
    resource_name: Option<String>,
    resource_id: Option<String>,
    resource_version: Option<String>,
    parameters: QueryParameters,
}

impl IncomingRequest {
    /// Creates an empty request (no operation, no resource, no parameters).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the operation name.
    #[must_use]
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Sets the resource name.
    #[must_use]
    pub fn with_resource_name(mut self, name: impl Into<String>) -> Self {
        self.resource_name = Some(name.into());
        self
    }

    /// Sets the resource id.
    #[must_use]
    pub fn with_resource_id(mut self, id: impl Into<String>) -> Self {
        self.resource_id = Some(id.into());
        self
    }

    /// Sets the resource version.
    #[must_use]
    pub fn with_resource_version(mut self, version: impl Into<String>) -> Self {
        self.resource_version = Some(version.into());
        self
    }

    /// Appends a query parameter value.
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.push(name, value);
        self
    }

    /// Replaces the query parameters.
    #[must_use]
    pub fn with_parameters(mut self, parameters: QueryParameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// Parses a relative request target such as `Patient/123/_history?_count=10`.
    ///
    /// Recognized shapes, where an operation is any segment starting with
    /// `_` or `$`. Other segments are percent-decoded after the shape is
    /// recognized, so an encoded `/` or `?` stays inside its segment.
    ///
    /// | path | fields set |
    /// |---|---|
    /// | `op` | operation |
    /// | `Type` | resource name |
    /// | `Type/op` | resource name, operation |
    /// | `Type/id` | resource name, id |
    /// | `Type/id/op` | resource name, id, operation |
    /// | `Type/id/_history/vid` | resource name, id, operation, version |
    ///
    /// # Errors
    ///
    /// Returns an invalid request error for any other path shape or for a
    /// malformed query string.
    pub fn parse(target: &str) -> HippocratesResult<Self> {
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (target, None),
        };

        let segments: Vec<&str> = path
            .split(wire::SEPARATOR)
            .filter(|s| !s.is_empty())
            .collect();

        let mut request = Self::new();
        match segments.as_slice() {
            [] => {}
            [op] if is_operation(op) => {
                request.operation = Some((*op).to_string());
            }
            [name] => {
                request.resource_name = Some(decode(name)?);
            }
            [name, op] if is_operation(op) => {
                request.resource_name = Some(decode(name)?);
                request.operation = Some((*op).to_string());
            }
            [name, id] => {
                request.resource_name = Some(decode(name)?);
                request.resource_id = Some(decode(id)?);
            }
            [name, id, op] if is_operation(op) => {
                request.resource_name = Some(decode(name)?);
                request.resource_id = Some(decode(id)?);
                request.operation = Some((*op).to_string());
            }
            [name, id, op, version] if *op == wire::HISTORY => {
                request.resource_name = Some(decode(name)?);
                request.resource_id = Some(decode(id)?);
                request.operation = Some((*op).to_string());
                request.resource_version = Some(decode(version)?);
            }
            _ => {
                return Err(HippocratesError::invalid_request(format!(
                    "unrecognized request path: {path}"
                )))
            }
        }

        if let Some(query) = query {
            request.parameters = QueryParameters::parse(query)?;
        }

        Ok(request)
    }

    /// Returns the operation name.
    #[must_use]
    pub fn operation(&self) -> Option<&str> {
        self.operation.as_deref()
    }

    /// Returns the resource name.
    #[must_use]
    pub fn resource_name(&self) -> Option<&str> {
        self.resource_name.as_deref()
    }

    /// Returns the resource id.
    #[must_use]
    pub fn resource_id(&self) -> Option<&str> {
        self.resource_id.as_deref()
    }

    /// Returns the resource version.
    #[must_use]
    pub fn resource_version(&self) -> Option<&str> {
        self.resource_version.as_deref()
    }

    /// Returns true if the request carries a non-blank resource id.
    #[must_use]
    pub fn has_resource_id(&self) -> bool {
        !wire::is_blank(self.resource_id.as_deref())
    }

    /// Returns true if the request carries a non-blank resource version.
    ///
    /// A present but empty or whitespace-only version counts as absent.
    #[must_use]
    pub fn has_resource_version(&self) -> bool {
        !wire::is_blank(self.resource_version.as_deref())
    }

    /// Returns the query parameters.
    #[must_use]
    pub fn parameters(&self) -> &QueryParameters {
        &self.parameters
    }

    /// Returns a mutable reference to the query parameters.
    pub fn parameters_mut(&mut self) -> &mut QueryParameters {
        &mut self.parameters
    }
}

fn is_operation(segment: &str) -> bool {
    segment.starts_with('_') || segment.starts_with('$')
}

fn decode(segment: &str) -> HippocratesResult<String> {
    wire::decode_segment(segment)
        .map(|decoded| decoded.into_owned())
        .ok_or_else(|| {
            HippocratesError::invalid_request(format!("path segment is not valid UTF-8: {segment}"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_system_history() {
        let request = IncomingRequest::parse("_history").unwrap();
        assert_eq!(request.operation(), Some("_history"));
        assert_eq!(request.resource_name(), None);
        assert_eq!(request.resource_id(), None);
    }

    #[test]
    fn test_parse_type_history() {
        let request = IncomingRequest::parse("/Patient/_history").unwrap();
        assert_eq!(request.operation(), Some("_history"));
        assert_eq!(request.resource_name(), Some("Patient"));
        assert_eq!(request.resource_id(), None);
    }

    #[test]
    fn test_parse_read() {
        let request = IncomingRequest::parse("Patient/123").unwrap();
        assert_eq!(request.operation(), None);
        assert_eq!(request.resource_name(), Some("Patient"));
        assert_eq!(request.resource_id(), Some("123"));
    }

    #[test]
    fn test_parse_vread() {
        let request = IncomingRequest::parse("Patient/123/_history/2").unwrap();
        assert_eq!(request.operation(), Some("_history"));
        assert_eq!(request.resource_id(), Some("123"));
        assert_eq!(request.resource_version(), Some("2"));
    }

    #[test]
    fn test_parse_rejects_unknown_shape() {
        let err = IncomingRequest::parse("Patient/123/_history/2/extra").unwrap_err();
        assert!(err.category().is_client_error());

        assert!(IncomingRequest::parse("Patient/123/Observation/_history/1").is_err());
    }

    #[test]
    fn test_parse_query_parameters() {
        let request =
            IncomingRequest::parse("_history?_since=2014-01-01T00%3A00%3A00Z&_count=").unwrap();
        assert_eq!(
            request.parameters().first("_since"),
            Some("2014-01-01T00:00:00Z")
        );
        assert_eq!(request.parameters().first("_count"), Some(""));
    }

    #[test]
    fn test_empty_version_counts_as_absent() {
        let request = IncomingRequest::new()
            .with_resource_id("123")
            .with_resource_version("");
        assert!(request.has_resource_id());
        assert!(!request.has_resource_version());

        let request = IncomingRequest::new().with_resource_id("");
        assert!(!request.has_resource_id());
    }

    #[test]
    fn test_whitespace_id_and_version_count_as_absent() {
        let request = IncomingRequest::new()
            .with_resource_id("  ")
            .with_resource_version("\t");
        assert!(!request.has_resource_id());
        assert!(!request.has_resource_version());
    }

    #[test]
    fn test_parse_decodes_segments() {
        let request = IncomingRequest::parse("Patient/a%2Fb%3Fc/_history").unwrap();
        assert_eq!(request.resource_id(), Some("a/b?c"));
        assert_eq!(request.operation(), Some("_history"));

        let request = IncomingRequest::parse("Patient/%5Fhistory").unwrap();
        assert_eq!(request.operation(), None);
        assert_eq!(request.resource_id(), Some("_history"));

        let request = IncomingRequest::parse("Patient/1/_history/v%201").unwrap();
        assert_eq!(request.resource_version(), Some("v 1"));
    }

    #[test]
    fn test_parse_rejects_invalid_utf8_segment() {
        let err = IncomingRequest::parse("Patient/%FF/_history").unwrap_err();
        assert!(err.category().is_client_error());
    }

    #[test]
    fn test_query_parameters_remove_preserves_order() {
        let mut params = QueryParameters::parse("a=1&_count=2&b=3&c=4").unwrap();
        assert_eq!(params.remove("_count"), Some(vec!["2".to_string()]));

        let names: Vec<&str> = params.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(params.remove("_count"), None);
    }

    #[test]
    fn test_query_parameters_repeated_values() {
        let mut params = QueryParameters::new();
        params.push("_since", "2020-01-01T00:00:00Z");
        params.push("_since", "2021-01-01T00:00:00Z");

        assert_eq!(params.len(), 1);
        assert_eq!(params.get("_since").map(<[String]>::len), Some(2));
        assert_eq!(params.first("_since"), Some("2020-01-01T00:00:00Z"));
    }
}
