//! Named call arguments.

use chrono::{DateTime, FixedOffset};

/// Parameter values for one call, keyed by role rather than position.
///
/// On the server side the extractor fills these from an
/// [`IncomingRequest`](crate::IncomingRequest); on the client side the caller
/// fills them and the invocation builder turns them into a path and query.
/// Every slot is an explicit `Option`: `None` means "not supplied", which is
/// distinct from a supplied zero count.
///
/// # Example
///
/// ```
/// use hippocrates_core::CallArguments;
///
/// let args = CallArguments::new().with_id("123").with_count(0);
/// assert_eq!(args.id(), Some("123"));
/// assert_eq!(args.count(), Some(0));
/// assert_eq!(args.since(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallArguments {
    id: Option<String>,
    version: Option<String>,
    since: Option<DateTime<FixedOffset>>,
    count: Option<u32>,
}

impl CallArguments {
    /// Creates an argument set with every slot unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the resource id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Sets the version id.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the since-timestamp.
    #[must_use]
    pub fn with_since(mut self, since: DateTime<FixedOffset>) -> Self {
        self.since = Some(since);
        self
    }

    /// Sets the count-limit.
    #[must_use]
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Returns the resource id.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Returns the version id.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Returns the since-timestamp.
    #[must_use]
    pub fn since(&self) -> Option<DateTime<FixedOffset>> {
        self.since
    }

    /// Returns the count-limit.
    #[must_use]
    pub fn count(&self) -> Option<u32> {
        self.count
    }
}
