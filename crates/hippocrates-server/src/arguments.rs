//! Positional handler arguments.
//!
//! Extraction works on named slots. Only at the invocation boundary are the
//! slots laid out at the argument positions the handler declared.

use chrono::{DateTime, FixedOffset};
use hippocrates_core::{CallArguments, HippocratesError, HippocratesResult};
use hippocrates_router::{OperationDescriptor, SlotRole};

/// A single coerced argument value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentValue {
    /// Resource id.
    Id(String),
    /// Version id.
    Version(String),
    /// Since-timestamp.
    Since(DateTime<FixedOffset>),
    /// Count-limit.
    Count(u32),
}

/// Handler arguments laid out in declared order.
///
/// Positions the engine does not fill, and optional slots that were not
/// supplied, hold `None`.
///
/// # Example
///
/// ```
/// use hippocrates_core::CallArguments;
/// use hippocrates_router::{HandlerBinding, SlotRole};
/// use hippocrates_server::PositionalArguments;
///
/// let descriptor = HandlerBinding::history("patientHistory")
///     .provider("Patient")
///     .unbound()
///     .slot(SlotRole::ResourceId)
///     .slot(SlotRole::Count)
///     .resolve()
///     .unwrap();
///
/// let args = PositionalArguments::resolve(&descriptor, CallArguments::new().with_id("123")).unwrap();
/// assert_eq!(args.len(), 3);
/// assert!(args.get(0).is_none());
/// assert_eq!(args.id(1), Some("123"));
/// assert_eq!(args.count(2), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionalArguments {
    values: Vec<Option<ArgumentValue>>,
}

impl PositionalArguments {
    /// Lays `args` out at the positions `descriptor` declares.
    ///
    /// # Errors
    ///
    /// Returns an internal error if a required slot has no value; the
    /// matcher and extractor guarantee that cannot happen for a request that
    /// went through them.
    pub fn resolve(
        descriptor: &OperationDescriptor,
        args: CallArguments,
    ) -> HippocratesResult<Self> {
        let mut values = vec![None; descriptor.arity()];

        for slot in descriptor.slots() {
            let value = match slot.role() {
                SlotRole::ResourceId => args.id().map(|id| ArgumentValue::Id(id.to_string())),
                SlotRole::VersionId => args
                    .version()
                    .map(|version| ArgumentValue::Version(version.to_string())),
                SlotRole::Since => args.since().map(ArgumentValue::Since),
                SlotRole::Count => args.count().map(ArgumentValue::Count),
            };

            if slot.required() && value.is_none() {
                return Err(HippocratesError::internal(format!(
                    "{} has no value for required {} argument at position {}",
                    descriptor.name(),
                    slot.role(),
                    slot.position()
                )));
            }
            values[slot.position()] = value;
        }

        Ok(Self { values })
    }

    /// Returns the number of argument positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the handler takes no arguments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the value at `position`.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&ArgumentValue> {
        self.values.get(position).and_then(Option::as_ref)
    }

    /// Returns the resource id at `position`.
    #[must_use]
    pub fn id(&self, position: usize) -> Option<&str> {
        match self.get(position) {
            Some(ArgumentValue::Id(id)) => Some(id),
            _ => None,
        }
    }

    /// Returns the version id at `position`.
    #[must_use]
    pub fn version(&self, position: usize) -> Option<&str> {
        match self.get(position) {
            Some(ArgumentValue::Version(version)) => Some(version),
            _ => None,
        }
    }

    /// Returns the since-timestamp at `position`.
    #[must_use]
    pub fn since(&self, position: usize) -> Option<DateTime<FixedOffset>> {
        match self.get(position) {
            Some(ArgumentValue::Since(since)) => Some(*since),
            _ => None,
        }
    }

    /// Returns the count-limit at `position`.
    #[must_use]
    pub fn count(&self, position: usize) -> Option<u32> {
        match self.get(position) {
            Some(ArgumentValue::Count(count)) => Some(*count),
            _ => None,
        }
    }
}
