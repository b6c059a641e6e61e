//! Operation descriptors.
//!
//! An [`OperationDescriptor`] is the immutable metadata of one bound
//! operation: which resource it targets, which interaction it implements,
//! and where each parameter role sits in the handler's argument list.
//! Descriptors are produced once by [`HandlerBinding::resolve`] and never
//! mutated afterwards.
//!
//! [`HandlerBinding::resolve`]: crate::HandlerBinding::resolve

use std::fmt;

use hippocrates_core::{wire, IncomingRequest};
use smallvec::SmallVec;

use crate::matcher::{self, Mismatch};

/// Maximum number of slots stored inline. There are only four roles.
const INLINE_SLOTS: usize = 4;

/// How far an operation reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Targets one identified resource.
    Instance,
    /// Targets a resource type, no specific id.
    Type,
    /// Targets the whole service, no resource type.
    System,
}

/// The category of operation a descriptor represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InteractionKind {
    /// History of one resource instance.
    HistoryInstance,
    /// History of every resource of one type.
    HistoryType,
    /// History of every resource on the server.
    HistorySystem,
    /// Current version of one resource instance.
    Read,
    /// A specific version of one resource instance.
    VRead,
}

impl InteractionKind {
    /// Returns the scope of this interaction.
    #[must_use]
    pub const fn scope(&self) -> Scope {
        match self {
            Self::HistoryInstance | Self::Read | Self::VRead => Scope::Instance,
            Self::HistoryType => Scope::Type,
            Self::HistorySystem => Scope::System,
        }
    }

    /// Returns the reserved operation marker requests of this kind carry.
    #[must_use]
    pub const fn operation_marker(&self) -> Option<&'static str> {
        match self {
            Self::HistoryInstance | Self::HistoryType | Self::HistorySystem | Self::VRead => {
                Some(wire::HISTORY)
            }
            Self::Read => None,
        }
    }

    /// Returns true if requests of this kind must target a specific version.
    ///
    /// Kinds that don't require a version forbid one.
    #[must_use]
    pub const fn requires_version(&self) -> bool {
        matches!(self, Self::VRead)
    }

    /// Returns the shape handlers of this kind produce.
    #[must_use]
    pub const fn return_shape(&self) -> ReturnShape {
        match self {
            Self::HistoryInstance | Self::HistoryType | Self::HistorySystem => ReturnShape::Bundle,
            Self::Read | Self::VRead => ReturnShape::Resource,
        }
    }

    /// Returns the stable name used in logs and metrics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::HistoryInstance => "history-instance",
            Self::HistoryType => "history-type",
            Self::HistorySystem => "history-system",
            Self::Read => "read",
            Self::VRead => "vread",
        }
    }
}

impl fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Role a handler argument plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotRole {
    /// Logical id of the target resource, taken from the request path.
    ResourceId,
    /// Version id of the target resource, taken from the request path.
    VersionId,
    /// Lower time bound, taken from the `_since` query parameter.
    Since,
    /// Maximum number of results, taken from the `_count` query parameter.
    Count,
}

impl SlotRole {
    /// Returns the query parameter carrying this role, if it comes from
    /// the query string.
    #[must_use]
    pub const fn query_parameter(&self) -> Option<&'static str> {
        match self {
            Self::Since => Some(wire::PARAM_SINCE),
            Self::Count => Some(wire::PARAM_COUNT),
            Self::ResourceId | Self::VersionId => None,
        }
    }

    /// Returns true if a value must always be supplied for this role.
    #[must_use]
    pub const fn is_required(&self) -> bool {
        matches!(self, Self::ResourceId | Self::VersionId)
    }

    /// Returns the role name used in error messages.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ResourceId => "resource-id",
            Self::VersionId => "version-id",
            Self::Since => "since-timestamp",
            Self::Count => "count-limit",
        }
    }
}

impl fmt::Display for SlotRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parameter role bound to a fixed handler argument position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterSlot {
    role: SlotRole,
    position: usize,
    required: bool,
}

impl ParameterSlot {
    /// Creates a slot for `role` at argument `position`.
    #[must_use]
    pub const fn new(role: SlotRole, position: usize) -> Self {
        Self {
            role,
            position,
            required: role.is_required(),
        }
    }

    /// Returns the slot's role.
    #[must_use]
    pub const fn role(&self) -> SlotRole {
        self.role
    }

    /// Returns the handler argument position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Returns true if a value must be supplied.
    #[must_use]
    pub const fn required(&self) -> bool {
        self.required
    }
}

/// Shape a handler's result is normalized into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnShape {
    /// Exactly one resource.
    Resource,
    /// An ordered list of resources (a bundle on the wire).
    Bundle,
}

/// Immutable metadata for one bound operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDescriptor {
    name: String,
    resource_name: Option<String>,
    interaction: InteractionKind,
    slots: SmallVec<[ParameterSlot; INLINE_SLOTS]>,
    arity: usize,
}

impl OperationDescriptor {
    pub(crate) fn new(
        name: String,
        resource_name: Option<String>,
        interaction: InteractionKind,
        slots: SmallVec<[ParameterSlot; INLINE_SLOTS]>,
        arity: usize,
    ) -> Self {
        Self {
            name,
            resource_name,
            interaction,
            slots,
            arity,
        }
    }

    /// Returns the binding name (usually the handler's name).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the resource name, or `None` for a system-level operation.
    #[must_use]
    pub fn resource_name(&self) -> Option<&str> {
        self.resource_name.as_deref()
    }

    /// Returns the interaction kind.
    #[must_use]
    pub const fn interaction(&self) -> InteractionKind {
        self.interaction
    }

    /// Returns the declared return shape.
    #[must_use]
    pub const fn return_shape(&self) -> ReturnShape {
        self.interaction.return_shape()
    }

    /// Returns the parameter slots in argument order.
    #[must_use]
    pub fn slots(&self) -> &[ParameterSlot] {
        &self.slots
    }

    /// Returns the slot bound to `role`, if any.
    #[must_use]
    pub fn slot(&self, role: SlotRole) -> Option<&ParameterSlot> {
        self.slots.iter().find(|slot| slot.role == role)
    }

    /// Returns true if a slot is bound to `role`.
    #[must_use]
    pub fn has_slot(&self, role: SlotRole) -> bool {
        self.slot(role).is_some()
    }

    /// Returns the number of handler argument positions.
    #[must_use]
    pub const fn arity(&self) -> usize {
        self.arity
    }

    /// Returns true if the request satisfies every matching condition.
    #[must_use]
    pub fn matches(&self, request: &IncomingRequest) -> bool {
        matcher::matches(self, request)
    }

    /// Returns the first matching condition the request fails, if any.
    pub fn check(&self, request: &IncomingRequest) -> Result<(), Mismatch> {
        matcher::check(self, request)
    }
}

impl fmt::Display for OperationDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.resource_name {
            Some(resource) => write!(f, "{} ({} {})", self.name, self.interaction, resource),
            None => write!(f, "{} ({})", self.name, self.interaction),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interaction_kind_rules() {
        assert_eq!(InteractionKind::HistorySystem.scope(), Scope::System);
        assert_eq!(InteractionKind::HistoryType.scope(), Scope::Type);
        assert_eq!(InteractionKind::VRead.scope(), Scope::Instance);

        assert_eq!(InteractionKind::Read.operation_marker(), None);
        assert_eq!(InteractionKind::VRead.operation_marker(), Some("_history"));

        assert!(InteractionKind::VRead.requires_version());
        assert!(!InteractionKind::HistoryInstance.requires_version());

        assert_eq!(InteractionKind::HistoryType.return_shape(), ReturnShape::Bundle);
        assert_eq!(InteractionKind::Read.return_shape(), ReturnShape::Resource);
    }

    #[test]
    fn test_slot_roles() {
        assert_eq!(SlotRole::Count.query_parameter(), Some("_count"));
        assert_eq!(SlotRole::Since.query_parameter(), Some("_since"));
        assert_eq!(SlotRole::ResourceId.query_parameter(), None);

        assert_eq!(SlotRole::Count.to_string(), "count-limit");
        assert_eq!(SlotRole::Since.to_string(), "since-timestamp");

        assert!(ParameterSlot::new(SlotRole::ResourceId, 0).required());
        assert!(!ParameterSlot::new(SlotRole::Count, 1).required());
    }

    #[test]
    fn test_descriptor_display() {
        let descriptor = OperationDescriptor::new(
            "patientHistory".to_string(),
            Some("Patient".to_string()),
            InteractionKind::HistoryType,
            SmallVec::new(),
            0,
        );
        assert_eq!(descriptor.to_string(), "patientHistory (history-type Patient)");
    }
}
