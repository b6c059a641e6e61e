//! Request matching.
//!
//! A request matches a descriptor when all four conditions hold, checked in
//! this order and short-circuiting on the first failure:
//!
//! 1. the request's operation equals the descriptor's operation marker
//! 2. the resource name equals the descriptor's (system descriptors accept
//!    only requests without one)
//! 3. a non-empty resource id is present exactly when the descriptor has an
//!    id slot
//! 4. a non-empty version is present exactly when the interaction requires one
//!
//! There is no scoring. The registry guarantees that at most one descriptor
//! can satisfy all four for any request.

use std::fmt;

use hippocrates_core::IncomingRequest;

use crate::descriptor::{OperationDescriptor, SlotRole};

/// The first matching condition a request failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mismatch {
    /// The operation marker differs.
    Operation,
    /// The resource name differs, or scope is wrong.
    ResourceName,
    /// Resource id presence differs from the descriptor's id slot.
    ResourceId,
    /// Version presence differs from what the interaction allows.
    Version,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Operation => write!(f, "operation"),
            Self::ResourceName => write!(f, "resource name"),
            Self::ResourceId => write!(f, "resource id"),
            Self::Version => write!(f, "version"),
        }
    }
}

/// Returns true if `request` satisfies every condition of `descriptor`.
///
/// # Example
///
/// ```
/// use hippocrates_core::IncomingRequest;
/// use hippocrates_router::{matches, HandlerBinding, SlotRole};
///
/// let descriptor = HandlerBinding::history("patientHistory")
///     .provider("Patient")
///     .slot(SlotRole::ResourceId)
///     .resolve()
///     .unwrap();
///
/// let request = IncomingRequest::new()
///     .with_operation("_history")
///     .with_resource_name("Patient")
///     .with_resource_id("123");
/// assert!(matches(&descriptor, &request));
///
/// let without_id = IncomingRequest::new()
///     .with_operation("_history")
///     .with_resource_name("Patient");
/// assert!(!matches(&descriptor, &without_id));
/// ```
#[must_use]
pub fn matches(descriptor: &OperationDescriptor, request: &IncomingRequest) -> bool {
    check(descriptor, request).is_ok()
}

/// Checks the four matching conditions in order.
///
/// # Errors
///
/// Returns the first condition that fails.
pub fn check(descriptor: &OperationDescriptor, request: &IncomingRequest) -> Result<(), Mismatch> {
    let interaction = descriptor.interaction();

    if request.operation() != interaction.operation_marker() {
        return Err(Mismatch::Operation);
    }

    match descriptor.resource_name() {
        None if request.resource_name().is_some() => return Err(Mismatch::ResourceName),
        Some(name) if request.resource_name() != Some(name) => {
            return Err(Mismatch::ResourceName)
        }
        _ => {}
    }

    if request.has_resource_id() != descriptor.has_slot(SlotRole::ResourceId) {
        return Err(Mismatch::ResourceId);
    }

    if request.has_resource_version() != interaction.requires_version() {
        return Err(Mismatch::Version);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::HandlerBinding;
    use proptest::prelude::*;

    fn instance_history() -> OperationDescriptor {
        HandlerBinding::history("instance")
            .provider("Patient")
            .slot(SlotRole::ResourceId)
            .resolve()
            .unwrap()
    }

    fn type_history() -> OperationDescriptor {
        HandlerBinding::history("type")
            .provider("Patient")
            .resolve()
            .unwrap()
    }

    fn system_history() -> OperationDescriptor {
        HandlerBinding::history("system").resolve().unwrap()
    }

    fn history_request() -> IncomingRequest {
        IncomingRequest::new().with_operation("_history")
    }

    #[test]
    fn test_instance_scoped_matches_request_with_id() {
        let request = history_request()
            .with_resource_name("Patient")
            .with_resource_id("123");
        assert!(matches(&instance_history(), &request));
    }

    #[test]
    fn test_instance_scoped_rejects_request_without_id() {
        let request = history_request().with_resource_name("Patient");
        assert_eq!(
            check(&instance_history(), &request),
            Err(Mismatch::ResourceId)
        );
    }

    #[test]
    fn test_type_scoped_rejects_request_with_id() {
        let request = history_request()
            .with_resource_name("Patient")
            .with_resource_id("123");
        assert_eq!(check(&type_history(), &request), Err(Mismatch::ResourceId));
    }

    #[test]
    fn test_system_scoped_matches_only_without_resource_name() {
        assert!(matches(&system_history(), &history_request()));

        let request = history_request().with_resource_name("Patient");
        assert_eq!(
            check(&system_history(), &request),
            Err(Mismatch::ResourceName)
        );
    }

    #[test]
    fn test_resource_name_is_case_sensitive() {
        let request = history_request().with_resource_name("patient");
        assert_eq!(check(&type_history(), &request), Err(Mismatch::ResourceName));
    }

    #[test]
    fn test_resource_scoped_rejects_request_without_resource_name() {
        assert_eq!(
            check(&type_history(), &history_request()),
            Err(Mismatch::ResourceName)
        );
    }

    #[test]
    fn test_wrong_operation_fails_first() {
        let request = IncomingRequest::new()
            .with_operation("_search")
            .with_resource_name("Observation")
            .with_resource_version("3");
        assert_eq!(check(&type_history(), &request), Err(Mismatch::Operation));

        let read = IncomingRequest::new().with_resource_name("Patient");
        assert_eq!(check(&type_history(), &read), Err(Mismatch::Operation));
    }

    #[test]
    fn test_version_disqualifies_history() {
        let request = history_request()
            .with_resource_name("Patient")
            .with_resource_id("123")
            .with_resource_version("2");
        assert_eq!(check(&instance_history(), &request), Err(Mismatch::Version));
    }

    #[test]
    fn test_empty_version_is_treated_as_absent() {
        let request = history_request()
            .with_resource_name("Patient")
            .with_resource_id("123")
            .with_resource_version("");
        assert!(matches(&instance_history(), &request));
    }

    #[test]
    fn test_empty_id_is_treated_as_absent() {
        let request = history_request()
            .with_resource_name("Patient")
            .with_resource_id("");
        assert!(matches(&type_history(), &request));
        assert!(!matches(&instance_history(), &request));
    }

    #[test]
    fn test_whitespace_id_and_version_are_treated_as_absent() {
        let request = history_request()
            .with_resource_name("Patient")
            .with_resource_id("  ");
        assert!(matches(&type_history(), &request));
        assert!(!matches(&instance_history(), &request));

        let request = history_request()
            .with_resource_name("Patient")
            .with_resource_id("123")
            .with_resource_version(" ");
        assert!(matches(&instance_history(), &request));
    }

    #[test]
    fn test_read_and_vread() {
        let read = HandlerBinding::read("read")
            .provider("Patient")
            .slot(SlotRole::ResourceId)
            .resolve()
            .unwrap();
        let vread = HandlerBinding::vread("vread")
            .provider("Patient")
            .slot(SlotRole::ResourceId)
            .slot(SlotRole::VersionId)
            .resolve()
            .unwrap();

        let read_request = IncomingRequest::parse("Patient/1").unwrap();
        let vread_request = IncomingRequest::parse("Patient/1/_history/4").unwrap();
        let history_request = IncomingRequest::parse("Patient/1/_history").unwrap();

        assert!(matches(&read, &read_request));
        assert!(!matches(&read, &vread_request));
        assert!(!matches(&read, &history_request));

        assert!(matches(&vread, &vread_request));
        assert_eq!(check(&vread, &history_request), Err(Mismatch::Version));
        assert!(!matches(&vread, &read_request));

        assert!(!matches(&instance_history(), &vread_request));
        assert!(matches(&instance_history(), &history_request));
    }

    #[derive(Debug, Clone, Copy)]
    enum NameCase {
        Same,
        Different,
        Absent,
    }

    #[derive(Debug, Clone, Copy)]
    enum VersionCase {
        Present,
        Empty,
        Absent,
    }

    fn descriptors() -> Vec<OperationDescriptor> {
        vec![instance_history(), type_history(), system_history()]
    }

    fn build_request(
        operation_ok: bool,
        name: NameCase,
        id: bool,
        version: VersionCase,
    ) -> IncomingRequest {
        let mut request = IncomingRequest::new()
            .with_operation(if operation_ok { "_history" } else { "_search" });
        request = match name {
            NameCase::Same => request.with_resource_name("Patient"),
            NameCase::Different => request.with_resource_name("Observation"),
            NameCase::Absent => request,
        };
        if id {
            request = request.with_resource_id("123");
        }
        match version {
            VersionCase::Present => request.with_resource_version("1"),
            VersionCase::Empty => request.with_resource_version(""),
            VersionCase::Absent => request,
        }
    }

    fn expected(
        descriptor: &OperationDescriptor,
        operation_ok: bool,
        name: NameCase,
        id: bool,
        version: VersionCase,
    ) -> bool {
        let name_ok = match (descriptor.resource_name(), name) {
            (None, NameCase::Absent) => true,
            (None, _) => false,
            (Some(_), NameCase::Same) => true,
            (Some(_), _) => false,
        };
        let id_ok = id == descriptor.has_slot(SlotRole::ResourceId);
        let version_ok = !matches!(version, VersionCase::Present);
        operation_ok && name_ok && id_ok && version_ok
    }

    fn name_case() -> impl Strategy<Value = NameCase> {
        prop_oneof![
            Just(NameCase::Same),
            Just(NameCase::Different),
            Just(NameCase::Absent)
        ]
    }

    fn version_case() -> impl Strategy<Value = VersionCase> {
        prop_oneof![
            Just(VersionCase::Present),
            Just(VersionCase::Empty),
            Just(VersionCase::Absent)
        ]
    }

    proptest! {
        #[test]
        fn prop_matches_iff_all_conditions_hold(
            descriptor_index in 0usize..3,
            operation_ok in any::<bool>(),
            name in name_case(),
            id in any::<bool>(),
            version in version_case(),
        ) {
            let descriptor = &descriptors()[descriptor_index];
            let request = build_request(operation_ok, name, id, version);
            prop_assert_eq!(
                matches(descriptor, &request),
                expected(descriptor, operation_ok, name, id, version)
            );
        }
    }

    #[test]
    fn test_cross_product_has_exactly_one_match_per_wellformed_request() {
        // Every request with the right operation, no version, and a coherent
        // scope is claimed by exactly one of the three history descriptors.
        let all = descriptors();
        for (name, id) in [
            (NameCase::Same, true),
            (NameCase::Same, false),
            (NameCase::Absent, false),
        ] {
            let request = build_request(true, name, id, VersionCase::Absent);
            let count = all.iter().filter(|d| matches(d, &request)).count();
            assert_eq!(count, 1, "{name:?} id={id}");
        }
    }
}
