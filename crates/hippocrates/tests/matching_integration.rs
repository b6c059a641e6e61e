//! Matching and building scenarios for the history interactions.

use hippocrates::core::wire;
use hippocrates::prelude::*;
use http::StatusCode;

fn instance_history() -> OperationDescriptor {
    HandlerBinding::history("patientInstanceHistory")
        .provider("Patient")
        .slot(SlotRole::ResourceId)
        .slot(SlotRole::Since)
        .slot(SlotRole::Count)
        .resolve()
        .unwrap()
}

fn type_history() -> OperationDescriptor {
    HandlerBinding::history("patientTypeHistory")
        .provider("Patient")
        .slot(SlotRole::Since)
        .slot(SlotRole::Count)
        .resolve()
        .unwrap()
}

fn system_history() -> OperationDescriptor {
    HandlerBinding::history("systemHistory")
        .slot(SlotRole::Since)
        .slot(SlotRole::Count)
        .resolve()
        .unwrap()
}

fn history_request() -> IncomingRequest {
    IncomingRequest::new().with_operation(wire::HISTORY)
}

#[test]
fn test_instance_history_matches_request_with_id() {
    let request = history_request()
        .with_resource_name("Patient")
        .with_resource_id("123");

    assert!(instance_history().matches(&request));
}

#[test]
fn test_instance_history_rejects_request_without_id() {
    let request = history_request().with_resource_name("Patient");

    assert!(!instance_history().matches(&request));
}

#[test]
fn test_type_history_rejects_request_with_id() {
    let request = history_request()
        .with_resource_name("Patient")
        .with_resource_id("123");

    assert!(!type_history().matches(&request));
}

#[test]
fn test_system_history_matches_only_without_resource_name() {
    let descriptor = system_history();

    assert!(descriptor.matches(&history_request()));
    assert!(!descriptor.matches(&history_request().with_resource_name("Patient")));
}

#[test]
fn test_instance_history_builds_patient_path() {
    let invocation = build(&instance_history(), &CallArguments::new().with_id("123")).unwrap();

    assert_eq!(invocation.path(), "Patient/123/_history");
    assert_eq!(invocation.method(), &http::Method::GET);
    assert!(!invocation.has_body());
}

#[test]
fn test_versioned_request_never_matches_history() {
    let request = history_request()
        .with_resource_name("Patient")
        .with_resource_id("123")
        .with_resource_version("2");

    assert!(!instance_history().matches(&request));
}

#[test]
fn test_empty_version_is_treated_as_absent() {
    let request = history_request()
        .with_resource_name("Patient")
        .with_resource_id("123")
        .with_resource_version("");

    assert!(instance_history().matches(&request));
}

#[test]
fn test_wrong_operation_never_matches() {
    let request = IncomingRequest::new()
        .with_operation("_search")
        .with_resource_name("Patient")
        .with_resource_id("123");

    for descriptor in [instance_history(), type_history(), system_history()] {
        assert!(!descriptor.matches(&request), "{descriptor}");
    }
}

#[test]
fn test_each_history_request_matches_exactly_one_scope() {
    let descriptors = [instance_history(), type_history(), system_history()];
    let requests = [
        history_request().with_resource_name("Patient").with_resource_id("1"),
        history_request().with_resource_name("Patient"),
        history_request(),
    ];

    for (expected, request) in requests.iter().enumerate() {
        let matching: Vec<usize> = descriptors
            .iter()
            .enumerate()
            .filter(|(_, d)| d.matches(request))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(matching, vec![expected]);
    }
}

#[test]
fn test_missing_id_on_build_maps_to_bad_request() {
    let err = build(&instance_history(), &CallArguments::new()).unwrap_err();

    assert_eq!(err.category(), ErrorCategory::InvalidRequest);
    assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

    let envelope = serde_json::to_value(err.to_envelope()).unwrap();
    assert_eq!(envelope["error"]["code"], "INVALID_REQUEST");
    assert_eq!(envelope["error"]["category"], "invalid_request");
    assert_eq!(envelope["error"]["details"]["parameter"], "id");
}
