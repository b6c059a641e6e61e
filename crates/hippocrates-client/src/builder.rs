//! Invocation building.

use std::borrow::Cow;

use hippocrates_core::{
    wire, CallArguments, HippocratesError, HippocratesResult, OutboundInvocation,
};
use hippocrates_router::{InteractionKind, OperationDescriptor, SlotRole};

/// Parameter name reported when the resource id is missing.
const ID_PARAMETER: &str = "id";

/// Parameter name reported when the version id is missing.
const VERSION_PARAMETER: &str = "version";

/// Builds the outbound call for `descriptor`.
///
/// The path is assembled from the descriptor's scope and the values in
/// `args`:
///
/// ```text
///   history-instance   {resource}/{id}/_history
///   history-type       {resource}/_history
///   history-system     _history
///   read               {resource}/{id}
///   vread              {resource}/{id}/_history/{version}
/// ```
///
/// The id and version are percent-encoded as single path segments, so any
/// value survives the trip through [`IncomingRequest::parse`].
/// `_count` and `_since` are emitted as query parameters when supplied and
/// the descriptor has the matching slot. Other values in `args` are ignored.
///
/// [`IncomingRequest::parse`]: hippocrates_core::IncomingRequest::parse
///
/// # Errors
///
/// Returns an invalid request error, before any I/O, if the descriptor binds
/// an id (or version) and `args` has none or a blank one.
///
/// # Example
///
/// ```rust
/// use hippocrates_client::build;
/// use hippocrates_core::CallArguments;
/// use hippocrates_router::{HandlerBinding, SlotRole};
///
/// let descriptor = HandlerBinding::history("patientHistory")
///     .provider("Patient")
///     .slot(SlotRole::ResourceId)
///     .slot(SlotRole::Count)
///     .resolve()
///     .unwrap();
///
/// let invocation = build(&descriptor, &CallArguments::new().with_id("123").with_count(10)).unwrap();
/// assert_eq!(invocation.path(), "Patient/123/_history");
/// assert_eq!(invocation.target().unwrap(), "Patient/123/_history?_count=10");
/// ```
pub fn build(
    descriptor: &OperationDescriptor,
    args: &CallArguments,
) -> HippocratesResult<OutboundInvocation> {
    let mut segments: Vec<Cow<'_, str>> = Vec::with_capacity(4);

    if let Some(resource_name) = descriptor.resource_name() {
        segments.push(Cow::Borrowed(resource_name));
    }

    if descriptor.has_slot(SlotRole::ResourceId) {
        let id = required(args.id(), ID_PARAMETER)?;
        segments.push(Cow::Owned(wire::encode_segment(id)));
    }

    if descriptor.interaction() == InteractionKind::VRead {
        let version = required(args.version(), VERSION_PARAMETER)?;
        segments.push(Cow::Borrowed(wire::HISTORY));
        segments.push(Cow::Owned(wire::encode_segment(version)));
    } else if let Some(marker) = descriptor.interaction().operation_marker() {
        segments.push(Cow::Borrowed(marker));
    }

    let separator = wire::SEPARATOR.to_string();
    let mut invocation = OutboundInvocation::get(segments.join(separator.as_str()));

    if descriptor.has_slot(SlotRole::Count) {
        if let Some(count) = args.count() {
            invocation = invocation.with_query(wire::PARAM_COUNT, count.to_string());
        }
    }
    if descriptor.has_slot(SlotRole::Since) {
        if let Some(since) = args.since() {
            invocation = invocation.with_query(wire::PARAM_SINCE, since.to_rfc3339());
        }
    }

    tracing::debug!(
        binding = descriptor.name(),
        interaction = %descriptor.interaction(),
        path = invocation.path(),
        "Built invocation"
    );

    Ok(invocation)
}

fn required<'a>(value: Option<&'a str>, parameter: &str) -> HippocratesResult<&'a str> {
    match value {
        Some(value) if !wire::is_blank(Some(value)) => Ok(value),
        _ => Err(HippocratesError::missing_parameter(parameter)),
    }
}
