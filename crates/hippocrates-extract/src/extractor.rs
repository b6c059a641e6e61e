//! Slot extraction.
//!
//! [`extract`] walks the slots of a matched descriptor and fills a
//! [`CallArguments`] from the request. Query-sourced slots are removed from
//! the request's parameter map as they are read; parameters no slot claims
//! are left in place.

use hippocrates_core::{wire, CallArguments, IncomingRequest};
use hippocrates_router::{OperationDescriptor, SlotRole};

use crate::coerce::{coerce_count, coerce_since};
use crate::ExtractionError;

/// Field name reported when the resource id is missing.
const ID_FIELD: &str = "id";

/// Field name reported when the version id is missing.
const VERSION_FIELD: &str = "version";

/// Extracts and coerces every slot of `descriptor` from `request`.
///
/// # Errors
///
/// - a client error if `_count` or `_since` is malformed
/// - an internal error if an id or version slot is bound but the request
///   carries no usable value
///
/// # Example
///
/// ```rust
/// use hippocrates_core::IncomingRequest;
/// use hippocrates_extract::extract;
/// use hippocrates_router::{HandlerBinding, SlotRole};
///
/// let descriptor = HandlerBinding::history("patientHistory")
///     .provider("Patient")
///     .slot(SlotRole::ResourceId)
///     .slot(SlotRole::Count)
///     .resolve()
///     .unwrap();
///
/// let mut request = IncomingRequest::parse("Patient/123/_history?_count=10&_format=json").unwrap();
/// let args = extract(&descriptor, &mut request).unwrap();
///
/// assert_eq!(args.id(), Some("123"));
/// assert_eq!(args.count(), Some(10));
/// assert!(!request.parameters().contains("_count"));
/// assert!(request.parameters().contains("_format"));
/// ```
pub fn extract(
    descriptor: &OperationDescriptor,
    request: &mut IncomingRequest,
) -> Result<CallArguments, ExtractionError> {
    let mut args = CallArguments::new();

    for slot in descriptor.slots() {
        match slot.role() {
            SlotRole::ResourceId => {
                let id = required_path_value(request.resource_id(), slot.role(), ID_FIELD)?;
                args = args.with_id(id);
            }
            SlotRole::VersionId => {
                let version =
                    required_path_value(request.resource_version(), slot.role(), VERSION_FIELD)?;
                args = args.with_version(version);
            }
            SlotRole::Count => {
                if let Some(raw) = take_query_value(request, wire::PARAM_COUNT) {
                    args = args.with_count(coerce_count(wire::PARAM_COUNT, &raw)?);
                }
            }
            SlotRole::Since => {
                if let Some(raw) = take_query_value(request, wire::PARAM_SINCE) {
                    args = args.with_since(coerce_since(wire::PARAM_SINCE, &raw)?);
                }
            }
        }
    }

    Ok(args)
}

/// Removes `name` from the request and returns its first value, or `None`
/// if it was absent or blank.
fn take_query_value(request: &mut IncomingRequest, name: &str) -> Option<String> {
    let values = request.parameters_mut().remove(name)?;
    values
        .into_iter()
        .next()
        .filter(|value| !wire::is_blank(Some(value.as_str())))
}

fn required_path_value(
    value: Option<&str>,
    role: SlotRole,
    field: &str,
) -> Result<String, ExtractionError> {
    if wire::is_blank(value) {
        return Err(ExtractionError::missing_required(role, field));
    }
    Ok(value.unwrap_or_default().to_string())
}
