//! Handler invocation and return-shape normalization.

use std::time::Instant;

use hippocrates_core::{CallArguments, HippocratesError, HippocratesResult};
use hippocrates_router::{OperationDescriptor, ReturnShape};
use hippocrates_telemetry::metrics;

use crate::arguments::PositionalArguments;
use crate::handler::{ErasedHandler, HandlerError, HandlerOutput};
use crate::response::DispatchResponse;

/// Invokes `handler` once with `args` laid out for `descriptor`.
///
/// # Errors
///
/// - engine errors the handler returns are passed through unchanged
/// - any other handler failure becomes an internal error carrying the cause
/// - output that cannot be shaped as the operation declares is an internal
///   error
pub async fn dispatch(
    descriptor: &OperationDescriptor,
    handler: &ErasedHandler,
    args: CallArguments,
) -> HippocratesResult<DispatchResponse> {
    let positional = PositionalArguments::resolve(descriptor, args)?;

    let started = Instant::now();
    let result = handler(positional).await;
    metrics::record_dispatch_duration(descriptor.interaction().as_str(), started.elapsed());

    let output = result.map_err(|err| handler_failure(descriptor, err))?;
    normalize(descriptor, output)
}

/// Shapes handler output to the descriptor's return shape.
///
/// | Declared | Handler returned | Result |
/// |----------|------------------|--------|
/// | bundle | single | one-element bundle |
/// | bundle | list | the list |
/// | resource | single | the resource |
/// | resource | one-element list | its element |
/// | resource | other list | internal error |
pub fn normalize(
    descriptor: &OperationDescriptor,
    output: HandlerOutput,
) -> HippocratesResult<DispatchResponse> {
    match (descriptor.return_shape(), output) {
        (ReturnShape::Bundle, HandlerOutput::Single(resource)) => {
            Ok(DispatchResponse::Bundle(vec![resource]))
        }
        (ReturnShape::Bundle, HandlerOutput::List(resources)) => {
            Ok(DispatchResponse::Bundle(resources))
        }
        (ReturnShape::Resource, HandlerOutput::Single(resource)) => {
            Ok(DispatchResponse::Resource(resource))
        }
        (ReturnShape::Resource, HandlerOutput::List(mut resources)) => match resources.len() {
            1 => match resources.pop() {
                Some(resource) => Ok(DispatchResponse::Resource(resource)),
                None => Err(shape_error(descriptor, 0)),
            },
            n => Err(shape_error(descriptor, n)),
        },
    }
}

fn shape_error(descriptor: &OperationDescriptor, returned: usize) -> HippocratesError {
    HippocratesError::internal(format!(
        "{} must return exactly one resource, handler returned {returned}",
        descriptor.name()
    ))
}

fn handler_failure(descriptor: &OperationDescriptor, err: HandlerError) -> HippocratesError {
    match err {
        HandlerError::Engine(err) => {
            tracing::debug!(
                binding = descriptor.name(),
                error = %err,
                "Handler returned an engine error"
            );
            err
        }
        HandlerError::Custom(source) => {
            tracing::error!(
                binding = descriptor.name(),
                interaction = %descriptor.interaction(),
                error = %source,
                "Handler failed"
            );
            HippocratesError::internal_with_source(
                format!("Failed to call access method {}", descriptor.name()),
                source,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::BoxedHandlerResult;
    use hippocrates_core::{ErrorCategory, Resource};
    use hippocrates_router::{HandlerBinding, SlotRole};
    use std::sync::Arc;

    fn type_history() -> OperationDescriptor {
        HandlerBinding::history("typeHistory")
            .provider("Patient")
            .slot(SlotRole::Count)
            .resolve()
            .unwrap()
    }

    fn read() -> OperationDescriptor {
        HandlerBinding::read("read")
            .provider("Patient")
            .slot(SlotRole::ResourceId)
            .resolve()
            .unwrap()
    }

    fn patient(id: &str) -> Resource {
        Resource::new("Patient").with_id(id)
    }

    fn returning(output: Result<HandlerOutput, HandlerError>) -> ErasedHandler {
        let output = Arc::new(std::sync::Mutex::new(Some(output)));
        Arc::new(move |_args: PositionalArguments| -> BoxedHandlerResult {
            let output = output.lock().unwrap().take().unwrap();
            Box::pin(async move { output })
        })
    }

    #[test]
    fn test_bundle_normalization() {
        let descriptor = type_history();

        let single = normalize(&descriptor, patient("1").into()).unwrap();
        assert_eq!(single, DispatchResponse::Bundle(vec![patient("1")]));

        let list = normalize(&descriptor, vec![patient("1"), patient("2")].into()).unwrap();
        assert_eq!(list.resources().len(), 2);

        let empty = normalize(&descriptor, Vec::new().into()).unwrap();
        assert_eq!(empty, DispatchResponse::Bundle(Vec::new()));
    }

    #[test]
    fn test_resource_normalization() {
        let descriptor = read();

        let single = normalize(&descriptor, patient("1").into()).unwrap();
        assert_eq!(single.as_resource(), Some(&patient("1")));

        let unwrapped = normalize(&descriptor, vec![patient("2")].into()).unwrap();
        assert_eq!(unwrapped, DispatchResponse::Resource(patient("2")));

        for len in [0, 2] {
            let list = (0..len).map(|i| patient(&i.to_string())).collect::<Vec<_>>();
            let err = normalize(&descriptor, list.into()).unwrap_err();
            assert_eq!(err.category(), ErrorCategory::Internal);
        }
    }

    #[tokio::test]
    async fn test_dispatch_passes_positional_arguments() {
        let descriptor = type_history();
        let handler: ErasedHandler = Arc::new(|args: PositionalArguments| -> BoxedHandlerResult {
            Box::pin(async move {
                let count = args.count(0).unwrap_or_default();
                let resources = (0..count).map(|i| patient(&i.to_string())).collect::<Vec<_>>();
                Ok::<_, HandlerError>(HandlerOutput::List(resources))
            })
        });

        let response = dispatch(&descriptor, &handler, CallArguments::new().with_count(3))
            .await
            .unwrap();
        assert_eq!(response.into_resources().len(), 3);
    }

    #[tokio::test]
    async fn test_custom_failure_is_internal_error() {
        let handler = returning(Err(HandlerError::custom(std::io::Error::other("db down"))));
        let err = dispatch(&type_history(), &handler, CallArguments::new())
            .await
            .unwrap_err();

        assert_eq!(err.category(), ErrorCategory::Internal);
        assert!(err.to_string().contains("typeHistory"));
        let source = std::error::Error::source(&err).unwrap();
        assert!(source.to_string().contains("db down"));
    }

    #[tokio::test]
    async fn test_engine_error_passes_through() {
        let handler = returning(Err(HippocratesError::not_found("Patient/9").into()));
        let err = dispatch(&read(), &handler, CallArguments::new().with_id("9"))
            .await
            .unwrap_err();

        assert_eq!(err.category(), ErrorCategory::NotFound);
    }
}
