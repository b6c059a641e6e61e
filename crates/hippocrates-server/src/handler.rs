//! Handler registration and invocation.
//!
//! Handlers are async functions of [`PositionalArguments`] that produce a
//! [`HandlerOutput`]. They are stored type-erased, keyed by the
//! [`DescriptorId`] of the operation they serve.
//!
//! # Example
//!
//! ```rust
//! use hippocrates_core::Resource;
//! use hippocrates_router::{DescriptorRegistry, HandlerBinding, SlotRole};
//! use hippocrates_server::{HandlerError, HandlerOutput, HandlerRegistry, PositionalArguments};
//!
//! async fn patient_history(args: PositionalArguments) -> Result<HandlerOutput, HandlerError> {
//!     let id = args.id(0).unwrap_or_default().to_string();
//!     Ok(vec![Resource::new("Patient").with_id(id)].into())
//! }
//!
//! let registry = DescriptorRegistry::from_bindings([
//!     HandlerBinding::history("patientHistory").provider("Patient").slot(SlotRole::ResourceId),
//! ])
//! .unwrap();
//! let (id, _) = registry.iter().next().unwrap();
//!
//! let mut handlers = HandlerRegistry::new();
//! handlers.register(id, patient_history);
//! assert!(handlers.contains(id));
//! ```

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use hippocrates_core::{HippocratesError, Resource};
use hippocrates_router::DescriptorId;
use thiserror::Error;

use crate::arguments::PositionalArguments;

/// Type alias for boxed handler result.
pub type BoxedHandlerResult =
    Pin<Box<dyn Future<Output = Result<HandlerOutput, HandlerError>> + Send>>;

/// A type-erased handler function.
pub type ErasedHandler = Arc<dyn Fn(PositionalArguments) -> BoxedHandlerResult + Send + Sync>;

/// What a handler returns: one resource or a list of them.
///
/// The dispatcher normalizes this to the shape the operation declares.
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerOutput {
    /// A single resource.
    Single(Resource),
    /// A list of resources.
    List(Vec<Resource>),
}

impl From<Resource> for HandlerOutput {
    fn from(resource: Resource) -> Self {
        Self::Single(resource)
    }
}

impl From<Vec<Resource>> for HandlerOutput {
    fn from(resources: Vec<Resource>) -> Self {
        Self::List(resources)
    }
}

/// Handler error type.
///
/// An [`Engine`](Self::Engine) error is a typed outcome the handler chose
/// (for example "resource not found") and reaches the caller unchanged.
/// Anything else is wrapped as an internal error.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Handler returned an engine error.
    #[error(transparent)]
    Engine(#[from] HippocratesError),

    /// Handler failed.
    #[error("Handler error: {0}")]
    Custom(#[from] anyhow::Error),
}

impl HandlerError {
    /// Wraps an arbitrary failure.
    pub fn custom(error: impl Into<anyhow::Error>) -> Self {
        Self::Custom(error.into())
    }
}

/// Registry for operation handlers.
///
/// # Example
///
/// ```rust
/// use hippocrates_server::HandlerRegistry;
///
/// let registry = HandlerRegistry::new();
/// assert!(registry.is_empty());
/// ```
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: HashMap<DescriptorId, ErasedHandler>,
}

impl HandlerRegistry {
    /// Creates a new empty handler registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Registers the handler for an operation, replacing any previous one.
    pub fn register<F, Fut>(&mut self, id: DescriptorId, handler: F)
    where
        F: Fn(PositionalArguments) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<HandlerOutput, HandlerError>> + Send + 'static,
    {
        let handler = Arc::new(handler);
        let erased: ErasedHandler = Arc::new(move |args: PositionalArguments| -> BoxedHandlerResult {
            let handler = Arc::clone(&handler);
            Box::pin(async move { handler(args).await })
        });

        self.handlers.insert(id, erased);
    }

    /// Looks up the handler for an operation.
    #[must_use]
    pub fn get(&self, id: DescriptorId) -> Option<&ErasedHandler> {
        self.handlers.get(&id)
    }

    /// Checks if a handler is registered for an operation.
    #[must_use]
    pub fn contains(&self, id: DescriptorId) -> bool {
        self.handlers.contains_key(&id)
    }

    /// Returns the number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` if no handlers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ids: Vec<_> = self.handlers.keys().map(|id| id.index()).collect();
        ids.sort_unstable();
        f.debug_struct("HandlerRegistry")
            .field("handlers", &ids)
            .finish()
    }
}
