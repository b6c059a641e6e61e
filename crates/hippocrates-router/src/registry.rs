//! The descriptor registry.
//!
//! Descriptors are registered once at startup through a
//! [`RegistryBuilder`], which rejects any binding that could claim the same
//! request as one already registered. The resulting [`DescriptorRegistry`]
//! is immutable and can be shared across threads without locking.

use std::collections::HashMap;

use hippocrates_core::{HippocratesError, HippocratesResult, IncomingRequest};

use crate::binding::HandlerBinding;
use crate::descriptor::{InteractionKind, OperationDescriptor};

/// Index of a descriptor within its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DescriptorId(usize);

impl DescriptorId {
    /// Returns the raw index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

// Two descriptors can match the same request iff their keys are equal: the
// interaction kind fixes the operation marker, id presence and version rule,
// and the resource name fixes condition 2.
type MatchKey = (InteractionKind, Option<String>);

fn match_key(descriptor: &OperationDescriptor) -> MatchKey {
    (
        descriptor.interaction(),
        descriptor.resource_name().map(str::to_string),
    )
}

/// Builder that collects descriptors and detects ambiguity.
///
/// # Example
///
/// ```
/// use hippocrates_router::{HandlerBinding, RegistryBuilder, SlotRole};
///
/// let mut builder = RegistryBuilder::new();
/// builder
///     .register(HandlerBinding::history("instance").provider("Patient").slot(SlotRole::ResourceId))
///     .unwrap();
/// builder
///     .register(HandlerBinding::history("type").provider("Patient"))
///     .unwrap();
///
/// // A second type-level history handler for Patient is ambiguous.
/// let err = builder
///     .register(HandlerBinding::history("duplicate").resource("Patient"))
///     .unwrap_err();
/// assert!(err.to_string().contains("ambiguous"));
///
/// let registry = builder.build();
/// assert_eq!(registry.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    descriptors: Vec<OperationDescriptor>,
    claimed: HashMap<MatchKey, DescriptorId>,
}

impl RegistryBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves and registers a binding.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the binding does not resolve or if
    /// it is ambiguous with an already registered descriptor.
    pub fn register(&mut self, binding: HandlerBinding) -> HippocratesResult<DescriptorId> {
        let descriptor = binding.resolve()?;
        self.register_descriptor(descriptor)
    }

    /// Registers an already resolved descriptor.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the descriptor is ambiguous with an
    /// already registered one.
    pub fn register_descriptor(
        &mut self,
        descriptor: OperationDescriptor,
    ) -> HippocratesResult<DescriptorId> {
        let key = match_key(&descriptor);
        if let Some(existing) = self.claimed.get(&key) {
            let existing = &self.descriptors[existing.index()];
            tracing::error!(
                binding = %descriptor.name(),
                conflicts_with = %existing.name(),
                "Ambiguous operation binding"
            );
            return Err(HippocratesError::configuration_for(
                descriptor.name(),
                format!("binding {descriptor} is ambiguous with {existing}"),
            ));
        }

        let id = DescriptorId(self.descriptors.len());
        tracing::info!(
            binding = %descriptor.name(),
            interaction = %descriptor.interaction(),
            resource = descriptor.resource_name().unwrap_or("-"),
            "Registered operation"
        );
        self.claimed.insert(key, id);
        self.descriptors.push(descriptor);
        Ok(id)
    }

    /// Returns the number of descriptors registered so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns true if nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Freezes the registry.
    #[must_use]
    pub fn build(self) -> DescriptorRegistry {
        DescriptorRegistry {
            descriptors: self.descriptors,
        }
    }
}

/// Immutable set of operation descriptors consulted by the matcher.
#[derive(Debug, Clone, Default)]
pub struct DescriptorRegistry {
    descriptors: Vec<OperationDescriptor>,
}

impl DescriptorRegistry {
    /// Creates a builder.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Builds a registry from bindings, failing on the first bad one.
    ///
    /// # Errors
    ///
    /// Returns the first configuration error encountered.
    pub fn from_bindings(
        bindings: impl IntoIterator<Item = HandlerBinding>,
    ) -> HippocratesResult<Self> {
        let mut builder = RegistryBuilder::new();
        for binding in bindings {
            builder.register(binding)?;
        }
        Ok(builder.build())
    }

    /// Returns the descriptor that matches `request`.
    #[must_use]
    pub fn find(&self, request: &IncomingRequest) -> Option<(DescriptorId, &OperationDescriptor)> {
        self.descriptors
            .iter()
            .enumerate()
            .find(|(_, descriptor)| descriptor.matches(request))
            .map(|(index, descriptor)| (DescriptorId(index), descriptor))
    }

    /// Returns a descriptor by id.
    #[must_use]
    pub fn get(&self, id: DescriptorId) -> Option<&OperationDescriptor> {
        self.descriptors.get(id.index())
    }

    /// Returns an iterator over all descriptors.
    pub fn iter(&self) -> impl Iterator<Item = (DescriptorId, &OperationDescriptor)> {
        self.descriptors
            .iter()
            .enumerate()
            .map(|(index, descriptor)| (DescriptorId(index), descriptor))
    }

    /// Returns the number of descriptors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns true if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
