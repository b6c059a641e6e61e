//! Handler bindings and their resolution into descriptors.
//!
//! A [`HandlerBinding`] is what binding discovery hands the engine for one
//! handler: the interaction family it implements, the resource type it
//! declares (or the [`ResourceBinding::Placeholder`]), the resource type its
//! provider is bound to, and the parameter role of each argument position.
//! [`HandlerBinding::resolve`] turns it into an [`OperationDescriptor`].

use hippocrates_core::{HippocratesError, HippocratesResult};
use smallvec::SmallVec;

use crate::descriptor::{InteractionKind, OperationDescriptor, ParameterSlot, SlotRole};

/// Interaction family a handler is declared for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionFamily {
    /// `_history` at instance, type or system level.
    History,
    /// Read of the current version of an instance.
    Read,
    /// Read of a specific version of an instance.
    VRead,
}

/// Resource type declared on a handler.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResourceBinding {
    /// No explicit type. Inherit the provider's, or fall back to system scope.
    #[default]
    Placeholder,
    /// An explicit resource type name.
    Concrete(String),
}

/// Binding metadata for one handler, as produced by binding discovery.
///
/// # Example
///
/// ```
/// use hippocrates_router::{HandlerBinding, InteractionKind, SlotRole};
///
/// let descriptor = HandlerBinding::history("patientHistory")
///     .provider("Patient")
///     .slot(SlotRole::ResourceId)
///     .slot(SlotRole::Since)
///     .slot(SlotRole::Count)
///     .resolve()
///     .unwrap();
///
/// assert_eq!(descriptor.resource_name(), Some("Patient"));
/// assert_eq!(descriptor.interaction(), InteractionKind::HistoryInstance);
/// assert_eq!(descriptor.slot(SlotRole::Count).map(|s| s.position()), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct HandlerBinding {
    name: String,
    family: InteractionFamily,
    declared: ResourceBinding,
    provider: Option<String>,
    arguments: Vec<Option<SlotRole>>,
}

impl HandlerBinding {
    /// Starts a binding for `family`.
    pub fn new(name: impl Into<String>, family: InteractionFamily) -> Self {
        Self {
            name: name.into(),
            family,
            declared: ResourceBinding::Placeholder,
            provider: None,
            arguments: Vec::new(),
        }
    }

    /// Starts a history binding.
    pub fn history(name: impl Into<String>) -> Self {
        Self::new(name, InteractionFamily::History)
    }

    /// Starts a read binding.
    pub fn read(name: impl Into<String>) -> Self {
        Self::new(name, InteractionFamily::Read)
    }

    /// Starts a vread binding.
    pub fn vread(name: impl Into<String>) -> Self {
        Self::new(name, InteractionFamily::VRead)
    }

    /// Declares an explicit resource type on the handler.
    pub fn resource(mut self, resource_name: impl Into<String>) -> Self {
        self.declared = ResourceBinding::Concrete(resource_name.into());
        self
    }

    /// Sets the resource type the owning provider is bound to.
    pub fn provider(mut self, resource_name: impl Into<String>) -> Self {
        self.provider = Some(resource_name.into());
        self
    }

    /// Appends an argument position carrying `role`.
    pub fn slot(mut self, role: SlotRole) -> Self {
        self.arguments.push(Some(role));
        self
    }

    /// Appends an argument position the engine does not fill.
    pub fn unbound(mut self) -> Self {
        self.arguments.push(None);
        self
    }

    /// Returns the binding name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolves this binding into an immutable descriptor.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when:
    /// - a role appears on more than one argument
    /// - a resource type name is empty
    /// - a system-scoped history binding carries an id slot
    /// - a read or vread binding has no resolvable resource type or no id slot
    /// - a vread binding has no version slot, or another family has one
    /// - a read or vread binding carries a `_since` or `_count` slot
    pub fn resolve(self) -> HippocratesResult<OperationDescriptor> {
        let mut slots: SmallVec<[ParameterSlot; 4]> = SmallVec::new();
        for (position, role) in self.arguments.iter().enumerate() {
            let Some(role) = *role else { continue };
            if slots.iter().any(|slot| slot.role() == role) {
                return Err(self.error(format!("more than one argument has role {role}")));
            }
            slots.push(ParameterSlot::new(role, position));
        }

        let resource_name = match &self.declared {
            ResourceBinding::Concrete(name) => Some(name.clone()),
            ResourceBinding::Placeholder => self.provider.clone(),
        };
        if resource_name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(self.error("resource type name must not be empty"));
        }

        let has = |role: SlotRole| slots.iter().any(|slot| slot.role() == role);
        let has_id = has(SlotRole::ResourceId);
        let has_version = has(SlotRole::VersionId);
        let has_query_slots = has(SlotRole::Since) || has(SlotRole::Count);

        let interaction = match self.family {
            InteractionFamily::History => {
                if has_version {
                    return Err(self.error("history bindings can not take a version id"));
                }
                match (resource_name.is_some(), has_id) {
                    (true, true) => InteractionKind::HistoryInstance,
                    (true, false) => InteractionKind::HistoryType,
                    (false, false) => InteractionKind::HistorySystem,
                    (false, true) => {
                        return Err(self.error(
                            "an id argument requires a resource type, but none is resolvable",
                        ))
                    }
                }
            }
            InteractionFamily::Read | InteractionFamily::VRead => {
                let vread = self.family == InteractionFamily::VRead;
                if resource_name.is_none() {
                    return Err(self.error("read bindings require a resource type"));
                }
                if !has_id {
                    return Err(self.error("read bindings require an id argument"));
                }
                if has_query_slots {
                    return Err(self.error("read bindings can not take _since or _count"));
                }
                match (vread, has_version) {
                    (true, true) => InteractionKind::VRead,
                    (false, false) => InteractionKind::Read,
                    (true, false) => {
                        return Err(self.error("vread bindings require a version id argument"))
                    }
                    (false, true) => {
                        return Err(self.error("read bindings can not take a version id"))
                    }
                }
            }
        };

        tracing::debug!(
            binding = %self.name,
            interaction = %interaction,
            resource = resource_name.as_deref().unwrap_or("-"),
            slots = slots.len(),
            "Resolved handler binding"
        );

        Ok(OperationDescriptor::new(
            self.name,
            resource_name,
            interaction,
            slots,
            self.arguments.len(),
        ))
    }

    fn error(&self, message: impl Into<String>) -> HippocratesError {
        HippocratesError::configuration_for(self.name.clone(), message)
    }
}
