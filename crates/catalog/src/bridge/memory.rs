//! In-memory component registry.

use rustc_hash::{FxHashMap, FxHashSet};

use super::ComponentRegistry;
use crate::component::{ClassDescriptor, Component};
use crate::error::BridgeError;
use crate::types::{FunctionKind, FunctionType};

/// Immutable, builder-constructed [`ComponentRegistry`].
#[derive(Debug, Default)]
pub struct MemoryComponentRegistry {
	components: FxHashMap<String, Component>,
	/// Alias to canonical name.
	aliases: FxHashMap<String, String>,
	/// Canonical name to aliases, in declaration order.
	alias_groups: FxHashMap<String, Vec<String>>,
	/// Definition name to its declared signature.
	definitions: FxHashMap<String, Option<FunctionType>>,
	/// Factory-bound name to the class it produces.
	factories: FxHashMap<String, Option<ClassDescriptor>>,
	/// Qualifier to the names carrying it.
	qualifiers: FxHashMap<String, Vec<String>>,
}

impl MemoryComponentRegistry {
	pub fn builder() -> MemoryComponentRegistryBuilder {
		MemoryComponentRegistryBuilder::default()
	}

	fn canonical<'a>(&'a self, name: &'a str) -> &'a str {
		self.aliases.get(name).map(String::as_str).unwrap_or(name)
	}
}

impl ComponentRegistry for MemoryComponentRegistry {
	fn contains_by_name(&self, name: &str) -> bool {
		self.components.contains_key(self.canonical(name))
	}

	fn get_by_name(&self, name: &str) -> Option<Component> {
		self.components.get(self.canonical(name)).cloned()
	}

	fn get_qualified_by_name(&self, name: &str) -> Result<Option<Component>, BridgeError> {
		match self.qualifiers.get(name).map(Vec::as_slice) {
			None | Some([]) => Ok(None),
			Some([single]) => Ok(self.components.get(self.canonical(single)).cloned()),
			Some(many) => Err(BridgeError::Ambiguous {
				qualifier: name.to_owned(),
				matches: many.len(),
			}),
		}
	}

	fn names_by_capability(&self, kind: FunctionKind) -> FxHashSet<String> {
		self.components
			.iter()
			.filter(|(_, component)| matches!(component, Component::Instance(i) if i.class().capabilities.has(kind)))
			.map(|(name, _)| name.clone())
			.collect()
	}

	fn aliases_of(&self, name: &str) -> Vec<String> {
		let canonical = self.canonical(name);
		let Some(group) = self.alias_groups.get(canonical) else {
			return Vec::new();
		};
		std::iter::once(canonical)
			.chain(group.iter().map(String::as_str))
			.filter(|candidate| *candidate != name)
			.map(str::to_owned)
			.collect()
	}

	fn has_definition_for(&self, name: &str) -> bool {
		self.definitions.contains_key(name)
	}

	fn is_factory_for(&self, name: &str) -> bool {
		self.factories.contains_key(self.canonical(name))
	}

	fn factory_produced_type(&self, name: &str) -> Option<ClassDescriptor> {
		self.factories.get(self.canonical(name)).cloned().flatten()
	}

	fn declared_generic_type_for(&self, definition_name: &str) -> Option<FunctionType> {
		self.definitions.get(definition_name).cloned().flatten()
	}
}

/// Builder for [`MemoryComponentRegistry`].
#[derive(Debug, Default)]
pub struct MemoryComponentRegistryBuilder {
	inner: MemoryComponentRegistry,
}

impl MemoryComponentRegistryBuilder {
	/// Adds a component under `name`, replacing any previous one.
	pub fn component(mut self, name: impl Into<String>, component: Component) -> Self {
		self.inner.components.insert(name.into(), component);
		self
	}

	/// Adds a component together with its definition.
	pub fn defined(self, name: impl Into<String>, component: Component, declared: Option<FunctionType>) -> Self {
		let name = name.into();
		self.component(name.clone(), component).definition(name, declared)
	}

	/// Registers a component definition, optionally with a declared signature.
	pub fn definition(mut self, name: impl Into<String>, declared: Option<FunctionType>) -> Self {
		self.inner.definitions.insert(name.into(), declared);
		self
	}

	/// Makes `alias` resolve to `name`.
	pub fn alias(mut self, name: impl Into<String>, alias: impl Into<String>) -> Self {
		let (name, alias) = (name.into(), alias.into());
		self.inner.aliases.insert(alias.clone(), name.clone());
		self.inner.alias_groups.entry(name).or_default().push(alias);
		self
	}

	/// Adds a factory-produced component and records what the factory reports it produces.
	pub fn factory(mut self, name: impl Into<String>, produced: Component, produced_type: Option<ClassDescriptor>) -> Self {
		let name = name.into();
		self.inner.factories.insert(name.clone(), produced_type);
		self.component(name, produced)
	}

	/// Attaches a qualifier to the component registered as `name`.
	pub fn qualifier(mut self, name: impl Into<String>, qualifier: impl Into<String>) -> Self {
		self.inner.qualifiers.entry(qualifier.into()).or_default().push(name.into());
		self
	}

	pub fn build(self) -> MemoryComponentRegistry {
		self.inner
	}
}
