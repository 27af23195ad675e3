//! Read-only view over the broader component registry.
//!
//! The catalog reaches named objects of the host runtime only through
//! [`ComponentRegistry`]. The registry is passed in explicitly when the
//! catalog is built; nothing is looked up ambiently.

mod memory;

pub use memory::{MemoryComponentRegistry, MemoryComponentRegistryBuilder};
use rustc_hash::FxHashSet;

use crate::component::{ClassDescriptor, Component};
use crate::error::BridgeError;
use crate::types::{FunctionKind, FunctionType};

/// Operations the catalog needs from the host's component registry.
pub trait ComponentRegistry: Send + Sync {
	/// Returns true if a component (or alias) with this name exists.
	fn contains_by_name(&self, name: &str) -> bool;

	/// Returns the component registered under `name` or one of its aliases.
	fn get_by_name(&self, name: &str) -> Option<Component>;

	/// Secondary lookup through qualifier bindings.
	///
	/// There is no existence check for this path; callers treat any error as
	/// "absent".
	fn get_qualified_by_name(&self, name: &str) -> Result<Option<Component>, BridgeError>;

	/// Names of components implementing the given capability natively.
	fn names_by_capability(&self, kind: FunctionKind) -> FxHashSet<String>;

	/// Other names of the alias group `name` belongs to.
	fn aliases_of(&self, name: &str) -> Vec<String>;

	/// Returns true if a component definition is registered under exactly `name`.
	fn has_definition_for(&self, name: &str) -> bool;

	/// Returns true if `name` is bound to a factory rather than an instance.
	fn is_factory_for(&self, name: &str) -> bool;

	/// Class of the objects the factory bound to `name` produces.
	fn factory_produced_type(&self, name: &str) -> Option<ClassDescriptor>;

	/// Signature declared on the component definition itself.
	fn declared_generic_type_for(&self, definition_name: &str) -> Option<FunctionType>;
}
