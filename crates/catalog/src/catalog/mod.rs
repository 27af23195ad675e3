//! Base function catalog.
//!
//! [`FunctionCatalog`] is the storage-and-lookup surface every catalog
//! implements. [`SimpleCatalog`] keeps registrations in memory;
//! [`crate::DiscoveringCatalog`] layers on-demand discovery over any base.

mod resolved;
mod simple;

pub use resolved::ResolvedFunction;
use rustc_hash::FxHashSet;
pub use simple::SimpleCatalog;

use crate::error::RegisterError;
use crate::registration::Registration;
use crate::types::FunctionKind;

/// A registry of named callables.
pub trait FunctionCatalog: Send + Sync {
	/// Number of known functions.
	fn size(&self) -> usize;

	/// Known function names, restricted to `kind` when given.
	fn names(&self, kind: Option<FunctionKind>) -> FxHashSet<String>;

	/// Resolves a definition (`a`, `a|b`, `a,b`) into a callable.
	///
	/// `output_types` lists the content types the caller accepts from the
	/// result; they are carried on the returned function for the invoker.
	fn lookup(&self, kind: Option<FunctionKind>, definition: &str, output_types: &[&str]) -> Option<ResolvedFunction>;

	/// Stores a registration under all of its names.
	fn register(&self, registration: Registration) -> Result<(), RegisterError>;

	/// Returns true if `name` is known.
	fn contains(&self, name: &str) -> bool;
}
