//! Function registrations.

use std::fmt;
use std::sync::Arc;

use crate::component::Instance;
use crate::types::{FunctionKind, FunctionType};

/// A callable stored in the catalog under one or more names.
///
/// Cloning is cheap; clones share the target.
#[derive(Clone)]
pub struct Registration {
	names: Arc<[Arc<str>]>,
	target: Arc<dyn Instance>,
	function_type: FunctionType,
}

impl Registration {
	/// Creates a registration with an unresolved type.
	pub fn new(target: Arc<dyn Instance>, name: impl Into<Arc<str>>) -> Self {
		let name: Arc<str> = name.into();
		Self {
			names: Arc::from([name]),
			target,
			function_type: FunctionType::unresolved(),
		}
	}

	pub fn with_type(mut self, function_type: FunctionType) -> Self {
		self.function_type = function_type;
		self
	}

	/// Adds a secondary name. Duplicates are ignored.
	pub fn with_alias(mut self, alias: impl Into<Arc<str>>) -> Self {
		let alias = alias.into();
		if !self.names.contains(&alias) {
			let mut names = self.names.to_vec();
			names.push(alias);
			self.names = Arc::from(names);
		}
		self
	}

	/// Primary name.
	pub fn name(&self) -> &str {
		&self.names[0]
	}

	/// Primary name followed by aliases.
	pub fn names(&self) -> &[Arc<str>] {
		&self.names
	}

	pub fn target(&self) -> &Arc<dyn Instance> {
		&self.target
	}

	pub fn function_type(&self) -> &FunctionType {
		&self.function_type
	}

	pub fn kind(&self) -> FunctionKind {
		self.function_type.kind()
	}
}

impl fmt::Debug for Registration {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Registration")
			.field("names", &self.names)
			.field("class", &self.target.class().name)
			.field("type", &self.function_type)
			.finish()
	}
}
