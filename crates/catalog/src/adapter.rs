//! Adapting plain objects into callables.
//!
//! A plain object qualifies when its class is not synthetic and implements no
//! functional capability natively. Its single functional method is wrapped by
//! a [`MethodAdapter`], which is itself an [`Instance`] with a native
//! [`Instance::call`], so the catalog never needs to tell the two apart.

use std::sync::Arc;

use serde_json::Value;

use crate::component::{ClassDescriptor, ClassFlags, Instance, MethodDescriptor, MethodFlags};
use crate::error::{InvocationError, MethodDiscoveryError};
use crate::types::{FunctionKind, TypeShape};

/// Returns true if objects of this class need adapting to be called.
pub fn is_adaptable(class: &ClassDescriptor) -> bool {
	!class.is_synthetic() && class.capabilities.is_empty()
}

fn is_functional(method: &MethodDescriptor) -> bool {
	method.flags.contains(MethodFlags::PUBLIC)
		&& !method.flags.intersects(MethodFlags::STATIC | MethodFlags::SYNTHETIC | MethodFlags::BRIDGE)
		&& method.input != TypeShape::Void
}

/// Picks the one method of `class` usable as a single-argument function.
///
/// Candidates are public instance methods that take an argument. Zero or
/// several candidates are both errors; nothing is chosen arbitrarily.
pub fn discover_functional_method(class: &ClassDescriptor) -> Result<&MethodDescriptor, MethodDiscoveryError> {
	let mut candidates = class.methods.iter().filter(|m| is_functional(m));
	match (candidates.next(), candidates.next()) {
		(Some(method), None) => Ok(method),
		(None, _) => Err(MethodDiscoveryError::NoCandidate {
			class: class.name.to_string(),
		}),
		(Some(_), Some(_)) => Err(MethodDiscoveryError::Ambiguous {
			class: class.name.to_string(),
			candidates: class
				.methods
				.iter()
				.filter(|m| is_functional(m))
				.map(|m| m.name.to_string())
				.collect(),
		}),
	}
}

/// A plain object's method exposed as a transform.
pub struct MethodAdapter {
	target: Arc<dyn Instance>,
	method: MethodDescriptor,
	class: ClassDescriptor,
}

impl MethodAdapter {
	pub fn new(target: Arc<dyn Instance>, method: MethodDescriptor) -> Self {
		let class = ClassDescriptor::new(format!("{}::{}", target.class().name, method.name))
			.with_flags(ClassFlags::SYNTHETIC | ClassFlags::PROXY)
			.with_capability(FunctionKind::Transform)
			.with_generics(method.function_type());
		Self { target, method, class }
	}
}

impl Instance for MethodAdapter {
	fn class(&self) -> &ClassDescriptor {
		&self.class
	}

	fn call(&self, input: Value) -> Result<Value, InvocationError> {
		self.target.invoke(&self.method.name, input)
	}
}

/// Wraps `method` of `target` into a callable.
pub fn adapt(target: Arc<dyn Instance>, method: MethodDescriptor) -> Arc<dyn Instance> {
	Arc::new(MethodAdapter::new(target, method))
}
