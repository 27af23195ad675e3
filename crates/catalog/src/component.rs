//! Runtime shape of the objects held by a component registry.
//!
//! Components describe themselves through a [`ClassDescriptor`] instead of
//! being inspected reflectively. The descriptor carries the functional
//! capabilities the object implements natively, the generic signature its
//! class declares (if any survives erasure), and the methods it exposes.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::InvocationError;
use crate::registration::Registration;
use crate::types::{CapabilitySet, FunctionKind, FunctionType, TypeShape};

bitflags::bitflags! {
	/// Class-level markers.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct ClassFlags: u8 {
		/// Compiler or runtime generated (closures, generated wrappers).
		const SYNTHETIC = 1 << 0;
		/// Routing construct dispatching to other functions.
		const ROUTING = 1 << 1;
		/// Wrapper standing in for another object.
		const PROXY = 1 << 2;
	}
}

bitflags::bitflags! {
	/// Method-level markers.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct MethodFlags: u8 {
		const PUBLIC = 1 << 0;
		const STATIC = 1 << 1;
		const SYNTHETIC = 1 << 2;
		const BRIDGE = 1 << 3;
	}
}

/// A method exposed by a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
	pub name: Arc<str>,
	pub input: TypeShape,
	pub output: TypeShape,
	pub flags: MethodFlags,
}

impl MethodDescriptor {
	/// Creates a public instance method.
	pub fn new(name: impl Into<Arc<str>>, input: TypeShape, output: TypeShape) -> Self {
		Self {
			name: name.into(),
			input,
			output,
			flags: MethodFlags::PUBLIC,
		}
	}

	pub fn with_flags(mut self, flags: MethodFlags) -> Self {
		self.flags = flags;
		self
	}

	/// Signature of this method viewed as a function.
	pub fn function_type(&self) -> FunctionType {
		FunctionType::new(self.input.clone(), self.output.clone())
	}
}

/// Self-description of a runtime class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassDescriptor {
	pub name: Arc<str>,
	pub flags: ClassFlags,
	pub capabilities: CapabilitySet,
	/// Signature declared by the class, when it is not erased.
	pub generics: Option<FunctionType>,
	pub methods: Vec<MethodDescriptor>,
}

impl ClassDescriptor {
	pub fn new(name: impl Into<Arc<str>>) -> Self {
		Self {
			name: name.into(),
			flags: ClassFlags::empty(),
			capabilities: CapabilitySet::empty(),
			generics: None,
			methods: Vec::new(),
		}
	}

	pub fn with_flags(mut self, flags: ClassFlags) -> Self {
		self.flags |= flags;
		self
	}

	pub fn with_capability(mut self, kind: FunctionKind) -> Self {
		self.capabilities |= kind.as_set();
		self
	}

	pub fn with_generics(mut self, generics: FunctionType) -> Self {
		self.generics = Some(generics);
		self
	}

	pub fn with_method(mut self, method: MethodDescriptor) -> Self {
		self.methods.push(method);
		self
	}

	pub fn is_synthetic(&self) -> bool {
		self.flags.contains(ClassFlags::SYNTHETIC)
	}

	pub fn is_routing(&self) -> bool {
		self.flags.contains(ClassFlags::ROUTING)
	}
}

/// An object living in the component registry.
///
/// Callable-shaped objects override [`Instance::call`]; plain objects expose
/// their methods through [`Instance::invoke`].
pub trait Instance: Send + Sync + 'static {
	/// Runtime class of this object.
	fn class(&self) -> &ClassDescriptor;

	/// Native functional entry point.
	///
	/// Producers ignore `input`; consumers return [`Value::Null`].
	fn call(&self, input: Value) -> Result<Value, InvocationError> {
		let _ = input;
		Err(InvocationError::NotCallable {
			class: self.class().name.to_string(),
		})
	}

	/// Calls one of the methods listed by [`Instance::class`].
	fn invoke(&self, method: &str, input: Value) -> Result<Value, InvocationError> {
		let _ = input;
		Err(InvocationError::NoSuchMethod {
			class: self.class().name.to_string(),
			method: method.to_owned(),
		})
	}
}

type Body = dyn Fn(Value) -> Result<Value, InvocationError> + Send + Sync;

/// Closure-backed callable.
///
/// The class is synthetic, like any compiler-generated closure type, and
/// declares exactly one capability.
pub struct FnInstance {
	class: ClassDescriptor,
	body: Box<Body>,
}

impl FnInstance {
	fn with_kind(class: &str, kind: FunctionKind, body: Box<Body>) -> Self {
		Self {
			class: ClassDescriptor::new(class)
				.with_flags(ClassFlags::SYNTHETIC)
				.with_capability(kind),
			body,
		}
	}

	pub fn producer<F>(class: &str, f: F) -> Self
	where
		F: Fn() -> Result<Value, InvocationError> + Send + Sync + 'static,
	{
		Self::with_kind(class, FunctionKind::Producer, Box::new(move |_| f()))
	}

	pub fn transform<F>(class: &str, f: F) -> Self
	where
		F: Fn(Value) -> Result<Value, InvocationError> + Send + Sync + 'static,
	{
		Self::with_kind(class, FunctionKind::Transform, Box::new(f))
	}

	pub fn consumer<F>(class: &str, f: F) -> Self
	where
		F: Fn(Value) -> Result<(), InvocationError> + Send + Sync + 'static,
	{
		Self::with_kind(
			class,
			FunctionKind::Consumer,
			Box::new(move |input| f(input).map(|()| Value::Null)),
		)
	}

	/// Declares the generic signature carried by the class.
	pub fn with_generics(mut self, generics: FunctionType) -> Self {
		self.class.generics = Some(generics);
		self
	}

	/// Replaces the class flags, e.g. to mark a routing construct.
	pub fn with_flags(mut self, flags: ClassFlags) -> Self {
		self.class.flags = flags;
		self
	}

	pub fn into_component(self) -> Component {
		Component::Instance(Arc::new(self))
	}
}

impl Instance for FnInstance {
	fn class(&self) -> &ClassDescriptor {
		&self.class
	}

	fn call(&self, input: Value) -> Result<Value, InvocationError> {
		(self.body)(input)
	}
}

impl fmt::Debug for FnInstance {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FnInstance").field("class", &self.class.name).finish_non_exhaustive()
	}
}

/// Anything the component registry can hand out under a name.
#[derive(Clone)]
pub enum Component {
	/// Already wrapped as a function registration.
	Registration(Registration),
	/// A runtime object.
	Instance(Arc<dyn Instance>),
}

impl Component {
	pub fn instance<T: Instance>(instance: T) -> Self {
		Self::Instance(Arc::new(instance))
	}

	/// Runtime class; registrations report their target's class.
	pub fn class(&self) -> &ClassDescriptor {
		match self {
			Self::Registration(registration) => registration.target().class(),
			Self::Instance(instance) => instance.class(),
		}
	}

	/// Sorts this component into one of the discovery branches.
	pub fn kind(&self) -> CandidateKind {
		match self {
			Self::Registration(_) => CandidateKind::AlreadyRegistered,
			Self::Instance(instance) if crate::adapter::is_adaptable(instance.class()) => CandidateKind::AdaptablePojo,
			Self::Instance(_) => CandidateKind::CallableShaped,
		}
	}
}

impl fmt::Debug for Component {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Registration(registration) => f.debug_tuple("Registration").field(registration).finish(),
			Self::Instance(instance) => f.debug_tuple("Instance").field(&instance.class().name).finish(),
		}
	}
}

/// Discovery branch a candidate falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateKind {
	/// Registered unchanged.
	AlreadyRegistered,
	/// Natively callable, or synthetic; typed by the discoverer.
	CallableShaped,
	/// Plain object; its single method gets adapted.
	AdaptablePojo,
}
