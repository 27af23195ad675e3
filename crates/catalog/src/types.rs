//! Function type signatures.

use std::fmt;
use std::sync::Arc;

/// One side (input or output) of a function signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum TypeShape {
	/// Nothing is known yet.
	#[default]
	Unresolved,
	/// The generic top type; any value is accepted.
	Any,
	/// No value: the input of a producer or the output of a consumer.
	Void,
	/// A concrete type, by name.
	Named(Arc<str>),
}

impl TypeShape {
	/// Creates a concrete shape.
	pub fn named(name: impl Into<Arc<str>>) -> Self {
		Self::Named(name.into())
	}

	/// Returns true for [`TypeShape::Unresolved`].
	pub fn is_unresolved(&self) -> bool {
		matches!(self, Self::Unresolved)
	}

	/// Returns true when the shape says something more precise than "any value".
	pub fn is_concrete(&self) -> bool {
		matches!(self, Self::Void | Self::Named(_))
	}
}

impl fmt::Display for TypeShape {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Unresolved => f.write_str("?"),
			Self::Any => f.write_str("any"),
			Self::Void => f.write_str("()"),
			Self::Named(name) => f.write_str(name),
		}
	}
}

/// Capability tag of a callable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FunctionKind {
	/// Takes no input.
	Producer,
	/// Maps an input to an output.
	Transform,
	/// Takes an input, yields no output.
	Consumer,
}

impl FunctionKind {
	/// All kinds, in declaration order.
	pub const ALL: [FunctionKind; 3] = [Self::Producer, Self::Transform, Self::Consumer];

	/// Returns the bitflag for this kind.
	pub const fn as_set(self) -> CapabilitySet {
		match self {
			Self::Producer => CapabilitySet::PRODUCER,
			Self::Transform => CapabilitySet::TRANSFORM,
			Self::Consumer => CapabilitySet::CONSUMER,
		}
	}
}

impl fmt::Display for FunctionKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Producer => "producer",
			Self::Transform => "transform",
			Self::Consumer => "consumer",
		})
	}
}

bitflags::bitflags! {
	/// Functional capabilities a class implements natively.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct CapabilitySet: u8 {
		const PRODUCER = 1 << 0;
		const TRANSFORM = 1 << 1;
		const CONSUMER = 1 << 2;
	}
}

impl From<FunctionKind> for CapabilitySet {
	fn from(kind: FunctionKind) -> Self {
		kind.as_set()
	}
}

impl FromIterator<FunctionKind> for CapabilitySet {
	fn from_iter<I: IntoIterator<Item = FunctionKind>>(iter: I) -> Self {
		iter.into_iter()
			.fold(CapabilitySet::empty(), |set, kind| set | kind.as_set())
	}
}

impl CapabilitySet {
	/// Returns true if the set contains the given kind.
	pub const fn has(self, kind: FunctionKind) -> bool {
		self.contains(kind.as_set())
	}
}

/// Input/output signature of a registered function.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FunctionType {
	pub input: TypeShape,
	pub output: TypeShape,
}

impl FunctionType {
	pub fn new(input: TypeShape, output: TypeShape) -> Self {
		Self { input, output }
	}

	/// A signature with neither side known.
	pub fn unresolved() -> Self {
		Self::default()
	}

	pub fn producer(output: TypeShape) -> Self {
		Self::new(TypeShape::Void, output)
	}

	pub fn transform(input: TypeShape, output: TypeShape) -> Self {
		Self::new(input, output)
	}

	pub fn consumer(input: TypeShape) -> Self {
		Self::new(input, TypeShape::Void)
	}

	/// Derives the capability tag from the shapes.
	pub fn kind(&self) -> FunctionKind {
		match (&self.input, &self.output) {
			(TypeShape::Void, _) => FunctionKind::Producer,
			(_, TypeShape::Void) => FunctionKind::Consumer,
			_ => FunctionKind::Transform,
		}
	}

	/// Returns true when both sides are still unresolved.
	pub fn is_unresolved(&self) -> bool {
		self.input.is_unresolved() && self.output.is_unresolved()
	}

	/// Returns true when the input side names a concrete type.
	pub fn is_input_concrete(&self) -> bool {
		self.input.is_concrete()
	}

	/// Fills unresolved sides from `other`; resolved sides are kept.
	pub fn refine(mut self, other: &FunctionType) -> Self {
		if self.input.is_unresolved() {
			self.input = other.input.clone();
		}
		if self.output.is_unresolved() {
			self.output = other.output.clone();
		}
		self
	}
}

impl fmt::Display for FunctionType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} -> {}", self.input, self.output)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn kind_follows_void_sides() {
		let text = TypeShape::named("String");
		assert_eq!(FunctionType::producer(text.clone()).kind(), FunctionKind::Producer);
		assert_eq!(FunctionType::consumer(text.clone()).kind(), FunctionKind::Consumer);
		assert_eq!(FunctionType::transform(text.clone(), text).kind(), FunctionKind::Transform);
		assert_eq!(FunctionType::unresolved().kind(), FunctionKind::Transform);
	}

	#[test]
	fn refine_only_replaces_placeholders() {
		let partial = FunctionType::new(TypeShape::Unresolved, TypeShape::named("u32"));
		let better = FunctionType::new(TypeShape::named("String"), TypeShape::named("i64"));
		let refined = partial.refine(&better);
		assert_eq!(refined.input, TypeShape::named("String"));
		assert_eq!(refined.output, TypeShape::named("u32"));
	}

	#[test]
	fn top_type_is_not_concrete() {
		assert!(!TypeShape::Any.is_concrete());
		assert!(!TypeShape::Unresolved.is_concrete());
		assert!(TypeShape::Void.is_concrete());
		assert!(TypeShape::named("Order").is_concrete());
	}

	#[test]
	fn capability_set_collects_kinds() {
		let set: CapabilitySet = [FunctionKind::Producer, FunctionKind::Consumer].into_iter().collect();
		assert!(set.has(FunctionKind::Producer));
		assert!(!set.has(FunctionKind::Transform));
		assert!(set.has(FunctionKind::Consumer));
	}

	#[test]
	fn display_renders_arrow() {
		let ft = FunctionType::transform(TypeShape::named("String"), TypeShape::Any);
		assert_eq!(ft.to_string(), "String -> any");
	}
}
