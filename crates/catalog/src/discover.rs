//! Function type discovery.
//!
//! # Rule chain
//!
//! Rules are tried in order; the first one with an opinion wins.
//!
//! 1. **Routing:** routing constructs take the type declared on their
//!    definition, since their own class is generic.
//! 2. **Registration:** registrations carry an authoritative type.
//! 3. **Factory:** factory-bound names take the type of the produced class.
//! 4. **Class:** the candidate's own class. Always has an opinion.
//!
//! A class-derived result is then refined: when a definition exists for the
//! resolved definition name and the class-derived input is unresolved or the
//! top type, the definition's declared type replaces it.
//!
//! Discovery never fails and never touches catalog state.

use std::borrow::Cow;

use crate::bridge::ComponentRegistry;
use crate::component::{ClassDescriptor, Component};
use crate::types::{FunctionKind, FunctionType, TypeShape};

/// Which rule produced a discovered type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeSource {
	Routing,
	Registration,
	Factory,
	Class,
	/// Class result replaced by the definition's declared type.
	Declared,
	/// Signature of an adapted plain object's method.
	Method,
}

/// Outcome of [`TypeDiscoverer::discover`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovered {
	pub function_type: FunctionType,
	pub source: TypeSource,
}

struct DiscoveryContext<'a> {
	candidate: &'a Component,
	name: &'a str,
	bridge: &'a dyn ComponentRegistry,
}

type Rule = fn(&DiscoveryContext<'_>) -> Option<FunctionType>;

const RULES: &[(TypeSource, Rule)] = &[
	(TypeSource::Routing, from_routing),
	(TypeSource::Registration, from_registration),
	(TypeSource::Factory, from_factory),
	(TypeSource::Class, from_candidate_class),
];

fn from_routing(cx: &DiscoveryContext<'_>) -> Option<FunctionType> {
	match cx.candidate {
		Component::Instance(instance) if instance.class().is_routing() => cx.bridge.declared_generic_type_for(cx.name),
		_ => None,
	}
}

fn from_registration(cx: &DiscoveryContext<'_>) -> Option<FunctionType> {
	match cx.candidate {
		Component::Registration(registration) => Some(registration.function_type().clone()),
		Component::Instance(_) => None,
	}
}

fn from_factory(cx: &DiscoveryContext<'_>) -> Option<FunctionType> {
	if !cx.bridge.is_factory_for(cx.name) {
		return None;
	}
	cx.bridge.factory_produced_type(cx.name).map(|class| type_of_class(&class))
}

fn from_candidate_class(cx: &DiscoveryContext<'_>) -> Option<FunctionType> {
	Some(type_of_class(cx.candidate.class()))
}

/// Best-effort signature of a class.
///
/// Uses the declared generics where present and fills the sides implied by a
/// single native capability.
pub fn type_of_class(class: &ClassDescriptor) -> FunctionType {
	let declared = class.generics.clone().unwrap_or_default();
	let caps = class.capabilities;
	let implied = if caps == FunctionKind::Producer.as_set() {
		FunctionType::new(TypeShape::Void, TypeShape::Unresolved)
	} else if caps == FunctionKind::Consumer.as_set() {
		FunctionType::new(TypeShape::Unresolved, TypeShape::Void)
	} else {
		FunctionType::unresolved()
	};
	declared.refine(&implied)
}

/// Derives function types for discovered candidates.
pub struct TypeDiscoverer<'a> {
	bridge: &'a dyn ComponentRegistry,
}

impl<'a> TypeDiscoverer<'a> {
	pub fn new(bridge: &'a dyn ComponentRegistry) -> Self {
		Self { bridge }
	}

	/// Determines the signature of `candidate`, registered as `name`.
	pub fn discover(&self, candidate: &Component, name: &str) -> Discovered {
		let cx = DiscoveryContext {
			candidate,
			name,
			bridge: self.bridge,
		};
		let (source, function_type) = RULES
			.iter()
			.find_map(|(source, rule)| rule(&cx).map(|ft| (*source, ft)))
			.unwrap_or_else(|| (TypeSource::Class, type_of_class(candidate.class())));

		if source == TypeSource::Class {
			return self.refine_from_definition(function_type, name);
		}
		Discovered { function_type, source }
	}

	fn refine_from_definition(&self, function_type: FunctionType, name: &str) -> Discovered {
		let definition = self.discover_definition_name(name);
		if !function_type.is_input_concrete() && self.bridge.has_definition_for(&definition) {
			if let Some(declared) = self.bridge.declared_generic_type_for(&definition) {
				return Discovered {
					function_type: declared,
					source: TypeSource::Declared,
				};
			}
		}
		Discovered {
			function_type,
			source: TypeSource::Class,
		}
	}

	/// Finds the definition name behind `name`.
	///
	/// Returns the first alias of `name` that has a definition, or `name`
	/// itself when none does.
	pub fn discover_definition_name<'n>(&self, name: &'n str) -> Cow<'n, str> {
		self.bridge
			.aliases_of(name)
			.into_iter()
			.find(|alias| self.bridge.has_definition_for(alias))
			.map_or(Cow::Borrowed(name), Cow::Owned)
	}
}
