#![allow(dead_code)]

use std::sync::Arc;

use fabric_catalog::{
	BridgeError, ClassDescriptor, Component, ComponentRegistry, FnInstance, FunctionKind, FunctionType, Instance, InvocationError,
	MemoryComponentRegistry, MethodDescriptor, TypeShape,
};
use parking_lot::Mutex;
use rustc_hash::{FxHashMap, FxHashSet};
use serde_json::{Value, json};

pub fn text() -> TypeShape {
	TypeShape::named("String")
}

/// Plain object: a price list with one lookup method.
pub struct PriceList {
	class: ClassDescriptor,
	prices: FxHashMap<&'static str, i64>,
}

impl PriceList {
	pub fn new() -> Self {
		Self {
			class: ClassDescriptor::new("PriceList").with_method(MethodDescriptor::new("price_of", text(), TypeShape::named("i64"))),
			prices: [("apple", 3), ("pear", 4)].into_iter().collect(),
		}
	}
}

impl Instance for PriceList {
	fn class(&self) -> &ClassDescriptor {
		&self.class
	}

	fn invoke(&self, method: &str, input: Value) -> Result<Value, InvocationError> {
		match (method, input.as_str()) {
			("price_of", Some(item)) => self
				.prices
				.get(item)
				.map(|price| json!(price))
				.ok_or_else(|| InvocationError::Failed(format!("no price for {item}"))),
			("price_of", None) => Err(InvocationError::InvalidInput(input.to_string())),
			_ => Err(InvocationError::NoSuchMethod {
				class: self.class.name.to_string(),
				method: method.to_owned(),
			}),
		}
	}
}

pub fn transform(class: &str, f: fn(&str) -> String) -> Component {
	FnInstance::transform(class, move |input| match input {
		Value::String(s) => Ok(Value::String(f(&s))),
		other => Err(InvocationError::InvalidInput(other.to_string())),
	})
	.with_generics(FunctionType::transform(text(), text()))
	.into_component()
}

/// Registry with `count` transforms named `fn0..fnN`, plus a few fixed entries.
pub fn registry(count: usize) -> MemoryComponentRegistry {
	let mut builder = MemoryComponentRegistry::builder()
		.component("prices", Component::instance(PriceList::new()))
		.component(
			"fruit",
			FnInstance::producer("FruitFn", || Ok(json!("pear")))
				.with_generics(FunctionType::producer(text()))
				.into_component(),
		)
		.component("upper", transform("UpperFn", str::to_uppercase));
	for i in 0..count {
		builder = builder.component(format!("fn{i}"), transform("NumberedFn", str::to_owned));
	}
	builder.build()
}

/// Delegating registry that records how often each name was fetched.
pub struct RecordingRegistry {
	inner: MemoryComponentRegistry,
	fetches: Mutex<FxHashMap<String, usize>>,
}

impl RecordingRegistry {
	pub fn new(inner: MemoryComponentRegistry) -> Arc<Self> {
		Arc::new(Self {
			inner,
			fetches: Mutex::new(FxHashMap::default()),
		})
	}

	pub fn fetches(&self, name: &str) -> usize {
		self.fetches.lock().get(name).copied().unwrap_or(0)
	}

	pub fn total_fetches(&self) -> usize {
		self.fetches.lock().values().sum()
	}
}

impl ComponentRegistry for RecordingRegistry {
	fn contains_by_name(&self, name: &str) -> bool {
		self.inner.contains_by_name(name)
	}

	fn get_by_name(&self, name: &str) -> Option<Component> {
		*self.fetches.lock().entry(name.to_owned()).or_default() += 1;
		self.inner.get_by_name(name)
	}

	fn get_qualified_by_name(&self, name: &str) -> Result<Option<Component>, BridgeError> {
		self.inner.get_qualified_by_name(name)
	}

	fn names_by_capability(&self, kind: FunctionKind) -> FxHashSet<String> {
		self.inner.names_by_capability(kind)
	}

	fn aliases_of(&self, name: &str) -> Vec<String> {
		self.inner.aliases_of(name)
	}

	fn has_definition_for(&self, name: &str) -> bool {
		self.inner.has_definition_for(name)
	}

	fn is_factory_for(&self, name: &str) -> bool {
		self.inner.is_factory_for(name)
	}

	fn factory_produced_type(&self, name: &str) -> Option<ClassDescriptor> {
		self.inner.factory_produced_type(name)
	}

	fn declared_generic_type_for(&self, definition_name: &str) -> Option<FunctionType> {
		self.inner.declared_generic_type_for(definition_name)
	}
}
