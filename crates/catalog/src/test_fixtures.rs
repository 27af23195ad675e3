use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::{Value, json};

use crate::component::{ClassDescriptor, Component, FnInstance, Instance, MethodDescriptor, MethodFlags};
use crate::error::InvocationError;
use crate::types::{FunctionType, TypeShape};

pub(crate) fn text() -> TypeShape {
	TypeShape::named("String")
}

/// Plain object with one public instance method, `shout: String -> String`.
pub(crate) struct Shouter {
	class: ClassDescriptor,
}

impl Shouter {
	pub(crate) fn new() -> Self {
		Self {
			class: ClassDescriptor::new("Shouter")
				.with_method(MethodDescriptor::new("shout", text(), text()))
				.with_method(MethodDescriptor::new("describe", TypeShape::Void, text()))
				.with_method(MethodDescriptor::new("whisper", text(), text()).with_flags(MethodFlags::empty()))
				.with_method(MethodDescriptor::new("of", text(), TypeShape::named("Shouter")).with_flags(MethodFlags::PUBLIC | MethodFlags::STATIC)),
		}
	}
}

impl Instance for Shouter {
	fn class(&self) -> &ClassDescriptor {
		&self.class
	}

	fn invoke(&self, method: &str, input: Value) -> Result<Value, InvocationError> {
		match method {
			"shout" => match input {
				Value::String(s) => Ok(Value::String(s.to_uppercase())),
				other => Err(InvocationError::InvalidInput(format!("expected string, got {other}"))),
			},
			_ => Err(InvocationError::NoSuchMethod {
				class: self.class.name.to_string(),
				method: method.to_owned(),
			}),
		}
	}
}

/// Plain object with two candidate methods.
pub(crate) struct Calculator {
	class: ClassDescriptor,
}

impl Calculator {
	pub(crate) fn new() -> Self {
		let number = TypeShape::named("i64");
		Self {
			class: ClassDescriptor::new("Calculator")
				.with_method(MethodDescriptor::new("double", number.clone(), number.clone()))
				.with_method(MethodDescriptor::new("negate", number.clone(), number)),
		}
	}
}

impl Instance for Calculator {
	fn class(&self) -> &ClassDescriptor {
		&self.class
	}
}

/// Plain object exposing nothing usable.
pub(crate) struct Inert {
	class: ClassDescriptor,
}

impl Inert {
	pub(crate) fn new() -> Self {
		Self {
			class: ClassDescriptor::new("Inert"),
		}
	}
}

impl Instance for Inert {
	fn class(&self) -> &ClassDescriptor {
		&self.class
	}
}

pub(crate) fn uppercase() -> Component {
	FnInstance::transform("UppercaseFn", |input| match input {
		Value::String(s) => Ok(Value::String(s.to_uppercase())),
		other => Err(InvocationError::InvalidInput(other.to_string())),
	})
	.with_generics(FunctionType::transform(text(), text()))
	.into_component()
}

pub(crate) fn reverse() -> Component {
	FnInstance::transform("ReverseFn", |input| match input {
		Value::String(s) => Ok(Value::String(s.chars().rev().collect())),
		other => Err(InvocationError::InvalidInput(other.to_string())),
	})
	.with_generics(FunctionType::transform(text(), text()))
	.into_component()
}

pub(crate) fn greeting() -> Component {
	FnInstance::producer("GreetingFn", || Ok(json!("hello")))
		.with_generics(FunctionType::producer(text()))
		.into_component()
}

/// Consumer that records every value it receives.
pub(crate) fn sink(store: Arc<Mutex<Vec<Value>>>) -> Component {
	FnInstance::consumer("SinkFn", move |input| {
		store.lock().push(input);
		Ok(())
	})
	.with_generics(FunctionType::consumer(text()))
	.into_component()
}

/// Transform whose class carries no generic signature.
pub(crate) fn erased_identity() -> Component {
	FnInstance::transform("IdentityFn", Ok).into_component()
}
