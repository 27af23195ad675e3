use serde_json::Value;

use crate::error::InvocationError;
use crate::registration::Registration;
use crate::types::{FunctionKind, FunctionType};

/// Result of a catalog lookup: one registration or a composition of several.
#[derive(Debug, Clone)]
pub struct ResolvedFunction {
	definition: String,
	stages: Vec<Registration>,
	function_type: FunctionType,
	output_types: Vec<String>,
}

impl ResolvedFunction {
	/// Composes `stages` in order. Returns `None` when `stages` is empty.
	pub(crate) fn compose(definition: String, stages: Vec<Registration>, output_types: &[&str]) -> Option<Self> {
		let first = stages.first()?;
		let last = stages.last()?;
		let function_type = FunctionType::new(first.function_type().input.clone(), last.function_type().output.clone());
		Some(Self {
			definition,
			stages,
			function_type,
			output_types: output_types.iter().map(|t| (*t).to_owned()).collect(),
		})
	}

	/// Canonical `a|b` form of the definition.
	pub fn definition(&self) -> &str {
		&self.definition
	}

	pub fn stages(&self) -> &[Registration] {
		&self.stages
	}

	pub fn function_type(&self) -> &FunctionType {
		&self.function_type
	}

	pub fn kind(&self) -> FunctionKind {
		self.function_type.kind()
	}

	pub fn output_types(&self) -> &[String] {
		&self.output_types
	}

	pub fn is_composed(&self) -> bool {
		self.stages.len() > 1
	}

	/// Feeds `input` through every stage, stopping at the first failure.
	pub fn apply(&self, input: Value) -> Result<Value, InvocationError> {
		self.stages
			.iter()
			.try_fold(input, |value, stage| stage.target().call(value))
	}

	/// Runs a producer.
	pub fn get(&self) -> Result<Value, InvocationError> {
		self.apply(Value::Null)
	}
}
