//! Error types for the catalog.
//!
//! Absence is never an error here: lookups that find nothing return `None` or
//! an empty set. These enums cover the failures that are worth reporting.

/// Failure raised while calling a registered function.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvocationError {
	/// The target has no native functional entry point.
	#[error("{class} is not callable")]
	NotCallable { class: String },
	/// The target does not expose the requested method.
	#[error("{class} has no method '{method}'")]
	NoSuchMethod { class: String, method: String },
	/// The argument does not fit the expected input shape.
	#[error("invalid input: {0}")]
	InvalidInput(String),
	/// The function body failed.
	#[error("{0}")]
	Failed(String),
}

/// Registration rejected by the base catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegisterError {
	/// One of the registration's names is already taken.
	#[error("function '{name}' is already registered")]
	Duplicate { name: String },
	/// The registration carries no usable name.
	#[error("registration has no name")]
	Unnamed,
}

/// Failure to pick the single functional method of a plain object.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MethodDiscoveryError {
	#[error("{class} exposes no method usable as a function")]
	NoCandidate { class: String },
	#[error("{class} exposes several functional methods: {}", .candidates.join(", "))]
	Ambiguous { class: String, candidates: Vec<String> },
}

/// Failure of the qualified lookup path of a component registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BridgeError {
	#[error("qualifier '{qualifier}' matches {matches} components")]
	Ambiguous { qualifier: String, matches: usize },
}

/// Failure to load [`crate::CatalogProperties`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("invalid catalog configuration: {0}")]
	Toml(#[from] toml::de::Error),
}
