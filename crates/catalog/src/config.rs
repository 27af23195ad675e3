//! Catalog configuration.

use serde::Deserialize;

use crate::error::ConfigError;

/// Environment variable holding the default function definition.
pub const DEFINITION_ENV: &str = "FABRIC_FUNCTION_DEFINITION";

/// Process-level catalog settings.
///
/// ```toml
/// [function]
/// definition = "uppercase|reverse"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CatalogProperties {
	/// Definition used by lookups that do not name one.
	#[serde(default)]
	pub definition: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
	#[serde(default)]
	function: Option<CatalogProperties>,
	#[serde(default)]
	definition: Option<String>,
}

impl CatalogProperties {
	pub fn with_definition(definition: impl Into<String>) -> Self {
		Self {
			definition: Some(definition.into()),
		}
	}

	/// Parses a TOML document; `function.definition` wins over a top-level `definition`.
	pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
		let file: ConfigFile = toml::from_str(source)?;
		let definition = file.function.and_then(|f| f.definition).or(file.definition);
		Ok(Self { definition }.normalized())
	}

	/// Reads [`DEFINITION_ENV`] from the process environment.
	pub fn from_env() -> Self {
		Self::from_env_with(|key| std::env::var(key).ok())
	}

	/// Reads settings through `lookup` instead of the process environment.
	pub fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> Self {
		Self {
			definition: lookup(DEFINITION_ENV),
		}
		.normalized()
	}

	/// The default definition, if one is set and not blank.
	pub fn default_definition(&self) -> Option<&str> {
		self.definition.as_deref().map(str::trim).filter(|d| !d.is_empty())
	}

	fn normalized(mut self) -> Self {
		if self.definition.as_deref().is_some_and(|d| d.trim().is_empty()) {
			self.definition = None;
		}
		self
	}
}
