//! Function catalog with on-demand discovery.
//!
//! The catalog maps names to callables: producers (no input), transforms
//! (input to output) and consumers (input, no output). When a lookup names a
//! function the catalog does not hold yet, the host's component registry is
//! searched, the component is typed and wrapped, and the result is registered
//! for every later lookup.
//!
//! # Modules
//!
//! | Module | Role |
//! |--------|------|
//! | [`definition`] | Splits definitions into candidate names. |
//! | [`bridge`] | [`ComponentRegistry`], the read-only view of the host registry. |
//! | [`discover`] | [`TypeDiscoverer`], the ordered type-resolution rules. |
//! | [`adapter`] | Wraps a plain object's single method into a callable. |
//! | [`catalog`] | [`FunctionCatalog`] and the in-memory [`SimpleCatalog`]. |
//! | [`facade`] | [`DiscoveringCatalog`], discovery layered over a base catalog. |
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use fabric_catalog::{
//! 	CatalogProperties, DiscoveringCatalog, FnInstance, FunctionCatalog, FunctionType, MemoryComponentRegistry,
//! 	TypeShape,
//! };
//! use serde_json::{Value, json};
//!
//! let text = TypeShape::named("String");
//! let upper = FnInstance::transform("Upper", |v: Value| Ok(json!(v.as_str().unwrap_or_default().to_uppercase())))
//! 	.with_generics(FunctionType::transform(text.clone(), text));
//! let components = MemoryComponentRegistry::builder()
//! 	.component("upper", upper.into_component())
//! 	.build();
//!
//! let catalog = DiscoveringCatalog::new(Arc::new(components), CatalogProperties::default());
//! let upper = catalog.lookup(None, "upper", &[]).unwrap();
//! assert_eq!(upper.apply(json!("hi")).unwrap(), json!("HI"));
//! ```

pub mod adapter;
pub mod bridge;
pub mod catalog;
pub mod component;
pub mod config;
pub mod definition;
pub mod discover;
pub mod error;
pub mod facade;
pub mod registration;
pub mod types;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use adapter::MethodAdapter;
pub use bridge::{ComponentRegistry, MemoryComponentRegistry};
pub use catalog::{FunctionCatalog, ResolvedFunction, SimpleCatalog};
pub use component::{CandidateKind, ClassDescriptor, ClassFlags, Component, FnInstance, Instance, MethodDescriptor, MethodFlags};
pub use config::CatalogProperties;
pub use discover::{Discovered, TypeDiscoverer, TypeSource};
pub use error::{BridgeError, ConfigError, InvocationError, MethodDiscoveryError, RegisterError};
pub use facade::{DiscoveringCatalog, Resolution};
pub use registration::Registration;
pub use types::{CapabilitySet, FunctionKind, FunctionType, TypeShape};
