//! Catalog that discovers missing functions in a component registry.
//!
//! # Lookup flow
//!
//! 1. **Normalize:** an empty definition is replaced by the configured
//!    default; if there is none, the lookup yields nothing.
//! 2. **Check existing:** the base catalog is asked first. A hit returns
//!    without touching the component registry.
//! 3. **Discover and register:** each name the base catalog does not know is
//!    fetched from the registry (by name, then by qualifier), classified,
//!    typed, and registered once. Failures for one name never stop the others.
//! 4. **Delegate:** the base catalog resolves the full definition again.
//!
//! # Counting
//!
//! [`DiscoveringCatalog::size`] and [`DiscoveringCatalog::names`] add the
//! registry's natively callable components to the base catalog's figures.
//! This over-counts components that are also registered and misses plain
//! objects until they have been looked up once.

mod flight;

use std::sync::Arc;

use rustc_hash::FxHashSet;
use tracing::{debug, info, trace};

use self::flight::SingleFlight;
use crate::adapter;
use crate::bridge::ComponentRegistry;
use crate::catalog::{FunctionCatalog, ResolvedFunction, SimpleCatalog};
use crate::component::{CandidateKind, Component};
use crate::config::CatalogProperties;
use crate::definition;
use crate::discover::{TypeDiscoverer, TypeSource};
use crate::error::RegisterError;
use crate::registration::Registration;
use crate::types::{FunctionKind, FunctionType};

/// What happened to one candidate name during discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
	/// Discovered and registered with this type.
	Registered(FunctionType),
	/// Already in the base catalog.
	Present,
	/// The component registry has nothing under this name.
	NotFound,
	/// A plain object without a single functional method.
	Unadaptable,
	/// The base catalog refused the registration.
	Rejected(RegisterError),
}

/// A discovered component on its way to registration.
struct Candidate<'a> {
	name: &'a str,
	component: Component,
	kind: CandidateKind,
}

/// Function catalog backed by a component registry.
pub struct DiscoveringCatalog<C = SimpleCatalog> {
	base: C,
	bridge: Arc<dyn ComponentRegistry>,
	properties: CatalogProperties,
	flights: SingleFlight<Resolution>,
}

impl DiscoveringCatalog<SimpleCatalog> {
	/// Creates a catalog over an empty [`SimpleCatalog`].
	pub fn new(bridge: Arc<dyn ComponentRegistry>, properties: CatalogProperties) -> Self {
		Self::with_base(SimpleCatalog::new(), bridge, properties)
	}
}

impl<C: FunctionCatalog> DiscoveringCatalog<C> {
	pub fn with_base(base: C, bridge: Arc<dyn ComponentRegistry>, properties: CatalogProperties) -> Self {
		Self {
			base,
			bridge,
			properties,
			flights: SingleFlight::new(),
		}
	}

	pub fn base(&self) -> &C {
		&self.base
	}

	pub fn bridge(&self) -> &Arc<dyn ComponentRegistry> {
		&self.bridge
	}

	pub fn properties(&self) -> &CatalogProperties {
		&self.properties
	}

	/// Resolves `definition`, discovering and registering missing names first.
	///
	/// `None` or a blank definition falls back to the configured default.
	pub fn lookup_definition(&self, kind: Option<FunctionKind>, definition: Option<&str>, output_types: &[&str]) -> Option<ResolvedFunction> {
		let raw = definition
			.filter(|d| !d.trim().is_empty())
			.or_else(|| self.properties.default_definition())
			.unwrap_or_default();
		let names = definition::normalize(raw);
		if names.is_empty() {
			debug!(definition = raw, "definition is empty after normalization");
			return None;
		}
		let definition = definition::join(&definition::stages(raw));

		if let Some(found) = self.base.lookup(kind, &definition, output_types) {
			return Some(found);
		}

		let known = self.base.names(None);
		for name in &names {
			if known.contains(name) {
				info!(name = %name, "skipping function already present in the catalog");
				continue;
			}
			self.resolve(name);
		}

		self.base.lookup(kind, &definition, output_types)
	}

	/// Discovers and registers `name` unless it is already known.
	///
	/// Concurrent calls for the same name share one discovery.
	pub fn resolve(&self, name: &str) -> Resolution {
		self.flights.run(name, || {
			if self.base.contains(name) {
				return Resolution::Present;
			}
			self.discover_and_register(name)
		})
	}

	fn discover_and_register(&self, name: &str) -> Resolution {
		let Some(component) = self.find_component(name) else {
			debug!(name, "function not available in the catalog or the component registry");
			return Resolution::NotFound;
		};
		let candidate = Candidate {
			name,
			kind: component.kind(),
			component,
		};
		let Some((registration, source)) = self.registration_for(candidate) else {
			return Resolution::Unadaptable;
		};

		let function_type = registration.function_type().clone();
		match self.base.register(registration) {
			Ok(()) => {
				info!(name, kind = %function_type.kind(), signature = %function_type, ?source, "registered discovered function");
				Resolution::Registered(function_type)
			}
			Err(err) => {
				debug!(name, %err, "discovered function not registered");
				Resolution::Rejected(err)
			}
		}
	}

	fn find_component(&self, name: &str) -> Option<Component> {
		if self.bridge.contains_by_name(name) {
			return self.bridge.get_by_name(name);
		}
		match self.bridge.get_qualified_by_name(name) {
			Ok(found) => found,
			Err(err) => {
				trace!(name, %err, "qualified lookup failed; treating as absent");
				None
			}
		}
	}

	fn registration_for(&self, candidate: Candidate<'_>) -> Option<(Registration, TypeSource)> {
		let Candidate { name, component, kind } = candidate;
		match (&component, kind) {
			(Component::Registration(registration), _) => Some((registration.clone(), TypeSource::Registration)),
			(Component::Instance(target), CandidateKind::AdaptablePojo) => {
				let method = match adapter::discover_functional_method(target.class()) {
					Ok(method) => method.clone(),
					Err(err) => {
						debug!(name, %err, "plain object cannot be adapted");
						return None;
					}
				};
				let function_type = method.function_type();
				let adapted = adapter::adapt(Arc::clone(target), method);
				Some((Registration::new(adapted, name).with_type(function_type), TypeSource::Method))
			}
			(Component::Instance(target), _) => {
				let discovered = TypeDiscoverer::new(self.bridge.as_ref()).discover(&component, name);
				let registration = Registration::new(Arc::clone(target), name).with_type(discovered.function_type);
				Some((registration, discovered.source))
			}
		}
	}
}

impl<C: FunctionCatalog> FunctionCatalog for DiscoveringCatalog<C> {
	fn size(&self) -> usize {
		let visible: usize = FunctionKind::ALL
			.iter()
			.map(|&kind| self.bridge.names_by_capability(kind).len())
			.sum();
		self.base.size() + visible
	}

	fn names(&self, kind: Option<FunctionKind>) -> FxHashSet<String> {
		let mut names = self.base.names(kind);
		match kind {
			Some(kind) => names.extend(self.bridge.names_by_capability(kind)),
			None => {
				for kind in FunctionKind::ALL {
					names.extend(self.bridge.names_by_capability(kind));
				}
			}
		}
		names
	}

	fn lookup(&self, kind: Option<FunctionKind>, definition: &str, output_types: &[&str]) -> Option<ResolvedFunction> {
		self.lookup_definition(kind, Some(definition), output_types)
	}

	fn register(&self, registration: Registration) -> Result<(), RegisterError> {
		self.base.register(registration)
	}

	fn contains(&self, name: &str) -> bool {
		self.base.contains(name) || self.bridge.contains_by_name(name)
	}
}
