//! In-memory base catalog with atomic publication.
//!
//! # Concurrency
//!
//! - **Reads:** Wait-free (atomic load of the current snapshot).
//! - **Writes:** Lock-free insert-if-absent (CAS retry loop in
//!   [`SimpleCatalog::register`]). Two writers racing on different names
//!   both land; two writers racing on the same name yield exactly one
//!   registration and one [`RegisterError::Duplicate`].

use std::sync::Arc;

use arc_swap::ArcSwap;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::warn;

use super::{FunctionCatalog, ResolvedFunction};
use crate::definition;
use crate::error::RegisterError;
use crate::registration::Registration;
use crate::types::FunctionKind;

#[derive(Default)]
struct Snapshot {
	table: Arc<[Registration]>,
	/// Every name and alias to its slot in `table`.
	by_name: Arc<FxHashMap<Arc<str>, usize>>,
}

impl Snapshot {
	fn get(&self, name: &str) -> Option<&Registration> {
		self.by_name.get(name).map(|&idx| &self.table[idx])
	}
}

/// Registrations kept in memory for the lifetime of the catalog.
#[derive(Default)]
pub struct SimpleCatalog {
	snap: ArcSwap<Snapshot>,
}

impl SimpleCatalog {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the registration stored under `name`.
	pub fn get(&self, name: &str) -> Option<Registration> {
		self.snap.load().get(name).cloned()
	}

	/// All registrations, in registration order.
	pub fn registrations(&self) -> Vec<Registration> {
		self.snap.load().table.to_vec()
	}
}

impl FunctionCatalog for SimpleCatalog {
	fn size(&self) -> usize {
		self.snap.load().table.len()
	}

	fn names(&self, kind: Option<FunctionKind>) -> FxHashSet<String> {
		let snap = self.snap.load();
		snap.by_name
			.iter()
			.filter(|&(_, &idx)| kind.is_none_or(|kind| snap.table[idx].kind() == kind))
			.map(|(name, _)| name.to_string())
			.collect()
	}

	fn lookup(&self, kind: Option<FunctionKind>, definition: &str, output_types: &[&str]) -> Option<ResolvedFunction> {
		let names = definition::stages(definition);
		let snap = self.snap.load_full();
		let stages = names
			.iter()
			.map(|name| snap.get(name).cloned())
			.collect::<Option<Vec<_>>>()?;

		let last = stages.len().saturating_sub(1);
		for (idx, stage) in stages.iter().enumerate() {
			let misplaced = match stage.kind() {
				FunctionKind::Producer => idx != 0,
				FunctionKind::Consumer => idx != last,
				FunctionKind::Transform => false,
			};
			if misplaced {
				warn!(definition, stage = stage.name(), kind = %stage.kind(), "function cannot appear at this position of a composition");
				return None;
			}
		}

		let resolved = ResolvedFunction::compose(definition::join(&names), stages, output_types)?;
		if kind.is_some_and(|kind| resolved.kind() != kind) {
			return None;
		}
		Some(resolved)
	}

	fn register(&self, registration: Registration) -> Result<(), RegisterError> {
		if registration.names().iter().any(|name| name.trim().is_empty()) {
			return Err(RegisterError::Unnamed);
		}

		loop {
			let old = self.snap.load_full();
			if let Some(taken) = registration.names().iter().find(|name| old.by_name.contains_key(&***name)) {
				return Err(RegisterError::Duplicate { name: taken.to_string() });
			}

			let slot = old.table.len();
			let mut table = old.table.to_vec();
			table.push(registration.clone());
			let mut by_name = (*old.by_name).clone();
			for name in registration.names() {
				by_name.insert(name.clone(), slot);
			}

			let new_snap = Arc::new(Snapshot {
				table: Arc::from(table),
				by_name: Arc::new(by_name),
			});
			let prev = self.snap.compare_and_swap(&old, new_snap);
			if Arc::ptr_eq(&prev, &old) {
				return Ok(());
			}
			// Lost the race; retry against the newer snapshot.
		}
	}

	fn contains(&self, name: &str) -> bool {
		self.snap.load().by_name.contains_key(name)
	}
}
