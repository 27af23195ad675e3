//! Per-name single-flight guard.
//!
//! # Invariants
//!
//! - At most one resolution per name runs at a time.
//! - Callers that arrive while a resolution is running block on it and get a
//!   clone of its outcome instead of running their own.
//! - A finished slot is unpublished before its lock is released, so later
//!   callers start a fresh flight (which then observes the registration).

use std::sync::Arc;

use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tracing::trace;

type Slot<T> = Arc<Mutex<Option<T>>>;

pub(crate) struct SingleFlight<T> {
	slots: Mutex<FxHashMap<Arc<str>, Slot<T>>>,
}

impl<T: Clone> SingleFlight<T> {
	pub(crate) fn new() -> Self {
		Self {
			slots: Mutex::new(FxHashMap::default()),
		}
	}

	/// Runs `resolve` for `key` unless a concurrent call already is.
	pub(crate) fn run(&self, key: &str, resolve: impl FnOnce() -> T) -> T {
		let slot = {
			let mut slots = self.slots.lock();
			match slots.get(key) {
				Some(slot) => {
					trace!(name = key, "joining in-flight resolution");
					Arc::clone(slot)
				}
				None => {
					let slot = Slot::default();
					slots.insert(Arc::from(key), Arc::clone(&slot));
					slot
				}
			}
		};

		let mut outcome = slot.lock();
		if let Some(done) = outcome.as_ref() {
			return done.clone();
		}
		let done = resolve();
		*outcome = Some(done.clone());

		let mut slots = self.slots.lock();
		if slots.get(key).is_some_and(|current| Arc::ptr_eq(current, &slot)) {
			slots.remove(key);
		}
		done
	}

	#[cfg(test)]
	pub(crate) fn in_flight(&self) -> usize {
		self.slots.lock().len()
	}

	/// References to the published slot for `key`, the map's own included.
	#[cfg(test)]
	pub(crate) fn holders(&self, key: &str) -> usize {
		self.slots.lock().get(key).map_or(0, Arc::strong_count)
	}
}
