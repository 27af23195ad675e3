//! Function definition parsing.
//!
//! A definition names one or more functions separated by `|` (composition) or
//! `,`. Both delimiters are treated the same.

use rustc_hash::FxHashSet;

/// Delimiter used by the canonical form of a definition.
pub const COMPOSITION_DELIMITER: char = '|';

/// Splits a raw definition into its composition stages.
///
/// Whitespace around names is trimmed and empty segments are dropped. Repeated
/// names stay, since each occurrence is its own stage.
pub fn stages(raw: &str) -> Vec<&str> {
	raw.split([',', COMPOSITION_DELIMITER])
		.map(str::trim)
		.filter(|name| !name.is_empty())
		.collect()
}

/// Splits a raw definition into its distinct candidate names.
///
/// Same as [`stages`], keeping only the first occurrence of a name. A blank
/// definition yields an empty list.
pub fn normalize(raw: &str) -> Vec<String> {
	let mut seen = FxHashSet::default();
	stages(raw)
		.into_iter()
		.filter(|name| seen.insert(*name))
		.map(str::to_owned)
		.collect()
}

/// Joins normalized names back into the canonical `a|b` form.
pub fn join<S: AsRef<str>>(names: &[S]) -> String {
	let mut out = String::new();
	for (i, name) in names.iter().enumerate() {
		if i > 0 {
			out.push(COMPOSITION_DELIMITER);
		}
		out.push_str(name.as_ref());
	}
	out
}
