mod common;

use std::sync::Arc;

use common::{PriceList, RecordingRegistry, registry};
use fabric_catalog::{CatalogProperties, DiscoveringCatalog, FunctionCatalog, FunctionKind, Instance, InvocationError};
use serde_json::json;

#[test]
fn plain_object_lookup_matches_direct_method_call() {
	let catalog = DiscoveringCatalog::new(Arc::new(registry(0)), CatalogProperties::default());
	let prices = catalog.lookup(None, "prices", &[]).expect("adapted plain object");
	let direct = PriceList::new();
	for item in ["apple", "pear"] {
		assert_eq!(prices.apply(json!(item)).unwrap(), direct.invoke("price_of", json!(item)).unwrap());
	}
	assert_eq!(
		prices.apply(json!("kiwi")).unwrap_err(),
		InvocationError::Failed("no price for kiwi".into())
	);
}

#[test]
fn second_lookup_skips_discovery() {
	let registry = RecordingRegistry::new(registry(0));
	let catalog = DiscoveringCatalog::new(registry.clone(), CatalogProperties::default());

	assert!(catalog.lookup(None, "fruit", &[]).is_some());
	assert!(catalog.contains("fruit"));
	assert_eq!(registry.fetches("fruit"), 1);

	assert!(catalog.lookup(None, "fruit", &[]).is_some());
	assert_eq!(registry.fetches("fruit"), 1);
}

#[test]
fn default_definition_drives_blank_lookups() {
	let properties = CatalogProperties::from_toml_str("[function]\ndefinition = \"fruit|upper|prices\"\n").unwrap();
	let catalog = DiscoveringCatalog::new(Arc::new(registry(0)), properties);

	let composed = catalog.lookup(None, "", &[]).expect("default definition");
	assert_eq!(composed.kind(), FunctionKind::Producer);
	assert!(composed.is_composed());
	// "pear" -> "PEAR" has no price: the adapted failure surfaces unchanged.
	assert_eq!(
		composed.get().unwrap_err(),
		InvocationError::Failed("no price for PEAR".into())
	);
}

#[test]
fn undeterminable_definition_yields_nothing() {
	let registry = RecordingRegistry::new(registry(0));
	let catalog = DiscoveringCatalog::new(registry.clone(), CatalogProperties::default());
	assert!(catalog.lookup(None, "", &[]).is_none());
	assert_eq!(registry.total_fetches(), 0);
}

#[test]
fn duplicate_names_register_once() {
	let registry = RecordingRegistry::new(registry(0));
	let catalog = DiscoveringCatalog::new(registry.clone(), CatalogProperties::default());
	let found = catalog.lookup(None, "upper,upper|upper", &[]).expect("composed");
	assert_eq!(found.definition(), "upper|upper|upper");
	assert_eq!(found.stages().len(), 3);
	assert_eq!(found.apply(json!("ab")).unwrap(), json!("AB"));
	assert_eq!(registry.fetches("upper"), 1);
	assert_eq!(catalog.base().size(), 1);
}

#[test]
fn size_never_decreases_across_lookups() {
	let catalog = DiscoveringCatalog::new(Arc::new(registry(3)), CatalogProperties::default());
	let mut last = catalog.size();
	for name in ["fn0", "prices", "fn1", "fruit", "fn2", "missing", "upper"] {
		let _ = catalog.lookup(None, name, &[]);
		let size = catalog.size();
		assert!(size >= last, "size shrank after looking up {name}");
		last = size;
	}
}
