//! # Catalog Tests
//!
//! Loading food catalogs from disk and looking foods up by name.

use std::io::Write;
use std::sync::Arc;
use std::thread;

use recipe_nutrition::catalog::{CatalogHandle, FoodCatalog, FoodLookup};
use recipe_nutrition::catalog_errors::CatalogLoadError;
use tempfile::NamedTempFile;

const SAMPLE_CATALOG: &str = r#"[
    {"name": "Chicken Breast", "measure": "piece", "gramsPerMeasure": 172,
     "caloriesPer100g": 165, "fatPer100g": 3.6, "carbsPer100g": 0, "proteinPer100g": 31},
    {"name": "chicken breast", "measure": "oz", "gramsPerMeasure": 28.35,
     "caloriesPer100g": 1, "fatPer100g": 1, "carbsPer100g": 1, "proteinPer100g": 1},
    {"name": "Flour", "measure": "cup", "gramsPerMeasure": 125,
     "caloriesPer100g": 364, "fatPer100g": 1, "carbsPer100g": 76.3, "proteinPer100g": 10.3},
    {"name": "  ", "measure": "cup", "gramsPerMeasure": 1}
]"#;

fn write_catalog(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_catalog_from_path() {
    let file = write_catalog(SAMPLE_CATALOG);
    let catalog = FoodCatalog::from_path(file.path()).unwrap();

    assert_eq!(catalog.len(), 2);
    let chicken = catalog.lookup_exact("CHICKEN BREAST").unwrap();
    assert_eq!(chicken.measure_label, "piece");
    assert_eq!(chicken.grams_per_measure, 172.0);

    let names: Vec<&str> = catalog.all_records().map(|food| food.name.as_str()).collect();
    assert_eq!(names.len(), 2);
    assert!(names.contains(&"Chicken Breast"));
    assert!(names.contains(&"Flour"));
}

#[test]
fn test_load_catalog_from_reader() {
    let catalog = FoodCatalog::from_reader(SAMPLE_CATALOG.as_bytes()).unwrap();
    assert_eq!(catalog.len(), 2);
}

#[test]
fn test_missing_file_is_a_load_error() {
    let err = FoodCatalog::from_path("/definitely/not/here/foods.json").unwrap_err();
    assert!(matches!(err, CatalogLoadError::Io { .. }));
    assert!(err.to_string().contains("foods.json"));
}

#[test]
fn test_malformed_file_is_a_load_error() {
    let file = write_catalog("[{\"name\": \"Flour\",");
    let err = FoodCatalog::from_path(file.path()).unwrap_err();
    assert!(matches!(err, CatalogLoadError::Parse(_)));
}

#[test]
fn test_empty_file_is_an_empty_catalog() {
    let file = write_catalog("");
    let catalog = FoodCatalog::from_path(file.path()).unwrap();
    assert!(catalog.is_empty());
    assert!(catalog.lookup_exact("flour").is_none());
    assert!(catalog.lookup_fuzzy("flour", 3).is_none());
}

#[test]
fn test_fuzzy_lookup_threshold() {
    let catalog = FoodCatalog::from_json_str(SAMPLE_CATALOG).unwrap();

    let (food, distance) = catalog.lookup_fuzzy("chiken breast", 3).unwrap();
    assert_eq!(food.name, "Chicken Breast");
    assert_eq!(distance, 1);

    let (food, distance) = catalog.lookup_fuzzy("four", 3).unwrap();
    assert_eq!(food.name, "Flour");
    assert_eq!(distance, 1);

    assert!(catalog.lookup_fuzzy("zzzzz", 3).is_none());
    assert!(catalog.lookup_fuzzy("   ", 3).is_none());
}

#[test]
fn test_reload_keeps_old_catalog_on_failure() {
    let handle = CatalogHandle::new(FoodCatalog::from_json_str(SAMPLE_CATALOG).unwrap());

    assert!(handle.reload_from_path("/definitely/not/here/foods.json").is_err());
    assert_eq!(handle.snapshot().len(), 2);

    let file = write_catalog(r#"[{"name": "Rice", "measure": "cup", "gramsPerMeasure": 158}]"#);
    assert_eq!(handle.reload_from_path(file.path()).unwrap(), 1);
    assert!(handle.snapshot().lookup_exact("rice").is_some());
}

#[test]
fn test_snapshots_are_shared_across_threads() {
    let handle = Arc::new(CatalogHandle::new(
        FoodCatalog::from_json_str(SAMPLE_CATALOG).unwrap(),
    ));

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let handle = Arc::clone(&handle);
            thread::spawn(move || {
                let catalog = handle.snapshot();
                catalog.lookup_fuzzy("flor", 3).map(|(food, _)| food.name.clone())
            })
        })
        .collect();

    for worker in workers {
        assert_eq!(worker.join().unwrap().as_deref(), Some("Flour"));
    }
}
