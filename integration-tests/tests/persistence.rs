use integration_tests::functions::disk;
use strata_domain::{DomainError, FunctionRegistry, LevelSet, LevelSetRecord};
use strata_metamodel::LinearTaylor;

#[test]
fn level_set_survives_json() {
    let mut registry = FunctionRegistry::new();
    registry.register(disk(0.0, 0.0));

    let function = registry.get("disk(0, 0)").expect("registered").clone();
    let mut set = LevelSet::new(function, 1.0).unwrap();
    set.set_upper_bound(vec![0.5, 0.5]).unwrap();

    let json = set.to_json().unwrap();
    assert!(json.contains(r#""function":"disk(0, 0)""#));

    let loaded = LevelSet::from_json(&json, &registry).unwrap();
    assert_eq!(loaded, set);
    assert!(loaded.contains(&[0.25, 0.25]).unwrap());
    assert!(!loaded.contains(&[0.75, 0.0]).unwrap());
}

#[test]
fn surrogate_level_set_survives_json() {
    let mut taylor = LinearTaylor::new(vec![0.5, 0.5], disk(0.0, 0.0)).unwrap();
    taylor.run().unwrap();
    let surface = taylor.response_surface().unwrap().clone();

    let mut registry = FunctionRegistry::new();
    registry.register(surface.clone());

    let set = LevelSet::new(surface, 0.25).unwrap();
    let loaded = LevelSet::from_json(&set.to_json().unwrap(), &registry).unwrap();

    assert_eq!(loaded, set);
}

#[test]
fn combined_set_needs_its_function_registered() {
    let left = LevelSet::new(disk(0.0, 0.0), 1.0).unwrap();
    let right = LevelSet::new(disk(1.0, 0.0), 4.0).unwrap();
    let union = left.join(&right).unwrap();

    let mut registry = FunctionRegistry::new();
    registry.register(left.function().clone());
    registry.register(right.function().clone());

    let json = union.to_json().unwrap();
    assert!(matches!(
        LevelSet::from_json(&json, &registry),
        Err(DomainError::UnknownFunction { .. })
    ));

    registry.register(union.function().clone());
    let loaded = LevelSet::from_json(&json, &registry).unwrap();
    assert_eq!(loaded, union);
    assert!(loaded.contains(&[2.5, 0.0]).unwrap());
}

#[test]
fn records_from_other_versions_are_rejected() {
    let mut registry = FunctionRegistry::new();
    registry.register(disk(0.0, 0.0));
    let set = LevelSet::new(registry.get("disk(0, 0)").unwrap().clone(), 1.0).unwrap();

    let mut value = serde_json::to_value(set.save()).unwrap();
    value["version"] = serde_json::json!(2);
    let record: LevelSetRecord = serde_json::from_value(value).unwrap();

    assert!(matches!(
        LevelSet::load(&record, &registry),
        Err(DomainError::UnsupportedVersion { version: 2 })
    ));
}
