use std::fs;
use tempfile::TempDir;

use sbp_generator::client_registry::{ClientRegistry, ClientStore};
use sbp_generator::errors::GeneratorError;

fn setup_registry() -> (TempDir, ClientRegistry) {
    let temp_dir = TempDir::new().unwrap();
    let registry = ClientRegistry::open(&temp_dir.path().join("data/clients.json")).unwrap();
    (temp_dir, registry)
}

#[test]
fn test_missing_file_is_empty_registry() {
    let (_dir, registry) = setup_registry();
    assert!(registry.list_names().is_empty());
    assert!(!registry.path().exists());
}

#[test]
fn test_add_and_get_client() {
    let (_dir, mut registry) = setup_registry();

    let client = registry
        .add("  Acme Corp ", Some("Prefers RAW deliveries".to_string()))
        .unwrap();
    assert_eq!(client.name, "Acme Corp");
    assert!(client.projects.is_empty());

    let reloaded = ClientRegistry::open(registry.path()).unwrap();
    let stored = reloaded.get("Acme Corp").unwrap();
    assert_eq!(stored.notes.as_deref(), Some("Prefers RAW deliveries"));
    assert_eq!(stored.created_date, client.created_date);
}

#[test]
fn test_duplicate_and_empty_names_rejected() {
    let (_dir, mut registry) = setup_registry();
    registry.add("Acme", None).unwrap();

    let err = registry.add("Acme", None).unwrap_err();
    match err.downcast_ref::<GeneratorError>() {
        Some(GeneratorError::DuplicateClient { name }) => assert_eq!(name, "Acme"),
        other => panic!("expected DuplicateClient, got {:?}", other),
    }

    let err = registry.add("   ", None).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<GeneratorError>(),
        Some(GeneratorError::EmptyField { .. })
    ));
    assert_eq!(registry.list_names(), vec!["Acme"]);
}

#[test]
fn test_names_listed_in_order() {
    let (_dir, mut registry) = setup_registry();
    for name in ["Zeta", "Acme", "Mango"] {
        registry.add(name, None).unwrap();
    }
    assert_eq!(registry.list_names(), vec!["Acme", "Mango", "Zeta"]);
}

#[test]
fn test_append_project() {
    let (_dir, mut registry) = setup_registry();
    registry.add("Acme", None).unwrap();

    assert!(registry.append_project("Acme", "2024-03-01-Launch").unwrap());
    assert!(registry.append_project("Acme", "2024-03-01-Launch").unwrap());
    assert!(registry.append_project("Acme", "2024-04-02-Teaser").unwrap());
    assert!(!registry.append_project("Nobody", "2024-03-01-Launch").unwrap());

    let reloaded = ClientRegistry::open(registry.path()).unwrap();
    assert_eq!(
        reloaded.get("Acme").unwrap().projects,
        vec!["2024-03-01-Launch", "2024-04-02-Teaser"]
    );
    assert!(reloaded.get("Nobody").is_none());
}

#[test]
fn test_update_notes_and_remove() {
    let (_dir, mut registry) = setup_registry();
    registry.add("Acme", None).unwrap();

    assert!(registry.update_notes("Acme", Some("VIP".to_string())).unwrap());
    assert!(!registry.update_notes("Nobody", None).unwrap());
    assert_eq!(
        ClientRegistry::open(registry.path())
            .unwrap()
            .get("Acme")
            .unwrap()
            .notes
            .as_deref(),
        Some("VIP")
    );

    assert!(registry.remove("Acme").unwrap());
    assert!(!registry.remove("Acme").unwrap());
    assert!(ClientRegistry::open(registry.path())
        .unwrap()
        .list_names()
        .is_empty());
}

#[test]
fn test_search_is_case_insensitive() {
    let (_dir, mut registry) = setup_registry();
    for name in ["Acme Corp", "ACME Films", "Beta Studio"] {
        registry.add(name, None).unwrap();
    }

    assert_eq!(registry.search("acme"), vec!["ACME Films", "Acme Corp"]);
    assert_eq!(registry.search("STUDIO"), vec!["Beta Studio"]);
    assert!(registry.search("gamma").is_empty());
}

#[test]
fn test_corrupt_file_is_treated_as_empty() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("clients.json");
    fs::write(&path, "{ this is not json").unwrap();

    let mut registry = ClientRegistry::open(&path).unwrap();
    assert!(registry.list_names().is_empty());

    registry.add("Acme", None).unwrap();
    let reloaded = ClientRegistry::open(&path).unwrap();
    assert_eq!(reloaded.list_names(), vec!["Acme"]);
}

#[test]
fn test_file_is_keyed_by_client_name() {
    let (_dir, mut registry) = setup_registry();
    registry.add("Acme", None).unwrap();
    registry.append_project("Acme", "2024-03-01-Launch").unwrap();

    let content = fs::read_to_string(registry.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["Acme"]["name"], "Acme");
    assert_eq!(value["Acme"]["projects"][0], "2024-03-01-Launch");
    assert!(value["Acme"]["created_date"].as_str().unwrap().contains('T'));
}
