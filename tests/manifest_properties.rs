//! Behavioral guarantees of manifest generation: deterministic output,
//! GUID stability across releases, collision rejection, and the shape of
//! the generated document.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tempfile::TempDir;
use uuid::Uuid;

use frostpack::release::{
    Error, IdentifierRecord, InstallerSettings, PackageSettings, generate,
};

const UPGRADE_CODE: &str = "7F98EF99-04D1-46BF-AAB3-2DCF11BB4B26";

fn package() -> PackageSettings {
    PackageSettings {
        product_name: "Gizmo Studio".to_string(),
        manufacturer: "Gizmo Works".to_string(),
        description: Some("Gizmo Studio desktop tools".to_string()),
        homepage: None,
    }
}

fn installer() -> InstallerSettings {
    InstallerSettings {
        upgrade_code: Uuid::parse_str(UPGRADE_CODE).unwrap(),
        ..InstallerSettings::default()
    }
}

fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (rel, content) in files {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
}

fn two_file_tree() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write_tree(tmp.path(), &[("a.txt", "alpha"), ("sub/b.txt", "beta")]);
    tmp
}

fn guid_attributes(doc: &str) -> Vec<&str> {
    doc.match_indices("Guid=\"")
        .map(|(start, marker)| {
            let from = start + marker.len();
            let len = doc[from..].find('"').unwrap();
            &doc[from..from + len]
        })
        .collect()
}

#[test]
fn generation_is_deterministic() {
    let tmp = two_file_tree();
    let prior = IdentifierRecord::default();

    let first = generate(tmp.path(), "1.2.3", &prior, &package(), &installer()).unwrap();
    let second = generate(tmp.path(), "1.2.3", &prior, &package(), &installer()).unwrap();

    assert_eq!(first.document, second.document);
    assert_eq!(first.record, second.record);
}

#[test]
fn two_file_tree_produces_expected_shape() {
    let tmp = two_file_tree();
    let manifest = generate(
        tmp.path(),
        "1.2.3",
        &IdentifierRecord::default(),
        &package(),
        &installer(),
    )
    .unwrap();

    assert_eq!(manifest.files, 2);
    assert_eq!(manifest.directories, 1);
    assert_eq!(manifest.minted, 2);

    let doc = &manifest.document;
    assert_eq!(doc.matches("<Product").count(), 1);
    assert_eq!(doc.matches("<File ").count(), 2);
    assert_eq!(doc.matches("<Component ").count(), 2);
    assert!(doc.contains("Version=\"1.2.3\""));
    assert!(doc.contains("Name=\"Gizmo Studio\""));
    assert!(doc.contains(&format!("UpgradeCode=\"{UPGRADE_CODE}\"")));

    let keys: Vec<&str> = manifest.record.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["a.txt", "sub/b.txt"]);
}

#[test]
fn guids_are_uppercase_and_distinct() {
    let tmp = two_file_tree();
    let manifest = generate(
        tmp.path(),
        "1.0.0",
        &IdentifierRecord::default(),
        &package(),
        &installer(),
    )
    .unwrap();

    let guids: Vec<&str> = manifest.record.iter().map(|(_, g)| g).collect();
    assert_eq!(guids.len(), 2);
    assert_ne!(guids[0], guids[1]);
    for guid in guids {
        assert_eq!(guid.len(), 36);
        assert_eq!(guid, guid.to_uppercase());
        assert!(Uuid::parse_str(guid).is_ok());
    }
}

#[test]
fn prior_record_keeps_guids_stable_across_releases() {
    let tmp = two_file_tree();

    let first = generate(
        tmp.path(),
        "1.0.0",
        &IdentifierRecord::default(),
        &package(),
        &installer(),
    )
    .unwrap();

    write_tree(tmp.path(), &[("sub/c.txt", "gamma")]);
    let second = generate(tmp.path(), "1.1.0", &first.record, &package(), &installer()).unwrap();

    assert_eq!(second.minted, 1);
    assert_eq!(second.record.len(), 3);
    assert_eq!(first.record.get("a.txt"), second.record.get("a.txt"));
    assert_eq!(first.record.get("sub/b.txt"), second.record.get("sub/b.txt"));
    assert!(second.record.get("sub/c.txt").is_some());
}

#[test]
fn removed_files_drop_out_of_the_record() {
    let tmp = two_file_tree();
    let first = generate(
        tmp.path(),
        "1.0.0",
        &IdentifierRecord::default(),
        &package(),
        &installer(),
    )
    .unwrap();

    fs::remove_file(tmp.path().join("sub/b.txt")).unwrap();
    let second = generate(tmp.path(), "1.0.1", &first.record, &package(), &installer()).unwrap();

    assert_eq!(second.record.len(), 1);
    assert!(second.record.get("sub/b.txt").is_none());
    assert_eq!(first.record.get("a.txt"), second.record.get("a.txt"));
}

#[test]
fn moved_files_get_new_guids_without_collisions() {
    let tmp = two_file_tree();
    let first = generate(
        tmp.path(),
        "1.0.0",
        &IdentifierRecord::default(),
        &package(),
        &installer(),
    )
    .unwrap();
    let original = first.record.get("a.txt").unwrap().to_string();

    fs::create_dir_all(tmp.path().join("moved")).unwrap();
    fs::rename(tmp.path().join("a.txt"), tmp.path().join("moved/a.txt")).unwrap();
    let second = generate(tmp.path(), "1.0.1", &first.record, &package(), &installer()).unwrap();

    let relocated = second.record.get("moved/a.txt").unwrap();
    assert_ne!(relocated, original);
    assert_ne!(relocated, second.record.get("sub/b.txt").unwrap());
}

#[test]
fn lowercase_prior_guids_are_normalized() {
    let tmp = two_file_tree();
    let mut prior = IdentifierRecord::default();
    prior.insert(
        "a.txt".to_string(),
        "deadbeef-1111-4222-8333-444455556666".to_string(),
    );

    let manifest = generate(tmp.path(), "1.0.0", &prior, &package(), &installer()).unwrap();
    assert_eq!(
        manifest.record.get("a.txt"),
        Some("DEADBEEF-1111-4222-8333-444455556666")
    );
    assert_eq!(manifest.minted, 1);
}

#[test]
fn colliding_prior_guids_are_rejected() {
    let tmp = two_file_tree();
    let mut prior = IdentifierRecord::default();
    let guid = "DEADBEEF-1111-4222-8333-444455556666";
    prior.insert("a.txt".to_string(), guid.to_string());
    prior.insert("sub/b.txt".to_string(), guid.to_string());

    let err = generate(tmp.path(), "1.0.0", &prior, &package(), &installer()).unwrap_err();
    match err {
        Error::DuplicateIdentifier {
            guid: colliding, ..
        } => assert_eq!(colliding, guid),
        other => panic!("expected duplicate identifier error, got {other}"),
    }
}

#[test]
fn different_products_mint_different_guids() {
    let tmp = two_file_tree();
    let prior = IdentifierRecord::default();

    let first = generate(tmp.path(), "1.0.0", &prior, &package(), &installer()).unwrap();

    let other_installer = InstallerSettings {
        upgrade_code: Uuid::parse_str("0E97885E-60B5-4D29-9D03-5FC4E1E082F6").unwrap(),
        ..InstallerSettings::default()
    };
    let second = generate(tmp.path(), "1.0.0", &prior, &package(), &other_installer).unwrap();

    assert_ne!(first.record.get("a.txt"), second.record.get("a.txt"));
}

#[test]
fn shortcut_guid_stays_distinct_from_payload_files() {
    let tmp = TempDir::new().unwrap();
    write_tree(
        tmp.path(),
        &[("start-menu-shortcut", "data"), ("app.exe", "binary")],
    );

    let with_shortcut = InstallerSettings {
        upgrade_code: Uuid::parse_str(UPGRADE_CODE).unwrap(),
        start_menu_shortcut: Some("app.exe".to_string()),
        ..InstallerSettings::default()
    };

    let manifest = generate(
        tmp.path(),
        "1.0.0",
        &IdentifierRecord::default(),
        &package(),
        &with_shortcut,
    )
    .unwrap();

    // Two payload components plus the shortcut component, each with its
    // own GUID, even though one payload file shares the shortcut's name.
    let guids = guid_attributes(&manifest.document);
    assert_eq!(guids.len(), 3);
    let unique: HashSet<&str> = guids.iter().copied().collect();
    assert_eq!(unique.len(), guids.len());

    let payload = manifest.record.get("start-menu-shortcut").unwrap();
    assert!(guids.contains(&payload));
}

#[test]
fn empty_folder_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let err = generate(
        tmp.path(),
        "1.0.0",
        &IdentifierRecord::default(),
        &package(),
        &installer(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::EmptyFolder(_)));
}

#[test]
fn folder_of_empty_directories_is_rejected() {
    let tmp = TempDir::new().unwrap();
    fs::create_dir_all(tmp.path().join("only/dirs/here")).unwrap();
    let err = generate(
        tmp.path(),
        "1.0.0",
        &IdentifierRecord::default(),
        &package(),
        &installer(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::EmptyFolder(_)));
}

#[test]
fn missing_folder_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let err = generate(
        &tmp.path().join("absent"),
        "1.0.0",
        &IdentifierRecord::default(),
        &package(),
        &installer(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::MissingFolder(_)));
}

#[test]
fn blank_version_is_rejected() {
    let tmp = two_file_tree();
    let err = generate(
        tmp.path(),
        "",
        &IdentifierRecord::default(),
        &package(),
        &installer(),
    )
    .unwrap_err();
    assert!(matches!(err, Error::MissingVersion));
}

#[test]
fn record_round_trips_through_disk() {
    let tmp = two_file_tree();
    let manifest = generate(
        tmp.path(),
        "1.0.0",
        &IdentifierRecord::default(),
        &package(),
        &installer(),
    )
    .unwrap();

    let store = TempDir::new().unwrap();
    let path = store.path().join("nested/component_guids.json");
    manifest.record.save(&path).unwrap();

    let loaded = IdentifierRecord::load(&path).unwrap();
    assert_eq!(loaded, manifest.record);

    // The file itself is a flat JSON object usable by other tooling.
    let raw = fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert!(parsed.is_object());
    assert!(raw.ends_with('\n'));
}

#[test]
fn missing_record_file_loads_as_empty() {
    let tmp = TempDir::new().unwrap();
    let record = IdentifierRecord::load(&tmp.path().join("absent.json")).unwrap();
    assert!(record.is_empty());
}

#[test]
fn corrupt_record_file_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("broken.json");
    fs::write(&path, "{ not json").unwrap();

    let err = IdentifierRecord::load(&path).unwrap_err();
    assert!(matches!(err, Error::RecordParse { .. }));
}
