use std::fs;

use tabform::{DocumentFormat, FormStore, export_artifact, export_form_data};

#[test]
fn form_data_export_writes_timestamped_json() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FormStore::new();
    store.set("氏名", "松山 英樹");
    store.set("kind", "B");
    let path = export_form_data(&store, dir.path(), DocumentFormat::Json).unwrap();
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("form_data_") && name.ends_with(".json"), "{name}");
    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(written["氏名"], "松山 英樹");
    assert_eq!(written["kind"], "B");
}

#[test]
fn artifact_copy_keeps_contents() {
    let source_dir = tempfile::tempdir().unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    let source = source_dir.path().join("claim.csv");
    fs::write(&source, "id,value\n1,2\n").unwrap();
    let copied = export_artifact(&source, &out_dir.path().join("nested")).unwrap();
    let name = copied.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("claim_") && name.ends_with(".csv"), "{name}");
    assert_eq!(fs::read_to_string(copied).unwrap(), "id,value\n1,2\n");
}

#[test]
fn missing_artifact_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(export_artifact(&dir.path().join("none.csv"), dir.path()).is_err());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}
