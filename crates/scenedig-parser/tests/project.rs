//! Integration tests for project discovery and registry loading

use scenedig_parser::{AssetRegistry, discover, read_scene};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

fn meta(guid: &str) -> String {
    format!("fileFormatVersion: 2\nguid: {guid}\nMonoImporter:\n  externalObjects: {{}}\n")
}

#[test]
fn discovers_scenes_and_scripts_sorted() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(&root.join("Assets/Scenes/Main.unity"), "%YAML 1.1\n");
    write(&root.join("Assets/Scenes/Boot.UNITY"), "%YAML 1.1\n");
    write(&root.join("Assets/Scripts/B.cs"), "class B {}");
    write(&root.join("Assets/Scripts/A.cs"), "class A {}");
    write(&root.join("Assets/Scripts/A.cs.meta"), &meta("aaaa"));
    write(&root.join("Assets/readme.txt"), "ignored");

    let files = discover(root).unwrap();
    let scenes: Vec<_> = files
        .scenes
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(scenes, vec!["Boot.UNITY", "Main.unity"]);
    assert_eq!(files.scripts.len(), 2);
    assert!(files.scripts[0].ends_with("A.cs"));
}

#[test]
fn missing_root_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let err = discover(&tmp.path().join("nope")).unwrap_err();
    assert!(err.is_project());
}

#[test]
fn registry_skips_scripts_without_metadata() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(&root.join("Assets/A.cs"), "");
    write(&root.join("Assets/A.cs.meta"), &meta("AAAA1111"));
    write(&root.join("Assets/NoMeta.cs"), "");
    write(&root.join("Assets/Empty.cs"), "");
    write(&root.join("Assets/Empty.cs.meta"), "fileFormatVersion: 2\n");
    write(&root.join("Assets/Dupe.cs"), "");
    write(&root.join("Assets/Dupe.cs.meta"), &meta("aaaa1111"));

    let files = discover(root).unwrap();
    let registry = AssetRegistry::load(root, &files.scripts);

    assert_eq!(registry.len(), 1);
    let entry = &registry.entries()[0];
    assert_eq!(entry.asset_id, "AAAA1111");
    assert_eq!(entry.path, PathBuf::from("Assets/A.cs"));
}

#[test]
fn read_scene_decodes_invalid_utf8_lossily() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("Cafe.unity");
    let mut bytes = b"--- !u!1 &1\nGameObject:\n  m_Name: Caf".to_vec();
    bytes.push(0xe9);
    bytes.extend_from_slice(b"\n  m_IsActive: 1\n");
    fs::write(&path, bytes).unwrap();

    let text = read_scene(&path).unwrap();
    assert!(text.contains("m_Name: Caf\u{fffd}\n"));
    assert!(text.ends_with("m_IsActive: 1\n"));
    assert!(read_scene(tmp.path().join("Missing.unity")).unwrap_err().is_io());
}
