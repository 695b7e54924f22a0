use hc_profile_tree::output::{
    read_profile, summarize, validate_path, write_profile, write_summary, FunctionEntry, Location,
    NormalizedProfile, ProfileSummary,
};
use std::path::Path;
use tempfile::NamedTempFile;

fn entry(self_id: u64, parent: u64, signature: &str, count: f64, child_count: f64) -> FunctionEntry {
    FunctionEntry {
        self_id,
        parent,
        location: Location {
            signature: signature.to_string(),
        },
        count,
        child_count,
    }
}

fn create_test_profile() -> NormalizedProfile {
    NormalizedProfile {
        functions: vec![
            entry(0, 0, "root", 0.0, 150.0),
            entry(1, 0, "com.example.Main.main([Ljava/lang/String;)V", 100.0, 50.0),
            entry(2, 1, "com.example.Work.run()V", 50.0, 0.0),
        ],
        total_count: 150.0,
    }
}

#[test]
fn test_write_and_read_profile() {
    let profile = create_test_profile();
    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    write_profile(&profile, path).unwrap();
    let loaded = read_profile(path).unwrap();

    assert_eq!(loaded, profile);
}

#[test]
fn test_written_document_shape() {
    let temp_file = NamedTempFile::new().unwrap();
    write_profile(&create_test_profile(), temp_file.path()).unwrap();

    let raw = std::fs::read_to_string(temp_file.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    let object = value.as_object().unwrap();
    let mut keys: Vec<&String> = object.keys().collect();
    keys.sort();
    assert_eq!(keys, vec!["functions", "total_count"]);

    let first = &value["functions"][1];
    assert_eq!(first["self"], 1);
    assert_eq!(first["parent"], 0);
    assert_eq!(
        first["location"]["signature"],
        "com.example.Main.main([Ljava/lang/String;)V"
    );
    assert_eq!(first["count"], 100.0);
    assert_eq!(first["child_count"], 50.0);
    assert!(value["total_count"].is_f64());
}

#[test]
fn test_validate_output_path_empty() {
    let result = validate_path(Path::new(""));
    assert!(result.is_err());
}

#[test]
fn test_validate_output_path_directory() {
    let temp_dir = tempfile::tempdir().unwrap();
    let result = validate_path(temp_dir.path());
    assert!(result.is_err());
}

#[test]
fn test_write_creates_parent_dirs() {
    let temp_dir = tempfile::tempdir().unwrap();
    let nested_path = temp_dir.path().join("nested/dirs/profile.json");

    write_profile(&create_test_profile(), &nested_path).unwrap();

    assert!(nested_path.exists());
}

#[test]
fn test_rewrite_replaces_file_without_leftovers() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("profile.json");
    std::fs::write(&path, "stale contents that are longer than nothing").unwrap();

    let profile = create_test_profile();
    write_profile(&profile, &path).unwrap();

    assert_eq!(read_profile(&path).unwrap(), profile);
    let names: Vec<String> = std::fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["profile.json".to_string()]);
}

#[test]
fn test_failed_write_keeps_previous_output() {
    let temp_dir = tempfile::tempdir().unwrap();
    // A regular file where the output's parent directory should be
    let blocker = temp_dir.path().join("blocker");
    std::fs::write(&blocker, "keep me").unwrap();

    let result = write_profile(&create_test_profile(), blocker.join("profile.json"));

    assert!(result.is_err());
    assert_eq!(std::fs::read_to_string(&blocker).unwrap(), "keep me");
    assert_eq!(std::fs::read_dir(temp_dir.path()).unwrap().count(), 1);
}

#[test]
fn test_read_missing_profile() {
    let temp_dir = tempfile::tempdir().unwrap();
    assert!(read_profile(temp_dir.path().join("absent.json")).is_err());
}

#[test]
fn test_write_and_read_summary() {
    let summary = summarize(&create_test_profile());
    let temp_file = NamedTempFile::new().unwrap();

    write_summary(&summary, temp_file.path()).unwrap();

    let raw = std::fs::read_to_string(temp_file.path()).unwrap();
    let loaded: ProfileSummary = serde_json::from_str(&raw).unwrap();
    assert_eq!(loaded, summary);
    assert_eq!(loaded.functions.len(), 3);
    assert_eq!(loaded.total_count, 150.0);
}
