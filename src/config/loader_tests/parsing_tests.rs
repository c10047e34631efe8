use std::path::Path;

use serde_json::json;

use crate::config::{ConfigLoader, FileConfigLoader};
use crate::error::QaError;

use super::mock_fs::MockFileSystem;

fn load(content: &str) -> crate::Result<crate::config::LoadResult> {
    let fs = MockFileSystem::new().with_file("/cfg/qa.toml", content);
    FileConfigLoader::with_fs(fs).load_from_path(Path::new("/cfg/qa.toml"))
}

#[test]
fn explicit_path_is_parsed() {
    let loaded = load(
        r#"
[params."d762fd79-75bc-4aff-a9d2-e0c36e744e17"]
threshold = 40
"#,
    )
    .unwrap();
    assert_eq!(
        loaded.config.params["d762fd79-75bc-4aff-a9d2-e0c36e744e17"]["threshold"],
        json!(40)
    );
}

#[test]
fn unreadable_file_reports_path() {
    let loader = FileConfigLoader::with_fs(MockFileSystem::new());
    let err = loader.load_from_path(Path::new("/cfg/absent.toml")).unwrap_err();
    assert!(matches!(err, QaError::FileRead { ref path, .. } if path == Path::new("/cfg/absent.toml")));
}

#[test]
fn invalid_toml_is_a_parse_error() {
    let err = load("[output\npretty = true").unwrap_err();
    assert!(matches!(err, QaError::TomlParse(_)));
}

#[test]
fn unsupported_version_is_rejected() {
    let err = load("version = \"7\"\n").unwrap_err();
    assert!(matches!(err, QaError::Config(_)));
    assert!(err.to_string().contains("'7'"));
    assert!(load("version = \"1\"\n").is_ok());
}
