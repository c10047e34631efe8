use serde_json::json;

use super::*;

#[test]
fn defaults_when_sections_are_absent() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config, Config::default());
    assert!(config.output.pretty);
    assert!(config.progress.enabled);
    assert!(config.params.is_empty());
}

#[test]
fn parses_all_sections() {
    let config: Config = toml::from_str(
        r#"
version = "1"

[output]
pretty = false

[progress]
enabled = false

[params."d762fd79-75bc-4aff-a9d2-e0c36e744e17"]
threshold = 50

[params."4db0e4f2-87d7-42cb-977e-a05e95b10051"]
threshold = 2.5
"#,
    )
    .unwrap();

    assert_eq!(config.version.as_deref(), Some("1"));
    assert!(!config.output.pretty);
    assert!(!config.progress.enabled);
    assert_eq!(
        config.params["d762fd79-75bc-4aff-a9d2-e0c36e744e17"]["threshold"],
        json!(50)
    );
    assert_eq!(
        config.params["4db0e4f2-87d7-42cb-977e-a05e95b10051"]["threshold"],
        json!(2.5)
    );
}

#[test]
fn rejects_unknown_fields() {
    assert!(toml::from_str::<Config>("[output]\ncolour = true\n").is_err());
    assert!(toml::from_str::<Config>("[scanner]\n").is_err());
}

#[test]
fn params_keep_file_order() {
    let config: Config = toml::from_str(
        r#"
[params."b"]
x = 1
[params."a"]
y = "text"
"#,
    )
    .unwrap();
    let keys: Vec<&str> = config.params.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["b", "a"]);
    assert_eq!(config.params["a"]["y"], json!("text"));
}
