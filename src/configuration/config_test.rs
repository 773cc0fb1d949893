extern crate tempdir;

use anyhow::Result;
use tempdir::TempDir;

use super::Config;
use super::ConfigKey;
use crate::application::cli;

#[test]
fn it_serializes_to_valid_toml() {
    let res = Config::serialize_default(cli::build());
    let doc = res.parse::<toml_edit::Document>();
    assert!(doc.is_ok());

    assert!(res.contains("backend-url = \"http://localhost:8000\""));
    assert!(res.contains("# client-id = \"\""));
    assert!(!res.contains("config-file"));
    assert!(!res.contains("id-token"));
    assert!(!res.contains("launch-url"));
}

#[test]
fn it_serializes_kebab_case_keys() {
    let keys = ConfigKey::BackendURL.to_string()
        + ","
        + &ConfigKey::ClientID.to_string()
        + ","
        + &ConfigKey::StorageDir.to_string();
    assert_eq!(keys, "backend-url,client-id,storage-dir");
}

#[test]
fn it_uses_kebab_case_names_as_arg_ids() {
    for key in [ConfigKey::IdToken, ConfigKey::LaunchURL, ConfigKey::ConfigFile] {
        assert_eq!(key.as_str(), key.to_string());
    }

    let cmd = cli::build();
    let arg = cmd
        .get_arguments()
        .find(|arg| return arg.get_id() == ConfigKey::BackendURL.as_str())
        .unwrap();
    assert_eq!(arg.get_long(), Some("backend-url"));
    assert_eq!(arg.get_short(), Some('b'));
}

// Config is global, so every load runs inside this one test.
#[tokio::test]
async fn it_loads_config_with_precedence() -> Result<()> {
    let matches = cli::build().try_get_matches_from(vec!["workspaceai", "-c", "./config.example.toml"])?;
    Config::load(vec![&matches]).await?;
    assert_eq!(Config::get(ConfigKey::BackendURL), "http://localhost:8000");
    assert_eq!(
        Config::get(ConfigKey::ClientID),
        "1234567890-example.apps.googleusercontent.com"
    );
    assert_eq!(
        Config::get(ConfigKey::StorageDir),
        Config::default(ConfigKey::StorageDir)
    );

    let matches = cli::build().try_get_matches_from(vec![
        "workspaceai",
        "-c",
        "./config.example.toml",
        "--backend-url",
        "https://api.example.com",
        "--client-id",
        "",
    ])?;
    Config::load(vec![&matches]).await?;
    assert_eq!(Config::get(ConfigKey::BackendURL), "https://api.example.com");
    assert_eq!(
        Config::get(ConfigKey::ClientID),
        "1234567890-example.apps.googleusercontent.com"
    );

    let tmp_dir = TempDir::new("workspaceai")?;
    let missing = tmp_dir.path().join("missing.toml");
    let matches = cli::build().try_get_matches_from(vec![
        "workspaceai",
        "-c",
        missing.to_str().unwrap_or_default(),
    ])?;
    Config::load(vec![&matches]).await?;
    assert_eq!(Config::get(ConfigKey::ClientID), "");

    let matches =
        cli::build().try_get_matches_from(vec!["workspaceai", "-c", "./test/bad-config.toml"])?;
    assert!(Config::load(vec![&matches]).await.is_err());

    return Ok(());
}
