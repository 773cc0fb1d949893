use anyhow::Result;
use test_utils::jwt_fixture;
use test_utils::profile_claims_fixture;

use super::build;
use super::format_session;
use crate::domain::models::Profile;
use crate::domain::models::Session;

#[test]
fn it_formats_empty_sessions() {
    assert_eq!(format_session(&Session::default()), "No session stored.");
}

#[test]
fn it_formats_full_sessions() {
    let token = jwt_fixture(&profile_claims_fixture());
    let session = Session {
        profile: Profile::from_jwt(&token),
        credential: Some(token),
        user_id: Some("u-1".to_string()),
    };

    insta::assert_snapshot!(format_session(&session), @r###"
    Profile: Dana Scully <dana@example.com>
    User ID: u-1
    Credential: eyJhbGciOiJS...
    "###);
}

#[test]
fn it_formats_partial_sessions() {
    let session = Session {
        credential: Some("short".to_string()),
        profile: None,
        user_id: None,
    };

    assert_eq!(format_session(&session), "Credential: short");
}

#[test]
fn it_parses_subcommands() -> Result<()> {
    let matches = build().try_get_matches_from(vec!["workspaceai", "session", "show"])?;
    let (name, session_matches) = matches.subcommand().unwrap();
    assert_eq!(name, "session");
    assert_eq!(session_matches.subcommand_name(), Some("show"));

    let matches = build().try_get_matches_from(vec![
        "workspaceai",
        "--launch-url",
        "workspaceai://home/?google_connected=1",
    ])?;
    assert_eq!(
        matches.get_one::<String>("launch-url"),
        Some(&"workspaceai://home/?google_connected=1".to_string())
    );
    return Ok(());
}
