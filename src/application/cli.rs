#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::io;
use std::path;

use anyhow::bail;
use anyhow::Result;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;
use clap_complete::generate;
use clap_complete::Generator;
use clap_complete::Shell;
use strum::VariantNames;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use yansi::Paint;

use super::view::help_text;
use crate::configuration::cache_dir;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::KeyValueStore;
use crate::domain::models::Session;
use crate::domain::services::SESSION_STORAGE_KEY;
use crate::infrastructure::storage::FileStore;

const CREDENTIAL_PREVIEW_LENGTH: usize = 12;

fn print_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
    std::process::exit(0);
}

pub fn format_session(session: &Session) -> String {
    if session.is_empty() {
        return "No session stored.".to_string();
    }

    let mut lines = vec![];
    if let Some(profile) = &session.profile {
        let name = profile.name.as_deref().unwrap_or("Unknown");
        match &profile.email {
            Some(email) => lines.push(format!("Profile: {name} <{email}>")),
            None => lines.push(format!("Profile: {name}")),
        }
    }

    if let Some(user_id) = &session.user_id {
        lines.push(format!("User ID: {user_id}"));
    }

    if let Some(credential) = &session.credential {
        let preview = credential
            .chars()
            .take(CREDENTIAL_PREVIEW_LENGTH)
            .collect::<String>();
        if credential.chars().count() > CREDENTIAL_PREVIEW_LENGTH {
            lines.push(format!("Credential: {preview}..."));
        } else {
            lines.push(format!("Credential: {preview}"));
        }
    }

    return lines.join("\n");
}

async fn print_session() -> Result<()> {
    let store = FileStore::default();
    let stored = match store.get(SESSION_STORAGE_KEY).await? {
        Some(stored) => stored,
        None => {
            println!("{}", format_session(&Session::default()));
            return Ok(());
        }
    };

    match serde_json::from_str::<Session>(&stored) {
        Ok(session) => println!("{}", format_session(&session.normalized())),
        Err(err) => bail!(format!(
            "Stored session at {} is corrupt: {err}",
            store.file_path(SESSION_STORAGE_KEY).to_string_lossy()
        )),
    }

    return Ok(());
}

async fn create_config_file() -> Result<()> {
    let config_file_path_str = Config::default(ConfigKey::ConfigFile);
    let config_file_path = path::PathBuf::from(&config_file_path_str);
    if config_file_path.exists() {
        bail!(format!(
            "Config file already exists at {config_file_path_str}"
        ));
    }

    if let Some(parent) = config_file_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).await?;
        }
    }

    let mut file = fs::File::create(config_file_path.clone()).await?;
    file.write_all(Config::serialize_default(build()).as_bytes())
        .await?;

    println!("Created default config file at {config_file_path_str}");
    return Ok(());
}

fn subcommand_completions() -> Command {
    return Command::new("completions")
        .about("Generates shell completions.")
        .arg(
            clap::Arg::new("shell")
                .short('s')
                .long("shell")
                .help("Which shell to generate completions for.")
                .action(ArgAction::Set)
                .value_parser(value_parser!(Shell))
                .required(true),
        );
}

fn subcommand_config() -> Command {
    return Command::new("config")
        .about("Configuration file options.")
        .subcommand(
            Command::new("create").about("Saves the default config file to the configuration file path. This command will fail if the file exists already.")
        )
        .subcommand(
            Command::new("default").about("Outputs the default configuration file to stdout.")
        )
        .subcommand(
            Command::new("path").about("Returns the default path for the configuration file.")
        );
}

fn subcommand_session() -> Command {
    return Command::new("session")
        .about("Inspect or clear the stored sign-in session.")
        .arg_required_else_help(true)
        .subcommand(Command::new("path").about("Print the path of the stored session file."))
        .subcommand(Command::new("show").about("Print who is signed in, without the full credential."))
        .subcommand(Command::new("clear").about("Delete the stored session. The next launch starts signed out."));
}

fn subcommand_debug() -> Command {
    let mut cmd = Command::new("debug");
    cmd = cmd.about("Debug helpers for WorkspaceAI")
        .hide(true)
        .subcommand(
            Command::new("log-path").about("Output path to debug log file generated when running WorkspaceAI with environment variable RUST_LOG=workspaceai")
        )
        .subcommand(
            Command::new("enum-config").about("List all config keys as strings.")
        );

    return cmd;
}

pub fn build() -> Command {
    let hotkeys_text = help_text()
        .split('\n')
        .map(|line| {
            if line.starts_with('-') {
                return format!("  {line}");
            }
            if line.starts_with("HOTKEYS:") {
                return Paint::new(line.to_string()).underline().bold().to_string();
            }
            return line.to_string();
        })
        .collect::<Vec<String>>()
        .join("\n");

    let about = format!(
        "{}\n\nVersion: {}",
        env!("CARGO_PKG_DESCRIPTION"),
        env!("CARGO_PKG_VERSION"),
    );

    return Command::new("workspaceai")
        .about(about)
        .author(env!("CARGO_PKG_AUTHORS"))
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(hotkeys_text)
        .arg_required_else_help(false)
        .subcommand(subcommand_completions())
        .subcommand(subcommand_config())
        .subcommand(subcommand_debug())
        .subcommand(subcommand_session())
        .arg(
            Arg::new(ConfigKey::BackendURL.as_str())
                .short('b')
                .long(ConfigKey::BackendURL.as_str())
                .env("WORKSPACEAI_BACKEND_URL")
                .num_args(1)
                .help(format!("Origin of the WorkspaceAI backend. [default: {}]", Config::default(ConfigKey::BackendURL)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ClientID.as_str())
                .long(ConfigKey::ClientID.as_str())
                .env("WORKSPACEAI_CLIENT_ID")
                .num_args(1)
                .help("OAuth client id for the identity widget. Sign-in shows a warning when unset.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::ConfigFile.as_str())
                .short('c')
                .long(ConfigKey::ConfigFile.as_str())
                .env("WORKSPACEAI_CONFIG_FILE")
                .num_args(1)
                .help(format!("Path to configuration file [default: {}]", Config::default(ConfigKey::ConfigFile)))
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::IdToken.as_str())
                .long(ConfigKey::IdToken.as_str())
                .env("WORKSPACEAI_ID_TOKEN")
                .num_args(1)
                .hide_env_values(true)
                .help("Signed identity credential handed over by the passive sign-in prompt on launch.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::LaunchURL.as_str())
                .short('u')
                .long(ConfigKey::LaunchURL.as_str())
                .env("WORKSPACEAI_LAUNCH_URL")
                .num_args(1)
                .help("URL the app is opened with, such as the return link from the workspace consent page.")
                .global(true),
        )
        .arg(
            Arg::new(ConfigKey::StorageDir.as_str())
                .long(ConfigKey::StorageDir.as_str())
                .env("WORKSPACEAI_STORAGE_DIR")
                .num_args(1)
                .help(format!("Directory where the signed-in session is kept. [default: {}]", Config::default(ConfigKey::StorageDir)))
                .global(true),
        );
}

/// Handles one-shot subcommands. Returns true when the UI should start.
pub async fn parse() -> Result<bool> {
    let matches = build().get_matches();

    match matches.subcommand() {
        Some(("debug", debug_matches)) => {
            match debug_matches.subcommand() {
                Some(("log-path", _)) => {
                    let log_path = cache_dir().join("debug.log");
                    println!("{}", log_path.to_string_lossy());
                }
                Some(("enum-config", _)) => {
                    let res = ConfigKey::VARIANTS.join("\n");
                    println!("{}", res);
                }
                _ => {
                    subcommand_debug().print_long_help()?;
                }
            }

            return Ok(false);
        }
        Some(("completions", subcmd_matches)) => {
            if let Some(completions) = subcmd_matches.get_one::<Shell>("shell").copied() {
                let mut app = build();
                print_completions(completions, &mut app);
            }
            return Ok(false);
        }
        Some(("config", subcmd_matches)) => match subcmd_matches.subcommand() {
            Some(("create", _)) => {
                create_config_file().await?;
                return Ok(false);
            }
            Some(("default", _)) => {
                println!("{}", Config::serialize_default(build()));
                return Ok(false);
            }
            Some(("path", _)) => {
                println!("{}", Config::default(ConfigKey::ConfigFile));
                return Ok(false);
            }
            _ => {
                subcommand_config().print_long_help()?;
                return Ok(false);
            }
        },
        Some(("session", subcmd_matches)) => {
            Config::load(vec![&matches, subcmd_matches]).await?;
            match subcmd_matches.subcommand() {
                Some(("path", _)) => {
                    let file_path = FileStore::default().file_path(SESSION_STORAGE_KEY);
                    println!("{}", file_path.to_string_lossy());
                }
                Some(("show", _)) => {
                    print_session().await?;
                }
                Some(("clear", _)) => {
                    FileStore::default().remove(SESSION_STORAGE_KEY).await?;
                    println!("Cleared stored session");
                }
                _ => {
                    subcommand_session().print_long_help()?;
                }
            }
            return Ok(false);
        }
        _ => {
            Config::load(vec![&matches]).await?;
        }
    }

    return Ok(true);
}
