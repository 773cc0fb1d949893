#[cfg(test)]
#[path = "launch_test.rs"]
mod tests;

use std::sync::Mutex;
use std::sync::MutexGuard;

use anyhow::Result;
use reqwest::Url;

use crate::domain::models::Location;

pub const DEFAULT_LAUNCH_URL: &str = "workspaceai://home/";

struct LaunchState {
    assigned: Option<String>,
    href: Url,
}

/// The address the terminal app was opened with. Deep links returning from
/// the consent page are passed in through `--launch-url`.
pub struct LaunchLocation {
    state: Mutex<LaunchState>,
}

impl LaunchLocation {
    pub fn new(launch_url: &str) -> Result<LaunchLocation> {
        let mut href = Url::parse(DEFAULT_LAUNCH_URL)?;
        if !launch_url.trim().is_empty() {
            match Url::parse(launch_url.trim()) {
                Ok(url) => href = url,
                Err(err) => {
                    tracing::warn!(launch_url, error = ?err, "Ignoring unparseable launch URL");
                }
            }
        }

        return Ok(LaunchLocation {
            state: Mutex::new(LaunchState {
                assigned: None,
                href,
            }),
        });
    }

    fn state(&self) -> MutexGuard<'_, LaunchState> {
        return self
            .state
            .lock()
            .unwrap_or_else(|poisoned| return poisoned.into_inner());
    }
}

impl Location for LaunchLocation {
    fn href(&self) -> String {
        return self.state().href.to_string();
    }

    fn query_param(&self, name: &str) -> Option<String> {
        return self
            .state()
            .href
            .query_pairs()
            .find(|(key, _)| return key == name)
            .map(|(_, value)| return value.to_string());
    }

    fn replace(&self, path: &str) {
        let mut state = self.state();
        state.href.set_query(None);
        state.href.set_fragment(None);
        state.href.set_path(path);
        tracing::debug!(href = state.href.as_str(), "Replaced location");
    }

    fn assign(&self, url: &str) {
        tracing::debug!(url, "Handing off to external page");
        self.state().assigned = Some(url.to_string());
    }

    fn assigned(&self) -> Option<String> {
        return self.state().assigned.clone();
    }
}
