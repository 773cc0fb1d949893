#[cfg(test)]
#[path = "terminal_test.rs"]
mod tests;

use std::sync::Mutex;
use std::sync::MutexGuard;

use crate::domain::models::CredentialHandler;
use crate::domain::models::IdentityWidget;

struct WidgetState {
    auto_select: bool,
    button_width: u16,
    client_id: Option<String>,
    handler: Option<CredentialHandler>,
    prompt_credential: Option<String>,
}

/// Identity widget for the terminal. The button is a token input on the
/// sign-in screen, and the passive prompt hands over a credential supplied at
/// launch.
pub struct TerminalIdentityWidget {
    state: Mutex<WidgetState>,
}

impl TerminalIdentityWidget {
    pub fn new(prompt_credential: &str) -> TerminalIdentityWidget {
        let mut credential = None;
        if !prompt_credential.trim().is_empty() {
            credential = Some(prompt_credential.trim().to_string());
        }

        return TerminalIdentityWidget {
            state: Mutex::new(WidgetState {
                auto_select: true,
                button_width: 0,
                client_id: None,
                handler: None,
                prompt_credential: credential,
            }),
        };
    }

    fn state(&self) -> MutexGuard<'_, WidgetState> {
        return self
            .state
            .lock()
            .unwrap_or_else(|poisoned| return poisoned.into_inner());
    }

    /// Hands a credential entered on the sign-in screen to the registered
    /// handler. Returns false when nothing was delivered.
    pub fn submit(&self, credential: &str) -> bool {
        let credential = credential.trim();
        if credential.is_empty() {
            return false;
        }

        let state = self.state();
        match &state.handler {
            Some(handler) => {
                handler(credential.to_string());
                return true;
            }
            None => {
                tracing::warn!("Credential submitted before the identity widget was initialized");
                return false;
            }
        }
    }

    pub fn is_initialized(&self) -> bool {
        return self.state().handler.is_some();
    }

    pub fn client_id(&self) -> Option<String> {
        return self.state().client_id.clone();
    }

    pub fn button_width(&self) -> u16 {
        return self.state().button_width;
    }

    pub fn auto_select(&self) -> bool {
        return self.state().auto_select;
    }
}

impl IdentityWidget for TerminalIdentityWidget {
    fn is_ready(&self) -> bool {
        return true;
    }

    fn initialize(&self, client_id: &str, handler: CredentialHandler) {
        let mut state = self.state();
        state.client_id = Some(client_id.to_string());
        state.handler = Some(handler);
    }

    fn render_button(&self, width: u16) {
        self.state().button_width = width;
    }

    fn prompt(&self) {
        let mut state = self.state();
        if !state.auto_select {
            return;
        }

        let credential = match state.prompt_credential.take() {
            Some(credential) => credential,
            None => return,
        };

        if let Some(handler) = &state.handler {
            tracing::debug!("Delivering launch credential from passive prompt");
            handler(credential);
        }
    }

    fn disable_auto_select(&self) {
        self.state().auto_select = false;
    }
}
