#[cfg(test)]
#[path = "identity_bridge_test.rs"]
mod tests;

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::domain::models::CredentialHandler;
use crate::domain::models::Event;
use crate::domain::models::IdentityWidgetArc;

pub const READY_POLL_INTERVAL: Duration = Duration::from_millis(150);
pub const READY_POLL_ATTEMPTS: usize = 40;
pub const BUTTON_MAX_WIDTH: u16 = 400;

/// Connects the identity widget to the UI loop. Credentials the widget
/// produces arrive as `Event::CredentialReceived`.
pub struct IdentityBridge {
    tx: mpsc::UnboundedSender<Event>,
    widget: IdentityWidgetArc,
}

impl IdentityBridge {
    pub fn new(widget: IdentityWidgetArc, tx: mpsc::UnboundedSender<Event>) -> IdentityBridge {
        return IdentityBridge { tx, widget };
    }

    pub fn button_width(available: Option<u16>) -> u16 {
        let width = available.filter(|width| return *width > 0);
        return width.unwrap_or(BUTTON_MAX_WIDTH).min(BUTTON_MAX_WIDTH);
    }

    /// Polls until the widget reports ready. Gives up after
    /// `READY_POLL_ATTEMPTS` polls or once `cancel` fires.
    pub async fn wait_until_ready(&self, cancel: &CancellationToken) -> bool {
        let mut interval = time::interval(READY_POLL_INTERVAL);

        for attempt in 1..=READY_POLL_ATTEMPTS {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::debug!(attempt, "Identity widget poll cancelled");
                    return false;
                }
                _ = interval.tick() => {}
            }

            if self.widget.is_ready() {
                tracing::debug!(attempt, "Identity widget ready");
                return true;
            }
        }

        tracing::warn!(
            attempts = READY_POLL_ATTEMPTS,
            "Identity widget never became ready"
        );
        return false;
    }

    fn credential_handler(&self) -> CredentialHandler {
        let tx = self.tx.clone();
        return Box::new(move |credential| {
            if let Err(err) = tx.send(Event::CredentialReceived(credential)) {
                tracing::error!(error = ?err, "Dropped credential from identity widget");
            }
        });
    }

    /// Wires the handler, renders the button and shows the passive prompt.
    /// Returns false when no client id is configured.
    pub fn start(&self, client_id: &str, width: Option<u16>) -> bool {
        if client_id.trim().is_empty() {
            tracing::warn!("No identity client id configured");
            return false;
        }

        self.widget.initialize(client_id, self.credential_handler());
        self.widget.render_button(IdentityBridge::button_width(width));
        self.widget.prompt();

        return true;
    }

    pub async fn run(self, client_id: String, width: Option<u16>, cancel: CancellationToken) -> bool {
        if client_id.trim().is_empty() {
            tracing::warn!("No identity client id configured");
            return false;
        }

        if !self.wait_until_ready(&cancel).await {
            return false;
        }

        return self.start(&client_id, width);
    }
}
