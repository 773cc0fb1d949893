#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;

use anyhow::Result;
use tokio::sync::mpsc;

use crate::domain::models::Action;
use crate::domain::models::Message;
use crate::domain::models::RespondResponse;
use crate::domain::models::WorkspaceBackendArc;

pub const REPLY_FALLBACK: &str = "I completed that request. Let me know what to do next.";
pub const FAILURE_FALLBACK: &str = "Something went wrong.";

/// The chat log and its pending-reply flag. Messages are only ever appended.
pub struct ChatController {
    pub messages: Vec<Message>,
    pub responding: bool,
}

impl Default for ChatController {
    fn default() -> ChatController {
        return ChatController {
            messages: vec![Message::welcome()],
            responding: false,
        };
    }
}

impl ChatController {
    /// Appends the draft as a user message and requests a reply. Returns
    /// false when the draft is blank, in which case nothing changes and the
    /// draft should be kept.
    pub fn send(
        &mut self,
        draft: &str,
        user_id: Option<&str>,
        tx: &mpsc::UnboundedSender<Action>,
    ) -> Result<bool> {
        let text = draft.trim();
        if text.is_empty() {
            return Ok(false);
        }

        let message = Message::user(text);
        self.messages.push(message.clone());
        self.responding = true;

        let user_id = match user_id.filter(|user_id| return !user_id.is_empty()) {
            Some(user_id) => user_id,
            None => {
                tracing::debug!("No user id yet, message kept locally");
                self.responding = false;
                return Ok(true);
            }
        };

        if let Err(err) = tx.send(Action::ChatRequest(message, user_id.to_string())) {
            self.responding = false;
            return Err(err.into());
        }

        return Ok(true);
    }

    pub fn settle(&mut self, reply: Message) {
        self.messages.push(reply);
        self.responding = false;
    }

    /// Runs the backend request for `message` and builds the assistant reply
    /// for either outcome.
    pub async fn request_reply(
        backend: &WorkspaceBackendArc,
        message: &Message,
        user_id: &str,
    ) -> Message {
        match backend.respond(&message.text, user_id).await {
            Ok(res) => return message.reply(&ChatController::reply_text(&res)),
            Err(err) => {
                tracing::error!(error = ?err, "Chat request failed");
                let mut text = err.to_string();
                if text.is_empty() {
                    text = FAILURE_FALLBACK.to_string();
                }

                return message.reply(&text);
            }
        }
    }

    pub fn reply_text(res: &RespondResponse) -> String {
        if let Some(summary) = res.summary.as_deref().filter(|summary| return !summary.is_empty()) {
            return summary.to_string();
        }

        let results = res.results.as_ref().filter(|results| return !results.is_null());
        if let Some(results) = results {
            if let Ok(pretty) = serde_json::to_string_pretty(results) {
                return pretty;
            }
        }

        return REPLY_FALLBACK.to_string();
    }
}
