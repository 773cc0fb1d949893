#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use chrono::DateTime;
use chrono::Local;
use serde_derive::Deserialize;
use serde_derive::Serialize;

pub const WELCOME_TEXT: &str = "Welcome! Ask me to summarize emails or prepare a calendar agenda.";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[strum(serialize = "You")]
    User,
    #[strum(serialize = "Assistant")]
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub text: String,
    pub time: String,
}

fn time_label(at: DateTime<Local>) -> String {
    return at.format("%H:%M").to_string();
}

impl Message {
    pub fn welcome() -> Message {
        return Message {
            id: "welcome".to_string(),
            role: Role::Assistant,
            text: WELCOME_TEXT.to_string(),
            time: time_label(Local::now()),
        };
    }

    pub fn user(text: &str) -> Message {
        return Message::user_at(text, Local::now());
    }

    /// User messages are keyed by their send time in epoch milliseconds.
    pub fn user_at(text: &str, at: DateTime<Local>) -> Message {
        return Message {
            id: at.timestamp_millis().to_string(),
            role: Role::User,
            text: text.to_string(),
            time: time_label(at),
        };
    }

    /// Builds the assistant message answering this one. Replies share the
    /// time label of the message they answer.
    pub fn reply(&self, text: &str) -> Message {
        return Message {
            id: format!("{}-reply", self.id),
            role: Role::Assistant,
            text: text.to_string(),
            time: self.time.to_string(),
        };
    }

    pub fn as_string_lines(&self, line_max_width: usize) -> Vec<String> {
        let width = line_max_width.max(1);
        let mut lines: Vec<String> = Vec::new();

        // Tabs are expanded for display only, the stored text is what was sent.
        let text = self.text.replace('\t', "  ");
        for full_line in text.split('\n') {
            if full_line.trim().is_empty() {
                lines.push(" ".to_string());
                continue;
            }

            let mut current = String::new();
            for word in full_line.split(' ') {
                let mut word = word.to_string();

                // Words wider than the bubble are hard wrapped.
                while word.chars().count() > width {
                    if !current.is_empty() {
                        lines.push(current.trim_end().to_string());
                        current = String::new();
                    }
                    lines.push(word.chars().take(width).collect());
                    word = word.chars().skip(width).collect();
                }

                let current_len = current.chars().count();
                if current_len > 0 && current_len + 1 + word.chars().count() > width {
                    lines.push(current.trim_end().to_string());
                    current = word;
                } else {
                    if current_len > 0 {
                        current.push(' ');
                    }
                    current.push_str(&word);
                }
            }

            if !current.is_empty() {
                lines.push(current.trim_end().to_string());
            }
        }

        return lines;
    }
}
