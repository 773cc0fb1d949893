use tui_textarea::Input;

use super::BackendStatus;
use super::Message;

pub enum Event {
    AuthorizationFailed(),
    AuthorizationRedirected(String),
    ChatReply(Message),
    ConnectionStatus(bool),
    CredentialReceived(String),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardCTRLG(),
    KeyboardCTRLO(),
    KeyboardCTRLT(),
    KeyboardEnter(),
    KeyboardPaste(String),
    KeyboardTab(),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UITick(),
    VerificationSettled(BackendStatus),
}
