use std::sync::Arc;
use std::sync::Mutex;

use super::TerminalIdentityWidget;
use crate::domain::models::CredentialHandler;
use crate::domain::models::IdentityWidget;

fn recording_handler() -> (CredentialHandler, Arc<Mutex<Vec<String>>>) {
    let received = Arc::new(Mutex::new(vec![]));
    let handler_received = received.clone();
    let handler: CredentialHandler = Box::new(move |credential| {
        handler_received.lock().unwrap().push(credential);
    });

    return (handler, received);
}

#[test]
fn it_is_ready_immediately() {
    let widget = TerminalIdentityWidget::new("");
    assert!(widget.is_ready());
    assert!(!widget.is_initialized());
}

#[test]
fn it_submits_credentials_to_handler() {
    let widget = TerminalIdentityWidget::new("");
    let (handler, received) = recording_handler();
    widget.initialize("client-123", handler);

    assert!(widget.submit("  token-abc  "));
    assert!(!widget.submit("   "));

    assert_eq!(widget.client_id(), Some("client-123".to_string()));
    assert_eq!(*received.lock().unwrap(), vec!["token-abc".to_string()]);
}

#[test]
fn it_does_not_submit_before_initialize() {
    let widget = TerminalIdentityWidget::new("");
    assert!(!widget.submit("token-abc"));
}

#[test]
fn it_delivers_launch_credential_once_on_prompt() {
    let widget = TerminalIdentityWidget::new("launch-token");
    let (handler, received) = recording_handler();
    widget.initialize("client-123", handler);

    widget.prompt();
    widget.prompt();

    assert_eq!(*received.lock().unwrap(), vec!["launch-token".to_string()]);
}

#[test]
fn it_skips_prompt_when_auto_select_is_disabled() {
    let widget = TerminalIdentityWidget::new("launch-token");
    let (handler, received) = recording_handler();
    widget.initialize("client-123", handler);

    widget.disable_auto_select();
    widget.prompt();

    assert!(!widget.auto_select());
    assert!(received.lock().unwrap().is_empty());
}

#[test]
fn it_records_button_width() {
    let widget = TerminalIdentityWidget::new("");
    widget.render_button(320);
    assert_eq!(widget.button_width(), 320);
}
