use std::io;
use std::sync::Arc;

use anyhow::Result;
use crossterm::cursor;
use crossterm::event::DisableBracketedPaste;
use crossterm::event::DisableMouseCapture;
use crossterm::event::EnableBracketedPaste;
use crossterm::event::EnableMouseCapture;
use crossterm::terminal::disable_raw_mode;
use crossterm::terminal::enable_raw_mode;
use crossterm::terminal::EnterAlternateScreen;
use crossterm::terminal::LeaveAlternateScreen;
use ratatui::backend::CrosstermBackend;
use ratatui::prelude::*;
use ratatui::Terminal;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use yansi::Paint;

use super::inputs::Field;
use super::inputs::Inputs;
use super::view;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::Action;
use crate::domain::models::Event;
use crate::domain::models::LocationArc;
use crate::domain::services::events::EventsService;
use crate::domain::services::AppState;
use crate::domain::services::IdentityBridge;
use crate::infrastructure::identity::TerminalIdentityWidget;
use crate::infrastructure::storage::FileStore;

async fn start_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app_state: &mut AppState,
    widget: &TerminalIdentityWidget,
    tx: mpsc::UnboundedSender<Action>,
    rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let mut inputs = Inputs::default();
    let mut events = EventsService::new(rx);

    loop {
        let signed_in = app_state.profile().is_some();
        let with_token = !app_state.client_missing();
        inputs.sync(signed_in, with_token);

        let mut metrics = view::ChatMetrics::default();
        terminal.draw(|frame| {
            metrics = view::render(frame, app_state, &inputs);
        })?;
        app_state
            .scroll
            .set_state(metrics.list_length, metrics.viewport_length);

        match events.next().await? {
            Event::KeyboardCTRLC() => {
                break;
            }
            Event::KeyboardTab() => {
                inputs.focus_next(signed_in, with_token);
            }
            Event::KeyboardCTRLT() => {
                if !signed_in {
                    app_state.toggle_auth_mode();
                }
            }
            Event::KeyboardCTRLG() => {
                if signed_in {
                    app_state.connect_workspace(&tx)?;
                }
            }
            Event::KeyboardCTRLO() => {
                if app_state.can_sign_out() {
                    app_state.sign_out().await;
                    inputs = Inputs::default();
                }
            }
            Event::KeyboardEnter() => {
                if signed_in {
                    let draft = inputs.text(Field::Draft, app_state.auth_mode);
                    if app_state.send_message(&draft, &tx)? {
                        inputs.clear(Field::Draft);
                    }
                } else if inputs.focus == Field::Token {
                    let token = inputs.text(Field::Token, app_state.auth_mode);
                    if widget.submit(&token) {
                        inputs.clear(Field::Token);
                    }
                }
            }
            Event::KeyboardCharInput(input) => {
                inputs.input(input, app_state.auth_mode);
            }
            Event::KeyboardPaste(text) => {
                inputs.paste(&text, app_state.auth_mode);
            }
            Event::UIScrollDown() => {
                app_state.scroll.down();
            }
            Event::UIScrollUp() => {
                app_state.scroll.up();
            }
            Event::UIScrollPageDown() => {
                app_state.scroll.down_page();
            }
            Event::UIScrollPageUp() => {
                app_state.scroll.up_page();
            }
            Event::UITick() => {
                app_state.tick();
            }
            Event::CredentialReceived(credential) => {
                app_state.handle_credential(credential, &tx).await?;
            }
            Event::VerificationSettled(status) => {
                app_state.handle_verification(status).await;
            }
            Event::ConnectionStatus(connected) => {
                app_state.handle_connection_status(connected);
            }
            Event::ChatReply(reply) => {
                app_state.handle_chat_reply(reply);
            }
            Event::AuthorizationFailed() => {
                app_state.handle_authorization_failed();
            }
            Event::AuthorizationRedirected(url) => {
                app_state.handle_authorization_redirected(url);
                break;
            }
        }
    }

    return Ok(());
}

pub fn destruct_terminal_for_panic() {
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    );
    let _ = crossterm::execute!(io::stdout(), cursor::Show);
}

fn print_redirect(url: &str) {
    println!(
        "{}\n\n{url}\n\n{}",
        Paint::new("Open the following page to grant WorkspaceAI access to your Google workspace:")
            .bold(),
        Paint::new("Once done, relaunch with the return link: workspaceai --launch-url '<link>'")
            .dimmed(),
    );
}

pub async fn start(
    tx: mpsc::UnboundedSender<Action>,
    event_tx: mpsc::UnboundedSender<Event>,
    rx: mpsc::UnboundedReceiver<Event>,
    widget: Arc<TerminalIdentityWidget>,
    location: LocationArc,
) -> Result<()> {
    let client_id = Config::get(ConfigKey::ClientID);
    let mut app_state = AppState::new(
        Box::new(FileStore::default()),
        widget.clone(),
        location,
        &client_id,
        &Config::get(ConfigKey::BackendURL),
    );
    app_state.initialize(&tx).await?;

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    enable_raw_mode()?;
    crossterm::execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let term_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(term_backend)?;

    let cancel = CancellationToken::new();
    let bridge = IdentityBridge::new(widget.clone(), event_tx);
    let width = terminal.size()?.width;
    tokio::spawn(bridge.run(client_id, Some(width), cancel.clone()));

    let res = start_loop(&mut terminal, &mut app_state, &widget, tx, rx).await;
    cancel.cancel();

    disable_raw_mode()?;
    crossterm::execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableBracketedPaste
    )?;
    terminal.show_cursor()?;
    res?;

    if let Some(url) = &app_state.redirect {
        print_redirect(url);
    }

    return Ok(());
}
