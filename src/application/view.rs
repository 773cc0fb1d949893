#[cfg(test)]
#[path = "view_test.rs"]
mod tests;

use ratatui::prelude::*;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Scrollbar;
use ratatui::widgets::ScrollbarOrientation;
use ratatui::widgets::Tabs;
use ratatui::widgets::Wrap;

use super::inputs::Field;
use super::inputs::Inputs;
use crate::domain::models::AuthMode;
use crate::domain::models::BackendStatus;
use crate::domain::models::Loading;
use crate::domain::models::Message;
use crate::domain::models::Profile;
use crate::domain::models::Role;
use crate::domain::models::TextArea;
use crate::domain::services::AppState;

const PROFILE_WIDTH: u16 = 38;
const ACTIVITY_WIDTH: u16 = 34;

const FOCUS_ITEMS: [&str; 3] = [
    "Review unread Gmail summaries",
    "Prepare next week's calendar agenda",
    "Outline the product update doc",
];

const ACTIVITY_ITEMS: [(&str, &str); 3] = [
    ("Drafted an email to product team", "2m ago"),
    ("Created a new project kickoff doc", "18m ago"),
    ("Scheduled a follow-up on Calendar", "1h ago"),
];

const INTEGRATIONS: [&str; 4] = ["Gmail", "Calendar", "Docs", "Drive"];

pub fn help_text() -> String {
    let text = r#"
HOTKEYS:
- Tab - Move focus to the next input
- Enter - Submit the identity token, or send the chat draft
- ALT+Enter - New line in the chat draft
- CTRL+T - Switch between sign in and register
- CTRL+G - Connect Google workspace access
- CTRL+O - Sign out and clear the stored session
- Up arrow - Scroll up
- Down arrow - Scroll down
- CTRL+U - Page up
- CTRL+D - Page down
- CTRL+C - Exit WorkspaceAI
        "#;

    return text.trim().to_string();
}

/// Sizes of the chat window from the last render, used to bound scrolling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ChatMetrics {
    pub list_length: u16,
    pub viewport_length: u16,
}

/// Line count for scroll bounds, saturating for very long chat logs.
pub fn list_length(lines: usize) -> u16 {
    return u16::try_from(lines).unwrap_or(u16::MAX);
}

fn card<'a>(title: &str) -> Block<'a> {
    return Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" {title} "),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .padding(Padding::new(1, 1, 0, 0));
}

fn muted<'a>(text: &str) -> Span<'a> {
    return Span::styled(text.to_string(), Style::default().fg(Color::DarkGray));
}

fn header<'a>(meta: Vec<String>) -> Paragraph<'a> {
    let mut spans = vec![
        Span::styled(
            "WorkspaceAI",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
    ];
    spans.push(muted(&meta.join(" · ")));

    return Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::new(1, 1, 0, 0)),
    );
}

fn footer<'a>(hints: &str) -> Paragraph<'a> {
    return Paragraph::new(Line::from(muted(hints))).alignment(Alignment::Center);
}

/// Status line of the signed-in profile card.
pub fn profile_status(app_state: &AppState) -> (String, Color) {
    match &app_state.backend_status {
        Some(BackendStatus::Ok(_)) => {
            return (format!("Backend: {}", app_state.backend_url), Color::Green);
        }
        Some(BackendStatus::Error(message)) if !message.is_empty() => {
            return (message.to_string(), Color::Red);
        }
        Some(BackendStatus::Error(_)) => {
            return ("Backend verification failed.".to_string(), Color::Red);
        }
        _ => return ("Checking backend status…".to_string(), Color::DarkGray),
    }
}

/// Status line under the sign-in card. Nothing is shown before the first
/// verification.
pub fn sign_in_status(app_state: &AppState) -> Option<(String, Color)> {
    match &app_state.backend_status {
        Some(BackendStatus::Loading) => {
            return Some(("Verifying with backend…".to_string(), Color::DarkGray));
        }
        Some(BackendStatus::Ok(payload)) => {
            let email = payload.email.clone().unwrap_or_default();
            return Some((format!("Backend verified {email}."), Color::Green));
        }
        Some(BackendStatus::Error(message)) if !message.is_empty() => {
            return Some((message.to_string(), Color::Red));
        }
        Some(BackendStatus::Error(_)) => {
            return Some(("Backend verification failed.".to_string(), Color::Red));
        }
        None => return None,
    }
}

fn message_lines<'a>(message: &Message, width: usize) -> Vec<Line<'a>> {
    let bubble_width = (width * 4 / 5).max(10).min(width.max(1));
    let mut label_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut text_style = Style::default();
    if message.role == Role::User {
        label_style = Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD);
        text_style = Style::default().fg(Color::White);
    }

    let mut rows = vec![(format!("{} · {}", message.role, message.time), label_style)];
    for line in message.as_string_lines(bubble_width) {
        rows.push((line, text_style));
    }

    let mut lines = rows
        .into_iter()
        .map(|(text, style)| {
            let mut padded = text;
            if message.role == Role::User {
                let pad = width.saturating_sub(padded.chars().count());
                padded = format!("{}{padded}", " ".repeat(pad));
            }
            return Line::from(Span::styled(padded, style));
        })
        .collect::<Vec<Line>>();

    lines.push(Line::from(""));
    return lines;
}

fn render_profile<B: Backend>(
    frame: &mut Frame<B>,
    area: Rect,
    app_state: &AppState,
    profile: &Profile,
) {
    let (status, status_color) = profile_status(app_state);
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", profile.initial()),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(
                profile.name.clone().unwrap_or_default(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            "Google verified",
            Style::default().fg(Color::Green),
        )),
        Line::from(""),
        Line::from(Span::styled(status, Style::default().fg(status_color))),
        Line::from(""),
    ];

    if app_state.connected {
        lines.push(Line::from(muted("Workspace access connected.")));
        lines.push(Line::from(Span::styled(
            "[Connected]",
            Style::default().fg(Color::Green),
        )));
    } else {
        lines.push(Line::from(muted("Workspace access required.")));
        lines.push(Line::from(Span::styled(
            "Connect Google (Ctrl+G)",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
    }

    if !app_state.error.is_empty() {
        lines.push(Line::from(Span::styled(
            app_state.error.to_string(),
            Style::default().fg(Color::Red),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Today's focus",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for item in FOCUS_ITEMS {
        lines.push(Line::from(format!("• {item}")));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(muted("Sign out (Ctrl+O)")));

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(card("Workspace profile")),
        area,
    );
}

fn render_chat<B: Backend>(
    frame: &mut Frame<B>,
    area: Rect,
    app_state: &AppState,
    inputs: &Inputs,
) -> ChatMetrics {
    let block = card("Assistant chat");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            muted("Ask about Gmail, Calendar, Docs, and tasks."),
            Span::raw("  "),
            Span::styled("Lo-fi mode", Style::default().fg(Color::Magenta)),
        ])),
        layout[0],
    );

    let window = layout[1];
    let width = window.width.saturating_sub(2) as usize;
    let mut lines = app_state
        .chat
        .messages
        .iter()
        .flat_map(|message| return message_lines(message, width))
        .collect::<Vec<Line>>();
    if app_state.chat.responding {
        lines.push(Loading::line(app_state.ticks));
    }

    let metrics = ChatMetrics {
        list_length: list_length(lines.len()),
        viewport_length: window.height,
    };
    let top = app_state
        .scroll
        .top(metrics.list_length, metrics.viewport_length);

    frame.render_widget(Paragraph::new(lines).scroll((top, 0)), window);
    frame.render_stateful_widget(
        Scrollbar::new(ScrollbarOrientation::VerticalRight),
        window,
        &mut app_state
            .scroll
            .scrollbar_state(metrics.list_length, metrics.viewport_length),
    );

    frame.render_widget(inputs.draft.widget(), layout[2]);

    return metrics;
}

fn render_activity<B: Backend>(frame: &mut Frame<B>, area: Rect) {
    let mut lines = vec![];
    for (item, time) in ACTIVITY_ITEMS {
        lines.push(Line::from(vec![
            Span::styled("● ", Style::default().fg(Color::Cyan)),
            Span::raw(item),
        ]));
        lines.push(Line::from(muted(&format!("  {time}"))));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(muted(
        "Activity will update as you use Gmail, Docs, and Calendar.",
    )));

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(card("Recent activity")),
        area,
    );
}

fn render_home<B: Backend>(
    frame: &mut Frame<B>,
    app_state: &AppState,
    inputs: &Inputs,
    profile: &Profile,
) -> ChatMetrics {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    frame.render_widget(
        header(vec![
            "Home".to_string(),
            profile.email.clone().unwrap_or_default(),
        ]),
        layout[0],
    );

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![
            Constraint::Length(PROFILE_WIDTH),
            Constraint::Min(20),
            Constraint::Length(ACTIVITY_WIDTH),
        ])
        .split(layout[1]);

    render_profile(frame, columns[0], app_state, profile);
    let metrics = render_chat(frame, columns[1], app_state, inputs);
    render_activity(frame, columns[2]);

    frame.render_widget(
        footer("Enter send · Alt+Enter new line · Ctrl+G connect · Ctrl+O sign out · Ctrl+C quit"),
        layout[2],
    );

    return metrics;
}

fn render_input<B: Backend>(
    frame: &mut Frame<B>,
    area: Rect,
    inputs: &Inputs,
    field: Field,
    auth_mode: AuthMode,
) {
    let textarea = inputs.textarea(field, auth_mode);
    let focused = inputs.focus == field;
    let value = TextArea::text(textarea);

    if value.is_empty() && !focused {
        frame.render_widget(
            Paragraph::new(Line::from(muted(field.placeholder(auth_mode))))
                .block(TextArea::block(field.title(), focused)),
            area,
        );
        return;
    }

    if field == Field::Password {
        frame.render_widget(
            Paragraph::new("•".repeat(value.chars().count()))
                .block(TextArea::block(field.title(), focused)),
            area,
        );
        return;
    }

    frame.render_widget(textarea.widget(), area);
}

fn render_story<B: Backend>(frame: &mut Frame<B>, area: Rect) {
    let mut pills = vec![];
    for name in INTEGRATIONS {
        pills.push(Span::styled(
            format!(" {name} "),
            Style::default().fg(Color::Black).bg(Color::Gray),
        ));
        pills.push(Span::raw(" "));
    }

    let lines = vec![
        Line::from(Span::styled(
            "Your Google workspace, softly arranged.",
            Style::default().fg(Color::Magenta),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Sign in to your calm assistant.",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(muted(
            "An agent that helps you with Gmail, Calendar, Docs, and more. Start with an email or use Google to drop right in.",
        )),
        Line::from(""),
        Line::from(pills),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().padding(Padding::new(2, 2, 1, 0))),
        area,
    );
}

fn render_auth<B: Backend>(
    frame: &mut Frame<B>,
    area: Rect,
    app_state: &AppState,
    inputs: &Inputs,
) {
    let block = card("Account");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    let selected = match app_state.auth_mode {
        AuthMode::SignIn => 0,
        AuthMode::Register => 1,
    };
    frame.render_widget(
        Tabs::new(vec![
            AuthMode::SignIn.to_string(),
            AuthMode::Register.to_string(),
        ])
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        layout[0],
    );

    render_input(frame, layout[1], inputs, Field::Email, app_state.auth_mode);
    render_input(frame, layout[2], inputs, Field::Password, app_state.auth_mode);

    let submit = match app_state.auth_mode {
        AuthMode::SignIn => "Sign in with email",
        AuthMode::Register => "Create account",
    };
    frame.render_widget(
        Paragraph::new(Line::from(muted(submit))).alignment(Alignment::Center),
        layout[3],
    );
    frame.render_widget(
        Paragraph::new(Line::from(muted("──────── or ────────"))).alignment(Alignment::Center),
        layout[4],
    );

    if app_state.client_missing() {
        frame.render_widget(
            Paragraph::new(vec![
                Line::from(Span::styled(
                    "Missing client ID.",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(muted(
                    "Set client-id in the config file or WORKSPACEAI_CLIENT_ID.",
                )),
            ])
            .wrap(Wrap { trim: false }),
            layout[5],
        );
    } else {
        render_input(frame, layout[5], inputs, Field::Token, app_state.auth_mode);
    }

    let mut lines = vec![];
    if !app_state.error.is_empty() {
        lines.push(Line::from(Span::styled(
            app_state.error.to_string(),
            Style::default().fg(Color::Red),
        )));
    }
    if let Some((status, color)) = sign_in_status(app_state) {
        lines.push(Line::from(Span::styled(status, Style::default().fg(color))));
    }
    if app_state.session().credential.is_some() {
        lines.push(Line::from(muted("Clear session (Ctrl+O)")));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().padding(Padding::new(0, 0, 1, 0))),
        layout[6],
    );
}

fn render_sign_in<B: Backend>(frame: &mut Frame<B>, app_state: &AppState, inputs: &Inputs) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    frame.render_widget(
        header(vec![
            "Workspace access".to_string(),
            format!("Version {}", env!("CARGO_PKG_VERSION")),
        ]),
        layout[0],
    );

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(layout[1]);

    render_story(frame, columns[0]);
    render_auth(frame, columns[1], app_state, inputs);

    frame.render_widget(
        footer("Tab next field · Ctrl+T sign in/register · Enter submit token · Ctrl+C quit"),
        layout[2],
    );
}

/// Draws whichever screen matches the session: home once a profile is known,
/// sign-in otherwise.
pub fn render<B: Backend>(frame: &mut Frame<B>, app_state: &AppState, inputs: &Inputs) -> ChatMetrics {
    if let Some(profile) = app_state.profile() {
        return render_home(frame, app_state, inputs, profile);
    }

    render_sign_in(frame, app_state, inputs);
    return ChatMetrics::default();
}
