use ratatui::style::Color;
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::widgets::BorderType;
use ratatui::widgets::Borders;
use ratatui::widgets::Padding;

pub struct TextArea {}

impl<'a> TextArea {
    pub fn new(title: &str, focused: bool) -> tui_textarea::TextArea<'a> {
        let mut textarea = tui_textarea::TextArea::default();
        TextArea::set_focus(&mut textarea, title, focused);

        return textarea;
    }

    pub fn block(title: &str, focused: bool) -> Block<'a> {
        let mut border_style = Style::default().fg(Color::DarkGray);
        if focused {
            border_style = Style::default().fg(Color::Cyan);
        }

        return Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(title.to_string())
            .padding(Padding::new(1, 1, 0, 0));
    }

    pub fn set_focus(textarea: &mut tui_textarea::TextArea<'a>, title: &str, focused: bool) {
        textarea.set_block(TextArea::block(title, focused));
        textarea.set_cursor_line_style(Style::default());

        let mut cursor_style = Style::default();
        if focused {
            cursor_style = Style::default().bg(Color::White).fg(Color::Black);
        }
        textarea.set_cursor_style(cursor_style);
    }

    pub fn text(textarea: &tui_textarea::TextArea<'a>) -> String {
        return textarea.lines().join("\n");
    }
}
