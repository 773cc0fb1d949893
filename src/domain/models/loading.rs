use ratatui::style::Color;
use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;

/// The "Responding..." indicator shown while a reply is pending. Dots cycle
/// with the UI tick.
#[derive(Default)]
pub struct Loading {}

impl Loading {
    pub fn text(ticks: usize) -> String {
        let dots = ".".repeat(ticks % 3 + 1);
        return format!("Responding{dots}");
    }

    pub fn line<'a>(ticks: usize) -> Line<'a> {
        return Line::from(Span::styled(
            Loading::text(ticks),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ));
    }
}
