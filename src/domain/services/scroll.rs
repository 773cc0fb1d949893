#[cfg(test)]
#[path = "scroll_test.rs"]
mod tests;

use ratatui::widgets::ScrollbarState;

const PAGE_LENGTH: u16 = 10;

/// Scroll position of the chat window, kept as a distance from the bottom so
/// new lines stay in view unless the user scrolled up.
#[derive(Default)]
pub struct Scroll {
    list_length: u16,
    viewport_length: u16,
    pub offset: u16,
}

impl Scroll {
    fn max_offset(&self) -> u16 {
        return self.list_length.saturating_sub(self.viewport_length);
    }

    pub fn up(&mut self) {
        self.offset = self.offset.saturating_add(1).min(self.max_offset());
    }

    pub fn up_page(&mut self) {
        for _ in 0..PAGE_LENGTH {
            self.up();
        }
    }

    pub fn down(&mut self) {
        self.offset = self.offset.saturating_sub(1);
    }

    pub fn down_page(&mut self) {
        for _ in 0..PAGE_LENGTH {
            self.down();
        }
    }

    /// Follows the newest line.
    pub fn last(&mut self) {
        self.offset = 0;
    }

    /// First visible line for a list of `list_length` lines shown in
    /// `viewport_length` rows.
    pub fn top(&self, list_length: u16, viewport_length: u16) -> u16 {
        let max_offset = list_length.saturating_sub(viewport_length);
        return max_offset.saturating_sub(self.offset.min(max_offset));
    }

    pub fn scrollbar_state(&self, list_length: u16, viewport_length: u16) -> ScrollbarState {
        return ScrollbarState::default()
            .content_length(list_length)
            .viewport_content_length(viewport_length)
            .position(self.top(list_length, viewport_length));
    }

    pub fn set_state(&mut self, list_length: u16, viewport_length: u16) {
        self.list_length = list_length;
        self.viewport_length = viewport_length;
        self.offset = self.offset.min(self.max_offset());
    }
}
