use crossterm::event::{KeyCode, KeyEvent};
use ratatui::widgets::ScrollbarState;

const PAGE: usize = 10;

/// Offset and scrollbar of a scrollable text view.
#[derive(Debug, Default)]
pub struct ScrollPosition {
    pub offset: usize,
    pub scrollbar: ScrollbarState,
}

impl ScrollPosition {
    pub fn reset(&mut self) {
        self.offset = 0;
        self.scrollbar = ScrollbarState::new(0);
    }

    fn set(&mut self, offset: usize) {
        self.offset = offset;
        self.scrollbar = self.scrollbar.position(offset);
    }

    /// Apply a scrolling key. Returns false when the key is not a scroll key.
    ///
    /// Scrolling down is unbounded here; rendering clamps the offset.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let offset = match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.offset.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.offset.saturating_add(1),
            KeyCode::PageUp => self.offset.saturating_sub(PAGE),
            KeyCode::PageDown => self.offset.saturating_add(PAGE),
            KeyCode::Home => 0,
            KeyCode::End => usize::MAX,
            _ => return false,
        };
        self.set(offset);
        true
    }
}
