//! # InputBox Component
//!
//! Single-line prompt entry with placeholder text and horizontal scrolling.
//!
//! The buffer is internal state, updated synchronously on each input event
//! with no validation or length limit. Submission emits the raw buffer,
//! empty included, since an empty submit falls back to the configured
//! example prompt downstream. The buffer is cleared by the parent only
//! once a submission is actually accepted, so text typed during a stream
//! survives a rejected Enter.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User pressed Enter. Carries the raw buffer contents verbatim.
    Submit(String),
    /// Text content or cursor position changed.
    ContentChanged,
}

pub struct InputBox {
    /// Text buffer (internal state)
    pub buffer: String,
    /// Shown dim while the buffer is empty (prop, from config)
    pub placeholder: String,
    /// True while a stream is in flight (prop, from app state)
    pub disabled: bool,
    /// Cursor position as a byte offset into `buffer`
    cursor: usize,
    /// Horizontal scroll offset in display columns
    scroll: u16,
}

impl InputBox {
    pub fn new(placeholder: String) -> Self {
        Self {
            buffer: String::new(),
            placeholder,
            disabled: false,
            cursor: 0,
            scroll: 0,
        }
    }

    /// Resets buffer, cursor, and scroll. Called on accepted submission
    /// and on sign-out.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
        self.scroll = 0;
    }

    /// Display column of the cursor within the buffer.
    fn cursor_column(&self) -> u16 {
        self.buffer[..self.cursor].width() as u16
    }

    /// Keeps the cursor inside the visible window of the given inner width.
    fn update_scroll(&mut self, inner_width: u16) {
        if inner_width == 0 {
            return;
        }
        let col = self.cursor_column();
        if col < self.scroll {
            self.scroll = col;
        } else if col >= self.scroll + inner_width {
            self.scroll = col - inner_width + 1;
        }
    }
}

/// Largest byte index `< pos` that lies on a char boundary.
fn prev_char_boundary(s: &str, pos: usize) -> usize {
    let mut p = pos.saturating_sub(1);
    while p > 0 && !s.is_char_boundary(p) {
        p -= 1;
    }
    p
}

/// Smallest byte index `> pos` that lies on a char boundary.
fn next_char_boundary(s: &str, pos: usize) -> usize {
    let mut p = pos + 1;
    while p < s.len() && !s.is_char_boundary(p) {
        p += 1;
    }
    p.min(s.len())
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let inner_width = area.width.saturating_sub(2);
        self.update_scroll(inner_width);

        let border_style = if self.disabled {
            Style::default().add_modifier(Modifier::DIM)
        } else {
            Style::default()
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title("Prompt");

        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(self.placeholder.clone())
                .style(Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC))
        } else {
            Paragraph::new(self.buffer.clone()).scroll((0, self.scroll))
        };

        frame.render_widget(paragraph.block(block), area);

        if !self.disabled && area.width > 2 && area.height > 2 {
            let cursor_x = area.x + 1 + self.cursor_column().saturating_sub(self.scroll);
            frame.set_cursor_position((cursor_x.min(area.x + area.width - 2), area.y + 1));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                self.buffer.insert_str(self.cursor, text);
                self.cursor += text.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                if self.cursor > 0 {
                    let prev = prev_char_boundary(&self.buffer, self.cursor);
                    self.buffer.drain(prev..self.cursor);
                    self.cursor = prev;
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::Delete => {
                if self.cursor < self.buffer.len() {
                    let next = next_char_boundary(&self.buffer, self.cursor);
                    self.buffer.drain(self.cursor..next);
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorLeft => {
                if self.cursor > 0 {
                    self.cursor = prev_char_boundary(&self.buffer, self.cursor);
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorRight => {
                if self.cursor < self.buffer.len() {
                    self.cursor = next_char_boundary(&self.buffer, self.cursor);
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorHome => (self.cursor != 0).then(|| {
                self.cursor = 0;
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorEnd => (self.cursor != self.buffer.len()).then(|| {
                self.cursor = self.buffer.len();
                InputEvent::ContentChanged
            }),
            // Empty submissions are meaningful: they trigger the example
            // prompt fallback at the reducer.
            TuiEvent::Submit => Some(InputEvent::Submit(self.buffer.clone())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn test_box() -> InputBox {
        InputBox::new("Ask me any thing.".to_string())
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut input = test_box();

        assert_eq!(
            input.handle_event(&TuiEvent::InputChar('a')),
            Some(InputEvent::ContentChanged)
        );
        input.handle_event(&TuiEvent::InputChar('b'));
        assert_eq!(input.buffer, "ab");

        input.handle_event(&TuiEvent::Backspace);
        assert_eq!(input.buffer, "a");
    }

    #[test]
    fn test_backspace_on_empty_is_noop() {
        let mut input = test_box();
        assert_eq!(input.handle_event(&TuiEvent::Backspace), None);
    }

    #[test]
    fn test_multibyte_editing() {
        let mut input = test_box();
        input.handle_event(&TuiEvent::InputChar('é'));
        input.handle_event(&TuiEvent::InputChar('→'));
        assert_eq!(input.buffer, "é→");

        input.handle_event(&TuiEvent::CursorLeft);
        input.handle_event(&TuiEvent::Backspace);
        assert_eq!(input.buffer, "→");
    }

    #[test]
    fn test_cursor_movement_and_insert() {
        let mut input = test_box();
        for c in "world".chars() {
            input.handle_event(&TuiEvent::InputChar(c));
        }
        input.handle_event(&TuiEvent::CursorHome);
        input.handle_event(&TuiEvent::InputChar('>'));
        assert_eq!(input.buffer, ">world");

        input.handle_event(&TuiEvent::CursorEnd);
        input.handle_event(&TuiEvent::InputChar('!'));
        assert_eq!(input.buffer, ">world!");
    }

    #[test]
    fn test_delete_forward() {
        let mut input = test_box();
        input.handle_event(&TuiEvent::Paste("abc".to_string()));
        input.handle_event(&TuiEvent::CursorHome);
        input.handle_event(&TuiEvent::Delete);
        assert_eq!(input.buffer, "bc");
    }

    #[test]
    fn test_submit_emits_raw_buffer_without_clearing() {
        let mut input = test_box();
        input.handle_event(&TuiEvent::Paste("hello".to_string()));

        let res = input.handle_event(&TuiEvent::Submit);
        assert_eq!(res, Some(InputEvent::Submit("hello".to_string())));
        // The parent clears only on accepted submission
        assert_eq!(input.buffer, "hello");

        input.clear();
        assert!(input.buffer.is_empty());
    }

    #[test]
    fn test_empty_submit_emits_empty_string() {
        let mut input = test_box();
        let res = input.handle_event(&TuiEvent::Submit);
        assert_eq!(res, Some(InputEvent::Submit(String::new())));
    }

    #[test]
    fn test_render_shows_placeholder_when_empty() {
        let backend = TestBackend::new(40, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut input = test_box();

        terminal.draw(|f| input.render(f, f.area())).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Ask me any thing."));
    }

    #[test]
    fn test_render_shows_buffer_over_placeholder() {
        let backend = TestBackend::new(40, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut input = test_box();
        input.handle_event(&TuiEvent::Paste("typed text".to_string()));

        terminal.draw(|f| input.render(f, f.area())).unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("typed text"));
        assert!(!text.contains("Ask me any thing."));
    }

    #[test]
    fn test_scroll_follows_cursor_in_narrow_area() {
        let mut input = test_box();
        input.handle_event(&TuiEvent::Paste("0123456789abcdef".to_string()));
        input.update_scroll(8);
        // Cursor at column 16, window of 8: scroll puts it at the right edge
        assert_eq!(input.scroll, 16 - 8 + 1);

        input.handle_event(&TuiEvent::CursorHome);
        input.update_scroll(8);
        assert_eq!(input.scroll, 0);
    }
}
