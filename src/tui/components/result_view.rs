//! # ResultView Component
//!
//! Projection of the result buffer and the busy state: in-progress or
//! completed text, a spinner while streaming, and nothing at all before
//! the first request. Holds scroll state only - the text itself is a prop
//! borrowed from the app state each frame.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;
use crate::tui::theme::Theme;

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Scroll state, persistent across frames.
pub struct ResultViewState {
    pub offset: u16,
    /// Follow the tail as chunks append; scrolling up releases it, End or
    /// scrolling to the bottom re-engages it.
    pub stick_to_bottom: bool,
}

impl Default for ResultViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultViewState {
    pub fn new() -> Self {
        Self {
            offset: 0,
            stick_to_bottom: true,
        }
    }
}

impl EventHandler for ResultViewState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<()> {
        match event {
            TuiEvent::ScrollUp => {
                self.offset = self.offset.saturating_sub(1);
                self.stick_to_bottom = false;
                Some(())
            }
            TuiEvent::ScrollDown => {
                self.offset = self.offset.saturating_add(1);
                Some(())
            }
            _ => None,
        }
    }
}

/// Per-frame view over the result buffer.
pub struct ResultView<'a> {
    /// `None` = no request issued yet; nothing is rendered.
    pub result: Option<&'a str>,
    pub busy: bool,
    pub spinner_frame: usize,
    pub theme: Theme,
}

impl ResultView<'_> {
    pub fn render(&self, frame: &mut Frame, area: Rect, state: &mut ResultViewState) {
        let Some(text) = self.result else {
            return;
        };

        let title = if self.busy {
            format!(
                "Result {}",
                SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()]
            )
        } else {
            String::from("Result")
        };

        let border_style = if self.busy {
            Style::default().fg(self.theme.primary)
        } else {
            Style::default().add_modifier(Modifier::DIM)
        };

        let paragraph = Paragraph::new(text)
            .block(
                Block::bordered()
                    .border_type(BorderType::Rounded)
                    .border_style(border_style)
                    .title(title),
            )
            .wrap(Wrap { trim: false });

        // Clamp the offset, following the tail while stuck to bottom.
        // line_count includes the block's two border rows, so the area
        // height (not the inner height) is the right subtrahend.
        let inner_width = area.width.saturating_sub(2);
        let total_lines = paragraph.line_count(inner_width) as u16;
        let max_offset = total_lines.saturating_sub(area.height);
        if state.stick_to_bottom || state.offset > max_offset {
            state.offset = max_offset;
        }
        if state.offset == max_offset {
            state.stick_to_bottom = true;
        }

        frame.render_widget(paragraph.scroll((state.offset, 0)), area);
    }
}
