//! # SignInView Component
//!
//! Full-screen sign-in surface. While unauthenticated this is the entire
//! UI - the prompt field and stream consumer do not exist until a sign-in
//! flow completes.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;
use crate::tui::theme::Theme;

pub struct SignInView {
    pub app_name: String,
    pub summary: String,
    /// Status line; carries the verification URL and user code mid-flow.
    pub status_message: String,
    pub theme: Theme,
    /// 0.0..=1.0 animation value for the call-to-action pulse.
    pub pulse_value: f32,
}

impl Component for SignInView {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let name_style = Style::default()
            .fg(self.theme.primary)
            .add_modifier(Modifier::BOLD);
        let dim = Style::default().add_modifier(Modifier::DIM);

        let cta_style = if self.pulse_value > 0.5 {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let lines = vec![
            Line::from(Span::styled(self.app_name.clone(), name_style)),
            Line::from(Span::styled(self.summary.clone(), dim)),
            Line::default(),
            Line::from(Span::styled("Please sign in to continue", cta_style)),
            Line::default(),
            Line::from(Span::styled(
                "Enter: sign in with Google · Esc: quit",
                dim,
            )),
            Line::from(Span::styled(self.status_message.clone(), dim)),
        ];

        let text_height = lines.len() as u16;
        let [centered] = Layout::vertical([Constraint::Length(text_height)])
            .flex(Flex::Center)
            .areas(area);

        frame.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            centered,
        );
    }
}
