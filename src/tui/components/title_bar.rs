//! # TitleBar Component
//!
//! Top chrome: app name in the theme color, summary text, and the status
//! line. Purely presentational - all fields are props from the parent, so
//! there is nothing to test beyond the projection itself.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;
use crate::tui::theme::Theme;

pub struct TitleBar {
    pub app_name: String,
    pub summary: String,
    pub status_message: String,
    /// Whether a logo is configured. A terminal can't show the image, so
    /// presence just toggles the marker glyph, mirroring the layout shift
    /// the logo causes on the web chrome.
    pub has_logo: bool,
    pub theme: Theme,
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let name_style = Style::default()
            .fg(self.theme.primary)
            .add_modifier(Modifier::BOLD);
        let dim = Style::default().add_modifier(Modifier::DIM);

        let mut header = Vec::new();
        if self.has_logo {
            header.push(Span::styled("◆ ", name_style));
        }
        header.push(Span::styled(self.app_name.clone(), name_style));
        header.push(Span::raw("  "));
        header.push(Span::styled(self.summary.clone(), dim));

        let lines = vec![
            Line::from(header),
            Line::from(Span::styled(self.status_message.clone(), dim)),
        ];

        frame.render_widget(Paragraph::new(lines), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_to_text(bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(60, 2);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| bar.render(f, f.area())).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_title_bar_shows_name_summary_status() {
        let mut bar = TitleBar {
            app_name: "OhMyGPT".to_string(),
            summary: "Ask me any thing you want.".to_string(),
            status_message: "Ready".to_string(),
            has_logo: false,
            theme: Theme::from_hex("#22c55e"),
        };
        let text = render_to_text(&mut bar);
        assert!(text.contains("OhMyGPT"));
        assert!(text.contains("Ask me any thing you want."));
        assert!(text.contains("Ready"));
        assert!(!text.contains("◆"));
    }

    #[test]
    fn test_title_bar_logo_marker() {
        let mut bar = TitleBar {
            app_name: "MyBot".to_string(),
            summary: String::new(),
            status_message: String::new(),
            has_logo: true,
            theme: Theme::from_hex("#3b82f6"),
        };
        let text = render_to_text(&mut bar);
        assert!(text.contains("◆"));
    }
}
