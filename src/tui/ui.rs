use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::Paragraph;

use crate::core::state::{App, Phase};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{ResultView, SignInView, TitleBar};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    // Unauthenticated: the sign-in surface is the whole page;
    // prompt entry and results are unreachable.
    if app.phase == Phase::Unauthenticated {
        let mut sign_in = SignInView {
            app_name: app.config.app_name.clone(),
            summary: app.config.summary.clone(),
            status_message: app.status_message.clone(),
            theme: tui.theme,
            pulse_value: tui.pulse_value,
        };
        sign_in.render(frame, frame.area());
        return;
    }

    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(2), Min(0), Length(3), Length(1)]);
    let [title_area, result_area, input_area, footer_area] = layout.areas(frame.area());

    let mut title_bar = TitleBar {
        app_name: app.config.app_name.clone(),
        summary: app.config.summary.clone(),
        status_message: app.status_message.clone(),
        has_logo: app.config.app_logo.is_some(),
        theme: tui.theme,
    };
    title_bar.render(frame, title_area);

    let result_view = ResultView {
        result: app.result.as_deref(),
        busy: app.is_busy(),
        spinner_frame,
        theme: tui.theme,
    };
    result_view.render(frame, result_area, &mut tui.result_view);

    tui.input_box.render(frame, input_area);

    let footer = if app.is_busy() {
        "Receiving... · Ctrl+L: sign out · Ctrl+C: quit"
    } else {
        "Enter: start · Ctrl+L: sign out · Ctrl+C: quit"
    };
    frame.render_widget(
        Paragraph::new(Span::styled(
            footer,
            Style::default().add_modifier(Modifier::DIM),
        )),
        footer_area,
    );
}
