use std::time::{Duration, Instant};

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use super::OneShotTimer;
use crate::Theme;

const TOAST_WIDTH: u16 = 36;
const TOAST_HEIGHT: u16 = 4;

/// A single success notification pinned to the bottom-right corner.
///
/// Hidden until [`show`](Self::show) is called. Hides itself once the
/// auto-hide delay has passed, or earlier on [`dismiss`](Self::dismiss).
pub struct SuccessToast {
    title: String,
    message: String,
    dismiss_hint: Option<String>,
    visible: bool,
    auto_hide: OneShotTimer,
}

impl SuccessToast {
    pub fn new(title: impl Into<String>, message: impl Into<String>, delay: Duration) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            dismiss_hint: None,
            visible: false,
            auto_hide: OneShotTimer::new(delay),
        }
    }

    pub fn with_dismiss_hint(mut self, hint: impl Into<String>) -> Self {
        self.dismiss_hint = Some(hint.into());
        self
    }

    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show the toast and (re)start the auto-hide countdown from `now`.
    pub fn show(&mut self, now: Instant) {
        self.visible = true;
        self.auto_hide.start(now);
    }

    pub const fn dismiss(&mut self) {
        self.visible = false;
        self.auto_hide.cancel();
    }

    /// Advance the countdown. Returns true if the toast hid itself.
    pub fn handle_tick(&mut self, now: Instant) -> bool {
        if self.auto_hide.fire(now) {
            self.visible = false;
            return true;
        }
        false
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if !self.visible {
            return;
        }

        let width = TOAST_WIDTH.min(area.width);
        let height = TOAST_HEIGHT.min(area.height);
        let toast_area = Rect::new(
            area.x + area.width - width,
            area.y + area.height - height,
            width,
            height,
        );

        frame.render_widget(Clear, toast_area);

        let mut title = vec![Span::styled(
            format!(" {} ", self.title),
            Style::default()
                .fg(theme.green())
                .add_modifier(Modifier::BOLD),
        )];
        if let Some(hint) = &self.dismiss_hint {
            title.push(Span::styled(
                format!("[{hint}] "),
                Style::default().fg(theme.overlay1()),
            ));
        }

        let block = Block::default()
            .title(Line::from(title))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.green()))
            .style(Style::default().bg(theme.surface0()));

        let paragraph = Paragraph::new(format!("✓ {}", self.message))
            .style(Style::default().fg(theme.text()))
            .alignment(Alignment::Center)
            .block(block);

        frame.render_widget(paragraph, toast_area);
    }
}
