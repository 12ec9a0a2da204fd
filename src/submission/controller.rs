use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Clear};
use tracing::debug;

use super::{FormDelegate, FormOutcome};
use crate::Theme;
use crate::config::{DialogAction, KeyResolver, ToastAction};
use crate::model::Site;
use crate::ui::{EventResult, Result, SuccessToast};

/// How long the success toast stays up unless dismissed.
pub const SUCCESS_TOAST_DELAY: Duration = Duration::from_millis(5000);

const MODAL_TITLE: &str = " Add Flavor ";
const MODAL_HEIGHT: u16 = 14;
const TOAST_TITLE: &str = "eosc-perf";
const TOAST_MESSAGE: &str = "Submission successful.";

/// Requests the modal sends to whoever owns its visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalRequest {
    /// The modal should be closed. The owner decides whether to comply.
    Hide,
}

/// Modal dialog hosting a flavor form, plus the toast shown after a
/// successful submission.
///
/// The modal is controlled: whether it is open is owned by the caller and
/// passed into every call that depends on it. The modal never closes
/// itself; it returns [`ModalRequest::Hide`] and leaves the decision to the
/// caller. The toast is independent of the modal and may outlive it.
pub struct FlavorSubmissionModal<F> {
    form: F,
    toast: SuccessToast,
    resolver: Arc<KeyResolver>,
    was_visible: bool,
}

impl<F: FormDelegate> FlavorSubmissionModal<F> {
    /// Create the modal. `bind` builds the hosted form for `site`.
    pub fn new(site: Site, resolver: Arc<KeyResolver>, bind: impl FnOnce(Site) -> F) -> Self {
        let toast = SuccessToast::new(TOAST_TITLE, TOAST_MESSAGE, SUCCESS_TOAST_DELAY)
            .with_dismiss_hint(resolver.display_toast(ToastAction::Dismiss));
        Self {
            form: bind(site),
            toast,
            resolver,
            was_visible: false,
        }
    }

    /// The site the hosted form was bound to.
    pub fn site(&self) -> &Site {
        self.form.site()
    }

    pub const fn is_toast_visible(&self) -> bool {
        self.toast.is_visible()
    }

    pub const fn dismiss_toast(&mut self) {
        self.toast.dismiss();
    }

    /// Handle a key event.
    ///
    /// While `visible`, every key is captured: the close key yields
    /// `Hide`, everything else goes to the form. While hidden, only the toast
    /// dismiss key is handled.
    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        visible: bool,
        now: Instant,
    ) -> Result<EventResult<ModalRequest>> {
        self.sync_visibility(visible);

        if visible {
            if self.resolver.matches_dialog(&key, DialogAction::Close) {
                return Ok(ModalRequest::Hide.into());
            }
            return Ok(match self.form.handle_key(key)? {
                EventResult::Event(outcome) => self
                    .on_outcome(outcome, now)
                    .map_or(EventResult::Consumed, EventResult::Event),
                EventResult::Consumed | EventResult::Ignored => EventResult::Consumed,
            });
        }

        if self.toast.is_visible() && self.resolver.matches_toast(&key, ToastAction::Dismiss) {
            debug!("Success toast dismissed");
            self.dismiss_toast();
            return Ok(EventResult::Consumed);
        }
        Ok(EventResult::Ignored)
    }

    /// Collect finished submissions and advance the toast countdown.
    pub fn handle_tick(&mut self, now: Instant) -> Option<ModalRequest> {
        let request = self
            .form
            .poll()
            .and_then(|outcome| self.on_outcome(outcome, now));
        if self.toast.handle_tick(now) {
            debug!("Success toast expired");
        }
        request
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme, visible: bool) {
        self.sync_visibility(visible);
        if visible {
            self.render_modal(frame, area, theme);
        }
        self.toast.render(frame, area, theme);
    }

    fn on_outcome(&mut self, outcome: FormOutcome, now: Instant) -> Option<ModalRequest> {
        match outcome {
            FormOutcome::Accepted => {
                self.toast.show(now);
                Some(ModalRequest::Hide)
            }
            // The form presents its own errors.
            FormOutcome::Failed(_) => None,
        }
    }

    /// Remount the form body when the modal opens again.
    fn sync_visibility(&mut self, visible: bool) {
        if visible && !self.was_visible {
            self.form.reset();
        }
        self.was_visible = visible;
    }

    fn render_modal(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let popup_area = area.centered(Constraint::Percentage(60), Constraint::Length(MODAL_HEIGHT));

        frame.render_widget(Clear, popup_area);

        let close_hint = format!(
            " [{}] close ",
            self.resolver.display_dialog(DialogAction::Close)
        );
        let block = Block::default()
            .title(Line::from(MODAL_TITLE))
            .title(Line::from(close_hint).right_aligned())
            .title_style(
                Style::default()
                    .fg(theme.mauve())
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.lavender()))
            .style(Style::default().bg(theme.base()));

        let inner = block.inner(popup_area);
        frame.render_widget(block, popup_area);

        self.form.render(frame, inner, theme);
    }
}
