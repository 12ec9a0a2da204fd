use std::sync::Arc;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{info, warn};

use super::{FormDelegate, FormOutcome};
use crate::Theme;
use crate::api::{ApiError, FlavorApi};
use crate::config::{FormAction, KeyResolver};
use crate::model::{FlavorDraft, Site};
use crate::ui::{Component, EventResult, Result, TextField};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Name,
    Description,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Status {
    Idle,
    Submitting,
    Invalid(String),
    Failed(String),
}

/// Form proposing a new flavor for a site.
///
/// Submissions run on a background task; their results come back over a
/// channel that [`FormDelegate::poll`] drains.
pub struct FlavorSubmitForm {
    site: Site,
    api: Arc<dyn FlavorApi>,
    resolver: Arc<KeyResolver>,
    name: TextField,
    description: TextField,
    focus: Field,
    status: Status,
    result_tx: UnboundedSender<std::result::Result<(), ApiError>>,
    result_rx: UnboundedReceiver<std::result::Result<(), ApiError>>,
}

impl FlavorSubmitForm {
    pub fn new(site: Site, api: Arc<dyn FlavorApi>, resolver: Arc<KeyResolver>) -> Self {
        let (result_tx, result_rx) = mpsc::unbounded_channel();
        let mut form = Self {
            site,
            api,
            resolver,
            name: TextField::new("Name").with_placeholder("e.g. m1.large"),
            description: TextField::new("Description").with_placeholder("optional"),
            focus: Field::Name,
            status: Status::Idle,
            result_tx,
            result_rx,
        };
        form.focus(Field::Name);
        form
    }

    fn focus(&mut self, field: Field) {
        self.focus = field;
        self.name.set_focused(field == Field::Name);
        self.description.set_focused(field == Field::Description);
    }

    fn toggle_focus(&mut self) {
        match self.focus {
            Field::Name => self.focus(Field::Description),
            Field::Description => self.focus(Field::Name),
        }
    }

    fn focused_field(&mut self) -> &mut TextField {
        match self.focus {
            Field::Name => &mut self.name,
            Field::Description => &mut self.description,
        }
    }

    fn clear_fields(&mut self) {
        self.name.clear();
        self.description.clear();
        self.focus(Field::Name);
    }

    fn submit(&mut self) {
        if self.status == Status::Submitting {
            return;
        }

        let Some(draft) = FlavorDraft::from_input(self.name.value(), self.description.value())
        else {
            self.status = Status::Invalid("Name is required".to_string());
            self.focus(Field::Name);
            return;
        };

        info!(site_id = %self.site.id, flavor = %draft.name, "Submitting flavor");
        self.status = Status::Submitting;

        let api = Arc::clone(&self.api);
        let site_id = self.site.id.clone();
        let result_tx = self.result_tx.clone();
        tokio::spawn(async move {
            let result = api.submit_flavor(&site_id, &draft).await;
            // The form may be gone by now; nothing to report to.
            let _ = result_tx.send(result);
        });
    }

    fn status_line(&self, theme: &Theme) -> Line<'static> {
        match &self.status {
            Status::Idle => Line::from(""),
            Status::Submitting => Line::from(Span::styled(
                "Submitting...",
                Style::default().fg(theme.yellow()),
            )),
            Status::Invalid(message) | Status::Failed(message) => Line::from(Span::styled(
                message.clone(),
                Style::default()
                    .fg(theme.red())
                    .add_modifier(Modifier::BOLD),
            )),
        }
    }

    fn hint_line(&self, theme: &Theme) -> Line<'static> {
        let key_style = Style::default()
            .fg(theme.peach())
            .add_modifier(Modifier::BOLD);
        let desc_style = Style::default().fg(theme.overlay1());
        Line::from(vec![
            Span::styled(self.resolver.display_form(FormAction::Submit), key_style),
            Span::styled(" submit  ", desc_style),
            Span::styled(self.resolver.display_form(FormAction::NextField), key_style),
            Span::styled(" next field", desc_style),
        ])
    }

    #[cfg(test)]
    async fn wait_outcome(&mut self) -> FormOutcome {
        for _ in 0..100 {
            if let Some(outcome) = self.poll() {
                return outcome;
            }
            tokio::task::yield_now().await;
        }
        panic!("submission did not complete");
    }
}

impl Component for FlavorSubmitForm {
    type Output = FormOutcome;

    fn handle_key(&mut self, key: KeyEvent) -> Result<EventResult<Self::Output>> {
        if self.resolver.matches_form(&key, FormAction::Submit) {
            self.submit();
            return Ok(EventResult::Consumed);
        }
        if self.resolver.matches_form(&key, FormAction::NextField)
            || self.resolver.matches_form(&key, FormAction::PrevField)
        {
            self.toggle_focus();
            return Ok(EventResult::Consumed);
        }

        let result = self.focused_field().handle_key(key)?;
        if result.is_consumed() && matches!(self.status, Status::Invalid(_)) {
            self.status = Status::Idle;
        }
        Ok(match result {
            EventResult::Ignored => EventResult::Ignored,
            EventResult::Consumed | EventResult::Event(()) => EventResult::Consumed,
        })
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let [intro, name, description, status, hints] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let intro_line = Line::from(vec![
            Span::styled("Propose a flavor for ", Style::default().fg(theme.subtext0())),
            Span::styled(
                self.site.name.clone(),
                Style::default()
                    .fg(theme.text())
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        frame.render_widget(Paragraph::new(intro_line), intro);

        self.name.render(frame, name, theme);
        self.description.render(frame, description, theme);
        frame.render_widget(Paragraph::new(self.status_line(theme)), status);
        frame.render_widget(Paragraph::new(self.hint_line(theme)), hints);
    }
}

impl FormDelegate for FlavorSubmitForm {
    fn site(&self) -> &Site {
        &self.site
    }

    fn poll(&mut self) -> Option<FormOutcome> {
        let result = self.result_rx.try_recv().ok()?;
        Some(match result {
            Ok(()) => {
                info!(site_id = %self.site.id, "Flavor submission accepted");
                self.status = Status::Idle;
                self.clear_fields();
                FormOutcome::Accepted
            }
            Err(error) => {
                warn!(site_id = %self.site.id, %error, "Flavor submission failed");
                let message = error.to_string();
                self.status = Status::Failed(message.clone());
                FormOutcome::Failed(message)
            }
        })
    }

    fn reset(&mut self) {
        self.clear_fields();
        if self.status != Status::Submitting {
            self.status = Status::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;
    use crate::ui::testing::{content, draw};

    #[derive(Default)]
    struct FakeApi {
        fail_with: Option<(u16, &'static str)>,
        submissions: Mutex<Vec<(String, FlavorDraft)>>,
    }

    #[async_trait]
    impl FlavorApi for FakeApi {
        async fn fetch_site(&self, site_id: &str) -> std::result::Result<Site, ApiError> {
            Err(ApiError::NotFound(site_id.to_string()))
        }

        async fn submit_flavor(
            &self,
            site_id: &str,
            draft: &FlavorDraft,
        ) -> std::result::Result<(), ApiError> {
            self.submissions
                .lock()
                .unwrap()
                .push((site_id.to_string(), draft.clone()));
            match self.fail_with {
                Some((code, body)) => Err(ApiError::from_status(code, body)),
                None => Ok(()),
            }
        }
    }

    fn site() -> Site {
        Site {
            id: "s1".to_string(),
            name: "CESNET".to_string(),
            address: "cloud.cesnet.cz".to_string(),
            description: None,
        }
    }

    fn form(api: &Arc<FakeApi>) -> FlavorSubmitForm {
        FlavorSubmitForm::new(
            site(),
            Arc::clone(api) as Arc<dyn FlavorApi>,
            Arc::new(KeyResolver::default()),
        )
    }

    fn press(form: &mut FlavorSubmitForm, code: KeyCode) -> EventResult<FormOutcome> {
        form.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    fn type_str(form: &mut FlavorSubmitForm, text: &str) {
        for c in text.chars() {
            press(form, KeyCode::Char(c));
        }
    }

    fn render(form: &mut FlavorSubmitForm) -> String {
        let buffer = draw(60, 10, |frame| {
            form.render(frame, frame.area(), &Theme::default());
        });
        content(&buffer)
    }

    #[tokio::test]
    async fn test_blank_name_is_not_submitted() {
        let api = Arc::new(FakeApi::default());
        let mut form = form(&api);

        press(&mut form, KeyCode::Enter);
        tokio::task::yield_now().await;

        assert_eq!(form.poll(), None);
        assert!(api.submissions.lock().unwrap().is_empty());
        assert!(render(&mut form).contains("Name is required"));

        // Typing clears the validation message.
        type_str(&mut form, "m");
        assert!(!render(&mut form).contains("Name is required"));
    }

    #[tokio::test]
    async fn test_successful_submission() {
        let api = Arc::new(FakeApi::default());
        let mut form = form(&api);

        type_str(&mut form, "m1.large");
        press(&mut form, KeyCode::Tab);
        type_str(&mut form, "4 vCPU");
        press(&mut form, KeyCode::Enter);
        assert!(render(&mut form).contains("Submitting..."));

        assert_eq!(form.wait_outcome().await, FormOutcome::Accepted);
        assert_eq!(
            *api.submissions.lock().unwrap(),
            vec![(
                "s1".to_string(),
                FlavorDraft {
                    name: "m1.large".to_string(),
                    description: Some("4 vCPU".to_string()),
                }
            )]
        );
        assert_eq!(form.name.value(), "");
        assert_eq!(form.description.value(), "");
        assert_eq!(form.focus, Field::Name);
    }

    #[tokio::test]
    async fn test_failed_submission_shows_error() {
        let api = Arc::new(FakeApi {
            fail_with: Some((409, r#"{"message": "Flavor already exists"}"#)),
            ..FakeApi::default()
        });
        let mut form = form(&api);

        type_str(&mut form, "m1.large");
        press(&mut form, KeyCode::Enter);

        let outcome = form.wait_outcome().await;
        assert_eq!(
            outcome,
            FormOutcome::Failed("Already exists: Flavor already exists".to_string())
        );
        assert!(render(&mut form).contains("Already exists: Flavor already exists"));
        // Input is kept so the user can correct it.
        assert_eq!(form.name.value(), "m1.large");
    }

    #[tokio::test]
    async fn test_no_double_submission_while_pending() {
        let api = Arc::new(FakeApi::default());
        let mut form = form(&api);

        type_str(&mut form, "m1.large");
        press(&mut form, KeyCode::Enter);
        press(&mut form, KeyCode::Enter);

        assert_eq!(form.wait_outcome().await, FormOutcome::Accepted);
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert_eq!(form.poll(), None);
        assert_eq!(api.submissions.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_focus_cycles_between_fields() {
        let api = Arc::new(FakeApi::default());
        let mut form = form(&api);

        press(&mut form, KeyCode::Tab);
        type_str(&mut form, "desc");
        form.handle_key(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT))
            .unwrap();
        type_str(&mut form, "name");

        assert_eq!(form.name.value(), "name");
        assert_eq!(form.description.value(), "desc");
    }

    #[tokio::test]
    async fn test_reset_clears_input_and_errors() {
        let api = Arc::new(FakeApi::default());
        let mut form = form(&api);

        type_str(&mut form, "  ");
        press(&mut form, KeyCode::Enter);
        assert!(matches!(form.status, Status::Invalid(_)));

        form.reset();
        assert_eq!(form.status, Status::Idle);
        assert_eq!(form.name.value(), "");
    }

    #[tokio::test]
    async fn test_renders_site_name() {
        let api = Arc::new(FakeApi::default());
        let mut form = form(&api);
        let text = render(&mut form);
        assert!(text.contains("Propose a flavor for CESNET"));
        assert!(text.contains("Enter submit"));
    }
}
