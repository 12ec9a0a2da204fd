use std::sync::Arc;
use std::time::Instant;

use color_eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
use tracing::{debug, info, warn};

use crate::Theme;
use crate::api::FlavorApi;
use crate::config::{AppConfig, GlobalAction, KeyResolver};
use crate::model::Site;
use crate::submission::{FlavorSubmissionModal, FlavorSubmitForm, ModalRequest};
use crate::theme::theme_from_name;
use crate::tui::{Event, Tui};
use crate::ui::{EventResult, SitePanel};

const FRAME_RATE: f64 = 30.0;
const TICK_RATE: f64 = 10.0;

/// Top-level state: the site screen and the submission dialog on top of it.
///
/// The app owns whether the dialog is open. The dialog only asks to be
/// closed, and the app is the one that flips `submission_visible`.
pub struct App {
    theme: Theme,
    resolver: Arc<KeyResolver>,
    site_panel: SitePanel,
    submission: FlavorSubmissionModal<FlavorSubmitForm>,
    submission_visible: bool,
    should_quit: bool,
}

impl App {
    pub fn new(site: Site, api: Arc<dyn FlavorApi>, config: &AppConfig) -> Self {
        let resolver = Arc::new(KeyResolver::new(Arc::new(config.keybindings.clone())));
        let site_panel = SitePanel::new(site.clone(), Arc::clone(&resolver));
        let form_resolver = Arc::clone(&resolver);
        let submission = FlavorSubmissionModal::new(site, Arc::clone(&resolver), move |site| {
            FlavorSubmitForm::new(site, api, form_resolver)
        });

        Self {
            theme: theme_from_name(&config.theme.name),
            resolver,
            site_panel,
            submission,
            submission_visible: false,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new(FRAME_RATE, TICK_RATE)?;
        tui.enter()?;

        while !self.should_quit {
            let Some(event) = tui.next_event().await else {
                break;
            };
            match event {
                Event::Render => self.render(&mut tui)?,
                Event::Resize(width, height) => {
                    tui.resize(Rect::new(0, 0, width, height))?;
                    self.render(&mut tui)?;
                }
                event => self.handle_event(event, Instant::now())?,
            }
        }

        tui.exit()?;
        Ok(())
    }

    pub fn handle_event(&mut self, event: Event, now: Instant) -> Result<()> {
        match event {
            Event::Quit => self.should_quit = true,
            Event::Error(error) => warn!("Terminal event error: {error}"),
            Event::Tick => {
                if let Some(request) = self.submission.handle_tick(now) {
                    self.on_modal_request(request);
                }
            }
            Event::Key(key) => self.handle_key(key, now)?,
            Event::Render | Event::Resize(..) => {}
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Result<()> {
        match self
            .submission
            .handle_key(key, self.submission_visible, now)?
        {
            EventResult::Event(request) => self.on_modal_request(request),
            EventResult::Consumed => {}
            EventResult::Ignored => {
                if self.resolver.matches_global(&key, GlobalAction::Quit) {
                    self.should_quit = true;
                } else if self
                    .resolver
                    .matches_global(&key, GlobalAction::OpenSubmission)
                {
                    info!(site_id = %self.submission.site().id, "Opening flavor submission dialog");
                    self.submission_visible = true;
                }
            }
        }
        Ok(())
    }

    fn on_modal_request(&mut self, request: ModalRequest) {
        match request {
            ModalRequest::Hide => {
                debug!("Closing flavor submission dialog");
                self.submission_visible = false;
            }
        }
    }

    fn render(&mut self, tui: &mut Tui) -> Result<()> {
        tui.draw(|frame| self.draw(frame))?;
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.site_panel.render(frame, area, &self.theme);
        self.submission
            .render(frame, area, &self.theme, self.submission_visible);
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use crossterm::event::{KeyCode, KeyModifiers};

    use super::*;
    use crate::api::ApiError;
    use crate::model::FlavorDraft;
    use crate::submission::SUCCESS_TOAST_DELAY;
    use crate::ui::testing::{content, draw};

    struct AcceptingApi;

    #[async_trait]
    impl FlavorApi for AcceptingApi {
        async fn fetch_site(&self, site_id: &str) -> std::result::Result<Site, ApiError> {
            Err(ApiError::NotFound(site_id.to_string()))
        }

        async fn submit_flavor(
            &self,
            _site_id: &str,
            _draft: &FlavorDraft,
        ) -> std::result::Result<(), ApiError> {
            Ok(())
        }
    }

    fn app() -> App {
        let site = Site {
            id: "s1".to_string(),
            name: "CESNET".to_string(),
            address: "cloud.cesnet.cz".to_string(),
            description: None,
        };
        App::new(site, Arc::new(AcceptingApi), &AppConfig::default())
    }

    fn press(app: &mut App, code: KeyCode, now: Instant) {
        app.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)), now)
            .unwrap();
    }

    fn screen(app: &mut App) -> String {
        content(&draw(80, 24, |frame| app.draw(frame)))
    }

    #[test]
    fn test_open_and_close_dialog() {
        let mut app = app();
        let now = Instant::now();
        assert!(!screen(&mut app).contains("Add Flavor"));

        press(&mut app, KeyCode::Char('a'), now);
        assert!(app.submission_visible);
        assert!(screen(&mut app).contains("Add Flavor"));

        press(&mut app, KeyCode::Esc, now);
        assert!(!app.submission_visible);
        assert!(!screen(&mut app).contains("Add Flavor"));
    }

    #[test]
    fn test_quit_key_is_typed_into_open_dialog() {
        let mut app = app();
        let now = Instant::now();

        press(&mut app, KeyCode::Char('a'), now);
        press(&mut app, KeyCode::Char('q'), now);
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Esc, now);
        press(&mut app, KeyCode::Char('q'), now);
        assert!(app.should_quit);
    }

    #[test]
    fn test_quit_event_always_quits() {
        let mut app = app();
        let now = Instant::now();
        press(&mut app, KeyCode::Char('a'), now);
        app.handle_event(Event::Quit, now).unwrap();
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_submission_closes_dialog_and_toast_expires() {
        let mut app = app();
        let start = Instant::now();

        press(&mut app, KeyCode::Char('a'), start);
        for c in "m1.large".chars() {
            press(&mut app, KeyCode::Char(c), start);
        }
        press(&mut app, KeyCode::Enter, start);

        for _ in 0..100 {
            if !app.submission_visible {
                break;
            }
            tokio::task::yield_now().await;
            app.handle_event(Event::Tick, start).unwrap();
        }
        assert!(!app.submission_visible);
        assert!(app.submission.is_toast_visible());
        assert!(screen(&mut app).contains("Submission successful."));

        app.handle_event(Event::Tick, start + SUCCESS_TOAST_DELAY)
            .unwrap();
        assert!(!app.submission.is_toast_visible());
    }
}
