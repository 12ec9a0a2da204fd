use std::sync::Arc;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

use crate::Theme;
use crate::config::{GlobalAction, KeyResolver, ToastAction};
use crate::model::Site;

/// Background screen: the site the user is proposing flavors for, plus a
/// one-line hint bar.
pub struct SitePanel {
    site: Site,
    resolver: Arc<KeyResolver>,
}

impl SitePanel {
    pub const fn new(site: Site, resolver: Arc<KeyResolver>) -> Self {
        Self { site, resolver }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let [body, hints] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);

        let label = Style::default()
            .fg(theme.subtext0())
            .add_modifier(Modifier::BOLD);
        let value = Style::default().fg(theme.text());

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Name     ", label),
                Span::styled(self.site.name.clone(), value),
            ]),
            Line::from(vec![
                Span::styled("Address  ", label),
                Span::styled(self.site.address.clone(), value),
            ]),
            Line::from(vec![
                Span::styled("Id       ", label),
                Span::styled(self.site.id.clone(), Style::default().fg(theme.overlay1())),
            ]),
        ];
        if let Some(description) = &self.site.description {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(description.clone(), value)));
        }

        let block = Block::default()
            .title(" Site ")
            .title_style(
                Style::default()
                    .fg(theme.mauve())
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme.border()));

        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
            body,
        );

        let key_style = Style::default()
            .fg(theme.peach())
            .add_modifier(Modifier::BOLD);
        let desc_style = Style::default().fg(theme.overlay1());
        let hint_line = Line::from(vec![
            Span::styled(
                self.resolver.display_global(GlobalAction::OpenSubmission),
                key_style,
            ),
            Span::styled(" add flavor  ", desc_style),
            Span::styled(
                self.resolver.display_toast(ToastAction::Dismiss),
                key_style,
            ),
            Span::styled(" dismiss  ", desc_style),
            Span::styled(self.resolver.display_global(GlobalAction::Quit), key_style),
            Span::styled(" quit", desc_style),
        ]);
        frame.render_widget(Paragraph::new(hint_line), hints);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::testing::{content, draw, row};

    #[test]
    fn test_renders_site_and_hints() {
        let site = Site {
            id: "s1".to_string(),
            name: "CESNET".to_string(),
            address: "cloud.cesnet.cz".to_string(),
            description: Some("Czech e-infrastructure".to_string()),
        };
        let panel = SitePanel::new(site, Arc::new(KeyResolver::default()));

        let buffer = draw(60, 12, |frame| {
            panel.render(frame, frame.area(), &Theme::default());
        });

        let text = content(&buffer);
        assert!(text.contains("CESNET"));
        assert!(text.contains("cloud.cesnet.cz"));
        assert!(text.contains("Czech e-infrastructure"));
        assert!(row(&buffer, 11).starts_with("a/n add flavor  x dismiss  q quit"));
    }
}
