//! Role-specific dashboard.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use super::intent::Intent;
use crate::domain::entities::{Dashboard, Role, humanize};

pub struct DashboardScreen {
    role: Role,
    dashboard: Option<Dashboard>,
    scroll: u16,
    loading: bool,
}

impl DashboardScreen {
    #[must_use]
    pub const fn new(role: Role) -> Self {
        Self {
            role,
            dashboard: None,
            scroll: 0,
            loading: true,
        }
    }

    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    pub fn set_dashboard(&mut self, dashboard: Dashboard) {
        self.loading = false;
        self.dashboard = Some(dashboard);
    }

    pub const fn failed(&mut self) {
        self.loading = false;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Intent {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.scroll = self.scroll.saturating_add(1);
                Intent::None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                Intent::None
            }
            KeyCode::Char('r') => {
                self.loading = true;
                Intent::Refresh
            }
            _ => Intent::Unhandled,
        }
    }

    #[must_use]
    pub const fn hints() -> &'static [(&'static str, &'static str)] {
        &[("j/k", "Scroll"), ("r", "Reload")]
    }

    fn lines(dashboard: &Dashboard) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for section in dashboard.section_names() {
            lines.push(Line::styled(
                humanize(section),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ));
            for (metric, value) in dashboard.rows(section) {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {metric}: "), Style::default().fg(Color::DarkGray)),
                    Span::raw(value),
                ]));
            }
            lines.push(Line::default());
        }
        lines
    }
}

impl Widget for &DashboardScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Dashboard ({}) ", self.role.as_str()));

        let paragraph = match &self.dashboard {
            Some(dashboard) if !dashboard.sections.is_empty() => {
                Paragraph::new(DashboardScreen::lines(dashboard))
            }
            _ if self.loading => {
                Paragraph::new("Loading...").style(Style::default().fg(Color::DarkGray))
            }
            _ => Paragraph::new("Nothing to show").style(Style::default().fg(Color::DarkGray)),
        };
        paragraph
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0))
            .render(area, buf);
    }
}
