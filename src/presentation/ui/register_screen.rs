//! Registration form followed by phone code confirmation.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};
use tokio::sync::mpsc;

use super::intent::{AppAction, Intent};
use crate::application::dto::RegistrationForm;
use crate::application::dto::auth_dto::fields;
use crate::application::services::{CountdownTimer, RegistrationFlow, RegistrationStep};
use crate::domain::Route;
use crate::domain::entities::{PhoneNumber, RegistrationDraft};
use crate::domain::errors::ValidationErrors;
use crate::presentation::widgets::{Form, OtpInput, TextInput};

pub struct RegisterScreen {
    flow: RegistrationFlow,
    form: Form,
    timer: CountdownTimer,
    cooldown: u32,
    tx: mpsc::UnboundedSender<AppAction>,
    busy: bool,
    error_message: Option<String>,
}

impl RegisterScreen {
    #[must_use]
    pub fn new(cooldown: u32, tx: mpsc::UnboundedSender<AppAction>) -> Self {
        Self {
            flow: RegistrationFlow::new(cooldown),
            form: Form::new(vec![
                (fields::FIRST_NAME, TextInput::new("First name")),
                (fields::LAST_NAME, TextInput::new("Last name")),
                (
                    fields::PHONE,
                    TextInput::new("Phone number").placeholder(PhoneNumber::EXAMPLE),
                ),
                (fields::PASSWORD, TextInput::new("Password").password()),
                (
                    fields::CONFIRM_PASSWORD,
                    TextInput::new("Confirm password").password(),
                ),
            ]),
            timer: CountdownTimer::default(),
            cooldown,
            tx,
            busy: false,
            error_message: None,
        }
    }

    #[must_use]
    pub const fn flow(&self) -> &RegistrationFlow {
        &self.flow
    }

    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.busy
    }

    fn restart_timer(&mut self) {
        self.timer
            .restart(self.cooldown, self.tx.clone(), AppAction::OtpTick);
    }

    /// Backend accepted the form and texted a code.
    pub fn registered(&mut self, draft: RegistrationDraft) {
        self.busy = false;
        self.error_message = None;
        self.flow.submitted(draft);
        self.restart_timer();
    }

    pub fn resend_failed(&mut self, message: impl Into<String>) {
        self.busy = false;
        self.timer.cancel();
        self.flow.resend_failed();
        self.error_message = Some(message.into());
    }

    pub fn resent(&mut self) {
        self.busy = false;
    }

    pub fn verified(&mut self) {
        self.busy = false;
        self.timer.cancel();
        self.flow.verified();
    }

    pub fn tick(&mut self) {
        self.flow.countdown_mut().tick();
    }

    pub fn set_validation_errors(&mut self, errors: &ValidationErrors) {
        self.busy = false;
        match errors.get(fields::CODE) {
            Some(message) => self.error_message = Some(message.to_string()),
            None => self.form.apply_errors(errors),
        }
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.busy = false;
        self.error_message = Some(message.into());
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Intent {
        match self.flow.step() {
            RegistrationStep::Form => self.handle_form_key(key),
            RegistrationStep::OtpPending => self.handle_code_key(key),
            RegistrationStep::Verified => match key.code {
                KeyCode::Esc => Intent::Unhandled,
                _ => Intent::None,
            },
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Intent {
        if key.code == KeyCode::Esc {
            return Intent::Unhandled;
        }
        if self.busy {
            return Intent::None;
        }
        if key.code == KeyCode::Char('l') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Intent::Navigate(Route::Login);
        }
        if key.code == KeyCode::Enter {
            self.form.clear_errors();
            self.error_message = None;
            self.busy = true;
            return Intent::Register(RegistrationForm {
                first_name: self.form.value(fields::FIRST_NAME).to_string(),
                last_name: self.form.value(fields::LAST_NAME).to_string(),
                phone: self.form.value(fields::PHONE).to_string(),
                password: self.form.value(fields::PASSWORD).to_string(),
                confirm_password: self.form.value(fields::CONFIRM_PASSWORD).to_string(),
            });
        }
        self.form.handle_key(key);
        Intent::None
    }

    fn handle_code_key(&mut self, key: KeyEvent) -> Intent {
        if key.code == KeyCode::Esc {
            self.timer.cancel();
            self.flow.abandon();
            self.busy = false;
            self.error_message = None;
            return Intent::None;
        }
        if self.busy {
            return Intent::None;
        }

        match key.code {
            KeyCode::Char('r') => match self.flow.begin_resend() {
                Some(draft) => {
                    self.busy = true;
                    self.error_message = None;
                    self.restart_timer();
                    Intent::ResendOtp(draft)
                }
                None => Intent::Warn(format!(
                    "A new code can be requested in {}s",
                    self.flow.countdown().remaining()
                )),
            },
            KeyCode::Char(c) => {
                if self.flow.otp_mut().input(c) {
                    self.error_message = None;
                }
                Intent::None
            }
            KeyCode::Backspace => {
                self.flow.otp_mut().backspace();
                Intent::None
            }
            KeyCode::Left => {
                self.flow.otp_mut().focus_left();
                Intent::None
            }
            KeyCode::Right => {
                self.flow.otp_mut().focus_right();
                Intent::None
            }
            KeyCode::Enter => {
                let Some(draft) = self.flow.draft().cloned() else {
                    return Intent::None;
                };
                self.busy = true;
                Intent::VerifyOtp {
                    draft,
                    code: self.flow.otp().code(),
                }
            }
            _ => Intent::None,
        }
    }

    #[must_use]
    pub fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match self.flow.step() {
            RegistrationStep::Form => &[
                ("Tab", "Next field"),
                ("Enter", "Register"),
                ("Ctrl+L", "Sign in"),
                ("Esc", "Back"),
            ],
            RegistrationStep::OtpPending => &[
                ("0-9", "Code"),
                ("Enter", "Verify"),
                ("r", "Resend"),
                ("Esc", "Edit details"),
            ],
            RegistrationStep::Verified => &[("Esc", "Back")],
        }
    }

    fn render_form(&self, area: Rect, buf: &mut Buffer) {
        let [form_area, _, status_area] = Layout::vertical([
            Constraint::Length(self.form.height()),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);
        (&self.form).render(form_area, buf);
        self.status_line(
            if self.busy { Some("Sending...") } else { None },
            status_area,
            buf,
        );
    }

    fn render_code(&self, area: Rect, buf: &mut Buffer) {
        let [sent_area, _, slots_area, _, countdown_area, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let phone = self
            .flow
            .draft()
            .map_or("", |draft| draft.phone.as_str());
        Paragraph::new(format!("Enter the code sent to {phone}"))
            .centered()
            .render(sent_area, buf);

        OtpInput::new(self.flow.otp())
            .disabled(self.busy)
            .render(slots_area, buf);

        let countdown = self.flow.countdown();
        let countdown_line = if countdown.can_resend() {
            Line::styled("Press r to get a new code", Style::default().fg(Color::Green))
        } else {
            Line::styled(
                format!("New code available in {}s", countdown.remaining()),
                Style::default().fg(Color::DarkGray),
            )
        };
        Paragraph::new(countdown_line)
            .centered()
            .render(countdown_area, buf);

        self.status_line(
            if self.busy { Some("Checking...") } else { None },
            status_area,
            buf,
        );
    }

    fn status_line(&self, progress: Option<&str>, area: Rect, buf: &mut Buffer) {
        let line = match (progress, &self.error_message) {
            (Some(progress), _) => Line::styled(
                progress,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            ),
            (None, Some(message)) => {
                Line::styled(message.as_str(), Style::default().fg(Color::Red))
            }
            (None, None) => Line::default(),
        };
        Paragraph::new(line).centered().render(area, buf);
    }
}

impl Widget for &RegisterScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let body_height = match self.flow.step() {
            RegistrationStep::Form => self.form.height() + 2,
            RegistrationStep::OtpPending | RegistrationStep::Verified => 8,
        };
        let [_, center, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(body_height + 2),
            Constraint::Fill(1),
        ])
        .areas(area);
        let [_, content_area, _] = Layout::horizontal([
            Constraint::Fill(1),
            Constraint::Min(50),
            Constraint::Fill(1),
        ])
        .areas(center);

        Clear.render(content_area, buf);
        let title = match self.flow.step() {
            RegistrationStep::Form => " Create account ",
            RegistrationStep::OtpPending | RegistrationStep::Verified => " Confirm phone ",
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(title);
        let inner = block.inner(content_area);
        block.render(content_area, buf);

        match self.flow.step() {
            RegistrationStep::Form => self.render_form(inner, buf),
            RegistrationStep::OtpPending => self.render_code(inner, buf),
            RegistrationStep::Verified => {
                Paragraph::new(Line::styled(
                    "Phone confirmed. Redirecting...",
                    Style::default().fg(Color::Green),
                ))
                .centered()
                .render(inner, buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn screen() -> (RegisterScreen, mpsc::UnboundedReceiver<AppAction>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (RegisterScreen::new(60, tx), rx)
    }

    fn type_text(screen: &mut RegisterScreen, text: &str) {
        for c in text.chars() {
            screen.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn draft() -> RegistrationDraft {
        RegistrationDraft::new(
            PhoneNumber::parse("+998901234567").unwrap(),
            "secret1",
            "Ali",
            "Valiyev",
        )
    }

    #[test]
    fn test_submit_collects_every_field() {
        let (mut screen, _rx) = screen();
        for value in ["Ali", "Valiyev", "+998901234567", "secret1", "secret1"] {
            type_text(&mut screen, value);
            screen.handle_key(key(KeyCode::Tab));
        }

        let Intent::Register(form) = screen.handle_key(key(KeyCode::Enter)) else {
            panic!("expected register intent");
        };
        assert_eq!(form.first_name, "Ali");
        assert_eq!(form.last_name, "Valiyev");
        assert_eq!(form.phone, "+998901234567");
        assert_eq!(form.password, "secret1");
        assert_eq!(form.confirm_password, "secret1");
        assert!(screen.is_busy());
    }

    #[tokio::test]
    async fn test_code_entry_then_verify() {
        let (mut screen, _rx) = screen();
        screen.registered(draft());
        assert_eq!(screen.flow().step(), RegistrationStep::OtpPending);

        type_text(&mut screen, "1a234");
        assert_eq!(screen.flow().otp().focus(), 3);

        let Intent::VerifyOtp { draft, code } = screen.handle_key(key(KeyCode::Enter)) else {
            panic!("expected verify intent");
        };
        assert_eq!(draft.phone.as_str(), "+998901234567");
        assert_eq!(code.as_deref(), Some("1234"));
    }

    #[tokio::test]
    async fn test_resend_refused_during_cooldown() {
        let (mut screen, _rx) = screen();
        screen.registered(draft());

        assert!(matches!(
            screen.handle_key(key(KeyCode::Char('r'))),
            Intent::Warn(_)
        ));
    }

    #[tokio::test]
    async fn test_resend_after_cooldown_clears_code() {
        let (mut screen, _rx) = screen();
        screen.registered(draft());
        type_text(&mut screen, "12");
        for _ in 0..60 {
            screen.tick();
        }

        assert!(matches!(
            screen.handle_key(key(KeyCode::Char('r'))),
            Intent::ResendOtp(_)
        ));
        assert!(screen.flow().otp().slots().iter().all(Option::is_none));
        assert!(!screen.flow().countdown().can_resend());
        assert_eq!(screen.flow().countdown().remaining(), 60);
    }

    #[tokio::test]
    async fn test_escape_returns_to_form() {
        let (mut screen, _rx) = screen();
        screen.registered(draft());

        assert!(matches!(screen.handle_key(key(KeyCode::Esc)), Intent::None));
        assert_eq!(screen.flow().step(), RegistrationStep::Form);
        assert!(matches!(
            screen.handle_key(key(KeyCode::Esc)),
            Intent::Unhandled
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_ticks_reach_event_loop() {
        let (mut screen, mut rx) = screen();
        screen.registered(draft());

        tokio::time::advance(std::time::Duration::from_millis(1001)).await;
        match rx.recv().await {
            Some(AppAction::OtpTick(remaining)) => assert_eq!(remaining, 59),
            other => panic!("unexpected action: {other:?}"),
        }
    }
}
