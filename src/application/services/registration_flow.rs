//! Registration and OTP verification state machine.

use tracing::debug;

use crate::domain::entities::RegistrationDraft;

pub const OTP_LENGTH: usize = 4;
pub const DEFAULT_RESEND_COOLDOWN_SECS: u32 = 60;

/// Four single-digit slots with a focus cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OtpEntry {
    slots: [Option<char>; OTP_LENGTH],
    focus: usize,
}

impl OtpEntry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn slots(&self) -> &[Option<char>; OTP_LENGTH] {
        &self.slots
    }

    #[must_use]
    pub const fn focus(&self) -> usize {
        self.focus
    }

    /// Stores a digit in the focused slot and advances focus.
    ///
    /// Returns `false` and leaves every slot untouched for non-digits.
    pub fn input(&mut self, c: char) -> bool {
        if !c.is_ascii_digit() {
            return false;
        }
        self.slots[self.focus] = Some(c);
        if self.focus < OTP_LENGTH - 1 {
            self.focus += 1;
        }
        true
    }

    /// Clears the focused slot, or steps back when it is already empty.
    pub fn backspace(&mut self) {
        if self.slots[self.focus].is_some() {
            self.slots[self.focus] = None;
        } else if self.focus > 0 {
            self.focus -= 1;
        }
    }

    pub fn focus_left(&mut self) {
        self.focus = self.focus.saturating_sub(1);
    }

    pub fn focus_right(&mut self) {
        self.focus = (self.focus + 1).min(OTP_LENGTH - 1);
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// The entered code, only once every slot is filled.
    #[must_use]
    pub fn code(&self) -> Option<String> {
        self.slots.iter().copied().collect()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Seconds left before a new code may be requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResendCountdown {
    remaining: u32,
    cooldown: u32,
    can_resend: bool,
}

impl Default for ResendCountdown {
    fn default() -> Self {
        Self::new(DEFAULT_RESEND_COOLDOWN_SECS)
    }
}

impl ResendCountdown {
    #[must_use]
    pub const fn new(cooldown: u32) -> Self {
        Self {
            remaining: cooldown,
            cooldown,
            can_resend: cooldown == 0,
        }
    }

    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    #[must_use]
    pub const fn can_resend(&self) -> bool {
        self.can_resend
    }

    /// Applies one elapsed second; returns `true` once the countdown is over.
    pub fn tick(&mut self) -> bool {
        if self.remaining > 0 {
            self.remaining -= 1;
        }
        if self.remaining == 0 {
            self.can_resend = true;
        }
        self.can_resend
    }

    pub fn reset(&mut self) {
        self.remaining = self.cooldown;
        self.can_resend = self.cooldown == 0;
    }

    /// Re-enables resend immediately after a failed resend request.
    pub fn allow_resend(&mut self) {
        self.can_resend = true;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationStep {
    Form,
    OtpPending,
    Verified,
}

/// Holds the draft, code entry and countdown for one registration attempt.
#[derive(Debug)]
pub struct RegistrationFlow {
    step: RegistrationStep,
    draft: Option<RegistrationDraft>,
    otp: OtpEntry,
    countdown: ResendCountdown,
    cooldown: u32,
}

impl Default for RegistrationFlow {
    fn default() -> Self {
        Self::new(DEFAULT_RESEND_COOLDOWN_SECS)
    }
}

impl RegistrationFlow {
    #[must_use]
    pub fn new(cooldown: u32) -> Self {
        Self {
            step: RegistrationStep::Form,
            draft: None,
            otp: OtpEntry::new(),
            countdown: ResendCountdown::new(cooldown),
            cooldown,
        }
    }

    #[must_use]
    pub const fn step(&self) -> RegistrationStep {
        self.step
    }

    #[must_use]
    pub const fn draft(&self) -> Option<&RegistrationDraft> {
        self.draft.as_ref()
    }

    #[must_use]
    pub const fn otp(&self) -> &OtpEntry {
        &self.otp
    }

    pub fn otp_mut(&mut self) -> &mut OtpEntry {
        &mut self.otp
    }

    #[must_use]
    pub const fn countdown(&self) -> &ResendCountdown {
        &self.countdown
    }

    pub fn countdown_mut(&mut self) -> &mut ResendCountdown {
        &mut self.countdown
    }

    /// Backend accepted the registration: keep the draft and start code entry.
    pub fn submitted(&mut self, draft: RegistrationDraft) {
        debug!(phone = %draft.phone, "Registration accepted, awaiting code");
        self.draft = Some(draft);
        self.otp.clear();
        self.countdown = ResendCountdown::new(self.cooldown);
        self.step = RegistrationStep::OtpPending;
    }

    /// Starts a resend if allowed, returning the draft to send again.
    pub fn begin_resend(&mut self) -> Option<RegistrationDraft> {
        if self.step != RegistrationStep::OtpPending || !self.countdown.can_resend() {
            return None;
        }
        let draft = self.draft.clone()?;
        self.otp.clear();
        self.countdown.reset();
        Some(draft)
    }

    pub fn resend_failed(&mut self) {
        self.countdown.allow_resend();
    }

    pub fn verified(&mut self) {
        self.draft = None;
        self.step = RegistrationStep::Verified;
    }

    /// Discards the draft and returns to the form.
    pub fn abandon(&mut self) {
        debug!("Registration abandoned");
        self.draft = None;
        self.otp.clear();
        self.countdown = ResendCountdown::new(self.cooldown);
        self.step = RegistrationStep::Form;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::PhoneNumber;
    use test_case::test_case;

    fn draft() -> RegistrationDraft {
        RegistrationDraft::new(
            PhoneNumber::parse("+998901234567").unwrap(),
            "secret1",
            "Ali",
            "Valiyev",
        )
    }

    #[test]
    fn test_digits_fill_and_focus_stays_on_last() {
        let mut otp = OtpEntry::new();
        for c in ['1', '2', '3', '4'] {
            assert!(otp.input(c));
        }
        assert_eq!(otp.focus(), 3);
        assert_eq!(otp.code().as_deref(), Some("1234"));

        otp.input('9');
        assert_eq!(otp.code().as_deref(), Some("1239"));
    }

    #[test_case('a' ; "letter")]
    #[test_case(' ' ; "space")]
    #[test_case('-' ; "dash")]
    #[test_case('٣' ; "non ascii digit")]
    fn test_non_digit_is_ignored(c: char) {
        let mut otp = OtpEntry::new();
        otp.input('5');
        let before = otp.clone();
        assert!(!otp.input(c));
        assert_eq!(otp, before);
    }

    #[test]
    fn test_backspace() {
        let mut otp = OtpEntry::new();
        otp.input('1');
        otp.input('2');
        assert_eq!(otp.focus(), 2);

        otp.backspace();
        assert_eq!(otp.focus(), 1);
        assert_eq!(otp.slots()[1], Some('2'));

        otp.backspace();
        assert_eq!(otp.slots()[1], None);
        assert_eq!(otp.focus(), 1);

        otp.backspace();
        otp.backspace();
        otp.backspace();
        assert_eq!(otp.focus(), 0);
        assert!(otp.slots().iter().all(Option::is_none));
    }

    #[test]
    fn test_incomplete_code() {
        let mut otp = OtpEntry::new();
        otp.input('1');
        otp.focus_right();
        otp.focus_right();
        otp.input('3');
        assert!(!otp.is_complete());
        assert!(otp.code().is_none());
    }

    #[test]
    fn test_countdown_reaches_zero_after_cooldown() {
        let mut countdown = ResendCountdown::new(60);
        for _ in 0..59 {
            assert!(!countdown.tick());
        }
        assert!(countdown.tick());
        assert_eq!(countdown.remaining(), 0);
        assert!(countdown.tick());

        countdown.reset();
        assert_eq!(countdown.remaining(), 60);
        assert!(!countdown.can_resend());
    }

    #[test]
    fn test_submitted_enters_otp_pending() {
        let mut flow = RegistrationFlow::default();
        flow.submitted(draft());
        assert_eq!(flow.step(), RegistrationStep::OtpPending);
        assert_eq!(flow.otp().focus(), 0);
        assert_eq!(flow.countdown().remaining(), 60);
        assert!(!flow.countdown().can_resend());
    }

    #[test]
    fn test_resend_blocked_while_counting() {
        let mut flow = RegistrationFlow::default();
        flow.submitted(draft());
        assert!(flow.begin_resend().is_none());
    }

    #[test]
    fn test_resend_resets_slots_and_countdown() {
        let mut flow = RegistrationFlow::new(2);
        flow.submitted(draft());
        for c in ['4', '3', '2'] {
            flow.otp_mut().input(c);
        }
        flow.countdown_mut().tick();
        flow.countdown_mut().tick();

        let resent = flow.begin_resend().unwrap();
        assert_eq!(resent.phone.as_str(), "+998901234567");
        assert_eq!(flow.otp(), &OtpEntry::new());
        assert_eq!(flow.countdown().remaining(), 2);
        assert!(!flow.countdown().can_resend());

        flow.resend_failed();
        assert!(flow.countdown().can_resend());
    }

    #[test]
    fn test_abandon_discards_draft() {
        let mut flow = RegistrationFlow::default();
        flow.submitted(draft());
        flow.abandon();
        assert_eq!(flow.step(), RegistrationStep::Form);
        assert!(flow.draft().is_none());
    }

    #[test]
    fn test_verified_drops_draft() {
        let mut flow = RegistrationFlow::default();
        flow.submitted(draft());
        flow.verified();
        assert_eq!(flow.step(), RegistrationStep::Verified);
        assert!(flow.draft().is_none());
    }
}
