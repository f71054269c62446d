//! Four-slot one-time code widget.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::application::services::{OTP_LENGTH, OtpEntry};

const SLOT_WIDTH: u16 = 5;

pub struct OtpInput<'a> {
    entry: &'a OtpEntry,
    disabled: bool,
}

impl<'a> OtpInput<'a> {
    #[must_use]
    pub const fn new(entry: &'a OtpEntry) -> Self {
        Self {
            entry,
            disabled: false,
        }
    }

    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}

impl Widget for OtpInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let slots = Layout::horizontal([Constraint::Length(SLOT_WIDTH); OTP_LENGTH])
            .flex(Flex::Center)
            .spacing(1)
            .split(area);

        for (i, (slot, rect)) in self.entry.slots().iter().zip(slots.iter()).enumerate() {
            let focused = !self.disabled && i == self.entry.focus();
            let border = if focused {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };

            let digit = slot.map_or_else(|| " ".to_string(), String::from);
            Paragraph::new(digit)
                .centered()
                .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
                .block(Block::default().borders(Borders::ALL).border_style(border))
                .render(*rect, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_entered_digits() {
        let mut entry = OtpEntry::new();
        entry.input('4');
        entry.input('2');

        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        OtpInput::new(&entry).render(area, &mut buf);

        let row: String = (0..area.width).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(row.contains('4'));
        assert!(row.contains('2'));
    }
}
