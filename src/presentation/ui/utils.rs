use chrono::{DateTime, Local, Utc};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Color;
use ratatui::widgets::ListState;
use rust_decimal::Decimal;

use crate::domain::entities::{OrderStatus, PaymentStatus, PrescriptionStatus};

pub const CURRENCY: &str = "so'm";

/// Formats an amount as `12 500 so'm`, dropping trailing zero decimals.
#[must_use]
pub fn format_money(amount: Decimal) -> String {
    let text = amount.round_dp(2).normalize().to_string();
    let (sign, digits) = text
        .strip_prefix('-')
        .map_or(("", text.as_str()), |rest| ("-", rest));
    let (whole, fraction) = digits
        .split_once('.')
        .map_or((digits, None), |(w, f)| (w, Some(f)));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction} {CURRENCY}"),
        None => format!("{sign}{grouped} {CURRENCY}"),
    }
}

#[must_use]
pub fn format_datetime(value: Option<DateTime<Utc>>) -> String {
    value.map_or_else(
        || "-".to_string(),
        |dt| dt.with_timezone(&Local).format("%d.%m.%Y %H:%M").to_string(),
    )
}

#[must_use]
pub const fn order_status_color(status: OrderStatus) -> Color {
    match status {
        OrderStatus::Draft => Color::Gray,
        OrderStatus::AwaitingPrescription | OrderStatus::AwaitingPayment => Color::Yellow,
        OrderStatus::Paid | OrderStatus::Preparing | OrderStatus::ReadyForDelivery => Color::Cyan,
        OrderStatus::OnTheWay => Color::Blue,
        OrderStatus::Delivered => Color::Green,
        OrderStatus::Cancelled => Color::Red,
    }
}

#[must_use]
pub const fn payment_status_color(status: PaymentStatus) -> Color {
    match status {
        PaymentStatus::Pending | PaymentStatus::Processing => Color::Yellow,
        PaymentStatus::Success => Color::Green,
        PaymentStatus::Failed | PaymentStatus::Cancelled => Color::Red,
        PaymentStatus::Refunded => Color::Magenta,
    }
}

#[must_use]
pub const fn prescription_status_color(status: PrescriptionStatus) -> Color {
    match status {
        PrescriptionStatus::Pending => Color::Yellow,
        PrescriptionStatus::Approved => Color::Green,
        PrescriptionStatus::Rejected => Color::Red,
    }
}

/// Moves the list selection one row down, wrapping to the top.
pub fn select_next(state: &mut ListState, len: usize) {
    if len == 0 {
        state.select(None);
        return;
    }
    let next = state.selected().map_or(0, |i| (i + 1) % len);
    state.select(Some(next));
}

/// Moves the list selection one row up, wrapping to the bottom.
pub fn select_prev(state: &mut ListState, len: usize) {
    if len == 0 {
        state.select(None);
        return;
    }
    let prev = state.selected().map_or(len - 1, |i| (i + len - 1) % len);
    state.select(Some(prev));
}

/// Keeps the selection inside a list whose length just changed.
pub fn clamp_selection(state: &mut ListState, len: usize) {
    match (state.selected(), len) {
        (_, 0) => state.select(None),
        (None, _) => state.select(Some(0)),
        (Some(i), len) if i >= len => state.select(Some(len - 1)),
        _ => {}
    }
}

/// Helper function to create a centered rect using up certain percentage of the available rect `r`
#[must_use]
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use test_case::test_case;

    #[test_case("0", "0 so'm")]
    #[test_case("950", "950 so'm")]
    #[test_case("12500.00", "12 500 so'm")]
    #[test_case("8000", "8 000 so'm")]
    #[test_case("1234567.50", "1 234 567.5 so'm")]
    #[test_case("-45000", "-45 000 so'm")]
    fn test_format_money(input: &str, expected: &str) {
        assert_eq!(format_money(Decimal::from_str(input).unwrap()), expected);
    }

    #[test]
    fn test_selection_wraps() {
        let mut state = ListState::default();
        select_next(&mut state, 3);
        assert_eq!(state.selected(), Some(0));
        select_prev(&mut state, 3);
        assert_eq!(state.selected(), Some(2));
        select_next(&mut state, 3);
        assert_eq!(state.selected(), Some(0));
    }

    #[test]
    fn test_clamp_selection() {
        let mut state = ListState::default().with_selected(Some(5));
        clamp_selection(&mut state, 2);
        assert_eq!(state.selected(), Some(1));
        clamp_selection(&mut state, 0);
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn test_format_missing_datetime() {
        assert_eq!(format_datetime(None), "-");
    }
}
