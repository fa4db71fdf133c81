//! Shared formatting for CLI commands.

/// Width of the progress bar, in cells.
const PROGRESS_WIDTH: usize = 20;

/// Formats seconds as `MM:SS`. Minutes are not wrapped into hours.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is floored and clamped to non-negative first"
)]
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0).floor() as u64;
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Formats an amount with two decimals, e.g. `$0.75`.
pub fn format_money(currency_symbol: &str, amount: f64) -> String {
    format!("{currency_symbol}{amount:.2}")
}

/// Formats an hourly rate, e.g. `$25.00/hr`.
pub fn format_wage(currency_symbol: &str, wage: f64) -> String {
    format!("{}/hr", format_money(currency_symbol, wage))
}

/// Renders a fraction in \[0, 1\] as a fixed-width bar.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    reason = "fraction is clamped to [0, 1] and width is tiny"
)]
pub fn progress_bar(fraction: f64) -> String {
    let filled = (fraction.clamp(0.0, 1.0) * PROGRESS_WIDTH as f64).round() as usize;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(PROGRESS_WIDTH - filled)
    )
}
