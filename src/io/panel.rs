// ---------------------------------------------------------------------------
// Fixed-width text formats for the cockpit status panel
// ---------------------------------------------------------------------------

pub const PROGRESS_BAR_WIDTH: usize = 24;
pub const PROGRESS_BAR_HEIGHT: usize = 3;

const MINUS: char = '\u{2013}';

/// Zero-padded whole number with an explicit sign: `+007`, `–012`.
/// Negatives use an en dash.
pub fn format_signed(value: f64, digits: usize) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { MINUS } else { '+' };
    format!("{}{:0width$}", sign, rounded.abs() as u64, width = digits)
}

/// Zero-padded whole number: `042`.
pub fn format_unsigned(value: f64, digits: usize) -> String {
    format!("{:0width$}", value.round().abs() as u64, width = digits)
}

/// Braking progress bar. `remaining` is current speed over start speed;
/// cells before `width * (1 - remaining)` are filled. Out-of-range values
/// are not clamped.
pub fn progress_bar(remaining: f64) -> String {
    let mut row = String::from("|");
    for i in 0..PROGRESS_BAR_WIDTH {
        let filled = (i as f64) < PROGRESS_BAR_WIDTH as f64 * (1.0 - remaining);
        row.push(if filled { '#' } else { ' ' });
    }
    row.push_str("|\n");

    let mut out = String::from(" PROGRESS\n");
    for _ in 0..PROGRESS_BAR_HEIGHT {
        out.push_str(&row);
    }
    out
}

pub fn header(version: &str) -> String {
    format!("    FLIGHT ASSIST V{}\n{}\n\n", version, "-".repeat(40))
}
