//! Dollar figure formatting for the info panel.

/// Rounds to the nearest integer (halves round up) and groups digits in
/// threes with commas, e.g. `1234567.5` -> `"1,234,568"`.
///
/// NaN is shown as `"NaN"` and infinities as `"Infinity"`/`"-Infinity"`
/// so that bad input stays visible.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let rounded = round_half_up(value);
    let grouped = group_thousands(&format!("{:.0}", rounded.abs()));

    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}
