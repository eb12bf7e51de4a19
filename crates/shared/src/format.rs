use chrono::NaiveDate;

const MONEY_SIGNIFICANT_DIGITS: u32 = 3;

/// AUD display price, rounded to three significant digits the way en-AU currency formatting does.
pub fn format_money(value: u64) -> String {
    format!("${}", group_thousands(round_significant(value, MONEY_SIGNIFICANT_DIGITS)))
}

fn round_significant(value: u64, digits: u32) -> u64 {
    let len = value.checked_ilog10().map_or(1, |log| log + 1);
    if len <= digits {
        return value;
    }
    let factor = 10u64.pow(len - digits);
    (value + factor / 2) / factor * factor
}

fn group_thousands(value: u64) -> String {
    let raw = value.to_string();
    let mut out = String::with_capacity(raw.len() + raw.len() / 3);
    for (i, ch) in raw.chars().enumerate() {
        if i > 0 && (raw.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// "Mar 5"
pub fn format_date_short(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

pub fn format_optional_date_short(date: Option<NaiveDate>) -> String {
    date.map(format_date_short).unwrap_or_default()
}

/// "1 passenger", "3 passengers"
pub fn plural(text: &str, count: usize) -> String {
    format!("{count} {text}{}", if count > 1 { "s" } else { "" })
}

#[cfg(test)]
#[path = "tests/format_tests.rs"]
mod tests;
