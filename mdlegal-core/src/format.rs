//! pt-BR display formatting
//!
//! Currency as `R$ 1.234,56`, dates as `dd/mm/yyyy`, booleans as `Sim`/`Não`.

use chrono::NaiveDate;

/// Group the integer part with `.` as thousands separator
fn group_thousands(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }

    let mut groups = Vec::new();
    while n > 0 {
        groups.push(n % 1000);
        n /= 1000;
    }

    let mut out = groups.pop().map(|g| g.to_string()).unwrap_or_default();
    while let Some(g) = groups.pop() {
        out.push('.');
        out.push_str(&format!("{:03}", g));
    }
    out
}

/// Split an amount into (negative, integer part, cents) rounded to cents
fn split_cents(amount: f64) -> (bool, u64, u64) {
    let cents = (amount.abs() * 100.0).round() as u64;
    (amount < 0.0 && cents > 0, cents / 100, cents % 100)
}

/// Format an amount in Brazilian reais: `R$ 1.234,56`
pub fn format_brl(amount: f64) -> String {
    let (negative, whole, cents) = split_cents(amount);
    let sign = if negative { "-" } else { "" };
    format!("{}R$ {},{:02}", sign, group_thousands(whole), cents)
}

/// Format a plain number: integers grouped, fractions with two decimals
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let (negative, whole, cents) = split_cents(value);
    let sign = if negative { "-" } else { "" };
    if cents == 0 {
        format!("{}{}", sign, group_thousands(whole))
    } else {
        format!("{}{},{:02}", sign, group_thousands(whole), cents)
    }
}

/// Format a date as `dd/mm/yyyy`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Parse either ISO (`2024-03-15`) or pt-BR (`15/03/2024`) dates
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"))
        .ok()
}

/// Format a boolean as `Sim`/`Não`
pub fn format_bool(value: bool) -> &'static str {
    if value {
        "Sim"
    } else {
        "Não"
    }
}

/// Parse `sim`/`não`/`true`/`false`/`1`/`0` (case-insensitive)
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "sim" | "s" | "true" | "1" | "yes" => Some(true),
        "não" | "nao" | "n" | "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_currency() {
        assert_eq!(format_brl(0.0), "R$ 0,00");
        assert_eq!(format_brl(1234.56), "R$ 1.234,56");
        assert_eq!(format_brl(1_500_000.0), "R$ 1.500.000,00");
        assert_eq!(format_brl(-10.0), "-R$ 10,00");
        assert_eq!(format_brl(0.005), "R$ 0,01");
    }

    #[test]
    fn formats_numbers() {
        assert_eq!(format_number(12.0), "12");
        assert_eq!(format_number(3.5), "3,50");
        assert_eq!(format_number(1005.0), "1.005");
    }

    #[test]
    fn dates_round_trip_both_layouts() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(format_date(date), "05/03/2024");
        assert_eq!(parse_date("2024-03-05"), Some(date));
        assert_eq!(parse_date("05/03/2024"), Some(date));
        assert_eq!(parse_date("March 5"), None);
    }

    #[test]
    fn booleans() {
        assert_eq!(format_bool(true), "Sim");
        assert_eq!(parse_bool("Não"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
