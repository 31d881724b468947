use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

// ---------------------------------------------------------------------------
// Amounts
// ---------------------------------------------------------------------------

/// Parse a text amount such as `$1,234.56` or `(42.00)`. Unparseable or
/// non-finite input yields zero.
pub fn parse_amount(raw: &str) -> f64 {
    let cleaned: String = raw.chars().filter(|c| !matches!(c, ',' | '$')).collect();
    let cleaned = cleaned.trim();
    let (digits, sign) = match cleaned.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        Some(inner) => (inner.trim(), -1.0),
        None => (cleaned, 1.0),
    };
    digits
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map_or(0.0, |v| sign * v)
}

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

/// Largest serial Excel accepts (9999-12-31).
pub(crate) const MAX_SERIAL: f64 = 2_958_465.0;

fn excel_epoch() -> NaiveDateTime {
    // Excel epoch is 1899-12-30 (accounting for the 1900 leap year bug)
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .unwrap_or_default()
        .and_time(NaiveTime::MIN)
}

pub fn datetime_to_excel_serial(dt: NaiveDateTime) -> f64 {
    (dt - excel_epoch()).num_seconds() as f64 / 86_400.0
}

/// Day number shown in the register title: days since 1900-01-01 plus two.
pub fn title_serial(date: NaiveDate) -> i64 {
    let base = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap_or_default();
    (date - base).num_days() + 2
}

pub fn parse_date_mdy(raw: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = raw.trim().split('/').collect();
    if parts.len() != 3 {
        return None;
    }
    let m: u32 = parts[0].parse().ok()?;
    let d: u32 = parts[1].parse().ok()?;
    let y: i32 = parts[2].parse().ok()?;
    NaiveDate::from_ymd_opt(y, m, d)
}

pub fn parse_iso_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}

/// Integral numbers render without a fractional part.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}
