use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Timelike, Utc,
};
use rust_decimal::{Decimal, RoundingStrategy};

pub const INVALID_DATE: &str = "Invalid Date";

const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

// `%#z` takes `Z`, `+05`, `+0530` and `+05:30`.
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M%#z", "%Y-%m-%d %H:%M%#z"];

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// A date input as the browser would read it: either an absolute instant or
/// a wall-clock time in the viewer's zone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ParsedDate {
    Instant(DateTime<Utc>),
    Local(NaiveDateTime),
}

impl ParsedDate {
    pub(crate) fn parse(input: &str) -> Option<ParsedDate> {
        let input = input.trim();
        if let Ok(datetime) = DateTime::parse_from_rfc3339(input) {
            return Some(ParsedDate::Instant(datetime.to_utc()));
        }
        if let Some(datetime) = OFFSET_FORMATS
            .iter()
            .find_map(|format| DateTime::parse_from_str(input, format).ok())
        {
            return Some(ParsedDate::Instant(datetime.to_utc()));
        }
        if let Some(naive) = NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        {
            return Some(ParsedDate::Local(naive));
        }
        // Date-only strings are UTC midnight, not local midnight.
        NaiveDate::parse_from_str(input, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| ParsedDate::Instant(naive.and_utc()))
    }

    pub(crate) fn to_utc(self, offset: FixedOffset) -> Option<DateTime<Utc>> {
        match self {
            ParsedDate::Instant(instant) => Some(instant),
            ParsedDate::Local(naive) => offset
                .from_local_datetime(&naive)
                .single()
                .map(|datetime| datetime.to_utc()),
        }
    }

    fn to_local(self, offset: FixedOffset) -> NaiveDateTime {
        match self {
            ParsedDate::Instant(instant) => instant.with_timezone(&offset).naive_local(),
            ParsedDate::Local(naive) => naive,
        }
    }
}

/// Offset of the browser's zone at `instant`, as reported by `Date`.
pub(crate) fn browser_offset_at(instant: DateTime<Utc>) -> FixedOffset {
    #[allow(clippy::cast_precision_loss)]
    let millis = instant.timestamp_millis() as f64;
    let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_f64(millis));
    #[allow(clippy::cast_possible_truncation)]
    let minutes_behind_utc = date.get_timezone_offset() as i32;
    FixedOffset::west_opt(minutes_behind_utc * 60).unwrap_or_else(|| Utc.fix())
}

pub(crate) fn browser_now() -> DateTime<Utc> {
    #[allow(clippy::cast_possible_truncation)]
    let millis = js_sys::Date::now() as i64;
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}

/// Long `es-MX` rendering of a date input in the browser's zone,
/// e.g. `15 de enero de 2024, 14:30`.
pub fn format_date(input: &str) -> String {
    match ParsedDate::parse(input) {
        Some(ParsedDate::Instant(instant)) => render_long_date(
            instant
                .with_timezone(&browser_offset_at(instant))
                .naive_local(),
        ),
        Some(ParsedDate::Local(naive)) => render_long_date(naive),
        None => INVALID_DATE.to_owned(),
    }
}

/// Same as [`format_date`] with the viewer's zone given explicitly.
pub fn format_date_at(input: &str, offset: FixedOffset) -> String {
    ParsedDate::parse(input)
        .map(|parsed| render_long_date(parsed.to_local(offset)))
        .unwrap_or_else(|| INVALID_DATE.to_owned())
}

fn render_long_date(local: NaiveDateTime) -> String {
    let month = MONTHS_ES[local.month0() as usize];
    format!(
        "{day} de {month} de {year}, {hour:02}:{minute:02}",
        day = local.day(),
        year = local.year(),
        hour = local.hour(),
        minute = local.minute(),
    )
}

/// Mexican-peso currency text: `$1,234.50`, `-$12.00`.
pub fn format_price(amount: f64) -> String {
    if amount.is_nan() {
        return "$NaN".to_owned();
    }
    let sign = if amount.is_sign_negative() { "-" } else { "" };
    if amount.is_infinite() {
        return format!("{sign}$∞");
    }
    let fixed = fixed_two_decimals(amount.abs());
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    format!("{sign}${}.{fraction}", group_thousands(integer))
}

// Rounds the exact binary value half away from zero, so 1.115 (stored as
// 1.11499...) stays at 1.11. Amounts past the decimal range keep std formatting.
fn fixed_two_decimals(amount: f64) -> String {
    match Decimal::from_f64_retain(amount) {
        Some(exact) => {
            let mut cents =
                exact.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            cents.rescale(2);
            cents.to_string()
        }
        None => format!("{amount:.2}"),
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mexico_city() -> FixedOffset {
        FixedOffset::west_opt(6 * 3600).unwrap()
    }

    #[test]
    fn formats_naive_datetime_as_local_time() {
        assert_eq!(
            format_date_at("2024-01-15T14:30:00", mexico_city()),
            "15 de enero de 2024, 14:30"
        );
        assert_eq!(
            format_date_at("2024-09-05T08:05", mexico_city()),
            "5 de septiembre de 2024, 08:05"
        );
    }

    #[test]
    fn converts_instants_to_the_viewer_zone() {
        assert_eq!(
            format_date_at("2024-01-15T20:30:00Z", mexico_city()),
            "15 de enero de 2024, 14:30"
        );
        assert_eq!(
            format_date_at("2024-12-31T23:00:00-06:00", FixedOffset::east_opt(0).unwrap()),
            "1 de enero de 2025, 05:00"
        );
    }

    #[test]
    fn instants_without_seconds_keep_their_offset() {
        let utc = FixedOffset::east_opt(0).unwrap();
        assert_eq!(
            format_date_at("2024-01-15T14:30Z", utc),
            "15 de enero de 2024, 14:30"
        );
        assert_eq!(
            format_date_at("2024-01-15T14:30-06:00", utc),
            "15 de enero de 2024, 20:30"
        );
        assert_eq!(
            format_date_at("2024-01-15T14:30+0530", utc),
            "15 de enero de 2024, 09:00"
        );
    }

    #[test]
    fn date_only_input_is_utc_midnight() {
        assert_eq!(
            format_date_at("2024-03-05", mexico_city()),
            "4 de marzo de 2024, 18:00"
        );
    }

    #[test]
    fn invalid_date_is_text_not_error() {
        assert_eq!(format_date_at("mañana", mexico_city()), INVALID_DATE);
        assert_eq!(format_date_at("", mexico_city()), INVALID_DATE);
        assert_eq!(format_date_at("2024-02-30", mexico_city()), INVALID_DATE);
    }

    #[test]
    fn formats_pesos() {
        assert_eq!(format_price(0.0), "$0.00");
        assert_eq!(format_price(450.0), "$450.00");
        assert_eq!(format_price(1234.5), "$1,234.50");
        assert_eq!(format_price(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_price(0.125), "$0.13");
    }

    #[test]
    fn rounds_the_stored_value_not_the_literal() {
        assert_eq!(format_price(1.115), "$1.11");
        assert_eq!(format_price(2.675), "$2.67");
        assert_eq!(format_price(8.345), "$8.34");
        assert_eq!(format_price(10.075), "$10.07");
        assert_eq!(format_price(-2.675), "-$2.67");
    }

    #[test]
    fn formats_negative_and_non_finite_amounts() {
        assert_eq!(format_price(-99.999), "-$100.00");
        assert_eq!(format_price(f64::NAN), "$NaN");
        assert_eq!(format_price(f64::INFINITY), "$∞");
        assert_eq!(format_price(f64::NEG_INFINITY), "-$∞");
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("123456789"), "123,456,789");
    }
}
