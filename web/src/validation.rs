use std::sync::OnceLock;

use chrono::{DateTime, FixedOffset, Utc};
use regex::Regex;

use crate::format::{browser_now, browser_offset_at, ParsedDate};

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

pub fn validate_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// True when `input` names an instant strictly after the browser's clock.
pub fn validate_future_date(input: &str) -> bool {
    let now = browser_now();
    validate_future_date_at(input, now, browser_offset_at(now))
}

/// True when `input` names an instant strictly after `now`. Wall-clock
/// inputs are read in `offset`. Unparseable input is never in the future.
pub fn validate_future_date_at(input: &str, now: DateTime<Utc>, offset: FixedOffset) -> bool {
    ParsedDate::parse(input)
        .and_then(|parsed| parsed.to_utc(offset))
        .is_some_and(|instant| instant > now)
}

/// A form control that must not be left blank.
pub trait RequiredField {
    fn value(&self) -> String;
    fn set_invalid(&self, invalid: bool);
}

/// Marks every blank field invalid and clears the mark on the others.
/// Returns true only when no field is blank.
pub fn validate_fields<F: RequiredField>(fields: &[F]) -> bool {
    let mut is_valid = true;
    for field in fields {
        let is_blank = field.value().trim().is_empty();
        field.set_invalid(is_blank);
        if is_blank {
            is_valid = false;
        }
    }
    is_valid
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use chrono::{Duration, TimeZone};

    use super::*;

    #[derive(Default)]
    struct FakeField {
        value: RefCell<String>,
        invalid: Cell<bool>,
    }

    impl FakeField {
        fn with_value(value: &str) -> Self {
            FakeField {
                value: RefCell::new(value.to_owned()),
                invalid: Cell::new(false),
            }
        }
    }

    impl RequiredField for FakeField {
        fn value(&self) -> String {
            self.value.borrow().clone()
        }

        fn set_invalid(&self, invalid: bool) {
            self.invalid.set(invalid);
        }
    }

    #[test]
    fn email_shapes() {
        assert!(validate_email("a@b.com"));
        assert!(validate_email("ana.lopez@rutas.mx"));
        assert!(!validate_email("not-an-email"));
        assert!(!validate_email("a@b"));
        assert!(!validate_email("a b@c.com"));
        assert!(!validate_email("a@@b.com"));
    }

    #[test]
    fn future_dates_relative_to_now() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let utc = FixedOffset::east_opt(0).unwrap();
        let tomorrow = (now + Duration::days(1)).to_rfc3339();
        let yesterday = (now - Duration::days(1)).to_rfc3339();
        assert!(validate_future_date_at(&tomorrow, now, utc));
        assert!(!validate_future_date_at(&yesterday, now, utc));
        assert!(!validate_future_date_at(&now.to_rfc3339(), now, utc));
        assert!(!validate_future_date_at("someday", now, utc));
    }

    #[test]
    fn zulu_times_without_seconds_are_instants() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let mexico_city = FixedOffset::west_opt(6 * 3600).unwrap();
        assert!(validate_future_date_at("2025-06-01T12:30Z", now, mexico_city));
        assert!(!validate_future_date_at("2025-06-01T11:30Z", now, mexico_city));
    }

    #[test]
    fn wall_clock_dates_use_the_viewer_offset() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        // 08:00 in UTC-6 is 14:00 UTC, two hours after now.
        let mexico_city = FixedOffset::west_opt(6 * 3600).unwrap();
        assert!(validate_future_date_at("2025-06-01T08:00", now, mexico_city));
        assert!(!validate_future_date_at(
            "2025-06-01T08:00",
            now,
            FixedOffset::east_opt(0).unwrap()
        ));
    }

    #[test]
    fn blank_fields_are_marked_invalid() {
        let fields = [
            FakeField::with_value("Ana"),
            FakeField::with_value("   "),
            FakeField::default(),
        ];
        assert!(!validate_fields(&fields));
        assert!(!fields[0].invalid.get());
        assert!(fields[1].invalid.get());
        assert!(fields[2].invalid.get());
    }

    #[test]
    fn filling_one_field_only_touches_that_field() {
        let fields = [FakeField::with_value("Ana"), FakeField::default()];
        assert!(!validate_fields(&fields));

        *fields[1].value.borrow_mut() = "ana@example.com".to_owned();
        assert!(validate_fields(&fields));
        assert!(!fields[0].invalid.get());
        assert!(!fields[1].invalid.get());

        *fields[0].value.borrow_mut() = String::new();
        assert!(!validate_fields(&fields));
        assert!(fields[0].invalid.get());
        assert!(!fields[1].invalid.get());
    }

    #[test]
    fn no_required_fields_is_valid() {
        let fields: [FakeField; 0] = [];
        assert!(validate_fields(&fields));
    }
}
