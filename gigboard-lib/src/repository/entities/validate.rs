//! Checks applied to raw user input before anything is written.

use chrono::NaiveDate;

use crate::repository::entities::{Error, Result};

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Trim `value`, rejecting it if nothing is left.
pub(crate) fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyField(field));
    }

    Ok(trimmed)
}

/// Accepts `local@domain` with no whitespace and exactly one `@`.
pub(crate) fn email(value: &str) -> Result<&str> {
    let trimmed = required("email", value)?;

    let valid = match trimmed.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !trimmed.chars().any(char::is_whitespace)
        }
        None => false,
    };

    if !valid {
        return Err(Error::InvalidEmail(trimmed.to_string()));
    }

    Ok(trimmed)
}

/// Parse an ISO-8601 calendar date (`YYYY-MM-DD`).
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| Error::InvalidDate(value.to_string()))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_required() {
        assert_eq!(required("venue", "  Park ").unwrap(), "Park");
        assert!(matches!(
            required("venue", "   "),
            Err(Error::EmptyField("venue"))
        ));
    }

    #[test]
    fn test_email() {
        assert_eq!(email(" jane@example.com ").unwrap(), "jane@example.com");
        assert!(matches!(email("jane"), Err(Error::InvalidEmail(_))));
        assert!(matches!(email("@example.com"), Err(Error::InvalidEmail(_))));
        assert!(matches!(email("jane@"), Err(Error::InvalidEmail(_))));
        assert!(matches!(email("ja ne@x.com"), Err(Error::InvalidEmail(_))));
        assert!(matches!(email("a@b@c"), Err(Error::InvalidEmail(_))));
        assert!(matches!(email(""), Err(Error::EmptyField("email"))));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-06-01").unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
        );
        assert!(matches!(parse_date("01/06/2025"), Err(Error::InvalidDate(_))));
        assert!(matches!(parse_date("2025-02-30"), Err(Error::InvalidDate(_))));
    }
}
