//! Parsing of numeric ids out of route path segments such as `/song/42`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    #[error("route parameter {0:?} is not a number")]
    NotANumber(String),

    #[error("route parameter {0:?} does not fit in an id")]
    OutOfRange(String),
}

/// A parsed id segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteId {
    /// The `new` placeholder: the entity has not been saved yet.
    New,
    Id(i64),
}

impl RouteId {
    pub fn id(self) -> Option<i64> {
        match self {
            RouteId::New => None,
            RouteId::Id(id) => Some(id),
        }
    }
}

/// Parse a route segment into an id.
///
/// Leading whitespace, an optional sign and a run of decimal digits are
/// consumed; anything after the digits is ignored, so `"12-edit"` yields 12.
pub fn parse_numbered_param(param: &str) -> Result<RouteId, RouteError> {
    if param == "new" {
        return Ok(RouteId::New);
    }

    let trimmed = param.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return Err(RouteError::NotANumber(param.to_string()));
    }

    let digits = &rest[..digits_len];
    let magnitude: i128 = digits
        .parse()
        .map_err(|_| RouteError::OutOfRange(param.to_string()))?;
    let value = if negative { -magnitude } else { magnitude };
    let id = i64::try_from(value).map_err(|_| RouteError::OutOfRange(param.to_string()))?;

    log::trace!("route param {:?} -> {}", param, id);
    Ok(RouteId::Id(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_has_no_id() {
        assert_eq!(parse_numbered_param("new"), Ok(RouteId::New));
        assert_eq!(RouteId::New.id(), None);
    }

    #[test]
    fn plain_numbers_parse() {
        assert_eq!(parse_numbered_param("42"), Ok(RouteId::Id(42)));
        assert_eq!(parse_numbered_param("0"), Ok(RouteId::Id(0)));
        assert_eq!(parse_numbered_param("007"), Ok(RouteId::Id(7)));
    }

    #[test]
    fn signs_and_whitespace_are_accepted() {
        assert_eq!(parse_numbered_param("  -3"), Ok(RouteId::Id(-3)));
        assert_eq!(parse_numbered_param("+8"), Ok(RouteId::Id(8)));
    }

    #[test]
    fn trailing_text_is_ignored() {
        assert_eq!(parse_numbered_param("12abc"), Ok(RouteId::Id(12)));
        assert_eq!(parse_numbered_param("3.9"), Ok(RouteId::Id(3)));
    }

    #[test]
    fn non_numbers_are_errors() {
        for bad in ["", "abc", "New", "-", " + 1", "x12"] {
            assert_eq!(
                parse_numbered_param(bad),
                Err(RouteError::NotANumber(bad.to_string())),
                "input {:?}",
                bad
            );
        }
    }

    #[test]
    fn huge_numbers_are_out_of_range() {
        let big = "99999999999999999999999";
        assert_eq!(
            parse_numbered_param(big),
            Err(RouteError::OutOfRange(big.to_string()))
        );
        assert_eq!(
            parse_numbered_param("-9223372036854775808"),
            Ok(RouteId::Id(i64::MIN))
        );
    }
}
