//! Calendar-date wire format: plain `YYYY-MM-DD` strings.

use time::format_description::FormatItem;
use time::macros::format_description;
use time::Date;

pub const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Render a date as `YYYY-MM-DD`. The format is infallible for any valid Date.
pub fn format_date(date: Date) -> String {
    date.format(&DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

/// Serde adapter for `Date` fields: `#[serde(with = "crate::http::dates")]`.
pub fn serialize<S: serde::Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_date(*date))
}

pub fn deserialize<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
    let s = <String as serde::Deserialize>::deserialize(deserializer)?;
    Date::parse(&s, &DATE_FORMAT).map_err(serde::de::Error::custom)
}

/// Serde adapter for `Option<Date>` fields:
/// `#[serde(default, with = "crate::http::dates::option")]`.
pub mod option {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;

    use super::{format_date, DATE_FORMAT};

    pub fn serialize<S: Serializer>(
        date: &Option<Date>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(d) => serializer.serialize_some(&format_date(*d)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Date>, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        value
            .map(|s| Date::parse(&s, &DATE_FORMAT).map_err(serde::de::Error::custom))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::format_date;

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(date!(2026 - 08 - 23)), "2026-08-23");
        assert_eq!(format_date(date!(2026 - 01 - 05)), "2026-01-05");
    }
}
