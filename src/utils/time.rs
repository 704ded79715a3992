use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};

pub fn from_rfc3339(s: &str) -> anyhow::Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(s)?.with_timezone(&Utc))
}

/// Accepts RFC 3339 timestamps and offset-less ones (`2024-09-01T08:30:00`,
/// optional fractional seconds), the latter read as UTC.
pub fn parse_flexible(s: &str) -> anyhow::Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = from_rfc3339(s) {
        return Ok(dt);
    }
    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))?;
    Ok(Utc.from_utc_datetime(&naive))
}

pub fn deserialize_opt_flexible<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => parse_flexible(&s)
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("Invalid timestamp {:?}: {}", s, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn parses_offsetless_timestamps_as_utc() {
        let dt = parse_flexible("2024-09-01T08:30:00.123").unwrap();
        assert_eq!(dt.year(), 2024);
        assert_eq!(dt.hour(), 8);

        let with_offset = parse_flexible("2024-09-01T10:30:00+02:00").unwrap();
        assert_eq!(with_offset.hour(), 8);
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_flexible("yesterday").is_err());
    }
}
