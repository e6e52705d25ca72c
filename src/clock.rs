//! Process uptime and request timestamps.

use std::time::Instant;

use once_cell::sync::Lazy;
use time::macros::format_description;
use time::OffsetDateTime;

static PROCESS_START: Lazy<Instant> = Lazy::new(Instant::now);

/// Anchor process start. Call once, as early as possible in `main`.
///
/// Without this the anchor is taken on the first uptime read.
pub fn init() {
    Lazy::force(&PROCESS_START);
}

/// Seconds since process start, with sub-second precision.
///
/// Backed by a monotonic clock, so successive reads never decrease.
pub fn uptime_secs() -> f64 {
    PROCESS_START.elapsed().as_secs_f64()
}

/// Current UTC time as `YYYY-MM-DDTHH:MM:SS.mmmZ`.
pub fn now_iso8601() -> Result<String, time::error::Format> {
    format_iso8601(OffsetDateTime::now_utc())
}

fn format_iso8601(at: OffsetDateTime) -> Result<String, time::error::Format> {
    at.to_offset(time::UtcOffset::UTC).format(format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::format_description::well_known::Rfc3339;
    use time::macros::datetime;

    #[test]
    fn uptime_is_non_negative_and_non_decreasing() {
        init();
        let first = uptime_secs();
        let second = uptime_secs();
        assert!(first >= 0.0);
        assert!(second >= first);
    }

    #[test]
    fn timestamp_has_millisecond_precision_in_utc() {
        let at = datetime!(2024-03-05 14:07:09.123_456 UTC);
        assert_eq!(format_iso8601(at).unwrap(), "2024-03-05T14:07:09.123Z");
    }

    #[test]
    fn offset_timestamps_are_rendered_in_utc() {
        let at = datetime!(2024-03-05 11:07:09.5 -3);
        assert_eq!(format_iso8601(at).unwrap(), "2024-03-05T14:07:09.500Z");
    }

    #[test]
    fn now_parses_as_rfc3339() {
        let stamp = now_iso8601().unwrap();
        assert!(OffsetDateTime::parse(&stamp, &Rfc3339).is_ok());
    }
}
