//! Time related utils.

use chrono::SubsecRound;
use chrono::Utc;

/// DateTime is the alias for `chrono::DateTime<Utc>`.
pub type DateTime = chrono::DateTime<Utc>;

/// Create datetime of now, truncated to whole seconds.
///
/// SigV4 timestamps carry no fractional part, so dropping it here keeps
/// every value derived from one signing call consistent.
pub fn now() -> DateTime {
    Utc::now().trunc_subsecs(0)
}

/// Format time into date: `20220301`
pub fn format_date(t: DateTime) -> String {
    t.format("%Y%m%d").to_string()
}

/// Format time into ISO8601: `20220313T072004Z`
pub fn format_iso8601(t: DateTime) -> String {
    t.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Parse compact ISO8601 (`20220313T072004Z`) into time.
pub fn parse_iso8601(s: &str) -> crate::Result<DateTime> {
    chrono::NaiveDateTime::parse_from_str(s, "%Y%m%dT%H%M%SZ")
        .map(|t| t.and_utc())
        .map_err(|e| {
            crate::Error::request_invalid(format!("invalid compact iso8601 time: {s}"))
                .with_source(e)
        })
}
