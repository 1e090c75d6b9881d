use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};
use std::fmt;

/// Identifies the backend instance that produced a log record.
///
/// Numeric ids sort numerically and before named ones.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ServerId {
    Number(u32),
    Name(String),
}

impl From<u32> for ServerId {
    fn from(n: u32) -> Self {
        ServerId::Number(n)
    }
}

impl From<&str> for ServerId {
    /// `"7"` and `7` are the same server.
    fn from(s: &str) -> Self {
        let s = s.trim();
        s.parse()
            .map(ServerId::Number)
            .unwrap_or_else(|_| ServerId::Name(s.to_string()))
    }
}

impl fmt::Display for ServerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerId::Number(n) => write!(f, "server{n}"),
            ServerId::Name(name) => write!(f, "server{name}"),
        }
    }
}

// Table keys read `server1`, `server2` in JSON output.
impl Serialize for ServerId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Timestamp exactly as it arrived on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum Timestamp {
    /// `{ "_seconds": .., "_nanoseconds": .. }`, `{ "seconds": .., "nanos": .. }` or a bare number.
    Epoch { seconds: i64, nanos: u32 },
    Text(String),
}

impl Timestamp {
    /// UTC calendar date of this timestamp, if it can be derived.
    pub fn utc_date(&self) -> Option<NaiveDate> {
        match self {
            Timestamp::Epoch { seconds, nanos } => {
                DateTime::from_timestamp(*seconds, *nanos).map(|dt| dt.date_naive())
            }
            Timestamp::Text(s) => date_from_text(s.trim()),
        }
    }
}

fn date_from_text(s: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc().date());
    }

    // ISO-8601 without an offset is taken as UTC.
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(dt.date());
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }

    s.parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
        .map(|dt| dt.date_naive())
}

/// A validated request log record.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub server: ServerId,
    pub status: i64,
    /// Always uppercase.
    pub method: String,
    pub response_time_ms: f64,
    pub timestamp: Option<Timestamp>,
}

impl LogRecord {
    pub fn new(
        server: u32,
        status: i64,
        method: &str,
        response_time_ms: f64,
        timestamp: Option<Timestamp>,
    ) -> Self {
        Self::for_server(
            ServerId::Number(server),
            status,
            method,
            response_time_ms,
            timestamp,
        )
    }

    pub fn for_server(
        server: ServerId,
        status: i64,
        method: &str,
        response_time_ms: f64,
        timestamp: Option<Timestamp>,
    ) -> Self {
        Self {
            server,
            status,
            method: method.trim().to_ascii_uppercase(),
            response_time_ms,
            timestamp,
        }
    }

    pub fn utc_date(&self) -> Option<NaiveDate> {
        self.timestamp.as_ref().and_then(Timestamp::utc_date)
    }
}
