use crate::logs::bucket::Classifier;
use crate::logs::constants::{
    ERROR_STATUS_FLOOR, FAST_BELOW_MS, INFO_STATUSES, MEDIUM_UP_TO_MS, OTHER_METHOD,
    WARN_STATUSES,
};
use crate::logs::types::LogRecord;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusClass {
    Info,
    Warn,
    Error,
}

impl StatusClass {
    pub fn from_status(status: i64) -> Option<Self> {
        if INFO_STATUSES.contains(&status) {
            Some(Self::Info)
        } else if WARN_STATUSES.contains(&status) {
            Some(Self::Warn)
        } else if status >= ERROR_STATUS_FLOOR {
            Some(Self::Error)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for StatusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseTimeBucket {
    Fast,
    Medium,
    Slow,
}

impl ResponseTimeBucket {
    /// Total over every non-NaN input.
    pub fn from_millis(ms: f64) -> Self {
        if ms < FAST_BELOW_MS {
            Self::Fast
        } else if ms <= MEDIUM_UP_TO_MS {
            Self::Medium
        } else {
            Self::Slow
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fast => "fast",
            Self::Medium => "medium",
            Self::Slow => "slow",
        }
    }
}

impl fmt::Display for ResponseTimeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub struct StatusClassifier;

impl Classifier for StatusClassifier {
    type Bucket = StatusClass;

    fn classify(&self, record: &LogRecord) -> Option<StatusClass> {
        StatusClass::from_status(record.status)
    }
}

pub struct ResponseTimeClassifier;

impl Classifier for ResponseTimeClassifier {
    type Bucket = ResponseTimeBucket;

    fn classify(&self, record: &LogRecord) -> Option<ResponseTimeBucket> {
        Some(ResponseTimeBucket::from_millis(record.response_time_ms))
    }
}

/// Buckets by uppercase method. With a known set, everything else is `OTHER`.
#[derive(Debug, Clone, Default)]
pub struct MethodClassifier {
    known: Option<BTreeSet<String>>,
}

impl MethodClassifier {
    pub fn with_known<I, S>(methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            known: Some(
                methods
                    .into_iter()
                    .map(|m| m.as_ref().trim().to_ascii_uppercase())
                    .collect(),
            ),
        }
    }
}

impl Classifier for MethodClassifier {
    type Bucket = String;

    fn classify(&self, record: &LogRecord) -> Option<String> {
        match &self.known {
            Some(known) if !known.contains(&record.method) => Some(OTHER_METHOD.to_string()),
            _ => Some(record.method.clone()),
        }
    }
}

pub struct DailyClassifier;

impl Classifier for DailyClassifier {
    type Bucket = NaiveDate;

    fn classify(&self, record: &LogRecord) -> Option<NaiveDate> {
        record.utc_date()
    }
}
