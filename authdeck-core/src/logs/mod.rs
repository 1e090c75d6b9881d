//! Log Aggregation Pipeline
//!
//! Turns the raw request log list served by the log-ingestion API into the four
//! per-server tables shown on the dashboard:
//!
//! - **Status**: `info` / `warn` / `error` status classes
//! - **Response time**: `fast` / `medium` / `slow`
//! - **Method**: one bucket per uppercase HTTP method (optionally `OTHER`)
//! - **Daily**: requests per UTC calendar date, zero-filled on a shared axis
//!
//! Every table is produced by the same bucket-and-count routine
//! ([`BucketCounter`]) driven by a different [`Classifier`].
//!
//! The overall data processing architecture is:
//!
//! JSON body
//! parse_logs_payload
//! LogRecord
//! Aggregator
//! AggregationResult
//! render_charts
//!

mod aggregation;
mod bucket;
mod classify;
mod constants;
mod parse;
mod render;
mod types;

#[cfg(test)]
mod tests;

pub use aggregation::{AggregationOptions, AggregationResult, Aggregator, DailySeries};
pub use bucket::{BucketCounter, Classifier, Table};
pub use classify::{
    DailyClassifier, MethodClassifier, ResponseTimeBucket, ResponseTimeClassifier, StatusClass,
    StatusClassifier,
};
pub use parse::{MalformedPayload, RecordError, parse_logs_payload, parse_record};
pub use render::{render_charts, render_json};
pub use types::{LogRecord, ServerId, Timestamp};
