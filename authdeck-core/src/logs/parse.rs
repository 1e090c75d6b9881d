use crate::logs::types::{LogRecord, ServerId, Timestamp};
use serde_json::Value;
use thiserror::Error;

/// Why a single record was dropped before aggregation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("log record is not a JSON object")]
    NotAnObject,

    #[error("log record is missing `{0}`")]
    MissingField(&'static str),

    #[error("log record has an invalid `{field}`: {reason}")]
    InvalidField {
        field: &'static str,
        reason: &'static str,
    },
}

/// The response body did not have the `{ "logs": [...] }` shape.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("log response is malformed: {0}")]
pub struct MalformedPayload(pub &'static str);

/// Extract the `logs` array from a `/getServer` response body.
pub fn parse_logs_payload(body: &Value) -> Result<&[Value], MalformedPayload> {
    let Some(obj) = body.as_object() else {
        return Err(MalformedPayload("body is not a JSON object"));
    };

    match obj.get("logs") {
        Some(Value::Array(items)) => Ok(items.as_slice()),
        Some(_) => Err(MalformedPayload("`logs` is not an array")),
        None => Err(MalformedPayload("`logs` is missing")),
    }
}

pub fn parse_record(value: &Value) -> Result<LogRecord, RecordError> {
    let Some(obj) = value.as_object() else {
        return Err(RecordError::NotAnObject);
    };

    let server = obj
        .get("server")
        .ok_or(RecordError::MissingField("server"))
        .and_then(|v| {
            as_server_id(v).ok_or(RecordError::InvalidField {
                field: "server",
                reason: "expected a non-negative integer or a name",
            })
        })?;

    let status = obj
        .get("status")
        .ok_or(RecordError::MissingField("status"))
        .and_then(|v| {
            as_integer(v).ok_or(RecordError::InvalidField {
                field: "status",
                reason: "expected an integer status code",
            })
        })?;

    let method = obj
        .get("method")
        .ok_or(RecordError::MissingField("method"))?
        .as_str()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .ok_or(RecordError::InvalidField {
            field: "method",
            reason: "expected a non-empty string",
        })?;

    let response_time_ms = obj
        .get("responseTime")
        .ok_or(RecordError::MissingField("responseTime"))
        .and_then(|v| {
            as_float(v)
                .filter(|ms| ms.is_finite() && *ms >= 0.0)
                .ok_or(RecordError::InvalidField {
                    field: "responseTime",
                    reason: "expected a non-negative number",
                })
        })?;

    // A bad timestamp only keeps the record out of the daily table.
    let timestamp = obj.get("timestamp").and_then(parse_timestamp);

    Ok(LogRecord::for_server(
        server,
        status,
        method,
        response_time_ms,
        timestamp,
    ))
}

fn parse_timestamp(value: &Value) -> Option<Timestamp> {
    match value {
        Value::Object(obj) => {
            let seconds = obj
                .get("_seconds")
                .or_else(|| obj.get("seconds"))
                .and_then(as_integer)?;
            let nanos = obj
                .get("_nanoseconds")
                .or_else(|| obj.get("nanos"))
                .and_then(as_integer)
                .and_then(|n| u32::try_from(n).ok())
                .unwrap_or(0);
            Some(Timestamp::Epoch { seconds, nanos })
        }
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.floor() as i64))
            .map(|seconds| Timestamp::Epoch { seconds, nanos: 0 }),
        Value::String(s) if !s.trim().is_empty() => Some(Timestamp::Text(s.clone())),
        _ => None,
    }
}

/// Integers may arrive as JSON numbers or numeric strings.
fn as_server_id(value: &Value) -> Option<ServerId> {
    match value {
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) if s.trim().starts_with('-') => None,
        Value::String(s) => Some(ServerId::from(s.as_str())),
        other => as_integer(other)
            .and_then(|n| u32::try_from(n).ok())
            .map(ServerId::Number),
    }
}

fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && f.is_finite())
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn as_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
