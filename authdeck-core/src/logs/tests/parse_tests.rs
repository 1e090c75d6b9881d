use crate::logs::{
    MalformedPayload, RecordError, ServerId, Timestamp, parse_logs_payload, parse_record,
};
use chrono::NaiveDate;
use serde_json::json;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn parses_a_complete_record() {
    // Arrange
    let value = json!({
        "server": 2,
        "status": 201,
        "method": " post ",
        "responseTime": 12.5,
        "timestamp": "2024-02-29T23:30:00Z"
    });

    // Act
    let record = parse_record(&value).unwrap();

    // Assert
    assert_eq!(record.server, ServerId::Number(2));
    assert_eq!(record.status, 201);
    assert_eq!(record.method, "POST");
    assert_eq!(record.response_time_ms, 12.5);
    assert_eq!(record.utc_date(), Some(date("2024-02-29")));
}

#[test]
fn accepts_numeric_strings() {
    let value = json!({"server": "1", "status": "404", "method": "GET", "responseTime": "250"});

    let record = parse_record(&value).unwrap();

    assert_eq!(record.server, ServerId::Number(1));
    assert_eq!(record.status, 404);
    assert_eq!(record.response_time_ms, 250.0);
    assert_eq!(record.timestamp, None);
}

#[test]
fn epoch_structure_is_normalized_to_utc_date() {
    // 2024-01-01T23:59:59Z
    let value = json!({
        "server": 1, "status": 200, "method": "GET", "responseTime": 1,
        "timestamp": {"_seconds": 1704153599, "_nanoseconds": 999000000}
    });

    let record = parse_record(&value).unwrap();

    assert_eq!(
        record.timestamp,
        Some(Timestamp::Epoch {
            seconds: 1704153599,
            nanos: 999000000
        })
    );
    assert_eq!(record.utc_date(), Some(date("2024-01-01")));
}

#[test]
fn alternate_epoch_shapes() {
    let seconds_nanos = Timestamp::Epoch {
        seconds: 1704153600,
        nanos: 0,
    };
    assert_eq!(seconds_nanos.utc_date(), Some(date("2024-01-02")));

    let value = json!({
        "server": 1, "status": 200, "method": "GET", "responseTime": 1,
        "timestamp": {"seconds": 1704153600}
    });
    assert_eq!(
        parse_record(&value).unwrap().utc_date(),
        Some(date("2024-01-02"))
    );

    let bare = json!({
        "server": 1, "status": 200, "method": "GET", "responseTime": 1,
        "timestamp": 1704153600
    });
    assert_eq!(
        parse_record(&bare).unwrap().utc_date(),
        Some(date("2024-01-02"))
    );
}

#[test]
fn offset_timestamps_are_converted_to_utc_before_bucketing() {
    let ts = Timestamp::Text("2024-01-01T22:00:00-05:00".to_string());

    assert_eq!(ts.utc_date(), Some(date("2024-01-02")));
}

#[test]
fn naive_iso_strings_are_read_as_utc() {
    let ts = Timestamp::Text("2024-05-10T08:15:00.123".to_string());

    assert_eq!(ts.utc_date(), Some(date("2024-05-10")));
}

#[test]
fn unusable_timestamps_are_kept_as_undated() {
    for ts in [json!(null), json!(true), json!(""), json!({"nope": 1})] {
        let value = json!({
            "server": 1, "status": 200, "method": "GET", "responseTime": 1, "timestamp": ts
        });

        let record = parse_record(&value).unwrap();

        assert_eq!(record.utc_date(), None);
    }
}

#[test]
fn named_servers_are_kept() {
    let named = json!({"server": " edge-a ", "status": 200, "method": "GET", "responseTime": 5});
    let blank = json!({"server": " ", "status": 200, "method": "GET", "responseTime": 5});

    assert_eq!(
        parse_record(&named).unwrap().server,
        ServerId::Name("edge-a".to_string())
    );
    assert!(matches!(
        parse_record(&blank),
        Err(RecordError::InvalidField {
            field: "server",
            ..
        })
    ));
}

#[test]
fn structural_errors_are_reported() {
    assert_eq!(parse_record(&json!([1, 2])), Err(RecordError::NotAnObject));
    assert_eq!(
        parse_record(&json!({"status": 200, "method": "GET", "responseTime": 1})),
        Err(RecordError::MissingField("server"))
    );
    assert!(matches!(
        parse_record(&json!({"server": -1, "status": 200, "method": "GET", "responseTime": 1})),
        Err(RecordError::InvalidField {
            field: "server",
            ..
        })
    ));
    assert!(matches!(
        parse_record(&json!({"server": 1, "status": 200, "method": "", "responseTime": 1})),
        Err(RecordError::InvalidField {
            field: "method",
            ..
        })
    ));
    assert!(matches!(
        parse_record(&json!({"server": 1, "status": 200, "method": "GET", "responseTime": "slow"})),
        Err(RecordError::InvalidField {
            field: "responseTime",
            ..
        })
    ));
}

#[test]
fn payload_requires_a_logs_array() {
    let ok = json!({"logs": [{"server": 1}]});
    assert_eq!(parse_logs_payload(&ok).map(<[_]>::len), Ok(1));

    assert_eq!(
        parse_logs_payload(&json!({"data": []})),
        Err(MalformedPayload("`logs` is missing"))
    );
    assert_eq!(
        parse_logs_payload(&json!({"logs": "none"})),
        Err(MalformedPayload("`logs` is not an array"))
    );
    assert_eq!(
        parse_logs_payload(&json!([])),
        Err(MalformedPayload("body is not a JSON object"))
    );
}
