use crate::logs::{Aggregator, LogRecord, Timestamp, render_charts, render_json};

fn records() -> Vec<LogRecord> {
    let ts = |s: &str| Some(Timestamp::Text(s.to_string()));
    vec![
        LogRecord::new(1, 200, "GET", 150.0, ts("2024-01-01T00:00:00Z")),
        LogRecord::new(1, 404, "GET", 600.0, ts("2024-01-01T00:00:00Z")),
        LogRecord::new(2, 200, "POST", 300.0, ts("2024-01-02T00:00:00Z")),
    ]
}

#[test]
fn charts_list_every_section() {
    let result = Aggregator::default().aggregate(&records());

    let out = render_charts(&result);

    assert!(out.contains("records: 3 | skipped: 0 | undated: 0"));
    assert!(out.contains("Response status:"));
    assert!(out.contains("Response times:"));
    assert!(out.contains("Activity by date:"));
    assert!(out.contains("HTTP methods:"));
    assert!(out.contains("server1"));
    assert!(out.contains("2024-01-02"));
    assert!(out.contains("█"));
}

#[test]
fn empty_sections_say_so() {
    let result = Aggregator::default().aggregate(&Vec::<LogRecord>::new());

    let out = render_charts(&result);

    assert_eq!(out.matches("<no data>").count(), 4);
}

#[test]
fn json_rendering_is_stable() {
    let result = Aggregator::default().aggregate(&records());

    let a = render_json(&result).unwrap();
    let b = render_json(&Aggregator::default().aggregate(&records())).unwrap();

    assert_eq!(a, b);
    assert!(a.contains("\"server2\""));
}
