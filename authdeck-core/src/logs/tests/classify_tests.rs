use crate::logs::{
    BucketCounter, Classifier, LogRecord, ResponseTimeBucket, ResponseTimeClassifier, ServerId,
    StatusClass,
};

#[test]
fn response_time_boundaries() {
    assert_eq!(ResponseTimeBucket::from_millis(0.0), ResponseTimeBucket::Fast);
    assert_eq!(ResponseTimeBucket::from_millis(199.9), ResponseTimeBucket::Fast);
    assert_eq!(ResponseTimeBucket::from_millis(200.0), ResponseTimeBucket::Medium);
    assert_eq!(ResponseTimeBucket::from_millis(500.0), ResponseTimeBucket::Medium);
    assert_eq!(ResponseTimeBucket::from_millis(500.5), ResponseTimeBucket::Slow);
    assert_eq!(ResponseTimeBucket::from_millis(501.0), ResponseTimeBucket::Slow);
}

#[test]
fn every_response_time_lands_in_exactly_one_bucket() {
    // Arrange
    let mut counter = BucketCounter::new(ResponseTimeClassifier);
    let samples: Vec<f64> = (0..=1200).map(|ms| ms as f64 * 0.75).collect();

    // Act
    for ms in &samples {
        assert!(counter.record(&LogRecord::new(1, 200, "GET", *ms, None)));
    }

    // Assert
    assert_eq!(counter.total(), samples.len() as u64);
}

#[test]
fn status_classes() {
    for code in [200, 201, 204] {
        assert_eq!(StatusClass::from_status(code), Some(StatusClass::Info));
    }
    for code in [300, 301, 302] {
        assert_eq!(StatusClass::from_status(code), Some(StatusClass::Warn));
    }
    for code in [400, 404, 418, 500, 503, 999] {
        assert_eq!(StatusClass::from_status(code), Some(StatusClass::Error));
    }
    for code in [0, 100, 202, 203, 206, 303, 304, 307, 399] {
        assert_eq!(StatusClass::from_status(code), None, "status {code}");
    }
}

struct EvenStatus;

impl Classifier for EvenStatus {
    type Bucket = &'static str;

    fn classify(&self, record: &LogRecord) -> Option<&'static str> {
        (record.status % 2 == 0).then_some("even")
    }
}

#[test]
fn bucket_counter_partitions_by_server() {
    // Arrange
    let mut counter = BucketCounter::new(EvenStatus);

    // Act
    counter.record(&LogRecord::new(1, 200, "GET", 1.0, None));
    counter.record(&LogRecord::new(2, 200, "GET", 1.0, None));
    counter.record(&LogRecord::new(2, 404, "GET", 1.0, None));
    let matched = counter.record(&LogRecord::new(2, 201, "GET", 1.0, None));
    let table = counter.into_table();

    // Assert
    assert!(!matched);
    assert_eq!(table[&ServerId::Number(1)]["even"], 1);
    assert_eq!(table[&ServerId::Number(2)]["even"], 2);
}
