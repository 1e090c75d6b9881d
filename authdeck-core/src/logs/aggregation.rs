use crate::logs::bucket::{BucketCounter, Table};
use crate::logs::classify::{
    DailyClassifier, MethodClassifier, ResponseTimeBucket, ResponseTimeClassifier, StatusClass,
    StatusClassifier,
};
use crate::logs::parse::parse_record;
use crate::logs::types::{LogRecord, ServerId};
use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Default)]
pub struct AggregationOptions {
    /// Methods outside this set are counted as `OTHER`. `None` keeps every method.
    pub known_methods: Option<Vec<String>>,
}

/// Requests per day on one date axis shared by every server.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DailySeries {
    pub dates: Vec<NaiveDate>,
    pub series: BTreeMap<ServerId, Vec<u64>>,
}

impl DailySeries {
    fn from_table(table: Table<NaiveDate>, servers: &BTreeSet<ServerId>) -> Self {
        let dates: Vec<NaiveDate> = table
            .values()
            .flat_map(BTreeMap::keys)
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let series = servers
            .iter()
            .map(|server| {
                let counts = table.get(server);
                let values = dates
                    .iter()
                    .map(|d| counts.and_then(|c| c.get(d)).copied().unwrap_or(0))
                    .collect();
                (server.clone(), values)
            })
            .collect();

        Self { dates, series }
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregationResult {
    pub status: Table<StatusClass>,
    pub response_time: Table<ResponseTimeBucket>,
    pub methods: Table<String>,
    pub daily: DailySeries,

    /// Records that made it into the tables.
    pub total: u64,
    /// Records dropped as malformed.
    pub skipped: u64,
    /// Records counted everywhere but the daily table.
    pub undated: u64,
}

impl AggregationResult {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

pub struct Aggregator {
    methods: MethodClassifier,
}

impl Aggregator {
    pub fn new(options: &AggregationOptions) -> Self {
        let methods = match &options.known_methods {
            Some(known) => MethodClassifier::with_known(known),
            None => MethodClassifier::default(),
        };
        Self { methods }
    }

    pub fn aggregate<'a, I>(&self, records: I) -> AggregationResult
    where
        I: IntoIterator<Item = &'a LogRecord>,
    {
        let mut status = BucketCounter::new(StatusClassifier);
        let mut response_time = BucketCounter::new(ResponseTimeClassifier);
        let mut methods = BucketCounter::new(self.methods.clone());
        let mut daily = BucketCounter::new(DailyClassifier);

        let mut servers = BTreeSet::new();
        let mut total = 0;
        let mut undated = 0;

        for record in records {
            servers.insert(record.server.clone());
            total += 1;

            status.record(record);
            response_time.record(record);
            methods.record(record);
            if !daily.record(record) {
                undated += 1;
            }
        }

        AggregationResult {
            status: status.into_table(),
            response_time: response_time.into_table(),
            methods: methods.into_table(),
            daily: DailySeries::from_table(daily.into_table(), &servers),
            total,
            skipped: 0,
            undated,
        }
    }

    /// Validate and aggregate raw JSON records, dropping the malformed ones.
    pub fn aggregate_raw(&self, values: &[Value]) -> AggregationResult {
        let mut skipped = 0;
        let records: Vec<LogRecord> = values
            .iter()
            .enumerate()
            .filter_map(|(index, value)| match parse_record(value) {
                Ok(record) => Some(record),
                Err(err) => {
                    tracing::debug!(index, error = %err, "skipping malformed log record");
                    skipped += 1;
                    None
                }
            })
            .collect();

        let mut result = self.aggregate(&records);
        result.skipped = skipped;

        tracing::debug!(
            total = result.total,
            skipped = result.skipped,
            undated = result.undated,
            "log records aggregated"
        );

        result
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new(&AggregationOptions::default())
    }
}
