use crate::logs::types::{LogRecord, ServerId};
use std::collections::BTreeMap;

/// Per-server counts keyed by bucket label.
pub type Table<B> = BTreeMap<ServerId, BTreeMap<B, u64>>;

/// Maps a record onto one bucket, or none when it does not belong in the table.
pub trait Classifier {
    type Bucket: Ord + Clone;

    fn classify(&self, record: &LogRecord) -> Option<Self::Bucket>;
}

/// The single bucket-and-count routine behind every dashboard table.
pub struct BucketCounter<C: Classifier> {
    classifier: C,
    counts: Table<C::Bucket>,
}

impl<C: Classifier> BucketCounter<C> {
    pub fn new(classifier: C) -> Self {
        Self {
            classifier,
            counts: BTreeMap::new(),
        }
    }

    /// Count `record`; returns whether a bucket matched.
    pub fn record(&mut self, record: &LogRecord) -> bool {
        let Some(bucket) = self.classifier.classify(record) else {
            return false;
        };

        *self
            .counts
            .entry(record.server.clone())
            .or_default()
            .entry(bucket)
            .or_insert(0) += 1;
        true
    }

    pub fn total(&self) -> u64 {
        self.counts.values().flat_map(BTreeMap::values).sum()
    }

    pub fn into_table(self) -> Table<C::Bucket> {
        self.counts
    }
}
