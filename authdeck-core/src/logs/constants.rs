pub const INFO_STATUSES: &[i64] = &[200, 201, 204];
pub const WARN_STATUSES: &[i64] = &[300, 301, 302];
pub const ERROR_STATUS_FLOOR: i64 = 400;

/// Upper bound (exclusive) of the `fast` bucket.
pub const FAST_BELOW_MS: f64 = 200.0;
/// Upper bound (inclusive) of the `medium` bucket.
pub const MEDIUM_UP_TO_MS: f64 = 500.0;

pub const OTHER_METHOD: &str = "OTHER";

pub const BAR_WIDTH: usize = 30;
