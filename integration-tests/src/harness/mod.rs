pub mod mock_api;
pub mod tracing;

pub use mock_api::{CannedResponse, MockApi, RecordedRequest, closed_port_url};
pub use self::tracing::{CapturedEvent, captured_events, init_test_tracing};
