use crate::api::{ApiError, LogSource, endpoints};
use crate::config::{ClientConfig, FetchPolicy};
use crate::logs::{AggregationResult, Aggregator, render_charts};
use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// What the dashboard currently displays. Replaced wholesale, never mutated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub result: Option<Arc<AggregationResult>>,
    /// Time of the last successful fetch.
    pub fetched_at: Option<DateTime<Utc>>,
    /// Notice from the last failed fetch; cleared by the next success.
    pub last_error: Option<String>,
    pub generation: u64,
}

impl DashboardState {
    pub fn has_data(&self) -> bool {
        self.result.as_ref().is_some_and(|r| !r.is_empty())
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        if let Some(err) = &self.last_error {
            out.push_str(&format!("error: {err}\n\n"));
        }

        match &self.result {
            Some(result) => out.push_str(&render_charts(result)),
            None => out.push_str("<no data yet>\n"),
        }

        if let Some(at) = self.fetched_at {
            out.push_str(&format!("updated {}\n", at.format("%Y-%m-%d %H:%M:%S UTC")));
        }

        out
    }
}

pub struct Dashboard<S> {
    source: S,
    aggregator: Aggregator,
    policy: FetchPolicy,
    state: ArcSwap<DashboardState>,
    generation: AtomicU64,
}

impl<S: LogSource> Dashboard<S> {
    pub fn new(source: S, aggregator: Aggregator, policy: FetchPolicy) -> Self {
        Self {
            source,
            aggregator,
            policy,
            state: ArcSwap::from_pointee(DashboardState::default()),
            generation: AtomicU64::new(0),
        }
    }

    pub fn from_config(source: S, cfg: &ClientConfig) -> Self {
        Self::new(source, Aggregator::new(&cfg.aggregation_options()), cfg.fetch_policy)
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn snapshot(&self) -> Arc<DashboardState> {
        self.state.load_full()
    }

    /// Fetch, aggregate and swap in a new state.
    ///
    /// On failure the state still changes: `last_error` is set and the
    /// previous tables are kept or dropped according to the [`FetchPolicy`].
    /// A batch in which every record was malformed counts as a failure.
    /// Overlapping calls store in completion order.
    pub async fn refresh(&self) -> Result<Arc<DashboardState>, ApiError> {
        let fetched = self
            .source
            .fetch_logs()
            .await
            .and_then(|raw| self.aggregate(&raw));
        let prev = self.state.load_full();
        let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;

        match fetched {
            Ok(result) => {
                let keep_previous = result.is_empty()
                    && self.policy == FetchPolicy::Retain
                    && prev.result.is_some();

                let next = if keep_previous {
                    tracing::info!(generation, "empty fetch, keeping previous tables");
                    DashboardState {
                        result: prev.result.clone(),
                        fetched_at: prev.fetched_at,
                        last_error: None,
                        generation,
                    }
                } else {
                    tracing::info!(
                        generation,
                        records = result.total,
                        skipped = result.skipped,
                        undated = result.undated,
                        "dashboard refreshed"
                    );
                    DashboardState {
                        result: Some(Arc::new(result)),
                        fetched_at: Some(Utc::now()),
                        last_error: None,
                        generation,
                    }
                };

                let next = Arc::new(next);
                self.state.store(Arc::clone(&next));
                Ok(next)
            }

            Err(err) => {
                tracing::warn!(generation, error = %err, "dashboard refresh failed");

                let result = match self.policy {
                    FetchPolicy::Retain => prev.result.clone(),
                    FetchPolicy::Clear => None,
                };

                self.state.store(Arc::new(DashboardState {
                    result,
                    fetched_at: prev.fetched_at,
                    last_error: Some(err.user_message()),
                    generation,
                }));
                Err(err)
            }
        }
    }

    fn aggregate(&self, raw: &[Value]) -> Result<AggregationResult, ApiError> {
        let result = self.aggregator.aggregate_raw(raw);
        if result.total == 0 && result.skipped > 0 {
            return Err(ApiError::Malformed {
                endpoint: endpoints::GET_SERVER.to_string(),
                reason: format!("all {} log records are malformed", result.skipped),
            });
        }
        Ok(result)
    }
}
