//! Log dashboard.
//!
//! Pipeline:
//! - fetch `GET /getServer` through a [`LogSource`](crate::api::LogSource)
//! - aggregate the raw records ([`crate::logs`])
//! - swap the new [`DashboardState`] in atomically
//!
//! [`spawn_periodic_refresh`] repeats the pipeline on a timer until its
//! [`RefreshHandle`] is cancelled or dropped.

mod refresh;
mod state;

#[cfg(test)]
mod tests;

pub use refresh::{RefreshHandle, spawn_periodic_refresh};
pub use state::{Dashboard, DashboardState};
