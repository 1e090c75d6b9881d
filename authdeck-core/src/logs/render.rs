use crate::logs::aggregation::{AggregationResult, DailySeries};
use crate::logs::bucket::Table;
use crate::logs::constants::BAR_WIDTH;
use std::fmt::Display;

pub fn render_charts(result: &AggregationResult) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Monitoring Dashboard\n\
         ====================\n\
         records: {} | skipped: {} | undated: {}\n\n",
        result.total, result.skipped, result.undated
    ));

    render_table(&mut out, "Response status", &result.status);
    render_table(&mut out, "Response times", &result.response_time);
    render_daily(&mut out, "Activity by date", &result.daily);
    render_table(&mut out, "HTTP methods", &result.methods);

    out
}

pub fn render_json(result: &AggregationResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}

fn bar(count: u64, max: u64) -> String {
    if count == 0 || max == 0 {
        return String::new();
    }
    let width = ((count as f64 / max as f64) * BAR_WIDTH as f64).round() as usize;
    "█".repeat(width.max(1))
}

fn render_table<B: Display>(out: &mut String, title: &str, table: &Table<B>) {
    out.push_str(title);
    out.push_str(":\n");

    let max = table
        .values()
        .flat_map(|buckets| buckets.values())
        .copied()
        .max()
        .unwrap_or(0);

    if max == 0 {
        out.push_str("  <no data>\n\n");
        return;
    }

    for (server, buckets) in table {
        for (label, count) in buckets {
            out.push_str(&format!(
                "  {:<8} {:<8} {:<width$} {:>5}\n",
                server.to_string(),
                label.to_string(),
                bar(*count, max),
                count,
                width = BAR_WIDTH
            ));
        }
    }
    out.push('\n');
}

fn render_daily(out: &mut String, title: &str, daily: &DailySeries) {
    out.push_str(title);
    out.push_str(":\n");

    if daily.is_empty() {
        out.push_str("  <no data>\n\n");
        return;
    }

    let max = daily
        .series
        .values()
        .flat_map(|values| values.iter())
        .copied()
        .max()
        .unwrap_or(0);

    for (i, date) in daily.dates.iter().enumerate() {
        for (server, values) in &daily.series {
            let count = values.get(i).copied().unwrap_or(0);
            out.push_str(&format!(
                "  {} {:<8} {:<width$} {:>5}\n",
                date,
                server.to_string(),
                bar(count, max),
                count,
                width = BAR_WIDTH
            ));
        }
    }
    out.push('\n');
}
