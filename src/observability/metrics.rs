//! Metrics collection.
//!
//! # Metrics
//! - `router_dispatch_total` (counter): dispatches by outcome
//!   (`rejected`, `completed`, `fallback`, or an error label)
//! - `router_dispatch_duration_seconds` (histogram): acceptance to outcome
//! - `router_proxy_invocations_total` (counter): proxies invoked
//! - `router_table_entries` (gauge): registered entries
//!
//! # Design Decisions
//! - Recorded through the `metrics` facade; the embedding application
//!   installs whichever recorder/exporter it uses

use std::time::Instant;

use metrics::{counter, gauge, histogram};

pub fn record_dispatch(outcome: &'static str, accepted_at: Instant) {
    counter!("router_dispatch_total", "outcome" => outcome).increment(1);
    histogram!("router_dispatch_duration_seconds", "outcome" => outcome)
        .record(accepted_at.elapsed().as_secs_f64());
}

pub fn record_rejected() {
    counter!("router_dispatch_total", "outcome" => "rejected").increment(1);
}

pub fn record_proxy_invocation() {
    counter!("router_proxy_invocations_total").increment(1);
}

pub fn record_table_size(entries: usize) {
    gauge!("router_table_entries").set(entries as f64);
}
