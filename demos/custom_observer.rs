//! # Example: custom_observer
//!
//! Demonstrates failure isolation and the [`DispatchReport`].
//!
//! Shows how to:
//! - Return [`ReceiveError`] from an observer.
//! - Keep delivering after an observer panics.
//! - Inspect [`NotifyError`]s in the report instead of handling an `Err`.
//!
//! ## Run
//! ```bash
//! RUST_LOG=warn cargo run --example custom_observer
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use herald::{
    DispatchReport, NotifyError, Observer, ObserverRef, ReceiveError, Subject, SubjectConfig,
};
use tracing_subscriber::EnvFilter;

/// Sums every reading it receives.
#[derive(Default)]
struct Totals {
    sum: AtomicU64,
    readings: AtomicU64,
}

impl Observer<u64> for Totals {
    fn receive(&self) -> Result<(), ReceiveError> {
        Err(ReceiveError::rejected("no reading available"))
    }

    fn receive_payload(&self, value: &u64) -> Result<(), ReceiveError> {
        self.sum.fetch_add(*value, Ordering::Relaxed);
        self.readings.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "totals"
    }
}

/// Accepts readings up to a limit, panics beyond it.
struct Gauge {
    limit: u64,
}

impl Observer<u64> for Gauge {
    fn receive(&self) -> Result<(), ReceiveError> {
        Ok(())
    }

    fn receive_payload(&self, value: &u64) -> Result<(), ReceiveError> {
        if *value > self.limit {
            panic!("gauge overflow: {value} > {}", self.limit);
        }
        if *value == 0 {
            return Err(ReceiveError::fail("zero reading"));
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "gauge"
    }
}

fn summarize(step: &str, report: &DispatchReport) {
    println!(
        "[{step}] attempted={} delivered={} failed={}",
        report.attempted(),
        report.delivered(),
        report.failed()
    );
    for err in report.failures() {
        match err {
            NotifyError::Failed { observer, source } => {
                println!("   └─► {observer}: {}", source.as_message());
            }
            NotifyError::Panicked { observer, info } => {
                println!("   └─► {observer}: panicked ({info})");
            }
            other => println!("   └─► {other}"),
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let totals = Arc::new(Totals::default());
    let totals_ref: ObserverRef<u64> = totals.clone();
    let gauge: ObserverRef<u64> = Arc::new(Gauge { limit: 100 });

    let mut subject = Subject::builder()
        .observers([totals_ref, gauge])
        .config(SubjectConfig {
            initial_capacity: 2,
            ..SubjectConfig::default()
        })
        .build();

    for (step, value) in [("ok", Some(40)), ("zero", Some(0)), ("overflow", Some(500)), ("empty", None)] {
        match value {
            Some(v) => subject.set_payload(v),
            None => subject.clear_payload(),
        }
        summarize(step, &subject.broadcast());
    }

    println!(
        "\ntotals: sum={} readings={}",
        totals.sum.load(Ordering::Relaxed),
        totals.readings.load(Ordering::Relaxed)
    );
}
