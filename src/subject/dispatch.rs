//! # Per-observer delivery and the dispatch report.
//!
//! Every notify operation (`broadcast`, `multicast`, `whisper`) funnels each
//! target through [`deliver`], which picks the entry point from the payload
//! state at that moment and isolates the outcome.
//!
//! ## Architecture
//! ```text
//! notify op
//!     │
//!     ├──► deliver(obs1) ──► receive_payload(&T) | receive()
//!     │         └──────────► Err / panic → NotifyError (logged, recorded)
//!     ├──► deliver(obs2) ...
//!     └──► deliver(obsN) ...
//!                 │
//!                 ▼
//!          DispatchReport { deliveries }
//! ```
//!
//! ## Rules
//! - **Isolation**: a failing or panicking observer never stops the batch.
//! - **No propagation**: failures are recorded, never returned as `Err`.
//! - **No retry**: each target is attempted exactly once per operation.
//!
//! **Warning**: panics are caught with `AssertUnwindSafe`; an observer that
//! panics while holding a lock may leave its own state inconsistent.

use std::panic::{self, AssertUnwindSafe};

use crate::config::SubjectConfig;
use crate::error::{NotifyError, ReceiveError};
use crate::observers::ObserverRef;

/// Outcome of one delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    /// Name of the target observer.
    pub observer: &'static str,
    /// `true` if `receive_payload` was called, `false` for `receive`.
    pub with_payload: bool,
    /// `Ok` if the observer handled the notification.
    pub outcome: Result<(), NotifyError>,
}

impl Delivery {
    /// True if the observer handled the notification.
    #[inline]
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Record of a single notify operation.
///
/// Ignoring it is fine: failures were already logged (unless disabled via
/// [`SubjectConfig::log_failures`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    deliveries: Vec<Delivery>,
}

impl DispatchReport {
    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            deliveries: Vec::with_capacity(n),
        }
    }

    pub(crate) fn push(&mut self, delivery: Delivery) {
        self.deliveries.push(delivery);
    }

    /// All deliveries in the order they were attempted.
    pub fn deliveries(&self) -> &[Delivery] {
        &self.deliveries
    }

    /// Number of observers targeted.
    pub fn attempted(&self) -> usize {
        self.deliveries.len()
    }

    /// Number of observers that handled the notification.
    pub fn delivered(&self) -> usize {
        self.deliveries.iter().filter(|d| d.is_ok()).count()
    }

    /// Number of failed deliveries.
    pub fn failed(&self) -> usize {
        self.attempted() - self.delivered()
    }

    /// True if nothing failed (also true for an empty dispatch).
    pub fn is_clean(&self) -> bool {
        self.deliveries.iter().all(Delivery::is_ok)
    }

    /// Failed deliveries.
    pub fn failures(&self) -> impl Iterator<Item = &NotifyError> {
        self.deliveries
            .iter()
            .filter_map(|d| d.outcome.as_ref().err())
    }

    /// Consumes the report, keeping only the failures.
    pub fn into_failures(self) -> Vec<NotifyError> {
        self.deliveries
            .into_iter()
            .filter_map(|d| d.outcome.err())
            .collect()
    }
}

/// Delivers the given payload state to one observer.
///
/// `payload` must be read by the caller right before this call so each
/// observer sees the state as of its own delivery.
pub(crate) fn deliver<T: 'static>(
    observer: &ObserverRef<T>,
    payload: Option<&T>,
    cfg: &SubjectConfig,
) -> Delivery {
    let call = || match payload {
        Some(p) => observer.receive_payload(p),
        None => observer.receive(),
    };

    let result: Result<Result<(), ReceiveError>, String> = if cfg.isolate_panics {
        panic::catch_unwind(AssertUnwindSafe(call)).map_err(|panic_err| {
            let any = &*panic_err;
            if let Some(msg) = any.downcast_ref::<&'static str>() {
                (*msg).to_string()
            } else if let Some(msg) = any.downcast_ref::<String>() {
                msg.clone()
            } else {
                "unknown panic".to_string()
            }
        })
    } else {
        Ok(call())
    };

    let name = observer.name();
    let outcome = match result {
        Ok(Ok(())) => Ok(()),
        Ok(Err(source)) => Err(NotifyError::Failed {
            observer: name,
            source,
        }),
        Err(info) => Err(NotifyError::Panicked {
            observer: name,
            info,
        }),
    };

    if let Err(err) = &outcome {
        if cfg.log_failures {
            tracing::warn!(
                observer = name,
                label = err.as_label(),
                "observer notification failed: {}",
                err.as_message()
            );
        }
    }

    Delivery {
        observer: name,
        with_payload: payload.is_some(),
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::Observer;

    struct Flaky;

    impl Observer<i32> for Flaky {
        fn receive(&self) -> Result<(), ReceiveError> {
            Err(ReceiveError::rejected("needs a value"))
        }
        fn receive_payload(&self, v: &i32) -> Result<(), ReceiveError> {
            if *v < 0 {
                panic!("negative: {v}");
            }
            Ok(())
        }
        fn name(&self) -> &'static str {
            "flaky"
        }
    }

    fn flaky() -> ObserverRef<i32> {
        Arc::new(Flaky)
    }

    #[test]
    fn test_deliver_ok_with_payload() {
        let d = deliver(&flaky(), Some(&1), &SubjectConfig::default());
        assert!(d.is_ok());
        assert!(d.with_payload);
        assert_eq!(d.observer, "flaky");
    }

    #[test]
    fn test_deliver_captures_error() {
        let d = deliver(&flaky(), None, &SubjectConfig::default());
        assert!(!d.with_payload);
        assert_eq!(
            d.outcome,
            Err(NotifyError::Failed {
                observer: "flaky",
                source: ReceiveError::rejected("needs a value"),
            })
        );
    }

    #[test]
    fn test_deliver_captures_panic_message() {
        let d = deliver(&flaky(), Some(&-3), &SubjectConfig::default());
        match d.outcome {
            Err(NotifyError::Panicked { observer, info }) => {
                assert_eq!(observer, "flaky");
                assert_eq!(info, "negative: -3");
            }
            other => panic!("expected panic outcome, got {other:?}"),
        }
    }

    #[test]
    #[should_panic(expected = "negative")]
    fn test_deliver_without_isolation_unwinds() {
        let cfg = SubjectConfig {
            isolate_panics: false,
            ..SubjectConfig::default()
        };
        let _ = deliver(&flaky(), Some(&-1), &cfg);
    }

    #[test]
    fn test_report_counts() {
        let cfg = SubjectConfig {
            log_failures: false,
            ..SubjectConfig::default()
        };
        let mut report = DispatchReport::with_capacity(3);
        report.push(deliver(&flaky(), Some(&1), &cfg));
        report.push(deliver(&flaky(), None, &cfg));
        report.push(deliver(&flaky(), Some(&-1), &cfg));

        assert_eq!(report.attempted(), 3);
        assert_eq!(report.delivered(), 1);
        assert_eq!(report.failed(), 2);
        assert!(!report.is_clean());

        let labels: Vec<_> = report.failures().map(NotifyError::as_label).collect();
        assert_eq!(labels, vec!["notify_failed", "notify_panicked"]);
        assert_eq!(report.into_failures().len(), 2);
    }

    #[test]
    fn test_empty_report_is_clean() {
        let report = DispatchReport::default();
        assert!(report.is_clean());
        assert_eq!(report.attempted(), 0);
    }
}
