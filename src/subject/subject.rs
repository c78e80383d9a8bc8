//! # Subject: payload holder and notification dispatcher.
//!
//! [`Subject`] owns an optional payload and an identity-keyed set of observer
//! handles, and notifies them on demand:
//!
//! | Operation            | Targets                                   |
//! |----------------------|-------------------------------------------|
//! | [`Subject::broadcast`] | every attached observer                 |
//! | [`Subject::multicast`] | every attached observer not in `exclude` |
//! | [`Subject::whisper`]   | one observer, attached or not           |
//!
//! Setting the payload never notifies; notification is always explicit.
//!
//! ## Delivery
//! ```text
//! for obs in targets (unspecified order):
//!     payload = self.payload          (read per observer)
//!     Some(p) → obs.receive_payload(p)
//!     None    → obs.receive()
//!     failure → logged + recorded in DispatchReport
//! ```
//!
//! ## Example
//! ```
//! use std::sync::Arc;
//! use herald::{Observer, ObserverRef, ReceiveError, Subject};
//!
//! struct Printer;
//!
//! impl Observer<String> for Printer {
//!     fn receive(&self) -> Result<(), ReceiveError> { Ok(()) }
//!     fn receive_payload(&self, p: &String) -> Result<(), ReceiveError> {
//!         println!("got {p}");
//!         Ok(())
//!     }
//! }
//!
//! let a: ObserverRef<String> = Arc::new(Printer);
//! let b: ObserverRef<String> = Arc::new(Printer);
//!
//! let mut subject = Subject::with_observers(Some("v1".to_string()), [a.clone(), b.clone()]);
//! assert_eq!(subject.count_observers(), 2);
//!
//! let report = subject.multicast(&[b]);
//! assert_eq!(report.delivered(), 1);
//!
//! subject.clear_payload();
//! assert!(subject.broadcast().is_clean());
//! ```

use std::fmt;

use crate::config::SubjectConfig;
use crate::observers::ObserverRef;

use super::builder::SubjectBuilder;
use super::dispatch::{deliver, DispatchReport};
use super::set::ObserverSet;

/// Holder of a payload and a set of observers.
///
/// ### Rules
/// - Observers are compared by identity (`Arc` allocation), never by value.
/// - Attaching an already attached observer is a no-op.
/// - Delivery order across observers is unspecified.
/// - Observer failures never reach the caller (see [`DispatchReport`]).
/// - Observers must be `Send + Sync` even though `Subject` itself is used from
///   one thread at a time (see [`Observer`](crate::Observer#thread-safety)).
pub struct Subject<T> {
    payload: Option<T>,
    observers: ObserverSet<T>,
    config: SubjectConfig,
}

impl<T: 'static> Subject<T> {
    /// Creates a subject with no payload, no observers and default config.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(SubjectConfig::default())
    }

    /// Creates an empty subject with the given configuration.
    #[must_use]
    pub fn with_config(config: SubjectConfig) -> Self {
        Self {
            payload: None,
            observers: ObserverSet::with_capacity(config.capacity_hint()),
            config,
        }
    }

    /// Creates a subject holding `payload` and no observers.
    #[must_use]
    pub fn with_payload(payload: T) -> Self {
        let mut subject = Self::new();
        subject.payload = Some(payload);
        subject
    }

    /// Creates a subject with an optional payload and one observer.
    #[must_use]
    pub fn with_observer(payload: Option<T>, observer: ObserverRef<T>) -> Self {
        Self::with_observers(payload, [observer])
    }

    /// Creates a subject with an optional payload and several observers.
    ///
    /// Duplicates (by identity) are collapsed.
    #[must_use]
    pub fn with_observers<I>(payload: Option<T>, observers: I) -> Self
    where
        I: IntoIterator<Item = ObserverRef<T>>,
    {
        let mut subject = Self::new();
        subject.payload = payload;
        subject.attach_many(observers);
        subject
    }

    /// Returns a builder for a subject with custom configuration.
    #[must_use]
    pub fn builder() -> SubjectBuilder<T> {
        SubjectBuilder::new()
    }

    /// Active configuration.
    pub fn config(&self) -> &SubjectConfig {
        &self.config
    }

    // ---- Observer set ----

    /// Attaches one observer.
    ///
    /// Returns `false` (and changes nothing) if it is already attached.
    pub fn attach(&mut self, observer: ObserverRef<T>) -> bool {
        self.observers.insert(observer)
    }

    /// Attaches every observer of `observers`, skipping ones already present.
    ///
    /// Returns how many were newly attached.
    pub fn attach_many<I>(&mut self, observers: I) -> usize
    where
        I: IntoIterator<Item = ObserverRef<T>>,
    {
        let mut added = 0;
        for observer in observers {
            if self.observers.insert(observer) {
                added += 1;
            }
        }
        added
    }

    /// Detaches `observer` if attached. Returns whether it was removed.
    pub fn detach(&mut self, observer: &ObserverRef<T>) -> bool {
        self.observers.remove(observer)
    }

    /// Detaches every observer.
    pub fn clear_observers(&mut self) {
        self.observers.clear();
    }

    /// Number of attached observers.
    pub fn count_observers(&self) -> usize {
        self.observers.len()
    }

    /// True if `observer` (this exact handle's allocation) is attached.
    pub fn contains_observer(&self, observer: &ObserverRef<T>) -> bool {
        self.observers.contains(observer)
    }

    /// True if at least one observer is attached.
    pub fn have_observer(&self) -> bool {
        !self.observers.is_empty()
    }

    /// Cloned handles of the attached observers, in unspecified order.
    pub fn observers(&self) -> Vec<ObserverRef<T>> {
        self.observers.snapshot()
    }

    /// Cloned handles of the attached observers not in `exclude`.
    pub(super) fn observers_except(&self, exclude: &[ObserverRef<T>]) -> Vec<ObserverRef<T>> {
        self.observers.iter_except(exclude).cloned().collect()
    }

    // ---- Payload ----

    /// Current payload, if any.
    pub fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }

    /// Replaces the payload. Does **not** notify.
    pub fn set_payload(&mut self, payload: T) {
        self.payload = Some(payload);
    }

    /// Drops the payload. Does **not** notify.
    pub fn clear_payload(&mut self) {
        self.payload = None;
    }

    /// Removes and returns the payload. Does **not** notify.
    pub fn take_payload(&mut self) -> Option<T> {
        self.payload.take()
    }

    /// True if a payload is present.
    pub fn have_payload(&self) -> bool {
        self.payload.is_some()
    }

    // ---- Notification ----

    /// Notifies every attached observer.
    ///
    /// No-op (empty report) when nothing is attached.
    pub fn broadcast(&self) -> DispatchReport {
        self.dispatch(self.observers.len(), self.observers.iter())
    }

    /// Notifies every attached observer except those in `exclude`.
    ///
    /// Exclusions are matched by identity; entries that are not attached are
    /// ignored. An empty `exclude` behaves like [`broadcast`](Self::broadcast).
    pub fn multicast(&self, exclude: &[ObserverRef<T>]) -> DispatchReport {
        if exclude.is_empty() {
            return self.broadcast();
        }
        self.dispatch(self.observers.len(), self.observers.iter_except(exclude))
    }

    /// Notifies every attached observer except `exclude`.
    ///
    /// Shorthand for `multicast(std::slice::from_ref(exclude))`.
    pub fn multicast_except(&self, exclude: &ObserverRef<T>) -> DispatchReport {
        self.multicast(std::slice::from_ref(exclude))
    }

    /// Notifies exactly `observer`, whether or not it is attached.
    pub fn whisper(&self, observer: &ObserverRef<T>) -> DispatchReport {
        self.dispatch(1, std::iter::once(observer))
    }

    fn dispatch<'a, I>(&'a self, capacity: usize, targets: I) -> DispatchReport
    where
        I: Iterator<Item = &'a ObserverRef<T>>,
        T: 'a,
    {
        let mut report = DispatchReport::with_capacity(capacity);
        for observer in targets {
            report.push(deliver(observer, self.payload.as_ref(), &self.config));
        }
        tracing::trace!(
            attempted = report.attempted(),
            failed = report.failed(),
            "dispatch finished"
        );
        report
    }
}

impl<T: 'static> Default for Subject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Subject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subject")
            .field("payload", &self.payload)
            .field("observer_count", &self.observers.len())
            .field("config", &self.config)
            .finish()
    }
}
