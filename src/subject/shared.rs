//! # Thread-safe subject handle.
//!
//! [`SharedSubject`] wraps a [`Subject`] behind `Arc<RwLock<..>>` so several
//! threads can attach, detach, update the payload and notify concurrently.
//!
//! ## Architecture
//! ```text
//! broadcast()
//!     ├─► read lock ──► snapshot observer handles ──► unlock
//!     └─► for each handle:
//!           read lock ──► clone payload ──► unlock
//!           deliver(handle, payload)            (no lock held)
//! ```
//!
//! ## Rules
//! - **Snapshot iteration**: attach/detach never race with an in-progress
//!   dispatch; observers attached mid-dispatch are picked up by the next one.
//! - **Per-observer payload**: each observer sees the payload as of its own
//!   delivery, including changes made by observers notified before it.
//! - **Re-entrancy**: no lock is held while an observer runs, so observers may
//!   call back into the same `SharedSubject` (detach themselves, set payload).

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::SubjectConfig;
use crate::observers::ObserverRef;

use super::dispatch::{deliver, DispatchReport};
use super::subject::Subject;

/// Cloneable, thread-safe handle to a subject.
///
/// Cloning yields another handle to the **same** subject.
///
/// # Payload type
/// Membership and payload-update methods work for any `T: 'static`. The
/// notify methods ([`broadcast`](Self::broadcast), [`multicast`](Self::multicast),
/// [`whisper`](Self::whisper)) and [`payload`](Self::payload) additionally
/// require `T: Clone`: the payload is copied out of the lock before each
/// delivery so no lock is held while an observer runs. For payloads that are
/// not `Clone` or are expensive to copy, use `SharedSubject<Arc<T>>`; each
/// delivery then costs one reference-count increment.
pub struct SharedSubject<T> {
    inner: Arc<RwLock<Subject<T>>>,
}

impl<T> Clone for SharedSubject<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: 'static> From<Subject<T>> for SharedSubject<T> {
    fn from(subject: Subject<T>) -> Self {
        Self::new(subject)
    }
}

impl<T: 'static> Default for SharedSubject<T> {
    fn default() -> Self {
        Self::new(Subject::new())
    }
}

impl<T: 'static> SharedSubject<T> {
    /// Wraps `subject` for shared use.
    #[must_use]
    pub fn new(subject: Subject<T>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(subject)),
        }
    }

    /// Runs `f` with read access to the underlying subject.
    ///
    /// The read lock is held for the duration of `f`: calling a mutating
    /// method of this handle from inside `f` deadlocks.
    pub fn with<R>(&self, f: impl FnOnce(&Subject<T>) -> R) -> R {
        f(&self.inner.read())
    }

    /// See [`Subject::attach`].
    pub fn attach(&self, observer: ObserverRef<T>) -> bool {
        self.inner.write().attach(observer)
    }

    /// See [`Subject::attach_many`].
    pub fn attach_many<I>(&self, observers: I) -> usize
    where
        I: IntoIterator<Item = ObserverRef<T>>,
    {
        self.inner.write().attach_many(observers)
    }

    /// See [`Subject::detach`].
    pub fn detach(&self, observer: &ObserverRef<T>) -> bool {
        self.inner.write().detach(observer)
    }

    /// See [`Subject::clear_observers`].
    pub fn clear_observers(&self) {
        self.inner.write().clear_observers();
    }

    /// See [`Subject::count_observers`].
    pub fn count_observers(&self) -> usize {
        self.inner.read().count_observers()
    }

    /// See [`Subject::contains_observer`].
    pub fn contains_observer(&self, observer: &ObserverRef<T>) -> bool {
        self.inner.read().contains_observer(observer)
    }

    /// See [`Subject::have_observer`].
    pub fn have_observer(&self) -> bool {
        self.inner.read().have_observer()
    }

    /// See [`Subject::set_payload`]. Does **not** notify.
    pub fn set_payload(&self, payload: T) {
        self.inner.write().set_payload(payload);
    }

    /// See [`Subject::clear_payload`]. Does **not** notify.
    pub fn clear_payload(&self) {
        self.inner.write().clear_payload();
    }

    /// See [`Subject::take_payload`]. Does **not** notify.
    pub fn take_payload(&self) -> Option<T> {
        self.inner.write().take_payload()
    }

    /// See [`Subject::have_payload`].
    pub fn have_payload(&self) -> bool {
        self.inner.read().have_payload()
    }

    fn config(&self) -> SubjectConfig {
        self.inner.read().config().clone()
    }
}

impl<T: Clone + 'static> SharedSubject<T> {
    /// Clone of the current payload, if any.
    pub fn payload(&self) -> Option<T> {
        self.inner.read().payload().cloned()
    }

    /// Notifies every observer attached at the time of the call.
    pub fn broadcast(&self) -> DispatchReport {
        let targets = self.inner.read().observers();
        self.dispatch(targets)
    }

    /// Notifies every observer attached at the time of the call except those
    /// in `exclude` (matched by identity).
    pub fn multicast(&self, exclude: &[ObserverRef<T>]) -> DispatchReport {
        let targets = self.inner.read().observers_except(exclude);
        self.dispatch(targets)
    }

    /// Notifies every attached observer except `exclude`.
    pub fn multicast_except(&self, exclude: &ObserverRef<T>) -> DispatchReport {
        self.multicast(std::slice::from_ref(exclude))
    }

    /// Notifies exactly `observer`, whether or not it is attached.
    pub fn whisper(&self, observer: &ObserverRef<T>) -> DispatchReport {
        self.dispatch(vec![Arc::clone(observer)])
    }

    fn dispatch(&self, targets: Vec<ObserverRef<T>>) -> DispatchReport {
        let cfg = self.config();
        let mut report = DispatchReport::with_capacity(targets.len());
        for observer in &targets {
            let payload = self.payload();
            report.push(deliver(observer, payload.as_ref(), &cfg));
        }
        tracing::trace!(
            attempted = report.attempted(),
            failed = report.failed(),
            "shared dispatch finished"
        );
        report
    }
}

impl<T: fmt::Debug> fmt::Debug for SharedSubject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedSubject").field(&*self.inner.read()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    use parking_lot::Mutex;

    use crate::error::ReceiveError;
    use crate::observers::Observer;

    #[derive(Default)]
    struct Tally {
        seen: Mutex<Vec<Option<u32>>>,
    }

    impl Tally {
        fn seen(&self) -> Vec<Option<u32>> {
            self.seen.lock().clone()
        }
    }

    impl Observer<u32> for Tally {
        fn receive(&self) -> Result<(), ReceiveError> {
            self.seen.lock().push(None);
            Ok(())
        }
        fn receive_payload(&self, v: &u32) -> Result<(), ReceiveError> {
            self.seen.lock().push(Some(*v));
            Ok(())
        }
    }

    /// Detaches itself from the subject on first notification.
    struct OneShot {
        subject: SharedSubject<u32>,
        me: Mutex<Option<ObserverRef<u32>>>,
        hits: AtomicUsize,
    }

    impl Observer<u32> for OneShot {
        fn receive(&self) -> Result<(), ReceiveError> {
            self.hits.fetch_add(1, Ordering::SeqCst);
            if let Some(me) = self.me.lock().take() {
                self.subject.detach(&me);
            }
            Ok(())
        }
        fn receive_payload(&self, _: &u32) -> Result<(), ReceiveError> {
            self.receive()
        }
    }

    /// Bumps the payload while being notified.
    struct Bumper {
        subject: SharedSubject<u32>,
    }

    impl Observer<u32> for Bumper {
        fn receive(&self) -> Result<(), ReceiveError> {
            self.subject.set_payload(1);
            Ok(())
        }
        fn receive_payload(&self, v: &u32) -> Result<(), ReceiveError> {
            self.subject.set_payload(v + 1);
            Ok(())
        }
    }

    #[test]
    fn test_self_detach_during_broadcast() {
        let subject = SharedSubject::<u32>::default();
        let one_shot = Arc::new(OneShot {
            subject: subject.clone(),
            me: Mutex::new(None),
            hits: AtomicUsize::new(0),
        });
        let handle: ObserverRef<u32> = one_shot.clone();
        *one_shot.me.lock() = Some(handle.clone());
        subject.attach(handle.clone());

        assert!(subject.broadcast().is_clean());
        assert!(!subject.contains_observer(&handle));
        assert_eq!(subject.broadcast().attempted(), 0);
        assert_eq!(one_shot.hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_payload_read_per_delivery() {
        let subject = SharedSubject::<u32>::default();
        let bumper: ObserverRef<u32> = Arc::new(Bumper {
            subject: subject.clone(),
        });
        let tally = Arc::new(Tally::default());
        let tally_ref: ObserverRef<u32> = tally.clone();

        subject.set_payload(7);
        subject.whisper(&bumper);
        assert_eq!(subject.payload(), Some(8));

        subject.attach(tally_ref.clone());
        subject.whisper(&bumper);
        subject.whisper(&tally_ref);
        assert_eq!(tally.seen(), vec![Some(9)]);

        subject.clear_payload();
        subject.whisper(&bumper);
        subject.multicast_except(&bumper);
        assert_eq!(tally.seen(), vec![Some(9), Some(1)]);
    }

    /// Records the payload it sees, then bumps it.
    struct Relay {
        subject: SharedSubject<u32>,
        seen: Arc<Mutex<Vec<u32>>>,
    }

    impl Observer<u32> for Relay {
        fn receive(&self) -> Result<(), ReceiveError> {
            Err(ReceiveError::rejected("relay needs a value"))
        }
        fn receive_payload(&self, v: &u32) -> Result<(), ReceiveError> {
            self.seen.lock().push(*v);
            self.subject.set_payload(v + 1);
            Ok(())
        }
    }

    #[test]
    fn test_payload_changes_visible_within_one_broadcast() {
        let subject = SharedSubject::<u32>::default();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let relays: Vec<ObserverRef<u32>> = (0..4)
            .map(|_| {
                Arc::new(Relay {
                    subject: subject.clone(),
                    seen: Arc::clone(&seen),
                }) as ObserverRef<u32>
            })
            .collect();
        assert_eq!(subject.attach_many(relays), 4);

        subject.set_payload(7);
        let report = subject.broadcast();
        assert_eq!(report.attempted(), 4);
        assert!(report.is_clean());

        let mut values = seen.lock().clone();
        values.sort_unstable();
        assert_eq!(values, vec![7, 8, 9, 10]);
        assert_eq!(subject.payload(), Some(11));

        // relays hold handles to the subject; break the cycle
        subject.clear_observers();
    }

    /// Payload type without a `Clone` impl.
    #[derive(Debug, PartialEq)]
    struct Frame {
        seq: u64,
        bytes: Vec<u8>,
    }

    #[derive(Default)]
    struct FrameSink {
        seqs: Mutex<Vec<u64>>,
    }

    impl Observer<Arc<Frame>> for FrameSink {
        fn receive(&self) -> Result<(), ReceiveError> {
            Ok(())
        }
        fn receive_payload(&self, frame: &Arc<Frame>) -> Result<(), ReceiveError> {
            self.seqs.lock().push(frame.seq);
            Ok(())
        }
    }

    #[test]
    fn test_non_clone_payload_behind_arc() {
        let subject = SharedSubject::<Arc<Frame>>::default();
        let sink = Arc::new(FrameSink::default());
        subject.attach(sink.clone());

        let frame = Arc::new(Frame {
            seq: 5,
            bytes: vec![0; 1024],
        });
        subject.set_payload(Arc::clone(&frame));
        assert_eq!(subject.broadcast().delivered(), 1);
        assert_eq!(*sink.seqs.lock(), vec![5]);

        let current = subject.payload().expect("payload set");
        assert!(Arc::ptr_eq(&current, &frame));
        assert_eq!(current.bytes.len(), 1024);
    }

    #[test]
    fn test_multicast_and_whisper() {
        let subject = SharedSubject::from(Subject::<u32>::with_payload(3));
        let (a, b) = (Arc::new(Tally::default()), Arc::new(Tally::default()));
        let (ra, rb): (ObserverRef<u32>, ObserverRef<u32>) = (a.clone(), b.clone());
        assert_eq!(subject.attach_many([ra.clone(), rb.clone()]), 2);

        subject.multicast(&[ra.clone()]);
        assert!(a.seen().is_empty());
        assert_eq!(b.seen(), vec![Some(3)]);

        let outsider = Arc::new(Tally::default());
        let ro: ObserverRef<u32> = outsider.clone();
        assert_eq!(subject.whisper(&ro).attempted(), 1);
        assert_eq!(outsider.seen(), vec![Some(3)]);
        assert_eq!(subject.count_observers(), 2);
    }

    #[test]
    fn test_concurrent_attach_and_broadcast() {
        let subject = SharedSubject::<u32>::default();
        subject.set_payload(42);
        let tallies: Vec<Arc<Tally>> = (0..8).map(|_| Arc::new(Tally::default())).collect();

        thread::scope(|s| {
            for t in &tallies {
                let subject = subject.clone();
                let handle: ObserverRef<u32> = t.clone();
                s.spawn(move || {
                    subject.attach(handle);
                    subject.broadcast();
                });
            }
        });

        assert_eq!(subject.count_observers(), 8);
        for t in &tallies {
            let seen = t.seen();
            assert!(!seen.is_empty());
            assert!(seen.iter().all(|v| *v == Some(42)));
        }

        subject.clear_observers();
        assert!(!subject.have_observer());
        assert_eq!(subject.take_payload(), Some(42));
        assert!(!subject.have_payload());
    }
}
