//! # Observer: the listener contract
//!
//! The [`Observer`] trait is the main **extension point** for embedding code.
//! A [`Subject`](crate::Subject) holds shared handles ([`ObserverRef`]) and calls
//! exactly one of the two entry points per notification:
//!
//! ```text
//! Subject::broadcast / multicast / whisper
//!     └─► for each target observer:
//!           payload present? ──yes──► Observer::receive_payload(&T)
//!                            └─no───► Observer::receive()
//! ```
//!
//! ## Identity
//! Membership in a subject is decided by **pointer identity** of the `Arc`
//! allocation, not by value: two clones of one `ObserverRef` are the same
//! observer, two separately allocated observers are different even when their
//! fields compare equal.
//!
//! # Example: custom observer
//! ```
//! use std::sync::Arc;
//! use herald::{Observer, ObserverRef, ReceiveError};
//!
//! struct Thermostat;
//!
//! impl Observer<f32> for Thermostat {
//!     fn receive(&self) -> Result<(), ReceiveError> {
//!         Err(ReceiveError::rejected("no reading"))
//!     }
//!
//!     fn receive_payload(&self, celsius: &f32) -> Result<(), ReceiveError> {
//!         if *celsius > 30.0 {
//!             // turn on cooling...
//!         }
//!         Ok(())
//!     }
//!
//!     fn name(&self) -> &'static str { "thermostat" }
//! }
//!
//! let obs: ObserverRef<f32> = Arc::new(Thermostat);
//! assert_eq!(obs.name(), "thermostat");
//! ```

use std::sync::Arc;

use crate::error::ReceiveError;

/// Contract for notification listeners.
///
/// Called synchronously from the thread that invoked the notify operation.
/// Implementations report failure through [`ReceiveError`]; a panic is caught
/// by the subject when [`SubjectConfig::isolate_panics`](crate::SubjectConfig::isolate_panics)
/// is set.
///
/// # Thread safety
/// Observers must be `Send + Sync` even when attached to a plain
/// [`Subject`](crate::Subject). Handles are `Arc<dyn Observer<T>>`, and one
/// handle may be attached to a `Subject` and a
/// [`SharedSubject`](crate::SharedSubject) at the same time, so every handle
/// must be safe to share across threads. Keep mutable state in atomics or a
/// lock (`parking_lot::Mutex`, `std::sync::Mutex`) instead of `Cell`/`RefCell`.
/// An observer built on `Rc` or `RefCell` is rejected at compile time:
///
/// ```compile_fail
/// use std::cell::RefCell;
/// use herald::{Observer, ReceiveError};
///
/// struct Log(RefCell<Vec<u32>>);
///
/// impl Observer<u32> for Log {
///     fn receive(&self) -> Result<(), ReceiveError> { Ok(()) }
///     fn receive_payload(&self, v: &u32) -> Result<(), ReceiveError> {
///         self.0.borrow_mut().push(*v);
///         Ok(())
///     }
/// }
/// ```
pub trait Observer<T>: Send + Sync + 'static {
    /// Payload-less signal: the subject currently holds no payload.
    fn receive(&self) -> Result<(), ReceiveError>;

    /// Notification carrying the subject's current payload.
    fn receive_payload(&self, payload: &T) -> Result<(), ReceiveError>;

    /// Human-readable name (for logs and dispatch reports).
    ///
    /// The default uses `type_name::<Self>()`, which can be verbose.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Shared observer handle stored by subjects.
pub type ObserverRef<T> = Arc<dyn Observer<T>>;

/// Identity of an observer handle: the data address of its allocation.
///
/// The vtable half of the fat pointer is discarded, so the same allocation
/// always maps to the same id regardless of how it was coerced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct ObserverId(usize);

impl ObserverId {
    pub(crate) fn of<T>(observer: &ObserverRef<T>) -> Self {
        ObserverId(Arc::as_ptr(observer) as *const () as usize)
    }
}
