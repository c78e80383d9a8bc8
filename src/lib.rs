//! # herald
//!
//! **Herald** is a small synchronous publish/notify library for Rust.
//!
//! A [`Subject`] holds an optional payload and a set of [`Observer`]s, and
//! notifies some or all of them on demand. Delivery is in-line and blocking:
//! every notify operation has reached each target before it returns.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!               set_payload / attach / detach (never notify)
//!                                │
//!                                ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Subject<T>                                                       │
//! │  - payload: Option<T>                                             │
//! │  - observers: identity-keyed set of ObserverRef<T>                │
//! │  - config: SubjectConfig (panic isolation, failure logging)       │
//! └──────┬──────────────────┬──────────────────┬──────────────────────┘
//!        ▼                  ▼                  ▼
//!   broadcast()      multicast(&[x..])    whisper(&obs)
//!   (all members)    (members − x..)      (one, attached or not)
//!        │                  │                  │
//!        └──────────────────┼──────────────────┘
//!                           ▼
//!                 deliver(obs) per target
//!                 ├─ Some(p) ─► obs.receive_payload(&p)
//!                 └─ None    ─► obs.receive()
//!                           │
//!                           ▼
//!                 DispatchReport (Err/panic isolated, logged via tracing)
//! ```
//!
//! ### Failure isolation
//! ```text
//! broadcast()
//!   ├─► A.receive_payload ─► Ok
//!   ├─► B.receive_payload ─► Err(ReceiveError)  ─► NotifyError::Failed   (warn!)
//!   ├─► C.receive_payload ─► panic!             ─► NotifyError::Panicked (warn!)
//!   └─► D.receive_payload ─► Ok
//! caller gets DispatchReport { delivered: 2, failed: 2 }, never an Err
//! ```
//!
//! ## Features
//! | Area              | Description                                                 | Key types / traits                      |
//! |-------------------|-------------------------------------------------------------|-----------------------------------------|
//! | **Observer API**  | Plug listeners into a subject.                              | [`Observer`], [`ObserverRef`]           |
//! | **Subjects**      | Hold a payload, manage observers, dispatch notifications.   | [`Subject`], [`SubjectBuilder`]         |
//! | **Shared use**    | Thread-safe handle with snapshot dispatch.                  | [`SharedSubject`]                       |
//! | **Outcomes**      | Per-delivery results of a notify call.                      | [`DispatchReport`], [`Delivery`]        |
//! | **Errors**        | Typed observer and delivery failures.                       | [`ReceiveError`], [`NotifyError`]       |
//! | **Configuration** | Panic isolation, failure logging, capacity.                 | [`SubjectConfig`]                       |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in `LogObserver` _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use herald::{Observer, ObserverRef, ReceiveError, Subject};
//!
//! #[derive(Default)]
//! struct Counter(AtomicUsize);
//!
//! impl Observer<&'static str> for Counter {
//!     fn receive(&self) -> Result<(), ReceiveError> {
//!         Ok(())
//!     }
//!     fn receive_payload(&self, _: &&'static str) -> Result<(), ReceiveError> {
//!         self.0.fetch_add(1, Ordering::Relaxed);
//!         Ok(())
//!     }
//! }
//!
//! let a = Arc::new(Counter::default());
//! let b = Arc::new(Counter::default());
//! let (ra, rb): (ObserverRef<&str>, ObserverRef<&str>) = (a.clone(), b.clone());
//!
//! let subject = Subject::with_observers(Some("v1"), [ra, rb.clone()]);
//!
//! // Everyone but `b`.
//! subject.multicast(&[rb]);
//! assert_eq!(a.0.load(Ordering::Relaxed), 1);
//! assert_eq!(b.0.load(Ordering::Relaxed), 0);
//! ```
mod config;
mod error;
mod observers;
mod subject;

// ---- Public re-exports ----

pub use config::SubjectConfig;
pub use error::{NotifyError, ReceiveError};
pub use observers::{Observer, ObserverRef};
pub use subject::{Delivery, DispatchReport, SharedSubject, Subject, SubjectBuilder};

// Optional: expose a simple built-in logger observer (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use observers::LogObserver;
