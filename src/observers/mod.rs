//! # Observers: the receiving side of a subject.
//!
//! This module provides the [`Observer`] trait and built-in implementations.
//!
//! ## Architecture
//! ```text
//! Subject ── broadcast / multicast / whisper ──► dispatch
//!                                                   │
//!                                       ┌───────────┼───────────┐
//!                                       ▼           ▼           ▼
//!                                  LogObserver   Metrics     Custom ...
//! ```
//!
//! ## Implementing custom observers
//! ```
//! use herald::{Observer, ReceiveError};
//!
//! struct Counter(std::sync::atomic::AtomicUsize);
//!
//! impl Observer<String> for Counter {
//!     fn receive(&self) -> Result<(), ReceiveError> { Ok(()) }
//!     fn receive_payload(&self, _: &String) -> Result<(), ReceiveError> {
//!         self.0.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
//!         Ok(())
//!     }
//! }
//! ```

#[cfg(feature = "logging")]
mod log;
mod observer;

#[cfg(feature = "logging")]
pub use log::LogObserver;
pub(crate) use observer::ObserverId;
pub use observer::{Observer, ObserverRef};
