//! Subjects: payload holders and notification dispatch.
//!
//! ## Contents
//! - [`Subject`] single-threaded subject (`&mut self` mutation, `&self` notification)
//! - [`SharedSubject`] cloneable thread-safe handle with snapshot dispatch
//! - [`SubjectBuilder`] construction with custom [`SubjectConfig`](crate::SubjectConfig)
//! - [`DispatchReport`], [`Delivery`] per-call delivery outcomes
//!
//! ## Quick wiring
//! ```text
//! Subject { payload: Option<T>, observers: ObserverSet<T>, config }
//!      └─► broadcast / multicast / whisper
//!           └─► dispatch::deliver(observer, payload, config) per target
//! ```

mod builder;
mod dispatch;
mod set;
mod shared;
#[allow(clippy::module_inception)]
mod subject;

pub use builder::SubjectBuilder;
pub use dispatch::{Delivery, DispatchReport};
pub use shared::SharedSubject;
pub use subject::Subject;
