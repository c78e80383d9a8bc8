//! Error types used by observers and by the dispatch routine.
//!
//! This module defines two error enums:
//!
//! - [`ReceiveError`]: returned by an [`Observer`](crate::Observer) implementation
//!   when it cannot handle a notification.
//! - [`NotifyError`]: one failed delivery as seen by the subject (observer returned
//!   an error or panicked).
//!
//! Both provide `as_label` / `as_message` helpers for logs.
//! Neither is ever returned from `broadcast`/`multicast`/`whisper`: failures are
//! collected into a [`DispatchReport`](crate::DispatchReport) instead.

use thiserror::Error;

/// # Errors returned by observer callbacks.
///
/// Observers report failure by returning one of these from
/// [`Observer::receive`](crate::Observer::receive) or
/// [`Observer::receive_payload`](crate::Observer::receive_payload).
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReceiveError {
    /// Handling the notification failed.
    #[error("receive failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// The observer refuses this kind of notification
    /// (e.g. a payload-less signal it has no use for).
    #[error("notification rejected: {reason}")]
    Rejected {
        /// Why the notification was refused.
        reason: String,
    },
}

impl ReceiveError {
    /// Shorthand for [`ReceiveError::Fail`].
    pub fn fail(error: impl Into<String>) -> Self {
        ReceiveError::Fail {
            error: error.into(),
        }
    }

    /// Shorthand for [`ReceiveError::Rejected`].
    pub fn rejected(reason: impl Into<String>) -> Self {
        ReceiveError::Rejected {
            reason: reason.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use herald::ReceiveError;
    ///
    /// let err = ReceiveError::fail("disk full");
    /// assert_eq!(err.as_label(), "receive_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ReceiveError::Fail { .. } => "receive_failed",
            ReceiveError::Rejected { .. } => "receive_rejected",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ReceiveError::Fail { error } => format!("error: {error}"),
            ReceiveError::Rejected { reason } => format!("rejected: {reason}"),
        }
    }
}

/// # A single failed delivery.
///
/// Produced by the subject for every observer whose notification did not
/// complete. The failure is isolated: other observers in the same dispatch
/// are still notified.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// The observer returned an error.
    #[error("observer '{observer}' failed: {source}")]
    Failed {
        /// Observer name (see [`Observer::name`](crate::Observer::name)).
        observer: &'static str,
        /// The error the observer returned.
        #[source]
        source: ReceiveError,
    },

    /// The observer panicked; the panic was caught.
    #[error("observer '{observer}' panicked: {info}")]
    Panicked {
        /// Observer name.
        observer: &'static str,
        /// Panic payload rendered as text.
        info: String,
    },
}

impl NotifyError {
    /// Name of the observer the delivery was addressed to.
    pub fn observer(&self) -> &'static str {
        match self {
            NotifyError::Failed { observer, .. } | NotifyError::Panicked { observer, .. } => {
                *observer
            }
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use herald::{NotifyError, ReceiveError};
    ///
    /// let err = NotifyError::Failed { observer: "audit", source: ReceiveError::fail("boom") };
    /// assert_eq!(err.as_label(), "notify_failed");
    /// assert_eq!(err.observer(), "audit");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            NotifyError::Failed { .. } => "notify_failed",
            NotifyError::Panicked { .. } => "notify_panicked",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            NotifyError::Failed { observer, source } => {
                format!("observer={observer}; {}", source.as_message())
            }
            NotifyError::Panicked { observer, info } => {
                format!("observer={observer}; panic: {info}")
            }
        }
    }
}
