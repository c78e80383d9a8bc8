//! # LogObserver: simple notification printer
//!
//! A minimal observer that logs every notification it receives through
//! `tracing` at `INFO` level. Use it for demos or while debugging a
//! subscription graph.
//!
//! ## Example output (fmt subscriber)
//! ```text
//! INFO herald::observers::log: [signal] observer="audit"
//! INFO herald::observers::log: [payload] observer="audit" payload="v1"
//! ```

use std::fmt::Debug;
use std::marker::PhantomData;

use crate::error::ReceiveError;
use crate::observers::Observer;

/// Notification logger.
pub struct LogObserver<T> {
    name: &'static str,
    _payload: PhantomData<fn(&T)>,
}

impl<T> LogObserver<T> {
    /// Construct a new [`LogObserver`] reporting under `name`.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            _payload: PhantomData,
        }
    }
}

impl<T> Default for LogObserver<T> {
    fn default() -> Self {
        Self::new("LogObserver")
    }
}

impl<T: Debug + 'static> Observer<T> for LogObserver<T> {
    fn receive(&self) -> Result<(), ReceiveError> {
        tracing::info!(observer = self.name, "[signal]");
        Ok(())
    }

    fn receive_payload(&self, payload: &T) -> Result<(), ReceiveError> {
        tracing::info!(observer = self.name, payload = ?payload, "[payload]");
        Ok(())
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_observer_never_fails() {
        let obs = LogObserver::<String>::new("audit");
        assert_eq!(Observer::<String>::name(&obs), "audit");
        assert!(obs.receive().is_ok());
        assert!(obs.receive_payload(&"v1".to_string()).is_ok());
    }
}
