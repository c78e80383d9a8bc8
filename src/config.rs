//! # Subject configuration.
//!
//! Provides [`SubjectConfig`], the knobs that control how a [`Subject`](crate::Subject)
//! handles failing observers.
//!
//! Config is used in two ways:
//! 1. **Builder**: `Subject::builder().config(cfg).build()`
//! 2. **Direct**: `Subject::with_config(cfg)`
//!
//! ## Sentinel values
//! - `initial_capacity = 0` → no pre-allocation

/// Configuration for a subject.
///
/// ## Field semantics
/// - `isolate_panics`: catch observer panics and report them instead of unwinding
/// - `log_failures`: emit a `tracing` warning for every failed delivery
/// - `initial_capacity`: pre-sized observer set (`0` = grow on demand)
#[derive(Clone, Debug)]
pub struct SubjectConfig {
    /// Catch panics raised inside observer callbacks.
    ///
    /// - `true` → the panic becomes a [`NotifyError::Panicked`](crate::NotifyError::Panicked)
    ///   entry in the dispatch report; remaining observers are still notified
    /// - `false` → the panic unwinds to the caller of the notify operation
    pub isolate_panics: bool,

    /// Log every failed delivery at `WARN` level.
    ///
    /// Failures are always collected into the dispatch report regardless of this flag.
    pub log_failures: bool,

    /// Number of observers to reserve room for up front.
    pub initial_capacity: usize,
}

impl SubjectConfig {
    /// Returns the observer set capacity as an `Option`.
    ///
    /// - `None` → grow on demand
    /// - `Some(n)` → reserve room for `n` observers
    #[inline]
    pub fn capacity_hint(&self) -> Option<usize> {
        if self.initial_capacity == 0 {
            None
        } else {
            Some(self.initial_capacity)
        }
    }
}

impl Default for SubjectConfig {
    /// Default configuration:
    ///
    /// - `isolate_panics = true`
    /// - `log_failures = true`
    /// - `initial_capacity = 0`
    fn default() -> Self {
        Self {
            isolate_panics: true,
            log_failures: true,
            initial_capacity: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_isolate_and_log() {
        let cfg = SubjectConfig::default();
        assert!(cfg.isolate_panics);
        assert!(cfg.log_failures);
        assert_eq!(cfg.capacity_hint(), None);
    }

    #[test]
    fn test_capacity_hint() {
        let cfg = SubjectConfig {
            initial_capacity: 16,
            ..SubjectConfig::default()
        };
        assert_eq!(cfg.capacity_hint(), Some(16));
    }
}
