use crate::config::SubjectConfig;
use crate::observers::ObserverRef;

use super::subject::Subject;

/// Builder for constructing a [`Subject`] with custom configuration.
pub struct SubjectBuilder<T> {
    cfg: SubjectConfig,
    payload: Option<T>,
    observers: Vec<ObserverRef<T>>,
}

impl<T: 'static> SubjectBuilder<T> {
    /// Creates a new builder with default configuration.
    pub fn new() -> Self {
        Self {
            cfg: SubjectConfig::default(),
            payload: None,
            observers: Vec::new(),
        }
    }

    /// Sets the configuration.
    pub fn config(mut self, cfg: SubjectConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Sets the initial payload.
    pub fn payload(mut self, payload: T) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Adds one initial observer.
    pub fn observer(mut self, observer: ObserverRef<T>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Adds several initial observers.
    pub fn observers<I>(mut self, observers: I) -> Self
    where
        I: IntoIterator<Item = ObserverRef<T>>,
    {
        self.observers.extend(observers);
        self
    }

    /// Builds the subject. Duplicate observers are collapsed.
    pub fn build(self) -> Subject<T> {
        let mut subject = Subject::with_config(self.cfg);
        if let Some(payload) = self.payload {
            subject.set_payload(payload);
        }
        subject.attach_many(self.observers);
        subject
    }
}

impl<T: 'static> Default for SubjectBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}
