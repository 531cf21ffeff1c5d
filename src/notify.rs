//! User facing notification channel
use std::sync::Mutex;

/// Receives one human readable message per rejected or failed operation.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, message: &str);
}

/// Forwards every message to the `tracing` warn level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, message: &str) {
        tracing::warn!(target: "cart_store::notify", "{message}");
    }
}

/// Keeps every message it receives, in order
#[derive(Debug, Default)]
pub struct RecordingSink {
    messages: Mutex<Vec<String>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn messages(&self) -> Vec<String> {
        self.messages
            .lock()
            .map(|m| m.clone())
            .unwrap_or_else(|e| e.into_inner().clone())
    }
    pub fn is_empty(&self) -> bool {
        self.messages().is_empty()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, message: &str) {
        self.messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message.to_string());
    }
}

impl<T: NotificationSink + ?Sized> NotificationSink for std::sync::Arc<T> {
    fn notify(&self, message: &str) {
        (**self).notify(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        assert!(sink.is_empty());

        sink.notify("first");
        sink.notify("second");

        assert_eq!(sink.messages(), vec!["first", "second"]);
    }
}
