//! Flash messages: short status notes surfaced once, then discarded.
//!
//! Store operations never touch shared state to report an outcome. They
//! return a [`Reported`] value holding the outcome and the messages they
//! emitted, and the API layer decides where those messages go. The pending
//! [`FlashLog`] is drained by read endpoints.

use serde::{Deserialize, Serialize};

/// Severity of a flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub text: String,
    pub category: Category,
}

impl FlashMessage {
    pub fn new(text: impl Into<String>, category: Category) -> Self {
        Self { text: text.into(), category }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(text, Category::Success)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, Category::Error)
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, Category::Info)
    }
}

/// Ordered log of messages waiting for the next reader.
///
/// Unbounded and without deduplication.
#[derive(Debug, Default)]
pub struct FlashLog {
    pending: Vec<FlashMessage>,
}

impl FlashLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, text: impl Into<String>, category: Category) {
        self.pending.push(FlashMessage::new(text, category));
    }

    pub fn extend(&mut self, messages: impl IntoIterator<Item = FlashMessage>) {
        self.pending.extend(messages);
    }

    /// Returns every pending message in FIFO order and leaves the log empty.
    pub fn drain_all(&mut self) -> Vec<FlashMessage> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> &[FlashMessage] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// The outcome of an operation together with the flashes it emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reported<T> {
    pub outcome: T,
    pub flashes: Vec<FlashMessage>,
}

impl<T> Reported<T> {
    pub fn new(outcome: T, flashes: Vec<FlashMessage>) -> Self {
        Self { outcome, flashes }
    }

    /// An outcome that emitted nothing.
    pub fn quiet(outcome: T) -> Self {
        Self::new(outcome, Vec::new())
    }

    pub fn with(outcome: T, flash: FlashMessage) -> Self {
        Self::new(outcome, vec![flash])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_returns_fifo_and_empties() {
        let mut log = FlashLog::new();
        log.append("one", Category::Success);
        log.extend([FlashMessage::error("two"), FlashMessage::info("three")]);
        assert_eq!(log.len(), 3);

        let drained = log.drain_all();
        let texts: Vec<_> = drained.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["one", "two", "three"]);
        assert!(log.is_empty());
        assert!(log.drain_all().is_empty());
    }

    #[test]
    fn duplicates_are_kept() {
        let mut log = FlashLog::new();
        log.append("same", Category::Info);
        log.append("same", Category::Info);
        assert_eq!(log.pending().len(), 2);
    }

    #[test]
    fn category_serializes_lowercase() {
        let json = serde_json::to_string(&FlashMessage::success("ok")).unwrap();
        assert_eq!(json, r#"{"text":"ok","category":"success"}"#);
    }
}
