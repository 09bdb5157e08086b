//! Status message line.
//!
//! The host window owns one message line per editor window and hands it to
//! the scene. Scenes write the active mode name and gesture results here.

use std::fmt;

use crate::types::MessageListener;

/// Single-line status text with an optional change listener.
#[derive(Default)]
pub struct MessageLine {
    text: String,
    listener: Option<MessageListener>,
}

impl fmt::Debug for MessageLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageLine")
            .field("text", &self.text)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

impl MessageLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current text and notify the listener.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        tracing::debug!(message = %self.text, "message line");
        if let Some(listener) = &self.listener {
            listener(&self.text);
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn clear(&mut self) {
        self.set_text(String::new());
    }

    /// Install the host callback, replacing any previous one.
    pub fn set_listener(&mut self, listener: MessageListener) {
        self.listener = Some(listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::shared;

    #[test]
    fn test_set_text() {
        let mut line = MessageLine::new();
        assert_eq!(line.text(), "");
        line.set_text("Draw Rectangle");
        assert_eq!(line.text(), "Draw Rectangle");
        line.clear();
        assert_eq!(line.text(), "");
    }

    #[test]
    fn test_listener_is_notified() {
        let seen = shared(Vec::<String>::new());
        let sink = seen.clone();
        let mut line = MessageLine::new();
        line.set_listener(Box::new(move |text| sink.borrow_mut().push(text.to_string())));

        line.set_text("Select Item");
        line.set_text("Move Item");
        assert_eq!(*seen.borrow(), vec!["Select Item", "Move Item"]);
    }
}
