/// Sink for messages the user should see.
///
/// Diagnostics go through the `log` facade instead; a notifier only carries
/// user-facing failures and warnings.
pub trait Notifier {
    fn display(&mut self, message: &str);
}

/// Routes user-facing messages to the log at warn level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn display(&mut self, message: &str) {
        log::warn!("{message}");
    }
}

/// Keeps every message, in order
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    messages: Vec<String>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Notifier for RecordingNotifier {
    fn display(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}
