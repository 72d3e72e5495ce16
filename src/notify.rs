//! Toast-style notices raised by the booking form.

use crate::prelude::*;

/// A short message for the user, shown as a toast by the view.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Notice {
    #[display(fmt = "error: {_0}")]
    Error(String),
    #[display(fmt = "success: {_0}")]
    Success(String),
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::Success(message.into())
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Error(message) | Self::Success(message) => message,
        }
    }

    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Channel that shows notices to the user.
pub trait Notifier {
    fn notify(&mut self, notice: Notice);
}

/// Forwards notices to the `log` facade: errors at `warn`, successes at `info`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, notice: Notice) {
        match notice {
            Notice::Error(message) => log::warn!("{message}"),
            Notice::Success(message) => log::info!("{message}"),
        }
    }
}

/// Keeps every notice in arrival order.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    notices: Vec<Notice>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn errors(&self) -> impl Iterator<Item = &str> {
        self.notices.iter().filter(|n| n.is_error()).map(Notice::message)
    }

    pub fn take(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

impl<N: Notifier + ?Sized> Notifier for &mut N {
    fn notify(&mut self, notice: Notice) {
        (**self).notify(notice);
    }
}
