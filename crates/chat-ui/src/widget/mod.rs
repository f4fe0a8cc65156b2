//! Generative widgets: fragments of html/css/js mounted into a placeholder,
//! with their forms routed back into the conversation.

mod inject;
mod mount;
mod poll;
pub mod sandbox;
mod submit;

pub use inject::{Injection, inject, teardown};
pub use mount::{MountedWidget, WidgetMount};
pub use poll::{MountPoll, PollOutcome};
pub use submit::{FormSubmitter, wire_detached_forms, wire_forms};

use crate::error::InjectError;

/// Lifecycle of one mounted widget, as shown to the user
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum MountState {
    /// Placeholder not committed yet
    #[default]
    Waiting,
    Mounted,
    /// The placeholder never appeared within the mount timeout
    TimedOut,
    /// The fragment failed screening; nothing was inserted
    Rejected(String),
    /// The document refused an insertion
    Failed(String),
}

impl MountState {
    /// Whether the widget needs a visible notice
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::TimedOut | Self::Rejected(_) | Self::Failed(_))
    }

    /// Text for the notice shown in place of a failed widget
    pub fn notice(&self) -> Option<String> {
        match self {
            Self::Waiting | Self::Mounted => None,
            Self::TimedOut => Some("Widget could not be displayed: its container never appeared".to_string()),
            Self::Rejected(reason) => Some(format!("Widget blocked: {reason}")),
            Self::Failed(reason) => Some(format!("Widget failed to load: {reason}")),
        }
    }
}

impl From<InjectError> for MountState {
    fn from(err: InjectError) -> Self {
        match err {
            InjectError::Dom(_) => Self::Failed(err.to_string()),
            InjectError::TooLarge { .. }
            | InjectError::ScriptRejected
            | InjectError::MarkupRejected(_) => Self::Rejected(err.to_string()),
        }
    }
}
