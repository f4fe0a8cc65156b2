//! Error types for widget injection, form submission and streaming

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failure talking to the live document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// No window or document (e.g. running outside a browser)
    #[error("Document is not available")]
    Unavailable,

    /// The document has no head or body to attach to
    #[error("Document is missing its {0} element")]
    MissingElement(&'static str),

    /// A DOM call threw
    #[error("DOM operation `{op}` failed: {message}")]
    Js { op: &'static str, message: String },
}

impl DomError {
    /// Adapter for `map_err` on web-sys results
    pub fn js(op: &'static str) -> impl FnOnce(JsValue) -> Self {
        move |value| Self::Js {
            op,
            message: value
                .as_string()
                .unwrap_or_else(|| format!("{value:?}")),
        }
    }
}

/// Reasons a fragment could not be injected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InjectError {
    /// html + css + javascript exceeds the configured limit
    #[error("Fragment is {size} bytes, limit is {limit}")]
    TooLarge { size: usize, limit: usize },

    /// Script supplied while scripts are denied
    #[error("Script execution is not allowed for this widget")]
    ScriptRejected,

    /// Markup failed screening
    #[error("Markup rejected: {0}")]
    MarkupRejected(String),

    #[error(transparent)]
    Dom(#[from] DomError),
}

/// Error returned by a host chat action
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ActionError {
    pub message: String,
}

impl ActionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Reasons a form submission did not produce a chat entry
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// A previous submission of the same form is still in flight
    #[error("Submission already in progress")]
    AlreadyPending,

    /// The action rejected the submission
    #[error("Action failed: {0}")]
    Action(#[from] ActionError),
}

/// Errors from writing to a streamable value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StreamError {
    #[error("Stream is already done")]
    Closed,
}
