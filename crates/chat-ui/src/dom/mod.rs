//! Access to the live document.
//!
//! Widgets never reach for a global document. They are handed a
//! [`DocumentPort`], which the browser build implements with [`WebDocument`]
//! and tests implement in memory.

mod web;

#[cfg(test)]
pub(crate) mod fake;

pub use web::WebDocument;

use crate::config::WidgetConfig;
use crate::error::DomError;
use crate::types::FormEntries;
use std::rc::Rc;

/// Invoked with the entries of a submitted form, default navigation already prevented
pub type SubmitHandler = Rc<dyn Fn(FormEntries)>;

/// Visible state of a form's submit button
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitControl {
    Processing,
    Submitted,
    Retry,
}

impl SubmitControl {
    pub const fn disabled(self) -> bool {
        matches!(self, Self::Processing | Self::Submitted)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Processing => WidgetConfig::PROCESSING_LABEL,
            Self::Submitted => WidgetConfig::SUBMITTED_LABEL,
            Self::Retry => WidgetConfig::RETRY_LABEL,
        }
    }
}

/// Capability for mutating the document a widget lives in
pub trait DocumentPort: Clone + 'static {
    type Node: Clone + PartialEq + 'static;
    /// Keeps a submit handler attached while alive
    type Listener;

    /// Element with the given id, if it has been committed
    fn container(&self, id: &str) -> Option<Self::Node>;

    /// Append markup to the end of `container`'s content
    fn insert_markup(&self, container: &Self::Node, markup: &str) -> Result<(), DomError>;

    /// Remove all of `container`'s content
    fn clear(&self, container: &Self::Node);

    /// Attach a `<style>` element to the document head
    fn attach_style(&self, css: &str) -> Result<Self::Node, DomError>;

    /// Attach a `<script>` element to the document body, which runs it
    fn attach_script(&self, source: &str) -> Result<Self::Node, DomError>;

    /// Attach a sandboxed frame rendering `srcdoc` inside `container`
    fn attach_frame(&self, container: &Self::Node, srcdoc: &str) -> Result<Self::Node, DomError>;

    /// Remove a node previously attached through this port
    fn detach(&self, node: &Self::Node);

    /// Forms inside `container`
    fn forms(&self, container: &Self::Node) -> Vec<Self::Node>;

    /// Listen for submissions of a form, or of any form inside a frame
    fn on_submit(
        &self,
        target: &Self::Node,
        handler: SubmitHandler,
    ) -> Result<Self::Listener, DomError>;

    /// Update the submit button of a form, or of the last submitted form inside a frame
    fn set_submit_control(&self, target: &Self::Node, control: SubmitControl);
}
