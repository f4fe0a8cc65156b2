//! In-memory [`DocumentPort`] for lifecycle tests

use super::{DocumentPort, SubmitControl, SubmitHandler};
use crate::error::DomError;
use crate::types::FormEntries;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FakeNode(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attached {
    Style,
    Script,
    Frame,
}

#[derive(Default)]
struct FakeState {
    next: u32,
    ids: HashMap<String, FakeNode>,
    content: HashMap<FakeNode, String>,
    attached: Vec<(FakeNode, Attached, String)>,
    forms: HashMap<FakeNode, Vec<FakeNode>>,
    form_entries: HashMap<FakeNode, FormEntries>,
    handlers: HashMap<FakeNode, SubmitHandler>,
    controls: HashMap<FakeNode, Vec<SubmitControl>>,
    frame_parents: HashMap<FakeNode, FakeNode>,
    fail_style: bool,
}

impl FakeState {
    fn alloc(&mut self) -> FakeNode {
        self.next += 1;
        FakeNode(self.next)
    }
}

#[derive(Clone, Default)]
pub struct FakeDocument {
    state: Rc<RefCell<FakeState>>,
}

pub struct FakeListener {
    state: Rc<RefCell<FakeState>>,
    target: FakeNode,
}

impl Drop for FakeListener {
    fn drop(&mut self) {
        self.state.borrow_mut().handlers.remove(&self.target);
    }
}

impl FakeDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit an empty element with `id`
    pub fn add_container(&self, id: &str) -> FakeNode {
        let mut state = self.state.borrow_mut();
        let node = state.alloc();
        state.ids.insert(id.to_string(), node);
        state.content.insert(node, String::new());
        node
    }

    pub fn content(&self, node: FakeNode) -> String {
        self.state
            .borrow()
            .content
            .get(&node)
            .cloned()
            .unwrap_or_default()
    }

    pub fn attached(&self) -> Vec<(Attached, String)> {
        self.state
            .borrow()
            .attached
            .iter()
            .map(|(_, kind, text)| (*kind, text.clone()))
            .collect()
    }

    pub fn forms_of(&self, container: FakeNode) -> Vec<FakeNode> {
        self.state
            .borrow()
            .forms
            .get(&container)
            .cloned()
            .unwrap_or_default()
    }

    /// Values the form will report when submitted
    pub fn fill_form(&self, form: FakeNode, entries: FormEntries) {
        self.state.borrow_mut().form_entries.insert(form, entries);
    }

    /// Simulate the user submitting `target`
    pub fn submit(&self, target: FakeNode) -> bool {
        let (handler, entries) = {
            let state = self.state.borrow();
            let Some(handler) = state.handlers.get(&target).cloned() else {
                return false;
            };
            let entries = state.form_entries.get(&target).cloned().unwrap_or_default();
            (handler, entries)
        };
        handler(entries);
        true
    }

    /// Deliver entries as if posted from inside a frame
    pub fn submit_from_frame(&self, frame: FakeNode, entries: FormEntries) -> bool {
        self.fill_form(frame, entries);
        self.submit(frame)
    }

    pub fn listener_count(&self) -> usize {
        self.state.borrow().handlers.len()
    }

    pub fn controls(&self, target: FakeNode) -> Vec<SubmitControl> {
        self.state
            .borrow()
            .controls
            .get(&target)
            .cloned()
            .unwrap_or_default()
    }

    pub fn fail_style_attach(&self) {
        self.state.borrow_mut().fail_style = true;
    }
}

impl DocumentPort for FakeDocument {
    type Node = FakeNode;
    type Listener = FakeListener;

    fn container(&self, id: &str) -> Option<FakeNode> {
        self.state.borrow().ids.get(id).copied()
    }

    fn insert_markup(&self, container: &FakeNode, markup: &str) -> Result<(), DomError> {
        let mut state = self.state.borrow_mut();
        let form_count = markup.to_ascii_lowercase().matches("<form").count();
        let forms: Vec<FakeNode> = (0..form_count).map(|_| state.alloc()).collect();
        state.forms.entry(*container).or_default().extend(forms);
        state
            .content
            .entry(*container)
            .or_default()
            .push_str(markup);
        Ok(())
    }

    fn clear(&self, container: &FakeNode) {
        let mut state = self.state.borrow_mut();
        state.content.insert(*container, String::new());
        state.forms.remove(container);
        // Frames live inside the container
        let frames: Vec<FakeNode> = state
            .frame_parents
            .iter()
            .filter(|(_, parent)| *parent == container)
            .map(|(frame, _)| *frame)
            .collect();
        state.attached.retain(|(node, _, _)| !frames.contains(node));
    }

    fn attach_style(&self, css: &str) -> Result<FakeNode, DomError> {
        let mut state = self.state.borrow_mut();
        if state.fail_style {
            return Err(DomError::MissingElement("head"));
        }
        let node = state.alloc();
        state.attached.push((node, Attached::Style, css.to_string()));
        Ok(node)
    }

    fn attach_script(&self, source: &str) -> Result<FakeNode, DomError> {
        let mut state = self.state.borrow_mut();
        let node = state.alloc();
        state
            .attached
            .push((node, Attached::Script, source.to_string()));
        Ok(node)
    }

    fn attach_frame(&self, container: &FakeNode, srcdoc: &str) -> Result<FakeNode, DomError> {
        let mut state = self.state.borrow_mut();
        let node = state.alloc();
        state.frame_parents.insert(node, *container);
        state.attached.push((node, Attached::Frame, srcdoc.to_string()));
        Ok(node)
    }

    fn detach(&self, node: &FakeNode) {
        self.state
            .borrow_mut()
            .attached
            .retain(|(attached, _, _)| attached != node);
    }

    fn forms(&self, container: &FakeNode) -> Vec<FakeNode> {
        self.forms_of(*container)
    }

    fn on_submit(&self, target: &FakeNode, handler: SubmitHandler) -> Result<FakeListener, DomError> {
        self.state.borrow_mut().handlers.insert(*target, handler);
        Ok(FakeListener {
            state: self.state.clone(),
            target: *target,
        })
    }

    fn set_submit_control(&self, target: &FakeNode, control: SubmitControl) {
        self.state
            .borrow_mut()
            .controls
            .entry(*target)
            .or_default()
            .push(control);
    }
}
