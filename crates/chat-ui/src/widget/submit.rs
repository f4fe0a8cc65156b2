use crate::dom::{DocumentPort, SubmitControl};
use crate::error::{DomError, SubmitError};
use crate::store::ActionsHandle;
use crate::types::{ChatEntry, FormEntries};
use futures::future::LocalBoxFuture;
use std::cell::Cell;
use std::rc::Rc;
use yew::Callback;

/// Drives one form (or one widget frame) through a submission
pub struct FormSubmitter {
    actions: ActionsHandle,
    append: Callback<ChatEntry>,
    pending: Cell<bool>,
}

impl FormSubmitter {
    pub fn new(actions: ActionsHandle, append: Callback<ChatEntry>) -> Self {
        Self {
            actions,
            append,
            pending: Cell::new(false),
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }

    /// Forward `entries` to the chat action.
    ///
    /// The submit control is disabled for the duration. On success the reply is
    /// appended to the conversation once; on failure nothing is appended and the
    /// control is re-enabled for a retry.
    pub async fn submit<P: DocumentPort>(
        &self,
        port: &P,
        target: &P::Node,
        entries: FormEntries,
    ) -> Result<(), SubmitError> {
        if self.pending.replace(true) {
            return Err(SubmitError::AlreadyPending);
        }
        port.set_submit_control(target, SubmitControl::Processing);

        let fields = entries.len();
        let result = self.actions.submit_user_message(entries).await;
        self.pending.set(false);

        match result {
            Ok(entry) => {
                tracing::debug!(fields, entry = %entry.id, "widget form submitted");
                port.set_submit_control(target, SubmitControl::Submitted);
                self.append.emit(entry);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(fields, error = %err, "widget form submission failed");
                port.set_submit_control(target, SubmitControl::Retry);
                Err(err.into())
            }
        }
    }
}

/// Attach a submit handler to every target, each with its own [`FormSubmitter`].
///
/// `spawn` runs the submission future; in the browser this is
/// `wasm_bindgen_futures::spawn_local`.
pub fn wire_forms<P, S>(
    port: &P,
    targets: Vec<P::Node>,
    actions: &ActionsHandle,
    append: &Callback<ChatEntry>,
    spawn: S,
) -> Result<Vec<P::Listener>, DomError>
where
    P: DocumentPort,
    S: Fn(LocalBoxFuture<'static, ()>) + Clone + 'static,
{
    targets
        .into_iter()
        .map(|target| {
            let submitter = Rc::new(FormSubmitter::new(actions.clone(), append.clone()));
            let handler = {
                let port = port.clone();
                let target = target.clone();
                let spawn = spawn.clone();
                Rc::new(move |entries: FormEntries| {
                    let port = port.clone();
                    let target = target.clone();
                    let submitter = submitter.clone();
                    spawn(Box::pin(async move {
                        // Failures are already logged and reflected on the control
                        let _ = submitter.submit(&port, &target, entries).await;
                    }));
                })
            };
            port.on_submit(&target, handler)
        })
        .collect()
}

/// Capture submissions that have nowhere to go.
///
/// The port prevents the default navigation before the handler runs, so the
/// host page stays put; the entries are only logged.
pub fn wire_detached_forms<P: DocumentPort>(
    port: &P,
    targets: Vec<P::Node>,
) -> Result<Vec<P::Listener>, DomError> {
    targets
        .iter()
        .map(|target| {
            port.on_submit(
                target,
                Rc::new(|entries: FormEntries| {
                    tracing::debug!(fields = entries.len(), "ignoring widget form without chat context");
                }),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::fake::FakeDocument;
    use crate::error::ActionError;
    use crate::store::ChatActions;
    use crate::types::{EntryKind, Fragment, ScriptPolicy};
    use crate::widget::inject::inject;
    use async_trait::async_trait;
    use futures::channel::oneshot;
    use std::cell::RefCell;

    /// Records what it was asked and fails on request
    #[derive(Default)]
    struct RecordingActions {
        received: RefCell<Vec<FormEntries>>,
        fail: Cell<bool>,
    }

    #[async_trait(?Send)]
    impl ChatActions for RecordingActions {
        async fn submit_user_message(
            &self,
            entries: FormEntries,
        ) -> Result<ChatEntry, ActionError> {
            self.received.borrow_mut().push(entries.clone());
            if self.fail.get() {
                return Err(ActionError::new("upstream unavailable"));
            }
            Ok(ChatEntry::bot(format!("Got {} fields", entries.len())))
        }
    }

    /// Holds the action open until the test releases it
    struct GatedActions {
        gate: RefCell<Option<oneshot::Receiver<()>>>,
    }

    #[async_trait(?Send)]
    impl ChatActions for GatedActions {
        async fn submit_user_message(&self, _: FormEntries) -> Result<ChatEntry, ActionError> {
            let gate = self.gate.borrow_mut().take();
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            Ok(ChatEntry::bot("done"))
        }
    }

    fn collecting_sink() -> (Callback<ChatEntry>, Rc<RefCell<Vec<ChatEntry>>>) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = {
            let log = log.clone();
            Callback::from(move |entry| log.borrow_mut().push(entry))
        };
        (sink, log)
    }

    type Queue = Rc<RefCell<Vec<LocalBoxFuture<'static, ()>>>>;

    fn queue_spawner() -> (impl Fn(LocalBoxFuture<'static, ()>) + Clone + 'static, Queue) {
        let queue: Queue = Rc::new(RefCell::new(Vec::new()));
        let spawn = {
            let queue = queue.clone();
            move |fut: LocalBoxFuture<'static, ()>| queue.borrow_mut().push(fut)
        };
        (spawn, queue)
    }

    fn run_queued(queue: &Queue) {
        let futures: Vec<_> = queue.borrow_mut().drain(..).collect();
        for fut in futures {
            tokio_test::block_on(fut);
        }
    }

    #[test]
    fn entries_reach_the_action_in_order() {
        let doc = FakeDocument::new();
        let container = doc.add_container("widget");
        let fragment = Fragment::new(
            "<form><input name=\"name\"><input name=\"age\"><button type=\"submit\">Send</button></form>",
            "",
            "",
        );
        let injection = inject(&doc, &container, &fragment, ScriptPolicy::Trusted).unwrap();
        let form = doc.forms_of(container)[0];
        doc.fill_form(form, [("name", "Ana"), ("age", "30")].into_iter().collect());

        let actions = Rc::new(RecordingActions::default());
        let handle = ActionsHandle(actions.clone());
        let (sink, log) = collecting_sink();
        let (spawn, queue) = queue_spawner();
        let _listeners =
            wire_forms(&doc, injection.submit_targets(&doc), &handle, &sink, spawn).unwrap();

        assert!(doc.submit(form));
        run_queued(&queue);

        assert_eq!(
            actions.received.borrow()[0].clone().into_vec(),
            vec![
                ("name".to_string(), "Ana".to_string()),
                ("age".to_string(), "30".to_string()),
            ]
        );
        assert_eq!(log.borrow().len(), 1);
        assert!(matches!(&log.borrow()[0].kind, EntryKind::Bot(_)));
        assert_eq!(
            doc.controls(form),
            vec![SubmitControl::Processing, SubmitControl::Submitted]
        );
    }

    #[test]
    fn failure_appends_nothing_and_re_enables() {
        let doc = FakeDocument::new();
        let form = doc.add_container("form");
        let actions = Rc::new(RecordingActions::default());
        actions.fail.set(true);
        let (sink, log) = collecting_sink();
        let submitter = FormSubmitter::new(ActionsHandle(actions.clone()), sink);

        let result = tokio_test::block_on(submitter.submit(&doc, &form, FormEntries::new()));

        assert_eq!(
            result,
            Err(SubmitError::Action(ActionError::new("upstream unavailable")))
        );
        assert!(log.borrow().is_empty());
        assert!(!submitter.is_pending());
        let controls = doc.controls(form);
        assert_eq!(controls, vec![SubmitControl::Processing, SubmitControl::Retry]);
        assert!(!controls[1].disabled());

        // A retry goes through once the action recovers
        actions.fail.set(false);
        tokio_test::block_on(submitter.submit(&doc, &form, FormEntries::new())).unwrap();
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn duplicate_submission_is_refused_while_pending() {
        let doc = FakeDocument::new();
        let form = doc.add_container("form");
        let (release, gate) = oneshot::channel();
        let actions = GatedActions {
            gate: RefCell::new(Some(gate)),
        };
        let (sink, log) = collecting_sink();
        let submitter = FormSubmitter::new(ActionsHandle::new(actions), sink);

        tokio_test::block_on(async {
            let first = submitter.submit(&doc, &form, FormEntries::new());
            futures::pin_mut!(first);
            // Drive the first submission up to the action's await point
            assert!(futures::poll!(first.as_mut()).is_pending());
            assert!(submitter.is_pending());
            assert_eq!(doc.controls(form), vec![SubmitControl::Processing]);
            assert!(SubmitControl::Processing.disabled());

            let second = submitter.submit(&doc, &form, FormEntries::new()).await;
            assert_eq!(second, Err(SubmitError::AlreadyPending));

            release.send(()).unwrap();
            first.await.unwrap();
        });

        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn sandboxed_frame_submissions_are_bridged() {
        let doc = FakeDocument::new();
        let container = doc.add_container("widget");
        let injection = inject(
            &doc,
            &container,
            &Fragment::new("<form></form>", "", "setup()"),
            ScriptPolicy::Sandboxed,
        )
        .unwrap();
        let frame = injection.frame.unwrap();

        let actions = Rc::new(RecordingActions::default());
        let (sink, log) = collecting_sink();
        let (spawn, queue) = queue_spawner();
        let listeners = wire_forms(
            &doc,
            injection.submit_targets(&doc),
            &ActionsHandle(actions.clone()),
            &sink,
            spawn,
        )
        .unwrap();

        let entries: FormEntries = [("choice", "AAPL")].into_iter().collect();
        assert!(doc.submit_from_frame(frame, entries.clone()));
        run_queued(&queue);

        assert_eq!(actions.received.borrow().as_slice(), &[entries]);
        assert_eq!(log.borrow().len(), 1);

        drop(listeners);
        assert_eq!(doc.listener_count(), 0);
        assert!(!doc.submit(frame));
    }
}
