use super::inject::{Injection, inject, teardown};
use super::poll::{MountPoll, PollOutcome};
use super::submit::{wire_detached_forms, wire_forms};
use super::MountState;
use crate::dom::DocumentPort;
use crate::error::InjectError;
use crate::store::ActionsHandle;
use crate::types::{ChatEntry, Fragment, ScriptPolicy};
use futures::future::LocalBoxFuture;
use yew::Callback;

/// A fragment in the document together with its submit listeners.
///
/// Dropping it removes the listeners first, then every node the injection added.
pub struct MountedWidget<P: DocumentPort> {
    port: P,
    injection: Option<Injection<P::Node>>,
    listeners: Vec<P::Listener>,
}

impl<P: DocumentPort> MountedWidget<P> {
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl<P: DocumentPort> Drop for MountedWidget<P> {
    fn drop(&mut self) {
        self.listeners.clear();
        if let Some(injection) = self.injection.take() {
            teardown(&self.port, injection);
            tracing::debug!("widget torn down");
        }
    }
}

/// Waits for a placeholder, then injects a fragment into it and wires its forms.
///
/// Call [`step`](Self::step) once when the render commits and again on every
/// poll tick until it returns something other than [`MountState::Waiting`].
pub struct WidgetMount<P: DocumentPort, S> {
    port: P,
    container_id: String,
    fragment: Fragment,
    policy: ScriptPolicy,
    chat: Option<(ActionsHandle, Callback<ChatEntry>)>,
    spawn: S,
    poll: MountPoll,
    state: MountState,
    mounted: Option<MountedWidget<P>>,
}

impl<P, S> WidgetMount<P, S>
where
    P: DocumentPort,
    S: Fn(LocalBoxFuture<'static, ()>) + Clone + 'static,
{
    pub fn new(
        port: P,
        container_id: impl Into<String>,
        fragment: Fragment,
        policy: ScriptPolicy,
        poll: MountPoll,
        spawn: S,
    ) -> Self {
        Self {
            port,
            container_id: container_id.into(),
            fragment,
            policy,
            chat: None,
            spawn,
            poll,
            state: MountState::Waiting,
            mounted: None,
        }
    }

    /// Route form submissions to `actions`, appending replies through `append`
    pub fn with_chat(mut self, actions: ActionsHandle, append: Callback<ChatEntry>) -> Self {
        self.chat = Some((actions, append));
        self
    }

    pub fn state(&self) -> &MountState {
        &self.state
    }

    pub fn mounted(&self) -> Option<&MountedWidget<P>> {
        self.mounted.as_ref()
    }

    pub fn step(&mut self) -> MountState {
        if self.state != MountState::Waiting {
            return self.state.clone();
        }

        // Screen before the first lookup so a bad fragment never waits on the DOM
        if self.poll.attempts() == 0
            && let Err(err) = self.fragment.screen(self.policy)
        {
            tracing::warn!(policy = ?self.policy, error = %err, "widget fragment rejected");
            self.state = MountState::Rejected(err.to_string());
            return self.state.clone();
        }

        let container = self.port.container(&self.container_id);
        match (self.poll.check(container.is_some()), container) {
            (PollOutcome::Ready, Some(container)) => {
                self.state = match self.attach(&container) {
                    Ok(mounted) => {
                        self.mounted = Some(mounted);
                        MountState::Mounted
                    }
                    Err(err) => {
                        tracing::error!(id = %self.container_id, error = %err, "widget mount failed");
                        MountState::from(err)
                    }
                };
            }
            (PollOutcome::TimedOut, _) => {
                tracing::warn!(
                    id = %self.container_id,
                    attempts = self.poll.attempts(),
                    "widget placeholder never appeared"
                );
                self.state = MountState::TimedOut;
            }
            _ => {}
        }
        self.state.clone()
    }

    fn attach(&self, container: &P::Node) -> Result<MountedWidget<P>, InjectError> {
        let injection = inject(&self.port, container, &self.fragment, self.policy)?;
        let mut mounted = MountedWidget {
            port: self.port.clone(),
            injection: Some(injection),
            listeners: Vec::new(),
        };

        let targets = mounted
            .injection
            .as_ref()
            .map(|injection| injection.submit_targets(&self.port))
            .unwrap_or_default();
        // On error `mounted` drops here and tears the injection down
        mounted.listeners = match &self.chat {
            Some((actions, append)) => {
                wire_forms(&self.port, targets, actions, append, self.spawn.clone())?
            }
            None => {
                tracing::debug!(id = %self.container_id, "no chat context, form submissions are dropped");
                wire_detached_forms(&self.port, targets)?
            }
        };
        Ok(mounted)
    }
}
