//! Conversation state shared between the message list and widgets

use crate::error::ActionError;
use crate::types::{ChatEntry, FormEntries};
use async_trait::async_trait;
use std::rc::Rc;
use yew::prelude::*;

/// Host-side operations the chat UI can trigger
#[async_trait(?Send)]
pub trait ChatActions {
    /// Forward a widget's form submission and return the entry to show in reply
    async fn submit_user_message(&self, entries: FormEntries) -> Result<ChatEntry, ActionError>;
}

/// Shared handle to the host's [`ChatActions`]
#[derive(Clone)]
pub struct ActionsHandle(pub Rc<dyn ChatActions>);

impl ActionsHandle {
    pub fn new(actions: impl ChatActions + 'static) -> Self {
        Self(Rc::new(actions))
    }
}

impl PartialEq for ActionsHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl std::ops::Deref for ActionsHandle {
    type Target = dyn ChatActions;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// Append-only conversation log
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MessageLog {
    pub entries: Vec<ChatEntry>,
}

pub enum MessageLogAction {
    Append(ChatEntry),
    Clear,
}

impl Reducible for MessageLog {
    type Action = MessageLogAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        match action {
            MessageLogAction::Append(entry) => {
                let mut entries = self.entries.clone();
                entries.push(entry);
                Rc::new(Self { entries })
            }
            MessageLogAction::Clear => Rc::new(Self::default()),
        }
    }
}

/// Chat context data
#[derive(Clone, PartialEq)]
pub struct ChatContext {
    pub actions: ActionsHandle,
    pub log: UseReducerHandle<MessageLog>,
}

impl ChatContext {
    /// Callback that appends an entry to the log
    pub fn appender(&self) -> Callback<ChatEntry> {
        let log = self.log.clone();
        Callback::from(move |entry| log.dispatch(MessageLogAction::Append(entry)))
    }

    pub fn entries(&self) -> &[ChatEntry] {
        &self.log.entries
    }
}

#[derive(Properties, PartialEq)]
pub struct ChatProviderProps {
    pub actions: ActionsHandle,
    #[prop_or_default]
    pub initial: Vec<ChatEntry>,
    pub children: Children,
}

#[function_component(ChatProvider)]
pub fn chat_provider(props: &ChatProviderProps) -> Html {
    let log = use_reducer({
        let initial = props.initial.clone();
        move || MessageLog { entries: initial }
    });

    let context = ChatContext {
        actions: props.actions.clone(),
        log,
    };

    html! {
        <ContextProvider<ChatContext> context={context}>
            {props.children.clone()}
        </ContextProvider<ChatContext>>
    }
}

/// Hook to access the chat context, if a [`ChatProvider`] is mounted above
#[hook]
pub fn use_chat() -> Option<ChatContext> {
    use_context::<ChatContext>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_appends_in_order_and_clears() {
        let log = Rc::new(MessageLog::default());
        let first = ChatEntry::user("hi");
        let second = ChatEntry::bot("hello");

        let log = log.reduce(MessageLogAction::Append(first.clone()));
        let log = log.reduce(MessageLogAction::Append(second.clone()));
        assert_eq!(log.entries, vec![first, second]);

        let log = log.reduce(MessageLogAction::Clear);
        assert!(log.entries.is_empty());
    }
}
