mod fragment;
mod streamable;

pub use fragment::{Fragment, ScriptPolicy};
pub use streamable::{StreamSubscription, StreamableText};

use serde::{Deserialize, Serialize};
use std::cell::Cell;

/// Text shown in a bot bubble: final, or still streaming in
#[derive(Clone, Debug, PartialEq)]
pub enum MessageContent {
    Text(String),
    Stream(StreamableText),
}

impl MessageContent {
    /// Current text, whether final or partial
    pub fn snapshot(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Stream(stream) => stream.snapshot(),
        }
    }

    pub fn is_streaming(&self) -> bool {
        match self {
            Self::Text(_) => false,
            Self::Stream(stream) => !stream.is_done(),
        }
    }
}

impl Default for MessageContent {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<String> for MessageContent {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for MessageContent {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<StreamableText> for MessageContent {
    fn from(stream: StreamableText) -> Self {
        Self::Stream(stream)
    }
}

/// Name/value pairs read from a submitted form, in document order
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormEntries(Vec<(String, String)>);

impl FormEntries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// First value submitted under `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<(String, String)> {
        self.0
    }
}

impl From<Vec<(String, String)>> for FormEntries {
    fn from(entries: Vec<(String, String)>) -> Self {
        Self(entries)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormEntries {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// One item of the conversation
#[derive(Clone, Debug, PartialEq)]
pub struct ChatEntry {
    pub id: String,
    pub kind: EntryKind,
}

/// What a chat entry renders as
#[derive(Clone, Debug, PartialEq)]
pub enum EntryKind {
    User(String),
    Bot(MessageContent),
    Card { text: String, show_avatar: bool },
    Widget {
        fragment: Fragment,
        policy: ScriptPolicy,
    },
    Spinner,
}

thread_local! {
    static NEXT_ENTRY_ID: Cell<u64> = const { Cell::new(0) };
}

/// Process-unique id with the given prefix
pub fn next_id(prefix: &str) -> String {
    let id = NEXT_ENTRY_ID.with(|next| {
        let id = next.get();
        next.set(id + 1);
        id
    });
    format!("{prefix}-{id}")
}

impl ChatEntry {
    pub fn new(kind: EntryKind) -> Self {
        Self {
            id: next_id("entry"),
            kind,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(EntryKind::User(text.into()))
    }

    pub fn bot(content: impl Into<MessageContent>) -> Self {
        Self::new(EntryKind::Bot(content.into()))
    }

    pub fn card(text: impl Into<String>) -> Self {
        Self::new(EntryKind::Card {
            text: text.into(),
            show_avatar: true,
        })
    }

    pub fn widget(fragment: Fragment, policy: ScriptPolicy) -> Self {
        Self::new(EntryKind::Widget { fragment, policy })
    }

    pub fn spinner() -> Self {
        Self::new(EntryKind::Spinner)
    }
}
