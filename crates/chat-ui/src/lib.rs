pub mod components;
pub mod config;
pub mod dom;
pub mod error;
pub mod hooks;
pub mod store;
pub mod styles;
pub mod types;
pub mod utils;
pub mod widget;

// Re-export main components
pub use components::{
    BotCard, BotMessage, CodeBlock, Markdown, MessageList, RandomComponent, SpinnerMessage,
    UserMessage,
};
pub use error::{ActionError, DomError, InjectError, StreamError, SubmitError};
pub use hooks::use_streamable_text;
pub use store::{ActionsHandle, ChatActions, ChatContext, ChatProvider, use_chat};
pub use types::{
    ChatEntry, EntryKind, FormEntries, Fragment, MessageContent, ScriptPolicy, StreamableText,
};
pub use widget::MountState;
