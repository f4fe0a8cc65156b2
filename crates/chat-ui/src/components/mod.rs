mod bot_message;
mod code_block;
mod icons;
mod markdown;
mod message_list;
mod random_component;
mod spinner;
mod spinner_message;
mod user_message;

pub use bot_message::{BotCard, BotMessage};
pub use code_block::CodeBlock;
pub use icons::{IconBot, IconUser};
pub use markdown::Markdown;
pub use message_list::MessageList;
pub use random_component::RandomComponent;
pub use spinner::Spinner;
pub use spinner_message::SpinnerMessage;
pub use user_message::UserMessage;
