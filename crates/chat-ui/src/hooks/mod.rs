//! Custom hooks for the chat components

mod use_streamable_text;

pub use use_streamable_text::use_streamable_text;
