//! Narrator adapters.

pub mod openai_chat;
pub mod prompt;
pub mod template;

pub use openai_chat::OpenAiChatNarrator;
pub use template::TemplateNarrator;
