#[macro_use]
extern crate log;

pub mod api;
pub use api::{ChatClient, ChatConfig, ChatError, ChatReply, ChatRequest};

mod assistant;
pub use assistant::{AssistantError, HealthAssistant, QueryAnswer};

mod chat;
pub use chat::{ChatSession, HealthSnapshot};
