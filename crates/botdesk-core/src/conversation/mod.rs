//! Conversation domain module.
//!
//! - `message`: Chat message types (`Message`, `MessageSender`)
//! - `store`: Per-assistant append-only histories (`ConversationStore`)
//! - `render`: Paragraph/list/quote blocks for presenting message text

mod message;
mod render;
mod store;

// Re-export public API
pub use message::{Message, MessageId, MessageSender};
pub use render::{MessageBlock, render_blocks};
pub use store::ConversationStore;
