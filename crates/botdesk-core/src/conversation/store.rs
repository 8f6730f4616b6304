use std::collections::HashMap;

use super::message::{Message, MessageId};
use crate::assistant::AssistantRegistry;

/// Per-assistant, append-only message histories.
///
/// A missing key reads as an empty history. The store is not internally
/// synchronized; it lives inside the session state and every append goes
/// through the session lock, which keeps appends to one assistant in call
/// order.
#[derive(Debug, Default)]
pub struct ConversationStore {
    histories: HashMap<String, Vec<Message>>,
    last_id: MessageId,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding one greeting message per registered assistant.
    pub fn seeded(registry: &AssistantRegistry) -> Self {
        let mut store = Self::new();
        for assistant in registry.list_assistants() {
            if let Some(greeting) = registry.greeting(&assistant.id) {
                let id = store.next_message_id();
                store.append(&assistant.id, Message::from_assistant(id, &assistant.id, greeting));
            }
        }
        store
    }

    /// Allocates the next message id.
    pub fn next_message_id(&mut self) -> MessageId {
        self.last_id += 1;
        self.last_id
    }

    /// Returns the history for an assistant, oldest first.
    pub fn history(&self, assistant_id: &str) -> &[Message] {
        self.histories
            .get(assistant_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn append(&mut self, assistant_id: &str, message: Message) {
        self.histories
            .entry(assistant_id.to_string())
            .or_default()
            .push(message);
    }

    pub fn len(&self, assistant_id: &str) -> usize {
        self.history(assistant_id).len()
    }
}
