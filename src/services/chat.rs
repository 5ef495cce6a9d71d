//! Assistant conversation state

use super::ai::ResponseGenerator;
use super::events::{DocumentCollection, DocumentId};
use super::storage::{load_json, save_json, KeyValueStore};
use super::ServiceError;
use crate::constants::storage;
use crate::context::Locale;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: ChatRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Reply shown when the assistant fails
pub fn fallback_reply(locale: Locale) -> &'static str {
    match locale {
        Locale::English => "Sorry, something went wrong. Please try again.",
        Locale::Arabic => "عذراً، حدث خطأ ما. يرجى المحاولة مرة أخرى.",
    }
}

/// Ordered list of chat messages
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Appends a user message; blank input is ignored
    pub fn push_user(&mut self, text: &str) -> Option<&ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.messages.push(ChatMessage::new(ChatRole::User, text));
        self.messages.last()
    }

    /// Appends the assistant's answer, substituting the apology on failure
    pub fn push_reply(&mut self, reply: Result<String, ServiceError>, locale: Locale) -> &ChatMessage {
        let text = match reply {
            Ok(text) => text,
            Err(err) => {
                log::error!("Assistant failed: {}", err);
                fallback_reply(locale).to_string()
            }
        };
        self.messages.push(ChatMessage::new(ChatRole::Assistant, text));
        &self.messages[self.messages.len() - 1]
    }

    /// Sends a message and waits for the reply
    pub fn send(
        &mut self,
        text: &str,
        locale: Locale,
        context: Option<&str>,
        generator: &mut dyn ResponseGenerator,
    ) -> Option<&ChatMessage> {
        let prompt = self.push_user(text)?.text.clone();
        let reply = generator.respond(&prompt, locale, context);
        Some(self.push_reply(reply, locale))
    }

    /// Loads the saved conversation, or an empty one
    pub fn restore(store: &dyn KeyValueStore) -> Self {
        load_json(store, storage::CHAT_HISTORY).unwrap_or_default()
    }

    /// Best-effort save of the conversation
    pub fn persist(&self, store: &mut dyn KeyValueStore) -> bool {
        save_json(store, storage::CHAT_HISTORY, self)
    }

    /// Stores the whole conversation as one document
    pub fn archive(&self, collection: &mut dyn DocumentCollection, locale: Locale) -> Result<DocumentId, ServiceError> {
        let document = json!({
            "language": locale.code(),
            "messageCount": self.messages.len(),
            "messages": serde_json::to_value(&self.messages)?,
        });
        collection.add(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ai::{AssistantSettings, MockAssistant};
    use crate::services::events::MemoryCollection;
    use crate::services::storage::MemoryStore;

    struct BrokenGenerator;

    impl ResponseGenerator for BrokenGenerator {
        fn respond(&mut self, _: &str, _: Locale, _: Option<&str>) -> Result<String, ServiceError> {
            Err(ServiceError::Unavailable("model".to_string()))
        }
    }

    #[test]
    fn test_send_records_both_sides() {
        let mut session = ChatSession::new();
        let mut ai = MockAssistant::with_seed(AssistantSettings::instant(), 3);
        let reply = session.send("hello", Locale::English, None, &mut ai).unwrap();
        assert_eq!(reply.role, ChatRole::Assistant);
        assert!(reply.text.starts_with("Hello!"));
        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.messages()[0].text, "hello");
    }

    #[test]
    fn test_blank_input_is_ignored() {
        let mut session = ChatSession::new();
        let mut ai = MockAssistant::with_seed(AssistantSettings::instant(), 3);
        assert!(session.send("  \n ", Locale::English, None, &mut ai).is_none());
        assert!(session.is_empty());
    }

    #[test]
    fn test_failure_becomes_apology_in_locale() {
        let mut session = ChatSession::new();
        let reply = session.send("مرحبا", Locale::Arabic, None, &mut BrokenGenerator).unwrap();
        assert_eq!(reply.text, fallback_reply(Locale::Arabic));
    }

    #[test]
    fn test_persist_and_restore() {
        let mut store = MemoryStore::new();
        let mut session = ChatSession::new();
        session.push_user("first");
        session.push_reply(Ok("answer".to_string()), Locale::English);
        assert!(session.persist(&mut store));

        let restored = ChatSession::restore(&store);
        assert_eq!(restored, session);
    }

    #[test]
    fn test_restore_from_corrupt_value_starts_empty() {
        let mut store = MemoryStore::new();
        store.set(storage::CHAT_HISTORY, "oops".to_string()).unwrap();
        assert!(ChatSession::restore(&store).is_empty());
    }

    #[test]
    fn test_archive_writes_one_document() {
        let mut session = ChatSession::new();
        session.push_user("a");
        session.push_reply(Ok("b".to_string()), Locale::English);
        let mut collection = MemoryCollection::new("conversations");
        let id = session.archive(&mut collection, Locale::English).unwrap();
        let doc = collection.get(&id).unwrap();
        assert_eq!(doc["messageCount"], 2);
        assert_eq!(doc["messages"][1]["role"], "assistant");
        assert_eq!(doc["language"], "en");
    }
}
