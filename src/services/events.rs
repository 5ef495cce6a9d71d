//! Mock analytics and document backends
//!
//! [`EventLogger`] stands in for a hosted callable function and
//! [`DocumentCollection`] for a document store collection.

use super::ServiceError;
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

/// Identifier assigned to a stored document
pub type DocumentId = String;

/// Remote function taking and returning JSON
pub trait EventLogger {
    fn call(&mut self, name: &str, payload: Value) -> Result<Value, ServiceError>;
}

/// Collection that accepts documents
pub trait DocumentCollection {
    fn add(&mut self, document: Value) -> Result<DocumentId, ServiceError>;
}

/// A recorded function call
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub name: String,
    pub payload: Value,
}

/// Logs calls and answers with a success envelope
#[derive(Debug, Clone, Default)]
pub struct MockFunctions {
    calls: Vec<RecordedCall>,
    offline: bool,
}

impl MockFunctions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails, for exercising fallbacks
    pub fn offline() -> Self {
        Self {
            calls: Vec::new(),
            offline: true,
        }
    }

    pub fn calls(&self) -> &[RecordedCall] {
        &self.calls
    }
}

impl EventLogger for MockFunctions {
    fn call(&mut self, name: &str, payload: Value) -> Result<Value, ServiceError> {
        if self.offline {
            return Err(ServiceError::Unavailable(format!("function '{}'", name)));
        }
        log::info!("Function call {}: {}", name, payload);
        self.calls.push(RecordedCall {
            name: name.to_string(),
            payload,
        });
        Ok(json!({
            "success": true,
            "id": Uuid::new_v4().to_string(),
            "timestamp": Utc::now().to_rfc3339(),
        }))
    }
}

/// Documents kept in memory in insertion order
#[derive(Debug, Clone, Default)]
pub struct MemoryCollection {
    name: String,
    documents: Vec<(DocumentId, Value)>,
}

impl MemoryCollection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            documents: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn documents(&self) -> &[(DocumentId, Value)] {
        &self.documents
    }

    pub fn get(&self, id: &str) -> Option<&Value> {
        self.documents
            .iter()
            .find(|(doc_id, _)| doc_id == id)
            .map(|(_, doc)| doc)
    }
}

impl DocumentCollection for MemoryCollection {
    fn add(&mut self, mut document: Value) -> Result<DocumentId, ServiceError> {
        let id = Uuid::new_v4().to_string();
        if let Value::Object(fields) = &mut document {
            fields
                .entry("createdAt")
                .or_insert_with(|| Value::String(Utc::now().to_rfc3339()));
        }
        log::debug!("Added document {} to '{}'", id, self.name);
        self.documents.push((id.clone(), document));
        Ok(id)
    }
}
