//! Service seams the editor talks to
//!
//! Each backend is a trait with a mock implementation so a real service can be
//! swapped in without touching call sites.

pub mod ai;
pub mod analysis;
pub mod chat;
pub mod events;
pub mod storage;

pub use ai::{AssistantSettings, MockAssistant, ResponseGenerator};
pub use analysis::{analyze_workflow, WorkflowAnalysis, WorkflowSummary};
pub use chat::{ChatMessage, ChatRole, ChatSession};
pub use events::{DocumentCollection, DocumentId, EventLogger, MemoryCollection, MockFunctions};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StoreError};

use thiserror::Error;

/// Errors from the mock backends
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Message is empty")]
    EmptyMessage,

    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Invalid payload: {0}")]
    Payload(#[from] serde_json::Error),
}
