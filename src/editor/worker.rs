//! Background thread for the assistant and its backends
//!
//! Replies are slow on purpose, so the UI hands jobs to this thread and
//! polls for results each frame.

use crate::context::Locale;
use crate::nodes::FlowGraph;
use crate::services::{
    analyze_workflow, ChatSession, DocumentId, EventLogger, MemoryCollection, MockFunctions, ResponseGenerator,
    ServiceError, WorkflowAnalysis,
};
use serde_json::json;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::JoinHandle;
use std::time::Duration;

/// Work the UI can hand off
#[derive(Debug, Clone)]
pub enum AssistantJob {
    Chat {
        prompt: String,
        locale: Locale,
        context: Option<String>,
    },
    Analyze {
        graph: FlowGraph,
        locale: Locale,
    },
    Archive {
        session: ChatSession,
        locale: Locale,
    },
}

/// Result of one job
#[derive(Debug)]
pub enum AssistantEvent {
    Reply(Result<String, ServiceError>),
    Analysis(Result<WorkflowAnalysis, ServiceError>),
    Archived(Result<DocumentId, ServiceError>),
}

/// Everything the worker thread owns
pub struct Backends {
    generator: Box<dyn ResponseGenerator + Send>,
    functions: MockFunctions,
    conversations: MemoryCollection,
    analyses: MemoryCollection,
}

impl Backends {
    pub fn new(generator: Box<dyn ResponseGenerator + Send>) -> Self {
        Self {
            generator,
            functions: MockFunctions::new(),
            conversations: MemoryCollection::new("conversations"),
            analyses: MemoryCollection::new("analyses"),
        }
    }

    pub fn handle(&mut self, job: AssistantJob) -> AssistantEvent {
        match job {
            AssistantJob::Chat {
                prompt,
                locale,
                context,
            } => {
                let reply = self.generator.respond(&prompt, locale, context.as_deref());
                if reply.is_ok() {
                    let event = json!({ "event": "chat_message", "language": locale.code() });
                    if let Err(err) = self.functions.call("logEvent", event) {
                        log::warn!("Analytics call failed: {}", err);
                    }
                }
                AssistantEvent::Reply(reply)
            }
            AssistantJob::Analyze { graph, locale } => AssistantEvent::Analysis(analyze_workflow(
                &graph,
                locale,
                self.generator.as_mut(),
                &mut self.functions,
                &mut self.analyses,
            )),
            AssistantJob::Archive { session, locale } => {
                AssistantEvent::Archived(session.archive(&mut self.conversations, locale))
            }
        }
    }

    pub fn functions(&self) -> &MockFunctions {
        &self.functions
    }

    pub fn conversations(&self) -> &MemoryCollection {
        &self.conversations
    }
}

/// Handle to the worker thread. Dropping it stops the thread.
pub struct AssistantWorker {
    jobs: Option<Sender<AssistantJob>>,
    events: Receiver<AssistantEvent>,
    in_flight: usize,
    handle: Option<JoinHandle<()>>,
}

impl AssistantWorker {
    pub fn spawn(generator: Box<dyn ResponseGenerator + Send>) -> Self {
        let (job_tx, job_rx) = mpsc::channel::<AssistantJob>();
        let (event_tx, event_rx) = mpsc::channel();

        let handle = std::thread::Builder::new()
            .name("assistant".to_string())
            .spawn(move || {
                let mut backends = Backends::new(generator);
                for job in job_rx {
                    if event_tx.send(backends.handle(job)).is_err() {
                        break;
                    }
                }
                log::debug!("Assistant worker stopped");
            });

        let handle = match handle {
            Ok(handle) => Some(handle),
            Err(err) => {
                log::error!("Could not start assistant worker: {}", err);
                None
            }
        };

        Self {
            jobs: handle.as_ref().map(|_| job_tx),
            events: event_rx,
            in_flight: 0,
            handle,
        }
    }

    /// Queues a job; false when the worker is gone
    pub fn submit(&mut self, job: AssistantJob) -> bool {
        let Some(jobs) = &self.jobs else {
            return false;
        };
        match jobs.send(job) {
            Ok(()) => {
                self.in_flight += 1;
                true
            }
            Err(_) => {
                log::error!("Assistant worker is not running");
                self.jobs = None;
                false
            }
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    /// Finished jobs, without blocking. Jobs lost to a dead worker come back
    /// as failed replies.
    pub fn poll(&mut self) -> Vec<AssistantEvent> {
        let mut finished = Vec::new();
        loop {
            match self.events.try_recv() {
                Ok(event) => {
                    self.in_flight = self.in_flight.saturating_sub(1);
                    finished.push(event);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    finished.extend(self.abandon_pending());
                    break;
                }
            }
        }
        finished
    }

    /// Blocks until the next job finishes or `timeout` passes
    pub fn wait(&mut self, timeout: Duration) -> Option<AssistantEvent> {
        match self.events.recv_timeout(timeout) {
            Ok(event) => {
                self.in_flight = self.in_flight.saturating_sub(1);
                Some(event)
            }
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                let mut lost = self.abandon_pending();
                // Leave the rest for the next poll or wait
                let first = lost.pop();
                self.in_flight = lost.len();
                first
            }
        }
    }

    /// Marks the worker dead and fails every job still pending
    fn abandon_pending(&mut self) -> Vec<AssistantEvent> {
        if self.jobs.take().is_some() {
            log::error!("Assistant worker stopped with {} job(s) pending", self.in_flight);
        }
        let lost = std::mem::take(&mut self.in_flight);
        (0..lost)
            .map(|_| AssistantEvent::Reply(Err(ServiceError::Unavailable("assistant".to_string()))))
            .collect()
    }

    /// Stops accepting jobs and waits for the thread to finish the queue
    pub fn shutdown(&mut self) {
        self.jobs = None;
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("Assistant worker panicked");
            }
        }
    }
}

impl Drop for AssistantWorker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
