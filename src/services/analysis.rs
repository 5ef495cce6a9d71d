//! Workflow review: summarize the canvas, ask the assistant, keep a record

use super::ai::ResponseGenerator;
use super::events::{DocumentCollection, DocumentId, EventLogger};
use super::ServiceError;
use crate::context::Locale;
use crate::i18n;
use crate::nodes::{FlowGraph, NodeId, NodeKind};
use serde::Serialize;
use serde_json::json;
use std::collections::{BTreeMap, HashSet};

/// Structural facts about a graph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowSummary {
    pub node_count: usize,
    pub connection_count: usize,
    pub by_kind: BTreeMap<NodeKind, usize>,
    /// Nodes with no connections at all
    pub unconnected: Vec<NodeId>,
    pub has_trigger: bool,
    pub has_output: bool,
}

impl WorkflowSummary {
    pub fn from_graph(graph: &FlowGraph) -> Self {
        let mut by_kind = BTreeMap::new();
        for node in &graph.nodes {
            *by_kind.entry(node.kind).or_insert(0) += 1;
        }
        let linked: HashSet<NodeId> = graph
            .connections
            .iter()
            .flat_map(|conn| [conn.from_node, conn.to_node])
            .collect();
        let unconnected = graph
            .nodes
            .iter()
            .map(|node| node.id)
            .filter(|id| !linked.contains(id))
            .collect();

        Self {
            node_count: graph.nodes.len(),
            connection_count: graph.connections.len(),
            has_trigger: by_kind.contains_key(&NodeKind::Trigger),
            has_output: by_kind.contains_key(&NodeKind::Output),
            by_kind,
            unconnected,
        }
    }

    /// Human-readable summary used as assistant context
    pub fn describe(&self, locale: Locale) -> String {
        let kinds = self
            .by_kind
            .iter()
            .map(|(kind, count)| format!("{} × {}", count, i18n::kind_label(*kind, locale)))
            .collect::<Vec<_>>()
            .join(", ");

        let mut lines = match locale {
            Locale::English => vec![
                format!("{} nodes, {} connections.", self.node_count, self.connection_count),
                format!("Node types: {}.", if kinds.is_empty() { "none".to_string() } else { kinds }),
            ],
            Locale::Arabic => vec![
                format!("{} عقد، {} روابط.", self.node_count, self.connection_count),
                format!("أنواع العقد: {}.", if kinds.is_empty() { "لا شيء".to_string() } else { kinds }),
            ],
        };

        if !self.has_trigger {
            lines.push(i18n::tr(locale, "analysis.no_trigger").to_string());
        }
        if !self.has_output {
            lines.push(i18n::tr(locale, "analysis.no_output").to_string());
        }
        if !self.unconnected.is_empty() {
            lines.push(format!(
                "{} {}",
                i18n::tr(locale, "analysis.unconnected"),
                self.unconnected.len()
            ));
        }
        lines.join("\n")
    }
}

/// Outcome of a workflow review
#[derive(Debug, Clone)]
pub struct WorkflowAnalysis {
    pub summary: WorkflowSummary,
    pub reply: String,
    /// Stored record, when the collection accepted it
    pub document_id: Option<DocumentId>,
}

/// Summarizes `graph`, asks the assistant about it, logs an analytics event,
/// and stores the result. Only the assistant call is fatal; logging and
/// storage failures are reported and skipped.
pub fn analyze_workflow(
    graph: &FlowGraph,
    locale: Locale,
    generator: &mut dyn ResponseGenerator,
    events: &mut dyn EventLogger,
    collection: &mut dyn DocumentCollection,
) -> Result<WorkflowAnalysis, ServiceError> {
    let summary = WorkflowSummary::from_graph(graph);
    let context = summary.describe(locale);
    let reply = generator.respond(i18n::tr(locale, "analysis.prompt"), locale, Some(&context))?;

    if let Err(err) = events.call(
        "logEvent",
        json!({
            "event": "workflow_analyzed",
            "nodes": summary.node_count,
            "connections": summary.connection_count,
            "language": locale.code(),
        }),
    ) {
        log::warn!("Analytics call failed: {}", err);
    }

    let document = json!({
        "summary": serde_json::to_value(&summary)?,
        "reply": reply,
        "language": locale.code(),
    });
    let document_id = match collection.add(document) {
        Ok(id) => Some(id),
        Err(err) => {
            log::warn!("Could not store analysis: {}", err);
            None
        }
    };

    Ok(WorkflowAnalysis {
        summary,
        reply,
        document_id,
    })
}
