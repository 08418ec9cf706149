use std::time::Duration;

use chrono::{ DateTime, Utc };
use serde::Serialize;

/// One observation appended to a trace
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceEvent {
    Routed { category: String },
    Retrieved { document: String, source: String },
    Drafted { characters: usize },
}

/// Append-only observability record attached to a completed run.
/// Nothing in the engine reads it back to make decisions.
#[derive(Debug, Clone, Serialize)]
pub struct TraceRecord {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub model: String,
    events: Vec<TraceEvent>,
    elapsed_ms: Option<u128>,
}

impl TraceRecord {
    pub fn start(model: impl Into<String>) -> Self {
        let started_at = Utc::now();
        Self {
            run_id: format!("run_{}", started_at.timestamp_nanos_opt().unwrap_or_default()),
            started_at,
            model: model.into(),
            events: Vec::new(),
            elapsed_ms: None,
        }
    }

    pub fn record(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    /// Stamp the wall-clock cost; only the first call sticks
    pub fn finish(&mut self, elapsed: Duration) {
        if self.elapsed_ms.is_none() {
            self.elapsed_ms = Some(elapsed.as_millis());
        }
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    pub fn elapsed_ms(&self) -> Option<u128> {
        self.elapsed_ms
    }
}
