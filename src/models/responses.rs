use serde::{Deserialize, Serialize};
use crate::models::domain::EnrichedEvent;

/// Output of one run, handed to whatever renders it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub total_events: usize,
    pub matched_events: usize,
    pub events: Vec<EnrichedEvent>,
}

impl MatchReport {
    pub fn new(total_events: usize, events: Vec<EnrichedEvent>) -> Self {
        Self {
            generated_at: chrono::Utc::now(),
            total_events,
            matched_events: events.len(),
            events,
        }
    }
}
