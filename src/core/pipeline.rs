use crate::core::error::MatchError;
use crate::core::filters::{compile, CompiledFilter};
use crate::core::matcher::ProximityMatcher;
use crate::models::{Availability, EnrichedEvent, Event, FilterSpec, PointOfInterest};

/// One neighbor category attached to every surviving event
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Output field the ranked list is stored under
    pub field: String,
    pub candidates: Vec<PointOfInterest>,
    pub matcher: ProximityMatcher,
    pub availability: Availability,
}

impl MatchConfig {
    pub fn new(
        field: impl Into<String>,
        candidates: Vec<PointOfInterest>,
        matcher: ProximityMatcher,
        availability: Availability,
    ) -> Self {
        Self {
            field: field.into(),
            candidates,
            matcher,
            availability,
        }
    }
}

/// Filters events and attaches ranked neighbor lists to the survivors
#[derive(Debug, Clone, Default)]
pub struct MatchPipeline {
    filter: Option<CompiledFilter>,
    configs: Vec<MatchConfig>,
}

impl MatchPipeline {
    pub fn new(filter: Option<CompiledFilter>, configs: Vec<MatchConfig>) -> Self {
        Self { filter, configs }
    }

    /// Build a pipeline from an uncompiled filter specification
    pub fn from_spec(spec: Option<&FilterSpec>, configs: Vec<MatchConfig>) -> Result<Self, MatchError> {
        let filter = spec.map(compile).transpose()?;
        Ok(Self::new(filter, configs))
    }

    pub fn configs(&self) -> &[MatchConfig] {
        &self.configs
    }

    /// Run the pipeline
    ///
    /// Output order is the input order with rejected events removed. Any
    /// malformed date or coordinate aborts the whole run.
    pub fn run(&self, events: &[Event]) -> Result<Vec<EnrichedEvent>, MatchError> {
        let mut enriched = Vec::new();

        for event in events {
            if let Some(filter) = &self.filter {
                if !filter.matches(event)? {
                    continue;
                }
            }
            enriched.push(self.enrich(event)?);
        }

        tracing::info!(
            "Matched {} of {} events across {} categories",
            enriched.len(),
            events.len(),
            self.configs.len()
        );

        Ok(enriched)
    }

    fn enrich(&self, event: &Event) -> Result<EnrichedEvent, MatchError> {
        let mut enriched = EnrichedEvent::new(event.clone());

        for config in &self.configs {
            let availability = config.availability;
            let neighbors = config.matcher.rank(
                event,
                &config.candidates,
                Some(move |point: &PointOfInterest| availability.admits(point)),
            )?;
            tracing::debug!("{}: {} {} within {}m", event.name, neighbors.len(), config.field, config.matcher.radius_m());
            enriched.neighbors.insert(config.field.clone(), neighbors);
        }

        Ok(enriched)
    }
}
