use tokio_util::sync::CancellationToken;

use crate::client::RawResponse;
use crate::error::{BridgeError, ErrorKind};
use crate::planner::{GenerationRequest, TravelPlan, TripInput, TripRequest};

use super::outcome::BridgeOutcome;
use super::types::StageKind;

/// Per-run state threaded through the stages. Each stage consumes the
/// previous stage's product and leaves its own behind.
#[derive(Debug)]
pub struct BridgeContext {
    pub input: TripInput,
    pub trip: Option<TripRequest>,
    pub generation: Option<GenerationRequest>,
    pub response: Option<RawResponse>,
    pub generated_text: Option<String>,
    pub plan: Option<TravelPlan>,
    cancel: CancellationToken,
    events: Vec<BridgeEvent>,
}

impl BridgeContext {
    pub fn new(input: TripInput, cancel: CancellationToken) -> Self {
        Self {
            input,
            trip: None,
            generation: None,
            response: None,
            generated_text: None,
            plan: None,
            cancel,
            events: Vec::new(),
        }
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn record_event(&mut self, event: BridgeEvent) {
        self.events.push(event);
    }

    pub fn record_stage_start(&mut self, stage: StageKind) {
        self.record_event(BridgeEvent::StageStarted(stage));
    }

    pub fn record_stage_end(&mut self, stage: StageKind) {
        self.record_event(BridgeEvent::StageCompleted(stage));
    }

    pub fn record_stage_failure(&mut self, stage: StageKind, error: &BridgeError) {
        self.record_event(BridgeEvent::StageFailed {
            stage,
            kind: error.kind(),
            message: error.to_string(),
        });
    }

    pub fn record_plan(&mut self, plan: TravelPlan) {
        let attractions = plan.attractions().len();
        let days = plan.daily_itinerary().len();
        self.plan = Some(plan);
        self.record_event(BridgeEvent::PlanReady { attractions, days });
    }

    pub fn into_run(self) -> BridgeRun {
        let BridgeContext { plan, events, .. } = self;
        let outcome = match plan {
            Some(plan) => BridgeOutcome::Parsed(plan),
            None => BridgeOutcome::failed(
                StageKind::Normalizing,
                BridgeError::Unexpected("Pipeline finished without a travel plan".to_string()),
            ),
        };
        BridgeRun { outcome, events }
    }

    pub fn into_run_with_outcome(self, outcome: BridgeOutcome) -> BridgeRun {
        let BridgeContext { events, .. } = self;
        BridgeRun { outcome, events }
    }
}

#[derive(Debug)]
pub struct BridgeRun {
    pub outcome: BridgeOutcome,
    pub events: Vec<BridgeEvent>,
}

impl BridgeRun {
    pub fn into_result(self) -> Result<TravelPlan, BridgeError> {
        self.outcome.into_result()
    }
}

/// Audit trail of a run, in the order things happened.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeEvent {
    StageStarted(StageKind),
    StageCompleted(StageKind),
    StageFailed {
        stage: StageKind,
        kind: ErrorKind,
        message: String,
    },
    PlanReady {
        attractions: usize,
        days: usize,
    },
}
