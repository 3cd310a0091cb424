use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, info_span, warn};

use crate::client::DynGenerationClient;
use crate::error::BridgeError;
use crate::planner::{PlanParser, TravelPlan, TripInput, parse_travel_plan};

use super::context::{BridgeContext, BridgeRun};
use super::outcome::BridgeOutcome;
use super::stages::{
    BridgeStage, CallStage, ExtractionStage, NormalizationStage, PromptStage, ValidationStage,
};

/// Runs the trip-planning stages in order and stops at the first failure.
pub struct BridgeOrchestrator {
    stages: Vec<Box<dyn BridgeStage>>,
}

impl BridgeOrchestrator {
    /// Standard pipeline around `client` with the default plan parser.
    pub fn new(client: Arc<DynGenerationClient>) -> Self {
        Self::builder()
            .with_standard_stages(client, parse_travel_plan)
            .build()
    }

    pub fn from_stages(stages: Vec<Box<dyn BridgeStage>>) -> Self {
        Self { stages }
    }

    pub fn builder() -> BridgePipelineBuilder {
        BridgePipelineBuilder::new()
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub async fn run(&self, input: TripInput, cancel: CancellationToken) -> BridgeRun {
        let span = info_span!(
            "bridge_run",
            destination = %input.destination,
            duration = %input.duration,
            stages = self.stage_count()
        );
        self.run_stages(input, cancel).instrument(span).await
    }

    /// `generateTravelPlan`: one destination and duration in, one plan or
    /// error out. Dropping the returned future abandons the provider call.
    pub async fn generate_travel_plan(
        &self,
        destination: &str,
        duration: &str,
    ) -> Result<TravelPlan, BridgeError> {
        self.run(TripInput::new(destination, duration), CancellationToken::new())
            .await
            .into_result()
    }

    async fn run_stages(&self, input: TripInput, cancel: CancellationToken) -> BridgeRun {
        let mut context = BridgeContext::new(input, cancel);

        for stage in &self.stages {
            let kind = stage.kind();
            context.record_stage_start(kind);
            debug!(stage = %kind, "stage started");
            match stage.execute(&mut context).await {
                Ok(()) => {
                    context.record_stage_end(kind);
                }
                Err(error) => {
                    warn!(stage = %kind, kind = %error.kind(), error = %error, "stage failed");
                    context.record_stage_failure(kind, &error);
                    let outcome = BridgeOutcome::failed(kind, error);
                    return context.into_run_with_outcome(outcome);
                }
            }
        }

        let run = context.into_run();
        if run.outcome.is_parsed() {
            info!("travel plan ready");
        }
        run
    }
}

pub struct BridgePipelineBuilder {
    stages: Vec<Box<dyn BridgeStage>>,
}

impl BridgePipelineBuilder {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    pub fn add_stage<S>(mut self, stage: S) -> Self
    where
        S: BridgeStage + 'static,
    {
        self.stages.push(Box::new(stage));
        self
    }

    pub fn with_standard_stages(self, client: Arc<DynGenerationClient>, parser: PlanParser) -> Self {
        self.add_stage(ValidationStage)
            .add_stage(PromptStage)
            .add_stage(CallStage::new(client))
            .add_stage(ExtractionStage)
            .add_stage(NormalizationStage::new(parser))
    }

    pub fn build(self) -> BridgeOrchestrator {
        BridgeOrchestrator::from_stages(self.stages)
    }
}

impl Default for BridgePipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
