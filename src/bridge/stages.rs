use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::client::DynGenerationClient;
use crate::error::BridgeError;
use crate::planner::{GenerationRequest, PlanParser, TripRequest, extract_generated_text};

use super::context::BridgeContext;
use super::types::StageKind;

#[async_trait]
pub trait BridgeStage: Send + Sync {
    fn kind(&self) -> StageKind;

    async fn execute(&self, context: &mut BridgeContext) -> Result<(), BridgeError>;
}

fn missing(stage: StageKind, what: &str) -> BridgeError {
    BridgeError::Unexpected(format!("{stage} stage ran without {what}"))
}

/// Trims the caller's input and rejects empty fields.
pub struct ValidationStage;

#[async_trait]
impl BridgeStage for ValidationStage {
    fn kind(&self) -> StageKind {
        StageKind::Validating
    }

    async fn execute(&self, context: &mut BridgeContext) -> Result<(), BridgeError> {
        let trip = TripRequest::try_from(&context.input)?;
        context.trip = Some(trip);
        Ok(())
    }
}

pub struct PromptStage;

#[async_trait]
impl BridgeStage for PromptStage {
    fn kind(&self) -> StageKind {
        StageKind::Prompting
    }

    async fn execute(&self, context: &mut BridgeContext) -> Result<(), BridgeError> {
        let trip = context
            .trip
            .take()
            .ok_or_else(|| missing(self.kind(), "a validated trip"))?;
        let generation = GenerationRequest::from_trip(&trip);
        debug!(prompt_chars = generation.prompt_text.len(), "prompt built");
        context.generation = Some(generation);
        Ok(())
    }
}

/// Makes the provider call. A non-2xx status fails the stage without the
/// body being looked at.
pub struct CallStage {
    client: Arc<DynGenerationClient>,
}

impl CallStage {
    pub fn new(client: Arc<DynGenerationClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BridgeStage for CallStage {
    fn kind(&self) -> StageKind {
        StageKind::Calling
    }

    async fn execute(&self, context: &mut BridgeContext) -> Result<(), BridgeError> {
        let generation = context
            .generation
            .take()
            .ok_or_else(|| missing(self.kind(), "a generation request"))?;

        let response = self
            .client
            .send(&generation, context.cancel_token())
            .await?;

        if !response.is_success() {
            return Err(BridgeError::upstream_status(response.status));
        }

        context.response = Some(response);
        Ok(())
    }
}

pub struct ExtractionStage;

#[async_trait]
impl BridgeStage for ExtractionStage {
    fn kind(&self) -> StageKind {
        StageKind::Extracting
    }

    async fn execute(&self, context: &mut BridgeContext) -> Result<(), BridgeError> {
        let response = context
            .response
            .take()
            .ok_or_else(|| missing(self.kind(), "a provider response"))?;
        let text = extract_generated_text(&response.body)?;
        debug!(text_chars = text.len(), "generated text extracted");
        context.generated_text = Some(text);
        Ok(())
    }
}

/// Turns generated text into a plan using the configured parser.
pub struct NormalizationStage {
    parser: PlanParser,
}

impl NormalizationStage {
    pub fn new(parser: PlanParser) -> Self {
        Self { parser }
    }
}

#[async_trait]
impl BridgeStage for NormalizationStage {
    fn kind(&self) -> StageKind {
        StageKind::Normalizing
    }

    async fn execute(&self, context: &mut BridgeContext) -> Result<(), BridgeError> {
        let text = context
            .generated_text
            .take()
            .ok_or_else(|| missing(self.kind(), "generated text"))?;
        let plan = (self.parser)(&text)?;
        context.record_plan(plan);
        Ok(())
    }
}
