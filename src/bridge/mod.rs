//! The trip-planning pipeline: validate, prompt, call, extract, normalize.

pub mod context;
pub mod orchestrator;
pub mod outcome;
pub mod stages;
pub mod types;

#[allow(unused_imports)]
pub use context::{BridgeContext, BridgeEvent, BridgeRun};
pub use orchestrator::BridgeOrchestrator;
#[allow(unused_imports)]
pub use orchestrator::BridgePipelineBuilder;
#[allow(unused_imports)]
pub use outcome::BridgeOutcome;
#[allow(unused_imports)]
pub use stages::{
    BridgeStage, CallStage, ExtractionStage, NormalizationStage, PromptStage, ValidationStage,
};
#[allow(unused_imports)]
pub use types::StageKind;

#[cfg(test)]
mod tests;
