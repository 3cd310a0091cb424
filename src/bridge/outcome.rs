use crate::error::BridgeError;
use crate::planner::TravelPlan;

use super::types::StageKind;

/// Terminal state of a bridge run.
#[derive(Debug)]
pub enum BridgeOutcome {
    Parsed(TravelPlan),
    Failed { stage: StageKind, error: BridgeError },
}

impl BridgeOutcome {
    pub fn failed(stage: StageKind, error: BridgeError) -> Self {
        Self::Failed { stage, error }
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, BridgeOutcome::Parsed(_))
    }

    pub fn failed_stage(&self) -> Option<StageKind> {
        match self {
            BridgeOutcome::Parsed(_) => None,
            BridgeOutcome::Failed { stage, .. } => Some(*stage),
        }
    }

    pub fn into_result(self) -> Result<TravelPlan, BridgeError> {
        match self {
            BridgeOutcome::Parsed(plan) => Ok(plan),
            BridgeOutcome::Failed { error, .. } => Err(error),
        }
    }
}
