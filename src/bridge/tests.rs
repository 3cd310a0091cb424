use std::sync::atomic::Ordering;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;
use tokio_util::sync::CancellationToken;

use crate::error::{BridgeError, ErrorKind};
use crate::planner::{TravelPlan, TripInput};
use crate::test_support::{FakeGenerationClient, tokyo_plan_json};

use super::context::{BridgeContext, BridgeEvent};
use super::outcome::BridgeOutcome;
use super::stages::BridgeStage;
use super::types::StageKind;
use super::{BridgeOrchestrator, BridgePipelineBuilder};

fn orchestrator_with(client: FakeGenerationClient) -> BridgeOrchestrator {
    BridgeOrchestrator::new(Arc::new(client))
}

fn tokyo_input() -> TripInput {
    TripInput::new("Tokyo", "2 nights 3 days")
}

fn expect_failure(outcome: BridgeOutcome) -> (StageKind, BridgeError) {
    match outcome {
        BridgeOutcome::Failed { stage, error } => (stage, error),
        BridgeOutcome::Parsed(plan) => panic!("expected failure, got plan: {plan:?}"),
    }
}

#[tokio::test]
async fn fenced_tokyo_plan_is_parsed() {
    let text = format!(
        "```json\n{}\n```",
        serde_json::to_string_pretty(&tokyo_plan_json()).unwrap()
    );
    let client = FakeGenerationClient::with_text(&text);
    let calls = client.call_counter();
    let orchestrator = orchestrator_with(client);

    let run = orchestrator
        .run(tokyo_input(), CancellationToken::new())
        .await;

    assert!(run.outcome.is_parsed());
    assert!(run.events.contains(&BridgeEvent::PlanReady {
        attractions: 5,
        days: 3
    }));
    let plan = run.into_result().unwrap();
    assert_eq!(plan.attractions().len(), 5);
    assert_eq!(plan.accommodations().len(), 2);
    assert_eq!(plan.restaurants().len(), 4);
    assert_eq!(plan.daily_itinerary().len(), 3);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn plain_json_parses_like_fenced_json() {
    let plain = serde_json::to_string(&tokyo_plan_json()).unwrap();
    let fenced = format!("Here you go:\n```json\n{plain}\n```\nBon voyage!");

    let from_plain = orchestrator_with(FakeGenerationClient::with_text(&plain))
        .generate_travel_plan("Tokyo", "2 nights 3 days")
        .await
        .unwrap();
    let from_fenced = orchestrator_with(FakeGenerationClient::with_text(&fenced))
        .generate_travel_plan("Tokyo", "2 nights 3 days")
        .await
        .unwrap();

    assert_eq!(from_plain, from_fenced);
    assert_eq!(from_plain.into_value(), tokyo_plan_json());
}

#[tokio::test]
async fn empty_destination_fails_validation_without_calling_provider() {
    let client = FakeGenerationClient::with_text("{}");
    let calls = client.call_counter();
    let orchestrator = orchestrator_with(client);

    let run = orchestrator
        .run(TripInput::new("   ", "3 days"), CancellationToken::new())
        .await;

    let (stage, error) = expect_failure(run.outcome);
    assert_eq!(stage, StageKind::Validating);
    assert_eq!(error.kind(), ErrorKind::Validation);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn configuration_error_surfaces_from_calling_stage() {
    let client = FakeGenerationClient::failing(BridgeError::missing_api_key);
    let orchestrator = orchestrator_with(client);

    let (stage, error) = expect_failure(
        orchestrator
            .run(tokyo_input(), CancellationToken::new())
            .await
            .outcome,
    );
    assert_eq!(stage, StageKind::Calling);
    assert_eq!(error.kind(), ErrorKind::Configuration);
    assert!(error.to_string().contains("GOOGLE_API_KEY"));
}

#[tokio::test]
async fn non_success_status_is_upstream_error_even_with_valid_body() {
    let body = crate::test_support::envelope_with_text("{\"destination\": \"Tokyo\"}");
    let orchestrator = orchestrator_with(FakeGenerationClient::responding(429, body));

    let run = orchestrator
        .run(tokyo_input(), CancellationToken::new())
        .await;

    assert!(!run.events.iter().any(|event| matches!(
        event,
        BridgeEvent::StageStarted(StageKind::Extracting)
    )));
    let (stage, error) = expect_failure(run.outcome);
    assert_eq!(stage, StageKind::Calling);
    assert_eq!(error.kind(), ErrorKind::Upstream);
    assert_eq!(error.to_string(), "AI API error (status 429)");
}

#[tokio::test]
async fn envelope_without_candidates_is_empty_content() {
    let orchestrator = orchestrator_with(FakeGenerationClient::responding(
        200,
        json!({"promptFeedback": {"blockReason": "SAFETY"}}).to_string(),
    ));

    let (stage, error) = expect_failure(
        orchestrator
            .run(tokyo_input(), CancellationToken::new())
            .await
            .outcome,
    );
    assert_eq!(stage, StageKind::Extracting);
    assert_eq!(error.kind(), ErrorKind::EmptyContent);
}

#[tokio::test]
async fn malformed_plan_is_parse_error() {
    for text in [
        "```json\n{\"destination\": \"Tokyo\", \"attractions\": [],}\n```",
        "{\"destination\": \"Tokyo\", \"attractions\": [{\"name\": \"Senso-ji\"}",
    ] {
        let orchestrator = orchestrator_with(FakeGenerationClient::with_text(text));
        let (stage, error) = expect_failure(
            orchestrator
                .run(tokyo_input(), CancellationToken::new())
                .await
                .outcome,
        );
        assert_eq!(stage, StageKind::Normalizing);
        assert_eq!(error.kind(), ErrorKind::Parse);
    }
}

#[tokio::test]
async fn cancelled_run_reports_cancellation() {
    let orchestrator = orchestrator_with(FakeGenerationClient::with_text("{}"));
    let cancel = CancellationToken::new();
    cancel.cancel();

    let (stage, error) = expect_failure(orchestrator.run(tokyo_input(), cancel).await.outcome);
    assert_eq!(stage, StageKind::Calling);
    assert_eq!(error.kind(), ErrorKind::Cancelled);
}

#[tokio::test]
async fn events_follow_stage_order() {
    let orchestrator = orchestrator_with(FakeGenerationClient::with_text("{\"summary\": \"ok\"}"));
    let run = orchestrator
        .run(tokyo_input(), CancellationToken::new())
        .await;

    let started: Vec<StageKind> = run
        .events
        .iter()
        .filter_map(|event| match event {
            BridgeEvent::StageStarted(stage) => Some(*stage),
            _ => None,
        })
        .collect();
    assert_eq!(
        started,
        vec![
            StageKind::Validating,
            StageKind::Prompting,
            StageKind::Calling,
            StageKind::Extracting,
            StageKind::Normalizing,
        ]
    );
    assert_eq!(
        run.events.last(),
        Some(&BridgeEvent::StageCompleted(StageKind::Normalizing))
    );
}

#[tokio::test]
async fn outcome_names_the_failed_stage() {
    let failed = orchestrator_with(FakeGenerationClient::responding(502, ""))
        .run(tokyo_input(), CancellationToken::new())
        .await;
    assert_eq!(failed.outcome.failed_stage(), Some(StageKind::Calling));

    let parsed = orchestrator_with(FakeGenerationClient::with_text("{}"))
        .run(tokyo_input(), CancellationToken::new())
        .await;
    assert_eq!(parsed.outcome.failed_stage(), None);
}

#[tokio::test]
async fn failure_event_carries_kind_and_message() {
    let orchestrator = orchestrator_with(FakeGenerationClient::responding(500, "boom"));
    let run = orchestrator
        .run(tokyo_input(), CancellationToken::new())
        .await;

    assert!(run.events.contains(&BridgeEvent::StageFailed {
        stage: StageKind::Calling,
        kind: ErrorKind::Upstream,
        message: "AI API error (status 500)".to_string(),
    }));
}

#[tokio::test]
async fn custom_parser_replaces_heuristic() {
    fn strict_parser(raw: &str) -> Result<TravelPlan, BridgeError> {
        serde_json::from_str(raw).map_err(|err| BridgeError::Parse(err.to_string()))
    }

    let client = Arc::new(FakeGenerationClient::with_text("```json\n{}\n```"));
    let orchestrator = BridgePipelineBuilder::new()
        .with_standard_stages(client, strict_parser)
        .build();

    let error = orchestrator
        .generate_travel_plan("Tokyo", "3 days")
        .await
        .unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Parse);
}

struct RecordingStage {
    kind: StageKind,
    seen: Arc<Mutex<Vec<StageKind>>>,
}

#[async_trait]
impl BridgeStage for RecordingStage {
    fn kind(&self) -> StageKind {
        self.kind
    }

    async fn execute(&self, _context: &mut BridgeContext) -> Result<(), BridgeError> {
        self.seen.lock().unwrap().push(self.kind);
        Ok(())
    }
}

struct FailingStage;

#[async_trait]
impl BridgeStage for FailingStage {
    fn kind(&self) -> StageKind {
        StageKind::Prompting
    }

    async fn execute(&self, _context: &mut BridgeContext) -> Result<(), BridgeError> {
        Err(BridgeError::Unexpected("stage failure".to_string()))
    }
}

#[tokio::test]
async fn first_failure_short_circuits_remaining_stages() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let orchestrator = BridgeOrchestrator::builder()
        .add_stage(RecordingStage {
            kind: StageKind::Validating,
            seen: seen.clone(),
        })
        .add_stage(FailingStage)
        .add_stage(RecordingStage {
            kind: StageKind::Calling,
            seen: seen.clone(),
        })
        .build();

    let run = orchestrator
        .run(tokyo_input(), CancellationToken::new())
        .await;

    assert_eq!(*seen.lock().unwrap(), vec![StageKind::Validating]);
    let (stage, error) = expect_failure(run.outcome);
    assert_eq!(stage, StageKind::Prompting);
    assert_eq!(error.to_string(), "stage failure");
}

#[tokio::test]
async fn pipeline_without_plan_is_unexpected_failure() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let orchestrator = BridgeOrchestrator::builder()
        .add_stage(RecordingStage {
            kind: StageKind::Validating,
            seen,
        })
        .build();

    let (_, error) = expect_failure(
        orchestrator
            .run(tokyo_input(), CancellationToken::new())
            .await
            .outcome,
    );
    assert_eq!(error.kind(), ErrorKind::Unexpected);
}

#[test]
fn standard_pipeline_has_five_stages() {
    let orchestrator = orchestrator_with(FakeGenerationClient::with_text("{}"));
    assert_eq!(orchestrator.stage_count(), 5);
}
