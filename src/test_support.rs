use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::json;
use tokio_util::sync::CancellationToken;

use crate::client::{GenerationClient, RawResponse};
use crate::error::BridgeError;
use crate::planner::GenerationRequest;

/// Generation client that answers every call with the same canned result and
/// counts how often it was asked.
pub(crate) struct FakeGenerationClient {
    reply: Result<RawResponse, fn() -> BridgeError>,
    calls: Arc<AtomicUsize>,
}

impl FakeGenerationClient {
    pub(crate) fn responding(status: u16, body: impl Into<String>) -> Self {
        Self {
            reply: Ok(RawResponse {
                status,
                body: body.into(),
            }),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// 200 response whose first candidate carries `text`.
    pub(crate) fn with_text(text: &str) -> Self {
        Self::responding(200, envelope_with_text(text))
    }

    pub(crate) fn failing(error: fn() -> BridgeError) -> Self {
        Self {
            reply: Err(error),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn call_counter(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

#[async_trait]
impl GenerationClient for FakeGenerationClient {
    async fn send(
        &self,
        _request: &GenerationRequest,
        cancel: &CancellationToken,
    ) -> Result<RawResponse, BridgeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if cancel.is_cancelled() {
            return Err(BridgeError::Cancelled);
        }
        match &self.reply {
            Ok(response) => Ok(response.clone()),
            Err(make_error) => Err(make_error()),
        }
    }
}

pub(crate) fn envelope_with_text(text: &str) -> String {
    json!({
        "candidates": [
            {
                "content": {"role": "model", "parts": [{"text": text}]},
                "finishReason": "STOP"
            }
        ]
    })
    .to_string()
}

/// Plan for the Tokyo scenario: 5 attractions, 2 stays, 4 restaurants, 3 days.
pub(crate) fn tokyo_plan_json() -> serde_json::Value {
    json!({
        "destination": "Tokyo",
        "duration": "2 nights 3 days",
        "summary": "A compact tour of old and new Tokyo.",
        "attractions": [
            {"name": "Senso-ji", "category": "Temple", "address": "Asakusa", "price": "Free"},
            {"name": "Shibuya Crossing", "category": "Landmark", "address": "Shibuya"},
            {"name": "Meiji Jingu", "category": "Shrine", "address": "Harajuku"},
            {"name": "Tokyo Skytree", "category": "Viewpoint", "price": "¥3,100"},
            {"name": "Tsukiji Outer Market", "category": "Market"}
        ],
        "accommodations": [
            {"name": "Hotel Gracery Shinjuku", "type": "Hotel", "priceRange": "$$", "amenities": ["Wi-Fi"]},
            {"name": "Nui. Hostel", "type": "Hostel", "priceRange": "$", "amenities": ["Bar", "Lounge"]}
        ],
        "restaurants": [
            {"name": "Ichiran", "cuisine": "Ramen"},
            {"name": "Sushi Dai", "cuisine": "Sushi"},
            {"name": "Gonpachi", "cuisine": "Izakaya"},
            {"name": "Afuri", "cuisine": "Ramen"}
        ],
        "dailyItinerary": [
            {"day": 1, "theme": "Old Tokyo", "schedule": [{"time": "09:00", "activity": "Temple visit", "location": "Senso-ji"}]},
            {"day": 2, "theme": "Modern Tokyo", "schedule": [{"time": "10:00", "activity": "Shopping", "location": "Shibuya"}]},
            {"day": 3, "theme": "Markets", "schedule": [{"time": "07:00", "activity": "Breakfast", "location": "Tsukiji"}]}
        ],
        "budgetSummary": {"accommodation": "¥40,000", "food": "¥15,000", "attractions": "¥5,000", "transport": "¥4,000", "total": "¥64,000"},
        "localTips": ["Buy a Suica card"],
        "packingList": ["Walking shoes", "Power adapter"]
    })
}
