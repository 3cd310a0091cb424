use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::BridgeError;

use super::prompt::build_prompt;

pub const GENERATION_TEMPERATURE: f32 = 0.7;
pub const MAX_OUTPUT_TOKENS: u32 = 8192;

/// Caller input exactly as received. Absent fields become empty strings and
/// are rejected when the input is turned into a [`TripRequest`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct TripInput {
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub duration: String,
}

impl TripInput {
    pub fn new(destination: impl Into<String>, duration: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            duration: duration.into(),
        }
    }
}

/// Validated trip parameters. Both fields are trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRequest {
    destination: String,
    duration: String,
}

impl TripRequest {
    pub fn new(destination: &str, duration: &str) -> Result<Self, BridgeError> {
        let destination = destination.trim();
        let duration = duration.trim();
        if destination.is_empty() || duration.is_empty() {
            return Err(BridgeError::Validation(
                "Please enter both a destination and a trip duration".to_string(),
            ));
        }

        Ok(Self {
            destination: destination.to_string(),
            duration: duration.to_string(),
        })
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn duration(&self) -> &str {
        &self.duration
    }
}

impl TryFrom<&TripInput> for TripRequest {
    type Error = BridgeError;

    fn try_from(input: &TripInput) -> Result<Self, Self::Error> {
        TripRequest::new(&input.destination, &input.duration)
    }
}

/// Everything the Gemini client needs for one generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt_text: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl GenerationRequest {
    pub fn from_trip(trip: &TripRequest) -> Self {
        Self {
            prompt_text: build_prompt(trip.destination(), trip.duration()),
            temperature: GENERATION_TEMPERATURE,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        }
    }
}

/// A travel plan as the model produced it.
///
/// The object is kept verbatim, so unknown or oddly typed fields survive a
/// round trip to the caller. The typed accessors below are read-only views
/// that skip whatever does not fit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TravelPlan {
    fields: Map<String, Value>,
}

impl TravelPlan {
    #[cfg(test)]
    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }

    pub fn destination(&self) -> Option<&str> {
        self.text("destination")
    }

    pub fn duration(&self) -> Option<&str> {
        self.text("duration")
    }

    pub fn summary(&self) -> Option<&str> {
        self.text("summary")
    }

    pub fn attractions(&self) -> Vec<Attraction> {
        self.entries("attractions")
    }

    pub fn accommodations(&self) -> Vec<Accommodation> {
        self.entries("accommodations")
    }

    pub fn restaurants(&self) -> Vec<Restaurant> {
        self.entries("restaurants")
    }

    pub fn daily_itinerary(&self) -> Vec<DayPlan> {
        self.entries("dailyItinerary")
    }

    pub fn budget_summary(&self) -> Option<BudgetSummary> {
        self.fields
            .get("budgetSummary")
            .filter(|value| value.is_object())
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    pub fn local_tips(&self) -> Vec<String> {
        self.strings("localTips")
    }

    pub fn packing_list(&self) -> Vec<String> {
        self.strings("packingList")
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    fn strings(&self, key: &str) -> Vec<String> {
        self.fields
            .get(key)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(display_text).collect())
            .unwrap_or_default()
    }

    fn entries<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        self.fields
            .get(key)
            .and_then(Value::as_array)
            .map(|items| collect_entries(items))
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attraction {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub price: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub tips: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accommodation {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "lenient_text")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub price_range: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub price_estimate: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub amenities: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub cuisine: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub specialty: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub price_range: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub price_estimate: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DayPlan {
    #[serde(default, deserialize_with = "lenient_day")]
    pub day: Option<u32>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub theme: Option<String>,
    #[serde(default, deserialize_with = "lenient_entries")]
    pub schedule: Vec<ScheduleItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ScheduleItem {
    #[serde(default, deserialize_with = "lenient_text")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub activity: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BudgetSummary {
    #[serde(default, deserialize_with = "lenient_text")]
    pub accommodation: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub food: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub attractions: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub transport: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub total: Option<String>,
}

fn display_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn collect_entries<T: DeserializeOwned>(items: &[Value]) -> Vec<T> {
    items
        .iter()
        .filter(|item| item.is_object())
        .filter_map(|item| serde_json::from_value(item.clone()).ok())
        .collect()
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(display_text))
}

fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => items.iter().filter_map(display_text).collect(),
        Some(other) => display_text(&other).into_iter().collect(),
        None => Vec::new(),
    })
}

fn lenient_entries<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Array(items)) => collect_entries(&items),
        _ => Vec::new(),
    })
}

fn lenient_day<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(number)) => number.as_u64().and_then(|day| u32::try_from(day).ok()),
        Some(Value::String(text)) => text.trim().parse().ok(),
        _ => None,
    })
}
