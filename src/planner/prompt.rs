/// JSON shape the model is asked to fill in. Field names here are the ones
/// `TravelPlan`'s accessors read.
pub(crate) const PLAN_SCHEMA: &str = r#"{
  "destination": "destination name",
  "duration": "trip length",
  "summary": "2-3 sentence introduction to the destination",
  "attractions": [
    {"name": "attraction name", "description": "description", "category": "category", "address": "address", "duration": "time needed", "price": "admission fee", "tips": "tips"}
  ],
  "accommodations": [
    {"name": "accommodation name", "type": "hotel", "priceRange": "$$", "priceEstimate": "price per night", "address": "address", "description": "description", "amenities": ["amenity"]}
  ],
  "restaurants": [
    {"name": "restaurant name", "cuisine": "cuisine", "specialty": "signature dish", "priceRange": "$$", "priceEstimate": "price per person", "address": "address", "description": "description"}
  ],
  "dailyItinerary": [
    {"day": 1, "theme": "theme", "schedule": [{"time": "09:00", "activity": "activity", "location": "location"}]}
  ],
  "budgetSummary": {"accommodation": "lodging cost", "food": "food cost", "attractions": "sightseeing cost", "transport": "transport cost", "total": "total"},
  "localTips": ["tip 1", "tip 2"],
  "packingList": ["item 1", "item 2"]
}"#;

/// Builds the generation prompt for one trip. Inputs are expected to be
/// trimmed and non-empty already.
pub fn build_prompt(destination: &str, duration: &str) -> String {
    format!(
        "You are a travel guide. Create a travel itinerary in JSON format for the following trip.

Destination: {destination}
Duration: {duration}

Respond ONLY with JSON in the format below. Output pure JSON without markdown code blocks.

{PLAN_SCHEMA}

Include 4-5 attractions, 2 accommodations and 4 restaurants, and write one dailyItinerary entry for each day of the trip."
    )
}
