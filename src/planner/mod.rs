//! Prompt construction and response interpretation for travel plans.
//!
//! Everything here is pure: no I/O, no configuration. The bridge stages call
//! into these functions in order.

mod extract;
mod parsing;
mod prompt;
mod types;

pub use extract::extract_generated_text;
pub use parsing::{PlanParser, parse_travel_plan};
#[allow(unused_imports)]
pub use parsing::normalize_plan_text;
#[allow(unused_imports)]
pub use prompt::build_prompt;
pub use types::{GenerationRequest, TravelPlan, TripInput, TripRequest};
#[allow(unused_imports)]
pub use types::{
    Accommodation, Attraction, BudgetSummary, DayPlan, GENERATION_TEMPERATURE, MAX_OUTPUT_TOKENS,
    Restaurant, ScheduleItem,
};
