use colored::*;

use crate::planner::TravelPlan;

/// Prints a plan as a readable itinerary. Missing sections are skipped.
pub(crate) fn print_plan(plan: &TravelPlan) {
    for line in plan_lines(plan) {
        println!("{line}");
    }
}

fn plan_lines(plan: &TravelPlan) -> Vec<String> {
    let mut lines = Vec::new();

    let title = match (plan.destination(), plan.duration()) {
        (Some(destination), Some(duration)) => format!("🌍 {destination} ({duration})"),
        (Some(destination), None) => format!("🌍 {destination}"),
        _ => "🌍 Travel plan".to_string(),
    };
    lines.push(title.bold().to_string());
    if let Some(summary) = plan.summary() {
        lines.push(summary.to_string());
    }

    let attractions = plan.attractions();
    if !attractions.is_empty() {
        section(&mut lines, "📍 Attractions");
        for attraction in &attractions {
            lines.push(format!(
                "  • {}{}",
                name_or_unnamed(&attraction.name).green(),
                suffix(&[&attraction.category, &attraction.price])
            ));
            push_detail(&mut lines, &attraction.description);
            push_detail(&mut lines, &attraction.tips);
        }
    }

    let accommodations = plan.accommodations();
    if !accommodations.is_empty() {
        section(&mut lines, "🏨 Accommodations");
        for stay in &accommodations {
            lines.push(format!(
                "  • {}{}",
                name_or_unnamed(&stay.name).green(),
                suffix(&[&stay.kind, &stay.price_estimate])
            ));
            if !stay.amenities.is_empty() {
                lines.push(format!("      {}", stay.amenities.join(", ")));
            }
        }
    }

    let restaurants = plan.restaurants();
    if !restaurants.is_empty() {
        section(&mut lines, "🍽️  Restaurants");
        for restaurant in &restaurants {
            lines.push(format!(
                "  • {}{}",
                name_or_unnamed(&restaurant.name).green(),
                suffix(&[&restaurant.cuisine, &restaurant.price_estimate])
            ));
            push_detail(&mut lines, &restaurant.specialty);
        }
    }

    let days = plan.daily_itinerary();
    if !days.is_empty() {
        section(&mut lines, "📅 Itinerary");
        for (index, day) in days.iter().enumerate() {
            let number = day.day.unwrap_or(index as u32 + 1);
            let theme = day.theme.as_deref().unwrap_or("");
            lines.push(format!("  Day {number} {theme}").trim_end().bold().to_string());
            for item in &day.schedule {
                lines.push(format!(
                    "    {} {}{}",
                    item.time.as_deref().unwrap_or("--:--").cyan(),
                    item.activity.as_deref().unwrap_or(""),
                    item.location
                        .as_deref()
                        .map(|location| format!(" @ {location}"))
                        .unwrap_or_default()
                ));
            }
        }
    }

    if let Some(budget) = plan.budget_summary() {
        section(&mut lines, "💰 Budget");
        for (label, value) in [
            ("Accommodation", &budget.accommodation),
            ("Food", &budget.food),
            ("Attractions", &budget.attractions),
            ("Transport", &budget.transport),
            ("Total", &budget.total),
        ] {
            if let Some(value) = value {
                lines.push(format!("  {label}: {value}"));
            }
        }
    }

    list_section(&mut lines, "💡 Local tips", &plan.local_tips());
    list_section(&mut lines, "🎒 Packing list", &plan.packing_list());

    lines
}

fn section(lines: &mut Vec<String>, title: &str) {
    lines.push(String::new());
    lines.push(title.bold().yellow().to_string());
}

fn list_section(lines: &mut Vec<String>, title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    section(lines, title);
    lines.extend(items.iter().map(|item| format!("  • {item}")));
}

fn push_detail(lines: &mut Vec<String>, detail: &Option<String>) {
    if let Some(detail) = detail.as_deref().filter(|text| !text.trim().is_empty()) {
        lines.push(format!("      {detail}"));
    }
}

fn name_or_unnamed(name: &Option<String>) -> &str {
    name.as_deref().unwrap_or("(unnamed)")
}

fn suffix(parts: &[&Option<String>]) -> String {
    let present: Vec<&str> = parts.iter().filter_map(|part| part.as_deref()).collect();
    if present.is_empty() {
        String::new()
    } else {
        format!(" ({})", present.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::tokyo_plan_json;

    fn plain_lines(value: serde_json::Value) -> Vec<String> {
        colored::control::set_override(false);
        let plan: TravelPlan = serde_json::from_value(value).unwrap();
        plan_lines(&plan)
    }

    #[test]
    fn renders_every_section_of_a_full_plan() {
        let lines = plain_lines(tokyo_plan_json());
        let text = lines.join("\n");

        assert_eq!(lines[0], "🌍 Tokyo (2 nights 3 days)");
        assert!(text.contains("  • Senso-ji (Temple, Free)"));
        assert!(text.contains("  Day 3 Markets"));
        assert!(text.contains("    07:00 Breakfast @ Tsukiji"));
        assert!(text.contains("  Total: ¥64,000"));
        assert!(text.contains("🎒 Packing list"));
    }

    #[test]
    fn renders_partial_plan_without_panicking() {
        let lines = plain_lines(serde_json::json!({
            "dailyItinerary": [{"schedule": [{"activity": "Wander"}]}]
        }));

        assert_eq!(lines[0], "🌍 Travel plan");
        assert!(lines.iter().any(|line| line == "  Day 1"));
        assert!(lines.iter().any(|line| line == "    --:-- Wander"));
        assert!(!lines.iter().any(|line| line.contains("Budget")));
    }
}
