//! Prompt construction for the three planner actions.
//!
//! Every function here is pure: the same trip and kind always produce the same text.

use crate::types::{RequestKind, TripRequest};

/// Build the user prompt for `kind`
pub fn build_prompt(kind: RequestKind, trip: &TripRequest) -> String {
    build_prompt_with_research(kind, trip, None)
}

/// Build the user prompt for `kind`, appending research notes to itinerary prompts.
///
/// Notes are ignored for research and tips prompts, and blank notes are ignored everywhere.
pub fn build_prompt_with_research(
    kind: RequestKind,
    trip: &TripRequest,
    research_notes: Option<&str>,
) -> String {
    let notes = research_notes.map(str::trim).filter(|notes| !notes.is_empty());
    match kind {
        RequestKind::Research => research_prompt(trip),
        RequestKind::Itinerary => itinerary_prompt(trip, notes),
        RequestKind::Tips => tips_prompt(trip),
    }
}

fn style_lower(trip: &TripRequest) -> String {
    trip.style().label().to_lowercase()
}

fn trip_details(trip: &TripRequest) -> Vec<String> {
    let mut lines = vec![
        format!("Destination: {}", trip.destination()),
        format!(
            "Dates: {} ({} days)",
            trip.date_range_label(),
            trip.num_days()
        ),
        format!("Travelers: {}", trip.travelers()),
        format!("Travel style: {}", trip.style()),
        format!("Budget: {}", trip.budget()),
    ];

    if let Some(interests) = trip.interests_label() {
        lines.push(format!("Interests: {}", interests));
    }
    if let Some(accommodation) = trip.accommodation_label() {
        lines.push(format!("Accommodation preferences: {}", accommodation));
    }
    lines.push(format!("Transportation: {}", trip.transportation()));
    if let Some(requirements) = trip.special_requirements() {
        lines.push(format!("Special requirements: {}", requirements));
    }

    lines
}

fn research_prompt(trip: &TripRequest) -> String {
    let accommodation = trip
        .accommodation_label()
        .unwrap_or_else(|| "well-reviewed".to_string());

    let mut sections = vec![
        format!(
            "You are an expert travel researcher specializing in {} travel.",
            style_lower(trip)
        ),
        String::new(),
        format!(
            "Research {} for a {}-day {} trip for {} travelers, from {}.",
            trip.destination(),
            trip.num_days(),
            style_lower(trip),
            trip.travelers(),
            trip.date_range_label()
        ),
        String::new(),
    ];
    sections.extend(trip_details(trip));
    sections.push(String::new());
    sections.push("Provide comprehensive information about:".to_string());
    sections.push("1. Top attractions and activities".to_string());
    sections.push(format!(
        "2. Recommended accommodations ({} options)",
        accommodation
    ));
    sections.push("3. Local dining options".to_string());
    sections.push(format!(
        "4. Transportation methods, with a focus on {}",
        trip.transportation().label().to_lowercase()
    ));
    sections.push("5. Cultural tips and local customs".to_string());
    sections.push(format!(
        "6. Weather considerations for {}",
        trip.date_range_label()
    ));
    sections.push(format!("7. Budget estimates for the {} tier", trip.budget()));
    sections.push(String::new());
    sections.push(
        "Give specific recommendations with practical details like pricing, location, and booking information. Keep the response under 2k tokens and well-structured."
            .to_string(),
    );

    sections.join("\n")
}

fn itinerary_prompt(trip: &TripRequest, research_notes: Option<&str>) -> String {
    let days = trip.num_days();

    let mut sections = vec![
        format!(
            "You are a professional travel planner creating a detailed {}-day itinerary for {}.",
            days,
            trip.destination()
        ),
        String::new(),
        format!(
            "Create a day-by-day itinerary covering exactly {} days, from {}.",
            days,
            trip.date_range_label()
        ),
        String::new(),
    ];
    sections.extend(trip_details(trip));
    sections.push(String::new());
    sections.push("For each day include:".to_string());
    sections.push("- Morning, afternoon, and evening activities and attractions".to_string());
    sections.push("- Meal recommendations".to_string());
    sections.push("- Transportation suggestions".to_string());
    sections.push("- Estimated costs and timing".to_string());
    sections.push("- Backup options for weather-dependent activities".to_string());
    sections.push(String::new());
    sections.push(format!(
        "Consider the group size of {}, the {} travel style, the {} budget, and any special requirements. Add practical tips and local insights. Keep the response under 2k tokens and well-structured.",
        trip.travelers(),
        style_lower(trip),
        trip.budget()
    ));

    if let Some(notes) = research_notes {
        sections.push(String::new());
        sections.push("Research information:".to_string());
        sections.push(notes.to_string());
    }

    sections.join("\n")
}

fn tips_prompt(trip: &TripRequest) -> String {
    format!(
        "You provide practical travel tips and advice.\n\nProvide a short list of essential travel tips for visiting {} with a focus on {} travel ({}, {} travelers). Cover preparation, packing, safety and health, money matters, and local etiquette.",
        trip.destination(),
        style_lower(trip),
        trip.date_range_label(),
        trip.travelers()
    )
}
