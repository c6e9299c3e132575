//! Templated responses used when the live model cannot be reached.
//!
//! The templates never fail and never touch the network. Only the destination,
//! the dates, and the trip length are personalized.

use crate::types::{RequestKind, TripRequest};
use chrono::{Duration, NaiveDate};

const OFFLINE_NOTE: &str = "Note: this is a basic template. Provide a valid HuggingFace API key for detailed, AI-powered results.";

/// Trips longer than this get a condensed middle section instead of one section per day.
pub const MAX_DAY_SECTIONS: u32 = 14;

/// Day themes cycled across the middle of an offline itinerary.
const DAY_THEMES: [(&str, [&str; 3]); 3] = [
    (
        "Cultural Exploration",
        [
            "Morning: Visit museums and historical sites",
            "Afternoon: Guided city tour or walking tour",
            "Evening: Local entertainment or cultural show",
        ],
    ),
    (
        "Nature & Adventure",
        [
            "Morning: Visit parks or natural attractions",
            "Afternoon: Outdoor activities based on location",
            "Evening: Sunset viewing and dinner",
        ],
    ),
    (
        "Local Life & Leisure",
        [
            "Morning: Explore local markets and neighborhoods",
            "Afternoon: Shopping and souvenir hunting",
            "Evening: Try a highly-rated local restaurant",
        ],
    ),
];

/// Build the offline template for `kind`
pub fn build_offline_response(kind: RequestKind, trip: &TripRequest) -> String {
    let body = match kind {
        RequestKind::Research => research_template(trip),
        RequestKind::Itinerary => itinerary_template(trip),
        RequestKind::Tips => tips_template(trip),
    };

    let mut lines = vec![
        format!(
            "{} Template for {} (Offline Mode)",
            kind.label(),
            trip.destination()
        ),
        format!(
            "Dates: {} ({} days)",
            trip.date_range_label(),
            trip.num_days()
        ),
        String::new(),
        OFFLINE_NOTE.to_string(),
        String::new(),
    ];
    lines.extend(body);
    lines.join("\n")
}

fn section(lines: &mut Vec<String>, title: &str, items: &[&str]) {
    lines.push(format!("**{}**:", title));
    lines.extend(items.iter().map(|item| format!("- {}", item)));
    lines.push(String::new());
}

fn research_template(trip: &TripRequest) -> Vec<String> {
    let mut lines = Vec::new();
    section(
        &mut lines,
        &format!("Top Attractions in {}", trip.destination()),
        &[
            "Visit major landmarks and tourist attractions",
            "Explore local museums and cultural sites",
            "Experience natural attractions and parks",
        ],
    );
    section(
        &mut lines,
        "Accommodations",
        &[
            "Research hotels in central locations",
            "Consider vacation rentals for longer stays",
            "Check reviews and amenities",
        ],
    );
    section(
        &mut lines,
        "Dining",
        &[
            "Try local specialties and traditional cuisine",
            "Visit highly-rated restaurants",
            "Explore local markets and street food",
        ],
    );
    section(
        &mut lines,
        "Transportation",
        &[
            "Research public transportation options",
            "Consider ride-sharing or car rentals",
            "Plan airport transfers",
        ],
    );
    section(
        &mut lines,
        "Tips",
        &[
            "Check visa requirements",
            "Research local customs and etiquette",
            "Download offline maps and translation apps",
        ],
    );
    trim_trailing_blank(lines)
}

fn itinerary_template(trip: &TripRequest) -> Vec<String> {
    let mut lines = Vec::new();
    let total = trip.num_days();
    // past the cap, the middle of the trip collapses into one "Additional Days" section
    let leading = if total > MAX_DAY_SECTIONS {
        MAX_DAY_SECTIONS - 1
    } else {
        total
    };

    for (index, date) in trip.days().take(leading as usize).enumerate() {
        day_section(&mut lines, index as u32 + 1, total, date);
    }

    if total > MAX_DAY_SECTIONS {
        let first_extra = trip.start_date() + Duration::days(i64::from(leading));
        let last_extra = trip.end_date() - Duration::days(1);
        section(
            &mut lines,
            &format!(
                "Days {}-{} ({} to {}): Additional Days",
                leading + 1,
                total - 1,
                first_extra,
                last_extra
            ),
            &[
                "Continue exploring based on your interests",
                "Mix of relaxation and adventure activities",
                "Shopping and souvenir hunting",
                "Day trips to nearby attractions",
            ],
        );
        day_section(&mut lines, total, total, trip.end_date());
    }

    section(
        &mut lines,
        "General Tips",
        &[
            "Book popular attractions in advance",
            "Allow flexibility for weather changes",
            "Keep emergency contacts handy",
            "Stay hydrated and take breaks",
        ],
    );
    trim_trailing_blank(lines)
}

fn day_section(lines: &mut Vec<String>, day: u32, total: u32, date: NaiveDate) {
    let (title, items): (&str, [&str; 3]) = if day == 1 {
        (
            "Arrival & City Overview",
            [
                "Morning: Arrive and check-in to accommodation",
                "Afternoon: Explore city center and main attractions",
                "Evening: Welcome dinner at local restaurant",
            ],
        )
    } else if day == total {
        (
            "Departure",
            [
                "Morning: Pack and check out of accommodation",
                "Afternoon: Last-minute sights near your hotel",
                "Evening: Transfer to your onward transport",
            ],
        )
    } else {
        DAY_THEMES[(day as usize - 2) % DAY_THEMES.len()]
    };

    section(lines, &format!("Day {} ({}): {}", day, date, title), &items);
}

fn tips_template(trip: &TripRequest) -> Vec<String> {
    let mut lines = Vec::new();
    section(
        &mut lines,
        &format!("Essential Preparations for {}", trip.destination()),
        &[
            "Check passport expiration dates",
            "Research visa requirements",
            "Get travel insurance",
            "Notify banks of travel dates",
        ],
    );
    section(
        &mut lines,
        "Packing Tips",
        &[
            "Check weather forecasts",
            "Pack versatile clothing",
            "Bring necessary medications",
            "Don't forget chargers and adapters",
        ],
    );
    section(
        &mut lines,
        "Safety & Health",
        &[
            "Research local emergency numbers",
            "Keep copies of important documents",
            "Stay aware of your surroundings",
            "Follow local health guidelines",
        ],
    );
    section(
        &mut lines,
        "Money Matters",
        &[
            "Research local currency and exchange rates",
            "Have multiple payment methods",
            "Keep some cash for small purchases",
            "Understand tipping customs",
        ],
    );
    trim_trailing_blank(lines)
}

fn trim_trailing_blank(mut lines: Vec<String>) -> Vec<String> {
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip(start: (i32, u32, u32), end: (i32, u32, u32)) -> TripRequest {
        TripRequest::builder(
            "Tokyo, Japan",
            NaiveDate::from_ymd_opt(start.0, start.1, start.2).unwrap(),
            NaiveDate::from_ymd_opt(end.0, end.1, end.2).unwrap(),
        )
        .build()
        .unwrap()
    }

    #[test]
    fn test_every_kind_mentions_destination_and_dates() {
        let trip = trip((2025, 4, 1), (2025, 4, 3));
        for kind in RequestKind::ALL {
            let text = build_offline_response(kind, &trip);
            assert!(!text.is_empty());
            assert!(text.contains("Tokyo, Japan"), "{kind} missing destination");
            assert!(text.contains("2025-04-01"), "{kind} missing start date");
            assert!(text.contains("2025-04-03"), "{kind} missing end date");
            assert!(text.contains("Offline Mode"));
        }
    }

    #[test]
    fn test_itinerary_has_one_section_per_day() {
        let trip = trip((2025, 4, 1), (2025, 4, 3));
        let text = build_offline_response(RequestKind::Itinerary, &trip);

        assert!(text.contains("**Day 1 (2025-04-01): Arrival & City Overview**"));
        assert!(text.contains("**Day 2 (2025-04-02): Cultural Exploration**"));
        assert!(text.contains("**Day 3 (2025-04-03): Departure**"));
        assert!(!text.contains("Day 4"));
    }

    #[test]
    fn test_long_itinerary_cycles_themes() {
        let trip = trip((2025, 4, 1), (2025, 4, 7));
        let text = build_offline_response(RequestKind::Itinerary, &trip);

        assert!(text.contains("Day 3 (2025-04-03): Nature & Adventure"));
        assert!(text.contains("Day 4 (2025-04-04): Local Life & Leisure"));
        assert!(text.contains("Day 5 (2025-04-05): Cultural Exploration"));
        assert!(text.contains("Day 7 (2025-04-07): Departure"));
    }

    #[test]
    fn test_single_day_itinerary_is_arrival_only() {
        let trip = trip((2025, 4, 1), (2025, 4, 1));
        let text = build_offline_response(RequestKind::Itinerary, &trip);

        assert!(text.contains("Day 1 (2025-04-01): Arrival & City Overview"));
        assert!(!text.contains("Departure"));
    }

    #[test]
    fn test_itinerary_at_cap_lists_every_day() {
        let trip = trip((2025, 4, 1), (2025, 4, 14));
        let text = build_offline_response(RequestKind::Itinerary, &trip);

        assert_eq!(text.matches("**Day ").count(), MAX_DAY_SECTIONS as usize);
        assert!(text.contains("Day 14 (2025-04-14): Departure"));
        assert!(!text.contains("Additional Days"));
    }

    #[test]
    fn test_long_itinerary_condenses_middle_days() {
        let trip = trip((2025, 1, 1), (2054, 12, 31));
        let text = build_offline_response(RequestKind::Itinerary, &trip);
        let total = trip.num_days();

        assert_eq!(text.matches("**Day ").count(), MAX_DAY_SECTIONS as usize);
        assert!(text.contains("Day 13 (2025-01-13): "));
        assert!(text.contains(&format!(
            "**Days 14-{} (2025-01-14 to 2054-12-30): Additional Days**",
            total - 1
        )));
        assert!(text.contains(&format!("Day {} (2054-12-31): Departure", total)));
        assert!(text.lines().count() < 100);
    }

    #[test]
    fn test_templates_end_without_blank_line() {
        let trip = trip((2025, 4, 1), (2025, 4, 2));
        for kind in RequestKind::ALL {
            assert!(!build_offline_response(kind, &trip).ends_with('\n'));
        }
    }
}
