use crate::error::{PlannerError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest party the planner accepts in a single request.
pub const MAX_TRAVELERS: u32 = 20;

fn normalize(value: &str) -> String {
    value
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// Declares a closed set of form choices with a display label.
///
/// Values parse from their label or any spelling that normalizes to it,
/// so `"Mid-range ($$)"`, `"mid-range"` and `"mid_range"` are all accepted.
macro_rules! form_choice {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = PlannerError;

            fn from_str(value: &str) -> Result<Self> {
                let wanted = normalize(value);
                Self::ALL
                    .iter()
                    .copied()
                    .find(|choice| {
                        normalize(choice.label()) == wanted
                            || normalize(&format!("{:?}", choice)) == wanted
                    })
                    .ok_or_else(|| PlannerError::UnknownOption {
                        field: $field,
                        value: value.to_string(),
                    })
            }
        }
    };
}

form_choice! {
    /// Overall character of the trip
    TravelStyle, "travel style" {
        Honeymoon => "Honeymoon",
        Adventure => "Adventure",
        Relaxation => "Relaxation",
        Cultural => "Cultural",
        Luxury => "Luxury",
        Family => "Family",
        Solo => "Solo",
        Business => "Business",
    }
}

form_choice! {
    /// Spending tier for the whole party
    BudgetTier, "budget" {
        Budget => "Budget ($)",
        MidRange => "Mid-range ($$)",
        Premium => "Premium ($$$)",
        Luxury => "Luxury ($$$$)",
    }
}

form_choice! {
    Accommodation, "accommodation" {
        Hotels => "Hotels",
        Hostels => "Hostels",
        Airbnb => "Airbnb",
        Resorts => "Resorts",
        BoutiqueHotels => "Boutique Hotels",
        Camping => "Camping",
    }
}

form_choice! {
    /// How the travelers prefer to get around at the destination
    Transportation, "transportation" {
        Walking => "Walking",
        PublicTransport => "Public Transport",
        CarRental => "Car Rental",
        Mixed => "Mixed",
    }
}

form_choice! {
    Interest, "interest" {
        FoodAndDining => "Food & Dining",
        Museums => "Museums",
        Nature => "Nature",
        Nightlife => "Nightlife",
        Shopping => "Shopping",
        History => "History",
        Art => "Art",
        Sports => "Sports",
        Photography => "Photography",
    }
}

impl Default for TravelStyle {
    fn default() -> Self {
        TravelStyle::Honeymoon
    }
}

impl Default for BudgetTier {
    fn default() -> Self {
        BudgetTier::MidRange
    }
}

impl Default for Transportation {
    fn default() -> Self {
        Transportation::Walking
    }
}

/// Validated trip parameters collected from the user.
///
/// Built through [`TripRequest::builder`]; once built the request is read-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TripRequest {
    destination: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    travelers: u32,
    style: TravelStyle,
    budget: BudgetTier,
    accommodation: Vec<Accommodation>,
    transportation: Transportation,
    interests: Vec<Interest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    special_requirements: Option<String>,
}

impl TripRequest {
    pub fn builder(
        destination: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> TripRequestBuilder {
        TripRequestBuilder::new(destination, start_date, end_date)
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn travelers(&self) -> u32 {
        self.travelers
    }

    pub fn style(&self) -> TravelStyle {
        self.style
    }

    pub fn budget(&self) -> BudgetTier {
        self.budget
    }

    pub fn accommodation(&self) -> &[Accommodation] {
        &self.accommodation
    }

    pub fn transportation(&self) -> Transportation {
        self.transportation
    }

    pub fn interests(&self) -> &[Interest] {
        &self.interests
    }

    pub fn special_requirements(&self) -> Option<&str> {
        self.special_requirements.as_deref()
    }

    /// Inclusive number of calendar days covered by the trip
    pub fn num_days(&self) -> u32 {
        // end >= start is enforced by the builder
        (self.end_date - self.start_date).num_days() as u32 + 1
    }

    /// Dates of every day of the trip, in order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start_date
            .iter_days()
            .take_while(move |day| *day <= self.end_date)
    }

    /// "2025-04-01 to 2025-04-03"
    pub fn date_range_label(&self) -> String {
        format!("{} to {}", self.start_date, self.end_date)
    }

    pub fn interests_label(&self) -> Option<String> {
        join_labels(self.interests.iter().map(Interest::label))
    }

    pub fn accommodation_label(&self) -> Option<String> {
        join_labels(self.accommodation.iter().map(Accommodation::label))
    }
}

fn join_labels<'a>(labels: impl Iterator<Item = &'a str>) -> Option<String> {
    let joined = labels.collect::<Vec<_>>().join(", ");
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}

fn push_unique<T: PartialEq>(items: &mut Vec<T>, item: T) {
    if !items.contains(&item) {
        items.push(item);
    }
}

/// Collects trip fields and validates them on [`TripRequestBuilder::build`]
#[derive(Debug, Clone)]
pub struct TripRequestBuilder {
    destination: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    travelers: u32,
    style: TravelStyle,
    budget: BudgetTier,
    accommodation: Vec<Accommodation>,
    transportation: Transportation,
    interests: Vec<Interest>,
    special_requirements: Option<String>,
}

impl TripRequestBuilder {
    pub fn new(destination: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            destination: destination.into(),
            start_date,
            end_date,
            travelers: 2,
            style: TravelStyle::default(),
            budget: BudgetTier::default(),
            accommodation: vec![Accommodation::Hotels],
            transportation: Transportation::default(),
            interests: vec![Interest::FoodAndDining, Interest::Nature],
            special_requirements: None,
        }
    }

    pub fn with_travelers(mut self, travelers: u32) -> Self {
        self.travelers = travelers;
        self
    }

    pub fn with_style(mut self, style: TravelStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_budget(mut self, budget: BudgetTier) -> Self {
        self.budget = budget;
        self
    }

    /// Replace the accommodation preferences, keeping first occurrences only
    pub fn with_accommodation(mut self, accommodation: impl IntoIterator<Item = Accommodation>) -> Self {
        self.accommodation.clear();
        for choice in accommodation {
            push_unique(&mut self.accommodation, choice);
        }
        self
    }

    pub fn with_transportation(mut self, transportation: Transportation) -> Self {
        self.transportation = transportation;
        self
    }

    /// Replace the interest tags, keeping first occurrences only
    pub fn with_interests(mut self, interests: impl IntoIterator<Item = Interest>) -> Self {
        self.interests.clear();
        for interest in interests {
            push_unique(&mut self.interests, interest);
        }
        self
    }

    pub fn with_special_requirements(mut self, requirements: impl Into<String>) -> Self {
        let requirements = requirements.into();
        let trimmed = requirements.trim();
        self.special_requirements = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self
    }

    pub fn build(self) -> Result<TripRequest> {
        let destination = self.destination.trim().to_string();
        if destination.is_empty() {
            return Err(PlannerError::InvalidTrip(
                "destination must not be empty".to_string(),
            ));
        }

        if self.end_date < self.start_date {
            return Err(PlannerError::InvalidTrip(format!(
                "end date {} is before start date {}",
                self.end_date, self.start_date
            )));
        }

        if self.travelers == 0 || self.travelers > MAX_TRAVELERS {
            return Err(PlannerError::InvalidTrip(format!(
                "traveler count must be between 1 and {}, got {}",
                MAX_TRAVELERS, self.travelers
            )));
        }

        Ok(TripRequest {
            destination,
            start_date: self.start_date,
            end_date: self.end_date,
            travelers: self.travelers,
            style: self.style,
            budget: self.budget,
            accommodation: self.accommodation,
            transportation: self.transportation,
            interests: self.interests,
            special_requirements: self.special_requirements,
        })
    }
}
