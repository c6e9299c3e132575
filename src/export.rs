//! Plain-text export of generated itineraries.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use crate::{error::Result, types::TripRequest};

/// `Tokyo, Japan` on 2025-03-14 becomes `Tokyo_Japan_2025-03-14_itinerary.txt`
pub fn itinerary_file_name(destination: &str, date: NaiveDate) -> String {
    let mut slug = String::with_capacity(destination.len());
    for c in destination.chars() {
        if c.is_alphanumeric() || c == '-' {
            slug.push(c);
        } else if (c.is_whitespace() || c == ',' || c == '_') && !slug.ends_with('_') {
            slug.push('_');
        }
    }

    let slug = slug.trim_matches('_');
    let slug = if slug.is_empty() { "trip" } else { slug };
    format!("{}_{}_itinerary.txt", slug, date)
}

/// Write `text` into `dir`, named after the trip's destination and `date`
pub fn write_itinerary(dir: &Path, trip: &TripRequest, text: &str, date: NaiveDate) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(itinerary_file_name(trip.destination(), date));
    std::fs::write(&path, text)?;
    info!(path = %path.display(), bytes = text.len(), "itinerary exported");
    Ok(path)
}
