//! Output formats for computed ratings.

mod console;

pub use console::{Band, format_rating_console, format_rating_summary};

use serde::Serialize;

use crate::error::Result;
use crate::estimator::Rating;

/// A labelled rating result. `rating` is `None` when the chart could not be
/// rated.
#[derive(Debug, Clone, Serialize)]
pub struct RatedChart {
    pub label: String,
    pub rate: f64,
    pub rating: Option<Rating>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl RatedChart {
    /// Final rating value, or the unavailable sentinel.
    pub fn value(&self) -> f64 {
        self.rating
            .map_or(crate::config::sentinel::UNAVAILABLE, |r| r.value)
    }
}

pub fn format_tsv_header() -> String {
    [
        "chart", "rate", "rating", "p93", "p83", "mean5", "notes", "lns", "keys",
    ]
    .join("\t")
}

pub fn format_tsv_row(entry: &RatedChart) -> String {
    let mut values = vec![entry.label.clone(), format!("{:.2}", entry.rate)];
    match &entry.rating {
        Some(rating) => values.extend([
            format!("{:.4}", rating.value),
            format!("{:.4}", rating.p93),
            format!("{:.4}", rating.p83),
            format!("{:.4}", rating.mean5),
            rating.note_count.to_string(),
            rating.ln_count.to_string(),
            rating.key_count.to_string(),
        ]),
        None => values.extend(std::iter::repeat_n("-".to_string(), 7)),
    }
    values.join("\t")
}

pub fn generate_tsv(entries: &[RatedChart]) -> String {
    let mut lines = vec![format_tsv_header()];
    lines.extend(entries.iter().map(format_tsv_row));
    lines.join("\n")
}

pub fn generate_json(entries: &[RatedChart]) -> Result<String> {
    Ok(serde_json::to_string_pretty(entries)?)
}
