//! Console output formatting with colored display

use std::fmt::Write as _;

use owo_colors::OwoColorize;
use strum::IntoStaticStr;

use crate::export::RatedChart;

/// Coarse difficulty band of a rating, used for coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, IntoStaticStr)]
pub enum Band {
    #[strum(serialize = "EASY")]
    Easy,
    #[strum(serialize = "NORMAL")]
    Normal,
    #[strum(serialize = "HARD")]
    Hard,
    #[strum(serialize = "EXPERT")]
    Expert,
    #[strum(serialize = "EXTREME")]
    Extreme,
}

impl Band {
    pub fn from_rating(value: f64) -> Self {
        if value >= 8.0 {
            Self::Extreme
        } else if value >= 6.0 {
            Self::Expert
        } else if value >= 4.0 {
            Self::Hard
        } else if value >= 2.0 {
            Self::Normal
        } else {
            Self::Easy
        }
    }

    pub fn short_name(&self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

fn format_colored_rating(value: f64) -> String {
    let text = format!("{:.2}", value);
    match Band::from_rating(value) {
        Band::Easy => text.green().to_string(),
        Band::Normal => text.blue().to_string(),
        Band::Hard => text.yellow().to_string(),
        Band::Expert => text.red().to_string(),
        Band::Extreme => text.purple().bold().to_string(),
    }
}

/// Format a rated chart for console display.
///
/// With `breakdown`, the aggregates behind the rating are listed as well.
pub fn format_rating_console(entry: &RatedChart, breakdown: bool) -> String {
    let mut output = String::new();
    let border = "━".repeat(entry.label.chars().count().max(40) + 4);
    let border_dim = border.dimmed();

    let _ = writeln!(output, "{}", border_dim);
    let _ = writeln!(output, "  {} [x{:.2}]", entry.label.bold(), entry.rate);
    let _ = writeln!(output, "{}", border_dim);

    match &entry.rating {
        Some(rating) => {
            let band = Band::from_rating(rating.value);
            let _ = writeln!(
                output,
                "  RATING : {} ({})",
                format_colored_rating(rating.value),
                band
            );
            let _ = writeln!(
                output,
                "  NOTES  : {} ({} LN, {}K)",
                rating.note_count, rating.ln_count, rating.key_count
            );
            if breakdown {
                let _ = writeln!(output, "  P93    : {:.4}", rating.p93);
                let _ = writeln!(output, "  P83    : {:.4}", rating.p83);
                let _ = writeln!(output, "  MEAN5  : {:.4}", rating.mean5);
                let _ = writeln!(output, "  RAW    : {:.4}", rating.raw);
                let _ = writeln!(output, "  WEIGHT : {:.2}", rating.total_notes);
            }
        }
        None => {
            let _ = writeln!(output, "  RATING : {}", "-".dimmed());
            if let Some(error) = &entry.error {
                let _ = writeln!(output, "  ERROR  : {}", error.red());
            }
        }
    }
    let _ = write!(output, "{}", border_dim);

    output
}

/// One-line summary for logging
pub fn format_rating_summary(entry: &RatedChart) -> String {
    match &entry.rating {
        Some(rating) => format!(
            "{} x{:.2} {:.2} [{}]",
            entry.label,
            entry.rate,
            rating.value,
            Band::from_rating(rating.value)
        ),
        None => format!("{} x{:.2} [UNAVAILABLE]", entry.label, entry.rate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::tests::sample_rating;

    #[test]
    fn test_band_from_rating() {
        assert_eq!(Band::from_rating(0.5), Band::Easy);
        assert_eq!(Band::from_rating(2.0), Band::Normal);
        assert_eq!(Band::from_rating(5.9), Band::Hard);
        assert_eq!(Band::from_rating(7.0), Band::Expert);
        assert_eq!(Band::from_rating(11.0), Band::Extreme);
    }

    #[test]
    fn test_format_rating_summary() {
        let entry = RatedChart {
            label: "song.json".to_string(),
            rate: 1.0,
            rating: Some(sample_rating()),
            error: None,
        };
        assert_eq!(format_rating_summary(&entry), "song.json x1.00 4.50 [HARD]");

        let unavailable = RatedChart {
            rating: None,
            ..entry
        };
        assert_eq!(
            format_rating_summary(&unavailable),
            "song.json x1.00 [UNAVAILABLE]"
        );
    }

    #[test]
    fn test_format_rating_console_breakdown() {
        let entry = RatedChart {
            label: "song.json".to_string(),
            rate: 1.0,
            rating: Some(sample_rating()),
            error: None,
        };
        let short = format_rating_console(&entry, false);
        let long = format_rating_console(&entry, true);
        assert!(short.contains("RATING"));
        assert!(!short.contains("P93"));
        assert!(long.contains("P93"));
        assert!(long.contains("780 (40 LN, 4K)"));
    }
}
