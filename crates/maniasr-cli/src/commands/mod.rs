//! CLI command implementations.

pub mod rate;
pub mod sweep;

use std::path::Path;

use anyhow::Result;
use maniasr_core::{
    Chart, RatedChart, format_rating_console, generate_json, generate_tsv, try_rate,
};
use maniasr_core::export::format_rating_summary;
use tracing::{debug, info, warn};

use crate::cli::{ExportFormat, OutputArgs};
use crate::config::CliConfig;

/// Label a chart by its file name.
fn chart_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Load a chart file and log what it contains.
fn load_chart(path: &Path) -> maniasr_core::Result<Chart> {
    let chart = Chart::load(path)?;
    debug!(
        "Loaded {}: {} notes ({} LN) on {} keys",
        path.display(),
        chart.note_count(),
        chart.ln_count(),
        chart.key_count()
    );
    Ok(chart)
}

/// Rate `chart` at `rate`, keeping the failure reason when it is unavailable.
fn rate_entry(label: &str, chart: &Chart, rate: f64) -> RatedChart {
    let entry = match try_rate(chart, rate) {
        Ok(rating) => RatedChart {
            label: label.to_string(),
            rate,
            rating: Some(rating),
            error: None,
        },
        Err(e) => {
            warn!("{} x{:.2} could not be rated: {}", label, rate, e);
            RatedChart {
                label: label.to_string(),
                rate,
                rating: None,
                error: Some(e.to_string()),
            }
        }
    };
    info!("{}", format_rating_summary(&entry));
    entry
}

/// Entry for a chart file that could not be loaded.
fn load_failure(label: &str, rate: f64, error: &maniasr_core::Error) -> RatedChart {
    RatedChart {
        label: label.to_string(),
        rate,
        rating: None,
        error: Some(error.to_string()),
    }
}

fn render(entries: &[RatedChart], format: ExportFormat, breakdown: bool) -> Result<String> {
    Ok(match format {
        ExportFormat::Console => entries
            .iter()
            .map(|entry| format_rating_console(entry, breakdown))
            .collect::<Vec<_>>()
            .join("\n"),
        ExportFormat::Tsv => generate_tsv(entries),
        ExportFormat::Json => generate_json(entries)?,
    })
}

/// Render `entries` and write them to the requested destination.
fn emit(entries: &[RatedChart], output: &OutputArgs, config: &CliConfig) -> Result<()> {
    let content = render(entries, config.format(output.format), output.breakdown)?;
    if let Some(path) = &output.output {
        std::fs::write(path, &content)?;
        eprintln!("Exported to: {}", path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use maniasr_core::Note;

    fn stream() -> Chart {
        let notes = (0..32)
            .map(|i| Note::tap(i % 4, 500.0 + 120.0 * i as f64))
            .collect();
        Chart::new(notes, 4).unwrap()
    }

    #[test]
    fn test_chart_label() {
        assert_eq!(chart_label(Path::new("charts/song [hard].json")), "song [hard].json");
    }

    #[test]
    fn test_load_chart() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let document = r#"{"key_count":4,"notes":[{"column":0,"start":0},{"column":3,"start":250,"end":900}]}"#;
        std::io::Write::write_all(&mut file, document.as_bytes()).unwrap();

        let chart = load_chart(file.path()).unwrap();
        assert_eq!(chart.key_count(), 4);
        assert_eq!(chart.ln_count(), 1);
        assert!(load_chart(Path::new("does/not/exist.json")).is_err());
    }

    #[test]
    fn test_rate_entry_success() {
        let entry = rate_entry("stream", &stream(), 1.0);
        assert!(entry.rating.is_some());
        assert!(entry.error.is_none());
        assert!(entry.value() > 0.0);
    }

    #[test]
    fn test_rate_entry_unavailable() {
        let chart = Chart::new(vec![Note::tap(0, 0.0)], 4).unwrap();
        let entry = rate_entry("single", &chart, 1.0);
        assert!(entry.rating.is_none());
        assert!(entry.error.is_some());
        assert_eq!(entry.value(), -1.0);
    }

    #[test]
    fn test_render_formats() {
        let entries = vec![rate_entry("stream", &stream(), 1.0)];
        let tsv = render(&entries, ExportFormat::Tsv, false).unwrap();
        assert!(tsv.starts_with("chart\trate\trating"));
        assert_eq!(tsv.lines().count(), 2);

        let json = render(&entries, ExportFormat::Json, false).unwrap();
        assert!(json.contains("\"label\": \"stream\""));

        let console = render(&entries, ExportFormat::Console, true).unwrap();
        assert!(console.contains("stream"));
        assert!(console.contains("P93"));
    }
}
