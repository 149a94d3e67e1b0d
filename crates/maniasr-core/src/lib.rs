pub mod chart;
pub mod config;
pub mod error;
pub mod estimator;
pub mod export;

pub use chart::{Chart, ChartDocument, Note, NoteKind};
pub use error::{Error, Result};
pub use estimator::{MAX_KEY_COUNT, Rating, rate, rate_chart, try_rate};
pub use export::{RatedChart, format_rating_console, generate_json, generate_tsv};
