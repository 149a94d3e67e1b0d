use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::chart::{Chart, Note};
use crate::error::Result;

/// JSON interchange document for a chart.
///
/// ```json
/// { "key_count": 4, "notes": [{ "column": 0, "start": 0, "end": null }] }
/// ```
///
/// When `key_count` is omitted it is derived from the highest column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartDocument {
    #[serde(default)]
    pub key_count: Option<usize>,
    pub notes: Vec<Note>,
}

impl ChartDocument {
    pub fn into_chart(self) -> Result<Chart> {
        match self.key_count {
            Some(key_count) => Chart::new(self.notes, key_count),
            None => Chart::from_notes(self.notes),
        }
    }
}

impl From<&Chart> for ChartDocument {
    fn from(chart: &Chart) -> Self {
        Self {
            key_count: Some(chart.key_count()),
            notes: chart.notes().to_vec(),
        }
    }
}

impl Chart {
    /// Load a chart from a JSON document on disk
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a chart from JSON document content
    pub fn from_json(content: &str) -> Result<Self> {
        let document: ChartDocument = serde_json::from_str(content)?;
        document.into_chart()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&ChartDocument::from(self))?)
    }
}
