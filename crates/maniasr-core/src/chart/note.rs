use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
pub enum NoteKind {
    #[strum(serialize = "TAP")]
    Tap,
    #[strum(serialize = "LN")]
    Long,
}

impl NoteKind {
    pub fn short_name(&self) -> &'static str {
        self.into()
    }
}

impl std::fmt::Display for NoteKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// A single note, times in milliseconds at rate 1.0.
///
/// `end` is `None` for a tap. An `end` equal to `start` is also a tap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub column: usize,
    pub start: f64,
    #[serde(default)]
    pub end: Option<f64>,
}

impl Note {
    pub fn tap(column: usize, start: f64) -> Self {
        Self {
            column,
            start,
            end: None,
        }
    }

    pub fn long(column: usize, start: f64, end: f64) -> Self {
        Self {
            column,
            start,
            end: Some(end),
        }
    }

    pub fn kind(&self) -> NoteKind {
        match self.end {
            Some(end) if end != self.start => NoteKind::Long,
            _ => NoteKind::Tap,
        }
    }

    pub fn is_long(&self) -> bool {
        self.kind() == NoteKind::Long
    }

    /// Hold duration in ms (0 for taps)
    pub fn duration(&self) -> f64 {
        match self.kind() {
            NoteKind::Long => self.end.unwrap_or(self.start) - self.start,
            NoteKind::Tap => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_kind() {
        assert_eq!(Note::tap(0, 100.0).kind(), NoteKind::Tap);
        assert_eq!(Note::long(1, 100.0, 400.0).kind(), NoteKind::Long);
        // A zero-length hold is a tap
        assert_eq!(Note::long(1, 100.0, 100.0).kind(), NoteKind::Tap);
    }

    #[test]
    fn test_note_duration() {
        assert_eq!(Note::tap(0, 100.0).duration(), 0.0);
        assert_eq!(Note::long(0, 100.0, 350.0).duration(), 250.0);
    }

    #[test]
    fn test_note_kind_names() {
        assert_eq!(NoteKind::Tap.to_string(), "TAP");
        assert_eq!("LN".parse::<NoteKind>().ok(), Some(NoteKind::Long));
    }

    #[test]
    fn test_note_deserialize_without_end() {
        let note: Note = serde_json::from_str(r#"{"column":2,"start":500}"#).unwrap();
        assert_eq!(note, Note::tap(2, 500.0));
    }
}
