use crate::chart::Note;
use crate::error::{Error, Result};

/// A chart ready to be rated: its notes and the number of columns.
///
/// Note order is irrelevant; the estimator sorts on its own.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    notes: Vec<Note>,
    key_count: usize,
}

impl Chart {
    /// Create a chart with an explicit key count.
    ///
    /// Fails if the key count is zero or a note lies outside `[0, key_count)`.
    pub fn new(notes: Vec<Note>, key_count: usize) -> Result<Self> {
        if key_count == 0 {
            return Err(Error::InvalidKeyCount(key_count));
        }
        if let Some(note) = notes.iter().find(|n| n.column >= key_count) {
            return Err(Error::ColumnOutOfRange {
                column: note.column,
                key_count,
            });
        }
        Ok(Self { notes, key_count })
    }

    /// Create a chart whose key count is the highest used column + 1.
    pub fn from_notes(notes: Vec<Note>) -> Result<Self> {
        let key_count = notes
            .iter()
            .map(|n| n.column + 1)
            .max()
            .ok_or(Error::EmptyChart)?;
        Ok(Self { notes, key_count })
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn key_count(&self) -> usize {
        self.key_count
    }

    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    pub fn ln_count(&self) -> usize {
        self.notes.iter().filter(|n| n.is_long()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_new_validates_columns() {
        let notes = vec![Note::tap(0, 0.0), Note::tap(4, 100.0)];
        match Chart::new(notes, 4) {
            Err(Error::ColumnOutOfRange { column, key_count }) => {
                assert_eq!(column, 4);
                assert_eq!(key_count, 4);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_chart_new_rejects_zero_keys() {
        assert!(matches!(
            Chart::new(Vec::new(), 0),
            Err(Error::InvalidKeyCount(0))
        ));
    }

    #[test]
    fn test_chart_from_notes_derives_key_count() {
        let notes = vec![Note::tap(0, 0.0), Note::long(6, 100.0, 300.0)];
        let chart = Chart::from_notes(notes).unwrap();
        assert_eq!(chart.key_count(), 7);
        assert_eq!(chart.note_count(), 2);
        assert_eq!(chart.ln_count(), 1);
    }

    #[test]
    fn test_chart_from_empty_notes() {
        assert!(matches!(Chart::from_notes(Vec::new()), Err(Error::EmptyChart)));
    }

    #[test]
    fn test_empty_chart_with_key_count_is_allowed() {
        let chart = Chart::new(Vec::new(), 4).unwrap();
        assert_eq!(chart.note_count(), 0);
        assert_eq!(chart.ln_count(), 0);
    }

    #[test]
    fn test_ln_count_ignores_zero_length_holds() {
        let notes = vec![
            Note::long(0, 0.0, 400.0),
            Note::long(1, 100.0, 100.0),
            Note::tap(2, 200.0),
        ];
        let chart = Chart::new(notes, 4).unwrap();
        assert_eq!(chart.ln_count(), 1);
    }
}
