//! Chart-related types.
//!
//! This module contains the input side of the estimator:
//! - `Note`, `NoteKind` - a single timed note (tap or long note)
//! - `Chart` - a set of notes with its key count
//! - `ChartDocument` - the JSON interchange document charts are loaded from

mod load;
mod note;
mod types;

pub use load::*;
pub use note::*;
pub use types::*;
