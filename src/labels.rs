//! The labels file: a flat JSON array of per-clip records.
//!
//! Schema (one object per clip, in directory order):
//! `[{"wav": <path>, "length": <seconds-or-null>, "emo": <code-or-null>}, ...]`

mod io;
mod schema;

pub use io::{find_label_file, load, save};
pub use schema::LabelRecord;
