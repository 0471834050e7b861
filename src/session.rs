//! Session state for one opened folder of audio clips.
//!
//! The session owns the ordered clip records, the active selection and all
//! label mutations; `scan` builds the record list from a directory listing.

mod model;
mod scan;

pub use model::*;
pub use scan::scan;
