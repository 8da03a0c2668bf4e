//! Nearest named color lookup.
//!
//! A [`ColorTable`] is loaded once from CSV data carrying `R`, `G`, `B` and
//! `Color Name` columns, then queried with [`nearest_color`] or
//! [`ColorTable::nearest`].

pub mod error;
pub mod global;
pub mod matcher;
pub mod rgb;
pub mod table;

pub use error::{ColorError, LoadError};
pub use matcher::{ColorMatch, nearest_color};
pub use rgb::{MAX_DISTANCE, Rgb};
pub use table::{ColorEntry, ColorTable};
