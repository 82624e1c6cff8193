//! Station list loading and filtering.
//!
//! The station list is read from an XML document enumerating stations
//! and their coordinates. [`StationList::load`] parses a whole document
//! into an ordered list; [`StationListProxy`] projects that list into a
//! filtered, sorted view for display.

mod error;
mod list;
mod proxy;

pub use error::LoadError;
pub use list::StationList;
pub use proxy::{SortMode, StationListProxy};
