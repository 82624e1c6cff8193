//! Transit station board.
//!
//! Loads a station list from an XML document, filters and sorts it for
//! selection, and fetches the provider's arrivals/departures page for
//! the chosen station, split into displayable sections.

pub mod board;
pub mod domain;
pub mod settings;
pub mod stations;
