//! Domain types for the station board.
//!
//! This module contains the core value types shared by the station list
//! and the board view: geographic positions and station records.

mod position;
mod station;

pub use position::GeoPoint;
pub use station::Station;
