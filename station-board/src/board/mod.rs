//! Arrivals/departures board for a station.
//!
//! The transit provider publishes one HTML page per station carrying
//! both departures and arrivals, delimited only by marker CSS classes.
//! This module fetches that page and splits it into sections so a
//! front-end can present the preferred one.

mod client;
mod error;
mod page;

pub use client::{BoardClient, BoardClientConfig};
pub use error::BoardError;
pub use page::{BoardFragment, BoardPage, SectionKind};

/// Name of the stylesheet a front-end should apply for the preferred
/// view.
pub fn stylesheet_name(show_arrivals: bool) -> &'static str {
    if show_arrivals {
        "arrivals.css"
    } else {
        "departures.css"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stylesheet_follows_preference() {
        assert_eq!(stylesheet_name(true), "arrivals.css");
        assert_eq!(stylesheet_name(false), "departures.css");
    }
}
