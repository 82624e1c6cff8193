//! Filtered, sorted views over a station list.

use tracing::debug;

use crate::domain::{GeoPoint, Station};

use super::list::StationList;

/// How a station view is ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Document order, as loaded.
    #[default]
    None,

    /// Case-insensitive alphabetical by display name.
    Alpha,

    /// Ascending distance from the user position. Falls back to
    /// document order when no user position has been supplied.
    Distance,

    /// Reserved for most-recently-used ordering; currently keeps
    /// document order.
    RecentUsage,
}

/// A filter/sort projection over a [`StationList`].
///
/// The proxy never mutates the underlying list; it recomputes a view
/// on every [`apply`](Self::apply), so changing the filter text, the
/// sort mode, or the user position simply requires re-applying.
#[derive(Debug, Clone, Default)]
pub struct StationListProxy {
    filter: String,
    sort_mode: SortMode,
    user_position: Option<GeoPoint>,
}

impl StationListProxy {
    /// Create a proxy with no filter and document-order sorting.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the substring filter. Matching is case-insensitive; an
    /// empty filter passes every station.
    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
    }

    /// Set the sort mode for subsequent views.
    pub fn set_sort_mode(&mut self, mode: SortMode) {
        debug!(?mode, "sort mode changed");
        self.sort_mode = mode;
    }

    /// Set or clear the user position used by distance sorting.
    pub fn set_user_position(&mut self, position: Option<GeoPoint>) {
        self.user_position = position;
    }

    /// Project `list` into a filtered, ordered view.
    pub fn apply<'a>(&self, list: &'a StationList) -> Vec<&'a Station> {
        let needle = self.filter.to_lowercase();
        let mut view: Vec<&Station> = list
            .iter()
            .filter(|s| needle.is_empty() || s.name.to_lowercase().contains(&needle))
            .collect();

        match self.sort_mode {
            SortMode::Alpha => {
                view.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
            }
            SortMode::Distance => {
                if let Some(here) = self.user_position {
                    view.sort_by(|a, b| {
                        here.distance_m(&a.position)
                            .total_cmp(&here.distance_m(&b.position))
                    });
                }
            }
            // Recency tracking is not implemented; both keep the
            // document order.
            SortMode::None | SortMode::RecentUsage => {}
        }

        view
    }
}
