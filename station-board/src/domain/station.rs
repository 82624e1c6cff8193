//! Station records.

use super::GeoPoint;

/// A single entry of the station list: a display name and a position.
///
/// Records are created during station-list parsing and are immutable
/// afterwards. Identity is positional: a record is "the n-th station of
/// its list", in document order, and names carry no uniqueness
/// constraint.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Station {
    /// Display name. Empty if the source document carried none.
    pub name: String,

    /// Geographic position. Zero if the source document carried none.
    pub position: GeoPoint,
}

impl Station {
    /// Create a station record.
    pub fn new(name: impl Into<String>, position: GeoPoint) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}
