#[cfg(test)]
#[path = "../../../tests/unit/models/common/domain_test.rs"]
mod domain_test;

/// Specifies location type: an index into the instance's location list where depots come
/// first, followed by clients.
pub type Location = usize;

/// Specifies distance value.
pub type Distance = i64;

/// Specifies duration value.
pub type Duration = i64;

/// Specifies cost value.
pub type Cost = i64;

/// Specifies an amount of goods, one value per capacity dimension.
pub type LoadValue = i64;

/// A sentinel value which encodes a forbidden traversal in distance and duration matrices.
/// Kept well below `i64::MAX` so that partial sums over a route never overflow.
pub const MAX_VALUE: i64 = i64::MAX / 4;

/// Represents a time window with inclusive integer bounds.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TimeWindow {
    /// Earliest time at which service may start.
    pub early: Duration,
    /// Latest time at which service may start.
    pub late: Duration,
}

impl TimeWindow {
    /// Creates a new [`TimeWindow`].
    pub fn new(early: Duration, late: Duration) -> Self {
        Self { early, late }
    }

    /// Returns unlimited time window.
    pub fn unbounded() -> Self {
        Self { early: 0, late: MAX_VALUE }
    }

    /// Checks whether time window has intersection with another one (inclusive).
    pub fn intersects(&self, other: &Self) -> bool {
        self.early <= other.late && other.early <= self.late
    }

    /// Returns the gap between two time windows, zero if they intersect.
    pub fn distance(&self, other: &Self) -> Duration {
        if self.intersects(other) {
            0
        } else if self.early > other.late {
            self.early - other.late
        } else {
            other.early - self.late
        }
    }

    /// Checks whether the bounds are ordered.
    pub fn is_valid(&self) -> bool {
        self.early <= self.late
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self::unbounded()
    }
}
