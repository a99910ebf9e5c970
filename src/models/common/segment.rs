#[cfg(test)]
#[path = "../../../tests/unit/models/common/segment_test.rs"]
mod segment_test;

use crate::models::common::{Distance, Duration, TimeWindow};

/// An associative summary of a contiguous visit sequence which allows to compute distance,
/// duration, time warp, and earliest/latest feasible start for any concatenation of such
/// sequences in constant time.
///
/// The concatenation formula is the standard time warp propagation: the earliest and latest
/// start values describe the interval in which the whole sequence can be started without
/// introducing additional waiting or lateness, while `time_warp` accumulates the minimum
/// lateness which no amount of waiting can avoid.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DistanceDurationSegment {
    distance: Distance,
    duration: Duration,
    time_warp: Duration,
    tw_early: Duration,
    tw_late: Duration,
    release_time: Duration,
}

impl DistanceDurationSegment {
    /// Creates a new instance of `DistanceDurationSegment` from raw values.
    pub fn new(
        distance: Distance,
        duration: Duration,
        time_warp: Duration,
        tw_early: Duration,
        tw_late: Duration,
        release_time: Duration,
    ) -> Self {
        Self { distance, duration, time_warp, tw_early, tw_late, release_time }
    }

    /// Creates a segment describing a single visit with the given service duration, service
    /// start window, and release time.
    pub fn for_location(service_duration: Duration, tw: TimeWindow, release_time: Duration) -> Self {
        Self {
            distance: 0,
            duration: service_duration,
            time_warp: 0,
            tw_early: tw.early,
            tw_late: tw.late,
            release_time,
        }
    }

    /// Concatenates this segment with another one over an edge with the given distance and
    /// duration. Associative: `(a ⊕ b) ⊕ c` and `a ⊕ (b ⊕ c)` agree on all fields.
    pub fn merge(&self, other: &Self, edge_distance: Distance, edge_duration: Duration) -> Self {
        let distance = self.distance.saturating_add(edge_distance).saturating_add(other.distance);

        // Elapsed time between starting this segment and arriving at the first visit of
        // `other`: the accumulated duration already contains waiting, while warped time
        // never passes.
        let offset = self.duration.saturating_sub(self.time_warp).saturating_add(edge_duration);
        let arrival = self.tw_early.saturating_add(offset);
        let waiting = (other.tw_early.saturating_sub(arrival)).max(0);
        let warp = (arrival.saturating_sub(other.tw_late)).max(0);

        let duration =
            self.duration.saturating_add(edge_duration).saturating_add(other.duration).saturating_add(waiting);
        let time_warp = self.time_warp.saturating_add(other.time_warp).saturating_add(warp);

        let tw_early = (other.tw_early.saturating_sub(offset)).max(self.tw_early) - waiting;
        let tw_late = (other.tw_late.saturating_sub(offset)).min(self.tw_late).saturating_add(warp);

        Self {
            distance,
            duration,
            time_warp,
            tw_early,
            tw_late,
            release_time: self.release_time.max(other.release_time),
        }
    }

    /// Returns total travel distance of the sequence.
    pub fn distance(&self) -> Distance {
        self.distance
    }

    /// Returns total duration of the sequence: travel, service, and unavoidable waiting.
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Returns accumulated time warp: the minimum total lateness after optimal wait
    /// placement within the sequence.
    pub fn time_warp(&self) -> Duration {
        self.time_warp
    }

    /// Returns the earliest feasible start of the sequence.
    pub fn tw_early(&self) -> Duration {
        self.tw_early
    }

    /// Returns the latest feasible start of the sequence.
    pub fn tw_late(&self) -> Duration {
        self.tw_late
    }

    /// Returns the release time of the sequence: the earliest moment its goods are available
    /// at the depot.
    pub fn release_time(&self) -> Duration {
        self.release_time
    }
}
